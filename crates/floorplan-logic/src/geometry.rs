//! Geometry validation for generated layouts.
//!
//! Pure functions that take a finished [`LayoutResult`] and return
//! validation errors. Nothing here mutates or repairs a layout.

use crate::canvas::Dimensions;
use crate::catalog::RoomCategory;
use crate::doorway::{DoorwaySegment, WallOrientation, EDGE_EPSILON};
use crate::placement::{LayoutResult, PlacedRoom};

/// A geometry validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Rooms (per-room) ─────────────────────────────────────────────────

/// Check that no room has zero or negative dimensions.
pub fn check_room_dimensions(rooms: &[PlacedRoom]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, r) in rooms.iter().enumerate() {
        if !(r.rect.width > 0.0) || !(r.rect.height > 0.0) {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Error,
                message: format!(
                    "Room #{} ({}) has non-positive dimensions: {}×{}",
                    i, r.category, r.rect.width, r.rect.height
                ),
            });
        }
    }
    errors
}

/// Flag rooms that extend outside the canvas.
///
/// A warning only: adjacency placements may overflow unless the job ran
/// with [`BoundsPolicy::RejectOutOfCanvas`](crate::config::BoundsPolicy).
pub fn check_rooms_within_canvas(rooms: &[PlacedRoom], canvas: Dimensions) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, r) in rooms.iter().enumerate() {
        if !r.rect.within(canvas) {
            errors.push(ValidationError {
                category: "room_geometry",
                severity: Severity::Warning,
                message: format!(
                    "Room #{} ({}) extends outside canvas: ({:.1},{:.1})→({:.1},{:.1}) vs {}×{}",
                    i,
                    r.category,
                    r.rect.x,
                    r.rect.y,
                    r.rect.right(),
                    r.rect.top(),
                    canvas.width,
                    canvas.height
                ),
            });
        }
    }
    errors
}

/// Check there is at most one living room.
pub fn check_single_living_room(rooms: &[PlacedRoom]) -> Vec<ValidationError> {
    let count = rooms
        .iter()
        .filter(|r| r.category == RoomCategory::LivingRoom)
        .count();
    if count > 1 {
        vec![ValidationError {
            category: "room_count",
            severity: Severity::Error,
            message: format!("{} living rooms placed, expected at most 1", count),
        }]
    } else {
        Vec::new()
    }
}

// ── B. Room-to-room (pairwise) ──────────────────────────────────────────

/// AABB overlap test: no two rooms may share positive area.
pub fn check_room_overlaps(rooms: &[PlacedRoom]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            if rooms[i].rect.overlaps(&rooms[j].rect) {
                errors.push(ValidationError {
                    category: "room_overlap",
                    severity: Severity::Error,
                    message: format!(
                        "Rooms #{} ({}) and #{} ({}) overlap",
                        i, rooms[i].category, j, rooms[j].category
                    ),
                });
            }
        }
    }
    errors
}

// ── C. Doorway validity ─────────────────────────────────────────────────

/// Check that both rooms referenced by each doorway exist.
pub fn check_doorway_rooms_exist(
    doorways: &[DoorwaySegment],
    rooms: &[PlacedRoom],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, d) in doorways.iter().enumerate() {
        for idx in [d.room_a, d.room_b] {
            if idx >= rooms.len() {
                errors.push(ValidationError {
                    category: "doorway_validity",
                    severity: Severity::Error,
                    message: format!("Doorway #{} references non-existent room #{}", i, idx),
                });
            }
        }
    }
    errors
}

/// Check that each doorway's endpoints lie on the wall its two rooms share.
pub fn check_doorways_on_shared_wall(
    doorways: &[DoorwaySegment],
    rooms: &[PlacedRoom],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (i, d) in doorways.iter().enumerate() {
        let (Some(a), Some(b)) = (rooms.get(d.room_a), rooms.get(d.room_b)) else {
            continue; // caught by existence check
        };
        let (a, b) = (&a.rect, &b.rect);
        let near = |p: f32, q: f32| (p - q).abs() <= EDGE_EPSILON;

        let on_wall = match d.orientation {
            WallOrientation::Vertical => {
                let wall_x = if near(a.right(), b.x) {
                    Some(b.x)
                } else if near(b.right(), a.x) {
                    Some(a.x)
                } else {
                    None
                };
                let (lo, hi) = (a.y.max(b.y), a.top().min(b.top()));
                wall_x.is_some_and(|x| {
                    [d.start, d.end].iter().all(|&(px, py)| {
                        near(px, x) && py >= lo - EDGE_EPSILON && py <= hi + EDGE_EPSILON
                    })
                })
            }
            WallOrientation::Horizontal => {
                let wall_y = if near(a.top(), b.y) {
                    Some(b.y)
                } else if near(b.top(), a.y) {
                    Some(a.y)
                } else {
                    None
                };
                let (lo, hi) = (a.x.max(b.x), a.right().min(b.right()));
                wall_y.is_some_and(|y| {
                    [d.start, d.end].iter().all(|&(px, py)| {
                        near(py, y) && px >= lo - EDGE_EPSILON && px <= hi + EDGE_EPSILON
                    })
                })
            }
        };

        if !on_wall {
            errors.push(ValidationError {
                category: "doorway_validity",
                severity: Severity::Error,
                message: format!(
                    "Doorway #{} ({:.2},{:.2})→({:.2},{:.2}) is not on the wall shared by rooms #{} and #{}",
                    i, d.start.0, d.start.1, d.end.0, d.end.1, d.room_a, d.room_b
                ),
            });
        }
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all geometry validations and return combined results.
pub fn validate_layout(layout: &LayoutResult) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_room_dimensions(&layout.rooms));
    all.extend(check_rooms_within_canvas(&layout.rooms, layout.canvas));
    all.extend(check_single_living_room(&layout.rooms));
    all.extend(check_room_overlaps(&layout.rooms));
    all.extend(check_doorway_rooms_exist(&layout.doorways, &layout.rooms));
    all.extend(check_doorways_on_shared_wall(&layout.doorways, &layout.rooms));
    all
}

/// Only the `Severity::Error` entries.
pub fn errors_only(results: &[ValidationError]) -> Vec<&ValidationError> {
    results
        .iter()
        .filter(|e| e.severity == Severity::Error)
        .collect()
}
