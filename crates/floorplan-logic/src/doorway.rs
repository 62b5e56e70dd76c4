//! Doorway gaps between adjacent rooms.
//!
//! The engine only asks for a doorway after attaching a room flush against
//! a reference room, so adjacency is trusted here and not re-validated.

use serde::{Deserialize, Serialize};

use crate::occupancy::Rect;

/// Tolerance for float comparisons on room edges.
pub const EDGE_EPSILON: f32 = 1e-3;

/// Which wall the doorway sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallOrientation {
    /// Rooms side by side; the shared wall runs along y.
    Vertical,
    /// Rooms stacked; the shared wall runs along x.
    Horizontal,
}

/// A short segment on the wall shared by two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorwaySegment {
    /// Index of the reference room in the layout.
    pub room_a: usize,
    /// Index of the attached room in the layout.
    pub room_b: usize,
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub orientation: WallOrientation,
}

impl DoorwaySegment {
    pub fn midpoint(&self) -> (f32, f32) {
        (
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }
}

/// Wall orientation between reference room `a` and attached room `b`.
///
/// Side by side when `b` starts at least one `a`-width to the right, or ends
/// at or before `a`'s left edge. Anything else is treated as stacked.
pub fn wall_orientation(a: &Rect, b: &Rect) -> WallOrientation {
    let dx = b.x - a.x;
    if dx >= a.width - EDGE_EPSILON || -dx >= b.width - EDGE_EPSILON {
        WallOrientation::Vertical
    } else {
        WallOrientation::Horizontal
    }
}

/// Doorway between reference room `a` (index `room_a`) and attached room
/// `b` (index `room_b`), centered on the shared wall. The segment is
/// `length` units long, or the whole shared wall if that is shorter.
pub fn connect(room_a: usize, a: &Rect, room_b: usize, b: &Rect, length: f32) -> DoorwaySegment {
    let half = length / 2.0;
    let orientation = wall_orientation(a, b);
    let (start, end) = match orientation {
        WallOrientation::Vertical => {
            let x = a.x.max(b.x);
            let (lo, hi) = (a.y.max(b.y), a.top().min(b.top()));
            let (y, half) = fit_to_span((a.y + b.y + a.height) / 2.0, half, lo, hi);
            ((x, y - half), (x, y + half))
        }
        WallOrientation::Horizontal => {
            let y = a.y.max(b.y);
            let (lo, hi) = (a.x.max(b.x), a.right().min(b.right()));
            let (x, half) = fit_to_span((a.x + b.x + a.width) / 2.0, half, lo, hi);
            ((x - half, y), (x + half, y))
        }
    };
    DoorwaySegment {
        room_a,
        room_b,
        start,
        end,
        orientation,
    }
}

/// Fit a segment of half-length `half` centered at `center` inside
/// `[lo, hi]`, returning the new center and half-length. A span shorter
/// than the segment is covered end to end.
fn fit_to_span(center: f32, half: f32, lo: f32, hi: f32) -> (f32, f32) {
    if hi - lo <= 2.0 * half {
        ((lo + hi) / 2.0, ((hi - lo) / 2.0).max(0.0))
    } else {
        (center.clamp(lo + half, hi - half), half)
    }
}
