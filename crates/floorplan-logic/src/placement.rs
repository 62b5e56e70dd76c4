//! The placement engine.
//!
//! Rooms are laid out greedily in request order. The living room is seeded
//! at a fixed anchor; every other room tries to sit flush against the most
//! recently placed room of one of its preferred neighbor categories, and
//! falls back to a handful of random positions when no such spot is free.
//!
//! All job state lives in a [`LayoutJob`], created per call and dropped at
//! the end, so concurrent jobs never share occupancy data. Randomness comes
//! only from the injected `Rng`; a fixed seed replays the same layout.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::adjacency::preferred_neighbors;
use crate::canvas::{size_canvas, Dimensions};
use crate::catalog::{RoomCatalog, RoomCategory};
use crate::config::{validate_config, BoundsPolicy, LayoutConfig, SeedPolicy};
use crate::doorway::{self, DoorwaySegment};
use crate::error::LayoutError;
use crate::occupancy::{OccupancyIndex, Rect};
use crate::request::{HouseRequest, ValidatedRequest};

/// A room committed to the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub category: RoomCategory,
    #[serde(flatten)]
    pub rect: Rect,
}

/// Why a requested room instance has no position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnplacedReason {
    /// Only one living room is placed per layout.
    DuplicateLivingRoom,
    /// Adjacency search and every random sample collided.
    Exhausted { attempts: u32 },
}

/// What happened to one requested room instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstanceOutcome {
    Placed {
        category: RoomCategory,
        /// Index into [`LayoutResult::rooms`].
        room: usize,
    },
    Unplaced {
        category: RoomCategory,
        reason: UnplacedReason,
    },
}

impl InstanceOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, InstanceOutcome::Placed { .. })
    }
}

/// A finished layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub canvas: Dimensions,
    pub rooms: Vec<PlacedRoom>,
    pub doorways: Vec<DoorwaySegment>,
    /// One entry per requested instance, in processing order.
    pub outcomes: Vec<InstanceOutcome>,
}

impl LayoutResult {
    pub fn unplaced(&self) -> impl Iterator<Item = &InstanceOutcome> {
        self.outcomes.iter().filter(|o| !o.is_placed())
    }

    /// True when every requested instance got a room (duplicate living
    /// rooms excepted).
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| {
            !matches!(
                o,
                InstanceOutcome::Unplaced {
                    reason: UnplacedReason::Exhausted { .. },
                    ..
                }
            )
        })
    }

    pub fn rooms_of(&self, category: RoomCategory) -> impl Iterator<Item = &PlacedRoom> {
        self.rooms.iter().filter(move |r| r.category == category)
    }
}

/// Validate `request` and lay it out.
///
/// Fails before any geometry on an invalid configuration, a missing field,
/// or an unknown category. Rooms that cannot be placed are reported in
/// [`LayoutResult::outcomes`], not as errors.
pub fn generate_layout<R: Rng + ?Sized>(
    request: &HouseRequest,
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<LayoutResult, LayoutError> {
    if let Some(err) = validate_config(config).into_iter().next() {
        return Err(err.into());
    }
    let request = request.validate()?;
    Ok(layout_rooms(&request, config, rng))
}

/// Lay out an already validated request.
pub fn layout_rooms<R: Rng + ?Sized>(
    request: &ValidatedRequest,
    config: &LayoutConfig,
    rng: &mut R,
) -> LayoutResult {
    let canvas = size_canvas(request.base, request.total_rooms(), config);
    let mut job = LayoutJob::new(config, canvas, rng);
    log::info!(
        "Laying out {} rooms on {}x{} canvas (base size {})",
        request.total_rooms(),
        canvas.width,
        canvas.height,
        job.catalog.base_size()
    );

    let wants_living_room = request.count_of(RoomCategory::LivingRoom) > 0;
    if wants_living_room || config.seed_living_room == SeedPolicy::Always {
        job.seed_living_room();
    }

    for &(category, count) in &request.rooms {
        for _ in 0..count {
            job.place_instance(category);
        }
    }

    job.finish()
}

/// Candidate rectangles of `size` flush against `reference`, in the order
/// right, left, above, below. Each shares `reference`'s anchor on one axis.
pub fn adjacent_candidates(reference: &Rect, size: Dimensions) -> [Rect; 4] {
    [
        Rect::at(reference.right(), reference.y, size),
        Rect::at(reference.x - size.width, reference.y, size),
        Rect::at(reference.x, reference.top(), size),
        Rect::at(reference.x, reference.y - size.height, size),
    ]
}

/// Seed anchor for the living room: one third across, half way up.
pub fn living_room_anchor(canvas: Dimensions) -> (f32, f32) {
    ((canvas.width / 3.0).floor(), (canvas.height / 2.0).floor())
}

/// State of one layout job.
pub struct LayoutJob<'a, R: Rng> {
    config: &'a LayoutConfig,
    canvas: Dimensions,
    catalog: RoomCatalog,
    occupancy: OccupancyIndex,
    /// Category → index of its most recently placed room.
    anchors: HashMap<RoomCategory, usize>,
    /// The seeded living room has not yet been matched to a request.
    seed_unclaimed: bool,
    rooms: Vec<PlacedRoom>,
    doorways: Vec<DoorwaySegment>,
    outcomes: Vec<InstanceOutcome>,
    rng: R,
}

impl<'a, R: Rng> LayoutJob<'a, R> {
    pub fn new(config: &'a LayoutConfig, canvas: Dimensions, rng: R) -> Self {
        Self {
            config,
            canvas,
            catalog: RoomCatalog::for_canvas(canvas, config),
            occupancy: OccupancyIndex::new(),
            anchors: HashMap::new(),
            seed_unclaimed: false,
            rooms: Vec::new(),
            doorways: Vec::new(),
            outcomes: Vec::new(),
            rng,
        }
    }

    /// Place the living room at the canvas anchor.
    pub fn seed_living_room(&mut self) -> usize {
        let (x, y) = living_room_anchor(self.canvas);
        let size = self.catalog.size_of(RoomCategory::LivingRoom);
        self.seed_unclaimed = true;
        self.commit(RoomCategory::LivingRoom, Rect::at(x, y, size))
    }

    /// Place one requested instance of `category` and record its outcome.
    pub fn place_instance(&mut self, category: RoomCategory) -> InstanceOutcome {
        let outcome = self.resolve(category);
        self.outcomes.push(outcome);
        outcome
    }

    pub fn finish(self) -> LayoutResult {
        let unplaced = self.outcomes.iter().filter(|o| !o.is_placed()).count();
        log::info!(
            "Layout complete: {} rooms, {} doorways, {} unplaced",
            self.rooms.len(),
            self.doorways.len(),
            unplaced
        );
        LayoutResult {
            canvas: self.canvas,
            rooms: self.rooms,
            doorways: self.doorways,
            outcomes: self.outcomes,
        }
    }

    fn resolve(&mut self, category: RoomCategory) -> InstanceOutcome {
        if category == RoomCategory::LivingRoom {
            if let Some(&room) = self.anchors.get(&RoomCategory::LivingRoom) {
                if std::mem::take(&mut self.seed_unclaimed) {
                    return InstanceOutcome::Placed { category, room };
                }
                log::debug!("Skipping extra living room");
                return InstanceOutcome::Unplaced {
                    category,
                    reason: UnplacedReason::DuplicateLivingRoom,
                };
            }
        }

        let size = self.catalog.size_of(category);
        if let Some(room) = self.place_adjacent(category, size) {
            return InstanceOutcome::Placed { category, room };
        }

        log::debug!("No free wall for {}, trying random positions", category);
        match self.place_random(category, size) {
            Some(room) => InstanceOutcome::Placed { category, room },
            None => {
                let attempts = self.config.fallback_attempts;
                log::warn!(
                    "{} was not placed: no free position after {} random attempts",
                    category,
                    attempts
                );
                InstanceOutcome::Unplaced {
                    category,
                    reason: UnplacedReason::Exhausted { attempts },
                }
            }
        }
    }

    /// Try each placed preferred neighbor (shuffled), and each of its four
    /// walls (shuffled). Commits the first free candidate and its doorway.
    fn place_adjacent(&mut self, category: RoomCategory, size: Dimensions) -> Option<usize> {
        let mut references = preferred_neighbors(category).to_vec();
        references.shuffle(&mut self.rng);

        for reference in references {
            let Some(&ref_idx) = self.anchors.get(&reference) else {
                continue;
            };
            let anchor = self.rooms[ref_idx].rect;
            let mut candidates = adjacent_candidates(&anchor, size);
            candidates.shuffle(&mut self.rng);

            for rect in candidates {
                if !self.accepts(&rect) {
                    log::debug!(
                        "{} candidate at ({}, {}) next to {} rejected",
                        category,
                        rect.x,
                        rect.y,
                        reference
                    );
                    continue;
                }
                let idx = self.commit(category, rect);
                self.doorways.push(doorway::connect(
                    ref_idx,
                    &anchor,
                    idx,
                    &rect,
                    self.config.doorway_length,
                ));
                return Some(idx);
            }
        }
        None
    }

    /// Sample up to `fallback_attempts` integer anchors that keep the room
    /// inside the canvas. Commits the first free one; no doorway.
    fn place_random(&mut self, category: RoomCategory, size: Dimensions) -> Option<usize> {
        let max_x = (self.canvas.width - size.width).floor().max(0.0) as u32;
        let max_y = (self.canvas.height - size.height).floor().max(0.0) as u32;

        for _ in 0..self.config.fallback_attempts {
            let x = self.rng.gen_range(0..=max_x) as f32;
            let y = self.rng.gen_range(0..=max_y) as f32;
            let rect = Rect::at(x, y, size);
            if !self.occupancy.collides(&rect) {
                return Some(self.commit(category, rect));
            }
        }
        None
    }

    fn accepts(&self, rect: &Rect) -> bool {
        if self.config.bounds_policy == BoundsPolicy::RejectOutOfCanvas
            && !rect.within(self.canvas)
        {
            return false;
        }
        !self.occupancy.collides(rect)
    }

    fn commit(&mut self, category: RoomCategory, rect: Rect) -> usize {
        let idx = self.rooms.len();
        self.occupancy.insert(rect);
        self.rooms.push(PlacedRoom { category, rect });
        self.anchors.insert(category, idx);
        idx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(rooms: &[(RoomCategory, u32)], width: f32, height: f32) -> ValidatedRequest {
        ValidatedRequest {
            base: Dimensions::new(width, height),
            rooms: rooms.to_vec(),
        }
    }

    #[test]
    fn test_living_room_anchor() {
        assert_eq!(living_room_anchor(Dimensions::new(50.0, 50.0)), (16.0, 25.0));
        assert_eq!(living_room_anchor(Dimensions::new(100.0, 80.0)), (33.0, 40.0));
    }

    #[test]
    fn test_adjacent_candidates_share_walls() {
        let reference = Rect::new(16.0, 25.0, 14.0, 10.5);
        let size = Dimensions::new(8.4, 7.0);
        let [right, left, above, below] = adjacent_candidates(&reference, size);
        assert_eq!((right.x, right.y), (30.0, 25.0));
        assert_eq!((left.x, left.y), (16.0 - 8.4, 25.0));
        assert_eq!((above.x, above.y), (16.0, 35.5));
        assert_eq!((below.x, below.y), (16.0, 18.0));
        for c in [right, left, above, below] {
            assert!(!c.overlaps(&reference));
        }
    }

    #[test]
    fn test_seed_then_attach() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let req = request(
            &[(RoomCategory::LivingRoom, 1), (RoomCategory::Bedroom, 1)],
            50.0,
            50.0,
        );
        let layout = layout_rooms(&req, &config, &mut rng);

        assert_eq!(layout.rooms.len(), 2);
        assert_eq!(layout.rooms[0].category, RoomCategory::LivingRoom);
        assert_eq!((layout.rooms[0].rect.x, layout.rooms[0].rect.y), (16.0, 25.0));
        assert_eq!(layout.doorways.len(), 1);
        assert_eq!((layout.doorways[0].room_a, layout.doorways[0].room_b), (0, 1));
        assert_eq!(
            layout.outcomes,
            vec![
                InstanceOutcome::Placed {
                    category: RoomCategory::LivingRoom,
                    room: 0
                },
                InstanceOutcome::Placed {
                    category: RoomCategory::Bedroom,
                    room: 1
                },
            ]
        );
    }

    #[test]
    fn test_extra_living_rooms_skipped() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let req = request(&[(RoomCategory::LivingRoom, 3)], 50.0, 50.0);
        let layout = layout_rooms(&req, &config, &mut rng);

        assert_eq!(layout.rooms.len(), 1);
        let duplicates = layout
            .unplaced()
            .filter(|o| {
                matches!(
                    o,
                    InstanceOutcome::Unplaced {
                        reason: UnplacedReason::DuplicateLivingRoom,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(duplicates, 2);
        assert!(layout.is_complete());
    }

    #[test]
    fn test_no_seed_without_living_room() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let req = request(&[(RoomCategory::Bedroom, 1)], 50.0, 50.0);
        let layout = layout_rooms(&req, &config, &mut rng);
        assert_eq!(layout.rooms_of(RoomCategory::LivingRoom).count(), 0);
        assert_eq!(layout.rooms.len(), 1);
        assert!(layout.doorways.is_empty());
    }

    #[test]
    fn test_always_seed_policy() {
        let config = LayoutConfig {
            seed_living_room: SeedPolicy::Always,
            ..LayoutConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let req = request(&[(RoomCategory::Bedroom, 1)], 50.0, 50.0);
        let layout = layout_rooms(&req, &config, &mut rng);
        assert_eq!(layout.rooms_of(RoomCategory::LivingRoom).count(), 1);
        // The seed is not a requested instance.
        assert_eq!(layout.outcomes.len(), 1);
        assert_eq!(layout.doorways.len(), 1);
    }

    #[test]
    fn test_exhausted_rooms_reported() {
        // An all-zero stream samples (0, 0) every time, so only the first
        // garage finds a free spot.
        let config = LayoutConfig::default();
        let mut rng = StepRng::new(0, 0);
        let req = request(&[(RoomCategory::Garage, 3)], 50.0, 50.0);
        let layout = layout_rooms(&req, &config, &mut rng);

        assert_eq!(layout.rooms.len(), 1);
        assert_eq!((layout.rooms[0].rect.x, layout.rooms[0].rect.y), (0.0, 0.0));
        assert!(!layout.is_complete());
        let exhausted: Vec<_> = layout.unplaced().collect();
        assert_eq!(exhausted.len(), 2);
        assert_eq!(
            *exhausted[0],
            InstanceOutcome::Unplaced {
                category: RoomCategory::Garage,
                reason: UnplacedReason::Exhausted { attempts: 5 },
            }
        );
    }

    #[test]
    fn test_reject_policy_keeps_rooms_on_canvas() {
        let config = LayoutConfig {
            bounds_policy: BoundsPolicy::RejectOutOfCanvas,
            ..LayoutConfig::default()
        };
        let req = request(
            &[
                (RoomCategory::LivingRoom, 1),
                (RoomCategory::Bedroom, 3),
                (RoomCategory::Bathroom, 2),
                (RoomCategory::Kitchen, 1),
                (RoomCategory::Garage, 1),
            ],
            40.0,
            40.0,
        );
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let layout = layout_rooms(&req, &config, &mut rng);
            for room in &layout.rooms {
                assert!(
                    room.rect.within(layout.canvas),
                    "seed {}: {:?} leaves {:?}",
                    seed,
                    room,
                    layout.canvas
                );
            }
        }
    }

    #[test]
    fn test_job_starts_empty() {
        let config = LayoutConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let job = LayoutJob::new(&config, Dimensions::new(50.0, 50.0), &mut rng);
        let layout = job.finish();
        assert!(layout.rooms.is_empty());
        assert!(layout.doorways.is_empty());
        assert!(layout.outcomes.is_empty());
    }

    #[test]
    fn test_long_doorways_stay_on_shared_walls() {
        let config = LayoutConfig {
            doorway_length: 20.0,
            ..LayoutConfig::default()
        };
        let req = HouseRequest::new(
            [("living room", 1), ("bedroom", 2), ("bathroom", 2), ("kitchen", 1)],
            50.0,
            50.0,
        );
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let layout = generate_layout(&req, &config, &mut rng).unwrap();
            assert!(!layout.doorways.is_empty());
            let errs =
                crate::geometry::check_doorways_on_shared_wall(&layout.doorways, &layout.rooms);
            assert!(errs.is_empty(), "seed {}: {:?}", seed, errs);
        }
    }

    #[test]
    fn test_generate_layout_rejects_room_count_overflow() {
        let req = HouseRequest::new([("bedroom", u32::MAX), ("kitchen", 1)], 50.0, 50.0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate_layout(&req, &LayoutConfig::default(), &mut rng),
            Err(LayoutError::TooManyRooms)
        ));
    }

    #[test]
    fn test_generate_layout_rejects_bad_config() {
        let config = LayoutConfig {
            doorway_length: 0.0,
            ..LayoutConfig::default()
        };
        let req = HouseRequest::new([("bedroom", 1)], 50.0, 50.0);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            generate_layout(&req, &config, &mut rng),
            Err(LayoutError::Config(_))
        ));
    }
}
