//! Adjacency preferences between room categories.
//!
//! Each category lists the categories it would like to share a wall with,
//! most preferred first. The living room entry is never consulted: the
//! seeded living room is the only one a layout contains.

use crate::catalog::RoomCategory;

/// Preferred neighbor categories for `category`.
pub fn preferred_neighbors(category: RoomCategory) -> &'static [RoomCategory] {
    use RoomCategory::*;
    match category {
        Bedroom => &[LivingRoom, Bathroom],
        Bathroom => &[Bedroom, Kitchen],
        Kitchen => &[LivingRoom, Garage],
        Garage => &[Kitchen, LivingRoom],
        LivingRoom => &[LivingRoom],
    }
}

/// Returns true if `a` lists `b` as a preferred neighbor.
pub fn prefers(a: RoomCategory, b: RoomCategory) -> bool {
    preferred_neighbors(a).contains(&b)
}
