//! Canvas sizing.
//!
//! The canvas grows in whole multiples of the requested base dimensions:
//! one step per `rooms_per_scale_step` requested rooms.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;

/// A `(width, height)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// `max(1, ceil(total_rooms / rooms_per_scale_step))`.
pub fn scaling_factor(total_rooms: u32, config: &LayoutConfig) -> u32 {
    let step = config.rooms_per_scale_step.max(1);
    total_rooms.div_ceil(step).max(1)
}

/// Scale the base dimensions for the total number of requested rooms.
pub fn size_canvas(base: Dimensions, total_rooms: u32, config: &LayoutConfig) -> Dimensions {
    let factor = scaling_factor(total_rooms, config) as f32;
    Dimensions::new(base.width * factor, base.height * factor)
}
