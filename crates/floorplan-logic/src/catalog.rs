//! Room categories and the size catalog.
//!
//! Every room size is a fixed multiple of a single `base_size` derived from
//! the canvas, so a bigger house gets proportionally bigger rooms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::canvas::Dimensions;
use crate::config::LayoutConfig;

/// The fixed set of room categories the layout engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomCategory {
    #[serde(rename = "living room")]
    LivingRoom,
    #[serde(rename = "bedroom")]
    Bedroom,
    #[serde(rename = "bathroom")]
    Bathroom,
    #[serde(rename = "kitchen")]
    Kitchen,
    #[serde(rename = "garage")]
    Garage,
}

impl RoomCategory {
    pub fn all() -> &'static [RoomCategory] {
        &[
            RoomCategory::LivingRoom,
            RoomCategory::Bedroom,
            RoomCategory::Bathroom,
            RoomCategory::Kitchen,
            RoomCategory::Garage,
        ]
    }

    /// Canonical lowercase name, as used in requests.
    pub fn name(self) -> &'static str {
        match self {
            RoomCategory::LivingRoom => "living room",
            RoomCategory::Bedroom => "bedroom",
            RoomCategory::Bathroom => "bathroom",
            RoomCategory::Kitchen => "kitchen",
            RoomCategory::Garage => "garage",
        }
    }

    /// (width, height) multipliers applied to the catalog base size.
    pub fn size_multipliers(self) -> (f32, f32) {
        match self {
            RoomCategory::LivingRoom => (2.0, 1.5),
            RoomCategory::Bedroom => (1.2, 1.0),
            RoomCategory::Bathroom => (0.8, 0.7),
            RoomCategory::Kitchen => (1.5, 1.0),
            RoomCategory::Garage => (2.0, 1.2),
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoomCategory {
    type Err = String;

    /// Exact match on the canonical name; anything else is returned as-is
    /// so the caller can report the offending category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomCategory::all()
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Room sizes scaled to one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomCatalog {
    base_size: f32,
}

impl RoomCatalog {
    /// Derive the catalog for a sized canvas:
    /// `base_size = max(min_base_size, floor(min(w, h) / base_size_divisor))`.
    pub fn for_canvas(canvas: Dimensions, config: &LayoutConfig) -> Self {
        let shortest = canvas.width.min(canvas.height);
        let base_size = (shortest / config.base_size_divisor)
            .floor()
            .max(config.min_base_size);
        Self { base_size }
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Size of one room of the given category.
    pub fn size_of(&self, category: RoomCategory) -> Dimensions {
        let (w, h) = category.size_multipliers();
        Dimensions::new(self.base_size * w, self.base_size * h)
    }
}
