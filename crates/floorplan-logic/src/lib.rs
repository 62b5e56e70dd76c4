//! Pure floor plan layout logic.
//!
//! This crate turns a room-count request (how many bedrooms, bathrooms, …
//! plus base house dimensions) into a non-overlapping rectangular layout.
//! Functions take plain data and an injected random source and return
//! plain data, so everything here is unit-testable and free of any
//! rendering, export, or network concerns.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjacency`] | Preferred neighbor categories per room category |
//! | [`canvas`] | Canvas sizing from base dimensions and room count |
//! | [`catalog`] | Room categories and per-category sizes |
//! | [`config`] | Layout tuning knobs and their validation |
//! | [`doorway`] | Doorway segments on the shared edge of adjacent rooms |
//! | [`error`] | Job-level error taxonomy |
//! | [`geometry`] | Post-hoc layout validation (overlaps, doorways, bounds) |
//! | [`occupancy`] | Rectangles and the overlap index |
//! | [`placement`] | Seeded adjacency search with random fallback |
//! | [`request`] | House request parsing and validation |
//!
//! ```
//! use floorplan_logic::config::LayoutConfig;
//! use floorplan_logic::placement::generate_layout;
//! use floorplan_logic::request::HouseRequest;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let request = HouseRequest::from_json(
//!     r#"{"rooms": {"living room": 1, "bedroom": 2}, "width": 50, "height": 50}"#,
//! )
//! .unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let layout = generate_layout(&request, &LayoutConfig::default(), &mut rng).unwrap();
//! assert_eq!(layout.canvas.width, 50.0);
//! assert!(!layout.rooms.is_empty());
//! ```

pub mod adjacency;
pub mod canvas;
pub mod catalog;
pub mod config;
pub mod doorway;
pub mod error;
pub mod geometry;
pub mod occupancy;
pub mod placement;
pub mod request;
