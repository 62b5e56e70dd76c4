//! Layout job errors.
//!
//! Every variant here aborts the job before any room is placed. Rooms
//! that cannot be placed are not errors; see
//! [`InstanceOutcome`](crate::placement::InstanceOutcome).

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid house data: missing '{0}'")]
    MissingField(&'static str),

    #[error("invalid house data: '{field}' must be a positive number, got {value}")]
    InvalidDimension { field: &'static str, value: f32 },

    #[error("invalid house data: requested room count does not fit in a u32")]
    TooManyRooms,

    #[error("unknown room category: '{0}'")]
    UnknownCategory(String),

    #[error("invalid house data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid layout config: {0}")]
    Config(#[from] ConfigError),
}
