//! House requests.
//!
//! A request is the room-count mapping plus base dimensions handed over by
//! whatever extracted it (typically a text matcher). Fields are optional at
//! the serde level so that a missing key is reported by name instead of as
//! a generic parse failure.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::canvas::Dimensions;
use crate::catalog::RoomCategory;
use crate::error::LayoutError;

/// Raw house request, as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HouseRequest {
    /// Category name → requested count, in request order.
    pub rooms: Option<IndexMap<String, u32>>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub base: Dimensions,
    /// (category, count) in request order.
    pub rooms: Vec<(RoomCategory, u32)>,
}

impl ValidatedRequest {
    /// Total requested instances. Saturates; [`HouseRequest::validate`]
    /// rejects requests whose total would overflow.
    pub fn total_rooms(&self) -> u32 {
        self.rooms
            .iter()
            .fold(0u32, |acc, &(_, n)| acc.saturating_add(n))
    }

    pub fn count_of(&self, category: RoomCategory) -> u32 {
        self.rooms
            .iter()
            .filter(|(c, _)| *c == category)
            .fold(0u32, |acc, &(_, n)| acc.saturating_add(n))
    }
}

impl HouseRequest {
    /// Build a request from (category name, count) pairs.
    pub fn new<S: Into<String>>(
        rooms: impl IntoIterator<Item = (S, u32)>,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            rooms: Some(rooms.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            width: Some(width),
            height: Some(height),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check required fields, dimensions, and category names.
    ///
    /// Field presence is checked in the order width, height, rooms. The total
    /// room count must fit in a `u32`.
    pub fn validate(&self) -> Result<ValidatedRequest, LayoutError> {
        let width = self.width.ok_or(LayoutError::MissingField("width"))?;
        let height = self.height.ok_or(LayoutError::MissingField("height"))?;
        let rooms = self
            .rooms
            .as_ref()
            .ok_or(LayoutError::MissingField("rooms"))?;

        for (field, value) in [("width", width), ("height", height)] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(LayoutError::InvalidDimension { field, value });
            }
        }

        let rooms = rooms
            .iter()
            .map(|(name, &count)| {
                name.parse::<RoomCategory>()
                    .map(|category| (category, count))
                    .map_err(LayoutError::UnknownCategory)
            })
            .collect::<Result<Vec<_>, _>>()?;

        rooms
            .iter()
            .try_fold(0u32, |acc, &(_, n)| acc.checked_add(n))
            .ok_or(LayoutError::TooManyRooms)?;

        Ok(ValidatedRequest {
            base: Dimensions::new(width, height),
            rooms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_validate() {
        let request = HouseRequest::from_json(
            r#"{"rooms": {"bedroom": 2, "kitchen": 1, "living room": 1}, "width": 50, "height": 50}"#,
        )
        .unwrap();
        let valid = request.validate().unwrap();
        assert_eq!(valid.base, Dimensions::new(50.0, 50.0));
        assert_eq!(
            valid.rooms,
            vec![
                (RoomCategory::Bedroom, 2),
                (RoomCategory::Kitchen, 1),
                (RoomCategory::LivingRoom, 1),
            ]
        );
        assert_eq!(valid.total_rooms(), 4);
        assert_eq!(valid.count_of(RoomCategory::LivingRoom), 1);
        assert_eq!(valid.count_of(RoomCategory::Garage), 0);
    }

    #[test]
    fn test_missing_height() {
        let request =
            HouseRequest::from_json(r#"{"rooms": {"bedroom": 1}, "width": 50}"#).unwrap();
        let err = request.validate().unwrap_err();
        assert!(matches!(err, LayoutError::MissingField("height")));
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn test_missing_rooms() {
        let request = HouseRequest::from_json(r#"{"width": 50, "height": 50}"#).unwrap();
        assert!(matches!(
            request.validate(),
            Err(LayoutError::MissingField("rooms"))
        ));
    }

    #[test]
    fn test_unknown_category() {
        let request = HouseRequest::new([("bedroom", 1), ("balcony", 2)], 50.0, 50.0);
        match request.validate() {
            Err(LayoutError::UnknownCategory(name)) => assert_eq!(name, "balcony"),
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_non_positive_dimension() {
        let request = HouseRequest::new([("bedroom", 1)], 0.0, 50.0);
        assert!(matches!(
            request.validate(),
            Err(LayoutError::InvalidDimension { field: "width", .. })
        ));
    }

    #[test]
    fn test_room_total_overflow_rejected() {
        let request = HouseRequest::new([("bedroom", u32::MAX), ("kitchen", 1)], 50.0, 50.0);
        assert!(matches!(
            request.validate(),
            Err(LayoutError::TooManyRooms)
        ));

        let at_limit = HouseRequest::new([("bedroom", u32::MAX - 1), ("kitchen", 1)], 50.0, 50.0);
        assert_eq!(at_limit.validate().unwrap().total_rooms(), u32::MAX);
    }

    #[test]
    fn test_counts_saturate() {
        let valid = ValidatedRequest {
            base: Dimensions::new(50.0, 50.0),
            rooms: vec![(RoomCategory::Garage, u32::MAX), (RoomCategory::Garage, 2)],
        };
        assert_eq!(valid.total_rooms(), u32::MAX);
        assert_eq!(valid.count_of(RoomCategory::Garage), u32::MAX);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            HouseRequest::from_json(r#"{"rooms": {"bedroom": -1}}"#),
            Err(LayoutError::Json(_))
        ));
    }
}
