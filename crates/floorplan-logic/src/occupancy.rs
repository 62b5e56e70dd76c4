//! Axis-aligned rectangles and the occupancy index.
//!
//! Rectangles are anchored at their bottom-left corner. Two rectangles that
//! merely share an edge do not overlap.

use serde::{Deserialize, Serialize};

use crate::canvas::Dimensions;

/// Axis-aligned rectangle, anchored at the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(x: f32, y: f32, size: Dimensions) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// True iff the projections intersect on both axes with positive length.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || self.x >= other.right()
            || self.top() <= other.y
            || self.y >= other.top())
    }

    /// True iff the rectangle lies entirely within `[0, w] × [0, h]`.
    pub fn within(&self, bounds: Dimensions) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= bounds.width && self.top() <= bounds.height
    }
}

/// Rectangles committed so far in one layout job.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    rects: Vec<Rect>,
}

impl OccupancyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `rect` overlaps any committed rectangle.
    pub fn collides(&self, rect: &Rect) -> bool {
        self.rects.iter().any(|r| r.overlaps(rect))
    }

    /// Commit a rectangle. The index only grows.
    pub fn insert(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 4.0, 4.0);
        let above = Rect::new(2.0, 10.0, 4.0, 4.0);
        let corner = Rect::new(10.0, 10.0, 4.0, 4.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&above));
        assert!(!a.overlaps(&corner));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // x projections intersect, y projections don't
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 20.0, 20.0);
        let inner = Rect::new(5.0, 5.0, 2.0, 2.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_within_bounds() {
        let bounds = Dimensions::new(50.0, 50.0);
        assert!(Rect::new(0.0, 0.0, 50.0, 50.0).within(bounds));
        assert!(!Rect::new(-1.0, 0.0, 10.0, 10.0).within(bounds));
        assert!(!Rect::new(45.0, 0.0, 10.0, 10.0).within(bounds));
    }

    #[test]
    fn test_index_collides() {
        let mut index = OccupancyIndex::new();
        assert!(index.is_empty());
        assert!(!index.collides(&Rect::new(0.0, 0.0, 5.0, 5.0)));

        index.insert(Rect::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(index.len(), 1);
        assert!(index.collides(&Rect::new(4.0, 4.0, 5.0, 5.0)));
        assert!(!index.collides(&Rect::new(5.0, 0.0, 5.0, 5.0)));
    }
}
