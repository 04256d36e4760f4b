//! Card strip geometry
//!
//! The strip is a row of equally sized cards, each `card_offset` to the right of
//! the previous one. Two coordinate frames are in play:
//!
//! - **window**: logical pixels, origin at the top-left of the viewport
//! - **strip-local**: origin at the top-left of card 0 at rest
//!
//! Gesture handling works in strip-local coordinates so that the hover index is
//! simply `floor(x / card_offset)`.

use cardfan_core::{Point, Rect, Size};

use crate::config::SelectorConfig;
use crate::error::{Result, SelectorError};

/// Resolve a strip-local x coordinate to a card index
///
/// Returns `floor(x / step)` clamped to `[0, count - 1]`, or `None` when there
/// are no cards. NaN resolves to the first card.
pub fn index_at(x: f32, step: f32, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let raw = (x / step).floor();
    if raw.is_nan() {
        return Some(0);
    }
    let last = (count - 1) as f32;
    Some(raw.clamp(0.0, last) as usize)
}

/// Resolved geometry of the card strip for one viewport size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectorLayout {
    viewport: Size,
    card_size: Size,
    step: f32,
    lift_distance: f32,
    strip_origin: Point,
}

impl SelectorLayout {
    /// Compute the layout for `viewport`
    ///
    /// Card 0 is centered horizontally and the strip is centered vertically.
    pub fn new(config: &SelectorConfig, viewport: Size) -> Result<Self> {
        if !(viewport.width > 0.0 && viewport.height > 0.0)
            || !viewport.width.is_finite()
            || !viewport.height.is_finite()
        {
            return Err(SelectorError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let card_width = viewport.width * config.card_width_ratio;
        let card_size = Size::new(card_width, card_width * config.card_aspect);
        let strip_origin = Point::new(
            viewport.width / 2.0 - card_size.width / 2.0,
            (viewport.height - card_size.height) / 2.0,
        );

        Ok(Self {
            viewport,
            card_size,
            step: config.card_offset,
            lift_distance: config.lift_distance,
            strip_origin,
        })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn card_size(&self) -> Size {
        self.card_size
    }

    /// Horizontal distance between consecutive cards
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Window position of card 0's top-left corner at rest
    pub fn strip_origin(&self) -> Point {
        self.strip_origin
    }

    /// Rest rectangle of card `index`, in window coordinates
    pub fn card_rect(&self, index: usize) -> Rect {
        Rect::from_origin_size(
            Point::new(
                self.strip_origin.x + self.step * index as f32,
                self.strip_origin.y,
            ),
            self.card_size,
        )
    }

    /// Union of the rest rectangles of `count` cards
    pub fn strip_bounds(&self, count: usize) -> Rect {
        match count {
            0 => Rect::from_origin_size(self.strip_origin, Size::ZERO),
            n => self.card_rect(0).union(&self.card_rect(n - 1)),
        }
    }

    /// Area where a pointer-down starts a gesture, in window coordinates
    ///
    /// Spans the whole viewport width and the card row, extended upward by the
    /// lift distance so a raised card stays grabbable.
    pub fn hit_band(&self) -> Rect {
        let lift = self.lift_distance.abs();
        Rect::new(
            0.0,
            self.strip_origin.y - lift,
            self.viewport.width,
            self.card_size.height + lift,
        )
    }

    /// Convert a window point to strip-local coordinates
    pub fn to_local(&self, window: Point) -> Point {
        Point::new(window.x - self.strip_origin.x, window.y - self.strip_origin.y)
    }

    /// Convert a strip-local point to window coordinates
    pub fn to_window(&self, local: Point) -> Point {
        Point::new(local.x + self.strip_origin.x, local.y + self.strip_origin.y)
    }

    /// Card index under a strip-local x coordinate
    pub fn index_at(&self, local_x: f32, count: usize) -> Option<usize> {
        index_at(local_x, self.step, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SelectorLayout {
        SelectorLayout::new(&SelectorConfig::default(), Size::new(400.0, 800.0)).unwrap()
    }

    #[test]
    fn test_index_at_clamps() {
        assert_eq!(index_at(85.0, 40.0, 5), Some(2));
        assert_eq!(index_at(0.0, 40.0, 5), Some(0));
        assert_eq!(index_at(39.9, 40.0, 5), Some(0));
        assert_eq!(index_at(40.0, 40.0, 5), Some(1));
        assert_eq!(index_at(-50.0, 40.0, 5), Some(0));
        assert_eq!(index_at(1000.0, 40.0, 5), Some(4));
        assert_eq!(index_at(f32::INFINITY, 40.0, 5), Some(4));
        assert_eq!(index_at(f32::NEG_INFINITY, 40.0, 5), Some(0));
        assert_eq!(index_at(f32::NAN, 40.0, 5), Some(0));
    }

    #[test]
    fn test_index_at_empty() {
        assert_eq!(index_at(85.0, 40.0, 0), None);
        assert_eq!(index_at(-50.0, 40.0, 0), None);
    }

    #[test]
    fn test_index_always_in_range() {
        for i in -200..200 {
            let x = i as f32 * 3.7;
            for count in 1..8 {
                let index = index_at(x, 40.0, count).unwrap();
                assert!(index < count, "x={} count={} index={}", x, count, index);
            }
        }
    }

    #[test]
    fn test_card_geometry() {
        let layout = layout();
        assert_eq!(layout.card_size(), Size::new(80.0, 88.0));
        assert_eq!(layout.strip_origin(), Point::new(160.0, 356.0));
        assert_eq!(layout.card_rect(2), Rect::new(240.0, 356.0, 80.0, 88.0));
        assert_eq!(layout.strip_bounds(5), Rect::new(160.0, 356.0, 240.0, 88.0));
    }

    #[test]
    fn test_coordinate_round_trip() {
        let layout = layout();
        let window = Point::new(245.0, 366.0);
        let local = layout.to_local(window);
        assert_eq!(local, Point::new(85.0, 10.0));
        assert_eq!(layout.to_window(local), window);
        assert_eq!(layout.index_at(local.x, 5), Some(2));
    }

    #[test]
    fn test_hit_band_covers_lifted_cards() {
        let band = layout().hit_band();
        assert!(band.contains(Point::new(5.0, 330.0)));
        assert!(band.contains(Point::new(395.0, 440.0)));
        assert!(!band.contains(Point::new(200.0, 300.0)));
        assert!(!band.contains(Point::new(200.0, 450.0)));
    }

    #[test]
    fn test_rejects_empty_viewport() {
        let err = SelectorLayout::new(&SelectorConfig::default(), Size::new(0.0, 800.0));
        assert!(matches!(err, Err(SelectorError::InvalidViewport { .. })));
    }
}
