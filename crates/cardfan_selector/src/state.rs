//! Shared interaction state
//!
//! One writer (the selector's gesture handling), many readers (cards computing
//! their transforms). Handed around as a [`Shared<InteractionState>`].
//!
//! Transitions are guarded so that each pointer lifecycle goes
//! `Idle -> Hover -> Dragging -> Idle` at most once, and a dragged card is never
//! also the pressed card.
//!
//! [`Shared<InteractionState>`]: cardfan_core::Shared

use cardfan_animation::{AnimatedVec2, SchedulerHandle, SpringConfig};
use cardfan_core::{Point, Vec2};

/// Which phase of a pointer lifecycle the selector is in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// No active gesture
    #[default]
    Idle,
    /// Pointer is down and sweeping horizontally; one card is lifted
    Hover,
    /// A card has been pulled out of the strip and follows the pointer
    Dragging,
}

/// Pressed/dragged indices plus the animated drag offset
#[derive(Debug)]
pub struct InteractionState {
    mode: InteractionMode,
    pressed: Option<usize>,
    dragged: Option<usize>,
    gesture_origin: Point,
    drag_offset: AnimatedVec2,
}

impl InteractionState {
    /// Create a neutral state; `release_spring` drives the drag offset home
    pub fn new(scheduler: SchedulerHandle, release_spring: SpringConfig) -> Self {
        Self {
            mode: InteractionMode::Idle,
            pressed: None,
            dragged: None,
            gesture_origin: Point::ZERO,
            drag_offset: AnimatedVec2::new(scheduler, Vec2::ZERO, release_spring),
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Card lifted by hover
    pub fn pressed_index(&self) -> Option<usize> {
        self.pressed
    }

    /// Card being dragged
    pub fn dragged_index(&self) -> Option<usize> {
        self.dragged
    }

    /// Pressed index with `-1` for none
    pub fn pressed_index_raw(&self) -> i64 {
        raw_index(self.pressed)
    }

    /// Dragged index with `-1` for none
    pub fn dragged_index_raw(&self) -> i64 {
        raw_index(self.dragged)
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.pressed == Some(index)
    }

    pub fn is_dragged(&self, index: usize) -> bool {
        self.dragged == Some(index)
    }

    /// Current drag displacement (animating back to zero after release)
    pub fn drag_offset(&self) -> Vec2 {
        self.drag_offset.get()
    }

    /// Whether the drag offset is still springing home
    pub fn is_drag_offset_animating(&self) -> bool {
        self.drag_offset.is_animating()
    }

    /// Pointer position where the current phase began (strip-local)
    pub fn gesture_origin(&self) -> Point {
        self.gesture_origin
    }

    /// Start a lifecycle with `index` lifted
    pub(crate) fn begin(&mut self, index: usize, origin: Point) {
        self.mode = InteractionMode::Hover;
        self.pressed = Some(index);
        self.dragged = None;
        self.gesture_origin = origin;
    }

    /// Move the hover lift to `index`
    pub(crate) fn hover(&mut self, index: usize) -> bool {
        if self.mode != InteractionMode::Hover || self.pressed == Some(index) {
            return false;
        }
        self.pressed = Some(index);
        true
    }

    /// Pull the pressed card out of the strip
    ///
    /// Returns the dragged index, or `None` if not hovering.
    pub(crate) fn start_drag(&mut self, at: Point) -> Option<usize> {
        if self.mode != InteractionMode::Hover {
            return None;
        }
        self.mode = InteractionMode::Dragging;
        self.dragged = self.pressed.take();
        self.gesture_origin = at;
        self.drag_offset.set_immediate(Vec2::ZERO);
        self.dragged
    }

    /// Follow the pointer while dragging
    pub(crate) fn drag_to(&mut self, at: Point) {
        if self.mode == InteractionMode::Dragging {
            self.drag_offset.set_immediate(at - self.gesture_origin);
        }
    }

    /// End the lifecycle; the drag offset springs back to zero
    pub(crate) fn finish(&mut self) {
        self.mode = InteractionMode::Idle;
        self.pressed = None;
        self.dragged = None;
        self.drag_offset.set_target(Vec2::ZERO);
    }

    /// Drop everything without animating
    pub(crate) fn reset(&mut self) {
        self.finish();
        self.drag_offset.set_immediate(Vec2::ZERO);
    }
}

fn raw_index(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardfan_animation::AnimationScheduler;

    #[test]
    fn test_transitions() {
        let scheduler = AnimationScheduler::new();
        let mut state = InteractionState::new(scheduler.handle(), SpringConfig::standard());
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert_eq!(state.pressed_index_raw(), -1);
        assert_eq!(state.dragged_index_raw(), -1);

        state.begin(2, Point::new(85.0, 0.0));
        assert_eq!(state.mode(), InteractionMode::Hover);
        assert!(state.hover(3));
        assert!(!state.hover(3));
        assert_eq!(state.pressed_index(), Some(3));

        assert_eq!(state.start_drag(Point::new(125.0, 15.0)), Some(3));
        assert_eq!(state.pressed_index(), None);
        assert_eq!(state.dragged_index_raw(), 3);

        // Only one drag transition per lifecycle
        assert_eq!(state.start_drag(Point::new(0.0, 0.0)), None);
        assert!(!state.hover(1));
        assert_eq!(state.gesture_origin(), Point::new(125.0, 15.0));

        state.drag_to(Point::new(140.0, 30.0));
        assert_eq!(state.drag_offset(), Vec2::new(15.0, 15.0));

        state.finish();
        assert_eq!(state.mode(), InteractionMode::Idle);
        assert_eq!(state.dragged_index(), None);
        assert!(state.is_drag_offset_animating());
    }

    #[test]
    fn test_drag_to_ignored_when_not_dragging() {
        let scheduler = AnimationScheduler::new();
        let mut state = InteractionState::new(scheduler.handle(), SpringConfig::standard());
        state.begin(0, Point::ZERO);
        state.drag_to(Point::new(50.0, 50.0));
        assert_eq!(state.drag_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_reset_snaps_offset() {
        let scheduler = AnimationScheduler::new();
        let mut state = InteractionState::new(scheduler.handle(), SpringConfig::standard());
        state.begin(1, Point::ZERO);
        state.start_drag(Point::ZERO);
        state.drag_to(Point::new(20.0, 40.0));
        state.reset();
        assert_eq!(state.drag_offset(), Vec2::ZERO);
        assert!(!state.is_drag_offset_animating());
    }
}
