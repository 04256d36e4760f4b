//! Single-pointer pan recognizer
//!
//! Turns raw mouse and touch events into a pan lifecycle:
//!
//! ```text
//! pointer down (accepted) -> Begin
//! pointer move            -> Update (repeated)
//! pointer up              -> Finalize { cancelled: false }
//! cancel / leave window   -> Finalize { cancelled: true }
//! ```
//!
//! Only one pointer drives a pan: the left mouse button or the first touch that
//! lands in an accepted area. Every other touch is tracked but ignored until it
//! lifts.

use cardfan_core::{Point, Vec2};
use cardfan_platform::{InputEvent, MouseButton, MouseEvent, TouchEvent};
use smallvec::SmallVec;

/// Position and travel of the driving pointer, in window coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSample {
    /// Current pointer position
    pub position: Point,
    /// Displacement since the pan began
    pub translation: Vec2,
}

/// Pan lifecycle events
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    /// The driving pointer went down
    Begin(PanSample),
    /// The driving pointer moved
    Update(PanSample),
    /// The pan ended; delivered for both release and cancellation
    Finalize {
        /// Last known sample (absent when the platform cancelled without a position)
        sample: Option<PanSample>,
        cancelled: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pointer {
    Mouse,
    Touch(u64),
}

#[derive(Clone, Copy, Debug)]
struct ActivePan {
    pointer: Pointer,
    start: Point,
    last: Point,
}

impl ActivePan {
    fn sample(&self, position: Point) -> PanSample {
        PanSample {
            position,
            translation: position - self.start,
        }
    }
}

/// Pan recognizer for a single driving pointer
#[derive(Debug, Default)]
pub struct PanGesture {
    active: Option<ActivePan>,
    /// Touches currently down, driving or not
    touches: SmallVec<[u64; 4]>,
}

impl PanGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pan is in progress
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Number of touches currently down
    pub fn active_touch_count(&self) -> usize {
        self.touches.len()
    }

    /// Process one input event
    ///
    /// `accepts` decides whether a pointer-down at the given window position may
    /// begin a pan.
    pub fn process<F>(&mut self, event: &InputEvent, accepts: F) -> Option<PanEvent>
    where
        F: Fn(Point) -> bool,
    {
        match event {
            InputEvent::Mouse(mouse) => self.process_mouse(mouse, accepts),
            InputEvent::Touch(touch) => self.process_touch(touch, accepts),
        }
    }

    /// Abort the current pan, if any
    pub fn cancel(&mut self) -> Option<PanEvent> {
        self.touches.clear();
        self.active.take().map(|pan| PanEvent::Finalize {
            sample: Some(pan.sample(pan.last)),
            cancelled: true,
        })
    }

    fn process_mouse<F>(&mut self, event: &MouseEvent, accepts: F) -> Option<PanEvent>
    where
        F: Fn(Point) -> bool,
    {
        match *event {
            MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                x,
                y,
            } => {
                if self.active.is_some() {
                    tracing::warn!("mouse press ignored: a pan is already active");
                    return None;
                }
                self.begin(Pointer::Mouse, Point::new(x, y), accepts)
            }
            MouseEvent::Moved { x, y } => self.update(Pointer::Mouse, Point::new(x, y)),
            MouseEvent::ButtonReleased {
                button: MouseButton::Left,
                x,
                y,
            } => self.finish(Pointer::Mouse, Some(Point::new(x, y)), false),
            MouseEvent::Left => self.finish(Pointer::Mouse, None, true),
            _ => None,
        }
    }

    fn process_touch<F>(&mut self, event: &TouchEvent, accepts: F) -> Option<PanEvent>
    where
        F: Fn(Point) -> bool,
    {
        match *event {
            TouchEvent::Started { id, x, y, .. } => {
                if !self.touches.contains(&id) {
                    self.touches.push(id);
                }
                if self.active.is_some() {
                    tracing::warn!(touch = id, "extra touch ignored: a pan is already active");
                    return None;
                }
                self.begin(Pointer::Touch(id), Point::new(x, y), accepts)
            }
            TouchEvent::Moved { id, x, y, .. } => self.update(Pointer::Touch(id), Point::new(x, y)),
            TouchEvent::Ended { id, x, y } => {
                self.touches.retain(|t| *t != id);
                self.finish(Pointer::Touch(id), Some(Point::new(x, y)), false)
            }
            TouchEvent::Cancelled { id } => {
                self.touches.retain(|t| *t != id);
                self.finish(Pointer::Touch(id), None, true)
            }
        }
    }

    fn begin<F>(&mut self, pointer: Pointer, position: Point, accepts: F) -> Option<PanEvent>
    where
        F: Fn(Point) -> bool,
    {
        if !accepts(position) {
            return None;
        }
        let pan = ActivePan {
            pointer,
            start: position,
            last: position,
        };
        self.active = Some(pan);
        Some(PanEvent::Begin(pan.sample(position)))
    }

    fn update(&mut self, pointer: Pointer, position: Point) -> Option<PanEvent> {
        let pan = self.active.as_mut().filter(|pan| pan.pointer == pointer)?;
        pan.last = position;
        Some(PanEvent::Update(pan.sample(position)))
    }

    fn finish(
        &mut self,
        pointer: Pointer,
        position: Option<Point>,
        cancelled: bool,
    ) -> Option<PanEvent> {
        match self.active {
            Some(pan) if pan.pointer == pointer => {
                self.active = None;
                Some(PanEvent::Finalize {
                    sample: Some(pan.sample(position.unwrap_or(pan.last))),
                    cancelled,
                })
            }
            _ => None,
        }
    }
}
