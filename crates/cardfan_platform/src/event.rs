//! Event sources feeding a card strip
//!
//! An [`EventLoop`] turns a host's event stream into [`Event`]s: pointer input,
//! frame ticks and viewport changes. The CLI's trace replayer is one such loop.

use crate::error::PlatformError;
use crate::input::InputEvent;
use crate::window::Window;

/// Drives a handler with events until the source is exhausted or the handler exits
pub trait EventLoop {
    type Window: Window;

    /// Blocks until every event has been handled or the handler returns
    /// [`ControlFlow::Exit`]
    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    #[default]
    Continue,
    /// Stop before the next event
    Exit,
}

/// One step of host input
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Window(WindowEvent),
    /// Pointer input in window coordinates
    Input(InputEvent),
    /// Advance springs and redraw
    Frame {
        /// Seconds
        dt: f32,
    },
}

/// Changes to the surface hosting the strip
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// Viewport changed; a running drag is abandoned
    Resized {
        width: f32,
        height: f32,
    },
    /// Host is shutting down
    CloseRequested,
    /// Losing focus cancels any gesture in progress
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_flow_default() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }
}
