//! cardfan Platform Abstraction Layer
//!
//! Platform-agnostic traits and types for pointer input, frame ticks and
//! windows.
//!
//! # Architecture
//!
//! - [`EventLoop`] - delivers [`Event`]s to a handler until exit
//! - [`Window`] - logical size, cursor and redraw requests
//!
//! A GUI backend implements both on top of its windowing system. The `cardfan`
//! CLI implements them headlessly to replay recorded pointer traces.
//!
//! # Example
//!
//! ```ignore
//! use cardfan_platform::*;
//!
//! event_loop.run(|event, window| {
//!     match event {
//!         Event::Frame { dt } => {
//!             // Advance animations and render
//!         }
//!         Event::Window(WindowEvent::CloseRequested) => {
//!             return ControlFlow::Exit;
//!         }
//!         _ => {}
//!     }
//!     ControlFlow::Continue
//! })
//! ```

mod error;
mod event;
mod input;
mod window;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, EventLoop, WindowEvent};
pub use input::{InputEvent, MouseButton, MouseEvent, TouchEvent};
pub use window::{Cursor, Window, WindowConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, EventLoop, WindowEvent};
    pub use crate::input::{InputEvent, MouseButton, MouseEvent, TouchEvent};
    pub use crate::window::{Cursor, Window, WindowConfig};
}
