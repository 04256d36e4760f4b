//! cardfan Core
//!
//! Foundational primitives shared by the cardfan crates:
//!
//! - **Geometry**: points, vectors, sizes, rectangles and affine transforms
//! - **Shared State**: frame-synchronous `Rc` state handed from a container to its leaves
//! - **Draw Context**: a backend-agnostic drawing API with a recording implementation
//!
//! # Example
//!
//! ```rust
//! use cardfan_core::{Point, Shared, Vec2};
//!
//! let origin = Shared::new(Point::new(85.0, 0.0));
//! let leaf_view = origin.clone();
//!
//! origin.set(Point::new(85.0, 15.0));
//! assert_eq!(leaf_view.get() - Point::new(85.0, 0.0), Vec2::new(0.0, 15.0));
//! ```

pub mod draw;
pub mod layer;
pub mod shared;

pub use draw::{
    DrawCommand, DrawContext, FontWeight, RecordingContext, TextAlign, TextBaseline, TextStyle,
    Transform,
};
pub use layer::{Affine2D, Brush, Color, CornerRadius, Point, Rect, Shadow, Size, Vec2};
pub use shared::Shared;
