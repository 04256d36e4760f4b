//! cardfan Selector
//!
//! A horizontal strip of overlapping cards. Sweeping the pointer sideways lifts
//! the card underneath it; pulling vertically past a small threshold drags that
//! card out of the strip. Releasing springs everything back to rest.
//!
//! # Structure
//!
//! - [`CardSelector`] - container: owns the gesture and the shared state
//! - [`Card`] - leaf: derives its transform from the shared state
//! - [`PanGesture`] - single-pointer pan recognizer over platform input
//! - [`InteractionState`] - pressed/dragged indices and the drag offset
//! - [`SelectorLayout`] - card geometry and coordinate conversion
//!
//! # Example
//!
//! ```rust
//! use cardfan_core::{Point, RecordingContext, Size};
//! use cardfan_selector::prelude::*;
//!
//! let cards = vec![CardData::new(1, "A"), CardData::new(2, "B")];
//! let mut selector =
//!     CardSelector::new(cards, SelectorConfig::default(), Size::new(400.0, 800.0)).unwrap();
//!
//! selector.pan_begin(Point::new(45.0, 0.0));
//! while selector.frame(1.0 / 60.0) {}
//!
//! let mut ctx = RecordingContext::new(Size::new(400.0, 800.0));
//! selector.render(&mut ctx);
//! assert_eq!(selector.transforms()[1].translate.y, -30.0);
//! ```

pub mod card;
pub mod config;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod render;
pub mod selector;
pub mod state;


pub use card::{Card, CardData, CardTransform};
pub use config::SelectorConfig;
pub use error::{Result, SelectorError};
pub use gesture::{PanEvent, PanGesture, PanSample};
pub use layout::{index_at, SelectorLayout};
pub use render::{draw_card, draw_cards, CardFrame, CardStyle};
pub use selector::CardSelector;
pub use state::{InteractionMode, InteractionState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::card::{CardData, CardTransform};
    pub use crate::config::SelectorConfig;
    pub use crate::error::SelectorError;
    pub use crate::render::{CardFrame, CardStyle};
    pub use crate::selector::CardSelector;
    pub use crate::state::InteractionMode;
}
