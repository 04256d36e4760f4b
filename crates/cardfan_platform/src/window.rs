//! Host surface for a card strip
//!
//! The selector never owns a window. Hosts hand it a [`Window`] so cursor
//! changes and redraw requests reach whatever is on screen, or the replay
//! recorder when running headless.

/// Initial surface size in logical pixels; the default is a portrait
/// phone-sized strip host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 800,
        }
    }
}

/// What the selector's host exposes back to it
pub trait Window {
    /// Current viewport, in the same units as pointer coordinates
    fn logical_size(&self) -> (f32, f32);

    /// Physical pixels per logical pixel
    fn scale_factor(&self) -> f64;

    /// Show `cursor` over the strip
    fn set_cursor(&self, cursor: Cursor);

    /// Ask for another frame after a state change
    fn request_redraw(&self);
}

/// Cursor shown for each interaction mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Idle
    #[default]
    Default,
    /// Hovering over a card
    Pointer,
    /// Dragging a card out of the strip
    Grabbing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_portrait() {
        let config = WindowConfig::default();
        assert!(config.height > config.width);
        assert_eq!((config.width, config.height), (400, 800));
    }
}
