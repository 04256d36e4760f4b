//! Error types for cardfan_selector

use thiserror::Error;

/// Errors raised while configuring a card selector
///
/// Interaction itself never fails: pointer coordinates are clamped and an
/// empty card list simply disables the gesture.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectorError {
    /// Horizontal step between cards is zero, negative or not a number
    #[error("card offset must be a positive number, got {0}")]
    InvalidCardOffset(f32),

    /// Vertical travel needed to start a drag is negative or not a number
    #[error("drag threshold must be zero or positive, got {0}")]
    InvalidDragThreshold(f32),

    /// Card width is not a usable fraction of the viewport
    #[error("card width ratio must be in (0, 1], got {0}")]
    InvalidCardWidthRatio(f32),

    /// Card height/width ratio is zero, negative or not a number
    #[error("card aspect must be a positive number, got {0}")]
    InvalidCardAspect(f32),

    /// Hover lift distance is not a finite number
    #[error("lift distance must be finite, got {0}")]
    InvalidLiftDistance(f32),

    /// Dragged card stacking order is not above the resting cards
    #[error("dragged z-index must be positive, got {0}")]
    InvalidDraggedZIndex(i32),

    /// Spring parameters cannot produce a settling animation
    #[error(
        "{name} spring needs positive stiffness and mass and non-negative damping \
         (stiffness {stiffness}, damping {damping}, mass {mass})"
    )]
    InvalidSpring {
        name: &'static str,
        stiffness: f32,
        damping: f32,
        mass: f32,
    },

    /// Viewport has no area
    #[error("viewport must have a positive size, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Result type for cardfan_selector operations
pub type Result<T> = std::result::Result<T, SelectorError>;
