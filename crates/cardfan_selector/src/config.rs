//! Selector configuration
//!
//! All values are in logical pixels unless stated otherwise. Every field has a
//! default, so a `cardfan.toml` only needs to list what it changes:
//!
//! ```toml
//! card_offset = 48.0
//!
//! [lift_spring]
//! damping = 20.0
//! ```

use cardfan_animation::SpringConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectorError};

/// Tunables for [`CardSelector`](crate::CardSelector)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Card width as a fraction of the viewport width
    pub card_width_ratio: f32,
    /// Card height divided by card width
    pub card_aspect: f32,
    /// Horizontal step between consecutive cards (also the hover hit width)
    pub card_offset: f32,
    /// Vertical travel that turns a hover sweep into a drag (strictly greater than)
    pub drag_threshold: f32,
    /// How far the hovered card rises
    pub lift_distance: f32,
    /// Stacking order of the dragged card; raised to the card count when the
    /// strip is longer
    pub dragged_z_index: i32,
    /// Spring driving the hover lift
    pub lift_spring: SpringConfig,
    /// Spring returning the drag offset to rest after release
    pub release_spring: SpringConfig,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card_width_ratio: 0.2,
            card_aspect: 1.1,
            card_offset: 40.0,
            drag_threshold: 10.0,
            lift_distance: 30.0,
            dragged_z_index: 1000,
            lift_spring: SpringConfig::lift(),
            release_spring: SpringConfig::standard(),
        }
    }
}

impl SelectorConfig {
    /// Set the horizontal step between cards
    pub fn card_offset(mut self, offset: f32) -> Self {
        self.card_offset = offset;
        self
    }

    /// Set the vertical drag threshold
    pub fn drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Set the hover lift distance
    pub fn lift_distance(mut self, distance: f32) -> Self {
        self.lift_distance = distance;
        self
    }

    /// Set the card width ratio
    pub fn card_width_ratio(mut self, ratio: f32) -> Self {
        self.card_width_ratio = ratio;
        self
    }

    /// Set the hover lift spring
    pub fn lift_spring(mut self, spring: SpringConfig) -> Self {
        self.lift_spring = spring;
        self
    }

    /// Set the release spring
    pub fn release_spring(mut self, spring: SpringConfig) -> Self {
        self.release_spring = spring;
        self
    }

    /// Check every value, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if !(self.card_offset.is_finite() && self.card_offset > 0.0) {
            return Err(SelectorError::InvalidCardOffset(self.card_offset));
        }
        if !(self.drag_threshold.is_finite() && self.drag_threshold >= 0.0) {
            return Err(SelectorError::InvalidDragThreshold(self.drag_threshold));
        }
        if !(self.card_width_ratio > 0.0 && self.card_width_ratio <= 1.0) {
            return Err(SelectorError::InvalidCardWidthRatio(self.card_width_ratio));
        }
        if !(self.card_aspect.is_finite() && self.card_aspect > 0.0) {
            return Err(SelectorError::InvalidCardAspect(self.card_aspect));
        }
        if !self.lift_distance.is_finite() {
            return Err(SelectorError::InvalidLiftDistance(self.lift_distance));
        }
        if self.dragged_z_index <= 0 {
            return Err(SelectorError::InvalidDraggedZIndex(self.dragged_z_index));
        }
        check_spring("lift", &self.lift_spring)?;
        check_spring("release", &self.release_spring)?;
        Ok(())
    }
}

fn check_spring(name: &'static str, spring: &SpringConfig) -> Result<()> {
    if spring.is_valid() {
        Ok(())
    } else {
        Err(SelectorError::InvalidSpring {
            name,
            stiffness: spring.stiffness,
            damping: spring.damping,
            mass: spring.mass,
        })
    }
}
