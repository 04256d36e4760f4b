//! Spring physics animation
//!
//! RK4-integrated spring physics for smooth, natural animations.
//! Two presets cover the selector: a bouncy release spring and a softer lift.

use serde::{Deserialize, Serialize};

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    /// Create a new spring configuration
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// The platform's default spring: soft and a little bouncy
    ///
    /// Used when a value is sent "back home" without any tuning, such as a
    /// released drag offset.
    pub fn standard() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }

    /// A lift spring for hover highlights (slower, barely overshoots)
    pub fn lift() -> Self {
        Self {
            stiffness: 100.0,
            damping: 15.0,
            mass: 1.0,
        }
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    /// Whether the parameters describe a physically meaningful spring
    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.stiffness > 0.0
            && self.mass.is_finite()
            && self.mass > 0.0
            && self.damping.is_finite()
            && self.damping >= 0.0
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// A spring-based animator
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retarget the spring; the current velocity is kept
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Check if the spring has settled (within epsilon of target with minimal velocity)
    pub fn is_settled(&self) -> bool {
        // Half a pixel off and under 5px/s is imperceptible
        const EPSILON: f32 = 0.5;
        const VELOCITY_EPSILON: f32 = 5.0;

        (self.value - self.target).abs() < EPSILON && self.velocity.abs() < VELOCITY_EPSILON
    }

    /// Step the spring simulation using RK4 integration
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;

        // Land exactly on the target once motion becomes imperceptible
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::standard(), 0.0);
        spring.set_target(100.0);

        // Simulate for 3 seconds at 60fps
        for _ in 0..180 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 100.0);
    }

    #[test]
    fn test_lift_spring_is_not_instant() {
        let mut spring = Spring::new(SpringConfig::lift(), 0.0);
        spring.set_target(-30.0);

        spring.step(1.0 / 60.0);
        let after_one_frame = spring.value();
        assert!(after_one_frame < 0.0);
        assert!(after_one_frame > -30.0);

        for _ in 0..240 {
            spring.step(1.0 / 60.0);
        }
        assert_eq!(spring.value(), -30.0);
    }

    #[test]
    fn test_spring_inherits_velocity() {
        let mut spring = Spring::new(SpringConfig::standard(), 0.0);
        spring.set_target(100.0);

        // Let it get some velocity
        for _ in 0..10 {
            spring.step(1.0 / 60.0);
        }

        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        // Change target mid-flight - velocity should continue
        spring.set_target(50.0);
        assert_eq!(spring.velocity(), velocity);
    }

    #[test]
    fn test_spring_presets() {
        assert!(SpringConfig::standard().is_underdamped());
        assert!(SpringConfig::lift().is_underdamped());
        assert!(SpringConfig::standard().damping < SpringConfig::lift().damping);
        assert_eq!(SpringConfig::default(), SpringConfig::standard());
    }

    #[test]
    fn test_spring_config_validity() {
        assert!(SpringConfig::lift().is_valid());
        assert!(!SpringConfig::new(0.0, 10.0, 1.0).is_valid());
        assert!(!SpringConfig::new(100.0, 10.0, 0.0).is_valid());
        assert!(!SpringConfig::new(100.0, -1.0, 1.0).is_valid());
        assert!(!SpringConfig::new(f32::NAN, 10.0, 1.0).is_valid());
    }

    #[test]
    fn test_spring_rk4_stability() {
        // Large steps that would blow up an explicit Euler integrator
        let mut spring = Spring::new(SpringConfig::standard(), 0.0);
        spring.set_target(1000.0);

        for _ in 0..100 {
            spring.step(0.1);
            assert!(spring.value() < 2000.0);
            assert!(spring.value() > -500.0);
        }
    }

    #[test]
    fn test_spring_config_from_partial_toml() {
        let config: SpringConfig = toml::from_str("damping = 15.0").unwrap();
        assert_eq!(config, SpringConfig::lift());
    }
}
