//! Animation scheduler
//!
//! Owns every live spring and advances them once per frame. The scheduler is
//! frame-synchronous: the host calls [`AnimationScheduler::tick`] with the frame
//! delta from its render loop, and widgets read interpolated values during the same frame.
//!
//! Springs are registered implicitly through wrapper types:
//! - [`AnimatedValue`] - a single spring-driven scalar
//! - [`AnimatedVec2`] - one spring per axis for 2D offsets
//!
//! Setting a new target on a running animation retargets the existing spring,
//! keeping its velocity. Nothing is queued.

use crate::spring::{Spring, SpringConfig};
use cardfan_core::Vec2;
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    /// Handle to a registered spring animation
    pub struct SpringId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    springs: SlotMap<SpringId, Spring>,
    frame_count: u64,
}

impl SchedulerInner {
    fn step_all(&mut self, dt: f32) -> bool {
        if dt > 0.0 && dt.is_finite() {
            for (_, spring) in self.springs.iter_mut() {
                spring.step(dt);
            }
        }
        self.frame_count += 1;

        // Springs stay registered after settling; only their wrappers remove them
        self.springs.iter().any(|(_, s)| !s.is_settled())
    }
}

/// The animation scheduler that ticks all active animations
///
/// Held by the host (the app or the CLI replay loop) and shared with widgets
/// through [`SchedulerHandle`]. Dropping the scheduler turns every handle into a
/// no-op.
pub struct AnimationScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                springs: SlotMap::with_key(),
                frame_count: 0,
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Advance all springs by `dt` seconds
    ///
    /// Returns true if any animation is still moving (needs another tick).
    pub fn tick(&self, dt: f32) -> bool {
        let mut inner = self.inner.borrow_mut();
        let active = inner.step_all(dt);
        tracing::trace!(
            frame = inner.frame_count,
            dt,
            active,
            springs = inner.springs.len(),
            "animation tick"
        );
        active
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        let inner = self.inner.borrow();
        inner.springs.iter().any(|(_, s)| !s.is_settled())
    }

    /// Get the number of registered springs
    pub fn spring_count(&self) -> usize {
        self.inner.borrow().springs.len()
    }

    /// Number of ticks processed so far
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame_count
    }

    // =========================================================================
    // Direct Spring Access (for advanced use cases)
    // =========================================================================

    pub fn add_spring(&self, spring: Spring) -> SpringId {
        self.inner.borrow_mut().springs.insert(spring)
    }

    pub fn get_spring(&self, id: SpringId) -> Option<Spring> {
        self.inner.borrow().springs.get(id).copied()
    }

    pub fn get_spring_value(&self, id: SpringId) -> Option<f32> {
        self.inner.borrow().springs.get(id).map(|s| s.value())
    }

    pub fn set_spring_target(&self, id: SpringId, target: f32) {
        if let Some(spring) = self.inner.borrow_mut().springs.get_mut(id) {
            spring.set_target(target);
        }
    }

    pub fn remove_spring(&self, id: SpringId) -> Option<Spring> {
        self.inner.borrow_mut().springs.remove(id)
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// A weak handle to the scheduler
///
/// Every operation is a no-op (or returns `None`) once the scheduler is gone.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a spring, returning its id
    pub fn register_spring(&self, spring: Spring) -> Option<SpringId> {
        let inner = self.inner.upgrade()?;
        let id = inner.borrow_mut().springs.insert(spring);
        Some(id)
    }

    /// Retarget a spring
    pub fn set_spring_target(&self, id: SpringId, target: f32) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(spring) = inner.borrow_mut().springs.get_mut(id) {
                spring.set_target(target);
            }
        }
    }

    /// Get a spring's current value
    pub fn get_spring_value(&self, id: SpringId) -> Option<f32> {
        let inner = self.inner.upgrade()?;
        let value = inner.borrow().springs.get(id).map(|s| s.value());
        value
    }

    /// Get a spring's current velocity
    pub fn get_spring_velocity(&self, id: SpringId) -> Option<f32> {
        let inner = self.inner.upgrade()?;
        let velocity = inner.borrow().springs.get(id).map(|s| s.velocity());
        velocity
    }

    /// Check whether a spring has settled (missing springs count as settled)
    pub fn is_spring_settled(&self, id: SpringId) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return true;
        };
        let settled = inner
            .borrow()
            .springs
            .get(id)
            .map(|s| s.is_settled())
            .unwrap_or(true);
        settled
    }

    /// Remove a spring
    pub fn remove_spring(&self, id: SpringId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().springs.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Value
// ============================================================================

/// A spring-driven value that registers itself with the scheduler
///
/// # Example
///
/// ```rust
/// use cardfan_animation::{AnimatedValue, AnimationScheduler, SpringConfig};
///
/// let scheduler = AnimationScheduler::new();
/// let mut lift = AnimatedValue::new(scheduler.handle(), 0.0, SpringConfig::lift());
///
/// lift.set_target(-30.0);
/// scheduler.tick(1.0 / 60.0);
///
/// let current = lift.get();
/// assert!(current < 0.0 && current > -30.0);
/// ```
pub struct AnimatedValue {
    handle: SchedulerHandle,
    spring_id: Option<SpringId>,
    config: SpringConfig,
    /// The value while no spring is registered
    current: f32,
    /// The target value we're animating towards
    target: f32,
}

impl AnimatedValue {
    /// Create a new animated value with the given initial value
    pub fn new(handle: SchedulerHandle, initial: f32, config: SpringConfig) -> Self {
        // Registration is deferred until the first target change
        Self {
            handle,
            spring_id: None,
            config,
            current: initial,
            target: initial,
        }
    }

    /// Create with the default spring config
    pub fn with_default(handle: SchedulerHandle, initial: f32) -> Self {
        Self::new(handle, initial, SpringConfig::default())
    }

    /// Set the target value - starts or retargets the animation
    pub fn set_target(&mut self, target: f32) {
        self.target = target;

        if let Some(id) = self.spring_id {
            self.handle.set_spring_target(id, target);
            return;
        }

        if (target - self.current).abs() > 0.001 {
            let mut spring = Spring::new(self.config, self.current);
            spring.set_target(target);
            match self.handle.register_spring(spring) {
                Some(id) => self.spring_id = Some(id),
                None => {
                    // No scheduler to drive the spring
                    tracing::debug!("AnimatedValue: scheduler gone, snapping to {}", target);
                    self.current = target;
                }
            }
        }
    }

    /// Get the current animated value
    pub fn get(&self) -> f32 {
        match self.spring_id {
            Some(id) => self.handle.get_spring_value(id).unwrap_or(self.target),
            None => self.current,
        }
    }

    /// Current velocity (zero when not animating)
    pub fn velocity(&self) -> f32 {
        self.spring_id
            .and_then(|id| self.handle.get_spring_velocity(id))
            .unwrap_or(0.0)
    }

    /// Set value immediately without animation, cancelling any running spring
    pub fn set_immediate(&mut self, value: f32) {
        if let Some(id) = self.spring_id.take() {
            self.handle.remove_spring(id);
        }
        self.current = value;
        self.target = value;
    }

    /// Check if currently animating
    ///
    /// Returns `true` only while the spring is moving toward its target.
    pub fn is_animating(&self) -> bool {
        match self.spring_id {
            Some(id) => !self.handle.is_spring_settled(id),
            None => false,
        }
    }

    /// Get the current target value
    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> SpringConfig {
        self.config
    }
}

impl Drop for AnimatedValue {
    fn drop(&mut self) {
        if let Some(id) = self.spring_id {
            self.handle.remove_spring(id);
        }
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimatedValue")
            .field("value", &self.get())
            .field("target", &self.target)
            .field("animating", &self.is_animating())
            .finish()
    }
}

// ============================================================================
// Animated Vec2
// ============================================================================

/// A 2D vector animated by one spring per axis
///
/// Both axes share the same [`SpringConfig`] and are retargeted together.
#[derive(Debug)]
pub struct AnimatedVec2 {
    x: AnimatedValue,
    y: AnimatedValue,
}

impl AnimatedVec2 {
    pub fn new(handle: SchedulerHandle, initial: Vec2, config: SpringConfig) -> Self {
        Self {
            x: AnimatedValue::new(handle.clone(), initial.x, config),
            y: AnimatedValue::new(handle, initial.y, config),
        }
    }

    /// Animate both axes toward `target`
    pub fn set_target(&mut self, target: Vec2) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    /// Set both axes immediately, cancelling any running animation
    pub fn set_immediate(&mut self, value: Vec2) {
        self.x.set_immediate(value.x);
        self.y.set_immediate(value.y);
    }

    pub fn get(&self) -> Vec2 {
        Vec2::new(self.x.get(), self.y.get())
    }

    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x.target(), self.y.target())
    }

    pub fn is_animating(&self) -> bool {
        self.x.is_animating() || self.y.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_scheduler_tick() {
        let scheduler = AnimationScheduler::new();

        let spring = Spring::new(SpringConfig::standard(), 0.0);
        let id = scheduler.add_spring(spring);
        scheduler.set_spring_target(id, 100.0);

        assert!(scheduler.tick(FRAME));

        let value = scheduler.get_spring_value(id).unwrap();
        assert!(value > 0.0);
        assert_eq!(scheduler.frame_count(), 1);
    }

    #[test]
    fn test_tick_ignores_non_positive_dt() {
        let scheduler = AnimationScheduler::new();
        let id = scheduler.add_spring(Spring::new(SpringConfig::standard(), 0.0));
        scheduler.set_spring_target(id, 100.0);

        scheduler.tick(0.0);
        scheduler.tick(-1.0);
        scheduler.tick(f32::NAN);
        assert_eq!(scheduler.get_spring_value(id), Some(0.0));
    }

    #[test]
    fn test_animated_value() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedValue::new(scheduler.handle(), 0.0, SpringConfig::standard());

        assert_eq!(value.get(), 0.0);
        assert!(!value.is_animating());
        assert_eq!(scheduler.spring_count(), 0);

        value.set_target(100.0);
        assert!(value.is_animating());
        assert_eq!(scheduler.spring_count(), 1);

        scheduler.tick(FRAME);
        assert!(value.get() > 0.0);

        for _ in 0..240 {
            scheduler.tick(FRAME);
        }
        assert!(!value.is_animating());
        assert_eq!(value.get(), 100.0);
    }

    #[test]
    fn test_animated_value_retarget_keeps_velocity() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedValue::new(scheduler.handle(), 0.0, SpringConfig::standard());

        value.set_target(100.0);
        for _ in 0..5 {
            scheduler.tick(FRAME);
        }
        let velocity = value.velocity();
        assert!(velocity > 0.0);

        value.set_target(0.0);
        assert_eq!(value.velocity(), velocity);
        assert_eq!(scheduler.spring_count(), 1);

        // Still travelling forward on the next frame before turning around
        let before = value.get();
        scheduler.tick(FRAME);
        assert!(value.get() > before);
    }

    #[test]
    fn test_set_immediate_cancels_spring() {
        let scheduler = AnimationScheduler::new();
        let mut value = AnimatedValue::new(scheduler.handle(), 0.0, SpringConfig::standard());
        value.set_target(50.0);
        scheduler.tick(FRAME);

        value.set_immediate(10.0);
        assert_eq!(scheduler.spring_count(), 0);
        assert_eq!(value.get(), 10.0);
        assert_eq!(value.target(), 10.0);
        assert!(!value.is_animating());
    }

    #[test]
    fn test_drop_removes_spring() {
        let scheduler = AnimationScheduler::new();
        {
            let mut value = AnimatedValue::with_default(scheduler.handle(), 0.0);
            value.set_target(1.0);
            assert_eq!(scheduler.spring_count(), 1);
        }
        assert_eq!(scheduler.spring_count(), 0);
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = AnimationScheduler::new();
            scheduler.handle()
        };

        assert!(!handle.is_alive());
        assert!(handle
            .register_spring(Spring::new(SpringConfig::standard(), 0.0))
            .is_none());

        // Without a scheduler the value jumps straight to its target
        let mut value = AnimatedValue::with_default(handle, 0.0);
        value.set_target(5.0);
        assert_eq!(value.get(), 5.0);
        assert!(!value.is_animating());
    }

    #[test]
    fn test_animated_vec2_returns_home() {
        let scheduler = AnimationScheduler::new();
        let mut offset =
            AnimatedVec2::new(scheduler.handle(), Vec2::ZERO, SpringConfig::standard());

        offset.set_immediate(Vec2::new(15.0, 15.0));
        assert_eq!(offset.get(), Vec2::new(15.0, 15.0));
        assert!(!offset.is_animating());

        offset.set_target(Vec2::ZERO);
        assert!(offset.is_animating());
        scheduler.tick(FRAME);
        let mid = offset.get();
        assert!(mid.x < 15.0 && mid.y < 15.0);

        let mut frames = 0;
        while scheduler.tick(FRAME) {
            frames += 1;
            assert!(frames < 600, "spring never settled");
        }
        assert_eq!(offset.get(), Vec2::ZERO);
    }
}
