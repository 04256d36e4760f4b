//! cardfan Animation System
//!
//! Spring physics driven by a frame-synchronous scheduler.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Interruptible**: retargeting a running spring keeps its velocity
//! - **Per-axis vectors**: `AnimatedVec2` drives 2D offsets with one spring per axis
//! - **Deterministic ticks**: the host advances time explicitly, which keeps tests exact

pub mod scheduler;
pub mod spring;

pub use scheduler::{AnimatedValue, AnimatedVec2, AnimationScheduler, SchedulerHandle, SpringId};
pub use spring::{Spring, SpringConfig};
