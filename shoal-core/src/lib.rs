//! Flocking ("boids") simulation core.
//!
//! The host owns the agent collection and calls [`flock::step`] once per
//! frame with the latest [`SimulationConfig`] and [`InteractionState`].
//! The core keeps no state between calls. [`flock::adjust_population`] grows
//! the collection it is handed, and the snapshot update order allocates a
//! per-step force buffer.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod agent;
pub mod behavior;
pub mod config;
pub mod flock;
pub mod interaction;
pub mod vector;

pub use agent::{Agent, Hue};
pub use behavior::Steering;
pub use config::SimulationConfig;
#[cfg(feature = "std")]
pub use flock::Flock;
pub use flock::{adjust_population, step, step_with_order, Bounds, UpdateOrder};
pub use interaction::{InteractionMode, InteractionState};
pub use vector::Vector2D;
