//! Headless host for the flocking simulation: loads a scenario, drives the
//! flock frame by frame and streams snapshots for a renderer.

pub mod runner;
pub mod scenario;

pub use runner::Runner;
pub use scenario::{parse_point, Order, Scenario, ScheduledEvent};
