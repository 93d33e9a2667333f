//! Steering behaviours.
//!
//! Every behaviour follows the same pattern: work out a desired velocity,
//! subtract the current velocity and clamp the result to a maximum force.

use crate::agent::Agent;
use crate::config::SimulationConfig;
use crate::interaction::{InteractionMode, InteractionState};
use crate::vector::Vector2D;

/// Below this distance to the seek target, desired speed ramps down linearly.
pub const ARRIVAL_RADIUS: f32 = 100.0;
/// Scatter reacts to the pointer within this multiple of the perception radius.
pub const SCATTER_RADIUS_FACTOR: f32 = 1.5;
pub const SEEK_FORCE_FACTOR: f32 = 2.0;
pub const SCATTER_FORCE_FACTOR: f32 = 3.0;

/// Unweighted flocking forces acting on one agent
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Steering {
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub cohesion: Vector2D,
    pub neighbors: usize,
}

impl Steering {
    pub fn weighted(&self, config: &SimulationConfig) -> Vector2D {
        self.separation * config.separation_weight
            + self.alignment * config.alignment_weight
            + self.cohesion * config.cohesion_weight
    }
}

fn steer(desired: Vector2D, velocity: Vector2D, max_force: f32) -> Vector2D {
    (desired - velocity).limit(max_force)
}

/// Separation, alignment and cohesion from a single pass over `others`.
///
/// `others` must not contain `agent` itself. Agents sharing the exact same
/// position are ignored, as are those at or beyond the perception radius.
pub fn flocking<'a, I>(agent: &Agent, others: I, config: &SimulationConfig) -> Steering
where
    I: Iterator<Item = &'a Agent>,
{
    let mut separation = Vector2D::zero();
    let mut alignment = Vector2D::zero();
    let mut cohesion = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = agent.position.distance(&other.position);
        if distance > 0.0 && distance < config.perception_radius {
            // Inverse-distance weighting: closer neighbours push harder.
            separation += (agent.position - other.position).normalize() / distance;
            alignment += other.velocity;
            cohesion += other.position;
            count += 1;
        }
    }

    if count == 0 {
        return Steering::default();
    }

    let n = count as f32;

    separation = separation / n;
    if separation.magnitude() > 0.0 {
        separation = steer(
            separation.set_magnitude(config.max_speed),
            agent.velocity,
            config.max_force,
        );
    }

    let alignment = steer(
        (alignment / n).set_magnitude(config.max_speed),
        agent.velocity,
        config.max_force,
    );

    let centroid = cohesion / n;
    let cohesion = steer(
        (centroid - agent.position).set_magnitude(config.max_speed),
        agent.velocity,
        config.max_force,
    );

    Steering {
        separation,
        alignment,
        cohesion,
        neighbors: count,
    }
}

/// Desired speed when approaching a target `distance` away.
pub fn arrival_speed(distance: f32, max_speed: f32) -> f32 {
    if distance < ARRIVAL_RADIUS {
        distance / ARRIVAL_RADIUS * max_speed
    } else {
        max_speed
    }
}

/// Seek with arrival braking, already scaled by the target weight.
pub fn seek(agent: &Agent, target: Vector2D, config: &SimulationConfig) -> Vector2D {
    let to_target = target - agent.position;
    let desired = to_target.set_magnitude(arrival_speed(to_target.magnitude(), config.max_speed));
    steer(desired, agent.velocity, config.max_force * SEEK_FORCE_FACTOR) * config.target_weight
}

/// Flee from the pointer when it is close enough. Not weighted.
pub fn scatter(agent: &Agent, pointer: Vector2D, config: &SimulationConfig) -> Vector2D {
    let away = agent.position - pointer;
    if away.magnitude() < config.perception_radius * SCATTER_RADIUS_FACTOR {
        steer(
            away.set_magnitude(config.max_speed),
            agent.velocity,
            config.max_force * SCATTER_FORCE_FACTOR,
        )
    } else {
        Vector2D::zero()
    }
}

/// The pointer-driven force for the current interaction mode.
pub fn interactive(
    agent: &Agent,
    config: &SimulationConfig,
    interaction: &InteractionState,
) -> Vector2D {
    match interaction.mode {
        InteractionMode::Seek => match interaction.target {
            Some(target) => seek(agent, target, config),
            None => Vector2D::zero(),
        },
        InteractionMode::Scatter => scatter(agent, interaction.pointer, config),
        InteractionMode::None => Vector2D::zero(),
    }
}
