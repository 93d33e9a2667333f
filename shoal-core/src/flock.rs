#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::cmp::Ordering;

use log::debug;
use rand::Rng;

use crate::agent::Agent;
use crate::behavior::{self, Steering};
use crate::config::SimulationConfig;
use crate::interaction::InteractionState;
use crate::vector::Vector2D;

/// Agents travel this far past an edge before reappearing on the other side.
pub const WRAP_MARGIN: f32 = 10.0;

/// Viewport dimensions, used both for spawning and edge wrapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Which neighbour state an agent sees during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrder {
    /// Agents are advanced in collection order and later agents see the
    /// already-moved earlier ones.
    #[default]
    Sequential,
    /// Every agent sees the state from before the step.
    Snapshot,
}

pub fn wrap_coordinate(value: f32, dimension: f32) -> f32 {
    if value < -WRAP_MARGIN {
        dimension + WRAP_MARGIN
    } else if value > dimension + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        value
    }
}

pub fn wrap_position(position: Vector2D, bounds: Bounds) -> Vector2D {
    Vector2D::new(
        wrap_coordinate(position.x, bounds.width),
        wrap_coordinate(position.y, bounds.height),
    )
}

/// Flocking forces on `agents[index]` from every other agent in the slice.
pub fn flocking_forces(index: usize, agents: &[Agent], config: &SimulationConfig) -> Steering {
    let others = agents
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(_, other)| other);
    behavior::flocking(&agents[index], others, config)
}

fn total_force(
    index: usize,
    agents: &[Agent],
    config: &SimulationConfig,
    interaction: &InteractionState,
) -> Vector2D {
    flocking_forces(index, agents, config).weighted(config)
        + behavior::interactive(&agents[index], config, interaction)
}

fn advance(agent: &mut Agent, force: Vector2D, max_speed: f32, bounds: Bounds) {
    agent.acceleration = Vector2D::zero();
    agent.apply_force(force);
    agent.update(max_speed);
    agent.wrap_edges(bounds);
}

/// Advance every agent by one unit of time, in collection order.
pub fn step(
    agents: &mut [Agent],
    config: &SimulationConfig,
    interaction: &InteractionState,
    bounds: Bounds,
) {
    step_with_order(agents, config, interaction, bounds, UpdateOrder::Sequential);
}

pub fn step_with_order(
    agents: &mut [Agent],
    config: &SimulationConfig,
    interaction: &InteractionState,
    bounds: Bounds,
    order: UpdateOrder,
) {
    match order {
        UpdateOrder::Sequential => {
            for index in 0..agents.len() {
                let force = total_force(index, agents, config, interaction);
                advance(&mut agents[index], force, config.max_speed, bounds);
            }
        }
        UpdateOrder::Snapshot => {
            let forces: Vec<Vector2D> = (0..agents.len())
                .map(|index| total_force(index, agents, config, interaction))
                .collect();

            for (agent, force) in agents.iter_mut().zip(forces) {
                advance(agent, force, config.max_speed, bounds);
            }
        }
    }
}

/// An id above every live id, or the lowest unused one once that would
/// overflow.
fn fresh_id(agents: &[Agent]) -> u32 {
    match agents.iter().map(|a| a.id).max() {
        None => 0,
        Some(max) => match max.checked_add(1) {
            Some(id) => id,
            None => lowest_unused_id(agents),
        },
    }
}

fn lowest_unused_id(agents: &[Agent]) -> u32 {
    let mut ids: Vec<u32> = agents.iter().map(|a| a.id).collect();
    ids.sort_unstable();
    ids.dedup();

    let mut candidate = 0;
    for id in ids {
        if id != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

/// Grow or shrink `agents` to `target_count`.
///
/// Shrinking truncates from the end. New agents get ids no live agent holds,
/// a random position inside `spawn_bounds` and a random velocity bounded by
/// `max_speed` per axis.
pub fn adjust_population<R: Rng + ?Sized>(
    agents: &mut Vec<Agent>,
    target_count: usize,
    spawn_bounds: Bounds,
    max_speed: f32,
    rng: &mut R,
) {
    match agents.len().cmp(&target_count) {
        Ordering::Less => {
            let missing = target_count - agents.len();
            agents.reserve(missing);
            for _ in 0..missing {
                let id = fresh_id(agents);
                agents.push(Agent::random(id, spawn_bounds, max_speed, rng));
            }
            debug!("Spawned {} agents, population {}", missing, agents.len());
        }
        Ordering::Greater => {
            let removed = agents.len() - target_count;
            agents.truncate(target_count);
            debug!("Removed {} agents, population {}", removed, agents.len());
        }
        Ordering::Equal => {}
    }
}

/// Everything a host loop needs to drive a simulation
///
/// The core functions never hold on to agents between calls; this bundle is
/// owned by the host.
#[cfg(feature = "std")]
pub struct Flock {
    pub agents: Vec<Agent>,
    pub config: SimulationConfig,
    pub interaction: InteractionState,
    pub bounds: Bounds,
    pub order: UpdateOrder,
    rng: rand::rngs::StdRng,
}

#[cfg(feature = "std")]
impl Flock {
    pub fn new(bounds: Bounds, config: SimulationConfig) -> Self {
        Self::with_rng(bounds, config, rand::SeedableRng::from_entropy())
    }

    /// Reproducible flock: same seed, same spawns.
    pub fn with_seed(bounds: Bounds, config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(bounds, config, rand::SeedableRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: Bounds, config: SimulationConfig, rng: rand::rngs::StdRng) -> Self {
        let mut flock = Self {
            agents: Vec::with_capacity(config.agent_count),
            config,
            interaction: InteractionState::default(),
            bounds,
            order: UpdateOrder::default(),
            rng,
        };
        flock.sync_population();
        flock
    }

    /// Match the population to `config.agent_count`.
    pub fn sync_population(&mut self) {
        adjust_population(
            &mut self.agents,
            self.config.agent_count,
            self.bounds,
            self.config.max_speed,
            &mut self.rng,
        );
    }

    pub fn update(&mut self) {
        self.sync_population();
        step_with_order(
            &mut self.agents,
            &self.config,
            &self.interaction,
            self.bounds,
            self.order,
        );
    }

    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Hue;
    use crate::interaction::InteractionMode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn agent(id: u32, x: f32, y: f32, vx: f32, vy: f32) -> Agent {
        Agent::new(id, Vector2D::new(x, y), Vector2D::new(vx, vy), Hue(200.0))
    }

    fn random_agents(count: usize, seed: u64) -> Vec<Agent> {
        let mut agents = Vec::new();
        let mut rng = StdRng::seed_from_u64(seed);
        adjust_population(&mut agents, count, BOUNDS, 4.0, &mut rng);
        agents
    }

    #[test]
    fn test_wrap_coordinate() {
        assert_eq!(wrap_coordinate(-15.0, 800.0), 810.0);
        assert_eq!(wrap_coordinate(815.0, 800.0), -10.0);
        assert_eq!(wrap_coordinate(-10.0, 800.0), -10.0);
        assert_eq!(wrap_coordinate(810.0, 800.0), 810.0);
        assert_eq!(wrap_coordinate(400.0, 800.0), 400.0);
    }

    #[test]
    fn test_wrap_position_axes_are_independent() {
        let wrapped = wrap_position(Vector2D::new(-15.0, 300.0), BOUNDS);
        assert_eq!(wrapped, Vector2D::new(810.0, 300.0));

        let wrapped = wrap_position(Vector2D::new(400.0, 611.0), BOUNDS);
        assert_eq!(wrapped, Vector2D::new(400.0, -10.0));
    }

    #[test]
    fn test_step_wraps_agent() {
        let mut agents = vec![agent(0, -9.0, 300.0, -2.0, 0.0)];
        let interaction = InteractionState::new(InteractionMode::None);

        step(&mut agents, &SimulationConfig::default(), &interaction, BOUNDS);
        assert_eq!(agents[0].position, Vector2D::new(810.0, 300.0));
    }

    #[test]
    fn test_single_agent_has_no_flocking_force() {
        let config = SimulationConfig {
            perception_radius: 10_000.0,
            ..SimulationConfig::default()
        };
        let interaction = InteractionState::new(InteractionMode::None);
        let mut agents = vec![agent(0, 100.0, 100.0, 1.0, 0.5)];

        assert_eq!(flocking_forces(0, &agents, &config), Steering::default());

        step(&mut agents, &config, &interaction, BOUNDS);
        assert_eq!(agents[0].acceleration, Vector2D::zero());
        assert_eq!(agents[0].position, Vector2D::new(101.0, 100.5));
    }

    #[test]
    fn test_separation_on_close_pair() {
        let config = SimulationConfig::default();
        let agents = vec![agent(0, 100.0, 100.0, 0.0, 0.0), agent(1, 101.0, 100.0, 0.0, 0.0)];

        let on_a = flocking_forces(0, &agents, &config).separation;
        let on_b = flocking_forces(1, &agents, &config).separation;
        assert!(on_a.dot(&(agents[0].position - agents[1].position)) > 0.0);
        assert!(on_b.dot(&(agents[1].position - agents[0].position)) > 0.0);
    }

    #[test]
    fn test_speed_stays_bounded() {
        let config = SimulationConfig::default();
        let mut interaction = InteractionState::new(InteractionMode::Seek);
        interaction.press(Vector2D::new(400.0, 300.0));
        let mut agents = random_agents(120, 7);

        for frame in 0..60 {
            if frame == 30 {
                interaction.set_mode(InteractionMode::Scatter);
                interaction.pointer_moved(Vector2D::new(400.0, 300.0), false);
            }
            step(&mut agents, &config, &interaction, BOUNDS);
            for a in &agents {
                assert!(a.velocity.magnitude() <= config.max_speed + 1e-4);
            }
        }
    }

    #[test]
    fn test_positions_stay_within_wrap_margin() {
        let config = SimulationConfig::default();
        let interaction = InteractionState::new(InteractionMode::None);
        let mut agents = random_agents(60, 11);

        for _ in 0..300 {
            step(&mut agents, &config, &interaction, BOUNDS);
        }
        for a in &agents {
            assert!(a.position.x >= -WRAP_MARGIN && a.position.x <= BOUNDS.width + WRAP_MARGIN);
            assert!(a.position.y >= -WRAP_MARGIN && a.position.y <= BOUNDS.height + WRAP_MARGIN);
        }
    }

    #[test]
    fn test_zero_agents_is_a_no_op() {
        let mut agents: Vec<Agent> = Vec::new();
        step(
            &mut agents,
            &SimulationConfig::default(),
            &InteractionState::default(),
            BOUNDS,
        );
        assert!(agents.is_empty());
    }

    #[test]
    fn test_first_agent_is_the_same_under_both_orders() {
        let config = SimulationConfig::default();
        let interaction = InteractionState::new(InteractionMode::None);
        let original = random_agents(40, 3);

        let mut sequential = original.clone();
        let mut snapshot = original.clone();
        step_with_order(&mut sequential, &config, &interaction, BOUNDS, UpdateOrder::Sequential);
        step_with_order(&mut snapshot, &config, &interaction, BOUNDS, UpdateOrder::Snapshot);

        assert_eq!(sequential[0], snapshot[0]);
    }

    #[test]
    fn test_sequential_order_sees_moved_neighbors() {
        let config = SimulationConfig::default();
        let interaction = InteractionState::new(InteractionMode::None);
        let original = vec![
            agent(0, 100.0, 100.0, 1.0, 0.0),
            agent(1, 110.0, 100.0, 0.0, 1.0),
        ];

        let mut sequential = original.clone();
        let mut snapshot = original.clone();
        step_with_order(&mut sequential, &config, &interaction, BOUNDS, UpdateOrder::Sequential);
        step_with_order(&mut snapshot, &config, &interaction, BOUNDS, UpdateOrder::Snapshot);

        assert_eq!(sequential[0], snapshot[0]);
        assert_ne!(sequential[1], snapshot[1]);

        // Agent 1 was steered by agent 0's post-step state.
        let mut moved = original.clone();
        moved[0] = sequential[0].clone();
        let expected = flocking_forces(1, &moved, &config).weighted(&config);
        assert_eq!(sequential[1].acceleration, expected);
        assert_eq!(step_default_order(&original, &config, &interaction), sequential);
    }

    fn step_default_order(
        agents: &[Agent],
        config: &SimulationConfig,
        interaction: &InteractionState,
    ) -> Vec<Agent> {
        let mut agents = agents.to_vec();
        step(&mut agents, config, interaction, BOUNDS);
        agents
    }

    #[test]
    fn test_snapshot_order_ignores_collection_order() {
        let config = SimulationConfig::default();
        let interaction = InteractionState::new(InteractionMode::None);
        let original = random_agents(40, 5);

        let mut forward = original.clone();
        let mut reversed: Vec<Agent> = original.iter().rev().cloned().collect();
        step_with_order(&mut forward, &config, &interaction, BOUNDS, UpdateOrder::Snapshot);
        step_with_order(&mut reversed, &config, &interaction, BOUNDS, UpdateOrder::Snapshot);

        for a in &forward {
            let b = reversed.iter().find(|b| b.id == a.id).unwrap();
            assert!(a.position.distance(&b.position) < 1e-4);
            assert!(a.velocity.distance(&b.velocity) < 1e-4);
        }
    }

    #[test]
    fn test_adjust_population_grows_with_fresh_ids() {
        let mut agents = random_agents(10, 1);
        let mut rng = StdRng::seed_from_u64(2);

        agents.truncate(5);
        adjust_population(&mut agents, 12, BOUNDS, 4.0, &mut rng);

        assert_eq!(agents.len(), 12);
        let ids: Vec<u32> = agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, (0..12).collect::<Vec<u32>>());
        for a in &agents[5..] {
            assert!(a.position.x >= 0.0 && a.position.x < BOUNDS.width);
            assert!(a.position.y >= 0.0 && a.position.y < BOUNDS.height);
            assert!(a.velocity.x.abs() <= 4.0 && a.velocity.y.abs() <= 4.0);
        }
    }

    #[test]
    fn test_adjust_population_never_reuses_live_ids() {
        let mut agents = vec![agent(9, 0.0, 0.0, 0.0, 0.0), agent(3, 0.0, 0.0, 0.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(2);

        adjust_population(&mut agents, 4, BOUNDS, 4.0, &mut rng);
        let ids: Vec<u32> = agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![9, 3, 10, 11]);
    }

    #[test]
    fn test_adjust_population_after_max_id() {
        let mut agents = vec![agent(u32::MAX, 0.0, 0.0, 0.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(2);

        adjust_population(&mut agents, 2, BOUNDS, 4.0, &mut rng);
        let ids: Vec<u32> = agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![u32::MAX, 0]);

        let mut agents = vec![
            agent(u32::MAX, 0.0, 0.0, 0.0, 0.0),
            agent(0, 0.0, 0.0, 0.0, 0.0),
            agent(2, 0.0, 0.0, 0.0, 0.0),
        ];
        adjust_population(&mut agents, 5, BOUNDS, 4.0, &mut rng);
        let ids: Vec<u32> = agents.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![u32::MAX, 0, 2, 1, 3]);
    }

    #[test]
    fn test_adjust_population_shrinks_from_end() {
        let mut agents = random_agents(10, 4);
        let kept = agents[..4].to_vec();
        let mut rng = StdRng::seed_from_u64(2);

        adjust_population(&mut agents, 4, BOUNDS, 4.0, &mut rng);
        assert_eq!(agents, kept);
    }

    #[test]
    fn test_adjust_population_same_count_is_a_no_op() {
        let mut agents = random_agents(10, 4);
        let before = agents.clone();
        let mut rng = StdRng::seed_from_u64(2);

        adjust_population(&mut agents, 10, BOUNDS, 4.0, &mut rng);
        adjust_population(&mut agents, 10, BOUNDS, 4.0, &mut rng);
        assert_eq!(agents, before);
    }

    #[test]
    fn test_flock_creation() {
        let flock = Flock::with_seed(BOUNDS, SimulationConfig::default(), 1);
        assert_eq!(flock.agents.len(), 150);
        assert_eq!(flock.bounds, BOUNDS);
    }

    #[test]
    fn test_flock_update_moves_agents() {
        let mut flock = Flock::with_seed(BOUNDS, SimulationConfig::default(), 1);
        let initial: Vec<_> = flock.agents.iter().map(|a| a.position).collect();

        flock.update();

        let changed = flock
            .agents
            .iter()
            .zip(initial.iter())
            .any(|(a, &before)| a.position != before);
        assert!(changed);
    }

    #[test]
    fn test_flock_follows_config_count() {
        let mut flock = Flock::with_seed(BOUNDS, SimulationConfig::default(), 1);

        flock.config.agent_count = 40;
        flock.update();
        assert_eq!(flock.agents.len(), 40);

        flock.config.agent_count = 60;
        flock.update();
        assert_eq!(flock.agents.len(), 60);
        assert_eq!(flock.agents.last().map(|a| a.id), Some(59));
    }

    #[test]
    fn test_seeded_flocks_match() {
        let mut a = Flock::with_seed(BOUNDS, SimulationConfig::default(), 99);
        let mut b = Flock::with_seed(BOUNDS, SimulationConfig::default(), 99);
        for _ in 0..10 {
            a.update();
            b.update();
        }
        assert_eq!(a.agents, b.agents);
    }
}
