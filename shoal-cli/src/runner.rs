use std::io::Write;

use anyhow::Result;
use log::{debug, info};
use shoal_core::{
    Agent, Bounds, Flock, InteractionMode, InteractionState, SimulationConfig, Vector2D,
};
use shoal_shared::{
    AgentView, FlockSettings, FrameSnapshot, InteractionEvent, Mode, Position, StatusResponse,
};

use crate::scenario::{Scenario, ScheduledEvent};

pub fn config_from_settings(settings: &FlockSettings) -> SimulationConfig {
    SimulationConfig {
        agent_count: settings.boid_count,
        perception_radius: settings.perception_radius,
        max_speed: settings.max_speed,
        max_force: settings.max_force,
        separation_weight: settings.separation_weight,
        alignment_weight: settings.alignment_weight,
        cohesion_weight: settings.cohesion_weight,
        target_weight: settings.target_weight,
        show_perception: settings.show_perception,
    }
}

pub fn interaction_mode(mode: Mode) -> InteractionMode {
    match mode {
        Mode::None => InteractionMode::None,
        Mode::Seek => InteractionMode::Seek,
        Mode::Scatter => InteractionMode::Scatter,
    }
}

fn wire_mode(mode: InteractionMode) -> Mode {
    match mode {
        InteractionMode::None => Mode::None,
        InteractionMode::Seek => Mode::Seek,
        InteractionMode::Scatter => Mode::Scatter,
    }
}

fn to_vector(position: Position) -> Vector2D {
    Vector2D::new(position.x, position.y)
}

fn to_position(vector: Vector2D) -> Position {
    Position::new(vector.x, vector.y)
}

fn agent_view(agent: &Agent) -> AgentView {
    AgentView {
        id: agent.id,
        x: agent.position.x,
        y: agent.position.y,
        heading: agent.heading(),
        color: agent.color.to_string(),
    }
}

/// Host loop for a scripted run: owns the flock, feeds it events and
/// settings, and reports frames.
pub struct Runner {
    flock: Flock,
    settings: FlockSettings,
    events: Vec<ScheduledEvent>,
    next_event: usize,
    frame: u64,
    snapshot_every: u64,
}

impl Runner {
    pub fn new(scenario: &Scenario) -> Self {
        let bounds = Bounds::new(scenario.width, scenario.height);
        let config = config_from_settings(&scenario.settings).clamped();

        let mut flock = match scenario.seed {
            Some(seed) => Flock::with_seed(bounds, config, seed),
            None => Flock::new(bounds, config),
        };
        flock.order = scenario.order.into();
        flock.interaction = InteractionState {
            mode: interaction_mode(scenario.mode),
            target: scenario.target.map(to_vector),
            pointer: to_vector(scenario.pointer),
        };

        // Stable sort keeps same-frame events in file order.
        let mut events = scenario.events.clone();
        events.sort_by_key(|scheduled| scheduled.frame);

        info!(
            "Flock of {} agents in {}x{} ({:?} order, {} scheduled events)",
            flock.agents.len(),
            bounds.width,
            bounds.height,
            flock.order,
            events.len()
        );

        Self {
            flock,
            settings: scenario.settings.clone(),
            events,
            next_event: 0,
            frame: 0,
            snapshot_every: scenario.snapshot_every,
        }
    }

    /// Frames simulated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn settings(&self) -> &FlockSettings {
        &self.settings
    }

    pub fn apply_event(&mut self, event: &InteractionEvent) {
        debug!("Frame {}: {:?}", self.frame, event);

        let interaction = &mut self.flock.interaction;
        match event {
            InteractionEvent::SetMode { mode } => interaction.set_mode(interaction_mode(*mode)),
            InteractionEvent::Press { position } => interaction.press(to_vector(*position)),
            InteractionEvent::PointerMove {
                position,
                button_down,
            } => interaction.pointer_moved(to_vector(*position), *button_down),
            InteractionEvent::ClearTarget => interaction.clear_target(),
            InteractionEvent::UpdateSettings { settings } => {
                self.settings.apply_patch(settings);
                self.flock.config = config_from_settings(&self.settings).clamped();
            }
            InteractionEvent::Resize { width, height } => {
                self.flock.resize(Bounds::new(*width, *height));
            }
        }
    }

    /// Deliver this frame's events, then advance the flock by one step.
    pub fn tick(&mut self) {
        while self.next_event < self.events.len()
            && self.events[self.next_event].frame <= self.frame
        {
            let event = self.events[self.next_event].event.clone();
            self.next_event += 1;
            self.apply_event(&event);
        }

        self.flock.update();
        self.frame += 1;
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let flock = &self.flock;
        FrameSnapshot {
            frame: self.frame,
            width: flock.bounds.width,
            height: flock.bounds.height,
            mode: wire_mode(flock.interaction.mode),
            target: flock.interaction.target.map(to_position),
            pointer: to_position(flock.interaction.pointer),
            show_perception: flock.config.show_perception,
            perception_radius: flock.config.perception_radius,
            agents: flock.agents.iter().map(agent_view).collect(),
        }
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            agent_count: self.flock.agents.len(),
            frame: self.frame,
            target_active: self.flock.interaction.active_target().is_some(),
        }
    }

    /// Simulate `frames` frames, writing a JSON line per reported frame.
    /// Returns the number of snapshots written.
    pub fn run<W: Write>(&mut self, frames: u64, out: &mut W) -> Result<u64> {
        let mut written = 0;

        for _ in 0..frames {
            self.tick();

            if self.snapshot_every > 0 && self.frame % self.snapshot_every == 0 {
                serde_json::to_writer(&mut *out, &self.snapshot())?;
                out.write_all(b"\n")?;
                written += 1;
            }
        }

        out.flush()?;
        info!("Simulated {} frames, wrote {} snapshots", frames, written);
        Ok(written)
    }
}
