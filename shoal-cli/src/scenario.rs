use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use shoal_core::UpdateOrder;
use shoal_shared::{FlockSettings, InteractionEvent, Mode, Position};

/// Which neighbour state agents see within one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Later agents see earlier agents' new state
    #[default]
    Sequential,
    /// All agents see the previous frame
    Snapshot,
}

impl From<Order> for UpdateOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Sequential => UpdateOrder::Sequential,
            Order::Snapshot => UpdateOrder::Snapshot,
        }
    }
}

/// An event delivered just before the given frame is simulated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledEvent {
    pub frame: u64,
    pub event: InteractionEvent,
}

/// A scripted simulation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Scenario {
    pub width: f32,
    pub height: f32,
    pub frames: u64,
    /// Unseeded runs draw spawns from OS entropy.
    pub seed: Option<u64>,
    pub settings: FlockSettings,
    pub mode: Mode,
    pub target: Option<Position>,
    pub pointer: Position,
    pub order: Order,
    /// Write a snapshot every N frames; 0 disables output.
    pub snapshot_every: u64,
    pub events: Vec<ScheduledEvent>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            frames: 600,
            seed: None,
            settings: FlockSettings::default(),
            mode: Mode::Seek,
            target: None,
            pointer: Position::default(),
            order: Order::Sequential,
            snapshot_every: 1,
            events: Vec::new(),
        }
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json).context("Invalid scenario JSON")?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        check_viewport(self.width, self.height)?;
        for scheduled in &self.events {
            if let InteractionEvent::Resize { width, height } = scheduled.event {
                check_viewport(width, height)
                    .with_context(|| format!("Bad resize event at frame {}", scheduled.frame))?;
            }
        }
        Ok(())
    }
}

fn check_viewport(width: f32, height: f32) -> Result<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        anyhow::bail!("Viewport must be positive and finite, got {}x{}", width, height);
    }
    Ok(())
}

/// Parse an `X,Y` pair, as given on the command line.
pub fn parse_point(s: &str) -> Result<Position, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x = x
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("bad x coordinate '{}': {}", x, e))?;
    let y = y
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("bad y coordinate '{}': {}", y, e))?;
    Ok(Position::new(x, y))
}
