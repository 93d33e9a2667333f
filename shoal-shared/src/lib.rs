#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Represents a 2D position in screen coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position
    pub fn distance_to(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        libm::sqrtf(dx * dx + dy * dy)
    }
}

/// Pointer interaction mode, as shown on the mode buttons
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    None,
    #[default]
    Seek,
    Scatter,
}

/// Flock simulation settings, one field per control panel slider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FlockSettings {
    pub boid_count: usize,
    pub perception_radius: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub target_weight: f32,
    pub show_perception: bool,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            boid_count: 150,
            perception_radius: 60.0,
            max_speed: 4.0,
            max_force: 0.1,
            separation_weight: 2.0,
            alignment_weight: 1.2,
            cohesion_weight: 1.0,
            target_weight: 1.5,
            show_perception: false,
        }
    }
}

impl FlockSettings {
    /// Overwrite every field the patch carries.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.boid_count {
            self.boid_count = v;
        }
        if let Some(v) = patch.perception_radius {
            self.perception_radius = v;
        }
        if let Some(v) = patch.max_speed {
            self.max_speed = v;
        }
        if let Some(v) = patch.max_force {
            self.max_force = v;
        }
        if let Some(v) = patch.separation_weight {
            self.separation_weight = v;
        }
        if let Some(v) = patch.alignment_weight {
            self.alignment_weight = v;
        }
        if let Some(v) = patch.cohesion_weight {
            self.cohesion_weight = v;
        }
        if let Some(v) = patch.target_weight {
            self.target_weight = v;
        }
        if let Some(v) = patch.show_perception {
            self.show_perception = v;
        }
    }
}

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boid_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perception_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_force: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohesion_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_perception: Option<bool>,
}

/// Something the user did, delivered to the host loop between frames
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InteractionEvent {
    SetMode {
        mode: Mode,
    },
    /// Primary button pressed.
    Press {
        position: Position,
    },
    PointerMove {
        position: Position,
        #[serde(default, rename = "buttonDown")]
        button_down: bool,
    },
    ClearTarget,
    UpdateSettings {
        settings: SettingsPatch,
    },
    Resize {
        width: f32,
        height: f32,
    },
}

/// One agent as a renderer needs it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Radians, zero pointing up the screen.
    pub heading: f32,
    /// CSS colour string.
    pub color: String,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub frame: u64,
    pub width: f32,
    pub height: f32,
    pub mode: Mode,
    pub target: Option<Position>,
    pub pointer: Position,
    pub show_perception: bool,
    pub perception_radius: f32,
    pub agents: Vec<AgentView>,
}

/// Status summary reported by a running host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub agent_count: usize,
    pub frame: u64,
    pub target_active: bool,
}
