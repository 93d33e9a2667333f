/// Tunable parameters of the simulation
///
/// Read fresh on every step; hosts replace the whole value whenever the
/// user changes a setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub agent_count: usize,
    pub perception_radius: f32,
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub target_weight: f32,
    /// Debug overlay: draw the perception radius around the first agent.
    pub show_perception: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agent_count: 150,
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

impl SimulationConfig {
    pub const MIN_AGENTS: usize = 10;
    pub const MAX_AGENTS: usize = 400;
    pub const MAX_WEIGHT: f32 = 5.0;
    pub const SPEED_RANGE: (f32, f32) = (1.0, 10.0);
    pub const PERCEPTION_RANGE: (f32, f32) = (20.0, 200.0);

    /// Constrain every user-editable field to the range the control panel
    /// offers. The simulation never calls this itself; hosts validate input.
    pub fn clamped(&self) -> Self {
        Self {
            agent_count: self.agent_count.clamp(Self::MIN_AGENTS, Self::MAX_AGENTS),
            perception_radius: self
                .perception_radius
                .clamp(Self::PERCEPTION_RANGE.0, Self::PERCEPTION_RANGE.1),
            max_speed: self.max_speed.clamp(Self::SPEED_RANGE.0, Self::SPEED_RANGE.1),
            max_force: self.max_force.max(0.0),
            separation_weight: self.separation_weight.clamp(0.0, Self::MAX_WEIGHT),
            alignment_weight: self.alignment_weight.clamp(0.0, Self::MAX_WEIGHT),
            cohesion_weight: self.cohesion_weight.clamp(0.0, Self::MAX_WEIGHT),
            target_weight: self.target_weight.clamp(0.0, Self::MAX_WEIGHT),
            show_perception: self.show_perception,
        }
    }
}
