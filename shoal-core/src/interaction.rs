use crate::vector::Vector2D;

/// How the pointer influences the flock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    None,
    /// Click or drag to set a point the flock steers toward.
    #[default]
    Seek,
    /// The pointer acts as a predator the flock flees from.
    Scatter,
}

/// Pointer and target information for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    pub mode: InteractionMode,
    /// Persists until replaced, including across mode switches.
    pub target: Option<Vector2D>,
    /// Always tracked; only consulted in scatter mode.
    pub pointer: Vector2D,
}

impl InteractionState {
    pub fn new(mode: InteractionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    /// Primary button pressed at `point`.
    pub fn press(&mut self, point: Vector2D) {
        if self.mode == InteractionMode::Seek {
            self.target = Some(point);
        }
    }

    /// Pointer moved; a held button drags the seek target along.
    pub fn pointer_moved(&mut self, point: Vector2D, button_down: bool) {
        self.pointer = point;
        if self.mode == InteractionMode::Seek && button_down {
            self.target = Some(point);
        }
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// The seek target, if one is set and seek mode is active.
    pub fn active_target(&self) -> Option<Vector2D> {
        match self.mode {
            InteractionMode::Seek => self.target,
            _ => None,
        }
    }
}
