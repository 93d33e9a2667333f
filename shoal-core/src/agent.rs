use core::fmt;

use rand::Rng;

use crate::flock::{wrap_position, Bounds};
use crate::vector::Vector2D;

/// Display colour of an agent, stored as an HSL hue in degrees
///
/// Saturation and lightness are fixed; only the hue varies per agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hue(pub f32);

impl Hue {
    pub const SATURATION: u8 = 80;
    pub const LIGHTNESS: u8 = 60;

    /// A random hue in the cyan/blue band `[180, 240)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(180.0..240.0))
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({:.0}, {}%, {}%)",
            self.0,
            Self::SATURATION,
            Self::LIGHTNESS
        )
    }
}

/// Uniform in `[0, extent)`; a degenerate extent pins the coordinate to 0.
fn spawn_coordinate<R: Rng + ?Sized>(extent: f32, rng: &mut R) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

/// A single simulated creature
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub id: u32,
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub color: Hue,
}

impl Agent {
    pub fn new(id: u32, position: Vector2D, velocity: Vector2D, color: Hue) -> Self {
        Self {
            id,
            position,
            velocity,
            acceleration: Vector2D::zero(),
            color,
        }
    }

    /// Spawn somewhere inside `bounds`, each velocity component drawn from
    /// `[-max_speed, max_speed]`.
    pub fn random<R: Rng + ?Sized>(id: u32, bounds: Bounds, max_speed: f32, rng: &mut R) -> Self {
        let position = Vector2D::new(
            spawn_coordinate(bounds.width, rng),
            spawn_coordinate(bounds.height, rng),
        );
        let velocity = Vector2D::new(
            rng.gen_range(-max_speed..=max_speed),
            rng.gen_range(-max_speed..=max_speed),
        );
        Self::new(id, position, velocity, Hue::random(rng))
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Integrate one unit of time. Acceleration is left in place so hosts can
    /// inspect the force that produced this step.
    pub fn update(&mut self, max_speed: f32) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(max_speed);
        self.position += self.velocity;
    }

    pub fn wrap_edges(&mut self, bounds: Bounds) {
        self.position = wrap_position(self.position, bounds);
    }

    /// Render heading in radians: the velocity angle rotated a quarter turn,
    /// for sprites drawn nose-up.
    pub fn heading(&self) -> f32 {
        self.velocity.heading() + core::f32::consts::FRAC_PI_2
    }
}
