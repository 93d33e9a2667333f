/// A 2D vector used for position, velocity and steering forces
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(not(feature = "std"))]
    {
        libm::sqrtf(value)
    }
}

pub(crate) fn atan2(y: f32, x: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        y.atan2(x)
    }
    #[cfg(not(feature = "std"))]
    {
        libm::atan2f(y, x)
    }
}

impl Vector2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.magnitude_squared())
    }

    /// Unit vector in the same direction.
    ///
    /// A zero vector has no direction and is returned unchanged, so callers
    /// must not assume the result has unit length.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag != 0.0 {
            *self / mag
        } else {
            *self
        }
    }

    /// Rescale to exactly `max` when longer than `max`.
    pub fn limit(&self, max: f32) -> Self {
        if self.magnitude_squared() > max * max {
            self.normalize() * max
        } else {
            *self
        }
    }

    /// Same direction, magnitude `n`. Zero stays zero.
    pub fn set_magnitude(&self, n: f32) -> Self {
        self.normalize() * n
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }

    pub fn dot(&self, other: &Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Angle of the vector in radians, `atan2(y, x)`.
    pub fn heading(&self) -> f32 {
        atan2(self.y, self.x)
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

// Free-function forms of the vector operations, for callers that prefer
// `vector::limit(v, max)` over method syntax.

pub fn add(a: Vector2D, b: Vector2D) -> Vector2D {
    a + b
}

pub fn sub(a: Vector2D, b: Vector2D) -> Vector2D {
    a - b
}

pub fn mult(v: Vector2D, n: f32) -> Vector2D {
    v * n
}

/// Division by zero follows IEEE semantics (infinities or NaN).
pub fn div(v: Vector2D, n: f32) -> Vector2D {
    v / n
}

pub fn mag(v: Vector2D) -> f32 {
    v.magnitude()
}

pub fn normalize(v: Vector2D) -> Vector2D {
    v.normalize()
}

pub fn limit(v: Vector2D, max: f32) -> Vector2D {
    v.limit(max)
}

pub fn set_mag(v: Vector2D, n: f32) -> Vector2D {
    v.set_magnitude(n)
}

pub fn dist(a: Vector2D, b: Vector2D) -> f32 {
    a.distance(&b)
}
