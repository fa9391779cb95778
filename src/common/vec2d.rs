use num::traits::{Float, NumCast};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D vector in a local east/north frame.
///
/// The `x` component points east, the `y` component points north. The vector is
/// used for wind components as well as for metric offsets around a geographic point.
///
/// # Type Parameters
/// * `T` - A floating point type.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vec2D<T> {
    /// The east component of the vector.
    x: T,
    /// The north component of the vector.
    y: T,
}

impl<T: Copy> Vec2D<T> {
    /// Creates a new vector with the given east and north components.
    ///
    /// # Arguments
    /// * `x` - The east component of the vector.
    /// * `y` - The north component of the vector.
    ///
    /// # Returns
    /// A new `Vec2D` object.
    pub const fn new(x: T, y: T) -> Self { Self { x, y } }

    /// Returns the east component of the vector.
    pub const fn x(&self) -> T { self.x }

    /// Returns the north component of the vector.
    pub const fn y(&self) -> T { self.y }
}

impl<T: Float> Vec2D<T> {
    /// Creates a zero vector (x = 0, y = 0).
    pub fn zero() -> Self { Self::new(T::zero(), T::zero()) }

    /// Computes the magnitude (absolute value) of the vector.
    ///
    /// # Returns
    /// The magnitude of the vector as a scalar of type `T`.
    pub fn abs(&self) -> T { self.x.hypot(self.y) }

    /// Computes the compass bearing of the vector in degrees.
    ///
    /// North is `0`, east is `90`. The result is normalized to `[0, 360)`.
    /// A zero vector has a bearing of `0`.
    pub fn bearing_deg(&self) -> T {
        let full_turn = <T as NumCast>::from(360.0).unwrap_or_else(T::zero);
        let bearing = self.x.atan2(self.y).to_degrees();
        let normalized = (bearing % full_turn + full_turn) % full_turn;
        if normalized >= full_turn { T::zero() } else { normalized }
    }
}

impl<T: Float> Add for Vec2D<T> {
    type Output = Vec2D<T>;

    fn add(self, rhs: Vec2D<T>) -> Self::Output { Vec2D::new(self.x + rhs.x, self.y + rhs.y) }
}

impl<T: Float> AddAssign for Vec2D<T> {
    fn add_assign(&mut self, rhs: Vec2D<T>) {
        self.x = self.x + rhs.x;
        self.y = self.y + rhs.y;
    }
}

impl<T: Float> Sub for Vec2D<T> {
    type Output = Vec2D<T>;

    fn sub(self, rhs: Vec2D<T>) -> Self::Output { Vec2D::new(self.x - rhs.x, self.y - rhs.y) }
}

impl<T: Float> Mul<T> for Vec2D<T> {
    type Output = Vec2D<T>;

    /// Implements the `*` operator for a `Vec2D` and a scalar.
    ///
    /// # Arguments
    /// * `rhs` - The scalar value to multiply by.
    ///
    /// # Returns
    /// A new scaled vector.
    fn mul(self, rhs: T) -> Self::Output { Vec2D::new(self.x * rhs, self.y * rhs) }
}

impl<T: Copy> From<(T, T)> for Vec2D<T> {
    /// Creates a `Vec2D` from a tuple of (east, north) values.
    fn from(tuple: (T, T)) -> Self { Vec2D::new(tuple.0, tuple.1) }
}
