//! Planar vector with a polar view
//!
//! Points are plain `glam::DVec2` values. Vectors carry their own arithmetic:
//! adding or multiplying by a scalar acts on the *length* while the direction
//! is kept, which is what the force model builds on.

use glam::DVec2;
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// A location in the world plane
pub type Point = DVec2;

/// Cartesian vector with a derived length/angle view
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector pointing from `start` to `end`
    pub fn between(start: Point, end: Point) -> Self {
        Self {
            x: end.x - start.x,
            y: end.y - start.y,
        }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Direction in radians.
    ///
    /// `atan(y / x)` corrected by π for the left half-plane only. A zero
    /// vector has no direction and yields NaN.
    pub fn angle(&self) -> f64 {
        let value = (self.y / self.x).atan();
        if self.x < 0.0 {
            PI + value
        } else {
            value
        }
    }

    /// True when the vector has no usable direction
    pub fn is_degenerate(&self) -> bool {
        self.angle().is_nan()
    }

    /// Rescale to `length`, keeping the direction.
    ///
    /// A zero vector is nudged along +x first so it gains a direction.
    pub fn set_length(&mut self, length: f64) {
        if self.length() == 0.0 {
            self.x += 1.0;
        }
        let angle = self.angle();
        self.set_polar(length, angle);
    }

    pub fn set_angle(&mut self, angle: f64) {
        let length = self.length();
        self.set_polar(length, angle);
    }

    pub fn rotate(&mut self, delta: f64) {
        let angle = delta + self.angle();
        self.set_angle(angle);
    }

    fn set_polar(&mut self, length: f64, angle: f64) {
        self.x = angle.cos() * length;
        self.y = angle.sin() * length;
    }
}

impl From<DVec2> for Vector {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for DVec2 {
    fn from(v: Vector) -> Self {
        DVec2::new(v.x, v.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(rhs.x + self.x, rhs.y + self.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

/// Extends the length by `rhs`
impl Add<f64> for Vector {
    type Output = Vector;

    fn add(mut self, rhs: f64) -> Vector {
        self.set_length(self.length() + rhs);
        self
    }
}

impl AddAssign<f64> for Vector {
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

/// Shrinks the length by `rhs`
impl Sub<f64> for Vector {
    type Output = Vector;

    fn sub(mut self, rhs: f64) -> Vector {
        self.set_length(self.length() - rhs);
        self
    }
}

/// Scales the length by `rhs`
impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(mut self, rhs: f64) -> Vector {
        self.set_length(self.length() * rhs);
        self
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "length: {}, angle: {}", self.length(), self.angle())
    }
}

pub fn degrees_to_radians(angle: f64) -> f64 {
    angle * (PI / 180.0)
}

pub fn radians_to_degrees(angle: f64) -> f64 {
    angle * (180.0 / PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_length() {
        assert_eq!(Vector::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Vector::ZERO.length(), 0.0);
    }

    #[test]
    fn test_angle_half_plane() {
        assert_eq!(Vector::new(1.0, 0.0).angle(), 0.0);
        assert!((Vector::new(0.0, 2.0).angle() - PI / 2.0).abs() < EPS);
        assert!((Vector::new(0.0, -2.0).angle() + PI / 2.0).abs() < EPS);
        assert!((Vector::new(-1.0, 0.0).angle() - PI).abs() < EPS);
        // Third quadrant resolves through the +π correction
        assert!((Vector::new(-1.0, -1.0).angle() - 5.0 * PI / 4.0).abs() < EPS);
    }

    #[test]
    fn test_zero_vector_is_degenerate() {
        assert!(Vector::ZERO.angle().is_nan());
        assert!(Vector::ZERO.is_degenerate());
        assert!(!Vector::new(0.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_set_length_keeps_direction() {
        let mut v = Vector::new(3.0, 4.0);
        v.set_length(10.0);
        assert!((v.x - 6.0).abs() < EPS);
        assert!((v.y - 8.0).abs() < EPS);
    }

    #[test]
    fn test_set_length_on_zero_vector_points_along_x() {
        let mut v = Vector::ZERO;
        v.set_length(2.5);
        assert!((v.x - 2.5).abs() < EPS);
        assert!(v.y.abs() < EPS);

        let mut v = Vector::ZERO;
        v.set_length(0.0);
        assert_eq!(v.length(), 0.0);
        assert!(!v.x.is_nan());
    }

    #[test]
    fn test_set_angle_and_rotate() {
        let mut v = Vector::new(2.0, 0.0);
        v.set_angle(PI / 2.0);
        assert!(v.x.abs() < EPS);
        assert!((v.y - 2.0).abs() < EPS);

        v.rotate(PI / 2.0);
        assert!((v.x + 2.0).abs() < EPS);
        assert!(v.y.abs() < EPS);
    }

    #[test]
    fn test_scalar_operators_act_on_length() {
        let v = Vector::new(0.0, 2.0);
        assert!(((v + 3.0).length() - 5.0).abs() < EPS);
        assert!(((v - 1.5).length() - 0.5).abs() < EPS);
        assert!(((v * 4.0).length() - 8.0).abs() < EPS);
        assert!((v + 3.0).x.abs() < EPS);
    }

    #[test]
    fn test_vector_sum_is_componentwise() {
        let mut a = Vector::new(1.0, 2.0);
        a += Vector::new(-3.0, 0.5);
        assert_eq!(a, Vector::new(-2.0, 2.5));
    }

    #[test]
    fn test_between_points() {
        let v = Vector::between(Point::new(1.0, 1.0), Point::new(4.0, -3.0));
        assert_eq!(v, Vector::new(3.0, -4.0));
        assert_eq!(DVec2::from(v), DVec2::new(3.0, -4.0));
    }

    #[test]
    fn test_angle_units() {
        assert!((degrees_to_radians(180.0) - PI).abs() < EPS);
        assert!((radians_to_degrees(PI / 2.0) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector::new(1.0, 0.0).to_string(), "length: 1, angle: 0");
    }
}
