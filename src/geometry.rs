//! Planar geometry for field-relative poses.
//!
//! Field frame convention: standing at the middle of the field facing a
//! target, X points away from you and Y points to your left. Rotations are
//! counter-clockwise positive.
//!
//! Rotations are stored in degrees because degrees are what travel on the
//! wire; that keeps a decoded rotation bit-identical to the encoded one.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Wrap an angle in degrees to the (-180, 180] range.
pub fn wrap_angle_deg(angle: f64) -> f64 {
    let mut wrapped = angle % 360.0;
    while wrapped > 180.0 {
        wrapped -= 360.0;
    }
    while wrapped <= -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// A 2D translation in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation2d {
    pub x: f64,
    pub y: f64,
}

impl Translation2d {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another translation.
    #[inline]
    pub fn distance(self, other: Translation2d) -> f64 {
        (other - self).norm()
    }

    /// Rotate counter-clockwise about the origin.
    #[inline]
    pub fn rotate_by(self, rotation: Rotation2d) -> Self {
        let (sin, cos) = rotation.radians().sin_cos();
        Self { x: self.x * cos - self.y * sin, y: self.x * sin + self.y * cos }
    }
}

impl Add for Translation2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Translation2d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Translation2d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Translation2d {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

/// A planar rotation, counter-clockwise positive. Not normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rotation2d {
    degrees: f64,
}

impl Rotation2d {
    #[inline]
    pub const fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Self { degrees: radians.to_degrees() }
    }

    #[inline]
    pub const fn degrees(self) -> f64 {
        self.degrees
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.degrees.to_radians()
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.radians().cos()
    }

    #[inline]
    pub fn sin(self) -> f64 {
        self.radians().sin()
    }
}

impl Add for Rotation2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_degrees(self.degrees + rhs.degrees)
    }
}

impl Sub for Rotation2d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_degrees(self.degrees - rhs.degrees)
    }
}

impl Neg for Rotation2d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_degrees(-self.degrees)
    }
}

/// A position and heading on the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2d {
    pub translation: Translation2d,
    pub rotation: Rotation2d,
}

impl Pose2d {
    #[inline]
    pub const fn new(translation: Translation2d, rotation: Rotation2d) -> Self {
        Self { translation, rotation }
    }

    /// Pose from meters and a heading in degrees.
    #[inline]
    pub const fn from_xy_degrees(x: f64, y: f64, degrees: f64) -> Self {
        Self::new(Translation2d::new(x, y), Rotation2d::from_degrees(degrees))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.translation.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.translation.y
    }

    /// Apply `transform` in this pose's own frame.
    ///
    /// ```text
    /// C = A ∘ T:
    ///   C.t = A.t + rotate(T.t, A.θ)
    ///   C.θ = A.θ + T.θ
    /// ```
    #[inline]
    pub fn transform_by(self, transform: Transform2d) -> Pose2d {
        Pose2d::new(
            self.translation + transform.translation.rotate_by(self.rotation),
            self.rotation + transform.rotation,
        )
    }

    /// Express `self` in the frame of `origin`.
    #[inline]
    pub fn relative_to(self, origin: Pose2d) -> Pose2d {
        let transform = Transform2d::between(origin, self);
        Pose2d::new(transform.translation, transform.rotation)
    }
}

/// A rigid-body change from one pose to another, expressed in the first pose's frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform2d {
    pub translation: Translation2d,
    pub rotation: Rotation2d,
}

impl Transform2d {
    #[inline]
    pub const fn new(translation: Translation2d, rotation: Rotation2d) -> Self {
        Self { translation, rotation }
    }

    /// Transform from meters and a rotation in degrees.
    #[inline]
    pub const fn from_xy_degrees(x: f64, y: f64, degrees: f64) -> Self {
        Self::new(Translation2d::new(x, y), Rotation2d::from_degrees(degrees))
    }

    /// The transform that carries `initial` onto `last`.
    ///
    /// Equivalent to `inverse(initial) ∘ last`.
    #[inline]
    pub fn between(initial: Pose2d, last: Pose2d) -> Self {
        Self::new(
            (last.translation - initial.translation).rotate_by(-initial.rotation),
            last.rotation - initial.rotation,
        )
    }

    /// The transform that undoes this one.
    #[inline]
    pub fn inverse(self) -> Self {
        Self::new((-self.translation).rotate_by(-self.rotation), -self.rotation)
    }
}
