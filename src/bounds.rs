//! Axis-aligned volumes: the box being framed, and the members framing it.

use nalgebra::{point, vector, Point3, Vector3};

use crate::{Error, Float, InvalidArgument};

/// Half of a box's size along each axis. The box is centered on the origin.
///
/// `x` is the span axis, along which members are distributed; `y` is vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfExtents<Real: Float> {
    pub x: Real,
    pub y: Real,
    pub z: Real,
}

impl<Real: Float> HalfExtents<Real> {
    #[inline]
    pub fn new(x: Real, y: Real, z: Real) -> Self {
        Self { x, y, z }
    }

    /// Half extents of a box with full size `(x, y, z)`.
    #[inline]
    pub fn from_size(x: Real, y: Real, z: Real) -> Self {
        Self::new(x * Real::HALF, y * Real::HALF, z * Real::HALF)
    }

    #[inline]
    pub fn size(&self) -> Vector3<Real> {
        vector![self.x * Real::TWO, self.y * Real::TWO, self.z * Real::TWO]
    }

    /// Full length of the span axis.
    #[inline]
    pub fn span(&self) -> Real {
        self.x * Real::TWO
    }

    /// # Errors
    ///
    /// * [`NonPositiveDimension`](InvalidArgument::NonPositiveDimension) unless every half extent
    ///   is finite and `> 0`.
    pub fn validate(&self) -> Result<(), Error<Real>> {
        for (name, value) in [
            ("half extent x", self.x),
            ("half extent y", self.y),
            ("half extent z", self.z),
        ] {
            positive(name, value)?;
        }
        Ok(())
    }
}

impl<Real: Float> From<HalfExtents<Real>> for Aabb<Real> {
    fn from(h: HalfExtents<Real>) -> Self {
        Self {
            mins: point![-h.x, -h.y, -h.z],
            maxs: point![h.x, h.y, h.z],
        }
    }
}

/// Reject dimensions which aren't finite and positive.
pub(crate) fn positive<Real: Float>(name: &'static str, value: Real) -> Result<Real, Error<Real>> {
    if value.is_finite() && value > Real::ZERO {
        Ok(value)
    } else {
        Err(InvalidArgument::NonPositiveDimension { name, value }.into())
    }
}

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb<Real: Float> {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl<Real: Float> Aabb<Real> {
    #[inline]
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Construct an [Aabb] of size `size` centered on `center`.
    pub fn from_center(center: Point3<Real>, size: Vector3<Real>) -> Self {
        let (hx, hy, hz) = (
            size.x * Real::HALF,
            size.y * Real::HALF,
            size.z * Real::HALF,
        );
        Self {
            mins: point![center.x - hx, center.y - hy, center.z - hz],
            maxs: point![center.x + hx, center.y + hy, center.z + hz],
        }
    }

    /// Determine the center of `self`.
    #[inline]
    pub fn center(&self) -> Point3<Real> {
        let Self { mins: i, maxs: a } = self;
        point![
            (i.x + a.x) / Real::TWO,
            (i.y + a.y) / Real::TWO,
            (i.z + a.z) / Real::TWO
        ]
    }

    #[inline]
    pub fn size(&self) -> Vector3<Real> {
        let Self { mins: i, maxs: a } = self;
        vector![a.x - i.x, a.y - i.y, a.z - i.z]
    }
}
