//! Joist frames: parallel members standing in for a solid box.

use nalgebra::{point, vector, Point3, Vector3};

use crate::{
    bounds::{positive, Aabb, HalfExtents},
    compute_even_spacing, Error, Float, Spacing,
};

/// How the members of a frame are sized and distributed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoistParams<Real: Float> {
    /// Number of members; at least 2.
    pub count: usize,
    /// Size of each member along the span axis.
    pub width: Real,
    /// Size of each member along the vertical axis.
    pub depth: Real,
    /// Added to `width` to get the end inset. Defaults to `-1`.
    pub inset_bias: Real,
}

impl<Real: Float> JoistParams<Real> {
    /// Parameters with the default inset bias of `-1`.
    pub fn new(count: usize, width: Real, depth: Real) -> Self {
        Self {
            count,
            width,
            depth,
            inset_bias: -Real::ONE,
        }
    }

    #[inline]
    pub fn with_inset_bias(mut self, inset_bias: Real) -> Self {
        self.inset_bias = inset_bias;
        self
    }

    /// Distance the first and last members are pulled in from the ends of the span.
    #[inline]
    pub fn end_inset(&self) -> Real {
        self.width + self.inset_bias
    }
}

/// Member centroids for a frame, index-aligned with the spacing they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct JoistLayout<Real: Float> {
    spacing: Spacing<Real>,
    centroids: Vec<Point3<Real>>,
    member_size: Vector3<Real>,
}

/// Lay out `params.count` members across the span (x) axis of a box centered on the origin.
///
/// Member `i` is centered on `(p - half.x, half.y - depth / 2, half.z / 2)`, where `p` is the
/// `i`th position of [`compute_even_spacing`] over the full span. The spacing grid starts at `0`;
/// subtracting `half.x` moves it into the box's own frame.
///
/// # Errors
///
/// * Anything [`compute_even_spacing`] may return
/// * [`NonPositiveDimension`](crate::InvalidArgument::NonPositiveDimension) for a flat box or a
///   member without width or depth
pub fn layout_joist_centroids<Real: Float>(
    half: &HalfExtents<Real>,
    params: &JoistParams<Real>,
) -> Result<JoistLayout<Real>, Error<Real>> {
    half.validate()?;
    let width = positive("member width", params.width)?;
    let depth = positive("member depth", params.depth)?;

    let spacing = compute_even_spacing(half.span(), params.count, params.end_inset())?;

    let y = half.y - depth * Real::HALF;
    let z = half.z * Real::HALF;
    let centroids = spacing.iter().map(|p| point![p - half.x, y, z]).collect();

    tracing::debug!(
        count = params.count,
        span = %half.span(),
        end_inset = %params.end_inset(),
        "laid out joist centroids"
    );

    Ok(JoistLayout {
        spacing,
        centroids,
        member_size: vector![width, depth, half.z],
    })
}

impl<Real: Float> JoistLayout<Real> {
    #[inline]
    pub fn centroids(&self) -> &[Point3<Real>] {
        &self.centroids
    }

    /// The span-relative positions the centroids were derived from.
    #[inline]
    pub fn spacing(&self) -> &Spacing<Real> {
        &self.spacing
    }

    /// Size shared by every member: `(width, depth, half.z)`.
    #[inline]
    pub fn member_size(&self) -> Vector3<Real> {
        self.member_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.centroids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centroids.is_empty()
    }

    /// The volume occupied by member `i`, if it exists.
    pub fn member_bounds(&self, i: usize) -> Option<Aabb<Real>> {
        self.centroids
            .get(i)
            .map(|c| Aabb::from_center(*c, self.member_size))
    }

    /// Volumes of every member, in member order.
    pub fn members(&self) -> impl Iterator<Item = Aabb<Real>> + '_ {
        self.centroids
            .iter()
            .map(|c| Aabb::from_center(*c, self.member_size))
    }
}
