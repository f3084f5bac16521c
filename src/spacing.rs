//! Even distribution of member centerlines along a single span.

use std::ops::Index;

use crate::{Degeneracy, Error, Float, InvalidArgument};

/// Centerline offsets of `n` members laid out along a span, measured from the start of the span.
///
/// Before the end inset is applied, positions form the grid `{0, d, 2d, ..., (n-1)d}` where
/// `d = span / (n - 1)`. The inset moves the first member forward and the last member backward;
/// interior members never move.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacing<Real: Float> {
    positions: Vec<Real>,
    interval: Real,
    span: Real,
    end_inset: Real,
}

/// Compute `count` evenly spaced positions across `span`, then pull the two end positions inward
/// by `end_inset`.
///
/// A negative `end_inset` pushes the ends outward instead. Large insets may make members cross;
/// that isn't an error here, but it is reported through [`Spacing::degeneracy`].
///
/// # Errors
///
/// * [`MemberCount`](InvalidArgument::MemberCount) if `count < 2`
/// * [`NonFiniteSpan`](InvalidArgument::NonFiniteSpan) / [`NonPositiveSpan`](InvalidArgument::NonPositiveSpan)
///   unless `span` is finite and `> 0`
/// * [`NonFiniteInset`](InvalidArgument::NonFiniteInset) if `end_inset` is NaN or infinite
/// * [`Overflow`](InvalidArgument::Overflow) if shifting an end member leaves the range of `Real`
///
/// # Examples
///
/// ```
/// let s = joistframe::compute_even_spacing(10.0, 3, 0.5).unwrap();
/// assert_eq!(s.positions(), &[0.5, 5.0, 9.5]);
/// ```
pub fn compute_even_spacing<Real: Float>(
    span: Real,
    count: usize,
    end_inset: Real,
) -> Result<Spacing<Real>, Error<Real>> {
    if count < 2 {
        return Err(InvalidArgument::MemberCount(count).into());
    }
    if !span.is_finite() {
        return Err(InvalidArgument::NonFiniteSpan(span).into());
    }
    if span <= Real::ZERO {
        return Err(InvalidArgument::NonPositiveSpan(span).into());
    }
    if !end_inset.is_finite() {
        return Err(InvalidArgument::NonFiniteInset(end_inset).into());
    }

    let interval = span / Real::from_count(count - 1);
    let mut positions: Vec<Real> = (0..count)
        .map(|i| interval * Real::from_count(i))
        .collect();
    positions[0] += end_inset;
    positions[count - 1] -= end_inset;
    if !(positions[0].is_finite() && positions[count - 1].is_finite()) {
        return Err(InvalidArgument::Overflow { span, end_inset }.into());
    }

    tracing::debug!(%span, count, %end_inset, %interval, "computed even spacing");

    Ok(Spacing {
        positions,
        interval,
        span,
        end_inset,
    })
}

impl<Real: Float> Spacing<Real> {
    /// The computed positions, in member order.
    #[inline]
    pub fn positions(&self) -> &[Real] {
        &self.positions
    }

    /// Distance between neighbouring grid points before the inset was applied.
    #[inline]
    pub fn interval(&self) -> Real {
        self.interval
    }

    #[inline]
    pub fn span(&self) -> Real {
        self.span
    }

    #[inline]
    pub fn end_inset(&self) -> Real {
        self.end_inset
    }

    /// Number of members; always at least 2.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`, since a spacing holds at least two members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Real>> {
        self.positions.iter().copied()
    }

    /// Find the first pair of neighbouring members whose positions collapse onto or cross each
    /// other, if any.
    ///
    /// Only the end members can move, so only the first and last pair need checking; with two
    /// members those are the same pair.
    pub fn degeneracy(&self) -> Option<Degeneracy<Real>> {
        let n = self.positions.len();
        [0, n - 2].into_iter().find_map(|index| {
            let (first, second) = (self.positions[index], self.positions[index + 1]);
            (second <= first).then_some(Degeneracy {
                index,
                first,
                second,
            })
        })
    }

    /// Fail with [`GeometricDegenerate`](Error::GeometricDegenerate) if any members overlap.
    pub fn ensure_ordered(self) -> Result<Self, Error<Real>> {
        match self.degeneracy() {
            Some(d) => Err(d.into()),
            None => Ok(self),
        }
    }
}

impl<Real: Float> Index<usize> for Spacing<Real> {
    type Output = Real;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.positions[index]
    }
}

impl<'s, Real: Float> IntoIterator for &'s Spacing<Real> {
    type Item = Real;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, Real>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
