use joistframe_common::item_with;

/// Trait for floating-point types, so that layouts can be generic over {f32, f64} without having
/// to use [weird macros](joistframe_common::item_with).
///
/// This is only intended to be implemented on floating-point types.
pub trait Float:
    num_traits::Float
    + nalgebra::Scalar
    + nalgebra::SimdPartialOrd
    + std::ops::AddAssign
    + std::ops::SubAssign
    + std::fmt::Display
    + Copy
    + Send
    + Sync
{
    const ZERO: Self;
    const ONE: Self;
    const TWO: Self;
    const HALF: Self;

    /// Convert a member index or count into `Self`.
    ///
    /// Counts beyond the exactly-representable integer range of `Self` round to the nearest
    /// value, which is fine for the member counts a frame can hold.
    fn from_count(n: usize) -> Self;
}

// this macro lets us impl Float for both f32 and f64 without having to copy/paste,
// but it feels very goofy
item_with! {Real: f32, f64 => impl Float for Real {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const TWO: Self = 2.0;
    const HALF: Self = 0.5;

    #[inline]
    fn from_count(n: usize) -> Self {
        n as Real
    }
}}
