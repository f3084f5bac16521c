//! Errors raised while laying out a frame or applying settings to a viewport.

use std::ops::RangeInclusive;

use crate::{settings::SettingField, Float};

/// Errors related to [frame layouts](crate::frame::JoistLayout) and their viewports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error<Real: Float> {
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument<Real>),
    #[error(transparent)]
    GeometricDegenerate(#[from] Degeneracy<Real>),
    #[error("render backend failed: {0}")]
    Backend(String),
}

/// Inputs that can't produce a finite layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidArgument<Real: Float> {
    #[error("Member count must be at least 2, got {0}")]
    MemberCount(usize),
    #[error("Span must be finite, got {0}")]
    NonFiniteSpan(Real),
    #[error("Span must be positive, got {0}")]
    NonPositiveSpan(Real),
    #[error("End inset must be finite, got {0}")]
    NonFiniteInset(Real),
    #[error("Span {span} with end inset {end_inset} overflows")]
    Overflow { span: Real, end_inset: Real },
    #[error("{name} must be finite and positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: Real },
    #[error("{field} = {value} lies outside of {range:?}")]
    OutOfRange {
        field: SettingField,
        value: Real,
        range: RangeInclusive<Real>,
    },
    #[error("{field} can't be set from a {given} value")]
    WrongKind {
        field: SettingField,
        given: &'static str,
    },
}

/// Two neighbouring members whose positions collapse onto or cross each other.
///
/// `positions[index + 1] <= positions[index]`
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("members {index} ({first}) and {} ({second}) overlap", .index + 1)]
pub struct Degeneracy<Real: Float> {
    pub index: usize,
    pub first: Real,
    pub second: Real,
}

/// A `field=value` setting edit that couldn't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseEditError {
    #[error("expected FIELD=VALUE, got {0:?}")]
    MissingValue(String),
    #[error(transparent)]
    Field(#[from] ParseNameError),
    #[error("{value:?} is not a valid value for {field}")]
    Value { field: SettingField, value: String },
}

/// A name that doesn't match any variant of a named enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized name: {0:?}")]
pub struct ParseNameError(pub String);

impl From<String> for ParseNameError {
    fn from(s: String) -> Self {
        Self(s)
    }
}
