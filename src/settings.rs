//! Typed viewer settings and the table describing how each one is edited.

use std::{ops::RangeInclusive, str::FromStr};

use joistframe_common::named_variants;

use crate::{
    frame::JoistParams, Error, HalfExtents, InvalidArgument, ParseEditError, ParseNameError,
};

/// Scalar type of every setting and everything derived from them.
pub type Real = f32;

/// Surface shading for every mesh in a viewport.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Material {
    /// Colored by surface normal.
    #[default]
    Normal,
    /// Colored by distance from the camera.
    Depth,
}

named_variants!(Material, ParseNameError; Normal => "normal", Depth => "depth");

/// Whether a viewport shows the solid box or the joists framing it.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    #[default]
    Box,
    Frame,
}

named_variants!(DisplayMode, ParseNameError; Box => "box", Frame => "frame");

/// What to do when a layout's members overlap.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DegeneratePolicy {
    /// Show the layout anyway and report the overlap.
    #[default]
    Warn,
    /// Refuse the edit that produced the layout.
    Reject,
}

named_variants!(DegeneratePolicy, ParseNameError; Warn => "warn", Reject => "reject");

/// Every editable field of [FrameSettings].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SettingField {
    X,
    Y,
    Z,
    ShowFrame,
    JoistCount,
    MemberWidth,
    MemberDepth,
    InsetBias,
    Material,
    Wireframe,
    AutoRotate,
    Degenerate,
}

named_variants!(SettingField, ParseNameError;
    X => "x",
    Y => "y",
    Z => "z",
    ShowFrame => "show-frame",
    JoistCount => "joist-count",
    MemberWidth => "member-width",
    MemberDepth => "member-depth",
    InsetBias => "inset-bias",
    Material => "material",
    Wireframe => "wireframe",
    AutoRotate => "auto-rotate",
    Degenerate => "degenerate",
);

/// The follow-up a viewport must perform once an edit has been applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommitAction {
    /// Recompute the layout and replace every mesh.
    Rebuild,
    /// Swap between the box and the frame.
    SwitchDisplay,
    /// Re-material every mesh.
    SetMaterial,
    /// Nothing; the value is read when needed.
    None,
}

/// The kind of value a setting holds, along with its bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingKind {
    Number {
        range: RangeInclusive<Real>,
        /// Granularity suggested to widgets; not enforced.
        step: Real,
    },
    Integer {
        range: RangeInclusive<usize>,
    },
    Toggle,
    Choice(&'static [&'static str]),
}

/// How a single setting is presented and what happens when an edit to it is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingDescriptor {
    pub field: SettingField,
    pub label: &'static str,
    pub kind: SettingKind,
    pub on_commit: CommitAction,
}

/// A new value for one setting.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SettingValue {
    Number(Real),
    Integer(usize),
    Toggle(bool),
    Material(Material),
    Policy(DegeneratePolicy),
}

impl SettingValue {
    fn kind_name(&self) -> &'static str {
        match self {
            SettingValue::Number(_) => "number",
            SettingValue::Integer(_) => "integer",
            SettingValue::Toggle(_) => "toggle",
            SettingValue::Material(_) => "material",
            SettingValue::Policy(_) => "policy",
        }
    }
}

/// An edit to a single setting, as committed by a control panel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SettingEdit {
    pub field: SettingField,
    pub value: SettingValue,
}

impl SettingEdit {
    #[inline]
    pub fn new(field: SettingField, value: SettingValue) -> Self {
        Self { field, value }
    }
}

/// Parses `FIELD=VALUE`, interpreting `VALUE` according to the field's descriptor.
impl FromStr for SettingEdit {
    type Err = ParseEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, raw) = s
            .split_once('=')
            .ok_or_else(|| ParseEditError::MissingValue(s.to_owned()))?;
        let field = SettingField::from_str(field)?;
        let raw = raw.trim();
        let bad_value = || ParseEditError::Value {
            field,
            value: raw.to_owned(),
        };
        let value = match field.descriptor().kind {
            SettingKind::Number { .. } => {
                SettingValue::Number(raw.parse().map_err(|_| bad_value())?)
            }
            SettingKind::Integer { .. } => {
                SettingValue::Integer(raw.parse().map_err(|_| bad_value())?)
            }
            SettingKind::Toggle => SettingValue::Toggle(raw.parse().map_err(|_| bad_value())?),
            SettingKind::Choice(_) => match field {
                SettingField::Material => {
                    SettingValue::Material(raw.parse().map_err(|_| bad_value())?)
                }
                _ => SettingValue::Policy(raw.parse().map_err(|_| bad_value())?),
            },
        };
        Ok(Self { field, value })
    }
}

const EXTENT_RANGE: RangeInclusive<Real> = 1.0..=20.0;
const MEMBER_RANGE: RangeInclusive<Real> = 0.1..=20.0;

impl SettingField {
    /// The descriptor of this field within [FrameSettings::DESCRIPTORS].
    pub fn descriptor(self) -> &'static SettingDescriptor {
        // DESCRIPTORS is declared in SettingField order
        &FrameSettings::DESCRIPTORS[self as usize]
    }
}

/// Everything a user can change about a viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSettings {
    pub x: Real,
    pub y: Real,
    pub z: Real,
    pub show_frame: bool,
    pub joist_count: usize,
    pub member_width: Real,
    pub member_depth: Real,
    pub inset_bias: Real,
    pub material: Material,
    pub wireframe: bool,
    pub auto_rotate: bool,
    pub degenerate: DegeneratePolicy,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            x: 2.0,
            y: 1.0,
            z: 2.0,
            show_frame: false,
            joist_count: 3,
            member_width: 1.5,
            member_depth: 0.5,
            inset_bias: -1.0,
            material: Material::Normal,
            wireframe: false,
            auto_rotate: true,
            degenerate: DegeneratePolicy::Warn,
        }
    }
}

impl FrameSettings {
    /// Presentation & commit behavior of every setting, in [SettingField] order.
    pub const DESCRIPTORS: &'static [SettingDescriptor] = &[
        SettingDescriptor {
            field: SettingField::X,
            label: "X",
            kind: SettingKind::Number {
                range: EXTENT_RANGE,
                step: 1.0,
            },
            on_commit: CommitAction::Rebuild,
        },
        SettingDescriptor {
            field: SettingField::Y,
            label: "Y",
            kind: SettingKind::Number {
                range: EXTENT_RANGE,
                step: 1.0,
            },
            on_commit: CommitAction::Rebuild,
        },
        SettingDescriptor {
            field: SettingField::Z,
            label: "Z",
            kind: SettingKind::Number {
                range: EXTENT_RANGE,
                step: 1.0,
            },
            on_commit: CommitAction::Rebuild,
        },
        SettingDescriptor {
            field: SettingField::ShowFrame,
            label: "Show Frame",
            kind: SettingKind::Toggle,
            on_commit: CommitAction::SwitchDisplay,
        },
        SettingDescriptor {
            field: SettingField::JoistCount,
            label: "Joists",
            kind: SettingKind::Integer { range: 2..=32 },
            on_commit: CommitAction::Rebuild,
        },
        SettingDescriptor {
            field: SettingField::MemberWidth,
            label: "Member Width",
            kind: SettingKind::Number {
                range: MEMBER_RANGE,
                step: 0.1,
            },
            on_commit: CommitAction::Rebuild,
        },
        SettingDescriptor {
            field: SettingField::MemberDepth,
            label: "Member Depth",
            kind: SettingKind::Number {
                range: MEMBER_RANGE,
                step: 0.1,
            },
            on_commit: CommitAction::Rebuild,
        },
        SettingDescriptor {
            field: SettingField::InsetBias,
            label: "Inset Bias",
            kind: SettingKind::Number {
                range: -20.0..=20.0,
                step: 0.1,
            },
            on_commit: CommitAction::Rebuild,
        },
        SettingDescriptor {
            field: SettingField::Material,
            label: "Material",
            kind: SettingKind::Choice(&["normal", "depth"]),
            on_commit: CommitAction::SetMaterial,
        },
        SettingDescriptor {
            field: SettingField::Wireframe,
            label: "Wireframe",
            kind: SettingKind::Toggle,
            on_commit: CommitAction::SetMaterial,
        },
        SettingDescriptor {
            field: SettingField::AutoRotate,
            label: "Auto Rotate",
            kind: SettingKind::Toggle,
            on_commit: CommitAction::None,
        },
        SettingDescriptor {
            field: SettingField::Degenerate,
            label: "Overlapping Members",
            kind: SettingKind::Choice(&["warn", "reject"]),
            on_commit: CommitAction::Rebuild,
        },
    ];

    /// Half extents of the box described by `x`, `y`, `z`.
    #[inline]
    pub fn half_extents(&self) -> HalfExtents<Real> {
        HalfExtents::from_size(self.x, self.y, self.z)
    }

    #[inline]
    pub fn joist_params(&self) -> JoistParams<Real> {
        JoistParams::new(self.joist_count, self.member_width, self.member_depth)
            .with_inset_bias(self.inset_bias)
    }

    #[inline]
    pub fn display_mode(&self) -> DisplayMode {
        if self.show_frame {
            DisplayMode::Frame
        } else {
            DisplayMode::Box
        }
    }

    /// The current value of `field`.
    pub fn get(&self, field: SettingField) -> SettingValue {
        match field {
            SettingField::X => SettingValue::Number(self.x),
            SettingField::Y => SettingValue::Number(self.y),
            SettingField::Z => SettingValue::Number(self.z),
            SettingField::ShowFrame => SettingValue::Toggle(self.show_frame),
            SettingField::JoistCount => SettingValue::Integer(self.joist_count),
            SettingField::MemberWidth => SettingValue::Number(self.member_width),
            SettingField::MemberDepth => SettingValue::Number(self.member_depth),
            SettingField::InsetBias => SettingValue::Number(self.inset_bias),
            SettingField::Material => SettingValue::Material(self.material),
            SettingField::Wireframe => SettingValue::Toggle(self.wireframe),
            SettingField::AutoRotate => SettingValue::Toggle(self.auto_rotate),
            SettingField::Degenerate => SettingValue::Policy(self.degenerate),
        }
    }

    /// Check every field against its descriptor, the same way [with_edit](Self::with_edit) checks
    /// a single edit.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`](InvalidArgument::OutOfRange) for the first field, in [SettingField] order,
    /// whose value falls outside its descriptor's range.
    pub fn validate(&self) -> Result<(), Error<Real>> {
        SettingField::ALL
            .iter()
            .try_for_each(|&field| check(field, self.get(field)))
            .map_err(Error::from)
    }

    /// A copy of `self` with `edit` applied, and the action committing it calls for.
    ///
    /// # Errors
    ///
    /// * [`OutOfRange`](InvalidArgument::OutOfRange) if the value falls outside the descriptor's
    ///   range
    /// * [`WrongKind`](InvalidArgument::WrongKind) if the value's type doesn't match the field
    pub fn with_edit(&self, edit: SettingEdit) -> Result<(Self, CommitAction), Error<Real>> {
        let SettingEdit { field, value } = edit;
        check(field, value)?;
        let wrong_kind = || InvalidArgument::WrongKind {
            field,
            given: value.kind_name(),
        };

        let mut res = self.clone();
        match (field, value) {
            (SettingField::X, SettingValue::Number(v)) => res.x = v,
            (SettingField::Y, SettingValue::Number(v)) => res.y = v,
            (SettingField::Z, SettingValue::Number(v)) => res.z = v,
            (SettingField::MemberWidth, SettingValue::Number(v)) => res.member_width = v,
            (SettingField::MemberDepth, SettingValue::Number(v)) => res.member_depth = v,
            (SettingField::InsetBias, SettingValue::Number(v)) => res.inset_bias = v,
            (SettingField::JoistCount, SettingValue::Integer(n)) => res.joist_count = n,
            (SettingField::ShowFrame, SettingValue::Toggle(b)) => res.show_frame = b,
            (SettingField::Wireframe, SettingValue::Toggle(b)) => res.wireframe = b,
            (SettingField::AutoRotate, SettingValue::Toggle(b)) => res.auto_rotate = b,
            (SettingField::Material, SettingValue::Material(m)) => res.material = m,
            (SettingField::Degenerate, SettingValue::Policy(p)) => res.degenerate = p,
            _ => return Err(wrong_kind().into()),
        }
        Ok((res, field.descriptor().on_commit))
    }

    /// Apply `edit` in place. On failure, `self` is left untouched.
    pub fn apply(&mut self, edit: SettingEdit) -> Result<CommitAction, Error<Real>> {
        let (res, action) = self.with_edit(edit)?;
        *self = res;
        Ok(action)
    }
}

/// Whether `value` has the kind `field`'s descriptor expects, and lies within its range.
fn check(field: SettingField, value: SettingValue) -> Result<(), InvalidArgument<Real>> {
    match (&field.descriptor().kind, value) {
        (SettingKind::Number { range, .. }, SettingValue::Number(v)) => {
            if !range.contains(&v) {
                return Err(InvalidArgument::OutOfRange {
                    field,
                    value: v,
                    range: range.clone(),
                });
            }
        }
        (SettingKind::Integer { range }, SettingValue::Integer(n)) => {
            if !range.contains(&n) {
                return Err(InvalidArgument::OutOfRange {
                    field,
                    value: n as Real,
                    range: (*range.start() as Real)..=(*range.end() as Real),
                });
            }
        }
        (SettingKind::Toggle, SettingValue::Toggle(_))
        | (SettingKind::Choice(_), SettingValue::Material(_) | SettingValue::Policy(_)) => {}
        _ => {
            return Err(InvalidArgument::WrongKind {
                field,
                given: value.kind_name(),
            })
        }
    }
    Ok(())
}
