//! String → primitive coercion for request fields
//!
//! Every bindable field is reached through [`FieldSlot`], implemented for the
//! primitive kinds only. Compound types report [`FieldKind::Unsupported`] so a
//! descriptor that points at one is rejected before any request is served.

use std::fmt;

use thiserror::Error;

/// Primitive kind of a bindable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int,
    Uint,
    Float,
    Bool,
    /// Anything that is not a flat primitive (`Vec<_>`, `Option<_>`, ...)
    Unsupported(&'static str),
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::Uint => write!(f, "uint"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

/// Why a raw string could not be stored in a field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("must be integer")]
    Integer,
    #[error("must be positive integer")]
    PositiveInteger,
    #[error("must be number")]
    Number,
    #[error("must be true or false")]
    Bool,
    #[error("unsupported type: {0}")]
    Unsupported(&'static str),
}

/// Snapshot of a field value, used by the validator
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Unsupported,
}

impl FieldValue<'_> {
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Str(s) => s.is_empty(),
            Self::Int(v) => *v == 0,
            Self::Uint(v) => *v == 0,
            Self::Float(v) => *v == 0.0,
            Self::Bool(v) => !*v,
            Self::Unsupported => true,
        }
    }

    /// Numeric view of the value, `None` for strings and bools
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Uint(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// A field that can be filled from a query-string value.
pub trait FieldSlot {
    fn kind(&self) -> FieldKind;

    fn value(&self) -> FieldValue<'_>;

    /// Parse `raw` and overwrite the field. The field is left untouched on error.
    fn assign(&mut self, raw: &str) -> Result<(), CoercionError>;

    fn is_zero(&self) -> bool {
        self.value().is_zero()
    }
}

/// Coerce `raw` according to `kind`, without a destination.
///
/// Used to check default literals and by callers that only need the parsed value.
pub fn coerce(kind: FieldKind, raw: &str) -> Result<FieldValue<'_>, CoercionError> {
    match kind {
        FieldKind::String => Ok(FieldValue::Str(raw)),
        FieldKind::Int => raw
            .parse::<i64>()
            .map(FieldValue::Int)
            .map_err(|_| CoercionError::Integer),
        FieldKind::Uint => raw
            .parse::<u64>()
            .map(FieldValue::Uint)
            .map_err(|_| CoercionError::PositiveInteger),
        FieldKind::Float => raw
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|_| CoercionError::Number),
        FieldKind::Bool => parse_bool(raw).map(FieldValue::Bool),
        FieldKind::Unsupported(name) => Err(CoercionError::Unsupported(name)),
    }
}

fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionError::Bool),
    }
}

impl FieldSlot for String {
    fn kind(&self) -> FieldKind {
        FieldKind::String
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Str(self.as_str())
    }

    fn assign(&mut self, raw: &str) -> Result<(), CoercionError> {
        raw.clone_into(self);
        Ok(())
    }
}

impl FieldSlot for bool {
    fn kind(&self) -> FieldKind {
        FieldKind::Bool
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }

    fn assign(&mut self, raw: &str) -> Result<(), CoercionError> {
        *self = parse_bool(raw)?;
        Ok(())
    }
}

macro_rules! int_slot {
    ($($ty:ty),*) => {$(
        impl FieldSlot for $ty {
            fn kind(&self) -> FieldKind {
                FieldKind::Int
            }

            fn value(&self) -> FieldValue<'_> {
                FieldValue::Int(*self as i64)
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoercionError> {
                *self = raw.parse::<$ty>().map_err(|_| CoercionError::Integer)?;
                Ok(())
            }
        }
    )*};
}

macro_rules! uint_slot {
    ($($ty:ty),*) => {$(
        impl FieldSlot for $ty {
            fn kind(&self) -> FieldKind {
                FieldKind::Uint
            }

            fn value(&self) -> FieldValue<'_> {
                FieldValue::Uint(*self as u64)
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoercionError> {
                *self = raw.parse::<$ty>().map_err(|_| CoercionError::PositiveInteger)?;
                Ok(())
            }
        }
    )*};
}

macro_rules! float_slot {
    ($($ty:ty => $widen:expr),*) => {$(
        impl FieldSlot for $ty {
            fn kind(&self) -> FieldKind {
                FieldKind::Float
            }

            fn value(&self) -> FieldValue<'_> {
                FieldValue::Float($widen(*self))
            }

            fn assign(&mut self, raw: &str) -> Result<(), CoercionError> {
                *self = raw.parse::<$ty>().map_err(|_| CoercionError::Number)?;
                Ok(())
            }
        }
    )*};
}

/// Widen through the shortest decimal form, so `0.1f32` compares equal to
/// the bound `0.1` instead of `0.10000000149011612`.
fn widen_f32(v: f32) -> f64 {
    v.to_string().parse().unwrap_or(f64::from(v))
}

int_slot!(i8, i16, i32, i64, isize);
uint_slot!(u8, u16, u32, u64, usize);
float_slot!(f32 => widen_f32, f64 => std::convert::identity);

impl<T> FieldSlot for Vec<T> {
    fn kind(&self) -> FieldKind {
        FieldKind::Unsupported("slice")
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Unsupported
    }

    fn assign(&mut self, _raw: &str) -> Result<(), CoercionError> {
        Err(CoercionError::Unsupported("slice"))
    }
}

impl<T> FieldSlot for Option<T> {
    fn kind(&self) -> FieldKind {
        FieldKind::Unsupported("option")
    }

    fn value(&self) -> FieldValue<'_> {
        FieldValue::Unsupported
    }

    fn assign(&mut self, _raw: &str) -> Result<(), CoercionError> {
        Err(CoercionError::Unsupported("option"))
    }
}

// ── Tests ──────────────────────────────────────────────────────
