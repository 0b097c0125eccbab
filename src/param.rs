//! Dynamic argument value type.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A dynamically typed argument value.
///
/// Use this as the candidate value type when a target function takes
/// arguments of mixed types. Targets with uniform argument types can use
/// their own type directly (for example `Candidate<Vec<f64>>`).
///
/// # Examples
///
/// ```
/// use evo_optimizer::ParamValue;
///
/// let lr = ParamValue::from(0.01);
/// let layers = ParamValue::from(3_i64);
/// assert_eq!(lr.as_float(), Some(0.01));
/// assert_eq!(layers.as_int(), Some(3));
/// assert_eq!(layers.as_float(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamValue {
    /// A floating-point value.
    Float(f64),
    /// An integer value.
    Int(i64),
    /// A boolean flag.
    Bool(bool),
    /// A string value.
    Str(String),
    /// An ordered list of values.
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Returns the float, if this is a `Float`.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the flag, if this is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the list elements, if this is a `List`.
    #[must_use]
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to the float, for in-place perturbation.
    pub fn as_float_mut(&mut self) -> Option<&mut f64> {
        match self {
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to the integer, for in-place perturbation.
    pub fn as_int_mut(&mut self) -> Option<&mut i64> {
        match self {
            ParamValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to the list elements.
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<ParamValue>> {
        match self {
            ParamValue::List(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Str(v) => write!(f, "{v:?}"),
            ParamValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::List(v.into_iter().map(Into::into).collect())
    }
}
