//! Type tags and values
//!
//! Parameters carry one of a closed set of C-flavoured type tags. Values are
//! dynamically typed because the registries mix booleans, integers, floats and
//! strings in a single list.

use crate::error::{ParamError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default value marking a `REAL` C parameter as "not a compile-time constant".
///
/// Such parameters are left out of the constant-binding headers.
pub const NOT_CONSTANT_SENTINEL: f64 = 1e300;

/// Type tag of a registered parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamType {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "REAL")]
    Real,
    #[serde(rename = "char")]
    Char,
    #[serde(rename = "char *")]
    CharPtr,
    #[serde(rename = "#define")]
    Define,
}

impl ParamType {
    /// The tag text, exactly as it appears in registrations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Real => "REAL",
            Self::Char => "char",
            Self::CharPtr => "char *",
            Self::Define => "#define",
        }
    }

    /// The C spelling used in emitted declarations.
    ///
    /// `char` parameters hold strings, so they are declared as `char *`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::parameters::ParamType;
    ///
    /// assert_eq!(ParamType::Char.c_type(), "char *");
    /// assert_eq!(ParamType::Real.c_type(), "REAL");
    /// ```
    pub fn c_type(&self) -> &'static str {
        match self {
            Self::Char => "char *",
            other => other.as_str(),
        }
    }

    /// Whether `value` can be held by a parameter of this type
    ///
    /// `REAL` parameters also hold integers and verbatim C text; `#define`
    /// holds anything.
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Self::Define, _) => true,
            (Self::Bool, ParamValue::Bool(_)) => true,
            (Self::Int, ParamValue::Int(_)) => true,
            (Self::Real, ParamValue::Real(_) | ParamValue::Int(_) | ParamValue::Text(_)) => true,
            (Self::Char | Self::CharPtr, ParamValue::Text(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamType {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bool" => Ok(Self::Bool),
            "int" => Ok(Self::Int),
            "REAL" => Ok(Self::Real),
            "char" => Ok(Self::Char),
            "char *" => Ok(Self::CharPtr),
            "#define" => Ok(Self::Define),
            _ => Err(ParamError::UnknownType { tag: s.to_string() }),
        }
    }
}

/// Type part of a lookup query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    /// Matches only records of this type
    Exact(ParamType),

    /// Matches records of any type (`ignoretype`)
    Any,
}

impl TypeFilter {
    /// Whether a stored type passes this filter.
    pub fn accepts(&self, param_type: ParamType) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(t) => *t == param_type,
        }
    }
}

impl From<ParamType> for TypeFilter {
    fn from(t: ParamType) -> Self {
        Self::Exact(t)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("ignoretype"),
            Self::Exact(t) => t.fmt(f),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "ignoretype" {
            Ok(Self::Any)
        } else {
            s.parse().map(Self::Exact)
        }
    }
}

/// A parameter value
///
/// Displays the way C source expects it: `true`/`false`, plain integers, and
/// floats that always carry a fractional part or an exponent. Non-finite
/// floats display as `inf`/`NaN`, which are not C literals; the header
/// generator rejects them as defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl ParamValue {
    /// Whether this is the `REAL` "not a compile-time constant" marker.
    pub fn is_not_constant_sentinel(&self) -> bool {
        matches!(self, Self::Real(v) if *v == NOT_CONSTANT_SENTINEL)
    }

    /// The boolean, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer, if this is an `Int`
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The number as a float; integers are widened
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Real(v) => Some(*v),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The text, if this is a `Text`
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            // Debug keeps the trailing ".0" so C reads the literal as floating point
            Self::Real(v) => write!(f, "{:?}", v),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for ParamValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Assumption attached to the symbol of a C parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Assumption {
    /// The symbol is real-valued
    #[default]
    Real,

    /// The symbol is real-valued and strictly positive
    RealPositive,
}

impl FromStr for Assumption {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Real" => Ok(Self::Real),
            "RealPositive" => Ok(Self::RealPositive),
            _ => Err(ParamError::UnsupportedAssumption(s.to_string())),
        }
    }
}
