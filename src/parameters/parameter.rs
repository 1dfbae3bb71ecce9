//! Parameter records and lookup keys
//!
//! A [`ParamRecord`] is one registry entry: a type tag, the owning module, the
//! parameter name and its declared default. A [`ParamQuery`] addresses records
//! by the same triple, with the type optionally wildcarded.

use crate::parameters::types::{Assumption, ParamType, ParamValue, TypeFilter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamRecord {
    /// Type tag of the parameter
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Name of the module that owns the parameter
    pub module: String,

    /// Name of the parameter
    pub name: String,

    /// Declared default value
    pub default: ParamValue,
}

impl ParamRecord {
    /// Create a new record
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::parameters::{ParamRecord, ParamType, ParamValue};
    ///
    /// let record = ParamRecord::new(ParamType::Int, "grid", "Nxx0", 64);
    /// assert_eq!(record.key(), "grid::Nxx0");
    /// assert_eq!(record.default, ParamValue::Int(64));
    /// ```
    pub fn new(
        param_type: ParamType,
        module: impl Into<String>,
        name: impl Into<String>,
        default: impl Into<ParamValue>,
    ) -> Self {
        Self {
            param_type,
            module: module.into(),
            name: name.into(),
            default: default.into(),
        }
    }

    /// The `module::name` path of this record
    pub fn key(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }
}

/// A lookup key over the general registry
#[derive(Debug, Clone, PartialEq)]
pub struct ParamQuery {
    pub type_filter: TypeFilter,
    pub module: String,
    pub name: String,
}

impl ParamQuery {
    pub fn new(
        type_filter: impl Into<TypeFilter>,
        module: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            type_filter: type_filter.into(),
            module: module.into(),
            name: name.into(),
        }
    }

    /// A query matching records of any type
    pub fn any(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(TypeFilter::Any, module, name)
    }

    /// Whether `record` is addressed by this query
    pub fn matches(&self, record: &ParamRecord) -> bool {
        self.type_filter.accepts(record.param_type)
            && self.module == record.module
            && self.name == record.name
    }
}

impl From<&ParamRecord> for ParamQuery {
    fn from(record: &ParamRecord) -> Self {
        Self::new(record.param_type, record.module.clone(), record.name.clone())
    }
}

impl fmt::Display for ParamQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}::{}", self.type_filter, self.module, self.name)
    }
}

/// Symbol handle for a declared C parameter
///
/// Building expressions from it is the job of the computer-algebra layer; the
/// registry only records the name and the assumption it was declared with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub assumption: Assumption,
}

impl Symbol {
    pub fn new(name: impl Into<String>, assumption: Assumption) -> Self {
        Self {
            name: name.into(),
            assumption,
        }
    }

    /// Whether the symbol is known to be strictly positive
    pub fn is_positive(&self) -> bool {
        self.assumption == Assumption::RealPositive
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
