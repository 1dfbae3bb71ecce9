//! # Parameter System
//!
//! This module provides the two parameter registries used during code generation.
//!
//! ## Key Features
//!
//! - **General Parameters**: Typed records with a declared default and an overridable current value
//! - **C Runtime Parameters**: Records that become fields of the generated `paramstruct`
//! - **Lookup**: Match by `(type, module, name)` with an `ignoretype` wildcard and ambiguity detection
//! - **String Assignments**: `module::name=value` lines from parameter files and the command line
//! - **Serialization Support**: Save and load registry snapshots with serde
//!
//! ## Example Usage
//!
//! ```rust
//! use cparams_rs::parameters::{
//!     AssignMode, Assumption, ParamRecord, ParamRegistry, ParamType, ParamValue,
//! };
//!
//! let mut registry = ParamRegistry::new();
//!
//! // Code-generation parameters
//! registry
//!     .initialize_param(ParamRecord::new(ParamType::Int, "finite_difference", "FD_CENTDERIVS_ORDER", 4))
//!     .unwrap();
//!
//! // C runtime parameters
//! let wavespeed = registry
//!     .cparameter(ParamType::Real, "ScalarWave", "wavespeed", 1.0, Assumption::Real)
//!     .unwrap();
//! assert_eq!(wavespeed.name, "wavespeed");
//!
//! // Command-line override
//! registry
//!     .apply_command_line(["finite_difference::FD_CENTDERIVS_ORDER=8"], AssignMode::Normal)
//!     .unwrap();
//! assert_eq!(
//!     registry.parval_from_str("finite_difference::FD_CENTDERIVS_ORDER").unwrap(),
//!     &ParamValue::Int(8)
//! );
//! ```

pub mod assignment;
pub mod parameter;
pub mod registry;
pub mod types;


// Re-export key types
pub use assignment::{AssignMode, Origin, ParamAssignment};
pub use parameter::{ParamQuery, ParamRecord, Symbol};
pub use registry::{Defaults, ParamRegistry};
pub use types::{Assumption, ParamType, ParamValue, TypeFilter, NOT_CONSTANT_SENTINEL};
