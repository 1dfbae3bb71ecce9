//! # cparams-rs
//!
//! `cparams-rs` keeps the parameter tables of a symbolic code-generation
//! framework and writes the C headers that carry runtime parameters into the
//! generated code.
//!
//! The library provides:
//! - A general registry of code-generation parameters with overridable values
//! - A registry of C runtime parameters that become fields of `paramstruct`
//! - A `module::name=value` parser shared by parameter files and command-line overrides
//! - Emitters for the struct declaration, default initializers and constant bindings
//!
//! ## Basic Usage
//!
//! ```
//! use cparams_rs::codegen::{Access, CHeaderGenerator};
//! use cparams_rs::parameters::{Assumption, ParamRegistry, ParamType};
//!
//! let mut registry = ParamRegistry::new();
//! registry
//!     .cparameters(ParamType::Real, "ScalarWave", &["wavespeed", "kk0"], 1.0, Assumption::Real)
//!     .unwrap();
//!
//! let generator = CHeaderGenerator::new(registry.cparams()).unwrap();
//! assert!(generator.declare_struct().contains("REAL wavespeed;"));
//! assert!(generator
//!     .set_constants(Access::Pointer)
//!     .contains("const REAL kk0 = params->kk0;"));
//! ```

// Public modules
pub mod error;

// Parameter system
pub mod parameters;

// C header generation
pub mod codegen;

// Snapshot-to-headers pipeline
pub mod driver;

// Re-exports for convenience
pub use codegen::generate_cparameters_ccodes;
pub use driver::{generate, GenerateOptions};
pub use error::{ParamError, Result};
pub use parameters::ParamRegistry;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
