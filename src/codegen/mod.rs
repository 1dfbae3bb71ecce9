//! # C Code Generation
//!
//! Emitters that turn the C runtime registry into the `paramstruct` headers
//! included by generated C code.

pub mod cheader;

pub use cheader::{generate_cparameters_ccodes, Access, CHeaderGenerator};
