//! Snapshot-to-headers pipeline behind the `cparamgen` binary
//!
//! A run loads a registry snapshot, resolves the main module from the
//! parameter file, applies the file, applies the command-line overrides, and
//! writes the headers. Overrides are applied last, so they win over the file.

use crate::codegen::CHeaderGenerator;
use crate::error::Result;
use crate::parameters::{AssignMode, ParamRegistry};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// JSON registry snapshot
    pub registry: PathBuf,

    /// Parameter file with `module::name = value` lines
    pub param_file: Option<PathBuf>,

    /// `module::name=value` overrides
    pub overrides: Vec<String>,

    /// Directory receiving the headers; created if missing
    pub out: PathBuf,
}

impl GenerateOptions {
    /// Options for a snapshot with no parameter file or overrides
    pub fn new(registry: impl Into<PathBuf>, out: impl Into<PathBuf>) -> Self {
        Self {
            registry: registry.into(),
            param_file: None,
            overrides: Vec::new(),
            out: out.into(),
        }
    }
}

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct Generated {
    /// Registry after every assignment was applied
    pub registry: ParamRegistry,

    /// Header paths, in the order [`CHeaderGenerator::write_all`] writes them
    pub headers: Vec<PathBuf>,
}

/// Apply a parameter file and then command-line overrides to `registry`
///
/// The file is read twice: first only for `NRPy::MainModule`, then for every
/// other assignment.
pub fn apply_assignments<S: AsRef<str>>(
    registry: &mut ParamRegistry,
    param_file: Option<&Path>,
    overrides: &[S],
) -> Result<()> {
    if let Some(path) = param_file {
        registry.apply_param_file(path, AssignMode::FindMainModule)?;
        registry.apply_param_file(path, AssignMode::Normal)?;
    }
    registry.apply_command_line(overrides, AssignMode::Normal)
}

/// Run the whole pipeline described by `options`
pub fn generate(options: &GenerateOptions) -> Result<Generated> {
    let mut registry = ParamRegistry::load_json(&options.registry)?;
    apply_assignments(
        &mut registry,
        options.param_file.as_deref(),
        options.overrides.as_slice(),
    )?;

    fs::create_dir_all(&options.out)?;
    let headers = CHeaderGenerator::new(registry.cparams())?.write_all(&options.out)?;
    Ok(Generated { registry, headers })
}

/// One `module::name = value` line per general parameter, in registration order
pub fn dump_values(registry: &ParamRegistry) -> String {
    registry
        .params()
        .iter()
        .zip(registry.values())
        .map(|(record, value)| format!("{} = {}\n", record.key(), value))
        .collect()
}
