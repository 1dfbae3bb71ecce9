//! `module::name=value` assignments
//!
//! Parameter files and command-line overrides share one line grammar:
//!
//! ```text
//! module::name = value   # optional trailing comment
//! ```
//!
//! Whitespace around each component is ignored and a line whose first
//! non-blank character is `#` is a comment. Assignments are coerced to the
//! stored type of the addressed parameter before they are written.

use crate::error::{ParamError, Result};
use crate::parameters::parameter::{ParamQuery, ParamRecord};
use crate::parameters::registry::ParamRegistry;
use crate::parameters::types::{ParamType, ParamValue};
use nom::{
    bytes::complete::{tag, take_till, take_until},
    character::complete::char,
    combinator::{opt, rest},
    sequence::{preceded, terminated},
    IResult, Parser,
};
use std::fmt;
use std::path::Path;

/// Module of the main-module parameter
pub const MAIN_MODULE_MODULE: &str = "NRPy";

/// Name of the main-module parameter
pub const MAIN_MODULE_NAME: &str = "MainModule";

/// Default main module
pub const DEFAULT_MAIN_MODULE: &str = "ScalarWave";

/// Where an assignment line came from, for error messages
#[derive(Debug, Clone, Copy)]
pub enum Origin<'a> {
    /// A line of a parameter file (1-based line number)
    ParamFile { path: &'a Path, line: usize },

    /// A command-line token
    CommandLine,
}

impl fmt::Display for Origin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParamFile { path, line } => {
                write!(f, "line {} of parameter file \"{}\"", line, path.display())
            }
            Self::CommandLine => f.write_str("command-line argument"),
        }
    }
}

/// How assignments are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignMode {
    /// Every assignment updates its parameter
    #[default]
    Normal,

    /// Only `NRPy::MainModule` is applied; everything else is skipped
    FindMainModule,
}

/// A parsed `module::name=value` assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamAssignment {
    pub module: String,
    pub name: String,
    pub value: String,
}

/// Split an assignment into its raw (untrimmed) module, name and value.
fn assignment(input: &str) -> IResult<&str, (&str, &str, &str)> {
    (
        terminated(take_until("::"), tag("::")),
        terminated(take_till(|c: char| c == '='), char('=')),
        terminated(take_till(|c: char| c == '#'), opt(preceded(char('#'), rest))),
    )
        .parse(input)
}

fn syntax_error(line: &str, origin: &Origin<'_>) -> ParamError {
    let message = match origin {
        Origin::ParamFile { .. } => format!(
            "{} (\"{}\") is not in the form \"module::variable = value\"",
            origin,
            line.trim()
        ),
        Origin::CommandLine => format!(
            "the command-line argument \"{}\" is not in the form \"module::variable=value\" (no spaces allowed)",
            line.trim()
        ),
    };
    ParamError::Syntax { message }
}

impl ParamAssignment {
    /// Parse one line
    ///
    /// # Returns
    ///
    /// `Ok(None)` for a comment line, the assignment otherwise, or
    /// [`ParamError::Syntax`] if the line does not follow the grammar
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::parameters::{Origin, ParamAssignment};
    ///
    /// let a = ParamAssignment::parse("  grid::DIM = 2  # two dimensions", &Origin::CommandLine)
    ///     .unwrap()
    ///     .unwrap();
    /// assert_eq!((a.module.as_str(), a.name.as_str(), a.value.as_str()), ("grid", "DIM", "2"));
    ///
    /// assert!(ParamAssignment::parse("# just a comment", &Origin::CommandLine).unwrap().is_none());
    /// assert!(ParamAssignment::parse("DIM=2", &Origin::CommandLine).is_err());
    /// ```
    pub fn parse(line: &str, origin: &Origin<'_>) -> Result<Option<Self>> {
        let stripped = line.trim();
        if stripped.starts_with('#') {
            return Ok(None);
        }

        let (module, name, value) = match assignment(stripped) {
            Ok((_, parts)) => parts,
            Err(_) => return Err(syntax_error(line, origin)),
        };

        let (module, name) = (module.trim(), name.trim());
        if module.is_empty() || name.is_empty() {
            return Err(syntax_error(line, origin));
        }

        Ok(Some(Self {
            module: module.to_string(),
            name: name.to_string(),
            value: value.trim().to_string(),
        }))
    }

    /// The `module::name` path being assigned
    pub fn key(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }

    fn is_main_module(&self) -> bool {
        self.module == MAIN_MODULE_MODULE && self.name == MAIN_MODULE_NAME
    }
}

/// Convert assignment text to a value of the record's type.
fn coerce(record: &ParamRecord, text: &str) -> Result<ParamValue> {
    let invalid = |reason: &str| ParamError::InvalidValue {
        key: record.key(),
        param_type: record.param_type,
        value: text.to_string(),
        reason: reason.to_string(),
    };

    match record.param_type {
        ParamType::Bool => match text {
            "True" => Ok(ParamValue::Bool(true)),
            "False" => Ok(ParamValue::Bool(false)),
            _ => Err(invalid("\"bool\" type can only take values of \"True\" or \"False\"")),
        },
        ParamType::Int => text
            .parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|e| invalid(&e.to_string())),
        // Passed through verbatim; they end up as C source text
        ParamType::Real | ParamType::Char | ParamType::CharPtr => {
            Ok(ParamValue::Text(text.to_string()))
        }
        ParamType::Define => Err(ParamError::UnsupportedType {
            key: record.key(),
            param_type: record.param_type,
            supported: "bool, int, REAL, char, and char *",
        }),
    }
}

impl ParamRegistry {
    /// Register the `NRPy::MainModule` parameter
    pub fn register_main_module(&mut self) -> Result<bool> {
        self.initialize_param(ParamRecord::new(
            ParamType::Char,
            MAIN_MODULE_MODULE,
            MAIN_MODULE_NAME,
            DEFAULT_MAIN_MODULE,
        ))
    }

    /// Parse one assignment line and apply it
    ///
    /// # Arguments
    ///
    /// * `line` - A parameter-file line or a command-line token
    /// * `origin` - Where the line came from, used in error messages
    /// * `mode` - Whether to apply every assignment or only the main module
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::parameters::{AssignMode, Origin, ParamRecord, ParamRegistry, ParamType, ParamValue};
    ///
    /// let mut registry = ParamRegistry::new();
    /// registry
    ///     .initialize_param(ParamRecord::new(ParamType::Bool, "MoL", "enable_SIMD", true))
    ///     .unwrap();
    ///
    /// registry
    ///     .set_paramsvals_value("MoL::enable_SIMD=False", &Origin::CommandLine, AssignMode::Normal)
    ///     .unwrap();
    /// assert_eq!(registry.parval_from_str("MoL::enable_SIMD").unwrap(), &ParamValue::Bool(false));
    /// ```
    pub fn set_paramsvals_value(
        &mut self,
        line: &str,
        origin: &Origin<'_>,
        mode: AssignMode,
    ) -> Result<()> {
        let assignment = match ParamAssignment::parse(line, origin)? {
            Some(a) => a,
            None => {
                tracing::debug!("skipping comment: {}", line.trim());
                return Ok(());
            }
        };

        match mode {
            AssignMode::Normal => {
                let query = ParamQuery::any(assignment.module.clone(), assignment.name.clone());
                let idx = self.get_params_idx(&query)?.ok_or_else(|| {
                    ParamError::UnknownParameter {
                        origin: origin.to_string(),
                        module: assignment.module.clone(),
                        name: assignment.name.clone(),
                    }
                })?;

                let value = coerce(&self.params()[idx], &assignment.value)?;
                tracing::debug!("{} = {}", assignment.key(), value);
                self.set_value_at(idx, value);
            }
            AssignMode::FindMainModule => {
                if !assignment.is_main_module() {
                    return Ok(());
                }
                let query = ParamQuery::any(MAIN_MODULE_MODULE, MAIN_MODULE_NAME);
                let idx = self
                    .get_params_idx(&query)?
                    .ok_or(ParamError::MainModuleUninitialized)?;
                tracing::info!("main module set to {}", assignment.value);
                self.set_value_at(idx, ParamValue::Text(assignment.value));
            }
        }
        Ok(())
    }

    /// Apply every line of a parameter file
    ///
    /// Blank lines are skipped.
    ///
    /// # Returns
    ///
    /// The number of non-blank lines processed, comments included
    pub fn apply_param_file<P: AsRef<Path>>(&mut self, path: P, mode: AssignMode) -> Result<usize> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let mut processed = 0;
        for (i, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let origin = Origin::ParamFile { path, line: i + 1 };
            self.set_paramsvals_value(line, &origin, mode)?;
            processed += 1;
        }
        tracing::debug!("applied {} lines from {}", processed, path.display());
        Ok(processed)
    }

    /// Apply command-line assignment tokens in order
    pub fn apply_command_line<I, S>(&mut self, args: I, mode: AssignMode) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.set_paramsvals_value(arg.as_ref(), &Origin::CommandLine, mode)?;
        }
        Ok(())
    }
}
