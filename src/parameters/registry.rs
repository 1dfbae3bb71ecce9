//! Parameter registry implementation
//!
//! This module provides the [`ParamRegistry`], which holds the general
//! parameter list (records plus a parallel list of current values) and the C
//! runtime parameter list that feeds the generated `paramstruct`.

use crate::error::{ParamError, Result};
use crate::parameters::parameter::{ParamQuery, ParamRecord, Symbol};
use crate::parameters::types::{Assumption, ParamType, ParamValue};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{OnceLock, RwLock};

/// Default values handed to [`ParamRegistry::cparameters`]
#[derive(Debug, Clone, PartialEq)]
pub enum Defaults {
    /// One value shared by every name
    Single(ParamValue),

    /// One value per name, in order
    List(Vec<ParamValue>),
}

impl From<ParamValue> for Defaults {
    fn from(v: ParamValue) -> Self {
        Self::Single(v)
    }
}

impl From<f64> for Defaults {
    fn from(v: f64) -> Self {
        Self::Single(v.into())
    }
}

impl From<i64> for Defaults {
    fn from(v: i64) -> Self {
        Self::Single(v.into())
    }
}

impl From<i32> for Defaults {
    fn from(v: i32) -> Self {
        Self::Single(v.into())
    }
}

impl From<bool> for Defaults {
    fn from(v: bool) -> Self {
        Self::Single(v.into())
    }
}

impl From<&str> for Defaults {
    fn from(v: &str) -> Self {
        Self::Single(v.into())
    }
}

impl From<Vec<ParamValue>> for Defaults {
    fn from(v: Vec<ParamValue>) -> Self {
        Self::List(v)
    }
}

impl From<Vec<f64>> for Defaults {
    fn from(v: Vec<f64>) -> Self {
        Self::List(v.into_iter().map(ParamValue::from).collect())
    }
}

/// The general and C parameter registries
///
/// Records are only ever appended. Values of general parameters start at the
/// declared default and are overwritten in place by the string-path setters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParamRegistry {
    /// General parameters, in registration order
    params: Vec<ParamRecord>,

    /// Current values, positionally parallel to `params`
    values: Vec<ParamValue>,

    /// C runtime parameters, in registration order
    cparams: Vec<ParamRecord>,
}

/// Return the single index yielded by `matches`, or fail if there are several.
fn unique_match(
    mut matches: impl Iterator<Item = usize>,
    key: impl FnOnce() -> String,
) -> Result<Option<usize>> {
    let first = matches.next();
    let extra = matches.count();
    if extra > 0 {
        return Err(ParamError::Ambiguous {
            key: key(),
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Split `module::name` into its parts; a bare name has no module.
fn split_path(path: &str) -> (Option<&str>, &str) {
    match path.split_once("::") {
        Some((module, name)) => (Some(module), name),
        None => (None, path),
    }
}

impl ParamRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the process-wide registry (lazy initialized).
    pub fn global() -> &'static RwLock<ParamRegistry> {
        static REGISTRY: OnceLock<RwLock<ParamRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| RwLock::new(ParamRegistry::new()))
    }

    /// Register a general parameter and seed its value with the default
    ///
    /// Registering the same `(type, module, name)` again is a no-op. Reusing a
    /// module and name with a different type is rejected, since it would make
    /// every wildcard lookup of that path ambiguous.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the record was appended, `Ok(false)` if it was already present
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::parameters::{ParamRecord, ParamRegistry, ParamType};
    ///
    /// let mut registry = ParamRegistry::new();
    /// let record = ParamRecord::new(ParamType::Int, "grid", "DIM", 3);
    /// assert!(registry.initialize_param(record.clone()).unwrap());
    /// assert!(!registry.initialize_param(record).unwrap());
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn initialize_param(&mut self, record: ParamRecord) -> Result<bool> {
        let query = ParamQuery::any(record.module.clone(), record.name.clone());
        if let Some(idx) = self.get_params_idx(&query)? {
            let existing = self.params[idx].param_type;
            if existing != record.param_type {
                return Err(ParamError::TypeConflict {
                    key: record.key(),
                    existing,
                    requested: record.param_type,
                });
            }
            tracing::debug!(
                "initialize_param: already initialized parameter {}",
                record.key()
            );
            return Ok(false);
        }

        self.values.push(record.default.clone());
        self.params.push(record);
        Ok(true)
    }

    /// Register a C runtime parameter
    ///
    /// C parameters become fields of one struct, so a name already used by any
    /// module makes this a no-op.
    pub fn initialize_cparam(&mut self, record: ParamRecord) -> bool {
        // Names stay unique here and in snapshots accepted by `from_json`
        if self.cparams.iter().any(|p| p.name == record.name) {
            tracing::debug!(
                "initialize_cparam: already initialized parameter {}",
                record.key()
            );
            return false;
        }
        self.cparams.push(record);
        true
    }

    /// Find the index of the general parameter matching `query`
    ///
    /// # Returns
    ///
    /// `Ok(None)` if nothing matches, or [`ParamError::Ambiguous`] if more than
    /// one record matches
    pub fn get_params_idx(&self, query: &ParamQuery) -> Result<Option<usize>> {
        unique_match(
            self.params
                .iter()
                .enumerate()
                .filter(|(_, p)| query.matches(p))
                .map(|(i, _)| i),
            || query.to_string(),
        )
    }

    /// Find the index of the C parameter called `name`
    pub fn get_cparams_idx(&self, name: &str) -> Result<Option<usize>> {
        unique_match(
            self.cparams
                .iter()
                .enumerate()
                .filter(|(_, p)| p.name == name)
                .map(|(i, _)| i),
            || name.to_string(),
        )
    }

    /// Get the current value of the general parameter matching `query`
    pub fn get_params_value(&self, query: &ParamQuery) -> Result<&ParamValue> {
        match self.get_params_idx(query)? {
            Some(idx) => Ok(&self.values[idx]),
            None => Err(self.not_found(query.to_string())),
        }
    }

    /// Find a general parameter by `module::name` path or bare name
    ///
    /// A module in the path takes precedence over `modname`. Without any module
    /// the match is by name alone, which fails if several modules use it.
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::parameters::{ParamRecord, ParamRegistry, ParamType};
    ///
    /// let mut registry = ParamRegistry::new();
    /// registry
    ///     .initialize_param(ParamRecord::new(ParamType::Int, "grid", "DIM", 3))
    ///     .unwrap();
    ///
    /// assert_eq!(registry.idx_from_str("grid::DIM", None).unwrap(), 0);
    /// assert_eq!(registry.idx_from_str("DIM", Some("grid")).unwrap(), 0);
    /// assert_eq!(registry.idx_from_str("DIM", None).unwrap(), 0);
    /// assert!(registry.idx_from_str("grid::Nxx0", None).is_err());
    /// ```
    pub fn idx_from_str(&self, varname: &str, modname: Option<&str>) -> Result<usize> {
        let (path_module, name) = split_path(varname);
        let module = path_module.or(modname).filter(|m| !m.is_empty());

        let key = match module {
            Some(m) => format!("{}::{}", m, name),
            None => name.to_string(),
        };
        let found = unique_match(
            self.params
                .iter()
                .enumerate()
                .filter(|(_, p)| p.name == name && module.map_or(true, |m| p.module == m))
                .map(|(i, _)| i),
            || key.clone(),
        )?;

        found.ok_or_else(|| self.not_found(key))
    }

    /// Get the current value addressed by a `module::name` path
    pub fn parval_from_str(&self, path: &str) -> Result<&ParamValue> {
        let idx = self.idx_from_str(path, None)?;
        Ok(&self.values[idx])
    }

    /// Overwrite the current value addressed by a `module::name` path
    pub fn set_parval_from_str(&mut self, path: &str, value: impl Into<ParamValue>) -> Result<()> {
        let idx = self.idx_from_str(path, None)?;
        self.values[idx] = value.into();
        Ok(())
    }

    /// Declare C runtime parameters and return their symbols
    ///
    /// # Arguments
    ///
    /// * `param_type` - Type tag shared by all names
    /// * `module` - Owning module
    /// * `names` - Parameter names
    /// * `defaults` - One default for all names, or one per name
    /// * `assumption` - Assumption attached to the returned symbols
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::parameters::{Assumption, ParamRegistry, ParamType};
    ///
    /// let mut registry = ParamRegistry::new();
    /// let kk = registry
    ///     .cparameters(ParamType::Real, "ScalarWave", &["kk0", "kk1", "kk2"], 1.0, Assumption::Real)
    ///     .unwrap();
    /// assert_eq!(kk.len(), 3);
    /// assert_eq!(registry.cparams().len(), 3);
    /// ```
    pub fn cparameters(
        &mut self,
        param_type: ParamType,
        module: &str,
        names: &[&str],
        defaults: impl Into<Defaults>,
        assumption: Assumption,
    ) -> Result<Vec<Symbol>> {
        let defaults = match defaults.into() {
            Defaults::Single(v) => vec![v; names.len()],
            Defaults::List(list) => {
                if list.len() != names.len() {
                    return Err(ParamError::LengthMismatch {
                        names: names.len(),
                        defaults: list.len(),
                    });
                }
                list
            }
        };

        let mut symbols = Vec::with_capacity(names.len());
        for (name, default) in names.iter().zip(defaults) {
            self.initialize_cparam(ParamRecord::new(param_type, module, *name, default));
            symbols.push(Symbol::new(*name, assumption));
        }
        Ok(symbols)
    }

    /// Declare a single C runtime parameter and return its symbol
    pub fn cparameter(
        &mut self,
        param_type: ParamType,
        module: &str,
        name: &str,
        default: impl Into<ParamValue>,
        assumption: Assumption,
    ) -> Result<Symbol> {
        let mut symbols = self.cparameters(
            param_type,
            module,
            &[name],
            Defaults::Single(default.into()),
            assumption,
        )?;
        Ok(symbols.remove(0))
    }

    /// General parameter records, in registration order
    pub fn params(&self) -> &[ParamRecord] {
        &self.params
    }

    /// Current values, parallel to [`params`](Self::params)
    pub fn values(&self) -> &[ParamValue] {
        &self.values
    }

    /// C runtime parameter records, in registration order
    pub fn cparams(&self) -> &[ParamRecord] {
        &self.cparams
    }

    /// Overwrite the value at `idx`, which must come from a lookup on this registry.
    pub(crate) fn set_value_at(&mut self, idx: usize, value: ParamValue) {
        self.values[idx] = value;
    }

    /// Number of general parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if no general parameter is registered
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The `module::name` paths of all general parameters
    pub fn keys(&self) -> Vec<String> {
        self.params.iter().map(ParamRecord::key).collect()
    }

    fn not_found(&self, key: String) -> ParamError {
        ParamError::NotFound {
            key,
            registered: self.keys(),
        }
    }
}

impl ParamRegistry {
    /// Save the registry to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the registry to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a registry from a JSON string
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::parameters::{ParamRegistry, ParamValue};
    ///
    /// let json = r#"{
    ///   "params": [
    ///     { "type": "int", "module": "grid", "name": "DIM", "default": 3 }
    ///   ],
    ///   "values": [3],
    ///   "cparams": [
    ///     { "type": "REAL", "module": "ScalarWave", "name": "wavespeed", "default": 1.0 }
    ///   ]
    /// }"#;
    ///
    /// let registry = ParamRegistry::from_json(json).unwrap();
    /// assert_eq!(registry.parval_from_str("grid::DIM").unwrap(), &ParamValue::Int(3));
    /// assert_eq!(registry.cparams().len(), 1);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let registry: ParamRegistry = serde_json::from_str(json)?;
        registry.check_snapshot()?;
        Ok(registry)
    }

    /// Load a registry from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }

    /// Reject snapshots that the registration methods could never produce
    fn check_snapshot(&self) -> Result<()> {
        let corrupt = |reason: String| Err(ParamError::CorruptSnapshot { reason });

        if self.params.len() != self.values.len() {
            return corrupt(format!(
                "{} parameters but {} values",
                self.params.len(),
                self.values.len()
            ));
        }

        let mut seen = HashSet::new();
        for (record, value) in self.params.iter().zip(&self.values) {
            if !seen.insert((record.module.as_str(), record.name.as_str())) {
                return corrupt(format!("parameter {} is listed twice", record.key()));
            }
            for (what, v) in [("default", &record.default), ("value", value)] {
                if !record.param_type.accepts(v) {
                    return corrupt(format!(
                        "{} parameter {} has {} {:?}",
                        record.param_type,
                        record.key(),
                        what,
                        v
                    ));
                }
            }
        }

        let mut seen = HashSet::new();
        for record in &self.cparams {
            if !seen.insert(record.name.as_str()) {
                return corrupt(format!("C parameter {} is listed twice", record.name));
            }
            if !record.param_type.accepts(&record.default) {
                return corrupt(format!(
                    "{} C parameter {} has default {:?}",
                    record.param_type,
                    record.key(),
                    record.default
                ));
            }
        }
        Ok(())
    }
}
