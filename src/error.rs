use crate::parameters::types::ParamType;
use thiserror::Error;

/// Error types for the cparams-rs library.
#[derive(Error, Debug)]
pub enum ParamError {
    /// No registered parameter matches the lookup key.
    #[error("could not find a parameter matching \"{key}\" (registered: {})", .registered.join(", "))]
    NotFound { key: String, registered: Vec<String> },

    /// An assignment named a parameter that is not registered.
    #[error("when parsing {origin}: could not find parameter \"{name}\" in \"{module}\" module")]
    UnknownParameter {
        origin: String,
        module: String,
        name: String,
    },

    /// More than one registered parameter matches the lookup key.
    #[error("found {count} parameters matching \"{key}\"; qualify the lookup with a module and type")]
    Ambiguous { key: String, count: usize },

    /// A parameter with the same module and name is already registered with another type.
    #[error("parameter \"{key}\" is already registered as \"{existing}\", cannot re-register as \"{requested}\"")]
    TypeConflict {
        key: String,
        existing: ParamType,
        requested: ParamType,
    },

    /// A parameter assignment does not follow `module::name=value`.
    #[error("{message}")]
    Syntax { message: String },

    /// The assigned text cannot be coerced to the parameter's type.
    #[error("invalid value \"{value}\" for {param_type} parameter \"{key}\": {reason}")]
    InvalidValue {
        key: String,
        param_type: ParamType,
        value: String,
        reason: String,
    },

    /// The parameter's type cannot be used in this context.
    #[error("parameter \"{key}\" has unsupported type \"{param_type}\"; supported types include: {supported}")]
    UnsupportedType {
        key: String,
        param_type: ParamType,
        supported: &'static str,
    },

    /// A type tag outside the closed set of parameter types.
    #[error("unknown parameter type tag \"{tag}\"")]
    UnknownType { tag: String },

    /// An assumption name outside `Real` and `RealPositive`.
    #[error("assumption \"{0}\" not supported")]
    UnsupportedAssumption(String),

    /// A per-name default list does not line up with the names.
    #[error("was provided {names} parameter names but {defaults} default values")]
    LengthMismatch { names: usize, defaults: usize },

    /// A registry snapshot that breaks a registry invariant.
    #[error("corrupt registry snapshot: {reason}")]
    CorruptSnapshot { reason: String },

    /// The main-module parameter was assigned before being registered.
    #[error("NRPy::MainModule is uninitialized")]
    MainModuleUninitialized,

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for cparams-rs operations.
pub type Result<T> = std::result::Result<T, ParamError>;
