//! C header emitters for the runtime parameter struct
//!
//! Every emitter walks the C registry once, in registration order, and skips
//! `#define` entries. The generated headers are meant to be `#include`d:
//!
//! | file                            | content                                        |
//! |---------------------------------|------------------------------------------------|
//! | `declare_Cparameters_struct.h`  | `typedef struct __paramstruct__ {...} paramstruct;` |
//! | `set_Cparameters_default.h`     | `params.<name> = <default>;`                   |
//! | `set_Cparameters.h`             | `const <type> <name> = params-><name>;`        |
//! | `set_Cparameters-nopointer.h`   | `const <type> <name> = params.<name>;`         |
//! | `set_Cparameters-SIMD.h`        | SIMD broadcast of `REAL` constants             |

use crate::error::{ParamError, Result};
use crate::parameters::{ParamRecord, ParamRegistry, ParamType, ParamValue};
use std::fs;
use std::path::{Path, PathBuf};

/// Types allowed in the C registry
pub const SUPPORTED_CTYPES: [ParamType; 5] = [
    ParamType::Bool,
    ParamType::Define,
    ParamType::Char,
    ParamType::Int,
    ParamType::Real,
];

pub const STRUCT_HEADER: &str = "declare_Cparameters_struct.h";
pub const DEFAULTS_HEADER: &str = "set_Cparameters_default.h";
pub const CONSTANTS_HEADER: &str = "set_Cparameters.h";
pub const CONSTANTS_NOPOINTER_HEADER: &str = "set_Cparameters-nopointer.h";
pub const CONSTANTS_SIMD_HEADER: &str = "set_Cparameters-SIMD.h";

/// How the struct is reached in constant-binding code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `params` is a `paramstruct *`
    Pointer,

    /// `params` is a `paramstruct`
    Value,
}

impl Access {
    fn operator(&self) -> &'static str {
        match self {
            Self::Pointer => "->",
            Self::Value => ".",
        }
    }
}

/// Entries that become struct fields
fn fields(cparams: &[ParamRecord]) -> impl Iterator<Item = &ParamRecord> {
    cparams
        .iter()
        .filter(|p| p.param_type != ParamType::Define)
}

/// Generator over a validated C registry
#[derive(Debug, Clone, Copy)]
pub struct CHeaderGenerator<'a> {
    cparams: &'a [ParamRecord],
}

impl<'a> CHeaderGenerator<'a> {
    /// Create a generator, checking that every entry has a C-registry type
    /// and that no default is an infinite or NaN float
    pub fn new(cparams: &'a [ParamRecord]) -> Result<Self> {
        if let Some(bad) = cparams
            .iter()
            .find(|p| !SUPPORTED_CTYPES.contains(&p.param_type))
        {
            return Err(ParamError::UnsupportedType {
                key: bad.key(),
                param_type: bad.param_type,
                supported: "bool, #define, char, int, and REAL",
            });
        }
        if let Some(bad) = cparams
            .iter()
            .find(|p| matches!(p.default, ParamValue::Real(v) if !v.is_finite()))
        {
            return Err(ParamError::InvalidValue {
                key: bad.key(),
                param_type: bad.param_type,
                value: bad.default.to_string(),
                reason: "not representable as a C literal".to_string(),
            });
        }
        Ok(Self { cparams })
    }

    /// The `paramstruct` declaration
    ///
    /// # Examples
    ///
    /// ```
    /// use cparams_rs::codegen::CHeaderGenerator;
    /// use cparams_rs::parameters::{ParamRecord, ParamType};
    ///
    /// let cparams = vec![
    ///     ParamRecord::new(ParamType::Int, "grid", "Nxx0", 64),
    ///     ParamRecord::new(ParamType::Char, "grid", "CoordSystem", "Cartesian"),
    /// ];
    /// let generator = CHeaderGenerator::new(&cparams).unwrap();
    /// assert_eq!(
    ///     generator.declare_struct(),
    ///     "typedef struct __paramstruct__ {\nint Nxx0;\nchar * CoordSystem;\n} paramstruct;\n"
    /// );
    /// ```
    pub fn declare_struct(&self) -> String {
        let mut output = String::from("typedef struct __paramstruct__ {\n");
        for p in fields(self.cparams) {
            output.push_str(&format!("{} {};\n", p.param_type.c_type(), p.name));
        }
        output.push_str("} paramstruct;\n");
        output
    }

    /// Assignments of every field to its declared default
    pub fn set_defaults(&self) -> String {
        let mut output = String::new();
        for p in fields(self.cparams) {
            let value = match (&p.default, p.param_type) {
                (ParamValue::Text(s), ParamType::Char) => format!("\"{}\"", s),
                (v, _) => v.to_string(),
            };
            output.push_str(&format!("params.{} = {};\n", p.name, value));
        }
        output
    }

    /// Local `const` copies of every compile-time-constant field
    ///
    /// `REAL` fields whose default is the `1e300` sentinel are left out.
    pub fn set_constants(&self, access: Access) -> String {
        let mut output = String::new();
        for p in fields(self.cparams) {
            if p.param_type == ParamType::Real && p.default.is_not_constant_sentinel() {
                continue;
            }
            output.push_str(&format!(
                "const {} {} = params{}{};\n",
                p.param_type.c_type(),
                p.name,
                access.operator(),
                p.name
            ));
        }
        output
    }

    /// Like [`set_constants`](Self::set_constants) with pointer access, but
    /// `REAL` constants are broadcast into SIMD registers
    pub fn set_constants_simd(&self) -> String {
        let mut output = String::new();
        for p in fields(self.cparams) {
            if p.default.is_not_constant_sentinel() {
                continue;
            }
            if p.param_type == ParamType::Real {
                output.push_str(&format!(
                    "const REAL            NOSIMD{} = params->{};\n",
                    p.name, p.name
                ));
                output.push_str(&format!(
                    "const REAL_SIMD_ARRAY {} = ConstSIMD(NOSIMD{});\n",
                    p.name, p.name
                ));
            } else {
                output.push_str(&format!(
                    "const {} {} = params->{};\n",
                    p.param_type.c_type(),
                    p.name,
                    p.name
                ));
            }
        }
        output
    }

    /// Write all five headers into `directory`
    ///
    /// # Returns
    ///
    /// The paths written, in the order listed in the module docs
    pub fn write_all<P: AsRef<Path>>(&self, directory: P) -> Result<Vec<PathBuf>> {
        let directory = directory.as_ref();
        let headers = [
            (STRUCT_HEADER, self.declare_struct()),
            (DEFAULTS_HEADER, self.set_defaults()),
            (CONSTANTS_HEADER, self.set_constants(Access::Pointer)),
            (CONSTANTS_NOPOINTER_HEADER, self.set_constants(Access::Value)),
            (CONSTANTS_SIMD_HEADER, self.set_constants_simd()),
        ];

        let mut written = Vec::with_capacity(headers.len());
        for (file_name, contents) in headers {
            let path = directory.join(file_name);
            fs::write(&path, contents)?;
            tracing::info!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

/// Generate the C parameter headers for `registry` into `directory`
pub fn generate_cparameters_ccodes<P: AsRef<Path>>(
    registry: &ParamRegistry,
    directory: P,
) -> Result<Vec<PathBuf>> {
    CHeaderGenerator::new(registry.cparams())?.write_all(directory)
}
