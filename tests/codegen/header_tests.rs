//! Integration tests for the generated C headers
//!
//! These tests generate the headers for a realistic registry and check the
//! files that the C build includes.

use crate::test_helpers::scalar_wave_registry;
use cparams_rs::codegen::cheader::{
    CONSTANTS_HEADER, CONSTANTS_NOPOINTER_HEADER, CONSTANTS_SIMD_HEADER, DEFAULTS_HEADER,
    STRUCT_HEADER,
};
use cparams_rs::codegen::{Access, CHeaderGenerator};
use cparams_rs::generate_cparameters_ccodes;
use cparams_rs::parameters::{Assumption, ParamRegistry, ParamType};
use cparams_rs::ParamError;
use std::fs;

#[test]
fn test_generate_writes_all_headers() {
    let dir = tempfile::tempdir().unwrap();
    let registry = scalar_wave_registry();

    let written = generate_cparameters_ccodes(&registry, dir.path()).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            STRUCT_HEADER,
            DEFAULTS_HEADER,
            CONSTANTS_HEADER,
            CONSTANTS_NOPOINTER_HEADER,
            CONSTANTS_SIMD_HEADER
        ]
    );

    let generator = CHeaderGenerator::new(registry.cparams()).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join(STRUCT_HEADER)).unwrap(),
        generator.declare_struct()
    );
    assert_eq!(
        fs::read_to_string(dir.path().join(CONSTANTS_NOPOINTER_HEADER)).unwrap(),
        generator.set_constants(Access::Value)
    );
}

#[test]
fn test_struct_header_contents() {
    let registry = scalar_wave_registry();
    let out = CHeaderGenerator::new(registry.cparams())
        .unwrap()
        .declare_struct();

    assert!(out.starts_with("typedef struct __paramstruct__ {\n"));
    assert!(out.ends_with("} paramstruct;\n"));
    // Eleven fields; NGHOSTS is a #define
    assert_eq!(out.lines().count(), 13);
    assert!(!out.contains("NGHOSTS"));
}

#[test]
fn test_time_is_not_bound_as_constant() {
    let registry = scalar_wave_registry();
    let generator = CHeaderGenerator::new(registry.cparams()).unwrap();

    assert!(generator.set_defaults().contains("params.time = 1e300;\n"));
    assert!(!generator.set_constants(Access::Pointer).contains("time"));
    assert!(!generator.set_constants_simd().contains("time"));
}

#[test]
fn test_simd_header_broadcasts_reals_only() {
    let registry = scalar_wave_registry();
    let out = CHeaderGenerator::new(registry.cparams())
        .unwrap()
        .set_constants_simd();

    assert!(out.contains("const REAL_SIMD_ARRAY wavespeed = ConstSIMD(NOSIMDwavespeed);\n"));
    assert!(out.contains("const REAL            NOSIMDinvdx2 = params->invdx2;\n"));
    assert!(out.contains("const int Nxx1 = params->Nxx1;\n"));
    assert!(!out.contains("NOSIMDNxx1"));
}

#[test]
fn test_generate_rejects_char_pointer_cparam() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = ParamRegistry::new();
    registry
        .cparameter(ParamType::CharPtr, "outputC", "outfile", "out.txt", Assumption::Real)
        .unwrap();

    assert!(matches!(
        generate_cparameters_ccodes(&registry, dir.path()),
        Err(ParamError::UnsupportedType { .. })
    ));
    assert!(!dir.path().join(STRUCT_HEADER).exists());
}

#[test]
fn test_generate_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let registry = scalar_wave_registry();
    assert!(matches!(
        generate_cparameters_ccodes(&registry, dir.path().join("missing")),
        Err(ParamError::Io(_))
    ));
}
