//! Integration tests for parameter files and command-line assignments

use crate::test_helpers::scalar_wave_registry;
use cparams_rs::parameters::{AssignMode, ParamValue};
use cparams_rs::ParamError;
use std::fs;

const PARAM_FILE: &str = "\
# Scalar wave run
NRPy::MainModule = ScalarWave

grid::DIM = 2                                 # planar run
finite_difference::FD_CENTDERIVS_ORDER = 6
MoLtimestepping::enable_SIMD = True
MoLtimestepping::RK_method = RK3 Heun
";

#[test]
fn test_apply_param_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scalarwave.par");
    fs::write(&path, PARAM_FILE).unwrap();

    let mut registry = scalar_wave_registry();
    let processed = registry.apply_param_file(&path, AssignMode::Normal).unwrap();
    assert_eq!(processed, 6);

    assert_eq!(registry.parval_from_str("grid::DIM").unwrap(), &ParamValue::Int(2));
    assert_eq!(
        registry
            .parval_from_str("finite_difference::FD_CENTDERIVS_ORDER")
            .unwrap(),
        &ParamValue::Int(6)
    );
    assert_eq!(
        registry.parval_from_str("MoLtimestepping::enable_SIMD").unwrap(),
        &ParamValue::Bool(true)
    );
    assert_eq!(
        registry.parval_from_str("MoLtimestepping::RK_method").unwrap(),
        &ParamValue::from("RK3 Heun")
    );
}

#[test]
fn test_find_main_module_pass() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bssn.par");
    fs::write(&path, "grid::DIM = 2\nNRPy::MainModule = BSSN\n").unwrap();

    let mut registry = scalar_wave_registry();
    registry
        .apply_param_file(&path, AssignMode::FindMainModule)
        .unwrap();

    assert_eq!(
        registry.parval_from_str("NRPy::MainModule").unwrap(),
        &ParamValue::from("BSSN")
    );
    assert_eq!(registry.parval_from_str("grid::DIM").unwrap(), &ParamValue::Int(3));
}

#[test]
fn test_param_file_errors_name_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.par");
    fs::write(&path, "grid::DIM = 2\n\nMoLtimestepping::enable_SIMD = yes\n").unwrap();

    let mut registry = scalar_wave_registry();
    let err = registry
        .apply_param_file(&path, AssignMode::Normal)
        .unwrap_err();
    match err {
        ParamError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "MoLtimestepping::enable_SIMD");
            assert_eq!(value, "yes");
        }
        other => panic!("Expected InvalidValue, got {:?}", other),
    }

    fs::write(&path, "grid::DIM = 2\n\ngrid::Nxx = 2\n").unwrap();
    let err = registry
        .apply_param_file(&path, AssignMode::Normal)
        .unwrap_err()
        .to_string();
    assert!(err.contains("line 3 of parameter file"));
}

#[test]
fn test_missing_param_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = scalar_wave_registry();
    assert!(matches!(
        registry.apply_param_file(dir.path().join("absent.par"), AssignMode::Normal),
        Err(ParamError::Io(_))
    ));
}

#[test]
fn test_command_line_overrides_stop_at_first_error() {
    let mut registry = scalar_wave_registry();
    let result = registry.apply_command_line(
        ["grid::DIM=1", "grid::DIM 2", "finite_difference::FD_CENTDERIVS_ORDER=8"],
        AssignMode::Normal,
    );

    assert!(matches!(result, Err(ParamError::Syntax { .. })));
    assert_eq!(registry.parval_from_str("grid::DIM").unwrap(), &ParamValue::Int(1));
    assert_eq!(
        registry
            .parval_from_str("finite_difference::FD_CENTDERIVS_ORDER")
            .unwrap(),
        &ParamValue::Int(4)
    );
}
