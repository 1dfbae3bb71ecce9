//! Integration tests for the ParamRegistry
//!
//! These tests verify registration, lookup and ambiguity handling.

use crate::test_helpers::scalar_wave_registry;
use approx::assert_relative_eq;
use cparams_rs::parameters::{ParamQuery, ParamRecord, ParamRegistry, ParamType, ParamValue};
use cparams_rs::ParamError;

#[test]
fn test_registry_basic_operations() {
    let registry = scalar_wave_registry();

    assert_eq!(registry.len(), 5);
    assert_eq!(registry.values().len(), registry.params().len());
    assert_eq!(registry.cparams().len(), 12);

    let keys = registry.keys();
    assert_eq!(keys[0], "NRPy::MainModule");
    assert!(keys.contains(&"MoLtimestepping::RK_method".to_string()));

    let value = registry
        .get_params_value(&ParamQuery::new(ParamType::Bool, "MoLtimestepping", "enable_SIMD"))
        .unwrap();
    assert_eq!(value.as_bool(), Some(false));
}

#[test]
fn test_registration_order_is_kept() {
    let registry = scalar_wave_registry();
    let names: Vec<&str> = registry.cparams().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "time", "wavespeed", "kk0", "kk1", "kk2", "Nxx0", "Nxx1", "Nxx2", "invdx0", "invdx1",
            "invdx2", "NGHOSTS"
        ]
    );
}

#[test]
fn test_c_defaults() {
    let registry = scalar_wave_registry();
    let idx = registry.get_cparams_idx("wavespeed").unwrap().unwrap();
    assert_relative_eq!(registry.cparams()[idx].default.as_real().unwrap(), 1.0);

    let idx = registry.get_cparams_idx("time").unwrap().unwrap();
    assert!(registry.cparams()[idx].default.is_not_constant_sentinel());
}

#[test]
fn test_ambiguous_bare_name() {
    let mut registry = ParamRegistry::new();
    registry
        .initialize_param(ParamRecord::new(ParamType::Int, "grid", "DIM", 3))
        .unwrap();
    registry
        .initialize_param(ParamRecord::new(ParamType::Int, "reference_metric", "DIM", 3))
        .unwrap();

    match registry.parval_from_str("DIM") {
        Err(ParamError::Ambiguous { key, count }) => {
            assert_eq!(key, "DIM");
            assert_eq!(count, 2);
        }
        other => panic!("Expected Ambiguous, got {:?}", other),
    }

    registry.set_parval_from_str("reference_metric::DIM", 2).unwrap();
    assert_eq!(registry.parval_from_str("grid::DIM").unwrap(), &ParamValue::Int(3));
    assert_eq!(
        registry.parval_from_str("reference_metric::DIM").unwrap(),
        &ParamValue::Int(2)
    );
}

#[test]
fn test_unknown_parameter() {
    let mut registry = scalar_wave_registry();
    assert!(matches!(
        registry.set_parval_from_str("grid::Nxx0", 32),
        Err(ParamError::NotFound { .. })
    ));
    assert_eq!(
        registry
            .get_params_idx(&ParamQuery::any("grid", "Nxx0"))
            .unwrap(),
        None
    );
}

#[test]
fn test_global_registry() {
    {
        let mut registry = ParamRegistry::global().write().unwrap();
        registry
            .initialize_param(ParamRecord::new(ParamType::Int, "global_test", "counter", 1))
            .unwrap();
    }

    let registry = ParamRegistry::global().read().unwrap();
    assert_eq!(
        registry.parval_from_str("global_test::counter").unwrap(),
        &ParamValue::Int(1)
    );
}

#[test]
fn test_snapshot_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");

    let registry = scalar_wave_registry();
    registry.save_json(&path).unwrap();

    let loaded = ParamRegistry::load_json(&path).unwrap();
    assert_eq!(loaded.params(), registry.params());
    assert_eq!(loaded.cparams(), registry.cparams());
}
