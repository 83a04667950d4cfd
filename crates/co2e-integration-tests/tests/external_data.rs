//! Externalized factor data behaves exactly like the built-in dataset:
//! same tier ordering, same normalization, same error hints. Only the
//! data source differs.

use co2e_core::engine::Engine;
use co2e_core::error::CalcError;
use co2e_core::table::{Confidence, Tier};
use co2e_data::{builtin_engine, load_factor_table};
use std::fs;
use std::path::{Path, PathBuf};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "co2e_integration_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

/// A subset of the built-in dataset, exported to RON. Values duplicated
/// on purpose: the point is that loading them back resolves identically.
const RON_SUBSET: &str = r#"[
    (
        name: "electricity",
        defaults: [("kwh", 0.475), ("mwh", 475.0)],
        subcategories: [
            (name: "coal", factors: [("kwh", 0.950), ("mwh", 950.0)]),
            (name: "wind", factors: [("kwh", 0.011), ("mwh", 11.0)]),
        ],
        generic: [("kwh", 0.475), ("mwh", 475.0)],
    ),
    (
        name: "travel",
        subcategories: [
            (name: "car_electric", factors: [("km", 0.053), ("mile", 0.085), ("miles", 0.085)]),
            (name: "plane", factors: [("km", 0.255), ("hours", 90.0)]),
        ],
        generic: [("km", 0.192), ("mile", 0.309), ("miles", 0.309)],
    ),
    (
        name: "waste",
        subcategories: [
            (name: "paper_recycled", factors: [("kg", -1.700), ("lbs", -0.771)]),
        ],
        generic: [("kg", 0.500)],
    ),
]"#;

#[test]
fn loaded_table_matches_builtin_resolution() {
    let dir = make_test_dir("subset");
    fs::write(dir.join("factors.ron"), RON_SUBSET).unwrap();

    let loaded = Engine::new(load_factor_table(&dir).unwrap());
    let builtin = builtin_engine();

    let cases: &[(&str, f64, &str, Option<&str>)] = &[
        ("electricity", 100.0, "kwh", None),
        ("electricity", 100.0, "kwh", Some("coal")),
        ("electricity", 8.0, "MWh", Some("wind")),
        ("travel", 100.0, "km", Some("car_electric")),
        ("travel", 3.5, "hours", Some("plane")),
        ("travel", 42.0, "km", None),
        ("waste", 1.0, "kg", Some("paper_recycled")),
    ];
    for &(category, quantity, unit, subcategory) in cases {
        let a = loaded.calculate(category, quantity, unit, subcategory).unwrap();
        let b = builtin.calculate(category, quantity, unit, subcategory).unwrap();
        assert_eq!(a, b, "divergence for {category}/{subcategory:?}/{unit}");
    }

    cleanup(&dir);
}

#[test]
fn loaded_table_preserves_tier_semantics() {
    let dir = make_test_dir("tiers");
    fs::write(dir.join("factors.ron"), RON_SUBSET).unwrap();

    let engine = Engine::new(load_factor_table(&dir).unwrap());

    let r = engine.calculate("electricity", 1.0, "kwh", Some("coal")).unwrap();
    assert_eq!(r.tier, Tier::Subcategory);
    assert_eq!(r.confidence, Confidence::High);

    // Unknown subcategory falls through to the defaults tier.
    let r = engine.calculate("electricity", 1.0, "kwh", Some("geothermal")).unwrap();
    assert_eq!(r.tier, Tier::CategoryDefault);
    assert_eq!(r.confidence, Confidence::Medium);

    // No defaults for travel: bare units land on the generic tier.
    let r = engine.calculate("travel", 1.0, "km", None).unwrap();
    assert_eq!(r.tier, Tier::Generic);

    cleanup(&dir);
}

#[test]
fn loaded_table_produces_the_same_error_hints() {
    let dir = make_test_dir("hints");
    fs::write(dir.join("factors.ron"), RON_SUBSET).unwrap();

    let engine = Engine::new(load_factor_table(&dir).unwrap());

    match engine.calculate("travel", 50.0, "lightyears", None).unwrap_err() {
        CalcError::FactorNotFound { valid_units, .. } => {
            assert_eq!(valid_units, ["hours", "km", "mile", "miles"]);
        }
        other => panic!("expected FactorNotFound, got: {other:?}"),
    }

    match engine.calculate("fuel", 1.0, "liter", None).unwrap_err() {
        CalcError::UnknownCategory { known, .. } => {
            assert_eq!(known, ["electricity", "travel", "waste"]);
        }
        other => panic!("expected UnknownCategory, got: {other:?}"),
    }

    cleanup(&dir);
}

#[test]
fn loaded_table_normalizes_inputs_identically() {
    let dir = make_test_dir("norm");
    fs::write(dir.join("factors.ron"), RON_SUBSET).unwrap();

    let engine = Engine::new(load_factor_table(&dir).unwrap());
    let a = engine
        .calculate("  Electricity ", 10.0, "kWh", Some("Wind"))
        .unwrap();
    let b = engine.calculate("electricity", 10.0, "kwh", Some("wind")).unwrap();
    assert_eq!(a, b);

    cleanup(&dir);
}
