//! Hashing determinism: same effective settings, same hash, regardless of
//! key order or how many identical layers produced them.

use dtt_config::load_layered_yaml_from_strings;

const BASE_YAML: &str = r#"
account:
  account_type: prop_firm
  starting_balance: 100000
  risk_mode: balanced
  max_drawdown_pct: 10
  daily_drawdown_pct: 5
window:
  timezone: America/Bogota
"#;

const BASE_YAML_REORDERED: &str = r#"
window:
  timezone: America/Bogota
account:
  daily_drawdown_pct: 5
  max_drawdown_pct: 10
  risk_mode: balanced
  starting_balance: 100000
  account_type: prop_firm
"#;

const OVERLAY_YAML: &str = r#"
account:
  current_balance: 96500
  risk_mode: sustainable
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        original.config_hash, reordered.config_hash,
        "reordering keys in YAML must not change the hash"
    );
}

#[test]
fn overlay_changes_hash_and_wins() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let merged = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    assert_ne!(base.config_hash, merged.config_hash);

    let mode = merged
        .config_json
        .pointer("/account/risk_mode")
        .and_then(|v| v.as_str())
        .unwrap();
    assert_eq!(mode, "sustainable");

    // Untouched siblings survive the merge.
    let max_dd = merged
        .config_json
        .pointer("/account/max_drawdown_pct")
        .and_then(|v| v.as_f64())
        .unwrap();
    assert!((max_dd - 10.0).abs() < 1e-9);
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn invalid_yaml_is_an_error() {
    let err = load_layered_yaml_from_strings(&["account: [unclosed"]).unwrap_err();
    assert!(format!("{err:#}").contains("invalid yaml"));
}
