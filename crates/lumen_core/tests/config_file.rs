//! # Shipped Config Test
//!
//! The sample config in the repository must load and match the defaults.

use lumen_core::BackgroundConfig;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/background.toml");

/// Test: config/background.toml parses, validates, and equals the defaults.
#[test]
fn test_sample_config_matches_defaults() {
    let config = BackgroundConfig::load(SAMPLE).expect("sample config should load");
    assert_eq!(config, BackgroundConfig::default());
}
