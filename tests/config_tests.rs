//! Quoter configuration loading

use std::io::Write;

use alloy::primitives::address;
use swap_quoter_sdk::{PoolFee, QuoterBackend, QuoterConfig};

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "backends": [
                {{ "backend": "concentrated_liquidity", "address": "0x3333333333333333333333333333333333333333" }},
                {{ "backend": "mixed", "address": "0x1111111111111111111111111111111111111111" }}
            ],
            "decimals": 8,
            "default_fee_tier": 100,
            "debounce_ms": 150
        }}"#
    )
    .unwrap();

    let config = QuoterConfig::from_json_file(file.path()).unwrap();

    assert_eq!(config.decimals, 8);
    assert_eq!(config.default_fee_tier, PoolFee::LOWEST);
    assert_eq!(config.debounce_ms, 150);

    let ordered = config.ordered_backends();
    assert_eq!(ordered[0].backend, QuoterBackend::Mixed);
    assert_eq!(ordered[0].address, address!("1111111111111111111111111111111111111111"));
    assert_eq!(ordered[1].backend, QuoterBackend::ConcentratedLiquidity);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = QuoterConfig::from_json_file(dir.path().join("quoters.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read quoter config"));
}

#[test]
fn test_rejects_oversized_decimals() {
    let json = r#"{
        "backends": [{ "backend": "bin", "address": "0x2222222222222222222222222222222222222222" }],
        "decimals": 40
    }"#;
    assert!(QuoterConfig::from_json_str(json).is_err());
}

#[test]
fn test_rejects_malformed_address() {
    let json = r#"{ "backends": [{ "backend": "bin", "address": "0x02" }] }"#;
    let err = QuoterConfig::from_json_str(json).unwrap_err();
    assert!(err.to_string().contains("invalid quoter config"));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = QuoterConfig::new(
        address!("1111111111111111111111111111111111111111"),
        address!("2222222222222222222222222222222222222222"),
        address!("3333333333333333333333333333333333333333"),
    )
    .with_debounce_ms(500);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(QuoterConfig::from_json_str(&json).unwrap(), config);
}
