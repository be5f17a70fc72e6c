use serde_json::json;
use wifitrack_api::models::{
    ConfigRecord, NetworkIdentity, PasspointConfig, RadioState, SecurityGroup, SecurityType,
    WifiConfig,
};

#[test]
fn test_identity_is_tagged_by_kind() {
    let standard = NetworkIdentity::standard("Home", SecurityGroup::Personal);
    assert_eq!(
        serde_json::to_value(&standard).unwrap(),
        json!({"kind": "standard", "ssid": "Home", "security": "personal"})
    );

    let parsed: NetworkIdentity =
        serde_json::from_value(json!({"kind": "passpoint", "profile_id": "carrier-1"})).unwrap();
    assert_eq!(parsed, NetworkIdentity::passpoint("carrier-1"));
}

#[test]
fn test_config_record_keeps_its_variant() {
    let record = ConfigRecord::Passpoint {
        profile: PasspointConfig {
            unique_id: "carrier-1".to_string(),
            friendly_name: "Carrier".to_string(),
            fqdn: String::new(),
        },
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["kind"], "passpoint");

    let back: ConfigRecord = serde_json::from_value(value).unwrap();
    assert!(back.is_passpoint());
    assert_eq!(back, record);
}

#[test]
fn test_radio_state_uses_snake_case_names() {
    let states: Vec<RadioState> =
        serde_json::from_str(r#"["disabling", "disabled", "enabling", "enabled", "unknown"]"#)
            .unwrap();
    let codes: Vec<i32> = states.iter().map(|s| s.code()).collect();
    assert_eq!(codes, vec![0, 1, 2, 3, 4]);
    assert!(serde_json::from_str::<RadioState>(r#""Enabled""#).is_err());
}

#[test]
fn test_minimal_config_fills_optional_flags() {
    let config: WifiConfig =
        serde_json::from_str(r#"{"network_id": 7, "ssid": "Cafe", "security_types": ["open"]}"#)
            .unwrap();
    assert_eq!(config.security_types, vec![SecurityType::Open]);
    assert!(config.is_user_saved());
    assert_eq!(
        config.identity(),
        NetworkIdentity::standard("Cafe", SecurityGroup::Open)
    );
}
