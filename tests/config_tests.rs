use std::time::Duration;

use voice_grocer::catalog::{CatalogProvider, StaticCatalog};
use voice_grocer::config::VoiceConfig;
use voice_grocer::error::VoiceError;

#[test]
fn test_defaults() {
    let config = VoiceConfig::default();

    assert_eq!(config.recognition.lang, "en-US");
    assert_eq!(config.recognition.max_reconnect_attempts, 10);
    assert_eq!(config.recognition.settle_delay(), Duration::from_millis(100));
    assert_eq!(config.recognition.debounce(), Duration::from_millis(300));
    assert_eq!(config.speech.inter_unit_pause(), Duration::from_millis(50));
    assert_eq!(config.resolver.fuzzy_ceiling, 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_backoff_linear_capped() {
    let config = VoiceConfig::default();
    let delays: Vec<u64> = (1..=7)
        .map(|n| config.recognition.backoff_for(n).as_millis() as u64)
        .collect();

    assert_eq!(delays, vec![1000, 2000, 3000, 4000, 5000, 5000, 5000]);
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = VoiceConfig::from_json_str(
        r#"{ "recognition": { "max_reconnect_attempts": 3 }, "speech": { "rate": 0.9 } }"#,
    )
    .expect("valid config");

    assert_eq!(config.recognition.max_reconnect_attempts, 3);
    assert_eq!(config.recognition.backoff_step_ms, 1000);
    assert!((config.speech.rate - 0.9).abs() < f32::EPSILON);
    assert_eq!(config.speech.preferred_voices.len(), 5);
}

#[test]
fn test_invalid_config_rejected() {
    let zero = VoiceConfig::from_json_str(r#"{ "recognition": { "max_reconnect_attempts": 0 } }"#);
    assert!(matches!(zero, Err(VoiceError::Config(_))));

    let loud = VoiceConfig::from_json_str(r#"{ "speech": { "volume": 2.0 } }"#);
    assert!(matches!(loud, Err(VoiceError::Config(_))));

    let broken = VoiceConfig::from_json_str("{ not json");
    assert!(matches!(broken, Err(VoiceError::Config(_))));
}

#[test]
fn test_catalog_from_json() {
    let catalog = StaticCatalog::from_json_str(
        r#"[{ "id": 1, "name": "Apples", "price": "2.99", "category": "fruits", "description": "Crisp." }]"#,
    )
    .expect("valid catalog");

    let all = catalog.get_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].price.to_string(), "2.99");
    assert_eq!(catalog.find_by_category("all").len(), 1);
    assert_eq!(catalog.find_by_name("crisp").len(), 1);
}

#[test]
fn test_demo_catalog() {
    let catalog = StaticCatalog::demo();

    assert_eq!(catalog.get_all().len(), 20);
    assert_eq!(catalog.find_by_category("dairy").len(), 4);
    assert_eq!(catalog.find_by_category("Vegetables").len(), 6);
}
