//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_defaults_deserialize() {
    let settings = Settings::defaults()
        .expect("defaults register")
        .build()
        .expect("config builds")
        .try_deserialize::<Settings>()
        .expect("defaults deserialize");

    assert_eq!(settings.data.path, "tasks.json");
    assert_eq!(settings.user.slug, "me");
    assert_eq!(settings.logging.level, "info");
}

#[test_log::test]
fn test_override_takes_precedence() {
    let settings = Settings::defaults()
        .expect("defaults register")
        .set_override("user.slug", "alex")
        .expect("override registers")
        .set_override("data.path", "/tmp/alex.json")
        .expect("override registers")
        .build()
        .expect("config builds")
        .try_deserialize::<Settings>()
        .expect("settings deserialize");

    assert_eq!(settings.user.slug, "alex");
    assert_eq!(settings.data.path, "/tmp/alex.json");
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_logging_config_clone() {
    let config = LoggingConfig {
        level: "debug".to_string(),
    };

    let cloned = config.clone();
    assert_eq!(cloned.level, config.level);
}
