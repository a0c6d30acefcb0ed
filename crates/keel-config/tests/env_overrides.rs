mod common;

use figment::Jail;
use keel_config::KeelConfig;
use keel_core::DatetimeCoerceClass;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_fill_validation_section() {
    Jail::expect_with(|jail| {
        common::isolate_user_config(jail);
        jail.set_env("KEEL_VALIDATION__COERCE_VALUE", "true");
        jail.set_env("KEEL_VALIDATION__DATETIME_COERCE_CLASS", "unix_millis");
        jail.set_env("KEEL_VALIDATION__SCOPE", "strict");

        let config = KeelConfig::load().expect("config loads");
        assert!(config.validation.coerce_value);
        assert_eq!(
            config.validation.datetime_coerce_class,
            Some(DatetimeCoerceClass::UnixMillis)
        );
        assert_eq!(config.validation.scope, "strict");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        common::isolate_user_config(jail);
        std::fs::create_dir(jail.directory().join(".keel")).expect("create .keel");
        jail.create_file(".keel/config.toml", "[validation]\ncoerce_value = true\n")?;
        jail.set_env("KEEL_VALIDATION__COERCE_VALUE", "false");

        let config = KeelConfig::load().expect("config loads");
        assert!(!config.validation.coerce_value);
        Ok(())
    });
}
