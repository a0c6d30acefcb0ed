//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

mod common;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use keel_config::{ConfigError, KeelConfig};
use keel_core::{DatetimeCoerceClass, Options};
use pretty_assertions::assert_eq;

#[test]
fn loads_validation_section_from_toml() {
    Jail::expect_with(|jail| {
        common::isolate_user_config(jail);
        jail.create_file(
            "config.toml",
            r#"
[validation]
coerce_value = true
datetime_coerce_class = "unix_seconds"
scope = "lenient"
"#,
        )?;

        let config: KeelConfig = Figment::from(Serialized::defaults(KeelConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.validation.scope, "lenient");
        assert_eq!(
            config.validation.options(),
            Options::coercing().with_datetime_coerce_class(DatetimeCoerceClass::UnixSeconds)
        );
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        common::isolate_user_config(jail);
        jail.create_file("config.toml", "[validation]\ncoerce_value = true\n")?;

        let config: KeelConfig = Figment::from(Serialized::defaults(KeelConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.validation.coerce_value);
        assert_eq!(config.validation.datetime_coerce_class, None);
        assert_eq!(config.validation.scope, "default");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        common::isolate_user_config(jail);
        std::fs::create_dir(jail.directory().join(".keel")).expect("create .keel");
        jail.create_file(
            ".keel/config.toml",
            "[validation]\ndatetime_coerce_class = \"rfc3339\"\n",
        )?;

        let config = KeelConfig::load().expect("config loads");
        assert_eq!(
            config.validation.datetime_coerce_class,
            Some(DatetimeCoerceClass::Rfc3339)
        );
        Ok(())
    });
}

#[test]
fn unknown_datetime_class_is_an_error() {
    Jail::expect_with(|jail| {
        common::isolate_user_config(jail);
        std::fs::create_dir(jail.directory().join(".keel")).expect("create .keel");
        jail.create_file(
            ".keel/config.toml",
            "[validation]\ndatetime_coerce_class = \"julian\"\n",
        )?;

        assert!(matches!(KeelConfig::load(), Err(ConfigError::Figment(_))));
        Ok(())
    });
}

#[test]
fn empty_scope_is_an_invalid_value() {
    Jail::expect_with(|jail| {
        common::isolate_user_config(jail);
        std::fs::create_dir(jail.directory().join(".keel")).expect("create .keel");
        jail.create_file(".keel/config.toml", "[validation]\nscope = \"\"\n")?;

        let error = KeelConfig::load().unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { .. }));
        assert!(error.to_string().contains("validation.scope"));
        Ok(())
    });
}

#[test]
fn user_file_is_read_from_the_config_dir_and_project_file_wins() {
    Jail::expect_with(|jail| {
        common::isolate_user_config(jail);
        let user_dir = dirs::config_dir().expect("config dir").join("keel");
        assert!(user_dir.starts_with(jail.directory()));
        std::fs::create_dir_all(&user_dir).expect("create user config dir");
        std::fs::write(
            user_dir.join("config.toml"),
            "[validation]\ncoerce_value = true\nscope = \"user\"\n",
        )
        .expect("write user config");

        let config = KeelConfig::load().expect("config loads");
        assert!(config.validation.coerce_value);
        assert_eq!(config.validation.scope, "user");

        std::fs::create_dir(jail.directory().join(".keel")).expect("create .keel");
        jail.create_file(".keel/config.toml", "[validation]\nscope = \"project\"\n")?;
        let config = KeelConfig::load().expect("config loads");
        assert!(config.validation.coerce_value);
        assert_eq!(config.validation.scope, "project");
        Ok(())
    });
}
