//! Precedence tests for the figment provider chain.
//!
//! Uses `figment::Jail` for sandboxed cwd and env var manipulation.

use std::path::{Path, PathBuf};

use figment::Jail;
use pretty_assertions::assert_eq;
use syl_config::{ConfigError, ConfigOverrides, SylConfig};

fn load(config_file: Option<&str>, overrides: &ConfigOverrides) -> SylConfig {
    SylConfig::load(config_file.map(Path::new), overrides).expect("config loads")
}

#[test]
fn loads_database_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "syllabus.toml",
            r#"
[database]
url = "libsql://db.example.com:8080/courses"
user = "importer"
password = "pw"

[content]
resources_root = "content"
"#,
        )?;

        let config = load(Some("syllabus.toml"), &ConfigOverrides::default());
        assert_eq!(config.database.url, "libsql://db.example.com:8080/courses");
        assert_eq!(config.content.resources_root, PathBuf::from("content"));

        let params = config.database.resolve().expect("resolves");
        assert_eq!(params.host, "db.example.com");
        assert_eq!(params.port, Some(8080));
        assert_eq!(params.database, "courses");
        assert_eq!(params.user, "importer");
        Ok(())
    });
}

#[test]
fn project_local_config_is_discovered() {
    Jail::expect_with(|jail| {
        jail.create_dir(".syllabus")?;
        jail.create_file(".syllabus/config.toml", "[database]\nname = \"local.db\"\n")?;

        let config = load(None, &ConfigOverrides::default());
        assert_eq!(config.database.name, "local.db");
        Ok(())
    });
}

#[test]
fn reads_spring_datasource_properties() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "application.properties",
            "# datasource\nspring.datasource.url=jdbc:mysql://db.local:3306/learn\nspring.datasource.username=root\nspring.datasource.password=secret\nserver.port=8080\n",
        )?;

        let config = load(Some("application.properties"), &ConfigOverrides::default());
        let params = config.database.resolve().expect("resolves");
        assert_eq!(params.scheme, "mysql");
        assert_eq!(params.target(), "db.local:3306/learn");
        assert_eq!(params.user, "root");
        assert_eq!(params.password, "secret");
        Ok(())
    });
}

#[test]
fn env_beats_file_and_flags_beat_env() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "syllabus.toml",
            "[database]\nhost = \"file-host\"\nname = \"file-db\"\nuser = \"file-user\"\n",
        )?;
        jail.set_env("SYLLABUS_DATABASE__HOST", "env-host");
        jail.set_env("DB_NAME", "env-db");
        jail.set_env("DB_PORT", "9000");

        let config = load(Some("syllabus.toml"), &ConfigOverrides::default());
        assert_eq!(config.database.host, "env-host");
        assert_eq!(config.database.name, "env-db");
        assert_eq!(config.database.port, Some(9000));
        assert_eq!(config.database.user, "file-user");

        let mut overrides = ConfigOverrides::default();
        overrides.database.host = Some("flag-host".into());
        overrides.database.port = Some(7000);
        let config = load(Some("syllabus.toml"), &overrides);
        assert_eq!(config.database.host, "flag-host");
        assert_eq!(config.database.port, Some(7000));
        assert_eq!(config.database.name, "env-db");
        Ok(())
    });
}

#[test]
fn env_url_replaces_file_host_and_name() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "syllabus.toml",
            "[database]\nhost = \"file-host\"\nport = 1111\nname = \"file-db\"\npassword = \"pw\"\n",
        )?;
        jail.set_env("SYLLABUS_DATABASE__URL", "libsql://env-host:8080/db");

        let params = load(Some("syllabus.toml"), &ConfigOverrides::default())
            .database
            .resolve()
            .expect("resolves");
        assert_eq!(params.host, "env-host");
        assert_eq!(params.port, Some(8080));
        assert_eq!(params.database, "db");
        assert_eq!(params.password, "pw");

        let mut overrides = ConfigOverrides::default();
        overrides.database.host = Some("flag-host".into());
        let params = load(Some("syllabus.toml"), &overrides)
            .database
            .resolve()
            .expect("resolves");
        assert_eq!(params.target(), "flag-host:8080/db");
        Ok(())
    });
}

#[test]
fn numeric_password_from_env_is_a_string() {
    Jail::expect_with(|jail| {
        jail.set_env("DB_PASSWORD", "123456");
        let config = load(None, &ConfigOverrides::default());
        assert_eq!(config.database.password, "123456");
        Ok(())
    });
}

#[test]
fn resources_root_override() {
    Jail::expect_with(|_jail| {
        let mut overrides = ConfigOverrides::default();
        overrides.content.resources_root = Some(PathBuf::from("/srv/resources"));
        let config = load(None, &overrides);
        assert_eq!(config.content.resources_root, PathBuf::from("/srv/resources"));
        Ok(())
    });
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let err = SylConfig::load(Some(Path::new("nope.toml")), &ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }), "{err}");
        Ok(())
    });
}
