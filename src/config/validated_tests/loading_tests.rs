//! Tests for config file lookup and loading.

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use super::*;
use crate::logging::capture::CapturedLogs;
use crate::logging::LogLevel;

mod candidate_paths {
    use super::*;

    #[test]
    fn default_then_fallback() {
        let paths = ValidatedConfig::candidate_paths(&cli(&[]));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("./configs/config.toml"),
                PathBuf::from("config.toml")
            ]
        );
    }

    #[test]
    fn explicit_then_fallback() {
        let paths = ValidatedConfig::candidate_paths(&cli(&["-c", "/etc/watchdog.toml"]));
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/etc/watchdog.toml"),
                PathBuf::from("config.toml")
            ]
        );
    }

    #[test]
    fn explicit_fallback_is_not_repeated() {
        let paths = ValidatedConfig::candidate_paths(&cli(&["--config", "config.toml"]));
        assert_eq!(paths, vec![PathBuf::from("config.toml")]);
    }
}

mod config_load {
    use super::*;

    #[test]
    fn load_from_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("watchdog.toml");
        fs::write(
            &path,
            r#"
            cidrs = ["192.168.1.0/24"]
            period = "1s"
            restart-commands = ["systemctl restart networking"]
        "#,
        )
        .unwrap();

        let config = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap();

        assert_eq!(config.address_ranges, vec!["192.168.1.0/24"]);
        assert_eq!(config.period, Duration::from_secs(1));
        assert_eq!(config.recovery_commands, vec!["systemctl restart networking"]);
        assert_eq!(config.source, path);
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = ValidatedConfig::load(&cli(&["--config", missing.to_str().unwrap()]))
            .unwrap_err();

        match err {
            ConfigError::NotFound { candidates } => {
                assert_eq!(candidates, vec![missing, PathBuf::from("config.toml")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_everywhere_fails_before_anything_is_logged() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let logs = CapturedLogs::new();

        let result = logs.logger(LogLevel::Debug).in_scope(|| {
            ValidatedConfig::load(&cli(&["--config", missing.to_str().unwrap()]))
        });

        assert!(result.is_err());
        assert!(logs.is_empty());
    }

    #[test]
    fn directory_is_not_a_config_file() {
        let dir = tempdir().unwrap();

        let err = ValidatedConfig::load(&cli(&["--config", dir.path().to_str().unwrap()]))
            .unwrap_err();

        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "period = [").unwrap();

        let err = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap_err();

        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn invalid_values_fail_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        fs::write(&path, r#"period = "soon""#).unwrap();

        let err = ValidatedConfig::load(&cli(&["--config", path.to_str().unwrap()])).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidDuration { .. }));
    }
}

mod display {
    use super::*;

    #[test]
    fn summary_names_key_settings() {
        let config = validate(
            r#"
            cidrs = ["192.168.1.0/24", "10.0.0.0/8"]
            period = "30s"
            restart-commands = ["a", "b"]
        "#,
        )
        .unwrap();

        let summary = config.to_string();

        assert!(summary.contains("cidrs: [192.168.1.0/24, 10.0.0.0/8]"));
        assert!(summary.contains("period: 30s"));
        assert!(summary.contains("restart_commands: 2"));
        assert!(summary.contains("recovery_shell: sudo bash -c"));
        assert!(summary.contains("log_level: info"));
        assert!(summary.contains("log_target: stdout"));
    }
}
