//! Tests for the run module.

use std::path::PathBuf;
use std::time::Duration;

use net_watchdog::logging::LoggingConfig;

use super::*;

fn config(shell: &[&str], commands: &[&str]) -> ValidatedConfig {
    ValidatedConfig {
        address_ranges: vec![],
        period: Duration::from_secs(30),
        recovery_commands: commands.iter().map(ToString::to_string).collect(),
        recovery_shell: shell.iter().map(ToString::to_string).collect(),
        logging: LoggingConfig::default(),
        source: PathBuf::from("test.toml"),
    }
}

mod run_error {
    use super::*;

    #[test]
    fn empty_shell_displays_message() {
        assert_eq!(
            RunError::EmptyRecoveryShell.to_string(),
            "Recovery shell is empty"
        );
    }

    #[test]
    fn lifecycle_error_is_transparent() {
        let error = RunError::from(LifecycleError::ShutdownNotifierDropped);
        assert_eq!(
            error.to_string(),
            LifecycleError::ShutdownNotifierDropped.to_string()
        );
    }
}

mod build {
    use super::*;

    #[test]
    fn empty_shell_is_rejected() {
        let result = build_watchdog(config(&[], &["true"]), &Logger::disabled());
        assert!(matches!(result, Err(RunError::EmptyRecoveryShell)));
    }

    #[test]
    fn shell_program_comes_from_config() {
        let watchdog = build_watchdog(config(&["doas", "sh", "-c"], &[]), &Logger::disabled())
            .unwrap();
        assert_eq!(watchdog.recovery().runner().program(), "doas");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn empty_ranges_run_configured_commands() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("recovered");
        let command = format!("touch '{}'", marker.display());
        let watchdog =
            build_watchdog(config(&["sh", "-c"], &[&command]), &Logger::disabled()).unwrap();

        let outcome = watchdog.tick().await;

        assert!(outcome.ran_recovery());
        assert!(marker.exists());
    }
}
