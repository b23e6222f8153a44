//! Validated configuration loaded from the first existing config file.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::{LogFormat, LogLevel, LoggingConfig, MEGABYTE, RotationPolicy};
use crate::network::AddressRange;

use super::cli::Cli;
use super::defaults;
use super::duration::parse_duration;
use super::error::{ConfigError, field};
use super::toml::{FileConfig, LoggerSection, RotationSection};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Fully validated configuration ready for use by the application.
///
/// Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    /// Address range strings, as written; every entry is known to parse
    pub address_ranges: Vec<String>,

    /// Tick period, strictly positive
    pub period: Duration,

    /// Recovery commands, in execution order
    pub recovery_commands: Vec<String>,

    /// Shell invocation prefix, never empty
    pub recovery_shell: Vec<String>,

    /// Log destination, format and level
    pub logging: LoggingConfig,

    /// The file this configuration was read from
    pub source: PathBuf,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let log_target = self
            .logging
            .rotation
            .as_ref()
            .map_or_else(|| "stdout".to_string(), |r| r.filename.display().to_string());

        write!(
            f,
            "Config {{ source: {}, cidrs: [{}], period: {:?}, restart_commands: {}, \
             recovery_shell: {}, log_level: {}, log_format: {}, log_target: {} }}",
            self.source.display(),
            self.address_ranges.join(", "),
            self.period,
            self.recovery_commands.len(),
            self.recovery_shell.join(" "),
            self.logging.level,
            self.logging.format,
            log_target,
        )
    }
}

impl ValidatedConfig {
    /// Loads the first config file that exists among [`Self::candidate_paths`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No candidate path is an existing file
    /// - The file cannot be read or parsed
    /// - Any value is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let candidates = Self::candidate_paths(cli);

        let Some(path) = candidates.iter().find(|p| p.is_file()) else {
            return Err(ConfigError::NotFound { candidates });
        };

        let file = FileConfig::load(path)?;
        Self::from_file(&file, path)
    }

    /// Config file paths in lookup order: the `--config` value (or its
    /// default), then [`defaults::FALLBACK_CONFIG_PATH`].
    #[must_use]
    pub fn candidate_paths(cli: &Cli) -> Vec<PathBuf> {
        let mut candidates = vec![cli.config.clone()];
        let fallback = PathBuf::from(defaults::FALLBACK_CONFIG_PATH);
        if cli.config != fallback {
            candidates.push(fallback);
        }
        candidates
    }

    /// Validates a parsed config file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `period` is missing, malformed or zero
    /// - Any entry of `cidrs` is not a valid address range
    /// - `recovery-shell` is empty
    /// - Logger settings are invalid
    pub fn from_file(file: &FileConfig, source: &Path) -> Result<Self, ConfigError> {
        let period = resolve_period(file.period.as_deref())?;

        // Fatal here; the matcher re-parses on every tick.
        AddressRange::parse_all(&file.cidrs)?;

        let recovery_shell = resolve_recovery_shell(file.recovery_shell.as_deref())?;
        let logging = build_logging(&file.logger)?;

        Ok(Self {
            address_ranges: file.cidrs.clone(),
            period,
            recovery_commands: file.restart_commands.clone(),
            recovery_shell,
            logging,
            source: source.to_path_buf(),
        })
    }
}

fn resolve_period(value: Option<&str>) -> Result<Duration, ConfigError> {
    let value = value.ok_or_else(|| {
        ConfigError::missing(field::PERIOD, "Set period in config file, e.g. period = \"30s\"")
    })?;

    let period = parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        field: field::PERIOD,
        reason: e.to_string(),
    })?;

    if period.is_zero() {
        return Err(ConfigError::InvalidDuration {
            field: field::PERIOD,
            reason: "must be greater than 0".to_string(),
        });
    }

    Ok(period)
}

fn resolve_recovery_shell(value: Option<&[String]>) -> Result<Vec<String>, ConfigError> {
    match value {
        None => Ok(defaults::recovery_shell()),
        Some([]) => Err(ConfigError::EmptyRecoveryShell),
        Some(shell) => Ok(shell.to_vec()),
    }
}

fn build_logging(section: &LoggerSection) -> Result<LoggingConfig, ConfigError> {
    let level = match section.log_level.as_deref() {
        None => LogLevel::default(),
        Some(value) => LogLevel::from_name(value).ok_or_else(|| ConfigError::InvalidLogLevel {
            value: value.to_string(),
        })?,
    };

    let format = match section.log_format.as_deref() {
        None => LogFormat::default(),
        Some(value) => LogFormat::from_name(value).ok_or_else(|| ConfigError::InvalidLogFormat {
            value: value.to_string(),
        })?,
    };

    let rotation = section.rotation.as_ref().map(build_rotation).transpose()?;

    Ok(LoggingConfig {
        level,
        format,
        rotation,
    })
}

fn build_rotation(section: &RotationSection) -> Result<RotationPolicy, ConfigError> {
    if section.filename.as_os_str().is_empty() {
        return Err(ConfigError::InvalidRotation(
            "filename must not be empty".to_string(),
        ));
    }

    let max_size_mb = section.max_size.unwrap_or(defaults::ROTATION_MAX_SIZE_MB);
    if max_size_mb == 0 {
        return Err(ConfigError::InvalidRotation(
            "max-size must be greater than 0".to_string(),
        ));
    }
    let max_size = max_size_mb.checked_mul(MEGABYTE).ok_or_else(|| {
        ConfigError::InvalidRotation(format!("max-size ({max_size_mb} MB) is too large"))
    })?;

    let max_age = match section.max_age {
        0 => None,
        days => Some(
            days.checked_mul(SECONDS_PER_DAY)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    ConfigError::InvalidRotation(format!("max-age ({days} days) is too large"))
                })?,
        ),
    };

    Ok(RotationPolicy::new(&section.filename)
        .with_max_size(max_size)
        .with_max_backups(section.max_backups)
        .with_max_age(max_age)
        .with_compress(section.compress))
}
