//! Runtime configuration for hosts embedding the obfuscator.
//!
//! The core pipeline takes its settings as plain values; reading files and
//! environment variables happens only here.

use crate::error::ObfuscatorError;
use crate::logging::LoggingConfig;
use crate::obfuscation::CodecOptions;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_LOG_LEVEL: &str = "OBFUSCATOR_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "OBFUSCATOR_LOG_DIR";
pub const ENV_PARQUET_ROW_GROUP_SIZE: &str = "OBFUSCATOR_PARQUET_ROW_GROUP_SIZE";
pub const ENV_CSV_INFER_SCHEMA_LENGTH: &str = "OBFUSCATOR_CSV_INFER_SCHEMA_LENGTH";
pub const ENV_JSON_INFER_SCHEMA_LENGTH: &str = "OBFUSCATOR_JSON_INFER_SCHEMA_LENGTH";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscatorConfig {
    pub codec: CodecOptions,
    pub logging: LoggingConfig,
}

impl ObfuscatorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Applies `OBFUSCATOR_*` environment variables on top of this config.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Unparseable numeric values are reported rather than ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(level) = lookup(ENV_LOG_LEVEL)
            && !level.trim().is_empty()
        {
            self.logging.level = level.trim().to_owned();
        }

        if let Some(dir) = lookup(ENV_LOG_DIR)
            && !dir.trim().is_empty()
        {
            self.logging.log_dir = Some(PathBuf::from(dir.trim()));
        }

        if let Some(raw) = lookup(ENV_PARQUET_ROW_GROUP_SIZE) {
            let size = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_PARQUET_ROW_GROUP_SIZE} is not a number: {raw}"))?;
            self.codec.parquet_row_group_size = Some(size);
        }

        if let Some(raw) = lookup(ENV_CSV_INFER_SCHEMA_LENGTH) {
            let length = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_CSV_INFER_SCHEMA_LENGTH} is not a number: {raw}"))?;
            self.codec.csv_infer_schema_length = Some(length);
        }

        if let Some(raw) = lookup(ENV_JSON_INFER_SCHEMA_LENGTH) {
            let length = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_JSON_INFER_SCHEMA_LENGTH} is not a number: {raw}"))?;
            self.codec.json_infer_schema_length = Some(length);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> std::result::Result<(), ObfuscatorError> {
        if self.codec.parquet_row_group_size == Some(0) {
            return Err(ObfuscatorError::Config(
                "parquet_row_group_size must be greater than zero".to_owned(),
            ));
        }
        if self.codec.csv_infer_schema_length == Some(0) {
            return Err(ObfuscatorError::Config(
                "csv_infer_schema_length must be greater than zero".to_owned(),
            ));
        }
        if self.codec.json_infer_schema_length == Some(0) {
            return Err(ObfuscatorError::Config(
                "json_infer_schema_length must be greater than zero".to_owned(),
            ));
        }
        if self.logging.max_log_files == 0 {
            return Err(ObfuscatorError::Config(
                "max_log_files must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ObfuscatorConfig::default();
        assert_eq!(config.codec.csv_infer_schema_length, None);
        assert_eq!(config.codec.json_infer_schema_length, None);
        assert_eq!(config.codec.parquet_row_group_size, None);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.log_dir.is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() -> Result<()> {
        let config = ObfuscatorConfig::from_json(r#"{"codec": {"parquet_row_group_size": 4096}}"#)?;
        assert_eq!(config.codec.parquet_row_group_size, Some(4096));
        assert_eq!(config.codec.csv_infer_schema_length, None);
        assert_eq!(config.logging.max_log_files, 10);
        Ok(())
    }

    #[test]
    fn test_zero_row_group_size_is_rejected() {
        let err = ObfuscatorConfig::from_json(r#"{"codec": {"parquet_row_group_size": 0}}"#)
            .expect_err("zero row groups");
        assert!(err.to_string().contains("parquet_row_group_size"));
    }

    #[test]
    fn test_overrides_from_lookup() -> Result<()> {
        let vars: HashMap<&str, &str> = HashMap::from([
            (ENV_LOG_LEVEL, "debug"),
            (ENV_LOG_DIR, "/tmp/obfuscator-logs"),
            (ENV_PARQUET_ROW_GROUP_SIZE, " 16384 "),
            (ENV_JSON_INFER_SCHEMA_LENGTH, "500"),
        ]);
        let config = ObfuscatorConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| (*v).to_owned()))?;

        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.log_dir.as_deref(),
            Some(Path::new("/tmp/obfuscator-logs"))
        );
        assert_eq!(config.codec.parquet_row_group_size, Some(16_384));
        assert_eq!(config.codec.json_infer_schema_length, Some(500));
        assert_eq!(config.codec.csv_infer_schema_length, None);
        Ok(())
    }

    #[test]
    fn test_bad_numeric_override_is_an_error() {
        let result = ObfuscatorConfig::default().with_overrides(|key| {
            (key == ENV_CSV_INFER_SCHEMA_LENGTH).then(|| "lots".to_owned())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_through_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");

        let mut config = ObfuscatorConfig::default();
        config.logging.ansi = true;
        std::fs::write(&path, config.to_json()?)?;

        let loaded = ObfuscatorConfig::from_file(&path)?;
        assert!(loaded.logging.ansi);
        assert_eq!(loaded.codec, config.codec);
        Ok(())
    }
}
