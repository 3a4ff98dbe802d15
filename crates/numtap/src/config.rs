//! Config file loading
//!
//! The game reads `numtap.toml` from the working directory, or the file named by
//! `NUMTAP_CONFIG`. Loading never fails: problems are reported back so they can
//! be logged once the subscriber is up.

use anyhow::{Context, Result};
use numtap_core::GameConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config path
pub const CONFIG_ENV: &str = "NUMTAP_CONFIG";
/// Config file looked up when the variable is unset
pub const DEFAULT_CONFIG_FILE: &str = "numtap.toml";

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// No file present
    Defaults,
    /// Loaded from this file
    File(PathBuf),
    /// The file exists but could not be used
    Fallback {
        /// Offending file
        path: PathBuf,
        /// Error chain
        reason: String,
    },
}

/// Resolve the config path from the environment
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load the config at `path`, falling back to defaults
pub fn load_from(path: &Path) -> (GameConfig, ConfigSource) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return (GameConfig::default(), ConfigSource::Defaults)
        }
        Err(e) => {
            return (
                GameConfig::default(),
                ConfigSource::Fallback {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            )
        }
    };

    match parse(&text) {
        Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
        Err(e) => (
            GameConfig::default(),
            ConfigSource::Fallback {
                path: path.to_path_buf(),
                reason: format!("{:#}", e),
            },
        ),
    }
}

/// Parse and validate a TOML document
pub fn parse(text: &str) -> Result<GameConfig> {
    let config: GameConfig = toml::from_str(text).context("Invalid TOML")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse(
            r#"
            [timing]
            too_many_dwell_ms = 1500

            [log]
            level = "debug"
            file_output = false
            "#,
        )
        .unwrap();

        assert_eq!(config.timing.too_many_dwell_ms, 1500);
        assert_eq!(config.timing.success_reveal_ms, 400);
        assert_eq!(config.timing.success_dwell_ms, 10_000);
        assert!(config.audio.enabled);
        assert_eq!(config.log.level, "debug");
        assert!(!config.log.file_output);
    }

    #[test]
    fn test_rejects_invalid_timing() {
        let err = parse("[timing]\nsuccess_reveal_ms = 20000\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid configuration"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, GameConfig::default());
        assert_eq!(source, ConfigSource::Defaults);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[audio\nmaster_volume = ").unwrap();

        let (config, source) = load_from(file.path());
        assert_eq!(config, GameConfig::default());
        assert!(matches!(source, ConfigSource::Fallback { .. }));
    }

    #[test]
    fn test_loads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[audio]\nenabled = false\nmaster_volume = 0.5").unwrap();

        let (config, source) = load_from(file.path());
        assert!(!config.audio.enabled);
        assert_eq!(config.audio.master_volume, 0.5);
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }
}
