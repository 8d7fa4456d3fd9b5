//! CLI argument definitions for the chatshell binary.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use chatshell_core::{ShellConfig, ShellError};

/// Chatshell - a terminal chat session with simulated assistant replies.
#[derive(Parser, Debug)]
#[command(name = "chatshell", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Seed for reply selection and delays. Makes a session reproducible.
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Starting conversation mode (default, deep, math, knowledge, student, coding, fun, offline).
    #[arg(short = 'm', long = "mode")]
    pub mode: Option<String>,

    /// Print session events as JSON lines instead of chat text.
    #[arg(long = "json")]
    pub json: bool,
}

/// Configuration read at startup, with the load failure kept for reporting
/// once logging is up.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: ShellConfig,
    pub path: PathBuf,
    /// Why the file could not be used; `config` holds defaults in that case.
    pub error: Option<ShellError>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > CHATSHELL_CONFIG env var > ~/.chatshell/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("CHATSHELL_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Read the configuration file and apply flag overrides.
    ///
    /// A missing or unparsable file yields defaults plus the error.
    pub fn load_config(&self) -> LoadedConfig {
        let path = self.resolve_config_path();
        let (mut config, error) = match ShellConfig::load(&path) {
            Ok(config) => (config, None),
            Err(e) => (ShellConfig::default(), Some(e)),
        };
        self.apply(&mut config);
        LoadedConfig {
            config,
            path,
            error,
        }
    }

    /// Write flag overrides into the loaded configuration.
    pub fn apply(&self, config: &mut ShellConfig) {
        if let Some(ref level) = self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(seed) = self.seed {
            config.responses.seed = Some(seed);
        }
        if let Some(ref mode) = self.mode {
            config.session.default_mode = mode.clone();
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".chatshell").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".chatshell").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "chatshell", "--config", "/tmp/c.toml", "-l", "debug", "--seed", "7", "-m", "math",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.mode.as_deref(), Some("math"));
    }

    #[test]
    fn test_config_flag_wins() {
        let args = CliArgs::parse_from(["chatshell", "-c", "explicit.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("explicit.toml"));
    }

    #[test]
    fn test_apply_overrides() {
        let args = CliArgs::parse_from(["chatshell", "--seed", "3", "--mode", "fun"]);
        let mut config = ShellConfig::default();
        args.apply(&mut config);
        assert_eq!(config.responses.seed, Some(3));
        assert_eq!(config.session.default_mode, "fun");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_load_config_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[[").unwrap();

        let args = CliArgs::parse_from(["chatshell", "--config", path.to_str().unwrap(), "-s", "5"]);
        let loaded = args.load_config();
        assert!(matches!(loaded.error, Some(ShellError::Config(_))));
        assert_eq!(loaded.path, path);
        assert_eq!(loaded.config.session.default_mode, "default");
        assert_eq!(loaded.config.responses.seed, Some(5));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let args = CliArgs::parse_from(["chatshell", "-c", path.to_str().unwrap()]);
        assert!(matches!(args.load_config().error, Some(ShellError::Io(_))));
    }

    #[test]
    fn test_load_config_success() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\ndefault_mode = \"coding\"\n").unwrap();

        let args = CliArgs::parse_from(["chatshell", "-c", path.to_str().unwrap()]);
        let loaded = args.load_config();
        assert!(loaded.error.is_none());
        assert_eq!(loaded.config.session.default_mode, "coding");
    }

    #[test]
    fn test_no_flags_leave_config_alone() {
        let args = CliArgs::parse_from(["chatshell"]);
        let mut config = ShellConfig::default();
        args.apply(&mut config);
        assert_eq!(config.responses.seed, None);
        assert_eq!(config.session.default_mode, "default");
    }
}
