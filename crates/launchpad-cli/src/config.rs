//! Configuration file management for launchpad.
//!
//! Provides a TOML-based config file at `~/.config/launchpad/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use launchpad_core::synth::DEFAULT_LATENCY;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub synthesis: SynthesisSection,
    pub export: ExportSection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSection {
    /// Simulated latency of the template synthesizer, in milliseconds.
    pub latency_ms: u64,
    /// Give up on synthesis after this many seconds. Unset means wait.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for SynthesisSection {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY.as_millis() as u64,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Directory `marketing-plan.txt` is written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the launchpad config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/launchpad` or
/// `~/.config/launchpad`, on every platform.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("launchpad");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("launchpad")
}

/// Return the path to the launchpad config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Load the config file, or `None` if it does not exist.
///
/// A file that exists but does not parse is an error.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config_to(config: &ConfigFile, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchpadConfig {
    pub latency: Duration,
    pub timeout: Option<Duration>,
    pub export_dir: PathBuf,
}

impl LaunchpadConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Latency: `LAUNCHPAD_LATENCY_MS` env > `synthesis.latency_ms` > 1200 ms
    /// - Timeout: `LAUNCHPAD_TIMEOUT_SECS` env > `synthesis.timeout_secs` > none
    /// - Export dir: `cli_export_dir` > `LAUNCHPAD_EXPORT_DIR` env > `export.directory` > `.`
    pub fn resolve(cli_export_dir: Option<&Path>) -> Result<Self> {
        let file_config = load_config()?.unwrap_or_default();
        Self::resolve_with(cli_export_dir, file_config)
    }

    fn resolve_with(cli_export_dir: Option<&Path>, file_config: ConfigFile) -> Result<Self> {
        let latency_ms = match std::env::var("LAUNCHPAD_LATENCY_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("LAUNCHPAD_LATENCY_MS is not a number: {raw:?}"))?,
            Err(_) => file_config.synthesis.latency_ms,
        };

        let timeout_secs = match std::env::var("LAUNCHPAD_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .with_context(|| format!("LAUNCHPAD_TIMEOUT_SECS is not a number: {raw:?}"))?,
            ),
            Err(_) => file_config.synthesis.timeout_secs,
        };

        let export_dir = if let Some(dir) = cli_export_dir {
            dir.to_path_buf()
        } else if let Ok(dir) = std::env::var("LAUNCHPAD_EXPORT_DIR") {
            PathBuf::from(dir)
        } else if let Some(dir) = file_config.export.directory {
            dir
        } else {
            PathBuf::from(".")
        };

        Ok(Self {
            latency: Duration::from_millis(latency_ms),
            timeout: timeout_secs.map(Duration::from_secs),
            export_dir,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    fn clear_env() {
        unsafe { std::env::remove_var("LAUNCHPAD_LATENCY_MS") };
        unsafe { std::env::remove_var("LAUNCHPAD_TIMEOUT_SECS") };
        unsafe { std::env::remove_var("LAUNCHPAD_EXPORT_DIR") };
    }

    #[test]
    fn defaults_when_nothing_set() {
        let _lock = lock_env();
        clear_env();

        let config = LaunchpadConfig::resolve_with(None, ConfigFile::default()).unwrap();
        assert_eq!(config.latency, Duration::from_millis(1200));
        assert_eq!(config.timeout, None);
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let _lock = lock_env();
        clear_env();

        let file: ConfigFile = toml::from_str(
            r#"
[synthesis]
latency_ms = 10
timeout_secs = 30

[export]
directory = "/tmp/plans"
"#,
        )
        .unwrap();
        let config = LaunchpadConfig::resolve_with(None, file).unwrap();
        assert_eq!(config.latency, Duration::from_millis(10));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/plans"));
    }

    #[test]
    fn env_vars_override_config_file() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var("LAUNCHPAD_LATENCY_MS", "0") };
        unsafe { std::env::set_var("LAUNCHPAD_EXPORT_DIR", "/env/dir") };

        let file: ConfigFile =
            toml::from_str("[synthesis]\nlatency_ms = 900\n[export]\ndirectory = \"/file/dir\"\n")
                .unwrap();
        let config = LaunchpadConfig::resolve_with(None, file).unwrap();

        clear_env();
        assert_eq!(config.latency, Duration::ZERO);
        assert_eq!(config.export_dir, PathBuf::from("/env/dir"));
    }

    #[test]
    fn cli_flag_overrides_all() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var("LAUNCHPAD_EXPORT_DIR", "/env/dir") };

        let config =
            LaunchpadConfig::resolve_with(Some(Path::new("/cli/dir")), ConfigFile::default())
                .unwrap();

        clear_env();
        assert_eq!(config.export_dir, PathBuf::from("/cli/dir"));
    }

    #[test]
    fn malformed_env_var_is_an_error() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var("LAUNCHPAD_TIMEOUT_SECS", "soon") };

        let result = LaunchpadConfig::resolve_with(None, ConfigFile::default());

        clear_env();
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("LAUNCHPAD_TIMEOUT_SECS"), "unexpected error: {msg}");
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let file: ConfigFile = toml::from_str("[export]\ndirectory = \"out\"\n").unwrap();
        assert_eq!(file.synthesis.latency_ms, 1200);
        assert_eq!(file.synthesis.timeout_secs, None);
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("launchpad").join("config.toml");

        let original = ConfigFile {
            synthesis: SynthesisSection {
                latency_ms: 250,
                timeout_secs: Some(5),
            },
            export: ExportSection {
                directory: Some(PathBuf::from("/srv/plans")),
            },
        };
        save_config_to(&original, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.synthesis.latency_ms, 250);
        assert_eq!(loaded.synthesis.timeout_secs, Some(5));
        assert_eq!(loaded.export.directory, Some(PathBuf::from("/srv/plans")));
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("launchpad/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
