//! Configuration management for sortviz.
//!
//! Loads configuration from ${SORTVIZ_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::drivers::Algorithm;
use crate::scheduler::DEFAULT_DELAY_MS;

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// New comments/sections from the template are always present while the
/// user's customized values are kept.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for sortviz configuration and logs.
    //!
    //! SORTVIZ_HOME resolution order:
    //! 1. SORTVIZ_HOME environment variable (if set)
    //! 2. ~/.config/sortviz
    //! 3. ./.sortviz when no home directory can be determined

    use std::path::PathBuf;

    pub fn sortviz_home() -> PathBuf {
        if let Ok(home) = std::env::var("SORTVIZ_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".sortviz"),
            |h| h.join(".config").join("sortviz"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        sortviz_home().join("config.toml")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `EnvFilter` directive (overridden by `SORTVIZ_LOG`).
    pub level: String,
    /// Log file name, relative to SORTVIZ_HOME unless absolute.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "sortviz.log".to_string(),
        }
    }
}

impl LogConfig {
    pub fn file_path(&self) -> PathBuf {
        let file = Path::new(&self.file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            paths::sortviz_home().join(file)
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds per full beat
    pub delay_ms: u64,

    /// Default algorithm for headless runs
    pub algorithm: Algorithm,

    /// Values committed at startup
    pub values: Vec<i64>,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            algorithm: Algorithm::default(),
            values: Self::DEFAULT_VALUES.to_vec(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_VALUES: [i64; 6] = [5, 3, 8, 1, 9, 2];

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the delay to the config file.
    pub fn save_delay(delay_ms: u64) -> Result<()> {
        Self::save_delay_to(&paths::config_path(), delay_ms)
    }

    /// Saves only the delay to a specific config file path.
    ///
    /// Creates the file from the template if it doesn't exist; otherwise the
    /// user's values are merged into the latest template first.
    pub fn save_delay_to(path: &Path, delay_ms: u64) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents.parse().context("Failed to parse config")?;
        let delay = i64::try_from(delay_ms).context("delay_ms out of range")?;
        doc["delay_ms"] = value(delay);

        Self::write_config(path, &doc.to_string())
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Generates a fresh config TOML from Rust defaults, keeping the
    /// template's comments.
    pub fn generate() -> Result<String> {
        let generated =
            toml::to_string(&Config::default()).context("Failed to serialize default config")?;
        merge_with_template(&generated)
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move config into {}", path.display()))?;
        Ok(())
    }
}
