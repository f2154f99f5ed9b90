//! Configuration for polymerge.
//!
//! Loads config from:
//! 1. Global: ~/.config/polymerge/config.toml
//! 2. Per-project: .polymerge/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [merge]
//! strategy = "compressed-transport"
//!
//! [output]
//! path = "dist/app.py.js"
//! ```
//!
//! Command-line flags override both files.

use polymerge_core::Strategy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Output file used when neither the command line nor a config names one.
pub const DEFAULT_OUTPUT: &str = "out/result.py.js";

/// Merge configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MergeConfig {
    /// Composition strategy used when no strategy flag is given.
    pub strategy: Option<Strategy>,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Output file used when none is given on the command line.
    pub path: Option<PathBuf>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PolymergeConfig {
    pub merge: MergeConfig,
    pub output: OutputConfig,
}

impl PolymergeConfig {
    /// Load configuration for a project.
    pub fn load(root: &Path) -> Self {
        Self::load_from(Self::global_config_path().as_deref(), root)
    }

    fn load_from(global: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = global.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".polymerge").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("polymerge").join("config.toml"))
    }

    /// Load config from a file path. A missing file is silent; a malformed
    /// one is reported and ignored.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Merge another config into this one; set values in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            merge: MergeConfig {
                strategy: other.merge.strategy.or(self.merge.strategy),
            },
            output: OutputConfig {
                path: other.output.path.or(self.output.path),
            },
        }
    }

    /// Strategy to use when no flag was passed.
    pub fn strategy(&self) -> Strategy {
        self.merge.strategy.unwrap_or_default()
    }

    /// Output path to use when none was passed.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}
