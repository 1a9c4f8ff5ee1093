use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::PolyfillError;
use crate::logging::LogLevel;

/// Config file looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "scope-polyfill.json";

pub const DEFAULT_SUFFIX: &str = ".scoped.css";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolyfillConfig {
    /// Glob patterns of stylesheet sources.
    pub include: Vec<String>,
    /// Glob patterns removed from the include set.
    pub exclude: Vec<String>,
    /// Directory for generated files; next to each source when unset.
    pub out_dir: Option<String>,
    pub suffix: String,
    /// The target engine supports `@scope` natively, so the session does nothing.
    pub native_scope: bool,
    pub watch: WatchConfig,
    pub log_level: LogLevel,
}

impl Default for PolyfillConfig {
    fn default() -> Self {
        Self {
            include: vec!["**/*.css".to_string()],
            exclude: Vec::new(),
            out_dir: None,
            suffix: DEFAULT_SUFFIX.to_string(),
            native_scope: false,
            watch: WatchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WatchConfig {
    pub strategy: WatchStrategyKind,
    pub interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            strategy: WatchStrategyKind::Poll,
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStrategyKind {
    #[default]
    Poll,
    None,
}

impl PolyfillConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PolyfillError::io(path, e))?;
        let config: PolyfillConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`PolyfillConfig::load`], falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), PolyfillError> {
        if self.include.is_empty() {
            return Err(PolyfillError::Config {
                key: "include",
                value: "[]".to_string(),
            });
        }
        // Without an out dir a bare `.css` suffix would overwrite the sources.
        if self.suffix.is_empty() || (self.out_dir.is_none() && self.suffix == ".css") {
            return Err(PolyfillError::Config {
                key: "suffix",
                value: self.suffix.clone(),
            });
        }
        if self.watch.interval_ms == 0 {
            return Err(PolyfillError::Config {
                key: "watch.intervalMs",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}
