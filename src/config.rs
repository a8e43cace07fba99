use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::{
    app::ActiveView,
    capacity,
    notice::DEFAULT_NOTICE_DURATION,
    removal::DEFAULT_COMMIT_DELAY,
    themes::ThemeName,
};

/// Runtime settings. Built-in defaults, overlaid by an optional JSON file,
/// overlaid by command line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Starting capacity of both the stack and the queue, clamped to [1, 200]
    pub default_capacity: i64,
    /// Delay between a pop/dequeue and its commit
    pub commit_delay_ms: u64,
    /// How long a notice stays on screen
    pub notice_duration_ms: u64,
    /// Event loop tick rate
    pub tick_rate_ms: u64,
    pub theme: String,
    pub initial_view: ActiveView,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_capacity: capacity::DEFAULT_CAPACITY as i64,
            commit_delay_ms: DEFAULT_COMMIT_DELAY.as_millis() as u64,
            notice_duration_ms: DEFAULT_NOTICE_DURATION.as_millis() as u64,
            tick_rate_ms: 50,
            theme: ThemeName::Default.as_str().to_string(),
            initial_view: ActiveView::Stack,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self> {
        if let Err(msg) = self.theme.parse::<ThemeName>() {
            bail!(msg);
        }
        if self.tick_rate_ms == 0 {
            bail!("tick_rate_ms must be at least 1");
        }
        Ok(self)
    }

    pub fn capacity(&self) -> usize {
        capacity::clamp_capacity(self.default_capacity)
    }

    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn theme_name(&self) -> ThemeName {
        self.theme.parse().unwrap_or(ThemeName::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.capacity(), 5);
        assert_eq!(config.commit_delay(), Duration::from_millis(500));
        assert_eq!(config.notice_duration(), Duration::from_millis(700));
        assert_eq!(config.theme_name(), ThemeName::Default);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(r#"{ "commit_delay_ms": 250, "initial_view": "queue" }"#);
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.commit_delay(), Duration::from_millis(250));
        assert_eq!(config.initial_view, ActiveView::Queue);
        assert_eq!(config.capacity(), 5);
        assert_eq!(config.tick_rate_ms, 50);
    }

    #[test]
    fn test_capacity_is_clamped_not_rejected() {
        let file = write_config(r#"{ "default_capacity": -3 }"#);
        assert_eq!(Config::load(file.path()).unwrap().capacity(), 1);

        let file = write_config(r#"{ "default_capacity": 4096 }"#);
        assert_eq!(Config::load(file.path()).unwrap().capacity(), 200);
    }

    #[test]
    fn test_invalid_theme_is_rejected() {
        let file = write_config(r#"{ "theme": "neon" }"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid theme 'neon'"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let file = write_config(r#"{ "capacity": 3 }"#);
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = Config::load(Path::new("/nonexistent/dsviz.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
