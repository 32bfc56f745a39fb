// config.rs - Animation and playback timing

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error_handling::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub rotation_duration_ms: u64,
    pub highlight_duration_ms: u64,
    pub step_interval_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            rotation_duration_ms: 600,
            highlight_duration_ms: 500,
            step_interval_ms: 1500,
            frame_interval_ms: 16,
        }
    }
}

impl TimingConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        let config: TimingConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("Loaded timing config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming {
                field: "step_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming {
                field: "frame_interval_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn rotation_duration(&self) -> Duration {
        Duration::from_millis(self.rotation_duration_ms)
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_duration_ms)
    }

    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimingConfig::default();
        assert_eq!(config.rotation_duration(), Duration::from_millis(600));
        assert_eq!(config.highlight_duration(), Duration::from_millis(500));
        assert_eq!(config.step_interval(), Duration::from_millis(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: TimingConfig = serde_json::from_str(r#"{"step_interval_ms": 900}"#).unwrap();
        assert_eq!(config.step_interval_ms, 900);
        assert_eq!(config.rotation_duration_ms, 600);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = TimingConfig {
            step_interval_ms: 0,
            ..TimingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTiming { field: "step_interval_ms", .. })
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = TimingConfig::load("/nonexistent/timing.json").await.unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
