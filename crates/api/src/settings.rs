//! Server settings loaded from file and environment

use fatigue_analysis::AnalyzerConfig;
use serde::Deserialize;

/// Server settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Listen address, e.g. "0.0.0.0:8080"
    pub bind_addr: String,
    /// Analyzer preset: "default", "strict", or "lenient"
    pub analyzer_preset: String,
}

impl Settings {
    /// Load settings from `fatigue-pipeline.toml` (optional) and
    /// `FATIGUE_*` environment variables, over built-in defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("analyzer_preset", "default")?
            .add_source(config::File::with_name("fatigue-pipeline").required(false))
            .add_source(config::Environment::with_prefix("FATIGUE"))
            .build()?
            .try_deserialize()
    }

    /// Analyzer configuration matching the configured preset.
    /// Unknown preset names fall back to the default configuration.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        match self.analyzer_preset.as_str() {
            "strict" => AnalyzerConfig::strict(),
            "lenient" => AnalyzerConfig::lenient(),
            _ => AnalyzerConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            analyzer_preset: "default".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_mapping() {
        let mut settings = Settings::default();
        assert_eq!(settings.analyzer_config().blink_ear_threshold, 0.25);

        settings.analyzer_preset = "strict".to_string();
        assert_eq!(settings.analyzer_config().blink_ear_threshold, 0.28);

        settings.analyzer_preset = "unknown".to_string();
        assert_eq!(settings.analyzer_config().blink_ear_threshold, 0.25);
    }
}
