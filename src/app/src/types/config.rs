use serde::{Deserialize, Serialize};
use serde_valid::Validate;

use super::ConfigError;

/// Delays, timeouts and language settings of the core.
///
/// The shell may override the defaults with `Event::Configure`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CoreConfig {
    /// Delay between a successful firmware update and the follow-up scan
    #[validate(minimum = 1)]
    pub refresh_delay_ms: u64,
    /// How long a failed update button keeps its error label
    #[validate(minimum = 1)]
    pub reset_delay_ms: u64,
    #[validate(minimum = 1)]
    pub scan_timeout_ms: u64,
    #[validate(minimum = 1)]
    pub update_timeout_ms: u64,
    #[validate(min_length = 1)]
    pub fallback_language: String,
    #[validate(min_length = 1)]
    pub translations_path: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            refresh_delay_ms: 30_000,
            reset_delay_ms: 3_000,
            scan_timeout_ms: 60_000,
            update_timeout_ms: 20_000,
            fallback_language: "en".to_string(),
            translations_path: "/static/translations".to_string(),
        }
    }
}

impl CoreConfig {
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate().map_err(|e| ConfigError(e.to_string()))?;
        Ok(self)
    }

    /// Endpoint of the translation table for `language`
    pub fn translations_endpoint(&self, language: &str) -> String {
        format!(
            "{}/{language}.json",
            self.translations_path.trim_end_matches('/')
        )
    }
}
