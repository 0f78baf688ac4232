use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Marker names and fixed values shared by the controller and host page CSS
///
/// Defaults match the stock `davidmodal` stylesheet. Any field can be overridden from a
/// partial JSON document, see [`ModalConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalConfig {
    /// Class identifying elements to process on page-ready
    pub trigger_class: String,
    /// Attribute whose non-empty value selects embedded-document mode
    pub link_attribute: String,
    /// Class on a trigger selecting reload-on-close
    pub refresh_class: String,
    pub container_class: String,
    pub content_class: String,
    pub close_class: String,
    pub shown_class: String,
    pub hidden_class: String,
    /// Attribute holding the show counter used to abandon stale hide timers
    pub generation_attribute: String,
    /// Used when the page body background resolves to transparent
    pub fallback_background: String,
    /// Inline `display` forced on a container by `show`
    pub shown_display: String,
    /// Inline `display` given to a relocated element so it shows inside its container
    pub relocated_display: String,
    /// Element created as the invisible sample during background resolution
    pub sample_tag: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            trigger_class: "davidmodal".to_string(),
            link_attribute: "href".to_string(),
            refresh_class: "davidmodal-x-refresh".to_string(),
            container_class: "davidmodal-container".to_string(),
            content_class: "davidmodal-content".to_string(),
            close_class: "davidmodal-x".to_string(),
            shown_class: "showdavidmodal".to_string(),
            hidden_class: "hidedavidmodal".to_string(),
            generation_attribute: "data-davidmodal-generation".to_string(),
            fallback_background: "white".to_string(),
            shown_display: "block".to_string(),
            relocated_display: "initial".to_string(),
            sample_tag: "p".to_string(),
        }
    }
}

impl ModalConfig {
    /// Parse a (possibly partial) JSON object and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("trigger_class", &self.trigger_class),
            ("link_attribute", &self.link_attribute),
            ("refresh_class", &self.refresh_class),
            ("container_class", &self.container_class),
            ("content_class", &self.content_class),
            ("close_class", &self.close_class),
            ("shown_class", &self.shown_class),
            ("hidden_class", &self.hidden_class),
            ("generation_attribute", &self.generation_attribute),
            ("sample_tag", &self.sample_tag),
        ];
        for (name, value) in required {
            let value = value.trim();
            if value.is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
            if value.contains(char::is_whitespace) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a single token, got {value:?}"
                )));
            }
        }
        if self.shown_class == self.hidden_class {
            return Err(ConfigError::Invalid(
                "shown_class and hidden_class must differ".to_string(),
            ));
        }
        if self.trigger_class == self.container_class {
            return Err(ConfigError::Invalid(
                "trigger_class and container_class must differ".to_string(),
            ));
        }
        Ok(())
    }
}
