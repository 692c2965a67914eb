//! Editor configuration.

use crate::buffer::TextFlags;
use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EditConfig {
    pub read_only: bool,
    pub multiline: bool,
    pub rich: bool,
    /// Layout box width.
    pub width: f32,
    /// Layout box height.
    pub height: f32,
    /// System caret thickness.
    pub caret_width: f32,
    /// Selection highlight, RGBA.
    pub selection_color: [u8; 4],
    /// Whether a typed tab character is inserted.
    pub tab_inserts: bool,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            multiline: false,
            rich: false,
            width: 128.0,
            height: 64.0,
            caret_width: 2.0,
            selection_color: [135, 206, 250, 255],
            tab_inserts: true,
        }
    }
}

impl EditConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(self.caret_width.is_finite() && self.caret_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "caret_width must be positive, got {}",
                self.caret_width
            )));
        }
        Ok(())
    }

    pub fn flags(&self) -> TextFlags {
        TextFlags {
            read_only: self.read_only,
            multiline: self.multiline,
            rich: self.rich,
        }
    }
}
