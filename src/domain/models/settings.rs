use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Model presets offered in the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelPreset {
    #[default]
    Genesis,
    Explorer,
    Quantum,
}

impl ModelPreset {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "genesis" => Some(ModelPreset::Genesis),
            "explorer" => Some(ModelPreset::Explorer),
            "quantum" => Some(ModelPreset::Quantum),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelPreset::Genesis => "genesis",
            ModelPreset::Explorer => "explorer",
            ModelPreset::Quantum => "quantum",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelPreset::Genesis => "Our fastest model for general use cases.",
            ModelPreset::Explorer => "Performance and speed for efficiency.",
            ModelPreset::Quantum => "The most powerful model for complex computations.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemRole {
    #[default]
    System,
    User,
    Assistant,
}

impl SystemRole {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "system" => Some(SystemRole::System),
            "user" => Some(SystemRole::User),
            "assistant" => Some(SystemRole::Assistant),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemRole::System => "system",
            SystemRole::User => "user",
            SystemRole::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Client-side chat settings. These stay local to the client and are not
/// part of the request sent to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub model: ModelPreset,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: f32,
    pub role: SystemRole,
    pub theme: Theme,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: ModelPreset::default(),
            temperature: 0.4,
            top_p: 0.7,
            top_k: 0.0,
            role: SystemRole::default(),
            theme: Theme::default(),
        }
    }
}

impl ChatSettings {
    /// Update one setting by name: `model`, `temperature`, `top_p`, `top_k`,
    /// `role` or `theme`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        let invalid = || DomainError::invalid_input(format!("invalid value for {key}: {value}"));
        match key.to_lowercase().replace('-', "_").as_str() {
            "model" => self.model = ModelPreset::from_str(value).ok_or_else(invalid)?,
            "temperature" => self.temperature = parse_number(value).ok_or_else(invalid)?,
            "top_p" => self.top_p = parse_number(value).ok_or_else(invalid)?,
            "top_k" => self.top_k = parse_number(value).ok_or_else(invalid)?,
            "role" => self.role = SystemRole::from_str(value).ok_or_else(invalid)?,
            "theme" => self.theme = Theme::from_str(value).ok_or_else(invalid)?,
            _ => return Err(DomainError::invalid_input(format!("unknown setting: {key}"))),
        }
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "Model: {} ({})\nTemperature: {}\nTop P: {}\nTop K: {}\nRole: {}\nTheme: {}",
            self.model.as_str(),
            self.model.description(),
            self.temperature,
            self.top_p,
            self.top_k,
            self.role.as_str(),
            self.theme.as_str()
        )
    }
}

fn parse_number(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}
