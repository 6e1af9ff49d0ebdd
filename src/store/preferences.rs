use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Grid,
    List,
    Stacked,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Grid => write!(f, "grid"),
            Layout::List => write!(f, "list"),
            Layout::Stacked => write!(f, "stacked"),
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Ok(Layout::Grid),
            "list" => Ok(Layout::List),
            "stacked" => Ok(Layout::Stacked),
            _ => Err(format!("Invalid layout: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub layout: Layout,
    pub accent_color: String,
    pub font_style: String,
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            layout: Layout::Grid,
            accent_color: "#3B82F6".to_string(),
            font_style: "Inter".to_string(),
            sound_enabled: true,
            notifications_enabled: true,
        }
    }
}

/// Partial preferences update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreferencesPatch {
    pub layout: Option<Layout>,
    pub accent_color: Option<String>,
    pub font_style: Option<String>,
    pub sound_enabled: Option<bool>,
    pub notifications_enabled: Option<bool>,
}

impl Preferences {
    pub fn merge(&mut self, patch: PreferencesPatch) {
        if let Some(layout) = patch.layout {
            self.layout = layout;
        }
        if let Some(accent_color) = patch.accent_color {
            self.accent_color = accent_color;
        }
        if let Some(font_style) = patch.font_style {
            self.font_style = font_style;
        }
        if let Some(sound_enabled) = patch.sound_enabled {
            self.sound_enabled = sound_enabled;
        }
        if let Some(notifications_enabled) = patch.notifications_enabled {
            self.notifications_enabled = notifications_enabled;
        }
    }
}
