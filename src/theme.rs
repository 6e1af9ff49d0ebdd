use crate::mood::Mood;
use serde::{Deserialize, Serialize};

/// Named bundle of style tokens. The tokens are class references resolved by
/// whatever renders the dashboard, not colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
    pub gradient: String,
    pub name: String,
    pub is_dark: bool,
}

struct Palette {
    name: &'static str,
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    background: &'static str,
    surface: &'static str,
    gradient: &'static str,
}

const TEXT: &str = "text-gray-800";
const TEXT_SECONDARY: &str = "text-gray-600";

const HAPPY: Palette = Palette {
    name: "happy",
    primary: "from-yellow-400 to-orange-500",
    secondary: "from-orange-300 to-pink-400",
    accent: "bg-yellow-500",
    background: "bg-gradient-to-br from-yellow-50 to-orange-100",
    surface: "bg-white/80 backdrop-blur-sm border border-yellow-200/50",
    gradient: "bg-gradient-to-r from-yellow-400 via-orange-500 to-pink-500",
};

const SAD: Palette = Palette {
    name: "sad",
    primary: "from-blue-400 to-indigo-600",
    secondary: "from-slate-400 to-blue-500",
    accent: "bg-blue-500",
    background: "bg-gradient-to-br from-slate-100 to-blue-200",
    surface: "bg-white/70 backdrop-blur-sm border border-blue-200/50",
    gradient: "bg-gradient-to-r from-slate-400 via-blue-500 to-indigo-600",
};

const EXCITED: Palette = Palette {
    name: "excited",
    primary: "from-pink-500 to-rose-600",
    secondary: "from-purple-400 to-pink-500",
    accent: "bg-pink-500",
    background: "bg-gradient-to-br from-pink-100 to-rose-200",
    surface: "bg-white/80 backdrop-blur-sm border border-pink-200/50",
    gradient: "bg-gradient-to-r from-purple-500 via-pink-500 to-rose-600",
};

const CALM: Palette = Palette {
    name: "calm",
    primary: "from-green-400 to-teal-500",
    secondary: "from-emerald-300 to-green-400",
    accent: "bg-green-500",
    background: "bg-gradient-to-br from-green-50 to-teal-100",
    surface: "bg-white/75 backdrop-blur-sm border border-green-200/50",
    gradient: "bg-gradient-to-r from-emerald-400 via-green-500 to-teal-600",
};

const STRESSED: Palette = Palette {
    name: "stressed",
    primary: "from-red-400 to-orange-600",
    secondary: "from-amber-400 to-red-500",
    accent: "bg-red-500",
    background: "bg-gradient-to-br from-red-50 to-orange-100",
    surface: "bg-white/70 backdrop-blur-sm border border-red-200/50",
    gradient: "bg-gradient-to-r from-amber-500 via-red-500 to-orange-600",
};

const MOTIVATED: Palette = Palette {
    name: "motivated",
    primary: "from-purple-500 to-indigo-600",
    secondary: "from-blue-400 to-purple-500",
    accent: "bg-purple-500",
    background: "bg-gradient-to-br from-purple-100 to-indigo-200",
    surface: "bg-white/80 backdrop-blur-sm border border-purple-200/50",
    gradient: "bg-gradient-to-r from-blue-500 via-purple-500 to-indigo-600",
};

const TIRED: Palette = Palette {
    name: "tired",
    primary: "from-gray-400 to-slate-600",
    secondary: "from-stone-400 to-gray-500",
    accent: "bg-gray-500",
    background: "bg-gradient-to-br from-gray-100 to-slate-200",
    surface: "bg-white/60 backdrop-blur-sm border border-gray-200/50",
    gradient: "bg-gradient-to-r from-stone-400 via-gray-500 to-slate-600",
};

impl ThemeConfig {
    fn from_palette(palette: &Palette) -> Self {
        Self {
            primary: palette.primary.to_string(),
            secondary: palette.secondary.to_string(),
            accent: palette.accent.to_string(),
            background: palette.background.to_string(),
            surface: palette.surface.to_string(),
            text: TEXT.to_string(),
            text_secondary: TEXT_SECONDARY.to_string(),
            gradient: palette.gradient.to_string(),
            name: palette.name.to_string(),
            is_dark: false,
        }
    }

    pub fn default_theme() -> Self {
        Self::from_palette(&CALM)
    }

    /// Moods without a palette of their own (anxious, hopeful, focused) get the
    /// default theme.
    pub fn for_mood(mood: Mood) -> Self {
        let palette = match mood {
            Mood::Happy => &HAPPY,
            Mood::Sad => &SAD,
            Mood::Excited => &EXCITED,
            Mood::Stressed => &STRESSED,
            Mood::Motivated => &MOTIVATED,
            Mood::Tired => &TIRED,
            Mood::Calm | Mood::Anxious | Mood::Hopeful | Mood::Focused => &CALM,
        };
        Self::from_palette(palette)
    }

    pub fn for_label(label: &str) -> Self {
        match label.parse::<Mood>() {
            Ok(mood) => Self::for_mood(mood),
            Err(_) => Self::default_theme(),
        }
    }

    pub fn with_dark(mut self, is_dark: bool) -> Self {
        self.is_dark = is_dark;
        self
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::default_theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_happy_theme() {
        let theme = ThemeConfig::for_label("happy");
        assert_eq!(theme.name, "happy");
        assert_eq!(theme.accent, "bg-yellow-500");
        assert!(!theme.is_dark);
    }

    #[test]
    fn test_unknown_label_falls_back_to_calm() {
        let theme = ThemeConfig::for_label("bored");
        assert_eq!(theme, ThemeConfig::default_theme());
        assert_eq!(theme.name, "calm");
        assert_eq!(theme.accent, "bg-green-500");
    }

    #[test]
    fn test_moods_without_palette_use_default() {
        for mood in [Mood::Anxious, Mood::Hopeful, Mood::Focused] {
            assert_eq!(ThemeConfig::for_mood(mood), ThemeConfig::default_theme());
        }
    }

    #[test]
    fn test_every_palette_is_named_after_its_mood() {
        for mood in [
            Mood::Happy,
            Mood::Sad,
            Mood::Excited,
            Mood::Calm,
            Mood::Stressed,
            Mood::Motivated,
            Mood::Tired,
        ] {
            assert_eq!(ThemeConfig::for_mood(mood).name, mood.as_str());
        }
    }

    #[test]
    fn test_with_dark() {
        let theme = ThemeConfig::for_mood(Mood::Sad).with_dark(true);
        assert!(theme.is_dark);
        assert_eq!(theme.name, "sad");
    }
}
