use serde::{Deserialize, Serialize};

/// The persisted settings record. Known keys are typed; anything else that
/// was ever written to the record survives load/save untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Settings {
    pub fn theme(&self) -> Theme {
        self.theme.as_deref().map(Theme::parse).unwrap_or_default()
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
            .as_deref()
            .map(FontSize::parse)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    /// Unrecognized values fall back to the default.
    pub fn parse(raw: &str) -> Theme {
        match raw {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// Unrecognized values fall back to medium.
    pub fn parse(raw: &str) -> FontSize {
        match raw {
            "small" => FontSize::Small,
            "large" => FontSize::Large,
            _ => FontSize::Medium,
        }
    }

    /// Root font size in pixels for the fixed three-step scale.
    pub fn scale_px(&self) -> u8 {
        match self {
            FontSize::Small => 14,
            FontSize::Medium => 16,
            FontSize::Large => 18,
        }
    }
}

/// The CSS custom-property values a theme swaps in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemePalette {
    pub bg: &'static str,
    pub surface: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
}

const LIGHT_PALETTE: ThemePalette = ThemePalette {
    bg: "#f8fafc",
    surface: "#ffffff",
    text_primary: "#1e293b",
    text_secondary: "#64748b",
    border: "#e2e8f0",
};

const DARK_PALETTE: ThemePalette = ThemePalette {
    bg: "#1e293b",
    surface: "#334155",
    text_primary: "#f1f5f9",
    text_secondary: "#cbd5e1",
    border: "#475569",
};

pub fn theme_palette(theme: Theme) -> ThemePalette {
    match theme {
        Theme::Dark => DARK_PALETTE,
        // Auto would follow the system preference; until a shell reports
        // one, it renders with the light palette.
        Theme::Light | Theme::Auto => LIGHT_PALETTE,
    }
}
