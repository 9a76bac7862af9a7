use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub email: String,
}

/// The persisted authentication record. Token and user are written and
/// cleared together; a partially cleared record never exists on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user: UserAccount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Converter,
    Dashboard,
    History,
    Help,
    About,
    Settings,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Converter,
        Page::Dashboard,
        Page::History,
        Page::Help,
        Page::About,
        Page::Settings,
    ];

    /// Parses a URL fragment. Anything outside the fixed page set yields
    /// `None`; callers must leave the active page untouched in that case.
    pub fn from_fragment(raw: &str) -> Option<Page> {
        match raw {
            "converter" => Some(Page::Converter),
            "dashboard" => Some(Page::Dashboard),
            "history" => Some(Page::History),
            "help" => Some(Page::Help),
            "about" => Some(Page::About),
            "settings" => Some(Page::Settings),
            _ => None,
        }
    }

    pub fn fragment(&self) -> &'static str {
        match self {
            Page::Converter => "converter",
            Page::Dashboard => "dashboard",
            Page::History => "history",
            Page::Help => "help",
            Page::About => "about",
            Page::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Converter => "Braille Converter",
            Page::Dashboard => "Analytics Dashboard",
            Page::History => "Conversion History",
            Page::Help => "Help & Documentation",
            Page::About => "About Project",
            Page::Settings => "Settings",
        }
    }
}

/// A successful backend conversion: recognized text plus the optional
/// synthesized audio reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub text: String,
    pub confidence: f64,
    pub audio_url: Option<String>,
    pub duration: Option<f64>,
}
