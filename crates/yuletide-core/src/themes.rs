//! Theme catalogue.
//!
//! Rendering is out of scope; the core only needs to validate the stored
//! theme id and expose the palette metadata the CLI prints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Classic,
    Winter,
    Royal,
    Candy,
    Golden,
    Icy,
    Forest,
    Sunset,
    Aurora,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

impl ThemeId {
    pub const ALL: [ThemeId; 9] = [
        ThemeId::Classic,
        ThemeId::Winter,
        ThemeId::Royal,
        ThemeId::Candy,
        ThemeId::Golden,
        ThemeId::Icy,
        ThemeId::Forest,
        ThemeId::Sunset,
        ThemeId::Aurora,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Classic => "classic",
            ThemeId::Winter => "winter",
            ThemeId::Royal => "royal",
            ThemeId::Candy => "candy",
            ThemeId::Golden => "golden",
            ThemeId::Icy => "icy",
            ThemeId::Forest => "forest",
            ThemeId::Sunset => "sunset",
            ThemeId::Aurora => "aurora",
        }
    }

    /// Unknown ids fall back to [`ThemeId::Classic`].
    pub fn parse_or_default(id: &str) -> Self {
        id.parse().unwrap_or_default()
    }

    pub fn palette(&self) -> Palette {
        let (name, primary, secondary, accent) = match self {
            ThemeId::Classic => ("Classic Christmas", "#dc2626", "#16a34a", "#facc15"),
            ThemeId::Winter => ("Winter Wonderland", "#3b82f6", "#e0f2fe", "#93c5fd"),
            ThemeId::Royal => ("Royal Purple", "#7c3aed", "#fbbf24", "#c4b5fd"),
            ThemeId::Candy => ("Candy Cane", "#ef4444", "#ffffff", "#fca5a5"),
            ThemeId::Golden => ("Golden Night", "#d97706", "#1f2937", "#fde68a"),
            ThemeId::Icy => ("Icy Blue", "#06b6d4", "#f0f9ff", "#67e8f9"),
            ThemeId::Forest => ("Evergreen Forest", "#15803d", "#78350f", "#86efac"),
            ThemeId::Sunset => ("Winter Sunset", "#f97316", "#be185d", "#fdba74"),
            ThemeId::Aurora => ("Northern Aurora", "#10b981", "#6366f1", "#a7f3d0"),
        };
        Palette {
            name,
            primary,
            secondary,
            accent,
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeId::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "selectedTheme".into(),
                message: format!("unknown theme '{s}'"),
            })
    }
}
