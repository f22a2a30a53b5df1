//! Content catalog
//!
//! The symbol set, spelling words, colour swatches and trail palette are
//! supplied by the surrounding site. Defaults match the school's built-in
//! content; any of them can be overridden from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON document could not be parsed
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A list that games draw from is empty
    #[error("`{field}` must not be empty")]
    Empty { field: &'static str },

    /// A list contains the same entry twice
    #[error("`{field}` contains duplicate entry {value:?}")]
    Duplicate { field: &'static str, value: String },

    /// A colour string is not `#RRGGBB`
    #[error("invalid hex colour {0:?}")]
    BadColor(String),

    /// A spelling word contains something other than letters
    #[error("spelling word {0:?} must contain letters only")]
    BadWord(String),
}

/// A named, tappable colour swatch (Color Quest)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub hex: String,
}

impl Swatch {
    pub fn new(name: &str, hex: &str) -> Self {
        Self {
            name: name.to_string(),
            hex: hex.to_string(),
        }
    }
}

/// All content the games and the trail draw from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Emoji used by Memory Match, Emoji Pop and Quick Count
    pub symbols: Vec<String>,
    /// Spelling Bee word list (stored upper-case)
    pub words: Vec<String>,
    /// Color Quest swatches
    pub swatches: Vec<Swatch>,
    /// Trail particle colours (`#RRGGBB`)
    pub trail_palette: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            symbols: strings(&["🐶", "🐱", "🐰", "🦊", "🦁", "🐸", "🐼", "🐨"]),
            words: strings(&[
                "APPLE", "ROBOT", "SCHOOL", "DOGGY", "HAPPY", "WATER", "LEMON", "MANGO", "TIGER",
            ]),
            swatches: vec![
                Swatch::new("Blue", "#3B82F6"),
                Swatch::new("Yellow", "#FACC15"),
                Swatch::new("Green", "#22C55E"),
                Swatch::new("Pink", "#EC4899"),
                Swatch::new("Purple", "#A855F7"),
                Swatch::new("Orange", "#F97316"),
            ],
            trail_palette: strings(&[
                "#2563EB", "#FBBF24", "#16A34A", "#F43F5E", "#7C3AED", "#FFD700",
            ]),
        }
    }
}

impl Catalog {
    /// Parse and validate a catalog. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut catalog: Catalog = serde_json::from_str(json)?;
        for word in &mut catalog.words {
            *word = word.to_uppercase();
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every invariant the games rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_unique("symbols", self.symbols.iter().map(String::as_str))?;
        require_unique("words", self.words.iter().map(String::as_str))?;
        require_unique("swatches", self.swatches.iter().map(|s| s.name.as_str()))?;
        if self.trail_palette.is_empty() {
            return Err(ConfigError::Empty {
                field: "trail_palette",
            });
        }

        if let Some(word) = self
            .words
            .iter()
            .find(|w| !w.chars().all(|c| c.is_alphabetic()))
        {
            return Err(ConfigError::BadWord(word.clone()));
        }

        for hex in self
            .swatches
            .iter()
            .map(|s| &s.hex)
            .chain(self.trail_palette.iter())
        {
            parse_hex(hex)?;
        }
        Ok(())
    }

    /// Trail palette as sRGB RGBA components, ready for the renderer
    pub fn trail_colors(&self) -> Result<Vec<[f32; 4]>, ConfigError> {
        self.trail_palette.iter().map(|hex| parse_hex(hex)).collect()
    }
}

fn require_unique<'a>(
    field: &'static str,
    items: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen: Vec<&str> = Vec::new();
    for item in items {
        if item.is_empty() {
            return Err(ConfigError::Empty { field });
        }
        if seen.contains(&item) {
            return Err(ConfigError::Duplicate {
                field,
                value: item.to_string(),
            });
        }
        seen.push(item);
    }
    if seen.is_empty() {
        return Err(ConfigError::Empty { field });
    }
    Ok(())
}

/// Parse `#RRGGBB` into RGBA components in 0..=1 (alpha 1)
pub fn parse_hex(hex: &str) -> Result<[f32; 4], ConfigError> {
    let bad = || ConfigError::BadColor(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(bad)?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| bad())
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 1.0])
}
