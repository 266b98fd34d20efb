//! Color palettes supplied to template substitution
//!
//! A palette maps color names (`background`, `foreground`, `color0` through
//! `color15`, ...) to `#RRGGBB` strings. Palettes load from a TOML stylesheet
//! or from a pywal-style `colors.json` cache; the engine itself never mutates
//! one.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing palette files
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read palette file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse palette TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse palette JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named set of hex colors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    /// Optional name for the palette
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    colors: HashMap<String, String>,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// pywal cache structure: sixteen `colors` plus the `special` trio
/// (background, foreground, cursor)
#[derive(Deserialize)]
struct WalCache {
    #[serde(default)]
    special: HashMap<String, String>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

impl Palette {
    /// Load a palette file, dispatching on extension: `.json` is read as a
    /// pywal cache, anything else as a TOML stylesheet.
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_wal_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Load a palette from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;

        Ok(Palette {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Load a palette from a pywal `colors.json` string. Special entries
    /// override numbered colors of the same name.
    pub fn from_wal_json(content: &str) -> Result<Self, PaletteError> {
        let parsed: WalCache = serde_json::from_str(content)?;

        let mut colors = parsed.colors;
        colors.extend(parsed.special);

        Ok(Palette {
            name: None,
            description: None,
            colors,
        })
    }

    /// The gray placeholder palette the theming tool uses before any colors
    /// have been generated.
    pub fn gray() -> Self {
        let mut colors = HashMap::new();
        colors.insert("background".to_string(), "#000000".to_string());
        colors.insert("foreground".to_string(), "#808080".to_string());
        for i in 0..16 {
            colors.insert(format!("color{}", i), "#808080".to_string());
        }
        Palette {
            name: None,
            description: None,
            colors,
        }
    }

    /// Look up the hex value for a color name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.colors.get(name).map(|s| s.as_str())
    }

    pub fn insert(&mut self, name: impl Into<String>, hex: impl Into<String>) {
        self.colors.insert(name.into(), hex.into());
    }

    /// Iterate over `(name, hex)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Palette {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Palette {
            name: None,
            description: None,
            colors: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
