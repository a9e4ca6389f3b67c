//! # Theme Configuration
//!
//! [ThemerConfig] gathers the constants a [crate::manager::ThemeManager] is
//! built from. The defaults reproduce the stock behaviour; everything can be
//! overridden programmatically, from a TOML file, or from the environment.
//!
//! ## Environment Variables
//!
//! - `THEMER_CONFIG`: Path to a TOML configuration file
//! - `THEMER_STORAGE_KEY`: Storage key the active palette is persisted under
//! - `THEMER_DEFAULT`: Built-in palette (`noir` or `pale`) used as `default`
//!
//! ## Configuration File Format
//!
//! ```toml
//! [theme]
//! storage_key = "theme"
//! default = "noir"
//!
//! [fonts]
//! families = ["input_mono_regular", "custom_serif", "custom_sans_serif"]
//! base_size = 12
//!
//! [import]
//! extensions = [".thm", ".svg"]
//! ```
//!
//! `default` may also be an inline table with the nine palette fields.

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ThemeError, ThemeResult};
use crate::fonts::{DEFAULT_FONTS, DEFAULT_FONT_SIZE};
use crate::palette::Palette;
use crate::storage::DEFAULT_STORAGE_KEY;
use crate::store::{PaletteName, PaletteStore};

/// Extensions a dropped file name must contain to be imported.
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".thm", ".svg"];

/// Settings for a theme manager.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemerConfig {
    /// Key the active palette is persisted under.
    pub storage_key: String,
    /// Palette used when storage holds nothing usable, and by `reset`.
    pub default_palette: Palette,
    /// Font families cycled by `next_font`/`previous_font`.
    pub fonts: Vec<String>,
    /// Font size restored by `reset_font_size`, in pixels.
    pub base_font_size: i32,
    /// Substrings that mark a dropped file as a theme.
    pub accepted_extensions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: ThemeSection,
    #[serde(default)]
    fonts: FontSection,
    #[serde(default)]
    import: ImportSection,
}

#[derive(Debug, Default, Deserialize)]
struct ThemeSection {
    storage_key: Option<String>,
    default: Option<DefaultPalette>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DefaultPalette {
    Named(String),
    Inline(Palette),
}

#[derive(Debug, Default, Deserialize)]
struct FontSection {
    families: Option<Vec<String>>,
    base_size: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct ImportSection {
    extensions: Option<Vec<String>>,
}

impl ThemerConfig {
    /// Create a configuration with the stock defaults.
    pub fn new() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_palette: Palette::noir(),
            fonts: DEFAULT_FONTS.iter().map(|f| f.to_string()).collect(),
            base_font_size: DEFAULT_FONT_SIZE,
            accepted_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Create a configuration from environment variables or use defaults.
    ///
    /// A config file named by `THEMER_CONFIG` is applied first; the other
    /// variables override it. Unreadable files are logged and skipped.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();

        if let Ok(config_path) = env::var("THEMER_CONFIG") {
            match Self::from_file(&config_path) {
                Ok(file_config) => config = file_config,
                Err(e) => log::warn!("Ignoring THEMER_CONFIG: {}", e),
            }
        }

        if let Ok(key) = env::var("THEMER_STORAGE_KEY") {
            if !key.is_empty() {
                config.storage_key = key;
            }
        }

        if let Ok(name) = env::var("THEMER_DEFAULT") {
            match builtin_palette(&name) {
                Ok(palette) => config.default_palette = palette,
                Err(e) => log::warn!("Ignoring THEMER_DEFAULT: {}", e),
            }
        }

        config
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ThemeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| match e {
            ThemeError::ConfigParse { details, .. } => {
                ThemeError::config_parse(Some(path.to_path_buf()), details)
            },
            other => other,
        })
    }

    /// Load a configuration from TOML content. Missing keys keep their defaults.
    ///
    /// ```rust
    /// use themer_theme::config::ThemerConfig;
    /// use themer_theme::palette::Palette;
    ///
    /// let config = ThemerConfig::from_toml("[theme]\ndefault = \"pale\"").unwrap();
    /// assert_eq!(config.default_palette, Palette::pale());
    /// ```
    pub fn from_toml(content: &str) -> ThemeResult<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ThemeError::config_parse(None, e.to_string()))?;
        let mut config = Self::new();

        if let Some(key) = file.theme.storage_key {
            config.storage_key = key;
        }
        match file.theme.default {
            Some(DefaultPalette::Named(name)) => config.default_palette = builtin_palette(&name)?,
            Some(DefaultPalette::Inline(palette)) => config.default_palette = palette,
            None => {},
        }
        if let Some(families) = file.fonts.families {
            config.fonts = families;
        }
        if let Some(size) = file.fonts.base_size {
            config.base_font_size = size;
        }
        if let Some(extensions) = file.import.extensions {
            config.accepted_extensions = extensions;
        }

        Ok(config)
    }

    /// Set the default palette.
    pub fn with_default_palette(mut self, palette: Palette) -> Self {
        self.default_palette = palette;
        self
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the font families.
    pub fn with_fonts<I, S>(mut self, fonts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fonts = fonts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the reset font size.
    pub fn with_base_font_size(mut self, size: i32) -> Self {
        self.base_font_size = size;
        self
    }

    /// Set the accepted dropped-file extensions.
    pub fn with_accepted_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a file name contains one of the accepted extensions.
    pub fn accepts_file_name(&self, name: &str) -> bool {
        self.accepted_extensions
            .iter()
            .any(|extension| name.contains(extension.as_str()))
    }
}

impl Default for ThemerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_palette(name: &str) -> ThemeResult<Palette> {
    match name.parse::<PaletteName>()? {
        PaletteName::Default => Ok(Palette::noir()),
        name => Ok(PaletteStore::default().get(name).clone()),
    }
}
