//! # Palette Store
//!
//! The named palettes a manager can switch between: the caller supplied
//! `default` and the two fixed built-ins `noir` and `pale`.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::ThemeError;
use crate::palette::Palette;

/// Name of a palette held by the [PaletteStore].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteName {
    /// The palette supplied at construction.
    Default,
    /// The dark built-in.
    Noir,
    /// The light built-in.
    Pale,
}

impl PaletteName {
    /// Every name, in store order.
    pub const ALL: [PaletteName; 3] = [PaletteName::Default, PaletteName::Noir, PaletteName::Pale];

    /// The lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            PaletteName::Default => "default",
            PaletteName::Noir => "noir",
            PaletteName::Pale => "pale",
        }
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteName {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(PaletteName::Default),
            "noir" => Ok(PaletteName::Noir),
            "pale" => Ok(PaletteName::Pale),
            _ => Err(ThemeError::unknown_palette(s)),
        }
    }
}

/// Read-only mapping from [PaletteName] to [Palette].
#[derive(Debug, Clone)]
pub struct PaletteStore {
    palettes: IndexMap<PaletteName, Palette>,
}

impl PaletteStore {
    /// Create a store. Without a default palette, `default` uses the noir values.
    pub fn new(default: Option<Palette>) -> Self {
        let mut palettes = IndexMap::with_capacity(PaletteName::ALL.len());
        palettes.insert(PaletteName::Default, default.unwrap_or_else(Palette::noir));
        palettes.insert(PaletteName::Noir, Palette::noir());
        palettes.insert(PaletteName::Pale, Palette::pale());
        Self { palettes }
    }

    /// Get a palette by name.
    pub fn get(&self, name: PaletteName) -> &Palette {
        &self.palettes[&name]
    }

    /// Get a palette by its string name.
    pub fn get_by_name(&self, name: &str) -> Option<&Palette> {
        name.parse::<PaletteName>().ok().map(|name| self.get(name))
    }

    /// The `default` palette.
    pub fn default_palette(&self) -> &Palette {
        self.get(PaletteName::Default)
    }

    /// The `noir` palette.
    pub fn noir(&self) -> &Palette {
        self.get(PaletteName::Noir)
    }

    /// The `pale` palette.
    pub fn pale(&self) -> &Palette {
        self.get(PaletteName::Pale)
    }

    /// Names in store order.
    pub fn names(&self) -> impl Iterator<Item = PaletteName> + '_ {
        self.palettes.keys().copied()
    }

    /// Name/palette pairs in store order.
    pub fn iter(&self) -> impl Iterator<Item = (PaletteName, &Palette)> {
        self.palettes.iter().map(|(name, palette)| (*name, palette))
    }
}

impl Default for PaletteStore {
    fn default() -> Self {
        Self::new(None)
    }
}
