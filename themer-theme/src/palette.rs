//! # Palettes
//!
//! A [Palette] is the nine-colour record every theme is made of. Colour values
//! are opaque strings (`#222`, `rebeccapurple`, ...) and are passed through
//! verbatim into the stylesheet and the persisted JSON.
//!
//! Fields are optional so that partially specified imports survive the round
//! trip unchanged. Only `background` is checked before a palette is applied;
//! see [Palette::is_valid].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ThemeResult;

/// One of the nine named colours of a [Palette].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteField {
    /// Window background.
    Background,
    /// High contrast foreground.
    FHigh,
    /// Medium contrast foreground.
    FMed,
    /// Low contrast foreground.
    FLow,
    /// Foreground drawn on inverted backgrounds.
    FInv,
    /// High contrast background.
    BHigh,
    /// Medium contrast background.
    BMed,
    /// Low contrast background.
    BLow,
    /// Inverted background.
    BInv,
}

impl PaletteField {
    /// Every field, in stylesheet order.
    pub const ALL: [PaletteField; 9] = [
        PaletteField::Background,
        PaletteField::FHigh,
        PaletteField::FMed,
        PaletteField::FLow,
        PaletteField::FInv,
        PaletteField::BHigh,
        PaletteField::BMed,
        PaletteField::BLow,
        PaletteField::BInv,
    ];

    /// The field's key, as used in JSON, SVG ids and CSS custom properties.
    pub fn name(self) -> &'static str {
        match self {
            PaletteField::Background => "background",
            PaletteField::FHigh => "f_high",
            PaletteField::FMed => "f_med",
            PaletteField::FLow => "f_low",
            PaletteField::FInv => "f_inv",
            PaletteField::BHigh => "b_high",
            PaletteField::BMed => "b_med",
            PaletteField::BLow => "b_low",
            PaletteField::BInv => "b_inv",
        }
    }

    /// Look a field up by its key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for PaletteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A nine-colour theme palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Window background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// High contrast foreground.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_high: Option<String>,
    /// Medium contrast foreground.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_med: Option<String>,
    /// Low contrast foreground.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_low: Option<String>,
    /// Foreground drawn on inverted backgrounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f_inv: Option<String>,
    /// High contrast background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_high: Option<String>,
    /// Medium contrast background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_med: Option<String>,
    /// Low contrast background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_low: Option<String>,
    /// Inverted background.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_inv: Option<String>,
}

impl Palette {
    /// Build a complete palette from nine values in [PaletteField::ALL] order.
    pub fn from_values(values: [&str; 9]) -> Self {
        let mut palette = Self::default();
        for (field, value) in PaletteField::ALL.into_iter().zip(values) {
            palette.set(field, value);
        }
        palette
    }

    /// The dark built-in palette.
    pub fn noir() -> Self {
        Self::from_values([
            "#222", "#fff", "#ccc", "#999", "#fff", "#888", "#666", "#444", "#000",
        ])
    }

    /// The light built-in palette.
    pub fn pale() -> Self {
        Self::from_values([
            "#e1e1e1", "#000", "#777", "#fff", "#000", "#eee", "#999", "#ccc", "#fff",
        ])
    }

    /// Get the value of a field.
    pub fn get(&self, field: PaletteField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Set the value of a field.
    pub fn set(&mut self, field: PaletteField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Builder variant of [Palette::set].
    pub fn with(mut self, field: PaletteField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Clear a field.
    pub fn unset(&mut self, field: PaletteField) {
        *self.slot_mut(field) = None;
    }

    /// A palette may be applied only when it carries a non-empty background.
    pub fn is_valid(&self) -> bool {
        self.background.as_deref().is_some_and(|bg| !bg.is_empty())
    }

    /// Fields that are absent.
    pub fn missing_fields(&self) -> Vec<PaletteField> {
        PaletteField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    /// Serialize to compact JSON, the persisted encoding.
    pub fn to_json(&self) -> ThemeResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON, suitable for a `.thm` file.
    pub fn to_json_pretty(&self) -> ThemeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a palette from JSON text.
    pub fn from_json(text: &str) -> ThemeResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Render the palette as the swatch SVG the importer reads back.
    ///
    /// Absent fields produce an element without a `fill` attribute.
    pub fn to_svg(&self) -> String {
        let mut svg = String::from(
            "<svg width=\"96px\" height=\"64px\" xmlns=\"http://www.w3.org/2000/svg\" baseProfile=\"full\" version=\"1.1\">\n",
        );
        svg.push_str(&format!(
            "  <rect width=\"96\" height=\"64\" id=\"background\"{}/>\n",
            fill_attr(self.get(PaletteField::Background))
        ));

        for (row, fields) in PaletteField::ALL[1..].chunks(4).enumerate() {
            for (column, field) in fields.iter().enumerate() {
                svg.push_str(&format!(
                    "  <circle cx=\"{}\" cy=\"{}\" r=\"8\" id=\"{}\"{}/>\n",
                    24 + column * 16,
                    24 + row * 16,
                    field.name(),
                    fill_attr(self.get(*field))
                ));
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn slot(&self, field: PaletteField) -> &Option<String> {
        match field {
            PaletteField::Background => &self.background,
            PaletteField::FHigh => &self.f_high,
            PaletteField::FMed => &self.f_med,
            PaletteField::FLow => &self.f_low,
            PaletteField::FInv => &self.f_inv,
            PaletteField::BHigh => &self.b_high,
            PaletteField::BMed => &self.b_med,
            PaletteField::BLow => &self.b_low,
            PaletteField::BInv => &self.b_inv,
        }
    }

    fn slot_mut(&mut self, field: PaletteField) -> &mut Option<String> {
        match field {
            PaletteField::Background => &mut self.background,
            PaletteField::FHigh => &mut self.f_high,
            PaletteField::FMed => &mut self.f_med,
            PaletteField::FLow => &mut self.f_low,
            PaletteField::FInv => &mut self.f_inv,
            PaletteField::BHigh => &mut self.b_high,
            PaletteField::BMed => &mut self.b_med,
            PaletteField::BLow => &mut self.b_low,
            PaletteField::BInv => &mut self.b_inv,
        }
    }
}

fn fill_attr(value: Option<&str>) -> String {
    match value {
        Some(value) => format!(" fill=\"{}\"", escape_attr(value)),
        None => String::new(),
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Whether a palette reads as one of the two built-in schemes.
///
/// Tracked beside the active palette so that `invert` does not have to guess
/// from a single colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// The dark built-in.
    Noir,
    /// The light built-in.
    Pale,
    /// Anything else.
    #[default]
    Custom,
}

impl Scheme {
    /// Classify a palette by whole-palette equality with the built-ins.
    pub fn of(palette: &Palette) -> Self {
        if *palette == Palette::noir() {
            Scheme::Noir
        } else if *palette == Palette::pale() {
            Scheme::Pale
        } else {
            Scheme::Custom
        }
    }

    /// The scheme `invert` switches to.
    pub fn inverted(self) -> Self {
        match self {
            Scheme::Noir => Scheme::Pale,
            Scheme::Pale | Scheme::Custom => Scheme::Noir,
        }
    }
}
