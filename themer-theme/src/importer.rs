//! # Theme Importer
//!
//! Turns whatever a user hands us (a palette, a JSON value, or the raw text of
//! a dropped file) into a candidate [Palette]. The shapes are tried in order
//! and the first match wins:
//!
//! 1. A value that already has a `background` is the palette itself.
//! 2. A wrapper with a `data` field yields that field, unvalidated.
//! 3. Text that parses as JSON is handled as a value (steps 1 and 2).
//! 4. Text that parses as XML goes through [crate::svg::extract].
//!
//! Nothing here validates the result; the load gate in the manager does.

use serde_json::Value;

use crate::palette::Palette;
use crate::svg;

/// Raw input to [parse].
#[derive(Debug, Clone, PartialEq)]
pub enum ImportInput {
    /// An already structured palette.
    Palette(Palette),
    /// A structured JSON value: a palette object or a `{ "data": ... }` wrapper.
    Value(Value),
    /// Raw file contents: JSON or SVG text.
    Text(String),
}

impl From<Palette> for ImportInput {
    fn from(palette: Palette) -> Self {
        Self::Palette(palette)
    }
}

impl From<Value> for ImportInput {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<String> for ImportInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ImportInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Parse an import into a candidate palette.
///
/// ```rust
/// use themer_theme::importer::parse;
///
/// let palette = parse(r##"{"background":"#111"}"##).unwrap();
/// assert_eq!(palette.background.as_deref(), Some("#111"));
/// assert!(parse("plain words").is_none());
/// ```
pub fn parse(input: impl Into<ImportInput>) -> Option<Palette> {
    match input.into() {
        ImportInput::Palette(palette) => {
            if palette.is_valid() {
                Some(palette)
            } else {
                log::debug!("Palette input has no background");
                None
            }
        },
        ImportInput::Value(value) => parse_value(value),
        ImportInput::Text(text) => parse_text(&text),
    }
}

fn parse_value(value: Value) -> Option<Palette> {
    if value.get("background").is_some_and(is_truthy) {
        return palette_from_value(value);
    }

    match value {
        Value::Object(mut object) => match object.remove("data") {
            Some(data) if is_truthy(&data) => palette_from_value(data),
            _ => {
                log::debug!("Object has neither background nor data");
                None
            },
        },
        _ => None,
    }
}

fn parse_text(text: &str) -> Option<Palette> {
    if text.trim().is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return parse_value(value);
    }

    if svg::is_xml(text) {
        return svg::extract(text);
    }

    log::debug!("Text is neither JSON nor XML");
    None
}

fn palette_from_value(value: Value) -> Option<Palette> {
    match serde_json::from_value(value) {
        Ok(palette) => Some(palette),
        Err(e) => {
            log::warn!("Theme fields are not colour strings: {}", e);
            None
        },
    }
}

/// Loose truthiness: `null`, `false`, `0` and `""` are false.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteField;
    use serde_json::json;

    const SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="96px" height="64px" xmlns="http://www.w3.org/2000/svg">
  <rect width="96" height="64" id="background" fill="#E0B1CB"/>
  <circle cx="24" cy="24" r="8" id="f_high" fill="#231F20"/>
  <circle cx="40" cy="24" r="8" id="f_med" fill="#5F4B8B"/>
  <circle cx="56" cy="24" r="8" id="f_low" fill="#4D4D4D"/>
  <circle cx="72" cy="24" r="8" id="f_inv" fill="#FFFFFF"/>
  <circle cx="24" cy="40" r="8" id="b_high" fill="#FFFFFF"/>
  <circle cx="40" cy="40" r="8" id="b_med" fill="#BE95C4"/>
  <circle cx="56" cy="40" r="8" id="b_low" fill="#9F86C0"/>
  <circle cx="72" cy="40" r="8" id="b_inv" fill="#231F20"/>
</svg>"##;

    #[test]
    fn test_structured_palette_is_returned_as_is() {
        assert_eq!(parse(Palette::pale()), Some(Palette::pale()));
        assert_eq!(parse(Palette::default()), None);
    }

    #[test]
    fn test_value_with_background() {
        let palette = parse(json!({ "background": "#111", "f_high": "#eee" })).unwrap();
        assert_eq!(palette.get(PaletteField::FHigh), Some("#eee"));
    }

    #[test]
    fn test_data_wrapper_is_unwrapped_without_validation() {
        let palette = parse(json!({ "data": { "f_low": "#abc" } })).unwrap();
        assert!(!palette.is_valid());
        assert_eq!(palette.get(PaletteField::FLow), Some("#abc"));
    }

    #[test]
    fn test_json_text() {
        let text = Palette::noir().to_json().unwrap();
        assert_eq!(parse(text), Some(Palette::noir()));

        let wrapped = format!("{{\"data\": {}}}", Palette::pale().to_json().unwrap());
        assert_eq!(parse(wrapped), Some(Palette::pale()));
    }

    #[test]
    fn test_svg_text() {
        let palette = parse(SVG).unwrap();
        assert_eq!(palette.get(PaletteField::Background), Some("#E0B1CB"));
        assert_eq!(palette.get(PaletteField::BInv), Some("#231F20"));
    }

    #[test]
    fn test_svg_missing_element() {
        let broken = SVG.replace("id=\"b_low\"", "id=\"other\"");
        assert_eq!(parse(broken), None);
    }

    #[test]
    fn test_unparseable_inputs() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("not a theme"), None);
        assert_eq!(parse("42"), None);
        assert_eq!(parse(json!({ "background": 12 })), None);
        assert_eq!(parse(json!(["#222"])), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("#000")));
        assert!(is_truthy(&json!({})));
    }
}
