//! SVG theme extraction.
//!
//! An SVG theme carries one element per palette field, identified by the
//! field name, with the colour in its `fill` attribute. Extraction is all or
//! nothing: a single missing element or attribute discards the whole file.

use roxmltree::{Document, ParsingOptions};

use crate::error::{ThemeError, ThemeResult};
use crate::palette::{Palette, PaletteField};

fn parse_document(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;
    Document::parse_with_options(text, options)
}

/// Whether `text` is well-formed XML.
pub fn is_xml(text: &str) -> bool {
    parse_document(text).is_ok()
}

/// Extract a complete palette, logging and discarding incomplete themes.
pub fn extract(text: &str) -> Option<Palette> {
    match try_extract(text) {
        Ok(palette) => Some(palette),
        Err(e) => {
            log::warn!("Incomplete SVG theme: {}", e);
            None
        },
    }
}

/// Extract a complete palette or report the first failed lookup.
pub fn try_extract(text: &str) -> ThemeResult<Palette> {
    let document = parse_document(text)?;
    let mut palette = Palette::default();

    for field in PaletteField::ALL {
        let element = document
            .descendants()
            .find(|node| node.is_element() && node.attribute("id") == Some(field.name()))
            .ok_or_else(|| ThemeError::incomplete_svg(field, "element"))?;
        let fill = element
            .attribute("fill")
            .ok_or_else(|| ThemeError::incomplete_svg(field, "fill attribute"))?;
        palette.set(field, fill);
    }

    Ok(palette)
}
