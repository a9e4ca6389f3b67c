//! # Style Sink
//!
//! The active palette reaches the UI through a single stylesheet that defines
//! one CSS custom property per palette field under `:root`. The sink owns that
//! text and regenerates it in full on every render, so rendering the same
//! palette twice yields byte-identical output.
//!
//! The sink is pushed into a [StyleHost] once one has been attached (see
//! `ThemeManager::install`). Before that it only keeps the text.

use std::cell::RefCell;
use std::rc::Rc;

use crate::palette::{Palette, PaletteField};

/// Text rendered for a field the palette does not carry.
pub const MISSING_VALUE: &str = "undefined";

/// Build the stylesheet text for a palette.
///
/// ```rust
/// use themer_theme::palette::Palette;
/// use themer_theme::style::stylesheet;
///
/// let css = stylesheet(&Palette::noir());
/// assert!(css.contains("--background: #222;"));
/// ```
pub fn stylesheet(palette: &Palette) -> String {
    let mut css = String::from(":root {\n");
    for field in PaletteField::ALL {
        let value = palette.get(field).unwrap_or(MISSING_VALUE);
        css.push_str(&format!("  --{}: {};\n", field.name(), value));
    }
    css.push_str("}\n");
    css
}

/// The element a stylesheet is attached to.
pub trait StyleHost {
    /// Replace the stylesheet text.
    fn set_style_text(&mut self, css: &str);
}

/// Owner of the generated stylesheet.
#[derive(Default)]
pub struct StyleSink {
    content: String,
    host: Option<Box<dyn StyleHost>>,
}

impl StyleSink {
    /// Create an empty, detached sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the sink to a host. Current content is pushed right away.
    pub fn attach(&mut self, mut host: Box<dyn StyleHost>) {
        host.set_style_text(&self.content);
        self.host = Some(host);
    }

    /// Whether a host is attached.
    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// Regenerate the stylesheet from `palette`.
    pub fn render(&mut self, palette: &Palette) {
        self.content = stylesheet(palette);
        if let Some(host) = self.host.as_mut() {
            host.set_style_text(&self.content);
        }
    }

    /// The current stylesheet text.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A [StyleHost] that records every stylesheet it receives.
///
/// Clones share the same record, so a test can keep one handle while the
/// manager owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    updates: Rc<RefCell<Vec<String>>>,
}

impl RecordingHost {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last stylesheet received.
    pub fn last(&self) -> Option<String> {
        self.updates.borrow().last().cloned()
    }

    /// Number of stylesheets received.
    pub fn len(&self) -> usize {
        self.updates.borrow().len()
    }

    /// Whether nothing was received yet.
    pub fn is_empty(&self) -> bool {
        self.updates.borrow().is_empty()
    }
}

impl StyleHost for RecordingHost {
    fn set_style_text(&mut self, css: &str) {
        self.updates.borrow_mut().push(css.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_layout() {
        let css = stylesheet(&Palette::pale());
        let expected = ":root {\n  --background: #e1e1e1;\n  --f_high: #000;\n  --f_med: #777;\n  --f_low: #fff;\n  --f_inv: #000;\n  --b_high: #eee;\n  --b_med: #999;\n  --b_low: #ccc;\n  --b_inv: #fff;\n}\n";
        assert_eq!(css, expected);
    }

    #[test]
    fn test_missing_fields_render_undefined() {
        let palette = Palette::noir();
        let mut partial = palette.clone();
        partial.unset(PaletteField::BMed);
        let css = stylesheet(&partial);
        assert!(css.contains("--b_med: undefined;"));
        assert!(css.contains("--b_low: #444;"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut sink = StyleSink::new();
        sink.render(&Palette::noir());
        let first = sink.content().to_string();
        sink.render(&Palette::noir());
        assert_eq!(sink.content(), first);
    }

    #[test]
    fn test_attach_pushes_content() {
        let host = RecordingHost::new();
        let mut sink = StyleSink::new();
        sink.render(&Palette::noir());
        sink.attach(Box::new(host.clone()));
        assert!(sink.is_attached());
        assert_eq!(host.last().as_deref(), Some(sink.content()));

        sink.render(&Palette::pale());
        assert_eq!(host.len(), 2);
        assert!(host.last().unwrap().contains("#e1e1e1"));
    }
}
