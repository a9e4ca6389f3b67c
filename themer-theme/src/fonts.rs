//! Font family cycling and font size adjustment.

use std::cell::RefCell;
use std::rc::Rc;

/// Font families cycled through by default.
pub const DEFAULT_FONTS: [&str; 3] = ["input_mono_regular", "custom_serif", "custom_sans_serif"];

/// Size restored by `reset_font_size`, in pixels.
pub const DEFAULT_FONT_SIZE: i32 = 12;

/// The document body style the font helpers write to.
pub trait BodyStyle {
    /// Set the body font family.
    fn set_font_family(&mut self, family: &str);

    /// The computed font size, e.g. `"12px"`.
    fn computed_font_size(&self) -> String;

    /// Set the body font size, e.g. `"13px"`.
    fn set_font_size(&mut self, size: &str);
}

/// Cursor over a fixed list of font families, wrapping at both ends.
#[derive(Debug, Clone)]
pub struct FontCycle {
    fonts: Vec<String>,
    index: usize,
}

impl FontCycle {
    /// Create a cycle positioned on the first font. An empty list falls back
    /// to [DEFAULT_FONTS].
    pub fn new(fonts: Vec<String>) -> Self {
        let fonts = if fonts.is_empty() {
            log::warn!("Empty font list, using defaults");
            DEFAULT_FONTS.iter().map(|f| f.to_string()).collect()
        } else {
            fonts
        };
        Self { fonts, index: 0 }
    }

    /// Advance to the next font.
    pub fn next(&mut self) -> &str {
        self.index = (self.index + 1) % self.fonts.len();
        self.current()
    }

    /// Step back to the previous font.
    pub fn previous(&mut self) -> &str {
        self.index = self.index.checked_sub(1).unwrap_or(self.fonts.len() - 1);
        self.current()
    }

    /// The font under the cursor.
    pub fn current(&self) -> &str {
        &self.fonts[self.index]
    }

    /// The cursor position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The font list.
    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }
}

impl Default for FontCycle {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Parse the leading integer of a CSS pixel value (`"12.5px"` is 12).
pub fn parse_px(value: &str) -> Option<i32> {
    let value = value.trim_start();
    let (sign, digits) = match value.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, value.strip_prefix('+').unwrap_or(value)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i32>().ok().map(|n| sign * n)
}

/// Format a pixel value.
pub fn px(size: i32) -> String {
    format!("{}px", size)
}

/// Add `delta` pixels to the computed body font size. Returns the new size,
/// or `None` if the computed size could not be read or would overflow.
pub fn adjust_font_size(body: &mut dyn BodyStyle, delta: i32) -> Option<i32> {
    let computed = body.computed_font_size();
    let Some(size) = parse_px(&computed) else {
        log::warn!("Unreadable font size '{}'", computed);
        return None;
    };
    let Some(size) = size.checked_add(delta) else {
        log::warn!("Font size '{}' out of range", computed);
        return None;
    };
    body.set_font_size(&px(size));
    Some(size)
}

/// In-memory [BodyStyle]. Clones share state.
#[derive(Debug, Clone)]
pub struct MemoryBodyStyle {
    inner: Rc<RefCell<BodyState>>,
}

#[derive(Debug, Clone)]
struct BodyState {
    font_family: Option<String>,
    font_size: String,
}

impl MemoryBodyStyle {
    /// Create a body with the given computed font size.
    pub fn new(font_size: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BodyState {
                font_family: None,
                font_size: font_size.into(),
            })),
        }
    }

    /// The font family last written.
    pub fn font_family(&self) -> Option<String> {
        self.inner.borrow().font_family.clone()
    }

    /// The font size last written.
    pub fn font_size(&self) -> String {
        self.inner.borrow().font_size.clone()
    }
}

impl Default for MemoryBodyStyle {
    fn default() -> Self {
        Self::new(px(DEFAULT_FONT_SIZE))
    }
}

impl BodyStyle for MemoryBodyStyle {
    fn set_font_family(&mut self, family: &str) {
        self.inner.borrow_mut().font_family = Some(family.to_string());
    }

    fn computed_font_size(&self) -> String {
        self.font_size()
    }

    fn set_font_size(&mut self, size: &str) {
        self.inner.borrow_mut().font_size = size.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps_around() {
        let mut cycle = FontCycle::default();
        let start = cycle.index();
        for _ in 0..cycle.fonts().len() {
            cycle.next();
        }
        assert_eq!(cycle.index(), start);
    }

    #[test]
    fn test_previous_is_inverse_of_next() {
        let mut cycle = FontCycle::default();
        assert_eq!(cycle.previous(), "custom_sans_serif");
        assert_eq!(cycle.next(), "input_mono_regular");

        cycle.next();
        cycle.next();
        cycle.previous();
        assert_eq!(cycle.current(), "custom_serif");
    }

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12px"), Some(12));
        assert_eq!(parse_px("12.75px"), Some(12));
        assert_eq!(parse_px(" -3px"), Some(-3));
        assert_eq!(parse_px("px"), None);
        assert_eq!(parse_px(""), None);
    }

    #[test]
    fn test_adjust_has_no_lower_bound() {
        let mut body = MemoryBodyStyle::new("1px");
        assert_eq!(adjust_font_size(&mut body, -1), Some(0));
        assert_eq!(adjust_font_size(&mut body, -1), Some(-1));
        assert_eq!(body.font_size(), "-1px");
    }

    #[test]
    fn test_adjust_out_of_range_size() {
        let mut body = MemoryBodyStyle::new("2147483647px");
        assert_eq!(adjust_font_size(&mut body, 1), None);
        assert_eq!(body.font_size(), "2147483647px");
        assert_eq!(adjust_font_size(&mut body, -1), Some(2147483646));
    }

    #[test]
    fn test_adjust_unreadable_size() {
        let mut body = MemoryBodyStyle::new("medium");
        assert_eq!(adjust_font_size(&mut body, 1), None);
        assert_eq!(body.font_size(), "medium");
    }
}
