//! Codepoint classification, markup escaping and surrogate skipping

use std::borrow::Cow;

use super::blocks::BlockCatalog;
use crate::errors::{PaletteError, Result};
use crate::types::{CharCategory, RenderCategory, MAX_CODEPOINT, SURROGATE_END, SURROGATE_START};

/// Private-use ranges (general category Co)
const PRIVATE_USE_RANGES: [(u32, u32); 3] = [
    (0xE000, 0xF8FF),
    (0xF_0000, 0xF_FFFD),
    (0x10_0000, 0x10_FFFD),
];

pub fn is_surrogate(codepoint: u32) -> bool {
    (SURROGATE_START..=SURROGATE_END).contains(&codepoint)
}

/// General category Cc
pub fn is_control(codepoint: u32) -> bool {
    char::from_u32(codepoint).is_some_and(char::is_control)
}

/// General category Co
pub fn is_private_use(codepoint: u32) -> bool {
    PRIVATE_USE_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&codepoint))
}

/// Classify a codepoint
///
/// Checks run control, surrogate, unassigned, private-use, first match wins.
/// Assignment comes from `catalog`: a codepoint outside every block, or
/// outside its block's defined ranges, is unassigned.
pub fn get_category(catalog: &BlockCatalog, codepoint: u32) -> Result<CharCategory> {
    if codepoint > MAX_CODEPOINT {
        return Err(PaletteError::InvalidCodepoint(codepoint));
    }
    let category = if is_control(codepoint) {
        CharCategory::Control
    } else if is_surrogate(codepoint) {
        CharCategory::Surrogate
    } else if !catalog.is_assigned(codepoint) {
        CharCategory::Unassigned
    } else if is_private_use(codepoint) {
        CharCategory::Private
    } else {
        CharCategory::Printable
    };
    Ok(category)
}

/// Classify a scalar value; infallible since every `char` is in range
pub fn char_category(catalog: &BlockCatalog, ch: char) -> CharCategory {
    get_category(catalog, u32::from(ch)).unwrap_or(CharCategory::Unassigned)
}

fn entity(ch: char) -> Option<&'static str> {
    match ch {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

/// Escape a single character for XML text or attribute content
pub fn escape_xml(ch: char) -> Cow<'static, str> {
    match entity(ch) {
        Some(e) => Cow::Borrowed(e),
        None => Cow::Owned(ch.to_string()),
    }
}

/// Escape every special character in `text`
pub fn escape_markup(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| entity(c).is_some()) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        push_escaped(&mut out, ch);
    }
    Cow::Owned(out)
}

/// Append `ch` to `out`, escaped
pub fn push_escaped(out: &mut String, ch: char) {
    match entity(ch) {
        Some(e) => out.push_str(e),
        None => out.push(ch),
    }
}

/// Jump over the surrogate block
///
/// Surrogates have no standalone scalar value, so sequential enumeration
/// steps from anywhere in `D800..=DFFF` straight to `E000`.
pub fn skip_surrogate(codepoint: u32) -> u32 {
    if is_surrogate(codepoint) {
        SURROGATE_END + 1
    } else {
        codepoint
    }
}

/// Background colour for a category as `0xRRGGBB`
pub fn category_color(category: RenderCategory) -> u32 {
    match category {
        RenderCategory::Printable => 0xFF_FFFF,
        RenderCategory::Control | RenderCategory::Unassigned => 0xCC_CCCC,
        RenderCategory::Surrogate => 0xFF_CCCC,
        RenderCategory::Private => 0xFF_FFCC,
        RenderCategory::NoGlyph => 0xFF_CCFF,
    }
}

/// Background colour for a category as a CSS hex string
pub fn category_color_css(category: RenderCategory) -> String {
    format!("#{:06x}", category_color(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> &'static BlockCatalog {
        BlockCatalog::embedded().unwrap()
    }

    #[test]
    fn test_printable() {
        let catalog = catalog();
        for ch in ['A', 'あ', '漢', '🎉', ' ', '!', '~', '\u{00AD}'] {
            assert_eq!(char_category(catalog, ch), CharCategory::Printable, "{ch:?}");
        }
    }

    #[test]
    fn test_control() {
        let catalog = catalog();
        for cp in [0x00, 0x1F, 0x7F, 0x85, 0x9F] {
            assert_eq!(get_category(catalog, cp), Ok(CharCategory::Control));
        }
    }

    #[test]
    fn test_surrogate() {
        let catalog = catalog();
        assert_eq!(get_category(catalog, 0xD800), Ok(CharCategory::Surrogate));
        assert_eq!(get_category(catalog, 0xDFFF), Ok(CharCategory::Surrogate));
    }

    #[test]
    fn test_unassigned() {
        let catalog = catalog();
        assert_eq!(get_category(catalog, 0x0378), Ok(CharCategory::Unassigned));
        assert_eq!(get_category(catalog, 0xFFFF), Ok(CharCategory::Unassigned));
        // no block at all
        assert_eq!(get_category(catalog, 0x2FE0), Ok(CharCategory::Unassigned));
        // noncharacter at the end of plane 16 private use
        assert_eq!(get_category(catalog, 0x10FFFF), Ok(CharCategory::Unassigned));
    }

    #[test]
    fn test_private_use() {
        let catalog = catalog();
        assert_eq!(get_category(catalog, 0xE000), Ok(CharCategory::Private));
        assert_eq!(get_category(catalog, 0xF8FF), Ok(CharCategory::Private));
        assert_eq!(get_category(catalog, 0xF0000), Ok(CharCategory::Private));
        assert_eq!(get_category(catalog, 0x10FFFD), Ok(CharCategory::Private));
    }

    #[test]
    fn test_out_of_range_fails() {
        assert_eq!(
            get_category(catalog(), 0x11_0000),
            Err(PaletteError::InvalidCodepoint(0x11_0000))
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml('<'), "&lt;");
        assert_eq!(escape_xml('>'), "&gt;");
        assert_eq!(escape_xml('&'), "&amp;");
        assert_eq!(escape_xml('"'), "&quot;");
        assert_eq!(escape_xml('\''), "&apos;");
        assert_eq!(escape_xml('A'), "A");
        assert_eq!(escape_xml('あ'), "あ");
    }

    #[test]
    fn test_escape_markup_borrows_plain_text() {
        assert!(matches!(escape_markup("Basic Latin"), Cow::Borrowed(_)));
        assert_eq!(escape_markup("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn test_skip_surrogate() {
        for cp in [0xD800, 0xDBFF, 0xDC00, 0xDFFF] {
            assert_eq!(skip_surrogate(cp), 0xE000);
        }
        for cp in [0x0000, 0xD7FF, 0xE000, 0xFFFF, 0x10FFFF] {
            assert_eq!(skip_surrogate(cp), cp);
        }
    }

    #[test]
    fn test_category_colors() {
        assert_eq!(category_color_css(RenderCategory::Printable), "#ffffff");
        assert_eq!(category_color_css(RenderCategory::Surrogate), "#ffcccc");
        assert_eq!(category_color_css(RenderCategory::NoGlyph), "#ffccff");
    }
}
