//! Shared SVG document scaffolding
//!
//! Numbers are written with `f64`'s `Display`, which gives the shortest
//! round-trip form (`192`, `12.8`) regardless of locale.

use crate::core::escape_markup;

/// Font family name the `@font-face` rule registers
pub const FONT_FAMILY: &str = "Unifont";

/// Wrap `body` elements in a complete SVG document
///
/// `styles` is inserted after the `@font-face` rule inside `<style>`.
pub(crate) fn document(
    width: u32,
    height: u32,
    font_path: &str,
    styles: &str,
    body: &[String],
) -> String {
    let mut svg = String::with_capacity(512 + body.iter().map(|e| e.len() + 3).sum::<usize>());
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">\n"
    ));
    svg.push_str("  <style>\n");
    svg.push_str(&font_face(font_path));
    svg.push_str(styles);
    svg.push_str("  </style>\n");
    svg.push_str("  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
    svg.push_str("  ");
    svg.push_str(&body.join("\n  "));
    svg.push_str("\n</svg>");
    svg
}

/// `@font-face` rule for the caller's font; the path is not checked
pub(crate) fn font_face(font_path: &str) -> String {
    format!(
        "    @font-face {{\n      font-family: '{FONT_FAMILY}';\n      src: url('{}') format('opentype');\n    }}\n",
        escape_markup(font_path)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_face_always_present() {
        let svg = document(10, 20, "/missing/font.otf", "", &[]);
        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
        assert!(svg.contains("width=\"10\" height=\"20\" viewBox=\"0 0 10 20\""));
        assert!(svg.contains("src: url('/missing/font.otf') format('opentype');"));
        assert!(svg.ends_with("\n</svg>"));
    }

    #[test]
    fn test_font_path_is_escaped() {
        let rule = font_face("fonts/it's.otf");
        assert!(rule.contains("url('fonts/it&apos;s.otf')"));
    }
}
