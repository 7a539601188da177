//! Full-width to half-width normalization for registry text.

/// Replace full-width digits and Latin letters with their ASCII forms.
///
/// Only `０-９`, `Ａ-Ｚ` and `ａ-ｚ` are touched; CJK text and full-width
/// punctuation are left alone.
pub fn to_half_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{FF10}'..='\u{FF19}' | '\u{FF21}'..='\u{FF3A}' | '\u{FF41}'..='\u{FF5A}' => {
                char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}
