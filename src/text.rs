//! Conversions between Rust strings and host text (UTF-16 code units).

/// UTF-16 code units of `s`.
pub fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Render host text for display.  Lone surrogates become U+FFFD.
pub fn to_string_lossy(text: &[u16]) -> String {
    String::from_utf16_lossy(text)
}
