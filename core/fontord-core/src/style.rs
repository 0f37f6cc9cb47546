//! Reading the style out of a raw font name
//!
//! Font systems hand us names like `Helvetica-BoldOblique`: a family, a
//! hyphen, and then the part a person actually wants to see in a menu. We
//! peel off that last part and call it the style name. Names without a
//! hyphen are assumed to be the plain, regular face of their family, with
//! one well-known exception that glues its style straight onto the family.
//!
//! Made with curiosity at FontLab https://www.fontlab.com/

/// Separator between family and style in a raw font name.
pub const SEPARATOR: char = '-';

/// Style name used when a raw name carries no distinguishing suffix.
pub const REGULAR: &str = "Regular";

const DAMASCUS: &str = "Damascus";

/// Derive the display style name for a raw font name.
///
/// Everything after the first `-` is the style. Without a separator the
/// face is `Regular`, except for the Damascus family, whose styles are
/// appended directly (`DamascusBold` is `Bold`). The result is never empty.
pub fn style_name(raw: &str) -> String {
    match raw.split_once(SEPARATOR) {
        Some((_, style)) if !style.is_empty() => style.to_string(),
        Some(_) => REGULAR.to_string(),
        None => match raw.strip_prefix(DAMASCUS) {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => REGULAR.to_string(),
        },
    }
}

/// Build the raw name of the italic twin of `raw`.
///
/// Names that already have a style get `Italic` glued onto it
/// (`Family-Bold` becomes `Family-BoldItalic`); bare family names gain a
/// whole `-Italic` style.
pub fn italic_font_name(raw: &str) -> String {
    if raw.contains(SEPARATOR) {
        format!("{raw}Italic")
    } else {
        format!("{raw}{SEPARATOR}Italic")
    }
}

/// Family part of a raw font name: the text before the first `-`, or the
/// whole name when there is no separator.
pub fn family_of(raw: &str) -> &str {
    raw.split_once(SEPARATOR).map_or(raw, |(family, _)| family)
}
