//! The weight ladder (made by FontLab https://www.fontlab.com/)

/// Canonical lowercase weight tokens, lightest first.
///
/// Position in this table is the primary sort key of the font ordering, so
/// the order matters more than the spelling.
pub const WEIGHT_NAMES: [&str; 12] = [
    "ultralight",
    "thin",
    "light",
    "book",
    "regular",
    "medium",
    "demibold",
    "semibold",
    "bold",
    "extrabold",
    "heavy",
    "black",
];

/// Position of `token` in [`WEIGHT_NAMES`], by exact match.
pub fn weight_rank(token: &str) -> Option<usize> {
    WEIGHT_NAMES.iter().position(|name| *name == token)
}
