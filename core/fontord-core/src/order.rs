//! Typographic ordering of raw font names (made by FontLab https://www.fontlab.com/)
//!
//! Styles are compared by weight first, lightest to heaviest, with the
//! upright face ahead of its italic twin. Before a style can be ranked it is
//! lowercased and stripped of the decorations font vendors like to add
//! (`Roman` prefixes, `MT` suffixes, italic and oblique markers, a
//! `Condensed` prefix). Styles whose remaining token is not a known weight go
//! after every known one and are ordered alphabetically among themselves.

use std::cmp::Ordering;

use crate::style::style_name;
use crate::weights::weight_rank;

/// Comparison form of a style name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedStyle {
    /// Residual token after stripping; `regular` if nothing was left.
    pub token: String,
    pub is_italic: bool,
    pub is_condensed: bool,
}

impl NormalizedStyle {
    /// Normalize the style of a raw font name.
    pub fn from_font_name(raw: &str) -> Self {
        normalize_style(&style_name(raw))
    }

    /// Rank of the residual token in the weight table.
    pub fn weight_rank(&self) -> Option<usize> {
        weight_rank(&self.token)
    }
}

/// Lowercase and strip a style name down to its weight token.
///
/// The steps run in a fixed order because each one can expose the marker
/// the next one looks for: `roman` prefix, `mt` suffix, italic suffix,
/// `condensed` prefix. An empty residue becomes `regular`.
pub fn normalize_style(style: &str) -> NormalizedStyle {
    let mut token = style.to_lowercase();

    strip_roman(&mut token);
    strip_mt(&mut token);
    let is_italic = strip_italic(&mut token);
    let is_condensed = strip_condensed(&mut token);

    if token.is_empty() {
        token.push_str("regular");
    }

    NormalizedStyle {
        token,
        is_italic,
        is_condensed,
    }
}

fn strip_roman(s: &mut String) {
    if s.starts_with("roman") {
        s.replace_range(.."roman".len(), "");
    }
}

fn strip_mt(s: &mut String) {
    if s.ends_with("mt") {
        s.truncate(s.len() - "mt".len());
    }
}

fn strip_italic(s: &mut String) -> bool {
    // First match wins. `ita` only loses two characters, leaving its `i`.
    let drop = if s.ends_with("italic") {
        6
    } else if s.ends_with("it") {
        2
    } else if s.ends_with("ita") {
        2
    } else if s.ends_with("oblique") {
        7
    } else {
        return false;
    };
    s.truncate(s.len() - drop);
    true
}

fn strip_condensed(s: &mut String) -> bool {
    if s.starts_with("condensed") {
        s.replace_range(.."condensed".len(), "");
        true
    } else {
        false
    }
}

/// Whether raw font name `a` sorts strictly before `b`.
///
/// This is a strict weak ordering and can be used directly as a sort
/// predicate. When both styles have a known weight but only one of them is
/// condensed, the condensed one comes first.
pub fn is_ordered_before(a: &str, b: &str) -> bool {
    let a = NormalizedStyle::from_font_name(a);
    let b = NormalizedStyle::from_font_name(b);

    match (a.weight_rank(), b.weight_rank()) {
        (Some(rank_a), Some(rank_b)) => {
            if a.is_condensed != b.is_condensed {
                a.is_condensed
            } else {
                rank_a < rank_b || (rank_a == rank_b && !a.is_italic && b.is_italic)
            }
        }
        (Some(_), None) => true,
        (None, Some(_)) => false,
        (None, None) => a.token < b.token,
    }
}

/// Three-way form of [`is_ordered_before`]; incomparable names are `Equal`.
pub fn compare_font_names(a: &str, b: &str) -> Ordering {
    if is_ordered_before(a, b) {
        Ordering::Less
    } else if is_ordered_before(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Stable sort of raw font names into typographic order.
pub fn sort_font_names<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|a, b| compare_font_names(a.as_ref(), b.as_ref()));
}
