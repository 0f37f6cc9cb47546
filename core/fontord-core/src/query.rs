//! Family and style filters (made by FontLab https://www.fontlab.com/)

use anyhow::{Context, Result};
use regex::Regex;

use crate::family::{FontFamily, FontStyle};
use crate::order::normalize_style;

#[derive(Debug, Clone, Default)]
pub struct FamilyQuery {
    family_patterns: Vec<Regex>,
    style_patterns: Vec<Regex>,
    italic_only: bool,
}

impl FamilyQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_family_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.family_patterns = patterns;
        self
    }

    pub fn with_style_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.style_patterns = patterns;
        self
    }

    pub fn italic_only(mut self, yes: bool) -> Self {
        self.italic_only = yes;
        self
    }

    /// Whether any family pattern matches `family_name` (or there are none).
    pub fn matches_family(&self, family_name: &str) -> bool {
        any_match(&self.family_patterns, family_name)
    }

    /// Check a single style against the style patterns and the italic filter.
    pub fn matches_style(&self, style: &FontStyle) -> bool {
        if self.italic_only && !normalize_style(&style.style_name).is_italic {
            return false;
        }

        any_match(&self.style_patterns, &style.style_name)
    }

    /// Narrow a family to the styles this query accepts.
    ///
    /// Returns `None` when the family name is rejected or no style survives.
    pub fn apply(&self, family: &FontFamily) -> Option<FontFamily> {
        if !self.matches_family(&family.family_name) {
            return None;
        }

        let styles: Vec<FontStyle> = family
            .styles
            .iter()
            .filter(|style| self.matches_style(style))
            .cloned()
            .collect();

        if styles.is_empty() {
            return None;
        }

        Some(FontFamily {
            family_name: family.family_name.clone(),
            styles,
        })
    }
}

fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.is_empty() || patterns.iter().any(|re| re.is_match(text))
}

/// Compile user-supplied regex patterns, naming the first one that fails.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}
