//! Synthesized system UI families (made by FontLab https://www.fontlab.com/)
//!
//! The system UI font is not listed by family like ordinary fonts; it is
//! requested by weight and the platform picks a face. We rebuild its two
//! families from a fixed weight list, add an italic twin for every face and
//! sort the lot like any other family. The result is built once, on first
//! use, and shared read-only afterwards.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

use crate::family::FontFamily;
use crate::style::{italic_font_name, SEPARATOR};

/// Weights the system UI font can be requested with, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SystemWeight {
    UltraLight,
    Thin,
    Light,
    Regular,
    Medium,
    Semibold,
    Bold,
    Heavy,
    Black,
}

impl SystemWeight {
    pub const ALL: [SystemWeight; 9] = [
        SystemWeight::UltraLight,
        SystemWeight::Thin,
        SystemWeight::Light,
        SystemWeight::Regular,
        SystemWeight::Medium,
        SystemWeight::Semibold,
        SystemWeight::Bold,
        SystemWeight::Heavy,
        SystemWeight::Black,
    ];

    /// Style suffix used in face names; the regular face has none.
    fn suffix(self) -> Option<&'static str> {
        match self {
            SystemWeight::UltraLight => Some("Ultralight"),
            SystemWeight::Thin => Some("Thin"),
            SystemWeight::Light => Some("Light"),
            SystemWeight::Regular => None,
            SystemWeight::Medium => Some("Medium"),
            SystemWeight::Semibold => Some("Semibold"),
            SystemWeight::Bold => Some("Bold"),
            SystemWeight::Heavy => Some("Heavy"),
            SystemWeight::Black => Some("Black"),
        }
    }
}

struct SystemFamilySpec {
    family_name: &'static str,
    face_prefix: &'static str,
    /// Weights with a face of their own; others resolve to the nearest one.
    available: &'static [SystemWeight],
}

const SYSTEM_FAMILY_SPECS: [SystemFamilySpec; 2] = [
    SystemFamilySpec {
        family_name: ".SF UI Text",
        face_prefix: ".SFUIText",
        available: &[
            SystemWeight::Light,
            SystemWeight::Regular,
            SystemWeight::Medium,
            SystemWeight::Semibold,
            SystemWeight::Bold,
            SystemWeight::Heavy,
        ],
    },
    SystemFamilySpec {
        family_name: ".SF UI Display",
        face_prefix: ".SFUIDisplay",
        available: &SystemWeight::ALL,
    },
];

impl SystemFamilySpec {
    fn resolve(&self, wanted: SystemWeight) -> SystemWeight {
        self.available
            .iter()
            .copied()
            .min_by_key(|w| (*w as i32 - wanted as i32).abs())
            .unwrap_or(SystemWeight::Regular)
    }

    fn face_name(&self, weight: SystemWeight) -> String {
        match weight.suffix() {
            Some(suffix) => format!("{}{SEPARATOR}{suffix}", self.face_prefix),
            None => self.face_prefix.to_string(),
        }
    }

    /// Distinct upright faces followed by their italic twins.
    fn font_names(&self) -> Vec<String> {
        let upright: BTreeSet<String> = SystemWeight::ALL
            .iter()
            .map(|w| self.face_name(self.resolve(*w)))
            .collect();
        let italic: Vec<String> = upright.iter().map(|n| italic_font_name(n)).collect();

        upright.into_iter().chain(italic).collect()
    }

    fn family(&self) -> FontFamily {
        FontFamily::from_font_names(self.family_name, self.font_names())
    }
}

static SYSTEM_FAMILIES: Lazy<Vec<FontFamily>> =
    Lazy::new(|| SYSTEM_FAMILY_SPECS.iter().map(SystemFamilySpec::family).collect());

/// The synthesized system families, sorted and labelled.
pub fn system_families() -> &'static [FontFamily] {
    &SYSTEM_FAMILIES
}
