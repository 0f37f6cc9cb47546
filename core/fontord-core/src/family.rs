//! Family assembly: grouping raw names and putting them in order
//! (made by FontLab https://www.fontlab.com/)
//!
//! The font system is somebody else's business. A [`FontNameSource`] hands
//! over raw font names grouped by family; we sort each group with the
//! typographic ordering and label every face with its style name.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::order::sort_font_names;
use crate::query::FamilyQuery;
use crate::style::{family_of, style_name};
use crate::system::system_families;

/// One face of a family: its raw name and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontStyle {
    pub font_name: String,
    pub style_name: String,
}

impl FontStyle {
    pub fn from_font_name(font_name: impl Into<String>) -> Self {
        let font_name = font_name.into();
        let style_name = style_name(&font_name);
        Self {
            font_name,
            style_name,
        }
    }
}

/// A family name with its faces in typographic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    pub family_name: String,
    pub styles: Vec<FontStyle>,
}

impl FontFamily {
    /// Sort `font_names` and label each of them.
    pub fn from_font_names(family_name: impl Into<String>, mut font_names: Vec<String>) -> Self {
        sort_font_names(&mut font_names);
        Self {
            family_name: family_name.into(),
            styles: font_names.into_iter().map(FontStyle::from_font_name).collect(),
        }
    }
}

/// Unsorted raw names of one family, as delivered by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyNames {
    pub family_name: String,
    pub font_names: Vec<String>,
}

/// Anything that can tell us which fonts exist and how they are grouped.
pub trait FontNameSource {
    fn families(&self) -> Result<Vec<FamilyNames>>;
}

/// Families kept in memory, e.g. handed over by a platform API.
#[derive(Debug, Clone, Default)]
pub struct StaticFontNames {
    families: BTreeMap<String, Vec<String>>,
}

impl StaticFontNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `font_names` to `family_name`, creating the family if needed.
    pub fn with_family<I, S>(mut self, family_name: impl Into<String>, font_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.families
            .entry(family_name.into())
            .or_default()
            .extend(font_names.into_iter().map(Into::into));
        self
    }

    /// Group bare raw names by the text before their first separator.
    pub fn from_font_names<I, S>(font_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut families: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for name in font_names {
            let name = name.into();
            families
                .entry(family_of(&name).to_string())
                .or_default()
                .push(name);
        }
        Self { families }
    }
}

impl<F, N> FromIterator<(F, N)> for StaticFontNames
where
    F: Into<String>,
    N: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (F, N)>>(iter: T) -> Self {
        let mut families: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (family, name) in iter {
            families.entry(family.into()).or_default().push(name.into());
        }
        Self { families }
    }
}

impl FontNameSource for StaticFontNames {
    fn families(&self) -> Result<Vec<FamilyNames>> {
        Ok(self
            .families
            .iter()
            .map(|(family_name, font_names)| FamilyNames {
                family_name: family_name.clone(),
                font_names: font_names.clone(),
            })
            .collect())
    }
}

/// Recursive filesystem walker that takes font file stems as raw names.
///
/// Files are never opened; `Helvetica-Bold.otf` simply contributes the
/// name `Helvetica-Bold` to the `Helvetica` family.
#[derive(Debug, Clone)]
pub struct PathFontNames {
    roots: Vec<PathBuf>,
    follow_symlinks: bool,
}

impl PathFontNames {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let roots = roots.into_iter().map(Into::into).collect();
        Self {
            roots,
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

impl FontNameSource for PathFontNames {
    fn families(&self) -> Result<Vec<FamilyNames>> {
        let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for root in &self.roots {
            if !root.exists() {
                return Err(anyhow!("root path does not exist: {}", root.display()));
            }

            for entry in WalkDir::new(root).follow_links(self.follow_symlinks) {
                let entry = entry?;
                if !entry.file_type().is_file() || !is_font(entry.path()) {
                    continue;
                }
                if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                    grouped
                        .entry(family_of(stem).to_string())
                        .or_default()
                        .insert(stem.to_string());
                }
            }
        }

        debug!("found {} families under {} roots", grouped.len(), self.roots.len());

        Ok(grouped
            .into_iter()
            .map(|(family_name, names)| FamilyNames {
                family_name,
                font_names: names.into_iter().collect(),
            })
            .collect())
    }
}

fn is_font(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(
        ext.as_str(),
        "ttf" | "otf" | "ttc" | "otc" | "woff" | "woff2" | "dfont"
    )
}

#[derive(Debug, Default, Clone)]
pub struct AssembleOptions {
    /// Put the synthesized system families in front of everything else.
    pub include_system: bool,
    pub jobs: Option<usize>,
}

/// Load, filter, sort and label every family from `source`.
///
/// Families come out in name order, each with its styles in typographic
/// order. Families left without styles are dropped.
pub fn assemble_families(
    source: &dyn FontNameSource,
    query: &FamilyQuery,
    opts: &AssembleOptions,
) -> Result<Vec<FontFamily>> {
    if matches!(opts.jobs, Some(0)) {
        return Err(anyhow!("jobs must be at least 1 when provided"));
    }

    let mut loaded = source.families()?;
    loaded.sort_by(|a, b| a.family_name.cmp(&b.family_name));
    info!("assembling {} families", loaded.len());

    let run_assembly = move || -> Vec<FontFamily> {
        loaded
            .into_par_iter()
            .filter(|f| query.matches_family(&f.family_name))
            .map(|f| FontFamily::from_font_names(f.family_name, f.font_names))
            .filter_map(|family| query.apply(&family))
            .collect()
    };

    let assembled = if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(run_assembly)
    } else {
        run_assembly()
    };

    debug!("style names seen: {:?}", distinct_style_names(&assembled));

    let mut families = Vec::with_capacity(assembled.len() + 2);
    if opts.include_system {
        families.extend(system_families().iter().filter_map(|f| query.apply(f)));
    }
    families.extend(assembled);
    Ok(families)
}

/// Every style label that appears in `families`.
pub fn distinct_style_names(families: &[FontFamily]) -> BTreeSet<String> {
    families
        .iter()
        .flat_map(|f| f.styles.iter().map(|s| s.style_name.clone()))
        .collect()
}
