//! PyO3 bindings for fontord-core (made by FontLab https://www.fontlab.com/)

use std::collections::BTreeMap;

use anyhow::Result;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use fontord_core::family::{assemble_families, AssembleOptions, FontFamily, StaticFontNames};
use fontord_core::order::{is_ordered_before, sort_font_names};
use fontord_core::query::{compile_patterns, FamilyQuery};
use fontord_core::style::{italic_font_name, style_name};

#[pyfunction]
#[pyo3(name = "style_name")]
fn style_name_py(raw: &str) -> String {
    style_name(raw)
}

#[pyfunction]
#[pyo3(name = "italic_font_name")]
fn italic_font_name_py(raw: &str) -> String {
    italic_font_name(raw)
}

#[pyfunction]
#[pyo3(name = "is_ordered_before")]
fn is_ordered_before_py(a: &str, b: &str) -> bool {
    is_ordered_before(a, b)
}

#[pyfunction]
#[pyo3(name = "sort_font_names")]
fn sort_font_names_py(mut names: Vec<String>) -> Vec<String> {
    sort_font_names(&mut names);
    names
}

#[pyfunction]
#[pyo3(
    name = "assemble_families",
    signature = (
        families,
        system=false,
        family_patterns=None,
        style_patterns=None,
        italic_only=false
    )
)]
fn assemble_families_py(
    py: Python<'_>,
    families: BTreeMap<String, Vec<String>>,
    system: bool,
    family_patterns: Option<Vec<String>>,
    style_patterns: Option<Vec<String>>,
    italic_only: bool,
) -> PyResult<Vec<Py<PyAny>>> {
    let query = build_query(family_patterns, style_patterns, italic_only).map_err(to_py_err)?;
    let source = families
        .into_iter()
        .fold(StaticFontNames::new(), |acc, (family, names)| {
            acc.with_family(family, names)
        });
    let opts = AssembleOptions {
        include_system: system,
        jobs: None,
    };

    let assembled = assemble_families(&source, &query, &opts).map_err(to_py_err)?;
    to_py_families(py, assembled)
}

fn build_query(
    family_patterns: Option<Vec<String>>,
    style_patterns: Option<Vec<String>>,
    italic_only: bool,
) -> Result<FamilyQuery> {
    Ok(FamilyQuery::new()
        .with_family_patterns(compile_patterns(&family_patterns.unwrap_or_default())?)
        .with_style_patterns(compile_patterns(&style_patterns.unwrap_or_default())?)
        .italic_only(italic_only))
}

fn to_py_families(py: Python<'_>, families: Vec<FontFamily>) -> PyResult<Vec<Py<PyAny>>> {
    families
        .into_iter()
        .map(|family| {
            let styles = family
                .styles
                .iter()
                .map(|style| {
                    let dict = PyDict::new(py);
                    dict.set_item("font_name", &style.font_name)?;
                    dict.set_item("style_name", &style.style_name)?;
                    Ok(dict)
                })
                .collect::<PyResult<Vec<_>>>()?;

            let outer = PyDict::new(py);
            outer.set_item("family_name", &family.family_name)?;
            outer.set_item("styles", styles)?;

            Ok(outer.into_any().unbind())
        })
        .collect()
}

fn to_py_err(err: anyhow::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

#[pymodule]
#[pyo3(name = "_fontord_python")]
fn fontord_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(style_name_py, m)?)?;
    m.add_function(wrap_pyfunction!(italic_font_name_py, m)?)?;
    m.add_function(wrap_pyfunction!(is_ordered_before_py, m)?)?;
    m.add_function(wrap_pyfunction!(sort_font_names_py, m)?)?;
    m.add_function(wrap_pyfunction!(assemble_families_py, m)?)?;
    Ok(())
}
