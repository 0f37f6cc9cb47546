//! HTTP server for fontord - a name-badge desk for fonts (made by FontLab https://www.fontlab.com/)
//!
//! Callers post raw font names and get them back labelled, sorted, or
//! grouped into families. Nothing here knows about font files beyond their
//! names; the heavy lifting is done by fontord-core.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task;

use fontord_core::family::{
    assemble_families, AssembleOptions, FontFamily, FontNameSource, FontStyle, PathFontNames,
    StaticFontNames,
};
use fontord_core::order::sort_font_names;

use crate::build_query_from_parts;

/// A bag of raw font names, for the `/style` and `/sort` endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NamesRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StyleResponse {
    pub styles: Vec<FontStyle>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SortResponse {
    pub names: Vec<String>,
}

/// Everything needed to assemble families on the server side.
///
/// Names come either from directories on the server (`paths`) or straight
/// from the caller (`families`, family name to raw names), never both.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FamiliesRequest {
    /// Directories whose font file names are grouped into families
    pub paths: Vec<PathBuf>,
    /// Raw font names the caller already grouped by family
    pub families: BTreeMap<String, Vec<String>>,
    /// Prepend the synthesized system UI families
    pub system: bool,
    /// Regex patterns that must match the family name
    pub family_patterns: Vec<String>,
    /// Regex patterns that must match the style name
    pub style_patterns: Vec<String>,
    /// Only keep italic and oblique styles
    pub italic_only: bool,
    /// Follow symbolic links while walking `paths`
    pub follow_symlinks: bool,
    /// Number of worker threads used to sort families
    pub jobs: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FamiliesResponse {
    pub families: Vec<FontFamily>,
}

/// Bind `bind` and serve requests until the process is stopped.
pub async fn serve(bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    axum::serve(listener, router())
        .await
        .context("serving HTTP")?;
    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/style", post(style_handler))
        .route("/sort", post(sort_handler))
        .route("/families", post(families_handler))
}

async fn style_handler(
    Json(req): Json<NamesRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    require_names(&req.names)?;

    let styles = req
        .names
        .into_iter()
        .map(FontStyle::from_font_name)
        .collect();
    Ok(Json(StyleResponse { styles }))
}

async fn sort_handler(
    Json(req): Json<NamesRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    require_names(&req.names)?;

    let mut names = req.names;
    sort_font_names(&mut names);
    Ok(Json(SortResponse { names }))
}

async fn families_handler(
    Json(req): Json<FamiliesRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if !req.paths.is_empty() && !req.families.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "paths and families are mutually exclusive".to_string(),
        ));
    }

    if req.paths.is_empty() && req.families.is_empty() && !req.system {
        return Err((
            StatusCode::BAD_REQUEST,
            "at least one font source is required".to_string(),
        ));
    }

    if matches!(req.jobs, Some(0)) {
        return Err((
            StatusCode::BAD_REQUEST,
            "jobs must be at least 1 when provided".to_string(),
        ));
    }

    let query = build_query_from_parts(&req.family_patterns, &req.style_patterns, req.italic_only)
        .map_err(to_bad_request)?;
    let opts = AssembleOptions {
        include_system: req.system,
        jobs: req.jobs,
    };

    let source: Box<dyn FontNameSource + Send> = if req.paths.is_empty() {
        let grouped = req
            .families
            .into_iter()
            .fold(StaticFontNames::new(), |acc, (family, names)| {
                acc.with_family(family, names)
            });
        Box::new(grouped)
    } else {
        Box::new(PathFontNames::new(req.paths).follow_symlinks(req.follow_symlinks))
    };

    // Directory walks block; keep them off the async workers.
    let families = task::spawn_blocking(move || assemble_families(source.as_ref(), &query, &opts))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("task join error: {e}"),
            )
        })?
        .map_err(to_bad_request)?;

    Ok(Json(FamiliesResponse { families }))
}

fn require_names(names: &[String]) -> Result<(), (StatusCode, String)> {
    if names.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "at least one font name is required".to_string(),
        ));
    }
    Ok(())
}

fn to_bad_request(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::util::ServiceExt;

    async fn post_json(uri: &str, payload: serde_json::Value) -> (StatusCode, Vec<u8>) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();

        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn style_endpoint_labels_names() {
        let (status, body) =
            post_json("/style", json!({"names": ["Helvetica-Bold", "DamascusLight"]})).await;
        assert_eq!(status, StatusCode::OK);

        let parsed: StyleResponse = serde_json::from_slice(&body).expect("parse response");
        let labels: Vec<&str> = parsed.styles.iter().map(|s| s.style_name.as_str()).collect();
        assert_eq!(labels, ["Bold", "Light"]);
    }

    #[tokio::test]
    async fn sort_endpoint_orders_names() {
        let (status, body) = post_json(
            "/sort",
            json!({"names": ["X-BoldItalic", "X-Zzz", "X-Bold", "X-Light"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let parsed: SortResponse = serde_json::from_slice(&body).expect("parse response");
        assert_eq!(parsed.names, ["X-Light", "X-Bold", "X-BoldItalic", "X-Zzz"]);
    }

    #[tokio::test]
    async fn sort_endpoint_requires_names() {
        let (status, body) = post_json("/sort", json!({"names": []})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let text = String::from_utf8(body).expect("utf8 body");
        assert!(text.contains("at least one font name is required"), "body: {text}");
    }

    #[tokio::test]
    async fn families_endpoint_groups_caller_names() {
        let payload = json!({
            "families": {"Avenir": ["Avenir-Heavy", "Avenir-BookOblique", "Avenir-Book"]},
            "jobs": 1
        });
        let (status, body) = post_json("/families", payload).await;
        assert_eq!(status, StatusCode::OK);

        let parsed: FamiliesResponse = serde_json::from_slice(&body).expect("parse response");
        assert_eq!(parsed.families.len(), 1);
        let labels: Vec<&str> = parsed.families[0]
            .styles
            .iter()
            .map(|s| s.style_name.as_str())
            .collect();
        assert_eq!(labels, ["Book", "BookOblique", "Heavy"]);
    }

    #[tokio::test]
    async fn families_endpoint_walks_paths() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(tmp.path().join("Optima-Bold.ttf"), b"").expect("touch");
        std::fs::write(tmp.path().join("Optima-Regular.ttf"), b"").expect("touch");

        let (status, body) = post_json("/families", json!({"paths": [tmp.path()]})).await;
        assert_eq!(status, StatusCode::OK);

        let parsed: FamiliesResponse = serde_json::from_slice(&body).expect("parse response");
        assert_eq!(parsed.families[0].styles[0].font_name, "Optima-Regular");
    }

    #[tokio::test]
    async fn families_endpoint_requires_a_source() {
        let (status, body) = post_json("/families", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let text = String::from_utf8(body).expect("utf8 body");
        assert!(text.contains("at least one font source is required"), "body: {text}");
    }

    #[tokio::test]
    async fn families_endpoint_rejects_zero_jobs() {
        let (status, body) = post_json("/families", json!({"system": true, "jobs": 0})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let text = String::from_utf8(body).expect("utf8 body");
        assert!(text.contains("jobs must be at least 1"), "body: {text}");
    }

    #[tokio::test]
    async fn families_endpoint_reports_bad_patterns() {
        let (status, _) =
            post_json("/families", json!({"system": true, "family_patterns": ["("]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), b"ok");
    }
}
