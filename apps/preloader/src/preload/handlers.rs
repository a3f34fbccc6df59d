use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::builder::SiteDocument;
use crate::errors::AppError;
use crate::optimization::url_metrics::UrlMetric;
use crate::optimization::visitor::TagSnapshot;
use crate::preload::render::{render_preload_links, PreloadRender};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreloadRequest {
    pub document_id: String,
    #[serde(default)]
    pub tags: Vec<TagSnapshot>,
    #[serde(default)]
    pub url_metrics: Vec<UrlMetric>,
}

#[derive(Debug, Serialize)]
pub struct PreloadResponse {
    pub render_id: Uuid,
    #[serde(flatten)]
    pub render: PreloadRender,
}

fn validate(req: &PreloadRequest) -> Result<(), AppError> {
    if let Some(i) = req.tags.iter().position(|tag| tag.xpath.is_empty()) {
        return Err(AppError::Validation(format!("tags[{i}].xpath must not be empty")));
    }
    if let Some(i) = req.url_metrics.iter().position(|m| m.viewport_width == 0) {
        return Err(AppError::Validation(format!(
            "url_metrics[{i}].viewport_width must be greater than zero"
        )));
    }
    Ok(())
}

/// POST /api/v1/preload-links
pub async fn handle_preload_links(
    State(state): State<AppState>,
    Json(req): Json<PreloadRequest>,
) -> Result<(HeaderMap, Json<PreloadResponse>), AppError> {
    validate(&req)?;

    let render_id = Uuid::new_v4();
    info!(
        "Render {render_id}: document {} with {} tags and {} URL metrics",
        req.document_id,
        req.tags.len(),
        req.url_metrics.len()
    );

    let documents = SiteDocument {
        store: &state.site,
        document_id: &req.document_id,
    };
    let render = render_preload_links(
        &documents,
        &state.config.viewport_breakpoints,
        &req.tags,
        req.url_metrics,
    )
    .map_err(|e| AppError::Internal(e.into()))?;

    let mut headers = HeaderMap::new();
    if let Some(link_header) = &render.link_header {
        match HeaderValue::from_str(link_header) {
            Ok(value) => {
                headers.insert(header::LINK, value);
            }
            Err(e) => warn!("Render {render_id}: Link header not representable: {e}"),
        }
    }

    Ok((headers, Json(PreloadResponse { render_id, render })))
}
