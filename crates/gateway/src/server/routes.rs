use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use super::Server;
use crate::{jobs, volumes, Error};

pub async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub result: String,
}

/// Catalogue search. Placeholder payload until the catalogue backend is
/// wired up.
pub async fn search() -> Json<SearchResult> {
    info!("searching catalogue");
    Json(SearchResult {
        result: "search results".to_string(),
    })
}

/// Spawn the fixed compute batch job: 200 with a [`jobs::JobSummary`] on
/// success, 500 with an empty body on any failure.
pub async fn spawn_batch_job(State(server): State<Arc<Server>>) -> Response {
    match jobs::submit_job(server.cluster.as_ref()).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err @ Error::MappingFault(_)) => {
            error!(error = %err, "control plane returned an inconsistent job resource");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(err) => {
            error!(error = %err, "batch job submission failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct VolumeQuery {
    pub label: Option<String>,
}

/// List persistent volumes matching the `label` query parameter.
pub async fn list_persistent_volumes(
    State(server): State<Arc<Server>>,
    Query(query): Query<VolumeQuery>,
) -> Response {
    match volumes::list_volumes(server.cluster.as_ref(), query.label.as_deref()).await {
        Ok(summaries) if summaries.is_empty() => {
            (StatusCode::NOT_FOUND, "Volumes not found").into_response()
        }
        Ok(summaries) => (StatusCode::OK, Json(summaries)).into_response(),
        Err(err) if err.is_transport() => {
            error!(error = %err, "volume listing failed at the control plane");
            (StatusCode::BAD_GATEWAY, "Container API error").into_response()
        }
        Err(err) => {
            error!(error = %err, kind = err.kind(), "volume listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Volume error {}", err.kind()),
            )
                .into_response()
        }
    }
}
