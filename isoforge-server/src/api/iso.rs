//! ISO Build API Handlers
//!
//! HTTP endpoints for the build-job lifecycle: submission, bulk status,
//! per-job progress and artifact download resolution.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use isoforge_core::domain::progress::BuildProgress;
use isoforge_core::dto::job::{
    DownloadResponse, GenerateIsoRequest, GenerateIsoResponse, JobSummary,
};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::service::{build, progress};

/// POST /api/generate-iso
/// Validate the submission and launch a build, answering with the iso name
/// before the build makes any progress
pub async fn generate_iso(
    State(state): State<AppState>,
    Json(req): Json<GenerateIsoRequest>,
) -> ApiResult<Json<GenerateIsoResponse>> {
    tracing::info!("Build requested with {} packages", req.packages.len());

    let iso_name = build::start_build(&state.config, req).map_err(|e| match e {
        build::BuildError::EmptyPackages => {
            ApiError::BadRequest("No packages provided".to_string())
        }
    })?;

    Ok(Json(GenerateIsoResponse { iso_name }))
}

/// GET /api/progress/{iso_name}
/// Current progress for one job, derived from its log
pub async fn get_progress(
    State(state): State<AppState>,
    Path(iso_name): Path<String>,
) -> ApiResult<Json<BuildProgress>> {
    tracing::debug!("Progress query for {}", iso_name);

    let progress = progress::get_progress(&state.store, &iso_name)
        .await
        .map_err(|e| match e {
            progress::QueryError::NotFound(name) => {
                ApiError::NotFound(format!("Log file not found for {}", name))
            }
            progress::QueryError::StoreUnavailable(err) => ApiError::StoreError(err),
        })?;

    Ok(Json(progress))
}

/// GET /api/download/{iso_name}
/// Resolve a finished job to its artifact URL
pub async fn resolve_download(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(iso_name): Path<String>,
) -> ApiResult<Json<DownloadResponse>> {
    tracing::debug!("Download query for {}", iso_name);

    let base_url = request_base(&headers, &state.config);

    let download_url = progress::resolve_download(&state.store, &base_url, &iso_name)
        .await
        .map_err(|e| match e {
            progress::QueryError::NotFound(name) => {
                ApiError::NotFound(format!("File not found for {}", name))
            }
            progress::QueryError::StoreUnavailable(err) => ApiError::StoreError(err),
        })?;

    Ok(Json(DownloadResponse { download_url }))
}

/// GET /api/logs
/// One status summary per known job
pub async fn list_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<JobSummary>>> {
    tracing::debug!("Listing all jobs");

    let base_url = request_base(&headers, &state.config);

    let jobs = progress::list_jobs(&state.store, &base_url)
        .await
        .map_err(|e| match e {
            progress::QueryError::StoreUnavailable(err) => ApiError::StoreError(err),
            progress::QueryError::NotFound(name) => {
                ApiError::NotFound(format!("Log file not found for {}", name))
            }
        })?;

    Ok(Json(jobs))
}

/// Base URL for links handed back to clients, taken from the request's Host
/// header with the configured host as fallback.
fn request_base(headers: &HeaderMap, config: &Config) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(&config.public_host);

    format!("http://{}", host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_base_prefers_host_header() {
        let config = Config::default();
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::HOST,
            "forge.example:8080".parse().unwrap(),
        );

        assert_eq!(request_base(&headers, &config), "http://forge.example:8080");
    }

    #[test]
    fn test_request_base_falls_back_to_config() {
        let config = Config::default();
        let headers = HeaderMap::new();

        assert_eq!(request_base(&headers, &config), "http://localhost:3000");
    }
}
