//! Progress and artifact queries
//!
//! Everything here is derived on demand from the image directory. Nothing is
//! cached, so the filesystem can never drift from what clients are told.

use isoforge_core::domain::progress::BuildProgress;
use isoforge_core::dto::job::JobSummary;

use crate::repository::ImageStore;

/// Service error type
#[derive(Debug)]
pub enum QueryError {
    /// No log (progress query) or artifact (download query) for this name.
    NotFound(String),
    /// The image directory could not be read.
    StoreUnavailable(std::io::Error),
}

impl From<std::io::Error> for QueryError {
    fn from(err: std::io::Error) -> Self {
        QueryError::StoreUnavailable(err)
    }
}

/// Current progress for one job, parsed from the last line of its log.
///
/// A job whose build tool has not written a first line yet is
/// indistinguishable from an unknown job; both report `NotFound`.
pub async fn get_progress(
    store: &ImageStore,
    iso_name: &str,
) -> Result<BuildProgress, QueryError> {
    let text = store
        .read_log(iso_name)
        .await?
        .ok_or_else(|| QueryError::NotFound(iso_name.to_string()))?;

    Ok(BuildProgress::from_log(&text))
}

/// Resolves a finished job to its artifact URL.
///
/// Existence of the artifact file is authoritative here; the log's
/// percentage is not consulted.
pub async fn resolve_download(
    store: &ImageStore,
    base_url: &str,
    iso_name: &str,
) -> Result<String, QueryError> {
    if !store.artifact_exists(iso_name).await {
        return Err(QueryError::NotFound(iso_name.to_string()));
    }

    Ok(artifact_url(base_url, iso_name))
}

/// One summary per log file in the store, sorted by iso name.
///
/// `download_url` is filled in iff the parsed progress reads 100. That check
/// deliberately differs from [`resolve_download`], which trusts the artifact
/// file instead; callers that need certainty resolve the download
/// explicitly.
pub async fn list_jobs(
    store: &ImageStore,
    base_url: &str,
) -> Result<Vec<JobSummary>, QueryError> {
    let mut summaries = Vec::new();

    for iso_name in store.list_iso_names().await? {
        let progress = match store.read_log(&iso_name).await? {
            Some(text) => BuildProgress::from_log(&text),
            // Log vanished between listing and reading; report not started.
            None => BuildProgress::unknown(),
        };

        let download_url = progress
            .is_complete()
            .then(|| artifact_url(base_url, &iso_name));

        let status = if progress.status.is_empty() {
            "Unknown".to_string()
        } else {
            progress.status
        };

        summaries.push(JobSummary {
            file_name: iso_name,
            progress: progress.progress,
            status,
            download_url,
        });
    }

    Ok(summaries)
}

/// Static serving path of an artifact, absolute against the request host.
fn artifact_url(base_url: &str, iso_name: &str) -> String {
    format!("{}/isos/{}", base_url, iso_name)
}
