//! Job DTOs for the build API

use serde::{Deserialize, Serialize};

/// Request to assemble a customized image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIsoRequest {
    /// Packages to bake into the image. Must be non-empty.
    #[serde(default)]
    pub packages: Vec<String>,
    /// Base image to customize; the server substitutes its default when
    /// absent.
    #[serde(default)]
    pub iso_url: Option<String>,
}

/// Immediate response to a submission: the new job's public name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIsoResponse {
    pub iso_name: String,
}

/// Resolved location of a finished artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub download_url: String,
}

/// One row of the bulk status listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub file_name: String,
    pub progress: u32,
    pub status: String,
    /// Present only once the job's log reads 100%.
    pub download_url: Option<String>,
}
