//! File upload DTOs

use serde::{Deserialize, Serialize};

use crate::domain::artifact::SourceFile;

/// Request to stash a file set for later submission: `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    pub files: Vec<SourceFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub upload_id: String,
    pub file_count: usize,
}

/// Retrieval of a stashed file set: `GET /upload?uploadId=<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFilesResponse {
    pub success: bool,
    pub files: Vec<SourceFile>,
}
