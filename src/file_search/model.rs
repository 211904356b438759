//! Data models for the File Search API
//!
//! Types for file search stores, upload requests, and the long-running
//! operations that track indexing progress.

use mime::Mime;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::common::serde::{deserialize_optional_string_to_i64, mime_as_string};

/// A file search store is a container for document embeddings.
///
/// Stores persist indefinitely until deleted. The resource name is assigned
/// by the service at creation time and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSearchStore {
    /// Resource name (e.g., "fileSearchStores/my-store-123")
    pub name: String,

    /// Human-readable display name (max 512 chars)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Creation timestamp
    #[serde(with = "time::serde::rfc3339")]
    pub create_time: OffsetDateTime,

    /// Last update timestamp
    #[serde(with = "time::serde::rfc3339")]
    pub update_time: OffsetDateTime,

    /// Number of active documents
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string_to_i64"
    )]
    pub active_documents_count: Option<i64>,

    /// Number of pending documents
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string_to_i64"
    )]
    pub pending_documents_count: Option<i64>,

    /// Number of failed documents
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string_to_i64"
    )]
    pub failed_documents_count: Option<i64>,

    /// Total size in bytes
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string_to_i64"
    )]
    pub size_bytes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileSearchStoreRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFileSearchStoresResponse {
    #[serde(default)]
    pub file_search_stores: Vec<FileSearchStore>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Metadata sent when starting a direct upload into a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadToFileSearchStoreRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(with = "mime_as_string")]
    pub mime_type: Mime,
}

/// A long-running operation for file uploads.
///
/// Operations track the progress of file processing: chunking, embedding,
/// and indexing. `done` is monotonic; once true it never reverts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Operation name (e.g., "fileSearchStores/*/operations/*")
    pub name: String,

    /// Service-specific metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,

    /// Whether operation is complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,

    /// Result (error or response)
    #[serde(flatten)]
    pub result: Option<OperationResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperationResult {
    Error { error: Status },
    Response { response: serde_json::Value },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub code: i32,
    pub message: String,
}
