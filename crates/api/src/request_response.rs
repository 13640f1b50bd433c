// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! These DTOs are distinct from domain types and represent the API
//! contract: classification fields arrive as strings and are parsed at the
//! boundary.

/// Allocation parameters shared by reference previews and document
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationParams {
    /// The document type ("report", "policy", "contract", "memo").
    pub document_type: String,
    /// The document subtype ("general", "project", "external").
    pub sub_type: String,
    /// The requesting department.
    pub department: String,
    /// The project number; required when `sub_type` is "project".
    pub project_number: Option<String>,
    /// The allocation period year (e.g., 2024).
    pub year: u16,
}

/// API response for a reference preview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewReferenceResponse {
    /// The reference number the next allocation would produce.
    ///
    /// Non-reserving: nothing was consumed, and another caller may claim
    /// this value before the requester allocates.
    pub reference_number: String,
    /// A human-readable note restating the non-reserving contract.
    pub message: String,
}

/// API request to register a new document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    /// Allocation parameters for the reference number.
    pub allocation: AllocationParams,
    /// The document title.
    pub title: String,
    /// Storage key of the already-stored initial file artifact.
    pub file_reference: String,
    /// Optional notes on the initial version.
    pub change_notes: Option<String>,
}

/// API response for a successful document creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateDocumentResponse {
    /// The canonical numeric identifier.
    pub document_id: i64,
    /// The allocated reference number.
    pub reference_number: String,
    /// The initial version identifier ("1.0").
    pub version: String,
    /// A success message.
    pub message: String,
}

/// API request to upload a new version of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadVersionRequest {
    /// Storage key of the already-stored file artifact.
    pub file_reference: String,
    /// Optional notes describing the change.
    pub change_notes: Option<String>,
}

/// API response for a successful version upload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UploadVersionResponse {
    /// The document's reference number.
    pub reference_number: String,
    /// The new current version identifier.
    pub version: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful archive operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArchiveDocumentResponse {
    /// The document's reference number.
    pub reference_number: String,
    /// The new status ("archived").
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful delete operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteDocumentResponse {
    /// The document's reference number.
    pub reference_number: String,
    /// The new status ("deleted").
    pub status: String,
    /// A success message.
    pub message: String,
}

/// One entry of a document's version history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VersionInfo {
    /// The version identifier ("major.minor").
    pub version: String,
    /// Storage key of the file artifact.
    pub file_reference: String,
    /// Who uploaded this version.
    pub uploaded_by: String,
    /// When this version was uploaded (RFC 3339).
    pub uploaded_at: String,
    /// Optional notes describing the change.
    pub change_notes: Option<String>,
    /// Whether this is the active version.
    pub is_active: bool,
}

/// Full document details including version history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentInfo {
    /// The canonical numeric identifier.
    pub document_id: i64,
    /// The reference number.
    pub reference_number: String,
    /// The document type.
    pub document_type: String,
    /// The document subtype.
    pub sub_type: String,
    /// The owning department.
    pub department: String,
    /// The project number, if project-scoped.
    pub project_number: Option<String>,
    /// The allocation period year.
    pub year: u16,
    /// The document title.
    pub title: String,
    /// The requester who created the document.
    pub author: String,
    /// The lifecycle status.
    pub status: String,
    /// The current version identifier.
    pub current_version: String,
    /// The full version history, oldest first.
    pub versions: Vec<VersionInfo>,
}
