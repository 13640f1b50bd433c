// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Registrar document registry.
//!
//! Handlers translate request DTOs into core commands, drive persistence,
//! and translate every error into the API contract. Access-control policy
//! is resolved by the caller before it reaches this layer; the identity
//! context carries the already-authenticated requester.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod identity;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    archive_document, create_document, delete_document, get_document, get_document_by_reference,
    preview_reference, upload_version,
};
pub use identity::IdentityContext;
pub use request_response::{
    AllocationParams, ArchiveDocumentResponse, CreateDocumentRequest, CreateDocumentResponse,
    DeleteDocumentResponse, DocumentInfo, PreviewReferenceResponse, UploadVersionRequest,
    UploadVersionResponse, VersionInfo,
};
