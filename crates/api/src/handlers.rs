// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use registrar::{
    AllocationRequest, Command, CreationResult, NewDocument, TransitionResult, apply,
    create_document as core_create_document, plan_allocation,
};
use registrar_audit::Cause;
use registrar_domain::{
    AllocationScope, Department, Document, DocumentStatus, DocumentSubType, DocumentType,
    FileReference, PeriodYear, ProjectNumber, ReferenceNumber, validate_change_notes,
    validate_title,
};
use registrar_persistence::{Persistence, PersistenceError};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::identity::IdentityContext;
use crate::request_response::{
    AllocationParams, ArchiveDocumentResponse, CreateDocumentRequest, CreateDocumentResponse,
    DeleteDocumentResponse, DocumentInfo, PreviewReferenceResponse, UploadVersionRequest,
    UploadVersionResponse, VersionInfo,
};

/// How many times a version upload retries after a detected write conflict
/// before surfacing the conflict to the caller.
const MAX_APPEND_ATTEMPTS: u32 = 3;

/// Parses string-typed allocation parameters into a validated scope.
///
/// All validation happens before any counter is touched; a failure here
/// has no persistent side effect.
fn derive_scope(params: &AllocationParams) -> Result<AllocationScope, ApiError> {
    let document_type: DocumentType =
        DocumentType::parse(&params.document_type).map_err(translate_domain_error)?;
    let sub_type: DocumentSubType =
        DocumentSubType::parse(&params.sub_type).map_err(translate_domain_error)?;
    let department: Department =
        Department::new(&params.department).map_err(translate_domain_error)?;
    let project_number: Option<ProjectNumber> = params
        .project_number
        .as_deref()
        .map(ProjectNumber::new)
        .transpose()
        .map_err(translate_domain_error)?;
    let period: PeriodYear = PeriodYear::new(params.year).map_err(translate_domain_error)?;

    plan_allocation(AllocationRequest {
        document_type,
        sub_type,
        department,
        project_number,
        period,
    })
    .map_err(translate_core_error)
}

/// Computes the reference number the next allocation for these parameters
/// would produce.
///
/// Non-reserving: no counter is incremented and nothing is persisted. The
/// result may be claimed by another caller at any time; it must never be
/// treated as reserved.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or the counter cannot be
/// read.
pub fn preview_reference(
    persistence: &mut Persistence,
    params: &AllocationParams,
) -> Result<PreviewReferenceResponse, ApiError> {
    let scope: AllocationScope = derive_scope(params)?;
    let reference: ReferenceNumber = persistence
        .preview_reference(&scope)
        .map_err(translate_persistence_error)?;

    Ok(PreviewReferenceResponse {
        reference_number: reference.value().to_string(),
        message: String::from(
            "Preview only: this number is not reserved and may be taken by another allocation",
        ),
    })
}

/// Registers a new document: allocates a reference number, creates the
/// record with its initial version (`1.0`), and persists both with the
/// creation audit event.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `identity` - The authenticated requester
/// * `request` - The creation request
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if validation fails (before any counter side effect),
/// the sequence store is unavailable, or the insert fails. A failed insert
/// after a committed allocation leaves a counter gap, which is accepted;
/// the allocated number is never reused.
pub fn create_document(
    persistence: &mut Persistence,
    identity: &IdentityContext,
    request: CreateDocumentRequest,
    cause: Cause,
) -> Result<CreateDocumentResponse, ApiError> {
    let scope: AllocationScope = derive_scope(&request.allocation)?;
    let author = identity.requester()?;
    // All input validation happens before the allocation consumes a
    // sequence value; only failures past this point leave a counter gap.
    validate_title(&request.title).map_err(translate_domain_error)?;
    validate_change_notes(request.change_notes.as_deref()).map_err(translate_domain_error)?;
    let file_reference: FileReference =
        FileReference::new(&request.file_reference).map_err(translate_domain_error)?;
    let department: Department =
        Department::new(&request.allocation.department).map_err(translate_domain_error)?;
    let project_number: Option<ProjectNumber> = request
        .allocation
        .project_number
        .as_deref()
        .map(ProjectNumber::new)
        .transpose()
        .map_err(translate_domain_error)?;
    let period: PeriodYear =
        PeriodYear::new(request.allocation.year).map_err(translate_domain_error)?;

    let reference: ReferenceNumber = persistence
        .allocate_reference(&scope)
        .map_err(translate_persistence_error)?;

    let creation: CreationResult = core_create_document(
        NewDocument {
            reference: reference.clone(),
            document_type: scope.document_type(),
            sub_type: scope.sub_type(),
            department,
            project_number,
            period,
            title: request.title,
            author,
            file_reference,
            change_notes: request.change_notes,
            created_at: OffsetDateTime::now_utc(),
        },
        identity.to_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let document_id: i64 = persistence
        .insert_document(&creation)
        .map_err(translate_persistence_error)?;

    info!(
        document_id,
        reference = reference.value(),
        requester = identity.requester_id.as_str(),
        "Created document"
    );

    Ok(CreateDocumentResponse {
        document_id,
        reference_number: reference.value().to_string(),
        version: creation.document.current_version.to_string(),
        message: format!("Document {reference} created"),
    })
}

/// Uploads a new version of a document, advancing the chain by one minor
/// version.
///
/// Detected write conflicts (a concurrent upload advanced the document
/// first) are retried from refreshed state up to a bounded attempt count;
/// the final conflict is surfaced as retryable. Each call appends exactly
/// one version: callers must issue one request per stored file artifact.
///
/// # Errors
///
/// Returns an error if the document does not exist (or is deleted), is not
/// active, the input is invalid, or the conflict retries are exhausted.
pub fn upload_version(
    persistence: &mut Persistence,
    identity: &IdentityContext,
    document_id: i64,
    request: UploadVersionRequest,
    cause: Cause,
) -> Result<UploadVersionResponse, ApiError> {
    let file_reference: FileReference =
        FileReference::new(&request.file_reference).map_err(translate_domain_error)?;
    let uploaded_by = identity.requester()?;

    for attempt in 1..=MAX_APPEND_ATTEMPTS {
        let document: Document = persistence
            .load_document(document_id)
            .map_err(translate_persistence_error)?;

        let transition: TransitionResult = apply(
            &document,
            Command::AppendVersion {
                file_reference: file_reference.clone(),
                uploaded_by: uploaded_by.clone(),
                uploaded_at: OffsetDateTime::now_utc(),
                change_notes: request.change_notes.clone(),
            },
            identity.to_actor(),
            cause.clone(),
        )
        .map_err(translate_core_error)?;

        match persistence.persist_version_transition(document.current_version, &transition) {
            Ok(()) => {
                info!(
                    document_id,
                    reference = document.reference.value(),
                    version = %transition.new_document.current_version,
                    "Appended document version"
                );
                return Ok(UploadVersionResponse {
                    reference_number: document.reference.value().to_string(),
                    version: transition.new_document.current_version.to_string(),
                    message: format!(
                        "Version {} uploaded to {}",
                        transition.new_document.current_version, document.reference
                    ),
                });
            }
            Err(PersistenceError::VersionConflict { .. }) if attempt < MAX_APPEND_ATTEMPTS => {
                debug!(document_id, attempt, "Version conflict, retrying append");
            }
            Err(err) => return Err(translate_persistence_error(err)),
        }
    }

    Err(ApiError::Conflict {
        message: format!(
            "Document {document_id} kept changing concurrently; giving up after {MAX_APPEND_ATTEMPTS} attempts"
        ),
    })
}

/// Archives a document. It is retained and readable but closed to new
/// versions.
///
/// # Errors
///
/// Returns an error if the document does not exist (or is deleted), is
/// already archived, or the update conflicts with a concurrent transition.
pub fn archive_document(
    persistence: &mut Persistence,
    identity: &IdentityContext,
    document_id: i64,
    cause: Cause,
) -> Result<ArchiveDocumentResponse, ApiError> {
    let (document, transition) =
        apply_status_command(persistence, identity, document_id, Command::Archive, cause)?;

    Ok(ArchiveDocumentResponse {
        reference_number: document.reference.value().to_string(),
        status: transition.new_document.status.as_str().to_string(),
        message: format!("Document {} archived", document.reference),
    })
}

/// Soft-deletes a document. Terminal: the record is retained internally but
/// presents as missing to every subsequent operation.
///
/// # Errors
///
/// Returns an error if the document does not exist (or is already deleted)
/// or the update conflicts with a concurrent transition.
pub fn delete_document(
    persistence: &mut Persistence,
    identity: &IdentityContext,
    document_id: i64,
    cause: Cause,
) -> Result<DeleteDocumentResponse, ApiError> {
    let (document, transition) =
        apply_status_command(persistence, identity, document_id, Command::Delete, cause)?;

    Ok(DeleteDocumentResponse {
        reference_number: document.reference.value().to_string(),
        status: transition.new_document.status.as_str().to_string(),
        message: format!("Document {} deleted", document.reference),
    })
}

/// Shared load-apply-persist path for lifecycle transitions.
fn apply_status_command(
    persistence: &mut Persistence,
    identity: &IdentityContext,
    document_id: i64,
    command: Command,
    cause: Cause,
) -> Result<(Document, TransitionResult), ApiError> {
    let document: Document = persistence
        .load_document(document_id)
        .map_err(translate_persistence_error)?;

    let transition: TransitionResult = apply(&document, command, identity.to_actor(), cause)
        .map_err(translate_core_error)?;

    persistence
        .persist_status_transition(document.status, &transition)
        .map_err(translate_persistence_error)?;

    info!(
        document_id,
        reference = document.reference.value(),
        status = transition.new_document.status.as_str(),
        "Transitioned document status"
    );

    Ok((document, transition))
}

/// Fetches a document with its full version history.
///
/// Deleted documents present as not found.
///
/// # Errors
///
/// Returns an error if the document does not exist or is deleted.
pub fn get_document(
    persistence: &mut Persistence,
    document_id: i64,
) -> Result<DocumentInfo, ApiError> {
    let document: Document = persistence
        .load_document(document_id)
        .map_err(translate_persistence_error)?;
    document_info(document)
}

/// Fetches a document by reference number with its full version history.
///
/// Deleted documents present as not found.
///
/// # Errors
///
/// Returns an error if the document does not exist or is deleted.
pub fn get_document_by_reference(
    persistence: &mut Persistence,
    reference: &str,
) -> Result<DocumentInfo, ApiError> {
    let document: Document = persistence
        .load_document_by_reference(reference)
        .map_err(translate_persistence_error)?;
    document_info(document)
}

/// Converts a loaded document into its API representation.
fn document_info(document: Document) -> Result<DocumentInfo, ApiError> {
    // Soft-deleted records exist internally but are not observable here.
    if document.status == DocumentStatus::Deleted {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Document"),
            message: format!("Document '{}' does not exist", document.reference),
        });
    }

    let document_id: i64 = document.document_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Loaded document is missing its canonical id"),
    })?;

    let versions: Vec<VersionInfo> = document
        .chain
        .versions()
        .iter()
        .map(|version| {
            let uploaded_at = version
                .uploaded_at
                .format(&Rfc3339)
                .map_err(|e| ApiError::Internal {
                    message: format!("Unformattable timestamp: {e}"),
                })?;
            Ok(VersionInfo {
                version: version.version.to_string(),
                file_reference: version.file_reference.value().to_string(),
                uploaded_by: version.uploaded_by.value().to_string(),
                uploaded_at,
                change_notes: version.change_notes.clone(),
                is_active: version.is_active,
            })
        })
        .collect::<Result<_, ApiError>>()?;

    Ok(DocumentInfo {
        document_id,
        reference_number: document.reference.value().to_string(),
        document_type: document.document_type.as_str().to_string(),
        sub_type: document.sub_type.as_str().to_string(),
        department: document.department.value().to_string(),
        project_number: document.project_number.as_ref().map(|p| p.value().to_string()),
        year: document.period.year(),
        title: document.title,
        author: document.author.value().to_string(),
        status: document.status.as_str().to_string(),
        current_version: document.current_version.to_string(),
        versions,
    })
}
