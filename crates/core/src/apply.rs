// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{CreationResult, TransitionResult};
use registrar_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use registrar_domain::{
    Department, Document, DocumentStatus, DocumentSubType, DocumentType, DocumentVersion,
    DomainError, FileReference, PeriodYear, ProjectNumber, ReferenceNumber, RequesterId,
    VersionChain, VersionId, validate_change_notes, validate_title,
};
use time::OffsetDateTime;

/// The inputs for creating a document around an allocated reference number.
///
/// The reference must come from the allocator; this function never
/// generates or re-derives one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    /// The allocated reference number.
    pub reference: ReferenceNumber,
    /// The document type.
    pub document_type: DocumentType,
    /// The document subtype.
    pub sub_type: DocumentSubType,
    /// The owning department.
    pub department: Department,
    /// The project number, present if and only if `sub_type` is Project.
    pub project_number: Option<ProjectNumber>,
    /// The allocation period the reference was drawn from.
    pub period: PeriodYear,
    /// The document title.
    pub title: String,
    /// The requester creating the document.
    pub author: RequesterId,
    /// The storage key of the initial version's file artifact.
    pub file_reference: FileReference,
    /// Optional notes on the initial version.
    pub change_notes: Option<String>,
    /// When the document was created (UTC).
    pub created_at: OffsetDateTime,
}

/// Captures the externally observable state of a document for audit.
fn document_snapshot(document: &Document) -> StateSnapshot {
    StateSnapshot::new(format!(
        "reference={},status={},current_version={},versions={}",
        document.reference,
        document.status,
        document.current_version,
        document.chain.len()
    ))
}

/// Creates a document with its initial version (`1.0`, active).
///
/// This is the only place a version chain is initialized; it is called
/// exactly once per document, with the reference number the allocator
/// produced for it.
///
/// # Arguments
///
/// * `new` - The creation inputs, including the allocated reference
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(CreationResult)` containing the unpersisted document and audit event
/// * `Err(CoreError)` if a field fails validation
///
/// # Errors
///
/// Returns an error if the title or change notes violate domain rules.
pub fn create_document(
    new: NewDocument,
    actor: Actor,
    cause: Cause,
) -> Result<CreationResult, CoreError> {
    validate_title(&new.title)?;
    validate_change_notes(new.change_notes.as_deref())?;

    let initial_version: DocumentVersion = DocumentVersion::initial(
        new.file_reference,
        new.author.clone(),
        new.created_at,
        new.change_notes,
    );
    let chain: VersionChain = VersionChain::initialize(initial_version);

    let document: Document = Document::new(
        new.reference.clone(),
        new.document_type,
        new.sub_type,
        new.department,
        new.project_number,
        new.period,
        new.title,
        new.author,
        DocumentStatus::Active,
        VersionId::initial(),
        chain,
        new.created_at,
    );

    let before: StateSnapshot = StateSnapshot::new(String::from("exists=false"));
    let after: StateSnapshot = document_snapshot(&document);

    let action: Action = Action::new(
        String::from("CreateDocument"),
        Some(format!(
            "Created document {} with initial version {}",
            new.reference,
            VersionId::initial()
        )),
    );

    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, new.reference);

    Ok(CreationResult {
        document,
        audit_event,
    })
}

/// Applies a command to an existing document, producing the new document
/// state and an audit event.
///
/// The input document is not mutated; callers persist the returned state
/// with a conditional update so concurrent transitions are detected rather
/// than overwritten.
///
/// # Arguments
///
/// * `document` - The current document state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new document and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The document is deleted (`DocumentNotFound`: deleted records present
///   as missing to the outside world)
/// - The command violates domain rules
/// - The version chain fails its integrity check
pub fn apply(
    document: &Document,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    // Deleted documents accept no further mutation of any kind, and the
    // failure is a not-found-class error rather than a state conflict.
    if document.status.is_terminal() {
        return Err(CoreError::DocumentNotFound {
            reference: document.reference.value().to_string(),
        });
    }

    match command {
        Command::AppendVersion {
            file_reference,
            uploaded_by,
            uploaded_at,
            change_notes,
        } => {
            // Archived documents are retained but closed to new versions.
            if document.status != DocumentStatus::Active {
                return Err(CoreError::DomainViolation(
                    DomainError::VersionAppendNotAllowed {
                        status: document.status.as_str().to_string(),
                    },
                ));
            }

            validate_change_notes(change_notes.as_deref())?;

            // Refuse to extend a corrupt chain.
            document.validate_chain().map_err(|err| match err {
                DomainError::ChainIntegrity { reason } => CoreError::ChainIntegrity {
                    reference: document.reference.value().to_string(),
                    reason,
                },
                other => CoreError::DomainViolation(other),
            })?;

            let next_version: VersionId = document.current_version.next_minor()?;

            let new_version: DocumentVersion = DocumentVersion {
                version: next_version,
                file_reference,
                uploaded_by,
                uploaded_at,
                change_notes,
                is_active: true,
            };

            let new_chain: VersionChain = document.chain.append(new_version);

            let before: StateSnapshot = document_snapshot(document);

            let mut new_document: Document = document.clone();
            new_document.current_version = next_version;
            new_document.chain = new_chain;

            let after: StateSnapshot = document_snapshot(&new_document);

            let action: Action = Action::new(
                String::from("AppendVersion"),
                Some(format!(
                    "Appended version {next_version} to {}",
                    document.reference
                )),
            );

            let audit_event: AuditEvent = AuditEvent::new(
                actor,
                cause,
                action,
                before,
                after,
                document.reference.clone(),
            );

            Ok(TransitionResult {
                new_document,
                audit_event,
            })
        }
        Command::Archive => transition_status(document, DocumentStatus::Archived, actor, cause),
        Command::Delete => transition_status(document, DocumentStatus::Deleted, actor, cause),
    }
}

/// Applies a lifecycle status transition.
fn transition_status(
    document: &Document,
    new_status: DocumentStatus,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    document.status.validate_transition(new_status)?;

    let before: StateSnapshot = document_snapshot(document);

    let mut new_document: Document = document.clone();
    new_document.status = new_status;

    let after: StateSnapshot = document_snapshot(&new_document);

    let action_name = match new_status {
        DocumentStatus::Archived => "ArchiveDocument",
        DocumentStatus::Deleted => "DeleteDocument",
        DocumentStatus::Active => "ActivateDocument",
    };
    let action: Action = Action::new(
        String::from(action_name),
        Some(format!(
            "Transitioned {} from {} to {new_status}",
            document.reference, document.status
        )),
    );

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        document.reference.clone(),
    );

    Ok(TransitionResult {
        new_document,
        audit_event,
    })
}
