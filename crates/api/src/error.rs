// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use registrar::CoreError;
use registrar_domain::DomainError;
use registrar_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. `Conflict` and `Unavailable` are retryable; everything else is
/// not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A concurrent writer got there first. Retry with refreshed state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The storage backend is temporarily unavailable. Retry with backoff.
    Unavailable {
        /// A human-readable description of the outage.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Unavailable { message } => write!(f, "Unavailable: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDocumentType(value) => ApiError::InvalidInput {
            field: String::from("document_type"),
            message: format!("Unknown document type: {value}"),
        },
        DomainError::InvalidDocumentSubType(value) => ApiError::InvalidInput {
            field: String::from("sub_type"),
            message: format!("Unknown document subtype: {value}"),
        },
        DomainError::IncompatibleSubType {
            document_type,
            sub_type,
        } => ApiError::DomainRuleViolation {
            rule: String::from("classification_matrix"),
            message: format!(
                "Document type '{document_type}' does not permit subtype '{sub_type}'"
            ),
        },
        DomainError::MissingProjectNumber { sub_type } => ApiError::InvalidInput {
            field: String::from("project_number"),
            message: format!("Subtype '{sub_type}' requires a project number"),
        },
        DomainError::UnexpectedProjectNumber { sub_type } => ApiError::InvalidInput {
            field: String::from("project_number"),
            message: format!("Subtype '{sub_type}' does not take a project number"),
        },
        DomainError::InvalidDepartment(msg) => ApiError::InvalidInput {
            field: String::from("department"),
            message: msg,
        },
        DomainError::InvalidProjectNumber(msg) => ApiError::InvalidInput {
            field: String::from("project_number"),
            message: msg,
        },
        DomainError::InvalidPeriodYear { year } => ApiError::InvalidInput {
            field: String::from("year"),
            message: format!("Invalid period year: {year}. Must be between 2000 and 2200"),
        },
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidChangeNotes(msg) => ApiError::InvalidInput {
            field: String::from("change_notes"),
            message: msg,
        },
        DomainError::InvalidRequester(msg) => ApiError::InvalidInput {
            field: String::from("requester_id"),
            message: msg,
        },
        DomainError::InvalidFileReference(msg) => ApiError::InvalidInput {
            field: String::from("file_reference"),
            message: msg,
        },
        DomainError::VersionSequenceOverflow { major, minor } => ApiError::DomainRuleViolation {
            rule: String::from("version_sequence"),
            message: format!("Cannot increment version beyond {major}.{minor}"),
        },
        DomainError::VersionAppendNotAllowed { status } => ApiError::DomainRuleViolation {
            rule: String::from("document_lifecycle"),
            message: format!("Cannot append a version to a document with status '{status}'"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("document_lifecycle"),
                message: format!("Cannot transition status from '{from}' to '{to}': {reason}"),
            }
        }
        // Malformed identifiers and chain violations on stored state are
        // internal faults, not caller mistakes.
        DomainError::InvalidVersionId { .. }
        | DomainError::InvalidDocumentStatus { .. }
        | DomainError::ChainIntegrity { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::DocumentNotFound { reference } => ApiError::ResourceNotFound {
            resource_type: String::from("Document"),
            message: format!("Document '{reference}' does not exist"),
        },
        CoreError::ChainIntegrity { reference, reason } => ApiError::Internal {
            message: format!("Version chain for '{reference}' is corrupt: {reason}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// This translation is explicit and ensures persistence errors are not
/// leaked directly.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DocumentNotFound(reference) => ApiError::ResourceNotFound {
            resource_type: String::from("Document"),
            message: format!("Document '{reference}' does not exist"),
        },
        PersistenceError::VersionConflict {
            reference,
            expected,
        } => ApiError::Conflict {
            message: format!(
                "Document '{reference}' was updated concurrently (expected version {expected})"
            ),
        },
        PersistenceError::StatusConflict {
            reference,
            expected,
        } => ApiError::Conflict {
            message: format!(
                "Document '{reference}' changed status concurrently (expected {expected})"
            ),
        },
        PersistenceError::DuplicateReferenceNumber(reference) => ApiError::Conflict {
            message: format!("A document with reference '{reference}' already exists"),
        },
        PersistenceError::Unavailable(msg) => ApiError::Unavailable { message: msg },
        PersistenceError::DataIntegrity { reference, reason } => ApiError::Internal {
            message: format!("Stored state for '{reference}' is corrupt: {reason}"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
