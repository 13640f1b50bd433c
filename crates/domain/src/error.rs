// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Document type string is not recognized.
    InvalidDocumentType(String),
    /// Document subtype string is not recognized.
    InvalidDocumentSubType(String),
    /// The document type does not permit the requested subtype.
    IncompatibleSubType {
        /// The document type.
        document_type: String,
        /// The rejected subtype.
        sub_type: String,
    },
    /// The subtype requires a project number and none was supplied.
    MissingProjectNumber {
        /// The subtype that requires a project number.
        sub_type: String,
    },
    /// A project number was supplied for a subtype that does not take one.
    UnexpectedProjectNumber {
        /// The subtype that does not take a project number.
        sub_type: String,
    },
    /// Department token is empty or contains invalid characters.
    InvalidDepartment(String),
    /// Project number token is empty or contains invalid characters.
    InvalidProjectNumber(String),
    /// Period year is outside the supported range.
    InvalidPeriodYear {
        /// The rejected year value.
        year: u16,
    },
    /// Document title is empty or too long.
    InvalidTitle(String),
    /// Change notes exceed the permitted length.
    InvalidChangeNotes(String),
    /// Requester identifier is empty.
    InvalidRequester(String),
    /// File reference is empty.
    InvalidFileReference(String),
    /// A version identifier string could not be parsed.
    InvalidVersionId {
        /// The malformed value.
        value: String,
        /// Why parsing failed.
        reason: String,
    },
    /// Incrementing the minor component would overflow.
    VersionSequenceOverflow {
        /// The major component at the point of overflow.
        major: u32,
        /// The minor component at the point of overflow.
        minor: u32,
    },
    /// Document status string is not recognized.
    InvalidDocumentStatus {
        /// The rejected status value.
        status: String,
    },
    /// A version cannot be appended in the document's current status.
    VersionAppendNotAllowed {
        /// The document's current status.
        status: String,
    },
    /// The requested status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// The version chain violates a structural invariant.
    ///
    /// This indicates corrupted persisted state. It is fatal and is never
    /// auto-repaired.
    ChainIntegrity {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDocumentType(value) => {
                write!(f, "Unknown document type: {value}")
            }
            Self::InvalidDocumentSubType(value) => {
                write!(f, "Unknown document subtype: {value}")
            }
            Self::IncompatibleSubType {
                document_type,
                sub_type,
            } => {
                write!(
                    f,
                    "Document type '{document_type}' does not permit subtype '{sub_type}'"
                )
            }
            Self::MissingProjectNumber { sub_type } => {
                write!(f, "Subtype '{sub_type}' requires a project number")
            }
            Self::UnexpectedProjectNumber { sub_type } => {
                write!(f, "Subtype '{sub_type}' does not take a project number")
            }
            Self::InvalidDepartment(msg) => write!(f, "Invalid department: {msg}"),
            Self::InvalidProjectNumber(msg) => write!(f, "Invalid project number: {msg}"),
            Self::InvalidPeriodYear { year } => {
                write!(f, "Invalid period year: {year}. Must be between 2000 and 2200")
            }
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidChangeNotes(msg) => write!(f, "Invalid change notes: {msg}"),
            Self::InvalidRequester(msg) => write!(f, "Invalid requester: {msg}"),
            Self::InvalidFileReference(msg) => write!(f, "Invalid file reference: {msg}"),
            Self::InvalidVersionId { value, reason } => {
                write!(f, "Malformed version identifier '{value}': {reason}")
            }
            Self::VersionSequenceOverflow { major, minor } => {
                write!(
                    f,
                    "Version sequence overflow: cannot increment beyond {major}.{minor}"
                )
            }
            Self::InvalidDocumentStatus { status } => {
                write!(f, "Unknown document status: {status}")
            }
            Self::VersionAppendNotAllowed { status } => {
                write!(
                    f,
                    "Cannot append a version to a document with status '{status}'"
                )
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition status from '{from}' to '{to}': {reason}")
            }
            Self::ChainIntegrity { reason } => {
                write!(f, "Version chain integrity violation: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
