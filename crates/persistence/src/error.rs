// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A document with this reference number already exists.
    DuplicateReferenceNumber(String),
    /// A conditional version update found a different current version.
    ///
    /// Another writer advanced the document first. Retryable: reload the
    /// document and reapply.
    VersionConflict {
        /// The document's reference number.
        reference: String,
        /// The current version the caller expected to replace.
        expected: String,
    },
    /// A conditional status update found a different status.
    ///
    /// Retryable: reload the document and reapply.
    StatusConflict {
        /// The document's reference number.
        reference: String,
        /// The status the caller expected to transition from.
        expected: String,
    },
    /// The requested document does not exist or is deleted.
    DocumentNotFound(String),
    /// Persisted document state violates a structural invariant.
    ///
    /// Fatal. Logged and surfaced; never auto-repaired.
    DataIntegrity {
        /// The document's reference number.
        reference: String,
        /// Description of the violated invariant.
        reason: String,
    },
    /// The database is busy or locked past the configured timeout.
    ///
    /// Retryable with backoff. No partial state was committed.
    Unavailable(String),
    /// A persisted aggregate could not be reconstructed.
    ReconstructionError(String),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::DuplicateReferenceNumber(reference) => {
                write!(f, "A document with reference '{reference}' already exists")
            }
            Self::VersionConflict {
                reference,
                expected,
            } => {
                write!(
                    f,
                    "Concurrent update detected on '{reference}': current version is no longer {expected}"
                )
            }
            Self::StatusConflict {
                reference,
                expected,
            } => {
                write!(
                    f,
                    "Concurrent update detected on '{reference}': status is no longer {expected}"
                )
            }
            Self::DocumentNotFound(reference) => {
                write!(f, "Document not found: {reference}")
            }
            Self::DataIntegrity { reference, reason } => {
                write!(f, "Data integrity violation on '{reference}': {reason}")
            }
            Self::Unavailable(msg) => write!(f, "Database unavailable: {msg}"),
            Self::ReconstructionError(msg) => {
                write!(f, "State reconstruction error: {msg}")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(_, ref info)
                if info.message().contains("database is locked")
                    || info.message().contains("database table is locked") =>
            {
                Self::Unavailable(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
