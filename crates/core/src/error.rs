// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use registrar_domain::DomainError;

/// Errors that can occur during core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The targeted document does not exist or is deleted.
    ///
    /// Deleted documents are deliberately indistinguishable from missing
    /// ones at this boundary.
    DocumentNotFound {
        /// The reference number or identifier the caller supplied.
        reference: String,
    },
    /// The document's persisted version chain is corrupt.
    ///
    /// Fatal. The chain is never auto-repaired; repair requires operator
    /// intervention.
    ChainIntegrity {
        /// The document's reference number.
        reference: String,
        /// Description of the violated invariant.
        reason: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::DocumentNotFound { reference } => {
                write!(f, "Document not found: {reference}")
            }
            Self::ChainIntegrity { reference, reason } => {
                write!(f, "Version chain for '{reference}' is corrupt: {reason}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
