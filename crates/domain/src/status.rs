// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document lifecycle status and transition logic.
//!
//! Status transitions are caller-initiated and monotone: a document moves
//! from `active` toward `deleted` and never back. Records are soft-deleted
//! only; nothing is ever physically removed.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Document lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Document is live; versions may be appended.
    #[default]
    Active,
    /// Document is retained but closed to new versions.
    Archived,
    /// Document is soft-deleted. Terminal; presented as not-found to callers.
    Deleted,
}

impl DocumentStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDocumentStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            "deleted" => Ok(Self::Deleted),
            _ => Err(DomainError::InvalidDocumentStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (no further mutation permitted).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Deleted)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions are:
    /// - `Active → Archived`
    /// - `Active → Deleted`
    /// - `Archived → Deleted`
    ///
    /// Archiving is one-way; there is no return edge to `Active`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::Active => matches!(new_status, Self::Archived | Self::Deleted),
            Self::Archived => matches!(new_status, Self::Deleted),
            Self::Deleted => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by document lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        let statuses = vec![
            DocumentStatus::Active,
            DocumentStatus::Archived,
            DocumentStatus::Deleted,
        ];

        for status in statuses {
            let s = status.as_str();
            match DocumentStatus::parse_str(s) {
                Ok(parsed) => assert_eq!(status, parsed),
                Err(e) => panic!("Failed to parse status string: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_invalid_status_string() {
        let result = DocumentStatus::parse_str("retired");
        assert!(result.is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(!DocumentStatus::Active.is_terminal());
        assert!(!DocumentStatus::Archived.is_terminal());
        assert!(DocumentStatus::Deleted.is_terminal());
    }

    #[test]
    fn test_valid_transitions_from_active() {
        let current = DocumentStatus::Active;

        assert!(current.validate_transition(DocumentStatus::Archived).is_ok());
        assert!(current.validate_transition(DocumentStatus::Deleted).is_ok());
    }

    #[test]
    fn test_valid_transitions_from_archived() {
        let current = DocumentStatus::Archived;

        assert!(current.validate_transition(DocumentStatus::Deleted).is_ok());
    }

    #[test]
    fn test_archive_is_one_way() {
        let current = DocumentStatus::Archived;

        assert!(current.validate_transition(DocumentStatus::Active).is_err());
    }

    #[test]
    fn test_no_transitions_from_deleted() {
        let current = DocumentStatus::Deleted;

        assert!(current.validate_transition(DocumentStatus::Active).is_err());
        assert!(current.validate_transition(DocumentStatus::Archived).is_err());
        assert!(current.validate_transition(DocumentStatus::Deleted).is_err());
    }

    #[test]
    fn test_self_transition_rejected() {
        let current = DocumentStatus::Active;

        assert!(current.validate_transition(DocumentStatus::Active).is_err());
    }
}
