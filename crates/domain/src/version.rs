// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Version identifiers and the per-document version chain.
//!
//! Version identifiers are a structured `{major, minor}` pair internally and
//! take the dotted string form (`"1.0"`) only at the persistence and API
//! boundaries. A malformed stored identifier is a data-integrity failure and
//! is never silently repaired.

use crate::error::DomainError;
use crate::types::{FileReference, RequesterId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Represents an ordered version identifier.
///
/// Ordering is major-then-minor. Uploads advance the minor component only;
/// the major component never auto-increments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VersionId {
    /// The major component.
    major: u32,
    /// The minor component.
    minor: u32,
}

impl VersionId {
    /// Creates a new `VersionId`.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Returns the identifier of the first version of every document.
    #[must_use]
    pub const fn initial() -> Self {
        Self { major: 1, minor: 0 }
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(&self) -> u32 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Computes the identifier a version append produces.
    ///
    /// Only the minor component advances; the major component is fixed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::VersionSequenceOverflow` if the minor component
    /// cannot be incremented.
    pub const fn next_minor(self) -> Result<Self, DomainError> {
        match self.minor.checked_add(1) {
            Some(minor) => Ok(Self {
                major: self.major,
                minor,
            }),
            None => Err(DomainError::VersionSequenceOverflow {
                major: self.major,
                minor: self.minor,
            }),
        }
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for VersionId {
    type Err = DomainError;

    /// Parses the dotted string form, strictly.
    ///
    /// Exactly two non-empty decimal components are required. A missing
    /// minor component is rejected rather than defaulted; lenient parsing of
    /// a stored identifier can mask data corruption.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| DomainError::InvalidVersionId {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (major, minor) = s
            .split_once('.')
            .ok_or_else(|| malformed("expected '{major}.{minor}'"))?;
        if major.is_empty() || minor.is_empty() {
            return Err(malformed("empty component"));
        }
        if minor.contains('.') {
            return Err(malformed("more than two components"));
        }
        if !major.chars().all(|c| c.is_ascii_digit())
            || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return Err(malformed("non-numeric component"));
        }
        let major: u32 = major.parse().map_err(|_| malformed("component out of range"))?;
        let minor: u32 = minor.parse().map_err(|_| malformed("component out of range"))?;
        Ok(Self { major, minor })
    }
}

/// A single entry in a document's version chain.
///
/// Versions are append-only: once recorded they are never edited or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentVersion {
    /// The ordered version identifier.
    pub version: VersionId,
    /// The storage key of the file artifact for this version.
    pub file_reference: FileReference,
    /// Who uploaded this version.
    pub uploaded_by: RequesterId,
    /// When this version was uploaded (UTC).
    pub uploaded_at: OffsetDateTime,
    /// Optional notes describing the change.
    pub change_notes: Option<String>,
    /// Whether this is the document's active version.
    pub is_active: bool,
}

impl DocumentVersion {
    /// Creates the first version of a document (`1.0`, active).
    #[must_use]
    pub const fn initial(
        file_reference: FileReference,
        uploaded_by: RequesterId,
        uploaded_at: OffsetDateTime,
        change_notes: Option<String>,
    ) -> Self {
        Self {
            version: VersionId::initial(),
            file_reference,
            uploaded_by,
            uploaded_at,
            change_notes,
            is_active: true,
        }
    }
}

/// The ordered, append-only version chain of a single document.
///
/// The chain is exclusively owned by its document record. Insertion order
/// must equal version-identifier order, and exactly one entry is active at
/// any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChain {
    /// All versions of this document, in insertion order.
    versions: Vec<DocumentVersion>,
}

impl VersionChain {
    /// Creates a chain holding a single initial version.
    #[must_use]
    pub fn initialize(first: DocumentVersion) -> Self {
        Self {
            versions: vec![first],
        }
    }

    /// Reconstructs a chain from persisted entries, in insertion order.
    ///
    /// No validation is performed here; callers reconstructing persisted
    /// state must follow up with [`VersionChain::validate`].
    #[must_use]
    pub const fn from_versions(versions: Vec<DocumentVersion>) -> Self {
        Self { versions }
    }

    /// Returns all versions in insertion order.
    #[must_use]
    pub fn versions(&self) -> &[DocumentVersion] {
        &self.versions
    }

    /// Returns the number of versions in this chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true if this chain has no versions.
    ///
    /// An empty chain is only observable on corrupted persisted state; a
    /// freshly created document always has one version.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Returns the active version, if the chain has exactly one.
    #[must_use]
    pub fn active(&self) -> Option<&DocumentVersion> {
        let mut actives = self.versions.iter().filter(|v| v.is_active);
        let first = actives.next()?;
        if actives.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Returns the newest version by insertion order.
    #[must_use]
    pub fn latest(&self) -> Option<&DocumentVersion> {
        self.versions.last()
    }

    /// Produces a new chain with every existing entry deactivated and the
    /// supplied version appended as the sole active entry.
    ///
    /// This is a structural operation; [`crate::DomainError`]-level checks
    /// (identifier ordering, activity of the input) are the caller's
    /// responsibility and are enforced by the core's append operation.
    #[must_use]
    pub fn append(&self, new_version: DocumentVersion) -> Self {
        let mut versions: Vec<DocumentVersion> = self
            .versions
            .iter()
            .cloned()
            .map(|mut v| {
                v.is_active = false;
                v
            })
            .collect();
        versions.push(new_version);
        Self { versions }
    }

    /// Validates the structural invariants of this chain.
    ///
    /// # Invariants
    ///
    /// - The chain is non-empty.
    /// - Exactly one entry is active, and it is the newest entry.
    /// - The active entry's identifier equals `current`.
    /// - Identifiers strictly increase in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ChainIntegrity` describing the first violated
    /// invariant. Integrity failures indicate corrupted persisted state and
    /// must not be auto-repaired.
    pub fn validate(&self, current: VersionId) -> Result<(), DomainError> {
        if self.versions.is_empty() {
            return Err(DomainError::ChainIntegrity {
                reason: "chain has no versions".to_string(),
            });
        }

        let active_count = self.versions.iter().filter(|v| v.is_active).count();
        if active_count != 1 {
            return Err(DomainError::ChainIntegrity {
                reason: format!("expected exactly one active version, found {active_count}"),
            });
        }

        // Non-empty is checked above, so last() always yields an entry.
        let Some(newest) = self.versions.last() else {
            return Err(DomainError::ChainIntegrity {
                reason: "chain has no versions".to_string(),
            });
        };
        if !newest.is_active {
            return Err(DomainError::ChainIntegrity {
                reason: "active version is not the newest entry".to_string(),
            });
        }
        if newest.version != current {
            return Err(DomainError::ChainIntegrity {
                reason: format!(
                    "active version {} does not match current pointer {current}",
                    newest.version
                ),
            });
        }

        for pair in self.versions.windows(2) {
            if pair[0].version >= pair[1].version {
                return Err(DomainError::ChainIntegrity {
                    reason: format!(
                        "version identifiers are not strictly increasing ({} then {})",
                        pair[0].version, pair[1].version
                    ),
                });
            }
        }

        Ok(())
    }
}
