// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::scope::ReferenceNumber;
use crate::status::DocumentStatus;
use crate::version::{VersionChain, VersionId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Represents a document type classification.
///
/// Document types are fixed domain constants. Each type carries a short code
/// used as the leading segment of allocated reference numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Narrative or analytical report.
    Report,
    /// Organizational policy document.
    Policy,
    /// Contractual agreement.
    Contract,
    /// Internal memorandum.
    Memo,
}

impl DocumentType {
    /// Returns the string representation of this document type.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Policy => "policy",
            Self::Contract => "contract",
            Self::Memo => "memo",
        }
    }

    /// Returns the reference-number code segment for this document type.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Report => "RPT",
            Self::Policy => "POL",
            Self::Contract => "CTR",
            Self::Memo => "MEM",
        }
    }

    /// Parses a document type from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid document type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "report" => Ok(Self::Report),
            "policy" => Ok(Self::Policy),
            "contract" => Ok(Self::Contract),
            "memo" => Ok(Self::Memo),
            _ => Err(DomainError::InvalidDocumentType(s.to_string())),
        }
    }

    /// Checks whether this document type permits the given subtype.
    ///
    /// Compatibility matrix:
    /// - Report: General, Project, External
    /// - Policy: General only
    /// - Contract: Project, External
    /// - Memo: General only
    #[must_use]
    pub const fn allows_sub_type(&self, sub_type: DocumentSubType) -> bool {
        matches!(
            (self, sub_type),
            (Self::Report, _)
                | (Self::Policy | Self::Memo, DocumentSubType::General)
                | (
                    Self::Contract,
                    DocumentSubType::Project | DocumentSubType::External
                )
        )
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a document subtype classification.
///
/// The subtype determines which contextual token is folded into the
/// allocation scope: Project subtypes are scoped by project number, all
/// others by department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSubType {
    /// Department-scoped document with no external party.
    General,
    /// Document belonging to a specific project.
    Project,
    /// Document exchanged with an external party.
    External,
}

impl DocumentSubType {
    /// Returns the string representation of this subtype.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Project => "project",
            Self::External => "external",
        }
    }

    /// Returns the reference-number code segment for this subtype.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::General => "GEN",
            Self::Project => "PRJ",
            Self::External => "EXT",
        }
    }

    /// Parses a subtype from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid subtype.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "general" => Ok(Self::General),
            "project" => Ok(Self::Project),
            "external" => Ok(Self::External),
            _ => Err(DomainError::InvalidDocumentSubType(s.to_string())),
        }
    }

    /// Returns whether allocations with this subtype require a project number.
    #[must_use]
    pub const fn requires_project_number(&self) -> bool {
        matches!(self, Self::Project)
    }
}

impl FromStr for DocumentSubType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DocumentSubType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a department token.
///
/// Department tokens are normalized to uppercase to ensure case-insensitive
/// scope derivation and appear verbatim in allocated reference numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Department {
    /// The department token (uppercase alphanumeric).
    value: String,
}

impl Department {
    /// Creates a new `Department`.
    ///
    /// The token is normalized to uppercase. It must be non-empty and
    /// consist only of ASCII alphanumeric characters so that reference
    /// numbers remain unambiguous.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDepartment` if the token is empty or
    /// contains characters other than ASCII letters and digits.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidDepartment(
                "department must not be empty".to_string(),
            ));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidDepartment(format!(
                "department '{trimmed}' must be alphanumeric"
            )));
        }
        Ok(Self {
            value: trimmed.to_uppercase(),
        })
    }

    /// Returns the department token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents a project number token.
///
/// Required when the allocation subtype is Project; it replaces the
/// department as the contextual segment of the reference number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectNumber {
    /// The project number token (uppercase alphanumeric).
    value: String,
}

impl ProjectNumber {
    /// Creates a new `ProjectNumber`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProjectNumber` if the token is empty or
    /// contains characters other than ASCII letters and digits.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidProjectNumber(
                "project number must not be empty".to_string(),
            ));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidProjectNumber(format!(
                "project number '{trimmed}' must be alphanumeric"
            )));
        }
        Ok(Self {
            value: trimmed.to_uppercase(),
        })
    }

    /// Returns the project number token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents the identity of a requester.
///
/// Requester identifiers are opaque; they are resolved by the caller's
/// identity layer before reaching the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequesterId {
    /// The requester identifier.
    value: String,
}

impl RequesterId {
    /// Creates a new `RequesterId`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRequester` if the identifier is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRequester(
                "requester id must not be empty".to_string(),
            ));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the requester identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents a reference to a stored file artifact.
///
/// File storage mechanics are out of scope for the core; this is the opaque
/// key under which the artifact was durably stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileReference {
    /// The storage key.
    value: String,
}

impl FileReference {
    /// Creates a new `FileReference`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidFileReference` if the key is empty.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidFileReference(
                "file reference must not be empty".to_string(),
            ));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the storage key.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Represents the allocation period (calendar year).
///
/// Counters are scoped per period; a new period starts a fresh sequence for
/// every scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodYear {
    /// The year value (e.g., 2024).
    year: u16,
}

impl PeriodYear {
    /// The earliest supported period year.
    pub const MIN: u16 = 2000;
    /// The latest supported period year.
    pub const MAX: u16 = 2200;

    /// Creates a new `PeriodYear`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPeriodYear` if the year is outside the
    /// range 2000-2200.
    pub const fn new(year: u16) -> Result<Self, DomainError> {
        if year >= Self::MIN && year <= Self::MAX {
            Ok(Self { year })
        } else {
            Err(DomainError::InvalidPeriodYear { year })
        }
    }

    /// Returns the year value.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }
}

/// Represents a registered document.
///
/// The document is the aggregate root: it owns its version chain and the
/// `current_version` pointer, and carries the immutable reference number
/// assigned at creation. `document_id` is the canonical internal identifier;
/// `None` indicates the document has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Canonical internal identifier assigned by the database.
    /// `None` indicates the document has not been persisted yet.
    pub document_id: Option<i64>,
    /// The reference number assigned at creation. Immutable.
    pub reference: ReferenceNumber,
    /// The document type classification.
    pub document_type: DocumentType,
    /// The document subtype classification.
    pub sub_type: DocumentSubType,
    /// The owning department.
    pub department: Department,
    /// The project number, present if and only if `sub_type` is Project.
    pub project_number: Option<ProjectNumber>,
    /// The allocation period the reference number was drawn from.
    pub period: PeriodYear,
    /// The document title (informational, not unique).
    pub title: String,
    /// The requester who created the document.
    pub author: RequesterId,
    /// The lifecycle status.
    pub status: DocumentStatus,
    /// The version identifier of the single active chain entry.
    pub current_version: VersionId,
    /// The ordered, append-only version chain.
    pub chain: VersionChain,
    /// When the document was created (UTC).
    pub created_at: OffsetDateTime,
}

impl Document {
    /// Creates a new `Document` without a persisted `document_id`.
    ///
    /// The `document_id` will be assigned by the persistence layer upon
    /// first save.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        reference: ReferenceNumber,
        document_type: DocumentType,
        sub_type: DocumentSubType,
        department: Department,
        project_number: Option<ProjectNumber>,
        period: PeriodYear,
        title: String,
        author: RequesterId,
        status: DocumentStatus,
        current_version: VersionId,
        chain: VersionChain,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            document_id: None,
            reference,
            document_type,
            sub_type,
            department,
            project_number,
            period,
            title,
            author,
            status,
            current_version,
            chain,
            created_at,
        }
    }

    /// Creates a `Document` with an existing `document_id` (from persistence).
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        document_id: i64,
        reference: ReferenceNumber,
        document_type: DocumentType,
        sub_type: DocumentSubType,
        department: Department,
        project_number: Option<ProjectNumber>,
        period: PeriodYear,
        title: String,
        author: RequesterId,
        status: DocumentStatus,
        current_version: VersionId,
        chain: VersionChain,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            document_id: Some(document_id),
            reference,
            document_type,
            sub_type,
            department,
            project_number,
            period,
            title,
            author,
            status,
            current_version,
            chain,
            created_at,
        }
    }

    /// Validates the structural invariants of this document.
    ///
    /// # Invariants
    ///
    /// - The chain holds exactly one active entry, which is the newest.
    /// - The active entry's version equals `current_version`.
    /// - Chain insertion order equals version-identifier order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ChainIntegrity` if any invariant is violated.
    pub fn validate_chain(&self) -> Result<(), DomainError> {
        self.chain.validate(self.current_version)
    }
}
