// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allocation scopes and reference-number formatting.
//!
//! A scope is the composite key that selects which sequence counter an
//! allocation increments. Scope derivation is a pure, deterministic function
//! of the allocation parameters: the same parameters always map to the same
//! scope within a period.

use crate::error::DomainError;
use crate::types::{Department, DocumentSubType, DocumentType, PeriodYear, ProjectNumber};
use crate::validation::validate_classification;
use serde::{Deserialize, Serialize};

/// The contextual segment of an allocation scope.
///
/// Project-subtype allocations are scoped by project number; all other
/// subtypes are scoped by department.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeContext {
    /// Scoped by owning department.
    Department(Department),
    /// Scoped by project number.
    Project(ProjectNumber),
}

impl ScopeContext {
    /// Returns the token that appears in scope keys and reference numbers.
    #[must_use]
    pub fn token(&self) -> &str {
        match self {
            Self::Department(department) => department.value(),
            Self::Project(project) => project.value(),
        }
    }
}

/// The composite key identifying one sequence counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AllocationScope {
    /// The document type.
    document_type: DocumentType,
    /// The document subtype.
    sub_type: DocumentSubType,
    /// The department or project context.
    context: ScopeContext,
    /// The allocation period.
    period: PeriodYear,
}

impl AllocationScope {
    /// Derives the allocation scope from allocation parameters.
    ///
    /// Derivation is pure and deterministic. All input validation happens
    /// here, before any counter is touched:
    /// - the type/subtype combination must be permitted,
    /// - a Project subtype requires a project number,
    /// - a non-Project subtype must not carry one (silently ignoring it
    ///   would make scope derivation depend on which inputs were dropped).
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` describing the first violated rule.
    pub fn derive(
        document_type: DocumentType,
        sub_type: DocumentSubType,
        department: Department,
        project_number: Option<ProjectNumber>,
        period: PeriodYear,
    ) -> Result<Self, DomainError> {
        validate_classification(document_type, sub_type)?;

        let context = if sub_type.requires_project_number() {
            match project_number {
                Some(project) => ScopeContext::Project(project),
                None => {
                    return Err(DomainError::MissingProjectNumber {
                        sub_type: sub_type.as_str().to_string(),
                    });
                }
            }
        } else {
            if project_number.is_some() {
                return Err(DomainError::UnexpectedProjectNumber {
                    sub_type: sub_type.as_str().to_string(),
                });
            }
            ScopeContext::Department(department)
        };

        Ok(Self {
            document_type,
            sub_type,
            context,
            period,
        })
    }

    /// Returns the document type.
    #[must_use]
    pub const fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Returns the document subtype.
    #[must_use]
    pub const fn sub_type(&self) -> DocumentSubType {
        self.sub_type
    }

    /// Returns the contextual segment.
    #[must_use]
    pub const fn context(&self) -> &ScopeContext {
        &self.context
    }

    /// Returns the allocation period.
    #[must_use]
    pub const fn period(&self) -> PeriodYear {
        self.period
    }

    /// Returns the persistent counter key for this scope.
    ///
    /// The key includes every scope component, so two scopes that format
    /// references with a shared prefix still draw from distinct counters.
    #[must_use]
    pub fn key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.document_type.code(),
            self.sub_type.code(),
            self.context.token(),
            self.period.year()
        )
    }

    /// Formats the reference number for a sequence value drawn from this
    /// scope.
    ///
    /// General-subtype references omit the subtype segment
    /// (`RPT-HR-2024-0001`); other subtypes insert their code after the type
    /// (`CTR-PRJ-1042-2024-0001`). The sequence value is zero-padded to at
    /// least four digits and widens naturally beyond 9999.
    #[must_use]
    pub fn format_reference(&self, sequence: i64) -> ReferenceNumber {
        let type_code = self.document_type.code();
        let token = self.context.token();
        let year = self.period.year();

        let value = match self.sub_type {
            DocumentSubType::General => {
                format!("{type_code}-{token}-{year}-{sequence:04}")
            }
            DocumentSubType::Project | DocumentSubType::External => {
                format!(
                    "{type_code}-{}-{token}-{year}-{sequence:04}",
                    self.sub_type.code()
                )
            }
        };

        ReferenceNumber::new(value)
    }
}

/// A formatted document reference number.
///
/// Reference numbers are globally unique (enforced by a uniqueness
/// constraint on the document record in addition to deterministic
/// formatting) and stable: once assigned to a document they are never
/// regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceNumber {
    /// The formatted reference string.
    value: String,
}

impl ReferenceNumber {
    /// Creates a `ReferenceNumber` from its string form.
    ///
    /// Reference numbers are produced by [`AllocationScope::format_reference`]
    /// or reconstructed verbatim from persistence; the string is opaque to
    /// everything else.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self { value }
    }

    /// Returns the formatted reference string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
