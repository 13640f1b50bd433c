// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allocation planning: the validation half of the reference allocator.
//!
//! Planning is pure. Everything that can be rejected is rejected here,
//! before the sequence store is touched, so a validation failure never
//! consumes or disturbs a counter value. The persistence layer performs the
//! atomic increment and formats the final reference from the plan.

use crate::error::CoreError;
use registrar_domain::{
    AllocationScope, Department, DocumentSubType, DocumentType, PeriodYear, ProjectNumber,
};

/// The parameters of one reference-number allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// The document type.
    pub document_type: DocumentType,
    /// The document subtype.
    pub sub_type: DocumentSubType,
    /// The requesting department.
    pub department: Department,
    /// The project number; required if and only if `sub_type` is Project.
    pub project_number: Option<ProjectNumber>,
    /// The allocation period.
    pub period: PeriodYear,
}

/// Validates an allocation request and derives its scope.
///
/// The returned scope selects the sequence counter and carries everything
/// needed to format the final reference number. Two requests with the same
/// parameters always derive the same scope.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the type/subtype combination is
/// not permitted, a required project number is missing, or a project number
/// is supplied where none is expected. No counter state is read or written
/// on any path through this function.
pub fn plan_allocation(request: AllocationRequest) -> Result<AllocationScope, CoreError> {
    let scope = AllocationScope::derive(
        request.document_type,
        request.sub_type,
        request.department,
        request.project_number,
        request.period,
    )?;
    Ok(scope)
}
