// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AllocationScope, Department, DocumentSubType, DocumentType, DomainError, PeriodYear,
    ProjectNumber,
};

fn department(token: &str) -> Department {
    Department::new(token).expect("valid department")
}

fn period(year: u16) -> PeriodYear {
    PeriodYear::new(year).expect("valid period year")
}

#[test]
fn test_scope_derivation_is_deterministic() {
    let first = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::General,
        department("HR"),
        None,
        period(2024),
    )
    .expect("valid scope");
    let second = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::General,
        department("hr"),
        None,
        period(2024),
    )
    .expect("valid scope");

    assert_eq!(first, second);
    assert_eq!(first.key(), second.key());
}

#[test]
fn test_scope_key_includes_every_component() {
    let scope = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::General,
        department("HR"),
        None,
        period(2024),
    )
    .expect("valid scope");

    assert_eq!(scope.key(), "RPT:GEN:HR:2024");
}

#[test]
fn test_general_reference_format() {
    let scope = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::General,
        department("HR"),
        None,
        period(2024),
    )
    .expect("valid scope");

    assert_eq!(scope.format_reference(1).value(), "RPT-HR-2024-0001");
    assert_eq!(scope.format_reference(42).value(), "RPT-HR-2024-0042");
}

#[test]
fn test_project_reference_format() {
    let scope = AllocationScope::derive(
        DocumentType::Contract,
        DocumentSubType::Project,
        department("LEGAL"),
        Some(ProjectNumber::new("1042").expect("valid project number")),
        period(2024),
    )
    .expect("valid scope");

    assert_eq!(scope.key(), "CTR:PRJ:1042:2024");
    assert_eq!(scope.format_reference(1).value(), "CTR-PRJ-1042-2024-0001");
}

#[test]
fn test_external_reference_format_keeps_department_context() {
    let scope = AllocationScope::derive(
        DocumentType::Contract,
        DocumentSubType::External,
        department("LEGAL"),
        None,
        period(2025),
    )
    .expect("valid scope");

    assert_eq!(scope.format_reference(7).value(), "CTR-EXT-LEGAL-2025-0007");
}

#[test]
fn test_sequence_padding_widens_past_four_digits() {
    let scope = AllocationScope::derive(
        DocumentType::Memo,
        DocumentSubType::General,
        department("OPS"),
        None,
        period(2024),
    )
    .expect("valid scope");

    assert_eq!(scope.format_reference(9999).value(), "MEM-OPS-2024-9999");
    assert_eq!(scope.format_reference(10000).value(), "MEM-OPS-2024-10000");
}

#[test]
fn test_project_sub_type_requires_project_number() {
    let result = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::Project,
        department("HR"),
        None,
        period(2024),
    );

    assert!(matches!(
        result,
        Err(DomainError::MissingProjectNumber { .. })
    ));
}

#[test]
fn test_non_project_sub_type_rejects_project_number() {
    let result = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::General,
        department("HR"),
        Some(ProjectNumber::new("1042").expect("valid project number")),
        period(2024),
    );

    assert!(matches!(
        result,
        Err(DomainError::UnexpectedProjectNumber { .. })
    ));
}

#[test]
fn test_incompatible_classification_is_rejected() {
    let result = AllocationScope::derive(
        DocumentType::Contract,
        DocumentSubType::General,
        department("LEGAL"),
        None,
        period(2024),
    );

    assert!(matches!(
        result,
        Err(DomainError::IncompatibleSubType { .. })
    ));
}

#[test]
fn test_distinct_scopes_produce_distinct_keys() {
    let hr = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::General,
        department("HR"),
        None,
        period(2024),
    )
    .expect("valid scope");
    let finance = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::General,
        department("FINANCE"),
        None,
        period(2024),
    )
    .expect("valid scope");
    let next_year = AllocationScope::derive(
        DocumentType::Report,
        DocumentSubType::General,
        department("HR"),
        None,
        period(2025),
    )
    .expect("valid scope");

    assert_ne!(hr.key(), finance.key());
    assert_ne!(hr.key(), next_year.key());
}
