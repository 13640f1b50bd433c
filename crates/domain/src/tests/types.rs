// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Department, DocumentSubType, DocumentType, DomainError, PeriodYear, ProjectNumber,
    RequesterId,
};

#[test]
fn test_document_type_string_round_trip() {
    let types = vec![
        DocumentType::Report,
        DocumentType::Policy,
        DocumentType::Contract,
        DocumentType::Memo,
    ];

    for document_type in types {
        let s = document_type.as_str();
        match DocumentType::parse(s) {
            Ok(parsed) => assert_eq!(document_type, parsed),
            Err(e) => panic!("Failed to parse document type string: {s}: {e}"),
        }
    }
}

#[test]
fn test_document_type_rejects_unknown_string() {
    let result = DocumentType::parse("blueprint");
    assert!(matches!(result, Err(DomainError::InvalidDocumentType(_))));
}

#[test]
fn test_sub_type_string_round_trip() {
    let sub_types = vec![
        DocumentSubType::General,
        DocumentSubType::Project,
        DocumentSubType::External,
    ];

    for sub_type in sub_types {
        let s = sub_type.as_str();
        match DocumentSubType::parse(s) {
            Ok(parsed) => assert_eq!(sub_type, parsed),
            Err(e) => panic!("Failed to parse subtype string: {s}: {e}"),
        }
    }
}

#[test]
fn test_classification_matrix() {
    // Report permits every subtype.
    assert!(DocumentType::Report.allows_sub_type(DocumentSubType::General));
    assert!(DocumentType::Report.allows_sub_type(DocumentSubType::Project));
    assert!(DocumentType::Report.allows_sub_type(DocumentSubType::External));

    // Policy and Memo are general-only.
    assert!(DocumentType::Policy.allows_sub_type(DocumentSubType::General));
    assert!(!DocumentType::Policy.allows_sub_type(DocumentSubType::Project));
    assert!(!DocumentType::Policy.allows_sub_type(DocumentSubType::External));
    assert!(DocumentType::Memo.allows_sub_type(DocumentSubType::General));
    assert!(!DocumentType::Memo.allows_sub_type(DocumentSubType::Project));

    // Contracts always involve a project or an external party.
    assert!(!DocumentType::Contract.allows_sub_type(DocumentSubType::General));
    assert!(DocumentType::Contract.allows_sub_type(DocumentSubType::Project));
    assert!(DocumentType::Contract.allows_sub_type(DocumentSubType::External));
}

#[test]
fn test_only_project_sub_type_requires_project_number() {
    assert!(DocumentSubType::Project.requires_project_number());
    assert!(!DocumentSubType::General.requires_project_number());
    assert!(!DocumentSubType::External.requires_project_number());
}

#[test]
fn test_department_normalizes_to_uppercase() {
    let department = Department::new("hr").expect("valid department");
    assert_eq!(department.value(), "HR");

    let department = Department::new("  Finance  ").expect("valid department");
    assert_eq!(department.value(), "FINANCE");
}

#[test]
fn test_department_rejects_empty_and_non_alphanumeric() {
    assert!(matches!(
        Department::new(""),
        Err(DomainError::InvalidDepartment(_))
    ));
    assert!(matches!(
        Department::new("   "),
        Err(DomainError::InvalidDepartment(_))
    ));
    assert!(matches!(
        Department::new("R&D"),
        Err(DomainError::InvalidDepartment(_))
    ));
    assert!(matches!(
        Department::new("HR-OPS"),
        Err(DomainError::InvalidDepartment(_))
    ));
}

#[test]
fn test_project_number_normalizes_to_uppercase() {
    let project = ProjectNumber::new("p1042").expect("valid project number");
    assert_eq!(project.value(), "P1042");
}

#[test]
fn test_project_number_rejects_separator_characters() {
    // Separators inside the token would make formatted references ambiguous.
    assert!(matches!(
        ProjectNumber::new("P-1042"),
        Err(DomainError::InvalidProjectNumber(_))
    ));
    assert!(matches!(
        ProjectNumber::new(""),
        Err(DomainError::InvalidProjectNumber(_))
    ));
}

#[test]
fn test_period_year_bounds() {
    assert!(PeriodYear::new(1999).is_err());
    assert!(PeriodYear::new(2000).is_ok());
    assert!(PeriodYear::new(2024).is_ok());
    assert!(PeriodYear::new(2200).is_ok());
    assert!(PeriodYear::new(2201).is_err());
}

#[test]
fn test_requester_id_rejects_empty() {
    assert!(matches!(
        RequesterId::new("  "),
        Err(DomainError::InvalidRequester(_))
    ));

    let requester = RequesterId::new("u-7731").expect("valid requester");
    assert_eq!(requester.value(), "u-7731");
}
