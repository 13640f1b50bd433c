// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for reference allocation and preview through the API boundary.

use super::helpers::{
    create_request, create_test_document, general_params, test_cause, test_identity,
    test_persistence,
};
use crate::error::ApiError;
use crate::handlers::{create_document, preview_reference};
use crate::request_response::{AllocationParams, CreateDocumentRequest};

#[test]
fn test_allocations_are_dense_within_a_scope() {
    let mut persistence = test_persistence();

    let first = create_test_document(&mut persistence);
    let second = create_test_document(&mut persistence);
    let third = create_test_document(&mut persistence);

    assert_eq!(first.reference_number, "RPT-HR-2024-0001");
    assert_eq!(second.reference_number, "RPT-HR-2024-0002");
    assert_eq!(third.reference_number, "RPT-HR-2024-0003");

    let preview = preview_reference(&mut persistence, &general_params("HR", 2024))
        .expect("preview should succeed");
    assert_eq!(preview.reference_number, "RPT-HR-2024-0004");
}

#[test]
fn test_preview_is_non_reserving() {
    let mut persistence = test_persistence();
    let params = general_params("HR", 2024);

    for _ in 0..3 {
        let preview =
            preview_reference(&mut persistence, &params).expect("preview should succeed");
        assert_eq!(preview.reference_number, "RPT-HR-2024-0001");
        assert!(preview.message.contains("not reserved"));
    }

    // The allocation still produces the previewed value.
    let created = create_test_document(&mut persistence);
    assert_eq!(created.reference_number, "RPT-HR-2024-0001");
}

#[test]
fn test_unknown_document_type_is_invalid_input() {
    let mut persistence = test_persistence();
    let mut params = general_params("HR", 2024);
    params.document_type = String::from("blueprint");

    let result = preview_reference(&mut persistence, &params);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "document_type"
    ));
}

#[test]
fn test_validation_failure_never_consumes_a_sequence_value() {
    let mut persistence = test_persistence();

    // Project subtype without a project number fails validation.
    let request = CreateDocumentRequest {
        allocation: AllocationParams {
            document_type: String::from("report"),
            sub_type: String::from("project"),
            department: String::from("HR"),
            project_number: None,
            year: 2024,
        },
        title: String::from("Project plan"),
        file_reference: String::from("blob/plan"),
        change_notes: None,
    };
    let result = create_document(&mut persistence, &test_identity(), request, test_cause());
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "project_number"
    ));

    // The general counter for the same department is untouched.
    let preview = preview_reference(&mut persistence, &general_params("HR", 2024))
        .expect("preview should succeed");
    assert_eq!(preview.reference_number, "RPT-HR-2024-0001");
}

#[test]
fn test_project_scoped_allocation() {
    let mut persistence = test_persistence();

    let request = CreateDocumentRequest {
        allocation: AllocationParams {
            document_type: String::from("contract"),
            sub_type: String::from("project"),
            department: String::from("LEGAL"),
            project_number: Some(String::from("1042")),
            year: 2024,
        },
        title: String::from("Subcontractor agreement"),
        file_reference: String::from("blob/contract"),
        change_notes: None,
    };

    let response = create_document(&mut persistence, &test_identity(), request, test_cause())
        .expect("creation should succeed");

    assert_eq!(response.reference_number, "CTR-PRJ-1042-2024-0001");
    assert_eq!(response.version, "1.0");
}

#[test]
fn test_incompatible_classification_is_a_rule_violation() {
    let mut persistence = test_persistence();
    let mut request = create_request("LEGAL", 2024);
    request.allocation.document_type = String::from("contract");
    request.allocation.sub_type = String::from("general");

    let result = create_document(&mut persistence, &test_identity(), request, test_cause());
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "classification_matrix"
    ));
}

#[test]
fn test_scopes_do_not_interfere() {
    let mut persistence = test_persistence();

    let hr = create_test_document(&mut persistence);
    assert_eq!(hr.reference_number, "RPT-HR-2024-0001");

    let finance = create_document(
        &mut persistence,
        &test_identity(),
        create_request("FINANCE", 2024),
        test_cause(),
    )
    .expect("creation should succeed");
    assert_eq!(finance.reference_number, "RPT-FINANCE-2024-0001");

    let hr_2025 = create_document(
        &mut persistence,
        &test_identity(),
        create_request("HR", 2025),
        test_cause(),
    )
    .expect("creation should succeed");
    assert_eq!(hr_2025.reference_number, "RPT-HR-2025-0001");
}
