// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for document insertion and aggregate reconstruction.

use super::helpers::{
    create_and_insert, creation_for_reference, general_scope, test_persistence,
};
use crate::PersistenceError;
use registrar_domain::{DocumentStatus, DocumentSubType, DocumentType, VersionId};

#[test]
fn test_insert_and_load_round_trip() {
    let mut persistence = test_persistence();
    let (document_id, reference) = create_and_insert(&mut persistence);

    let document = persistence
        .load_document(document_id)
        .expect("load should succeed");

    assert_eq!(document.document_id, Some(document_id));
    assert_eq!(document.reference, reference);
    assert_eq!(document.document_type, DocumentType::Report);
    assert_eq!(document.sub_type, DocumentSubType::General);
    assert_eq!(document.department.value(), "HR");
    assert_eq!(document.project_number, None);
    assert_eq!(document.period.year(), 2024);
    assert_eq!(document.title, "Quarterly staffing report");
    assert_eq!(document.author.value(), "u-1");
    assert_eq!(document.status, DocumentStatus::Active);
    assert_eq!(document.current_version, VersionId::initial());
    assert_eq!(document.chain.len(), 1);
    assert!(document.validate_chain().is_ok());

    let active = document.chain.active().expect("one active version");
    assert_eq!(active.file_reference.value(), "blob/initial");
    assert_eq!(active.uploaded_by.value(), "u-1");
}

#[test]
fn test_load_by_reference() {
    let mut persistence = test_persistence();
    let (document_id, reference) = create_and_insert(&mut persistence);

    let document = persistence
        .load_document_by_reference(reference.value())
        .expect("load should succeed");

    assert_eq!(document.document_id, Some(document_id));
}

#[test]
fn test_load_missing_document_is_not_found() {
    let mut persistence = test_persistence();

    let result = persistence.load_document(999);
    assert!(matches!(result, Err(PersistenceError::DocumentNotFound(_))));

    let result = persistence.load_document_by_reference("RPT-HR-2024-0001");
    assert!(matches!(result, Err(PersistenceError::DocumentNotFound(_))));
}

#[test]
fn test_duplicate_reference_number_is_rejected() {
    let mut persistence = test_persistence();
    let (_, reference) = create_and_insert(&mut persistence);

    // A second record under the same reference violates the uniqueness
    // constraint regardless of how the reference was obtained.
    let duplicate = creation_for_reference(reference.clone());
    let result = persistence.insert_document(&duplicate);

    assert_eq!(
        result,
        Err(PersistenceError::DuplicateReferenceNumber(
            reference.value().to_string()
        ))
    );
}

#[test]
fn test_insert_rejects_already_persisted_document() {
    let mut persistence = test_persistence();
    let scope = general_scope("HR", 2024);
    let reference = persistence.allocate_reference(&scope).unwrap();

    let mut creation = creation_for_reference(reference);
    creation.document.document_id = Some(42);

    let result = persistence.insert_document(&creation);
    assert!(matches!(
        result,
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_failed_insert_commits_nothing() {
    let mut persistence = test_persistence();
    let (_, reference) = create_and_insert(&mut persistence);

    let duplicate = creation_for_reference(reference.clone());
    let _ = persistence.insert_document(&duplicate);

    // The original record is intact and its audit trail holds exactly the
    // one creation event.
    let document = persistence
        .load_document_by_reference(reference.value())
        .expect("load should succeed");
    assert_eq!(document.chain.len(), 1);

    let events = persistence
        .audit_events_for_reference(reference.value())
        .expect("audit query should succeed");
    assert_eq!(events.len(), 1);
}
