// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use registrar::{
    AllocationRequest, Command, CreationResult, NewDocument, TransitionResult, apply,
    create_document, plan_allocation,
};
use registrar_audit::{Actor, Cause};
use registrar_domain::{
    AllocationScope, Department, Document, DocumentSubType, DocumentType, FileReference,
    PeriodYear, ReferenceNumber, RequesterId,
};
use time::OffsetDateTime;

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub fn test_actor() -> Actor {
    Actor::new(String::from("clerk-123"), String::from("user"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("User request"))
}

pub fn test_timestamp() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

/// Derives a general Report scope for the given department and year.
pub fn general_scope(department: &str, year: u16) -> AllocationScope {
    plan_allocation(AllocationRequest {
        document_type: DocumentType::Report,
        sub_type: DocumentSubType::General,
        department: Department::new(department).unwrap(),
        project_number: None,
        period: PeriodYear::new(year).unwrap(),
    })
    .expect("valid allocation request")
}

/// Builds a creation result around an already-allocated reference.
pub fn creation_for_reference(reference: ReferenceNumber) -> CreationResult {
    create_document(
        NewDocument {
            reference,
            document_type: DocumentType::Report,
            sub_type: DocumentSubType::General,
            department: Department::new("HR").unwrap(),
            project_number: None,
            period: PeriodYear::new(2024).unwrap(),
            title: String::from("Quarterly staffing report"),
            author: RequesterId::new("u-1").unwrap(),
            file_reference: FileReference::new("blob/initial").unwrap(),
            change_notes: None,
            created_at: test_timestamp(),
        },
        test_actor(),
        test_cause(),
    )
    .expect("document creation should succeed")
}

/// Allocates a reference, creates a document around it, and persists it.
///
/// Returns the assigned `document_id` and the reference.
pub fn create_and_insert(persistence: &mut Persistence) -> (i64, ReferenceNumber) {
    let scope = general_scope("HR", 2024);
    let reference = persistence
        .allocate_reference(&scope)
        .expect("allocation should succeed");
    let creation = creation_for_reference(reference.clone());
    let document_id = persistence
        .insert_document(&creation)
        .expect("insert should succeed");
    (document_id, reference)
}

/// Applies an append command to an in-memory document state.
pub fn append_transition(
    document: &Document,
    file_reference: &str,
    change_notes: Option<&str>,
) -> TransitionResult {
    apply(
        document,
        Command::AppendVersion {
            file_reference: FileReference::new(file_reference).unwrap(),
            uploaded_by: RequesterId::new("u-2").unwrap(),
            uploaded_at: test_timestamp(),
            change_notes: change_notes.map(ToString::to_string),
        },
        test_actor(),
        test_cause(),
    )
    .expect("append should succeed")
}

/// Applies a status command to an in-memory document state.
pub fn status_transition(document: &Document, command: Command) -> TransitionResult {
    apply(document, command, test_actor(), test_cause()).expect("transition should succeed")
}
