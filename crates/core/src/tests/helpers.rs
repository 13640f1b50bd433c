// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{NewDocument, create_document};
use registrar_audit::{Actor, Cause};
use registrar_domain::{
    Department, Document, DocumentSubType, DocumentType, FileReference, PeriodYear,
    ReferenceNumber, RequesterId,
};
use time::OffsetDateTime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("clerk-123"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("User request"))
}

pub fn test_timestamp() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
}

pub fn test_new_document(reference: &str) -> NewDocument {
    NewDocument {
        reference: ReferenceNumber::new(reference.to_string()),
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
    }
}

pub fn create_test_document(reference: &str) -> Document {
    create_document(
        test_new_document(reference),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("document creation should succeed")
    .document
}
