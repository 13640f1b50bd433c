// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::identity::IdentityContext;
use crate::request_response::{AllocationParams, CreateDocumentRequest, CreateDocumentResponse};
use registrar_audit::Cause;
use registrar_persistence::Persistence;

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub fn test_identity() -> IdentityContext {
    IdentityContext::user("u-1")
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("User request"))
}

pub fn general_params(department: &str, year: u16) -> AllocationParams {
    AllocationParams {
        document_type: String::from("report"),
        sub_type: String::from("general"),
        department: department.to_string(),
        project_number: None,
        year,
    }
}

pub fn create_request(department: &str, year: u16) -> CreateDocumentRequest {
    CreateDocumentRequest {
        allocation: general_params(department, year),
        title: String::from("Quarterly staffing report"),
        file_reference: String::from("blob/initial"),
        change_notes: None,
    }
}

pub fn create_test_document(persistence: &mut Persistence) -> CreateDocumentResponse {
    crate::handlers::create_document(
        persistence,
        &test_identity(),
        create_request("HR", 2024),
        test_cause(),
    )
    .expect("document creation should succeed")
}
