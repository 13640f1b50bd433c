// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for document creation and version-append transitions.

use super::helpers::{create_test_actor, create_test_cause, create_test_document, test_timestamp};
use crate::{Command, CoreError, TransitionResult, apply};
use registrar_domain::{Document, FileReference, RequesterId, VersionChain, VersionId};

fn append_command(file_reference: &str, notes: Option<&str>) -> Command {
    Command::AppendVersion {
        file_reference: FileReference::new(file_reference).unwrap(),
        uploaded_by: RequesterId::new("u-2").unwrap(),
        uploaded_at: test_timestamp(),
        change_notes: notes.map(ToString::to_string),
    }
}

#[test]
fn test_created_document_starts_at_version_one_zero() {
    let document = create_test_document("RPT-HR-2024-0001");

    assert_eq!(document.current_version, VersionId::initial());
    assert_eq!(document.chain.len(), 1);
    assert!(document.validate_chain().is_ok());

    let active = document.chain.active().expect("one active version");
    assert!(active.is_active);
    assert_eq!(active.version, VersionId::initial());
}

#[test]
fn test_append_advances_minor_only() {
    let document = create_test_document("RPT-HR-2024-0001");

    let TransitionResult { new_document, .. } = apply(
        &document,
        append_command("blob/v2", Some("fixed typo")),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("append should succeed");

    assert_eq!(new_document.current_version, VersionId::new(1, 1));
    assert_eq!(new_document.chain.len(), 2);
    assert!(new_document.validate_chain().is_ok());

    // The previous version is retained but no longer active.
    assert!(!new_document.chain.versions()[0].is_active);
    let active = new_document.chain.active().expect("one active version");
    assert_eq!(active.version, VersionId::new(1, 1));
    assert_eq!(active.change_notes.as_deref(), Some("fixed typo"));
}

#[test]
fn test_repeated_appends_are_strictly_increasing() {
    let mut document = create_test_document("RPT-HR-2024-0001");

    for expected_minor in 1..=5 {
        let result = apply(
            &document,
            append_command(&format!("blob/v{expected_minor}"), None),
            create_test_actor(),
            create_test_cause(),
        )
        .expect("append should succeed");

        document = result.new_document;
        assert_eq!(document.current_version, VersionId::new(1, expected_minor));
        assert!(document.validate_chain().is_ok());
    }

    assert_eq!(document.chain.len(), 6);
}

#[test]
fn test_append_does_not_mutate_input_document() {
    let document = create_test_document("RPT-HR-2024-0001");
    let before = document.clone();

    let _ = apply(
        &document,
        append_command("blob/v2", None),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("append should succeed");

    assert_eq!(document, before);
}

#[test]
fn test_append_rejects_corrupt_chain() {
    let mut document: Document = create_test_document("RPT-HR-2024-0001");

    // Corrupt the chain: deactivate every entry.
    let mut versions = document.chain.versions().to_vec();
    for version in &mut versions {
        version.is_active = false;
    }
    document.chain = VersionChain::from_versions(versions);

    let result = apply(
        &document,
        append_command("blob/v2", None),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::ChainIntegrity { .. })));
}

#[test]
fn test_append_rejects_pointer_chain_mismatch() {
    let mut document: Document = create_test_document("RPT-HR-2024-0001");
    document.current_version = VersionId::new(1, 3);

    let result = apply(
        &document,
        append_command("blob/v2", None),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::ChainIntegrity { .. })));
}

#[test]
fn test_append_audit_event_captures_versions() {
    let document = create_test_document("RPT-HR-2024-0001");

    let TransitionResult { audit_event, .. } = apply(
        &document,
        append_command("blob/v2", None),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("append should succeed");

    assert_eq!(audit_event.action.name, "AppendVersion");
    assert_eq!(audit_event.reference.value(), "RPT-HR-2024-0001");
    assert!(audit_event.before.data.contains("current_version=1.0"));
    assert!(audit_event.after.data.contains("current_version=1.1"));
}

#[test]
fn test_creation_audit_event_records_initial_version() {
    let document = create_test_document("RPT-HR-2024-0001");
    assert_eq!(document.reference.value(), "RPT-HR-2024-0001");

    let result = crate::create_document(
        super::helpers::test_new_document("RPT-HR-2024-0002"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("creation should succeed");

    assert_eq!(result.audit_event.action.name, "CreateDocument");
    assert_eq!(result.audit_event.before.data, "exists=false");
    assert!(result.audit_event.after.data.contains("current_version=1.0"));
}

#[test]
fn test_creation_rejects_empty_title() {
    let mut new = super::helpers::test_new_document("RPT-HR-2024-0003");
    new.title = String::from("  ");

    let result = crate::create_document(new, create_test_actor(), create_test_cause());
    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}
