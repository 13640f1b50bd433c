// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document record and version chain mutations.
//!
//! Version rows are append-only: the only update ever issued against an
//! existing row clears its `is_active` flag when a newer version arrives.
//! Document rows are updated exclusively through conditional updates so
//! that concurrent writers are detected, never overwritten.

use crate::data_models::NewVersionRow;
use crate::diesel_schema::{document_versions, documents};
use crate::error::PersistenceError;
use crate::sqlite;
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use registrar_domain::{Document, DocumentStatus, DocumentVersion};
use tracing::debug;

/// Inserts a new document row.
///
/// The database enforces reference-number uniqueness; a violation is
/// reported as `DuplicateReferenceNumber`.
///
/// # Errors
///
/// Returns an error if the reference number is already taken or the insert
/// fails.
pub fn insert_document_row(
    conn: &mut SqliteConnection,
    document: &Document,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let result = diesel::insert_into(documents::table)
        .values((
            documents::reference_number.eq(document.reference.value()),
            documents::document_type.eq(document.document_type.as_str()),
            documents::sub_type.eq(document.sub_type.as_str()),
            documents::department.eq(document.department.value()),
            documents::project_number.eq(document.project_number.as_ref().map(|p| p.value())),
            documents::period_year.eq(i32::from(document.period.year())),
            documents::title.eq(&document.title),
            documents::author.eq(document.author.value()),
            documents::status.eq(document.status.as_str()),
            documents::current_version.eq(document.current_version.to_string()),
            documents::created_at.eq(created_at),
        ))
        .execute(conn);

    match result {
        Ok(_) => {}
        Err(diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            return Err(PersistenceError::DuplicateReferenceNumber(
                document.reference.value().to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    }

    let document_id: i64 = sqlite::get_last_insert_rowid(conn)?;

    debug!(
        document_id,
        reference = document.reference.value(),
        "Inserted document"
    );

    Ok(document_id)
}

/// Appends one version row for a document.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_version_row(
    conn: &mut SqliteConnection,
    document_id: i64,
    version: &DocumentVersion,
    uploaded_at: &str,
) -> Result<(), PersistenceError> {
    let record = NewVersionRow {
        document_id,
        major: i64::from(version.version.major()),
        minor: i64::from(version.version.minor()),
        file_reference: version.file_reference.value().to_string(),
        uploaded_by: version.uploaded_by.value().to_string(),
        uploaded_at: uploaded_at.to_string(),
        change_notes: version.change_notes.clone(),
        is_active: i32::from(version.is_active),
    };

    diesel::insert_into(document_versions::table)
        .values(&record)
        .execute(conn)?;

    debug!(
        document_id,
        version = %version.version,
        "Inserted document version"
    );

    Ok(())
}

/// Clears the `is_active` flag on every version row of a document.
///
/// Called immediately before the new active version row is inserted, inside
/// the same transaction, so the single-active invariant holds in every
/// committed state.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn deactivate_versions(
    conn: &mut SqliteConnection,
    document_id: i64,
) -> Result<(), PersistenceError> {
    diesel::update(
        document_versions::table.filter(document_versions::document_id.eq(document_id)),
    )
    .set(document_versions::is_active.eq(0))
    .execute(conn)?;
    Ok(())
}

/// Conditionally advances a document's `current_version` pointer.
///
/// The update is keyed on the expected previous version and on active
/// status, converting a read-modify-write race into a detectable conflict:
/// if another writer advanced (or archived, or deleted) the document first,
/// zero rows match and nothing is written.
///
/// # Returns
///
/// The number of rows updated (0 or 1). Callers interpret 0 by inspecting
/// the document's present state.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn conditional_update_current_version(
    conn: &mut SqliteConnection,
    document_id: i64,
    expected_version: &str,
    new_version: &str,
) -> Result<usize, PersistenceError> {
    let updated = diesel::update(
        documents::table
            .filter(documents::document_id.eq(document_id))
            .filter(documents::current_version.eq(expected_version))
            .filter(documents::status.eq(DocumentStatus::Active.as_str())),
    )
    .set(documents::current_version.eq(new_version))
    .execute(conn)?;

    debug!(
        document_id,
        expected_version, new_version, updated, "Conditional current_version update"
    );

    Ok(updated)
}

/// Conditionally transitions a document's status.
///
/// Keyed on the expected previous status so that racing lifecycle changes
/// are detected rather than overwritten.
///
/// # Returns
///
/// The number of rows updated (0 or 1).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn conditional_update_status(
    conn: &mut SqliteConnection,
    document_id: i64,
    expected_status: &str,
    new_status: &str,
) -> Result<usize, PersistenceError> {
    let updated = diesel::update(
        documents::table
            .filter(documents::document_id.eq(document_id))
            .filter(documents::status.eq(expected_status)),
    )
    .set(documents::status.eq(new_status))
    .execute(conn)?;

    debug!(
        document_id,
        expected_status, new_status, updated, "Conditional status update"
    );

    Ok(updated)
}
