// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Registrar document registry.
//!
//! This crate provides database persistence for sequence counters, document
//! records, version chains, and audit events. It is built on Diesel over
//! `SQLite` (the bundled library is provided via `rusqlite`).
//!
//! ## Concurrency contract
//!
//! - **Sequence counters** are incremented inside an immediate transaction,
//!   so the increment is a single atomic operation per scope as observed by
//!   callers. Two concurrent allocations against the same scope never
//!   observe the same value; exclusion is per counter row, not global.
//! - **Document updates** go through conditional updates keyed on the
//!   expected previous `current_version` (or status). A lost-update race is
//!   surfaced as a typed conflict error for the caller to retry, never
//!   silently overwritten.
//! - Writers wait on a locked database for a bounded time (busy timeout);
//!   a timeout surfaces as a retryable `Unavailable` error with no partial
//!   state committed.
//!
//! ## Testing
//!
//! Unit tests run against unique shared in-memory databases (named via an
//! atomic counter for deterministic isolation); the counter concurrency
//! test uses a file-backed database shared across threads.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::path::Path;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::error;

use registrar::{CreationResult, TransitionResult};
use registrar_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use registrar_domain::{
    AllocationScope, Department, Document, DocumentStatus, DocumentSubType, DocumentType,
    DocumentVersion, FileReference, PeriodYear, ProjectNumber, ReferenceNumber, RequesterId,
    VersionChain, VersionId,
};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
pub use error::PersistenceError;

use data_models::{DocumentRow, VersionRow};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential
/// ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the document registry.
///
/// One adapter owns one `SQLite` connection. Every mutating method commits
/// atomically: either the full state change (counter, or record plus chain
/// plus audit event) is durable, or nothing is.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests
        // are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("registrar_memdb_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Allocates the next reference number for a scope, consuming one
    /// sequence value.
    ///
    /// The increment commits atomically: either a reference number is
    /// returned and the counter is durably advanced, or the counter is
    /// unchanged. If a caller aborts after the commit but before using the
    /// returned number, the skipped value is an accepted counter gap;
    /// reference numbers are never reused and no compensating decrement is
    /// attempted.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be advanced. `Unavailable`
    /// errors are retryable.
    pub fn allocate_reference(
        &mut self,
        scope: &AllocationScope,
    ) -> Result<ReferenceNumber, PersistenceError> {
        let key = scope.key();
        let sequence: i64 = self
            .conn
            .immediate_transaction(|conn| mutations::counters::increment_counter(conn, &key))?;
        Ok(scope.format_reference(sequence))
    }

    /// Computes what the next allocation for a scope would produce, without
    /// incrementing any counter and without any persistent side effect.
    ///
    /// Non-reserving by contract: the result is best-effort and may be
    /// stale as soon as another allocation commits. Callers must not treat
    /// a previewed number as theirs.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be read.
    pub fn preview_reference(
        &mut self,
        scope: &AllocationScope,
    ) -> Result<ReferenceNumber, PersistenceError> {
        let key = scope.key();
        let last: i64 = queries::counters::peek_counter(&mut self.conn, &key)?;
        Ok(scope.format_reference(last + 1))
    }

    /// Persists a newly created document with its initial version chain and
    /// creation audit event, all in one transaction.
    ///
    /// The database enforces reference-number uniqueness.
    ///
    /// # Returns
    ///
    /// The canonical `document_id` assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateReferenceNumber` if the reference is already taken,
    /// or another error if the insert fails. Nothing is committed on any
    /// error path.
    pub fn insert_document(
        &mut self,
        creation: &CreationResult,
    ) -> Result<i64, PersistenceError> {
        let document = &creation.document;

        if document.document_id.is_some() {
            return Err(PersistenceError::ReconstructionError(
                "New document should not have document_id".to_string(),
            ));
        }

        let created_at = format_timestamp(document.created_at)?;
        let recorded_at = format_timestamp(OffsetDateTime::now_utc())?;

        let version_rows: Vec<(DocumentVersion, String)> = document
            .chain
            .versions()
            .iter()
            .map(|version| {
                format_timestamp(version.uploaded_at).map(|at| (version.clone(), at))
            })
            .collect::<Result<_, _>>()?;

        let audit_event = &creation.audit_event;

        self.conn.immediate_transaction(|conn| {
            let document_id = mutations::documents::insert_document_row(conn, document, &created_at)?;
            for (version, uploaded_at) in &version_rows {
                mutations::documents::insert_version_row(conn, document_id, version, uploaded_at)?;
            }
            mutations::audit::insert_audit_event(conn, audit_event, &recorded_at)?;
            Ok(document_id)
        })
    }

    /// Loads a document aggregate by its canonical identifier.
    ///
    /// The full version chain is reconstructed and checked against the
    /// structural invariants; corrupted state surfaces as `DataIntegrity`.
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if no such row exists, or `DataIntegrity`
    /// if the stored state is corrupt.
    pub fn load_document(&mut self, document_id: i64) -> Result<Document, PersistenceError> {
        let row = queries::documents::document_row_by_id(&mut self.conn, document_id)?
            .ok_or_else(|| {
                PersistenceError::DocumentNotFound(format!("document id {document_id}"))
            })?;
        let versions =
            queries::documents::version_rows_for_document(&mut self.conn, row.document_id)?;
        reconstruct_document(row, versions)
    }

    /// Loads a document aggregate by reference number.
    ///
    /// # Errors
    ///
    /// Returns `DocumentNotFound` if no such row exists, or `DataIntegrity`
    /// if the stored state is corrupt.
    pub fn load_document_by_reference(
        &mut self,
        reference: &str,
    ) -> Result<Document, PersistenceError> {
        let row = queries::documents::document_row_by_reference(&mut self.conn, reference)?
            .ok_or_else(|| PersistenceError::DocumentNotFound(reference.to_string()))?;
        let versions =
            queries::documents::version_rows_for_document(&mut self.conn, row.document_id)?;
        reconstruct_document(row, versions)
    }

    /// Persists a version-append transition: the `current_version` pointer,
    /// the chain update, and the audit event commit together or not at all.
    ///
    /// The pointer update is conditional on `expected_version` (the version
    /// the transition was computed from) and on active status. If another
    /// writer advanced the document first, nothing is written and a
    /// `VersionConflict` is returned; the caller may reload and retry.
    ///
    /// # Errors
    ///
    /// Returns `VersionConflict` on a lost-update race, `DocumentNotFound`
    /// if the document vanished or was deleted, `StatusConflict` if it was
    /// archived, or another error if a write fails.
    pub fn persist_version_transition(
        &mut self,
        expected_version: VersionId,
        transition: &TransitionResult,
    ) -> Result<(), PersistenceError> {
        let document = &transition.new_document;
        let document_id = document.document_id.ok_or_else(|| {
            PersistenceError::ReconstructionError(
                "Document must be persisted before version transitions".to_string(),
            )
        })?;
        let appended = document.chain.latest().cloned().ok_or_else(|| {
            PersistenceError::ReconstructionError(
                "Transition produced an empty version chain".to_string(),
            )
        })?;

        let expected = expected_version.to_string();
        let new_version = document.current_version.to_string();
        let uploaded_at = format_timestamp(appended.uploaded_at)?;
        let recorded_at = format_timestamp(OffsetDateTime::now_utc())?;
        let audit_event = &transition.audit_event;

        self.conn.immediate_transaction(|conn| {
            let updated = mutations::documents::conditional_update_current_version(
                conn,
                document_id,
                &expected,
                &new_version,
            )?;
            if updated == 0 {
                return Err(classify_version_update_failure(conn, document_id, &expected));
            }

            mutations::documents::deactivate_versions(conn, document_id)?;
            mutations::documents::insert_version_row(conn, document_id, &appended, &uploaded_at)?;
            mutations::audit::insert_audit_event(conn, audit_event, &recorded_at)?;
            Ok(())
        })
    }

    /// Persists a lifecycle status transition together with its audit
    /// event.
    ///
    /// The update is conditional on `expected_status`; a racing lifecycle
    /// change surfaces as `StatusConflict` (or `DocumentNotFound` once the
    /// document is deleted).
    ///
    /// # Errors
    ///
    /// Returns `StatusConflict`, `DocumentNotFound`, or another error if a
    /// write fails.
    pub fn persist_status_transition(
        &mut self,
        expected_status: DocumentStatus,
        transition: &TransitionResult,
    ) -> Result<(), PersistenceError> {
        let document = &transition.new_document;
        let document_id = document.document_id.ok_or_else(|| {
            PersistenceError::ReconstructionError(
                "Document must be persisted before status transitions".to_string(),
            )
        })?;

        let recorded_at = format_timestamp(OffsetDateTime::now_utc())?;
        let audit_event = &transition.audit_event;
        let new_status = document.status;

        self.conn.immediate_transaction(|conn| {
            let updated = mutations::documents::conditional_update_status(
                conn,
                document_id,
                expected_status.as_str(),
                new_status.as_str(),
            )?;
            if updated == 0 {
                return Err(classify_status_update_failure(
                    conn,
                    document_id,
                    expected_status.as_str(),
                ));
            }

            mutations::audit::insert_audit_event(conn, audit_event, &recorded_at)?;
            Ok(())
        })
    }

    /// Fetches every audit event recorded for a reference number, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or deserialization fails.
    pub fn audit_events_for_reference(
        &mut self,
        reference: &str,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        let rows = queries::audit::audit_event_rows_for_reference(&mut self.conn, reference)?;

        rows.into_iter()
            .map(|row| {
                let (
                    _event_id,
                    reference_number,
                    actor_json,
                    cause_json,
                    action_json,
                    before_json,
                    after_json,
                    _created_at,
                ) = row;

                let actor: ActorData = serde_json::from_str(&actor_json)?;
                let cause: CauseData = serde_json::from_str(&cause_json)?;
                let action: ActionData = serde_json::from_str(&action_json)?;
                let before: StateSnapshotData = serde_json::from_str(&before_json)?;
                let after: StateSnapshotData = serde_json::from_str(&after_json)?;

                Ok(AuditEvent::new(
                    Actor::new(actor.id, actor.actor_type),
                    Cause::new(cause.id, cause.description),
                    Action::new(action.name, action.details),
                    StateSnapshot::new(before.data),
                    StateSnapshot::new(after.data),
                    ReferenceNumber::new(reference_number),
                ))
            })
            .collect()
    }
}

/// Determines why a conditional `current_version` update matched no rows.
fn classify_version_update_failure(
    conn: &mut SqliteConnection,
    document_id: i64,
    expected: &str,
) -> PersistenceError {
    match queries::documents::document_row_by_id(conn, document_id) {
        Ok(Some(row)) => {
            if row.status == DocumentStatus::Deleted.as_str() {
                PersistenceError::DocumentNotFound(row.reference_number)
            } else if row.current_version == expected {
                // Pointer still matches, so the active-status filter failed.
                PersistenceError::StatusConflict {
                    reference: row.reference_number,
                    expected: DocumentStatus::Active.as_str().to_string(),
                }
            } else {
                PersistenceError::VersionConflict {
                    reference: row.reference_number,
                    expected: expected.to_string(),
                }
            }
        }
        Ok(None) => PersistenceError::DocumentNotFound(format!("document id {document_id}")),
        Err(err) => err,
    }
}

/// Determines why a conditional status update matched no rows.
fn classify_status_update_failure(
    conn: &mut SqliteConnection,
    document_id: i64,
    expected: &str,
) -> PersistenceError {
    match queries::documents::document_row_by_id(conn, document_id) {
        Ok(Some(row)) => {
            if row.status == DocumentStatus::Deleted.as_str() {
                PersistenceError::DocumentNotFound(row.reference_number)
            } else {
                PersistenceError::StatusConflict {
                    reference: row.reference_number,
                    expected: expected.to_string(),
                }
            }
        }
        Ok(None) => PersistenceError::DocumentNotFound(format!("document id {document_id}")),
        Err(err) => err,
    }
}

/// Formats a timestamp for storage (RFC 3339).
fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Rebuilds the document aggregate from its stored rows.
///
/// Every parse failure here means the stored state is corrupt; the failure
/// is logged and surfaced as `DataIntegrity`, never repaired in place. In
/// particular a malformed `current_version` (e.g. a missing minor
/// component) is rejected rather than defaulted.
fn reconstruct_document(
    row: DocumentRow,
    version_rows: Vec<VersionRow>,
) -> Result<Document, PersistenceError> {
    let reference = row.reference_number.clone();

    let integrity = |reason: String| {
        error!(
            reference = reference.as_str(),
            reason = reason.as_str(),
            "Persisted document state is corrupt"
        );
        PersistenceError::DataIntegrity {
            reference: reference.clone(),
            reason,
        }
    };

    let document_type = DocumentType::parse(&row.document_type)
        .map_err(|e| integrity(e.to_string()))?;
    let sub_type =
        DocumentSubType::parse(&row.sub_type).map_err(|e| integrity(e.to_string()))?;
    let department = Department::new(&row.department).map_err(|e| integrity(e.to_string()))?;
    let project_number = row
        .project_number
        .as_deref()
        .map(ProjectNumber::new)
        .transpose()
        .map_err(|e| integrity(e.to_string()))?;
    let period_year = u16::try_from(row.period_year)
        .map_err(|_| integrity(format!("period year {} out of range", row.period_year)))?;
    let period = PeriodYear::new(period_year).map_err(|e| integrity(e.to_string()))?;
    let author = RequesterId::new(&row.author).map_err(|e| integrity(e.to_string()))?;
    let status =
        DocumentStatus::from_str(&row.status).map_err(|e| integrity(e.to_string()))?;
    let current_version =
        VersionId::from_str(&row.current_version).map_err(|e| integrity(e.to_string()))?;
    let created_at = OffsetDateTime::parse(&row.created_at, &Rfc3339)
        .map_err(|e| integrity(format!("unparseable created_at: {e}")))?;

    let versions: Vec<DocumentVersion> = version_rows
        .into_iter()
        .map(|version_row| {
            let major = u32::try_from(version_row.major)
                .map_err(|_| integrity(format!("major {} out of range", version_row.major)))?;
            let minor = u32::try_from(version_row.minor)
                .map_err(|_| integrity(format!("minor {} out of range", version_row.minor)))?;
            let file_reference = FileReference::new(&version_row.file_reference)
                .map_err(|e| integrity(e.to_string()))?;
            let uploaded_by = RequesterId::new(&version_row.uploaded_by)
                .map_err(|e| integrity(e.to_string()))?;
            let uploaded_at = OffsetDateTime::parse(&version_row.uploaded_at, &Rfc3339)
                .map_err(|e| integrity(format!("unparseable uploaded_at: {e}")))?;

            Ok(DocumentVersion {
                version: VersionId::new(major, minor),
                file_reference,
                uploaded_by,
                uploaded_at,
                change_notes: version_row.change_notes,
                is_active: version_row.is_active != 0,
            })
        })
        .collect::<Result<_, PersistenceError>>()?;

    let chain = VersionChain::from_versions(versions);
    chain
        .validate(current_version)
        .map_err(|e| integrity(e.to_string()))?;

    Ok(Document::with_id(
        row.document_id,
        ReferenceNumber::new(row.reference_number),
        document_type,
        sub_type,
        department,
        project_number,
        period,
        row.title,
        author,
        status,
        current_version,
        chain,
        created_at,
    ))
}
