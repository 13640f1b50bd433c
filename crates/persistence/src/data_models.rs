// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{audit_events, document_versions};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Queryable row for the `documents` table.
///
/// Field order matches the `diesel_schema` column order.
#[derive(Debug, Clone, Queryable)]
pub struct DocumentRow {
    pub document_id: i64,
    pub reference_number: String,
    pub document_type: String,
    pub sub_type: String,
    pub department: String,
    pub project_number: Option<String>,
    pub period_year: i32,
    pub title: String,
    pub author: String,
    pub status: String,
    pub current_version: String,
    pub created_at: String,
}

/// Queryable row for the `document_versions` table.
#[derive(Debug, Clone, Queryable)]
pub struct VersionRow {
    pub version_id: i64,
    pub document_id: i64,
    pub major: i64,
    pub minor: i64,
    pub file_reference: String,
    pub uploaded_by: String,
    pub uploaded_at: String,
    pub change_notes: Option<String>,
    pub is_active: i32,
}

/// Insertable row for the `document_versions` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = document_versions)]
pub struct NewVersionRow {
    pub document_id: i64,
    pub major: i64,
    pub minor: i64,
    pub file_reference: String,
    pub uploaded_by: String,
    pub uploaded_at: String,
    pub change_notes: Option<String>,
    pub is_active: i32,
}

/// Insertable row for the `audit_events` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEventRow {
    pub reference_number: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

/// Type alias for audit event row data from `SQLite`.
pub type AuditEventRow = (i64, String, String, String, String, String, String, String);
