// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event mutations.
//!
//! Audit events are written in the same transaction as the state change
//! they record, so a committed change always has its event and a rolled
//! back change never does.

use crate::data_models::{ActionData, ActorData, CauseData, NewAuditEventRow, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use registrar_audit::AuditEvent;
use tracing::debug;

/// Inserts one audit event.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    created_at: &str,
) -> Result<(), PersistenceError> {
    let actor_json = serde_json::to_string(&ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    })?;
    let cause_json = serde_json::to_string(&CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    })?;
    let action_json = serde_json::to_string(&ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    })?;
    let before_snapshot_json = serde_json::to_string(&StateSnapshotData {
        data: event.before.data.clone(),
    })?;
    let after_snapshot_json = serde_json::to_string(&StateSnapshotData {
        data: event.after.data.clone(),
    })?;

    let record = NewAuditEventRow {
        reference_number: event.reference.value().to_string(),
        actor_json,
        cause_json,
        action_json,
        before_snapshot_json,
        after_snapshot_json,
        created_at: created_at.to_string(),
    };

    diesel::insert_into(audit_events::table)
        .values(&record)
        .execute(conn)?;

    debug!(
        reference = event.reference.value(),
        action = event.action.name.as_str(),
        "Inserted audit event"
    );

    Ok(())
}
