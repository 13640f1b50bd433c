// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;

/// Fetches every audit event recorded for a reference number, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn audit_event_rows_for_reference(
    conn: &mut SqliteConnection,
    reference: &str,
) -> Result<Vec<AuditEventRow>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::reference_number.eq(reference))
        .order(audit_events::event_id.asc())
        .load(conn)?;
    Ok(rows)
}
