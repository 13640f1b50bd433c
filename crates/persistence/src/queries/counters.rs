// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sequence counter queries.

use crate::diesel_schema::sequence_counters;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;

/// Reads the last allocated value for a scope without incrementing it.
///
/// Scopes that have never allocated read as 0. Used exclusively by
/// reference previews; the value may be stale by the time the caller acts
/// on it, which previews tolerate by contract.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn peek_counter(
    conn: &mut SqliteConnection,
    scope_key: &str,
) -> Result<i64, PersistenceError> {
    let value: Option<i64> = sequence_counters::table
        .filter(sequence_counters::scope_key.eq(scope_key))
        .select(sequence_counters::last_value)
        .first(conn)
        .optional()?;

    Ok(value.unwrap_or(0))
}
