// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sequence counter mutations.
//!
//! The counter increment is the single point of cross-request mutual
//! exclusion in the registry, and the exclusion is scoped to one counter
//! row, not global. Counters are created lazily, never deleted, and never
//! decremented.

use crate::diesel_schema::sequence_counters;
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

/// Draws the next sequence value for a scope.
///
/// Must run inside an immediate transaction so the update-then-read pair is
/// atomic with respect to other writers: `SQLite` holds the write lock from
/// the first statement, so no two callers can observe the same
/// post-increment value.
///
/// The first allocation for a scope creates its counter row with value 1.
///
/// # Errors
///
/// Returns an error if the database operation fails. On error the enclosing
/// transaction rolls back and the counter is unchanged.
pub fn increment_counter(
    conn: &mut SqliteConnection,
    scope_key: &str,
) -> Result<i64, PersistenceError> {
    let updated = diesel::update(
        sequence_counters::table.filter(sequence_counters::scope_key.eq(scope_key)),
    )
    .set(sequence_counters::last_value.eq(sequence_counters::last_value + 1_i64))
    .execute(conn)?;

    if updated == 0 {
        // First allocation for this scope.
        diesel::insert_into(sequence_counters::table)
            .values((
                sequence_counters::scope_key.eq(scope_key),
                sequence_counters::last_value.eq(1_i64),
            ))
            .execute(conn)?;

        debug!(scope_key, "Created sequence counter");
        return Ok(1);
    }

    let value: i64 = sequence_counters::table
        .filter(sequence_counters::scope_key.eq(scope_key))
        .select(sequence_counters::last_value)
        .first(conn)?;

    debug!(scope_key, value, "Incremented sequence counter");
    Ok(value)
}
