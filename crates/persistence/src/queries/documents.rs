// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document record and version chain queries.

use crate::data_models::{DocumentRow, VersionRow};
use crate::diesel_schema::{document_versions, documents};
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;

/// Fetches a document row by its canonical identifier.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn document_row_by_id(
    conn: &mut SqliteConnection,
    document_id: i64,
) -> Result<Option<DocumentRow>, PersistenceError> {
    let row: Option<DocumentRow> = documents::table
        .filter(documents::document_id.eq(document_id))
        .first(conn)
        .optional()?;
    Ok(row)
}

/// Fetches a document row by reference number.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn document_row_by_reference(
    conn: &mut SqliteConnection,
    reference: &str,
) -> Result<Option<DocumentRow>, PersistenceError> {
    let row: Option<DocumentRow> = documents::table
        .filter(documents::reference_number.eq(reference))
        .first(conn)
        .optional()?;
    Ok(row)
}

/// Fetches a document's version rows in insertion order.
///
/// Insertion order is the chain order; the integrity check on
/// reconstruction verifies it also matches version-identifier order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn version_rows_for_document(
    conn: &mut SqliteConnection,
    document_id: i64,
) -> Result<Vec<VersionRow>, PersistenceError> {
    let rows: Vec<VersionRow> = document_versions::table
        .filter(document_versions::document_id.eq(document_id))
        .order(document_versions::version_id.asc())
        .load(conn)?;
    Ok(rows)
}
