// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use registrar_domain::{FileReference, RequesterId};
use time::OffsetDateTime;

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes on an existing
/// document. Document creation has its own entry point because it allocates
/// a reference number before any document exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a new version to the document's chain.
    ///
    /// Not idempotent: each application strictly advances the chain.
    /// Callers must issue exactly one command per stored file artifact.
    AppendVersion {
        /// The storage key of the durably stored file artifact.
        file_reference: FileReference,
        /// Who is uploading this version.
        uploaded_by: RequesterId,
        /// When the upload happened (UTC).
        uploaded_at: OffsetDateTime,
        /// Optional notes describing the change.
        change_notes: Option<String>,
    },
    /// Archive the document. It is retained but closed to new versions.
    Archive,
    /// Soft-delete the document. Terminal.
    Delete,
}
