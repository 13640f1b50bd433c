// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{DocumentSubType, DocumentType};

/// Maximum permitted title length in characters.
const MAX_TITLE_LENGTH: usize = 200;

/// Maximum permitted change-notes length in characters.
const MAX_CHANGE_NOTES_LENGTH: usize = 2000;

/// Validates that a document type permits a subtype.
///
/// # Errors
///
/// Returns `DomainError::IncompatibleSubType` if the combination is not
/// permitted by the classification matrix.
pub fn validate_classification(
    document_type: DocumentType,
    sub_type: DocumentSubType,
) -> Result<(), DomainError> {
    if !document_type.allows_sub_type(sub_type) {
        return Err(DomainError::IncompatibleSubType {
            document_type: document_type.as_str().to_string(),
            sub_type: sub_type.as_str().to_string(),
        });
    }
    Ok(())
}

/// Validates a document title.
///
/// # Errors
///
/// Returns `DomainError::InvalidTitle` if the title is empty or longer than
/// 200 characters.
pub fn validate_title(title: &str) -> Result<(), DomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidTitle(
            "title must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(DomainError::InvalidTitle(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validates optional change notes attached to a version upload.
///
/// # Errors
///
/// Returns `DomainError::InvalidChangeNotes` if the notes exceed 2000
/// characters.
pub fn validate_change_notes(change_notes: Option<&str>) -> Result<(), DomainError> {
    if let Some(notes) = change_notes {
        if notes.chars().count() > MAX_CHANGE_NOTES_LENGTH {
            return Err(DomainError::InvalidChangeNotes(format!(
                "change notes must be at most {MAX_CHANGE_NOTES_LENGTH} characters"
            )));
        }
    }
    Ok(())
}
