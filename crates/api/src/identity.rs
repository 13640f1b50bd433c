// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The resolved identity of a caller.
//!
//! Authentication and authorization happen upstream; by the time a request
//! reaches this crate the caller has already been resolved to a requester
//! identifier. The identity context exists to attribute state changes, not
//! to gate them.

use crate::error::{ApiError, translate_domain_error};
use registrar_audit::Actor;
use registrar_domain::RequesterId;

/// The authenticated caller on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    /// The requester's unique identifier.
    pub requester_id: String,
    /// The kind of principal (e.g., "user", "system").
    pub actor_type: String,
}

impl IdentityContext {
    /// Creates an identity context for a human requester.
    #[must_use]
    pub fn user(requester_id: &str) -> Self {
        Self {
            requester_id: requester_id.to_string(),
            actor_type: String::from("user"),
        }
    }

    /// Creates an identity context for an automated principal.
    #[must_use]
    pub fn system(requester_id: &str) -> Self {
        Self {
            requester_id: requester_id.to_string(),
            actor_type: String::from("system"),
        }
    }

    /// Returns the audit actor for this identity.
    #[must_use]
    pub fn to_actor(&self) -> Actor {
        Actor::new(self.requester_id.clone(), self.actor_type.clone())
    }

    /// Returns the domain requester identifier for this identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the requester identifier is empty.
    pub fn requester(&self) -> Result<RequesterId, ApiError> {
        RequesterId::new(&self.requester_id).map_err(translate_domain_error)
    }
}
