//! Caller identity and the capability check.
//!
//! The upstream authenticator puts the caller's user id in the
//! `x-user-id` header. A missing, malformed or unknown id is
//! `401 Unauthenticated`; a known user without the needed role is
//! `403 Forbidden`.

use axum::{extract::FromRequestParts, http::request::Parts};
use organmatch_store::{Directory, Store};
use organmatch_types::{OrganmatchError, Role, User, UserId, constants};

use crate::{error::ApiError, state::AppState};

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct Caller(pub User);

impl Caller {
    #[must_use]
    pub fn user(&self) -> &User {
        &self.0
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.0.id
    }

    /// Admin-only gate.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        self.require_role(Role::Admin)
    }

    /// Single-role gate.
    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.0.role == role {
            return Ok(());
        }
        tracing::debug!(
            user = %self.0.id,
            role = %self.0.role,
            required = %role,
            "Capability check failed"
        );
        Err(OrganmatchError::forbidden(format!("{role} role required")).into())
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let raw = parts
            .headers
            .get(constants::USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(OrganmatchError::Unauthenticated)?;
        let id: UserId = raw
            .trim()
            .parse()
            .map_err(|_| OrganmatchError::Unauthenticated)?;
        let user = state
            .store
            .read(|t| t.get_user(id))?
            .map_err(|_| OrganmatchError::Unauthenticated)?;
        Ok(Self(user))
    }
}
