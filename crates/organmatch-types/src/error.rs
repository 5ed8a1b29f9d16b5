//! Error types for the OrganMatch backend.
//!
//! All errors use the `OM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Lookup errors (referenced entity does not resolve)
//! - 2xx: Validation errors (bad input, incompatible pairing)
//! - 3xx: State transition errors
//! - 4xx: Access errors
//! - 9xx: General / internal errors
//!
//! Every variant maps onto one [`ErrorKind`], the coarse taxonomy callers
//! (and the HTTP layer) branch on.

use thiserror::Error;

use crate::{BloodGroup, MatchId, OrganId, RequestId, RequestStatus, UserId};

/// Coarse error classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced entity id does not resolve.
    NotFound,
    /// Input or pairing rejected by a validation rule.
    ValidationFailure,
    /// Caller is known but lacks the required role.
    Forbidden,
    /// Caller identity is missing or unknown.
    Unauthenticated,
    /// Anything the caller cannot fix by re-submitting.
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::ValidationFailure => write!(f, "VALIDATION_FAILURE"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::Unauthenticated => write!(f, "UNAUTHENTICATED"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Central error enum for all OrganMatch operations.
#[derive(Debug, Error)]
pub enum OrganmatchError {
    // =================================================================
    // Lookup Errors (1xx)
    // =================================================================
    /// No user with this id.
    #[error("OM_ERR_100: User not found: {0}")]
    UserNotFound(UserId),

    /// No organ with this id.
    #[error("OM_ERR_101: Organ not found: {0}")]
    OrganNotFound(OrganId),

    /// No organ request with this id.
    #[error("OM_ERR_102: Request not found: {0}")]
    RequestNotFound(RequestId),

    /// No match with this id.
    #[error("OM_ERR_103: Match not found: {0}")]
    MatchNotFound(MatchId),

    // =================================================================
    // Validation Errors (2xx)
    // =================================================================
    /// A single input field failed validation.
    #[error("OM_ERR_200: Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// The blood group label is not one of the eight ABO/Rh groups.
    #[error("OM_ERR_201: Unknown blood group: {0:?}")]
    UnknownBloodGroup(String),

    /// Organ type differs between the submitted pairing, the organ and the request.
    #[error(
        "OM_ERR_202: Organ type mismatch: submitted {submitted}, organ {organ}, request {request}"
    )]
    OrganTypeMismatch {
        submitted: String,
        organ: String,
        request: String,
    },

    /// The donor's blood group cannot donate to the recipient's.
    #[error("OM_ERR_203: Incompatible blood groups: donor {donor} cannot donate to {recipient}")]
    IncompatibleBloodGroup {
        donor: BloodGroup,
        recipient: BloodGroup,
    },

    /// The submitted donor/recipient does not own the organ/request.
    #[error("OM_ERR_204: Party mismatch: {reason}")]
    PartyMismatch { reason: String },

    /// Username is already registered.
    #[error("OM_ERR_205: Username already taken: {0}")]
    DuplicateUsername(String),

    // =================================================================
    // State Transition Errors (3xx)
    // =================================================================
    /// The organ is no longer AVAILABLE (already matched).
    #[error("OM_ERR_300: Organ not available: {0}")]
    OrganNotAvailable(OrganId),

    /// The request is no longer PENDING.
    #[error("OM_ERR_301: Request {id} is {status}, not PENDING")]
    RequestNotPending { id: RequestId, status: RequestStatus },

    // =================================================================
    // Access Errors (4xx)
    // =================================================================
    /// No caller identity was supplied, or it does not resolve.
    #[error("OM_ERR_400: Authentication required")]
    Unauthenticated,

    /// The caller lacks the role this operation needs.
    #[error("OM_ERR_401: Forbidden: {reason}")]
    Forbidden { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Referential integrity check failed. Critical.
    #[error("OM_ERR_900: Integrity violation: {reason}")]
    IntegrityViolation { reason: String },

    /// Unrecoverable internal error.
    #[error("OM_ERR_901: Internal error: {0}")]
    Internal(String),

    /// Configuration error (bad env value, missing fields, etc.).
    #[error("OM_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl OrganmatchError {
    /// Map this error onto the caller-facing taxonomy.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_)
            | Self::OrganNotFound(_)
            | Self::RequestNotFound(_)
            | Self::MatchNotFound(_) => ErrorKind::NotFound,
            Self::InvalidField { .. }
            | Self::UnknownBloodGroup(_)
            | Self::OrganTypeMismatch { .. }
            | Self::IncompatibleBloodGroup { .. }
            | Self::PartyMismatch { .. }
            | Self::DuplicateUsername(_)
            | Self::OrganNotAvailable(_)
            | Self::RequestNotPending { .. } => ErrorKind::ValidationFailure,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::IntegrityViolation { .. }
            | Self::Internal(_)
            | Self::Configuration(_) => ErrorKind::Internal,
        }
    }

    /// Shorthand for a role check failure.
    #[must_use]
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// Shorthand for a single-field validation failure.
    #[must_use]
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OrganmatchError>;
