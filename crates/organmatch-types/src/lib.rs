//! # organmatch-types
//!
//! Shared types, errors, and configuration for the **OrganMatch**
//! organ-donation coordination backend.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`UserId`], [`OrganId`], [`RequestId`], [`MatchId`]
//! - **Blood groups**: [`BloodGroup`]
//! - **Users**: [`User`], [`NewUser`], [`Role`]
//! - **Organs**: [`Organ`], [`OrganType`], [`AvailabilityStatus`]
//! - **Requests**: [`OrganRequest`], [`UrgencyLevel`], [`RequestStatus`]
//! - **Matches**: [`Match`], [`MatchStatus`]
//! - **Configuration**: [`ServiceConfig`], [`CascadePolicy`]
//! - **Errors**: [`OrganmatchError`] with `OM_ERR_` prefix codes, [`ErrorKind`]
//! - **Constants**: system-wide limits and defaults

pub mod blood;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod organ;
pub mod pairing;
pub mod request;
pub mod user;

// Re-export all primary types at crate root for ergonomic imports:
//   use organmatch_types::{Organ, OrganRequest, BloodGroup, ...};

pub use blood::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use organ::*;
pub use pairing::*;
pub use request::*;
pub use user::*;

// Constants are accessed via `organmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
