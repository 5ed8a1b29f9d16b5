//! # organmatch-api
//!
//! **HTTP surface** for OrganMatch.
//!
//! Caller identity arrives in the `x-user-id` header, asserted by an
//! upstream authenticator. Role checks happen here, once, through
//! [`auth::Caller`]; the engine crates below only ever see authorized
//! calls.
//!
//! ```text
//! axum Router → Caller (x-user-id) → require_admin / require_role
//!     → ingress | matchcore | settlement | store
//! ```

pub mod auth;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod views;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
