//! # organmatch-settlement
//!
//! **Finality Plane**: the only code that moves an organ or request out of
//! its initial state.
//!
//! ## Architecture
//!
//! The [`MatchCommitter`] receives an administrator's chosen pairing and,
//! inside one store transaction:
//! 1. Resolves donor, recipient, organ and request (NotFound otherwise)
//! 2. Re-checks organ type, blood-group compatibility and ownership
//! 3. Flips the organ AVAILABLE → MATCHED (conditional update)
//! 4. Flips the request PENDING → APPROVED with the admin note
//! 5. Creates the COMPLETED match record
//!
//! Any failure publishes nothing. [`reject_request`] is the other exit from
//! PENDING.

pub mod committer;
pub mod review;

pub use committer::{CommitMatch, MatchCommitter};
pub use review::reject_request;
