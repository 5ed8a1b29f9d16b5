//! # organmatch-matchcore
//!
//! **Pure matching engine for OrganMatch.**
//!
//! MatchCore is the read plane: it takes a pending request and the organ
//! pool and decides which organs are viable candidates. It has:
//!
//! - **Zero side effects**: no writes, no state transitions
//! - **One compatibility table**: every blood-group check goes through
//!   [`compatibility`]
//! - **Deterministic output**: candidates in organ id order, with a
//!   [`candidate_root`] digest to compare lookups across calls

pub mod candidates;
pub mod compatibility;
pub mod determinism;

pub use candidates::{
    CandidateView, describe, filter_candidates, find_candidates, find_candidates_for,
    is_candidate,
};
pub use compatibility::{
    can_donate, compatible_donors, compatible_recipients, compatible_recipients_for_label,
};
pub use determinism::{candidate_root, candidate_root_hex};
