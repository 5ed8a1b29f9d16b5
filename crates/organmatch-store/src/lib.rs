//! # organmatch-store
//!
//! **Directory store**: the four tables (users, organs, requests, matches)
//! behind a transactional interface.
//!
//! ## Guarantees
//!
//! - Single-entity reads are atomic.
//! - [`Store::transaction`] is all-or-nothing; readers never see a
//!   half-applied write.
//! - Transactions are serialized, so a check-then-update inside one is
//!   race-free.
//! - User deletion cascades per [`CascadePolicy`](organmatch_types::CascadePolicy)
//!   and leaves [`integrity::verify`] passing.

mod cascade;
pub mod directory;
pub mod integrity;
pub mod memory;
pub mod stats;

pub use directory::{
    CascadeReport, CreateMatch, CreateOrgan, CreateRequest, CreateUser, Directory, DirectoryMut,
    OrganFilter, RequestFilter, RequestOrder, Store, UserFilter,
};
pub use memory::{InMemoryStore, Tables};
pub use stats::{DirectoryStats, stats};
