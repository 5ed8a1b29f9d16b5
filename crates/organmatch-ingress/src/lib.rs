//! # organmatch-ingress
//!
//! **Intake gate**: every user, organ and request enters the directory
//! through here.
//!
//! ## Architecture
//!
//! 1. **IntakeGate** (`gate`): pure validation. Raw payloads in, normalized
//!    store payloads out. Fail-closed: any bad field rejects the whole input.
//! 2. **Registration** (`register`): the gate's store-backed operations.
//!    Role checks and writes happen inside one store transaction.
//! 3. **Withdrawal** (`withdraw`): owners remove organs and requests that no
//!    match references yet.
//!
//! ```text
//! API → IntakeGate.validate_*() → Store.transaction(role check + create_*)
//! ```

pub mod gate;
pub mod register;
pub mod withdraw;

pub use gate::{IntakeGate, NewOrgan, NewRequest, OrganFields, RequestFields};
