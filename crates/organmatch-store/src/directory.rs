//! Directory traits: the read/write surface the engine consumes.
//!
//! [`Directory`] is the read side, [`DirectoryMut`] the write side, and
//! [`Store`] the entry point that hands out one or the other. Every write
//! happens inside [`Store::transaction`], which is all-or-nothing.

use organmatch_types::{
    AvailabilityStatus, BloodGroup, CascadePolicy, Match, MatchId, MatchStatus, Organ, OrganId,
    OrganRequest, OrganType, RequestId, RequestStatus, Result, Role, UrgencyLevel, User, UserId,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Organ query. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganFilter {
    pub organ_type: Option<OrganType>,
    pub blood_group: Option<BloodGroup>,
    pub availability_status: Option<AvailabilityStatus>,
}

impl OrganFilter {
    /// Only AVAILABLE organs.
    #[must_use]
    pub fn available() -> Self {
        Self {
            availability_status: Some(AvailabilityStatus::Available),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, organ_type: OrganType) -> Self {
        self.organ_type = Some(organ_type);
        self
    }

    #[must_use]
    pub fn with_blood_group(mut self, blood_group: BloodGroup) -> Self {
        self.blood_group = Some(blood_group);
        self
    }

    #[must_use]
    pub fn matches(&self, organ: &Organ) -> bool {
        self.organ_type
            .as_ref()
            .is_none_or(|t| *t == organ.organ_type)
            && self.blood_group.is_none_or(|b| b == organ.blood_group)
            && self
                .availability_status
                .is_none_or(|s| s == organ.availability_status)
    }
}

/// Sort order for request listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestOrder {
    /// Most severe urgency first, then newest first (admin queue).
    #[default]
    UrgencyThenNewest,
    /// Newest first (a recipient's own view).
    Newest,
}

/// Request query. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub recipient_id: Option<UserId>,
    pub status: Option<RequestStatus>,
    pub order: RequestOrder,
}

impl RequestFilter {
    /// One recipient's requests, newest first.
    #[must_use]
    pub fn for_recipient(recipient_id: UserId) -> Self {
        Self {
            recipient_id: Some(recipient_id),
            status: None,
            order: RequestOrder::Newest,
        }
    }

    #[must_use]
    pub fn matches(&self, request: &OrganRequest) -> bool {
        self.recipient_id.is_none_or(|r| r == request.recipient_id)
            && self.status.is_none_or(|s| s == request.status)
    }
}

/// User query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub exclude_admins: bool,
}

impl UserFilter {
    /// Everyone except administrators.
    #[must_use]
    pub fn non_admins() -> Self {
        Self {
            role: None,
            exclude_admins: true,
        }
    }

    #[must_use]
    pub fn with_role(role: Role) -> Self {
        Self {
            role: Some(role),
            exclude_admins: false,
        }
    }

    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        self.role.is_none_or(|r| r == user.role) && !(self.exclude_admins && user.is_admin())
    }
}

// ---------------------------------------------------------------------------
// Create payloads (id and timestamp are generated by the store)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub username: String,
    pub name: String,
    pub age: Option<u16>,
    pub gender: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub contact: Option<String>,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrgan {
    pub donor_id: UserId,
    pub organ_type: OrganType,
    pub blood_group: BloodGroup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub recipient_id: UserId,
    pub organ_type: OrganType,
    pub blood_group: BloodGroup,
    pub urgency_level: UrgencyLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMatch {
    pub donor_id: UserId,
    pub recipient_id: UserId,
    pub organ_id: OrganId,
    pub request_id: RequestId,
    pub organ_type: OrganType,
    pub status: MatchStatus,
}

/// What a cascading user deletion removed or released.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub user_id: Option<UserId>,
    pub organs_deleted: Vec<OrganId>,
    pub requests_deleted: Vec<RequestId>,
    pub matches_deleted: Vec<MatchId>,
    pub organs_released: Vec<OrganId>,
    pub requests_reopened: Vec<RequestId>,
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Read side of the store. Single-entity reads are atomic.
pub trait Directory {
    fn get_user(&self, id: UserId) -> Result<User>;
    fn get_organ(&self, id: OrganId) -> Result<Organ>;
    fn get_request(&self, id: RequestId) -> Result<OrganRequest>;
    fn get_match(&self, id: MatchId) -> Result<Match>;

    fn find_user_by_username(&self, username: &str) -> Option<User>;

    /// Users in id order.
    fn list_users(&self, filter: &UserFilter) -> Vec<User>;
    /// Organs in id (creation) order.
    fn list_organs(&self, filter: &OrganFilter) -> Vec<Organ>;
    /// Requests in the order the filter asks for.
    fn list_requests(&self, filter: &RequestFilter) -> Vec<OrganRequest>;
    /// Matches, newest first.
    fn list_matches(&self) -> Vec<Match>;
}

/// Write side of the store. Only reachable inside [`Store::transaction`].
pub trait DirectoryMut: Directory {
    fn create_user(&mut self, fields: CreateUser) -> Result<User>;
    fn create_organ(&mut self, fields: CreateOrgan) -> Result<Organ>;
    fn create_request(&mut self, fields: CreateRequest) -> Result<OrganRequest>;
    fn create_match(&mut self, fields: CreateMatch) -> Result<Match>;

    fn save_organ(&mut self, organ: &Organ) -> Result<()>;
    fn save_request(&mut self, request: &OrganRequest) -> Result<()>;

    /// Remove one organ row. Callers check that no match references it.
    fn delete_organ(&mut self, id: OrganId) -> Result<Organ>;
    /// Remove one request row. Callers check that no match references it.
    fn delete_request(&mut self, id: RequestId) -> Result<OrganRequest>;

    /// Delete a user and everything that references them, per `policy`.
    fn delete_user(&mut self, id: UserId, policy: CascadePolicy) -> Result<CascadeReport>;
}

/// Entry point shared by request handlers.
pub trait Store: Send + Sync {
    type Tables: DirectoryMut;

    /// Run `f` against a consistent view of the tables.
    fn read<T>(&self, f: impl FnOnce(&Self::Tables) -> T) -> Result<T>;

    /// Run `f` against staged tables; publish the changes only if `f`
    /// returns `Ok`. Readers never observe a partially applied transaction.
    fn transaction<T>(&self, f: impl FnOnce(&mut Self::Tables) -> Result<T>) -> Result<T>;
}
