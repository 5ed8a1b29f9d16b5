//! In-memory transactional store.
//!
//! All four tables live behind one `RwLock`. Reads take the read lock.
//! Transactions take the write lock, stage their mutations on a copy of the
//! tables, and swap the copy in only on success, so a failed or panicking
//! transaction leaves the published tables untouched.

use std::{
    collections::BTreeMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use chrono::Utc;
use organmatch_types::{
    AvailabilityStatus, CascadePolicy, Match, MatchId, Organ, OrganId, OrganRequest,
    OrganmatchError, RequestId, RequestStatus, Result, User, UserId,
};

use crate::{
    cascade,
    directory::{
        CascadeReport, CreateMatch, CreateOrgan, CreateRequest, CreateUser, Directory,
        DirectoryMut, OrganFilter, RequestFilter, RequestOrder, Store, UserFilter,
    },
};

/// The four tables. Keyed by UUIDv7 ids, so iteration is creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) organs: BTreeMap<OrganId, Organ>,
    pub(crate) requests: BTreeMap<RequestId, OrganRequest>,
    pub(crate) matches: BTreeMap<MatchId, Match>,
}

impl Tables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn require_user(&self, id: UserId) -> Result<&User> {
        self.users.get(&id).ok_or(OrganmatchError::UserNotFound(id))
    }
}

impl Directory for Tables {
    fn get_user(&self, id: UserId) -> Result<User> {
        self.require_user(id).cloned()
    }

    fn get_organ(&self, id: OrganId) -> Result<Organ> {
        self.organs
            .get(&id)
            .cloned()
            .ok_or(OrganmatchError::OrganNotFound(id))
    }

    fn get_request(&self, id: RequestId) -> Result<OrganRequest> {
        self.requests
            .get(&id)
            .cloned()
            .ok_or(OrganmatchError::RequestNotFound(id))
    }

    fn get_match(&self, id: MatchId) -> Result<Match> {
        self.matches
            .get(&id)
            .cloned()
            .ok_or(OrganmatchError::MatchNotFound(id))
    }

    fn find_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|u| u.username == username)
            .cloned()
    }

    fn list_users(&self, filter: &UserFilter) -> Vec<User> {
        self.users
            .values()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect()
    }

    fn list_organs(&self, filter: &OrganFilter) -> Vec<Organ> {
        self.organs
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect()
    }

    fn list_requests(&self, filter: &RequestFilter) -> Vec<OrganRequest> {
        let mut out: Vec<OrganRequest> = self
            .requests
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        // Ties on created_at fall back to id, which is also creation order.
        match filter.order {
            RequestOrder::UrgencyThenNewest => out.sort_by(|a, b| {
                a.urgency_level
                    .cmp(&b.urgency_level)
                    .then(b.created_at.cmp(&a.created_at))
                    .then(b.id.cmp(&a.id))
            }),
            RequestOrder::Newest => {
                out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            }
        }
        out
    }

    fn list_matches(&self) -> Vec<Match> {
        let mut out: Vec<Match> = self.matches.values().cloned().collect();
        out.sort_by(|a, b| b.matched_on.cmp(&a.matched_on).then(b.id.cmp(&a.id)));
        out
    }
}

impl DirectoryMut for Tables {
    fn create_user(&mut self, fields: CreateUser) -> Result<User> {
        if self.users.values().any(|u| u.username == fields.username) {
            return Err(OrganmatchError::DuplicateUsername(fields.username));
        }
        let user = User {
            id: UserId::new(),
            username: fields.username,
            name: fields.name,
            age: fields.age,
            gender: fields.gender,
            blood_group: fields.blood_group,
            contact: fields.contact,
            role: fields.role,
            joined_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn create_organ(&mut self, fields: CreateOrgan) -> Result<Organ> {
        self.require_user(fields.donor_id)?;
        let organ = Organ {
            id: OrganId::new(),
            organ_type: fields.organ_type,
            blood_group: fields.blood_group,
            donor_id: fields.donor_id,
            availability_status: AvailabilityStatus::Available,
            created_at: Utc::now(),
        };
        self.organs.insert(organ.id, organ.clone());
        Ok(organ)
    }

    fn create_request(&mut self, fields: CreateRequest) -> Result<OrganRequest> {
        self.require_user(fields.recipient_id)?;
        let request = OrganRequest {
            id: RequestId::new(),
            recipient_id: fields.recipient_id,
            organ_type: fields.organ_type,
            blood_group: fields.blood_group,
            urgency_level: fields.urgency_level,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            admin_note: None,
        };
        self.requests.insert(request.id, request.clone());
        Ok(request)
    }

    fn create_match(&mut self, fields: CreateMatch) -> Result<Match> {
        self.require_user(fields.donor_id)?;
        self.require_user(fields.recipient_id)?;
        if !self.organs.contains_key(&fields.organ_id) {
            return Err(OrganmatchError::OrganNotFound(fields.organ_id));
        }
        if !self.requests.contains_key(&fields.request_id) {
            return Err(OrganmatchError::RequestNotFound(fields.request_id));
        }
        let record = Match {
            id: MatchId::new(),
            donor_id: fields.donor_id,
            recipient_id: fields.recipient_id,
            organ_id: fields.organ_id,
            request_id: fields.request_id,
            organ_type: fields.organ_type,
            status: fields.status,
            matched_on: Utc::now(),
        };
        self.matches.insert(record.id, record.clone());
        Ok(record)
    }

    fn save_organ(&mut self, organ: &Organ) -> Result<()> {
        let slot = self
            .organs
            .get_mut(&organ.id)
            .ok_or(OrganmatchError::OrganNotFound(organ.id))?;
        *slot = organ.clone();
        Ok(())
    }

    fn save_request(&mut self, request: &OrganRequest) -> Result<()> {
        let slot = self
            .requests
            .get_mut(&request.id)
            .ok_or(OrganmatchError::RequestNotFound(request.id))?;
        *slot = request.clone();
        Ok(())
    }

    fn delete_organ(&mut self, id: OrganId) -> Result<Organ> {
        self.organs
            .remove(&id)
            .ok_or(OrganmatchError::OrganNotFound(id))
    }

    fn delete_request(&mut self, id: RequestId) -> Result<OrganRequest> {
        self.requests
            .remove(&id)
            .ok_or(OrganmatchError::RequestNotFound(id))
    }

    fn delete_user(&mut self, id: UserId, policy: CascadePolicy) -> Result<CascadeReport> {
        cascade::delete_user(self, id, policy)
    }
}

// ---------------------------------------------------------------------------
// InMemoryStore
// ---------------------------------------------------------------------------

/// Shared, lock-protected store. Wrap in `Arc` to hand to request handlers.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A point-in-time copy of every table.
    pub fn snapshot(&self) -> Result<Tables> {
        Ok(self.read_guard()?.clone())
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| OrganmatchError::Internal("store lock poisoned".to_string()))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| OrganmatchError::Internal("store lock poisoned".to_string()))
    }
}

impl Store for InMemoryStore {
    type Tables = Tables;

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T> {
        let guard = self.read_guard()?;
        Ok(f(&guard))
    }

    fn transaction<T>(&self, f: impl FnOnce(&mut Tables) -> Result<T>) -> Result<T> {
        let mut guard = self.write_guard()?;
        let mut staged = guard.clone();
        let out = f(&mut staged)?;
        *guard = staged;
        Ok(out)
    }
}
