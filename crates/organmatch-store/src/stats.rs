//! Dashboard counters.

use organmatch_types::{RequestStatus, Role};
use serde::{Deserialize, Serialize};

use crate::directory::{Directory, RequestFilter, UserFilter};

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub donors: usize,
    pub recipients: usize,
    pub pending: usize,
    pub matches: usize,
}

/// Count donors, recipients, PENDING requests and matches.
#[must_use]
pub fn stats(dir: &impl Directory) -> DirectoryStats {
    DirectoryStats {
        donors: dir.list_users(&UserFilter::with_role(Role::Donor)).len(),
        recipients: dir.list_users(&UserFilter::with_role(Role::Recipient)).len(),
        pending: dir
            .list_requests(&RequestFilter {
                status: Some(RequestStatus::Pending),
                ..RequestFilter::default()
            })
            .len(),
        matches: dir.list_matches().len(),
    }
}

#[cfg(test)]
mod tests {
    use organmatch_types::{BloodGroup, OrganRequest, User};

    use super::*;
    use crate::memory::Tables;

    #[test]
    fn counts_by_role_and_status() {
        let mut tables = Tables::new();
        let admin = User::dummy(Role::Admin);
        let donor = User::dummy(Role::Donor);
        let recipient = User::dummy(Role::Recipient);
        let pending = OrganRequest::dummy_for_recipient(recipient.id, "Liver", BloodGroup::ONeg);
        let mut rejected =
            OrganRequest::dummy_for_recipient(recipient.id, "Heart", BloodGroup::ONeg);
        rejected.reject("withdrawn").unwrap();
        for user in [admin, donor, recipient] {
            tables.users.insert(user.id, user);
        }
        tables.requests.insert(pending.id, pending);
        tables.requests.insert(rejected.id, rejected);

        assert_eq!(
            stats(&tables),
            DirectoryStats {
                donors: 1,
                recipients: 1,
                pending: 1,
                matches: 0,
            }
        );
    }
}
