//! Match committer: atomic organ → request commits.
//!
//! Privilege is assumed. The committer only ever receives calls the HTTP
//! layer has already authorized as admin.

use organmatch_matchcore::can_donate;
use organmatch_store::{CreateMatch, DirectoryMut, Store};
use organmatch_types::{
    Match, MatchStatus, OrganId, OrganType, OrganmatchError, RequestId, Result, UserId,
    constants,
};
use serde::{Deserialize, Serialize};

/// An administrator's chosen pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMatch {
    pub donor_id: UserId,
    pub recipient_id: UserId,
    pub organ_id: OrganId,
    pub request_id: RequestId,
    pub organ_type: OrganType,
}

/// Commits matches with a fixed admin note.
#[derive(Debug, Clone)]
pub struct MatchCommitter {
    note: String,
}

impl MatchCommitter {
    /// Committer writing [`constants::DEFAULT_MATCH_NOTE`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_note(constants::DEFAULT_MATCH_NOTE)
    }

    #[must_use]
    pub fn with_note(note: impl Into<String>) -> Self {
        Self { note: note.into() }
    }

    /// The note written onto approved requests.
    #[must_use]
    pub fn note(&self) -> &str {
        &self.note
    }

    /// Commit `pairing` as one atomic unit.
    ///
    /// On success the organ is MATCHED, the request APPROVED with this
    /// committer's note, and exactly one new COMPLETED match references
    /// both. On failure nothing changes.
    ///
    /// # Errors
    /// - `*NotFound` if any of the four ids does not resolve
    /// - `OrganTypeMismatch`, `IncompatibleBloodGroup`, `PartyMismatch`
    ///   if the pairing is invalid
    /// - `OrganNotAvailable` / `RequestNotPending` if either side was
    ///   already committed
    pub fn commit_match<S: Store>(&self, store: &S, pairing: &CommitMatch) -> Result<Match> {
        let result = store.transaction(|t| self.apply(t, pairing));

        match &result {
            Ok(record) => tracing::info!(
                match_id = %record.id,
                organ = %record.organ_id,
                request = %record.request_id,
                donor = %record.donor_id,
                recipient = %record.recipient_id,
                organ_type = %record.organ_type,
                "Match committed"
            ),
            Err(err) => tracing::warn!(
                organ = %pairing.organ_id,
                request = %pairing.request_id,
                error = %err,
                "Match commit rejected"
            ),
        }

        result
    }

    fn apply(&self, t: &mut impl DirectoryMut, pairing: &CommitMatch) -> Result<Match> {
        // 1. Resolve every reference before touching anything
        let donor = t.get_user(pairing.donor_id)?;
        let recipient = t.get_user(pairing.recipient_id)?;
        let mut organ = t.get_organ(pairing.organ_id)?;
        let mut request = t.get_request(pairing.request_id)?;

        // 2. Organ type agrees three ways
        if pairing.organ_type != organ.organ_type || organ.organ_type != request.organ_type {
            return Err(OrganmatchError::OrganTypeMismatch {
                submitted: pairing.organ_type.to_string(),
                organ: organ.organ_type.to_string(),
                request: request.organ_type.to_string(),
            });
        }

        // 3. Blood groups
        if !can_donate(organ.blood_group, request.blood_group) {
            return Err(OrganmatchError::IncompatibleBloodGroup {
                donor: organ.blood_group,
                recipient: request.blood_group,
            });
        }

        // 4. Ownership
        if organ.donor_id != donor.id {
            return Err(OrganmatchError::PartyMismatch {
                reason: format!("organ {} was not donated by {}", organ.id, donor.id),
            });
        }
        if request.recipient_id != recipient.id {
            return Err(OrganmatchError::PartyMismatch {
                reason: format!("request {} was not filed by {}", request.id, recipient.id),
            });
        }

        // 5. Conditional transitions: AVAILABLE → MATCHED, PENDING → APPROVED
        organ.mark_matched()?;
        request.approve(self.note.clone())?;
        t.save_organ(&organ)?;
        t.save_request(&request)?;

        // 6. The match record
        t.create_match(CreateMatch {
            donor_id: donor.id,
            recipient_id: recipient.id,
            organ_id: organ.id,
            request_id: request.id,
            organ_type: organ.organ_type,
            status: MatchStatus::Completed,
        })
    }
}

impl Default for MatchCommitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use organmatch_store::{CreateOrgan, CreateRequest, CreateUser, Directory, InMemoryStore};
    use organmatch_types::{AvailabilityStatus, BloodGroup, RequestStatus, Role, UrgencyLevel};

    use super::*;

    fn user(t: &mut impl DirectoryMut, username: &str, role: Role) -> Result<UserId> {
        t.create_user(CreateUser {
            username: username.to_string(),
            name: username.to_string(),
            age: None,
            gender: None,
            blood_group: None,
            contact: None,
            role,
        })
        .map(|u| u.id)
    }

    fn seeded(organ_group: BloodGroup, request_group: BloodGroup) -> (InMemoryStore, CommitMatch) {
        let store = InMemoryStore::new();
        let pairing = store
            .transaction(|t| {
                let donor_id = user(t, "donor", Role::Donor)?;
                let recipient_id = user(t, "recipient", Role::Recipient)?;
                let organ = t.create_organ(CreateOrgan {
                    donor_id,
                    organ_type: OrganType::new("Kidney"),
                    blood_group: organ_group,
                })?;
                let request = t.create_request(CreateRequest {
                    recipient_id,
                    organ_type: OrganType::new("Kidney"),
                    blood_group: request_group,
                    urgency_level: UrgencyLevel::High,
                })?;
                Ok(CommitMatch {
                    donor_id,
                    recipient_id,
                    organ_id: organ.id,
                    request_id: request.id,
                    organ_type: OrganType::new("Kidney"),
                })
            })
            .unwrap();
        (store, pairing)
    }

    #[test]
    fn commit_flips_both_sides() {
        let (store, pairing) = seeded(BloodGroup::ONeg, BloodGroup::AbPos);
        let record = MatchCommitter::new().commit_match(&store, &pairing).unwrap();
        assert_eq!(record.status, MatchStatus::Completed);

        store
            .read(|t| {
                let organ = t.get_organ(pairing.organ_id).unwrap();
                let request = t.get_request(pairing.request_id).unwrap();
                assert_eq!(organ.availability_status, AvailabilityStatus::Matched);
                assert_eq!(request.status, RequestStatus::Approved);
                assert_eq!(
                    request.admin_note.as_deref(),
                    Some("Matched with compatible donor")
                );
                assert_eq!(t.list_matches(), vec![record.clone()]);
            })
            .unwrap();
    }

    #[test]
    fn custom_note_is_written() {
        let (store, pairing) = seeded(BloodGroup::ANeg, BloodGroup::APos);
        MatchCommitter::with_note("Board approved")
            .commit_match(&store, &pairing)
            .unwrap();
        let request = store.read(|t| t.get_request(pairing.request_id)).unwrap().unwrap();
        assert_eq!(request.admin_note.as_deref(), Some("Board approved"));
    }

    #[test]
    fn incompatible_blood_rejected() {
        let (store, pairing) = seeded(BloodGroup::APos, BloodGroup::ONeg);
        let err = MatchCommitter::new()
            .commit_match(&store, &pairing)
            .unwrap_err();
        assert!(matches!(
            err,
            OrganmatchError::IncompatibleBloodGroup {
                donor: BloodGroup::APos,
                recipient: BloodGroup::ONeg,
            }
        ));
        assert!(store.read(|t| t.list_matches()).unwrap().is_empty());
    }

    #[test]
    fn submitted_organ_type_must_agree() {
        let (store, mut pairing) = seeded(BloodGroup::ONeg, BloodGroup::ONeg);
        pairing.organ_type = OrganType::new("Liver");
        let err = MatchCommitter::new()
            .commit_match(&store, &pairing)
            .unwrap_err();
        assert!(matches!(err, OrganmatchError::OrganTypeMismatch { .. }));
    }

    #[test]
    fn swapped_parties_rejected() {
        let (store, mut pairing) = seeded(BloodGroup::ONeg, BloodGroup::ONeg);
        std::mem::swap(&mut pairing.donor_id, &mut pairing.recipient_id);
        let err = MatchCommitter::new()
            .commit_match(&store, &pairing)
            .unwrap_err();
        assert!(matches!(err, OrganmatchError::PartyMismatch { .. }));
    }

    #[test]
    fn second_commit_fails_validation() {
        let (store, pairing) = seeded(BloodGroup::ONeg, BloodGroup::ONeg);
        let committer = MatchCommitter::new();
        committer.commit_match(&store, &pairing).unwrap();
        let err = committer.commit_match(&store, &pairing).unwrap_err();
        assert!(matches!(err, OrganmatchError::OrganNotAvailable(_)));
        assert_eq!(store.read(|t| t.list_matches()).unwrap().len(), 1);
    }
}
