//! Owner withdrawals: a donor takes back an unmatched organ, a recipient
//! cancels a request that no match references.
//!
//! Only rows that no match points at may leave the directory this way.
//! MATCHED organs and APPROVED requests go through the admin cascade.

use organmatch_store::{Directory, DirectoryMut, Store};
use organmatch_types::{
    Organ, OrganId, OrganRequest, OrganmatchError, RequestId, RequestStatus, Result, UserId,
};

use crate::gate::IntakeGate;

impl IntakeGate {
    /// Remove an AVAILABLE organ on behalf of its donor.
    ///
    /// # Errors
    /// [`OrganmatchError::OrganNotFound`] for an unknown id,
    /// [`OrganmatchError::Forbidden`] if `donor_id` does not own it,
    /// [`OrganmatchError::OrganNotAvailable`] once it has been matched.
    pub fn withdraw_organ<S: Store>(
        &self,
        store: &S,
        donor_id: UserId,
        organ_id: OrganId,
    ) -> Result<Organ> {
        let organ = store.transaction(|t| {
            let organ = t.get_organ(organ_id)?;
            if organ.donor_id != donor_id {
                return Err(OrganmatchError::forbidden(format!(
                    "organ {organ_id} belongs to another donor"
                )));
            }
            if !organ.is_available() {
                return Err(OrganmatchError::OrganNotAvailable(organ_id));
            }
            t.delete_organ(organ_id)
        })?;
        tracing::info!(
            organ = %organ.id,
            donor = %donor_id,
            "Organ withdrawn"
        );
        Ok(organ)
    }

    /// Remove a PENDING or REJECTED request on behalf of its recipient.
    ///
    /// # Errors
    /// [`OrganmatchError::RequestNotFound`] for an unknown id,
    /// [`OrganmatchError::Forbidden`] if `recipient_id` did not file it,
    /// [`OrganmatchError::RequestNotPending`] once it has been approved.
    pub fn withdraw_request<S: Store>(
        &self,
        store: &S,
        recipient_id: UserId,
        request_id: RequestId,
    ) -> Result<OrganRequest> {
        let request = store.transaction(|t| {
            let request = t.get_request(request_id)?;
            if request.recipient_id != recipient_id {
                return Err(OrganmatchError::forbidden(format!(
                    "request {request_id} belongs to another recipient"
                )));
            }
            if request.status == RequestStatus::Approved {
                return Err(OrganmatchError::RequestNotPending {
                    id: request_id,
                    status: request.status,
                });
            }
            t.delete_request(request_id)
        })?;
        tracing::info!(
            request = %request.id,
            recipient = %recipient_id,
            status = %request.status,
            "Request withdrawn"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use organmatch_store::{CreateMatch, InMemoryStore, integrity};
    use organmatch_types::{BloodGroup, MatchStatus, NewUser, Role, User};

    use super::*;
    use crate::gate::{NewOrgan, NewRequest};

    struct Parties {
        store: InMemoryStore,
        donor: User,
        recipient: User,
        organ: Organ,
        request: OrganRequest,
    }

    fn parties() -> Parties {
        let store = InMemoryStore::new();
        let gate = IntakeGate::new();
        let user = |username: &str, role| {
            gate.register_user(
                &store,
                &NewUser {
                    username: username.to_string(),
                    name: username.to_string(),
                    role,
                    ..NewUser::default()
                },
            )
            .unwrap()
        };
        let donor = user("dana", Role::Donor);
        let recipient = user("rui", Role::Recipient);
        let organ = gate
            .register_organ(
                &store,
                donor.id,
                &NewOrgan {
                    organ_type: "Kidney".to_string(),
                    blood_group: "O-".to_string(),
                },
            )
            .unwrap();
        let request = gate
            .file_request(
                &store,
                recipient.id,
                &NewRequest {
                    organ_type: "Kidney".to_string(),
                    blood_group: "A+".to_string(),
                    urgency_level: None,
                },
            )
            .unwrap();
        Parties {
            store,
            donor,
            recipient,
            organ,
            request,
        }
    }

    fn commit(p: &Parties) {
        p.store
            .transaction(|t| {
                let mut organ = t.get_organ(p.organ.id)?;
                let mut request = t.get_request(p.request.id)?;
                organ.mark_matched()?;
                request.approve("matched")?;
                t.save_organ(&organ)?;
                t.save_request(&request)?;
                t.create_match(CreateMatch {
                    donor_id: p.donor.id,
                    recipient_id: p.recipient.id,
                    organ_id: organ.id,
                    request_id: request.id,
                    organ_type: organ.organ_type,
                    status: MatchStatus::Completed,
                })
            })
            .unwrap();
    }

    #[test]
    fn donor_withdraws_available_organ() {
        let p = parties();
        let gone = IntakeGate::new()
            .withdraw_organ(&p.store, p.donor.id, p.organ.id)
            .unwrap();
        assert_eq!(gone, p.organ);
        let err = p.store.read(|t| t.get_organ(p.organ.id)).unwrap().unwrap_err();
        assert!(matches!(err, OrganmatchError::OrganNotFound(_)));
    }

    #[test]
    fn only_the_donor_may_withdraw() {
        let p = parties();
        let err = IntakeGate::new()
            .withdraw_organ(&p.store, p.recipient.id, p.organ.id)
            .unwrap_err();
        assert!(matches!(err, OrganmatchError::Forbidden { .. }));
        assert!(p.store.read(|t| t.get_organ(p.organ.id)).unwrap().is_ok());
    }

    #[test]
    fn matched_rows_stay_put() {
        let p = parties();
        commit(&p);
        let gate = IntakeGate::new();

        let err = gate
            .withdraw_organ(&p.store, p.donor.id, p.organ.id)
            .unwrap_err();
        assert!(matches!(err, OrganmatchError::OrganNotAvailable(_)));

        let err = gate
            .withdraw_request(&p.store, p.recipient.id, p.request.id)
            .unwrap_err();
        assert!(matches!(
            err,
            OrganmatchError::RequestNotPending {
                status: RequestStatus::Approved,
                ..
            }
        ));

        p.store.read(integrity::verify).unwrap().unwrap();
    }

    #[test]
    fn recipient_cancels_pending_request() {
        let p = parties();
        let gate = IntakeGate::new();
        let err = gate
            .withdraw_request(&p.store, p.donor.id, p.request.id)
            .unwrap_err();
        assert!(matches!(err, OrganmatchError::Forbidden { .. }));

        let gone = gate
            .withdraw_request(&p.store, p.recipient.id, p.request.id)
            .unwrap();
        assert_eq!(gone.blood_group, BloodGroup::APos);
        let err = gate
            .withdraw_request(&p.store, p.recipient.id, p.request.id)
            .unwrap_err();
        assert!(matches!(err, OrganmatchError::RequestNotFound(_)));
        p.store.read(integrity::verify).unwrap().unwrap();
    }
}
