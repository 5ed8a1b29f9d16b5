//! Candidate finder.
//!
//! ```text
//! find_candidates(request) -> [Organ]   (organ id ascending)
//! ```
//!
//! An organ is a candidate for a request when all three hold:
//! 1. it is AVAILABLE,
//! 2. its organ type equals the request's,
//! 3. its blood group can donate to the request's blood group.
//!
//! No ranking by urgency or recency, no side effects. No compatible organ
//! is an empty list, never an error. The finder does not re-check that the
//! request is PENDING; callers only look up candidates for pending requests.

use chrono::{DateTime, Utc};
use organmatch_store::{Directory, OrganFilter};
use organmatch_types::{
    AvailabilityStatus, BloodGroup, Organ, OrganId, OrganRequest, OrganType, RequestId, Result,
    UserId,
};
use serde::{Deserialize, Serialize};

use crate::{compatibility::can_donate, determinism::candidate_root_hex};

/// Does `organ` qualify for `request`?
#[must_use]
pub fn is_candidate(request: &OrganRequest, organ: &Organ) -> bool {
    organ.is_available()
        && organ.organ_type == request.organ_type
        && can_donate(organ.blood_group, request.blood_group)
}

/// Pure form: keep the organs in `pool` that qualify, in id order.
#[must_use]
pub fn filter_candidates(request: &OrganRequest, pool: &[Organ]) -> Vec<Organ> {
    let mut out: Vec<Organ> = pool
        .iter()
        .filter(|organ| is_candidate(request, organ))
        .cloned()
        .collect();
    out.sort_by_key(|organ| organ.id);
    out
}

/// Store form: ask the directory for available organs of the request's
/// type, then apply [`filter_candidates`].
pub fn find_candidates(dir: &impl Directory, request: &OrganRequest) -> Vec<Organ> {
    let pool = dir.list_organs(&OrganFilter::available().with_type(request.organ_type.clone()));
    let candidates = filter_candidates(request, &pool);

    tracing::debug!(
        request = %request.id,
        organ_type = %request.organ_type,
        blood_group = %request.blood_group,
        pool = pool.len(),
        candidates = candidates.len(),
        candidate_root = %candidate_root_hex(&candidates),
        "Candidate lookup"
    );

    candidates
}

/// Resolve `request_id` and run [`find_candidates`] on it.
///
/// # Errors
/// [`OrganmatchError::RequestNotFound`](organmatch_types::OrganmatchError::RequestNotFound)
/// if the id does not resolve.
pub fn find_candidates_for(dir: &impl Directory, request_id: RequestId) -> Result<Vec<Organ>> {
    let request = dir.get_request(request_id)?;
    Ok(find_candidates(dir, &request))
}

/// Organ as shown to an administrator choosing a pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateView {
    pub id: OrganId,
    pub organ_type: OrganType,
    pub blood_group: BloodGroup,
    pub donor_id: UserId,
    /// `None` if the donor record cannot be resolved.
    pub donor_name: Option<String>,
    pub availability_status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
}

/// Attach donor names to `organs`, preserving order.
pub fn describe(dir: &impl Directory, organs: Vec<Organ>) -> Vec<CandidateView> {
    organs
        .into_iter()
        .map(|organ| CandidateView {
            donor_name: dir.get_user(organ.donor_id).ok().map(|donor| donor.name),
            id: organ.id,
            organ_type: organ.organ_type,
            blood_group: organ.blood_group,
            donor_id: organ.donor_id,
            availability_status: organ.availability_status,
            created_at: organ.created_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use organmatch_types::BloodGroup::{ANeg, APos, AbPos, BPos, ONeg, OPos};

    use super::*;

    #[test]
    fn o_negative_kidney_is_candidate_for_ab_positive_request() {
        let organ = Organ::dummy("Kidney", ONeg);
        let request = OrganRequest::dummy("Kidney", AbPos);
        assert_eq!(filter_candidates(&request, &[organ.clone()]), vec![organ]);
    }

    #[test]
    fn a_positive_kidney_is_not_candidate_for_o_negative_request() {
        let organ = Organ::dummy("Kidney", APos);
        let request = OrganRequest::dummy("Kidney", ONeg);
        assert!(filter_candidates(&request, &[organ]).is_empty());
    }

    #[test]
    fn matched_organ_excluded() {
        let mut organ = Organ::dummy("Kidney", ONeg);
        organ.mark_matched().unwrap();
        let request = OrganRequest::dummy("Kidney", ONeg);
        assert!(!is_candidate(&request, &organ));
    }

    #[test]
    fn organ_type_must_match() {
        let organ = Organ::dummy("Liver", ONeg);
        let request = OrganRequest::dummy("Kidney", ONeg);
        assert!(!is_candidate(&request, &organ));
        let organ = Organ::dummy("kidney", ONeg);
        assert!(is_candidate(&request, &organ));
    }

    #[test]
    fn output_in_id_order() {
        let pool: Vec<Organ> = (0..5).map(|_| Organ::dummy("Heart", OPos)).collect();
        let mut shuffled = pool.clone();
        shuffled.reverse();
        let request = OrganRequest::dummy("Heart", BPos);
        let ids: Vec<OrganId> = filter_candidates(&request, &shuffled)
            .into_iter()
            .map(|o| o.id)
            .collect();
        let expected: Vec<OrganId> = pool.iter().map(|o| o.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn mixed_pool() {
        let keep = Organ::dummy("Kidney", ANeg);
        let pool = vec![
            Organ::dummy("Kidney", APos),
            keep.clone(),
            Organ::dummy("Liver", ANeg),
        ];
        let request = OrganRequest::dummy("Kidney", ANeg);
        assert_eq!(filter_candidates(&request, &pool), vec![keep]);
    }

    #[test]
    fn candidate_view_wire_form() {
        let organ = Organ::dummy("Kidney", ONeg);
        let view = CandidateView {
            id: organ.id,
            organ_type: organ.organ_type.clone(),
            blood_group: organ.blood_group,
            donor_id: organ.donor_id,
            donor_name: Some("Dana".to_string()),
            availability_status: organ.availability_status,
            created_at: organ.created_at,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["blood_group"], "O-");
        assert_eq!(json["availability_status"], "AVAILABLE");
        assert_eq!(json["donor_name"], "Dana");
    }
}
