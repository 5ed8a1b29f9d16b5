//! Referential integrity checker.
//!
//! Invariants checked against a full directory snapshot:
//! ```text
//! ∀ match m:   donor(m), recipient(m), organ(m), request(m) exist
//!              organ(m).donor == donor(m), request(m).recipient == recipient(m)
//! ∀ organ o:   o.MATCHED   ⇔ |{m : m.organ == o}|   == 1, otherwise 0
//! ∀ request r: r.APPROVED  ⇔ |{m : m.request == r}| == 1, otherwise 0
//! ```
//!
//! If one of these ever breaks, a commit or a cascade published a
//! half-applied change.

use std::collections::HashMap;

use organmatch_types::{
    AvailabilityStatus, OrganId, OrganmatchError, RequestId, RequestStatus, Result,
};

use crate::directory::{Directory, OrganFilter, RequestFilter};

/// Every integrity violation in `dir`, as human-readable lines. Empty when
/// the directory is consistent.
#[must_use]
pub fn violations(dir: &impl Directory) -> Vec<String> {
    let mut out = Vec::new();
    let matches = dir.list_matches();

    let mut per_organ: HashMap<OrganId, usize> = HashMap::new();
    let mut per_request: HashMap<RequestId, usize> = HashMap::new();

    for m in &matches {
        *per_organ.entry(m.organ_id).or_default() += 1;
        *per_request.entry(m.request_id).or_default() += 1;

        if dir.get_user(m.donor_id).is_err() {
            out.push(format!("match {} references missing donor {}", m.id, m.donor_id));
        }
        if dir.get_user(m.recipient_id).is_err() {
            out.push(format!(
                "match {} references missing recipient {}",
                m.id, m.recipient_id
            ));
        }
        match dir.get_organ(m.organ_id) {
            Ok(organ) if organ.donor_id != m.donor_id => out.push(format!(
                "match {} donor {} does not own organ {}",
                m.id, m.donor_id, organ.id
            )),
            Ok(_) => {}
            Err(_) => out.push(format!("match {} references missing organ {}", m.id, m.organ_id)),
        }
        match dir.get_request(m.request_id) {
            Ok(request) if request.recipient_id != m.recipient_id => out.push(format!(
                "match {} recipient {} did not file request {}",
                m.id, m.recipient_id, request.id
            )),
            Ok(_) => {}
            Err(_) => out.push(format!(
                "match {} references missing request {}",
                m.id, m.request_id
            )),
        }
    }

    for organ in dir.list_organs(&OrganFilter::default()) {
        let held = per_organ.get(&organ.id).copied().unwrap_or(0);
        let expected = usize::from(organ.availability_status == AvailabilityStatus::Matched);
        if held != expected {
            out.push(format!(
                "organ {} is {} but held by {held} matches",
                organ.id, organ.availability_status
            ));
        }
    }

    for request in dir.list_requests(&RequestFilter::default()) {
        let held = per_request.get(&request.id).copied().unwrap_or(0);
        let expected = usize::from(request.status == RequestStatus::Approved);
        if held != expected {
            out.push(format!(
                "request {} is {} but held by {held} matches",
                request.id, request.status
            ));
        }
    }

    for organ in dir.list_organs(&OrganFilter::default()) {
        if dir.get_user(organ.donor_id).is_err() {
            out.push(format!("organ {} references missing donor {}", organ.id, organ.donor_id));
        }
    }
    for request in dir.list_requests(&RequestFilter::default()) {
        if dir.get_user(request.recipient_id).is_err() {
            out.push(format!(
                "request {} references missing recipient {}",
                request.id, request.recipient_id
            ));
        }
    }

    out
}

/// Verify referential integrity.
///
/// # Errors
/// Returns [`OrganmatchError::IntegrityViolation`] listing every broken
/// invariant.
pub fn verify(dir: &impl Directory) -> Result<()> {
    let found = violations(dir);
    if found.is_empty() {
        return Ok(());
    }
    Err(OrganmatchError::IntegrityViolation {
        reason: found.join("; "),
    })
}
