//! Explicit cascade policy for user deletion.
//!
//! Deleting a user deletes:
//! 1. every organ the user donated,
//! 2. every request the user filed,
//! 3. every match that references the user, one of those organs, or one
//!    of those requests.
//!
//! A deleted match may hold an organ or request owned by somebody else.
//! [`CascadePolicy`] decides its fate:
//!
//! ```text
//!   Release: organ MATCHED → AVAILABLE, request APPROVED → PENDING (+ note)
//!   Purge:   organ and request are deleted too
//! ```
//!
//! Either way the MATCHED/APPROVED ⇔ exactly-one-match invariant holds
//! afterwards.

use std::collections::BTreeSet;

use organmatch_types::{
    AvailabilityStatus, CascadePolicy, Match, OrganId, OrganmatchError, RequestId,
    RequestStatus, Result, UserId, constants,
};

use crate::{directory::CascadeReport, memory::Tables};

pub(crate) fn delete_user(
    tables: &mut Tables,
    user_id: UserId,
    policy: CascadePolicy,
) -> Result<CascadeReport> {
    if !tables.users.contains_key(&user_id) {
        return Err(OrganmatchError::UserNotFound(user_id));
    }

    let owned_organs: BTreeSet<OrganId> = tables
        .organs
        .values()
        .filter(|o| o.donor_id == user_id)
        .map(|o| o.id)
        .collect();
    let owned_requests: BTreeSet<RequestId> = tables
        .requests
        .values()
        .filter(|r| r.recipient_id == user_id)
        .map(|r| r.id)
        .collect();

    let doomed: Vec<Match> = tables
        .matches
        .values()
        .filter(|m| {
            m.involves_user(user_id)
                || owned_organs.contains(&m.organ_id)
                || owned_requests.contains(&m.request_id)
        })
        .cloned()
        .collect();

    let mut report = CascadeReport {
        user_id: Some(user_id),
        ..CascadeReport::default()
    };

    for record in &doomed {
        tables.matches.remove(&record.id);
        report.matches_deleted.push(record.id);

        if !owned_organs.contains(&record.organ_id) {
            settle_orphaned_organ(tables, record.organ_id, policy, &mut report);
        }
        if !owned_requests.contains(&record.request_id) {
            settle_orphaned_request(tables, record.request_id, policy, &mut report);
        }
    }

    for id in &owned_organs {
        tables.organs.remove(id);
        report.organs_deleted.push(*id);
    }
    for id in &owned_requests {
        tables.requests.remove(id);
        report.requests_deleted.push(*id);
    }
    tables.users.remove(&user_id);

    tracing::info!(
        user = %user_id,
        %policy,
        organs_deleted = report.organs_deleted.len(),
        requests_deleted = report.requests_deleted.len(),
        matches_deleted = report.matches_deleted.len(),
        organs_released = report.organs_released.len(),
        requests_reopened = report.requests_reopened.len(),
        "User deleted with cascade"
    );

    Ok(report)
}

fn settle_orphaned_organ(
    tables: &mut Tables,
    organ_id: OrganId,
    policy: CascadePolicy,
    report: &mut CascadeReport,
) {
    match policy {
        CascadePolicy::Release => {
            if let Some(organ) = tables.organs.get_mut(&organ_id) {
                if organ.availability_status == AvailabilityStatus::Matched {
                    organ.release();
                    report.organs_released.push(organ_id);
                }
            }
        }
        CascadePolicy::Purge => {
            if tables.organs.remove(&organ_id).is_some() {
                report.organs_deleted.push(organ_id);
            }
        }
    }
}

fn settle_orphaned_request(
    tables: &mut Tables,
    request_id: RequestId,
    policy: CascadePolicy,
    report: &mut CascadeReport,
) {
    match policy {
        CascadePolicy::Release => {
            if let Some(request) = tables.requests.get_mut(&request_id) {
                if request.status == RequestStatus::Approved {
                    request.reopen(constants::CASCADE_REOPEN_NOTE);
                    report.requests_reopened.push(request_id);
                }
            }
        }
        CascadePolicy::Purge => {
            if tables.requests.remove(&request_id).is_some() {
                report.requests_deleted.push(request_id);
            }
        }
    }
}
