//! Organ requests filed by recipients.
//!
//! ## State Machine
//!
//! ```text
//!   ┌─────────┐  commit_match   ┌──────────┐
//!   │ PENDING ├────────────────▶│ APPROVED │
//!   └────┬────┘                 └──────────┘
//!        │ reject_request
//!        ▼
//!   ┌──────────┐
//!   │ REJECTED │
//!   └──────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BloodGroup, OrganType, OrganmatchError, RequestId, Result, UserId};

/// Static urgency tag. Declaration order is severity order, so sorting
/// ascending puts CRITICAL first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum UrgencyLevel {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Critical => write!(f, "CRITICAL"),
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Lifecycle status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Transitions are monotonic: only PENDING may move, and only forward.
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected)
        )
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// A recipient's ask for an organ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganRequest {
    pub id: RequestId,
    pub recipient_id: UserId,
    pub organ_type: OrganType,
    pub blood_group: BloodGroup,
    pub urgency_level: UrgencyLevel,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub admin_note: Option<String>,
}

impl OrganRequest {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// PENDING → APPROVED with an explanatory note.
    ///
    /// # Errors
    /// Returns [`OrganmatchError::RequestNotPending`] from any other state.
    pub fn approve(&mut self, note: impl Into<String>) -> Result<()> {
        self.transition(RequestStatus::Approved, note.into())
    }

    /// PENDING → REJECTED with an explanatory note.
    ///
    /// # Errors
    /// Returns [`OrganmatchError::RequestNotPending`] from any other state.
    pub fn reject(&mut self, note: impl Into<String>) -> Result<()> {
        self.transition(RequestStatus::Rejected, note.into())
    }

    /// APPROVED → PENDING. Only the store's cascade policy calls this, after
    /// deleting the match that approved the request.
    pub fn reopen(&mut self, note: impl Into<String>) {
        self.status = RequestStatus::Pending;
        self.admin_note = Some(note.into());
    }

    fn transition(&mut self, target: RequestStatus, note: String) -> Result<()> {
        if !self.status.can_transition_to(target) {
            return Err(OrganmatchError::RequestNotPending {
                id: self.id,
                status: self.status,
            });
        }
        self.status = target;
        self.admin_note = Some(note);
        Ok(())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl OrganRequest {
    pub fn dummy(organ_type: &str, blood_group: BloodGroup) -> Self {
        Self::dummy_for_recipient(UserId::new(), organ_type, blood_group)
    }

    pub fn dummy_for_recipient(
        recipient_id: UserId,
        organ_type: &str,
        blood_group: BloodGroup,
    ) -> Self {
        Self {
            id: RequestId::new(),
            recipient_id,
            organ_type: OrganType::new(organ_type),
            blood_group,
            urgency_level: UrgencyLevel::Medium,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            admin_note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_sorts_by_severity() {
        let mut levels = vec![
            UrgencyLevel::Low,
            UrgencyLevel::Critical,
            UrgencyLevel::Medium,
            UrgencyLevel::High,
        ];
        levels.sort();
        assert_eq!(
            levels,
            vec![
                UrgencyLevel::Critical,
                UrgencyLevel::High,
                UrgencyLevel::Medium,
                UrgencyLevel::Low,
            ]
        );
    }

    #[test]
    fn approve_sets_note() {
        let mut req = OrganRequest::dummy("Kidney", BloodGroup::APos);
        req.approve("Matched with compatible donor").unwrap();
        assert_eq!(req.status, RequestStatus::Approved);
        assert_eq!(
            req.admin_note.as_deref(),
            Some("Matched with compatible donor")
        );
    }

    #[test]
    fn approved_request_cannot_be_rejected() {
        let mut req = OrganRequest::dummy("Kidney", BloodGroup::APos);
        req.approve("ok").unwrap();
        let err = req.reject("too late").unwrap_err();
        assert!(matches!(
            err,
            OrganmatchError::RequestNotPending {
                status: RequestStatus::Approved,
                ..
            }
        ));
        assert_eq!(req.admin_note.as_deref(), Some("ok"));
    }

    #[test]
    fn rejected_request_cannot_be_approved() {
        let mut req = OrganRequest::dummy("Liver", BloodGroup::ONeg);
        req.reject("no longer eligible").unwrap();
        assert!(req.approve("match").is_err());
        assert_eq!(req.status, RequestStatus::Rejected);
    }

    #[test]
    fn reopen_returns_to_pending() {
        let mut req = OrganRequest::dummy("Liver", BloodGroup::ONeg);
        req.approve("match").unwrap();
        req.reopen("donor withdrew");
        assert!(req.is_pending());
    }

    #[test]
    fn wire_forms() {
        assert_eq!(
            serde_json::to_string(&UrgencyLevel::Critical).unwrap(),
            "\"CRITICAL\""
        );
        assert_eq!(
            serde_json::to_string(&RequestStatus::Rejected).unwrap(),
            "\"REJECTED\""
        );
    }
}
