//! Match records produced by the match committer.
//!
//! A [`Match`] is the immutable record of an organ committed to a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MatchId, OrganId, OrganType, RequestId, UserId};

/// Lifecycle status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchStatus {
    Pending,
    Completed,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// The committed pairing of one organ to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub donor_id: UserId,
    pub recipient_id: UserId,
    pub organ_id: OrganId,
    pub request_id: RequestId,
    pub organ_type: OrganType,
    pub status: MatchStatus,
    pub matched_on: DateTime<Utc>,
}

impl Match {
    /// Does this match hold the given user on either side?
    #[must_use]
    pub fn involves_user(&self, user_id: UserId) -> bool {
        self.donor_id == user_id || self.recipient_id == user_id
    }
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Match[{}] {} organ {} -> request {} ({})",
            self.id, self.organ_type, self.organ_id, self.request_id, self.status,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_match(status: MatchStatus) -> Match {
        Match {
            id: MatchId::new(),
            donor_id: UserId::new(),
            recipient_id: UserId::new(),
            organ_id: OrganId::new(),
            request_id: RequestId::new(),
            organ_type: OrganType::new("Kidney"),
            status,
            matched_on: Utc::now(),
        }
    }

    #[test]
    fn involves_both_parties() {
        let m = make_match(MatchStatus::Completed);
        assert!(m.involves_user(m.donor_id));
        assert!(m.involves_user(m.recipient_id));
        assert!(!m.involves_user(UserId::new()));
    }

    #[test]
    fn match_display() {
        let m = make_match(MatchStatus::Completed);
        let s = format!("{m}");
        assert!(s.contains("Kidney"));
        assert!(s.contains("COMPLETED"));
    }
}
