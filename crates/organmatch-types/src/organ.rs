//! Organ types for the OrganMatch backend.
//!
//! ## State Machine
//!
//! ```text
//!   ┌───────────┐  commit_match   ┌─────────┐
//!   │ AVAILABLE ├────────────────▶│ MATCHED │
//!   └───────────┘                 └─────────┘
//! ```
//!
//! The only way back to AVAILABLE is the store's cascade policy releasing an
//! organ whose match was deleted together with the recipient.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BloodGroup, OrganId, OrganmatchError, Result, UserId};

/// Free-form organ category (e.g. "Kidney", "Liver").
///
/// Surrounding whitespace is trimmed on construction and comparison is
/// ASCII case-insensitive, so "kidney" and "Kidney" are the same type.
#[derive(Debug, Clone, Serialize, Deserialize, Eq)]
#[serde(transparent)]
pub struct OrganType(String);

impl OrganType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl PartialEq for OrganType {
    fn eq(&self, other: &Self) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.0.trim())
    }
}

impl Hash for OrganType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.trim().bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl std::fmt::Display for OrganType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrganType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Whether an organ can still be offered to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AvailabilityStatus {
    Available,
    Matched,
}

impl AvailabilityStatus {
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Available, Self::Matched))
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Matched => write!(f, "MATCHED"),
        }
    }
}

/// A donor-registered organ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organ {
    pub id: OrganId,
    pub organ_type: OrganType,
    pub blood_group: BloodGroup,
    pub donor_id: UserId,
    pub availability_status: AvailabilityStatus,
    pub created_at: DateTime<Utc>,
}

impl Organ {
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.availability_status == AvailabilityStatus::Available
    }

    /// AVAILABLE → MATCHED.
    ///
    /// # Errors
    /// Returns [`OrganmatchError::OrganNotAvailable`] if already matched.
    pub fn mark_matched(&mut self) -> Result<()> {
        if !self
            .availability_status
            .can_transition_to(AvailabilityStatus::Matched)
        {
            return Err(OrganmatchError::OrganNotAvailable(self.id));
        }
        self.availability_status = AvailabilityStatus::Matched;
        Ok(())
    }

    /// MATCHED → AVAILABLE. Only the store's cascade policy calls this,
    /// after deleting the match that held the organ.
    pub fn release(&mut self) {
        self.availability_status = AvailabilityStatus::Available;
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Organ {
    pub fn dummy(organ_type: &str, blood_group: BloodGroup) -> Self {
        Self::dummy_for_donor(UserId::new(), organ_type, blood_group)
    }

    pub fn dummy_for_donor(donor_id: UserId, organ_type: &str, blood_group: BloodGroup) -> Self {
        Self {
            id: OrganId::new(),
            organ_type: OrganType::new(organ_type),
            blood_group,
            donor_id,
            availability_status: AvailabilityStatus::Available,
            created_at: Utc::now(),
        }
    }
}
