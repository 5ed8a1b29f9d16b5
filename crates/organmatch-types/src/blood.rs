//! ABO/Rh blood groups.
//!
//! The wire form is the clinical label (`"O-"`, `"AB+"`, ...). Parsing is
//! closed: anything outside the eight groups is rejected with
//! [`OrganmatchError::UnknownBloodGroup`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::OrganmatchError;

/// One of the eight ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "O-")]
    ONeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "AB+")]
    AbPos,
}

impl BloodGroup {
    /// All groups, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::ONeg,
        Self::OPos,
        Self::ANeg,
        Self::APos,
        Self::BNeg,
        Self::BPos,
        Self::AbNeg,
        Self::AbPos,
    ];

    /// Clinical label, e.g. `"AB+"`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ONeg => "O-",
            Self::OPos => "O+",
            Self::ANeg => "A-",
            Self::APos => "A+",
            Self::BNeg => "B-",
            Self::BPos => "B+",
            Self::AbNeg => "AB-",
            Self::AbPos => "AB+",
        }
    }

    /// Parse a label, returning `None` for anything unknown.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|group| group.label().eq_ignore_ascii_case(label))
    }

    #[must_use]
    pub fn is_rh_negative(self) -> bool {
        matches!(self, Self::ONeg | Self::ANeg | Self::BNeg | Self::AbNeg)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl BloodGroup {
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BloodGroup {
    type Err = OrganmatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| OrganmatchError::UnknownBloodGroup(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip_through_from_str() {
        for group in BloodGroup::ALL {
            assert_eq!(group.label().parse::<BloodGroup>().unwrap(), group);
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(" ab+ ".parse::<BloodGroup>().unwrap(), BloodGroup::AbPos);
    }

    #[test]
    fn unknown_label_rejected() {
        let err = "C+".parse::<BloodGroup>().unwrap_err();
        assert!(matches!(err, OrganmatchError::UnknownBloodGroup(ref s) if s == "C+"));
        assert!(BloodGroup::from_label("").is_none());
        assert!(BloodGroup::from_label("O").is_none());
    }

    #[test]
    fn serde_uses_clinical_labels() {
        let json = serde_json::to_string(&BloodGroup::AbNeg).unwrap();
        assert_eq!(json, "\"AB-\"");
        let back: BloodGroup = serde_json::from_str("\"O+\"").unwrap();
        assert_eq!(back, BloodGroup::OPos);
    }

    #[test]
    fn random_covers_every_group() {
        use rand::{SeedableRng, rngs::StdRng};
        let mut rng = StdRng::seed_from_u64(7);
        let seen: std::collections::HashSet<_> =
            (0..500).map(|_| BloodGroup::random(&mut rng)).collect();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn rh_negative_groups() {
        let negatives: Vec<_> = BloodGroup::ALL
            .into_iter()
            .filter(|g| g.is_rh_negative())
            .collect();
        assert_eq!(negatives.len(), 4);
        assert!(negatives.iter().all(|g| g.label().ends_with('-')));
    }
}
