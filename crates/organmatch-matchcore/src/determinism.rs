//! Candidate root: a digest over an ordered candidate list.
//!
//! Two lookups with no mutation in between must return the same list. The
//! root is logged with each lookup so that can be checked from logs
//! without comparing full payloads.

use organmatch_types::Organ;
use sha2::{Digest, Sha256};

/// SHA-256 over the candidate count and the ordered organ ids.
///
/// The same candidates in the same order always produce the same root.
#[must_use]
pub fn candidate_root(candidates: &[Organ]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"organmatch:candidate_root:v1:");
    hasher.update((candidates.len() as u64).to_le_bytes());

    for organ in candidates {
        hasher.update(organ.id.0.as_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Hex form of [`candidate_root`], as it appears in logs.
#[must_use]
pub fn candidate_root_hex(candidates: &[Organ]) -> String {
    hex::encode(candidate_root(candidates))
}

#[cfg(test)]
mod tests {
    use organmatch_types::{BloodGroup, OrganId};

    use super::*;

    fn organ(seed: u8) -> Organ {
        let mut organ = Organ::dummy("Kidney", BloodGroup::ONeg);
        organ.id = OrganId::from_bytes([seed; 16]);
        organ
    }

    #[test]
    fn empty_list_deterministic() {
        assert_eq!(candidate_root(&[]), candidate_root(&[]));
    }

    #[test]
    fn same_candidates_same_root() {
        let list = vec![organ(1), organ(2)];
        assert_eq!(candidate_root(&list), candidate_root(&list.clone()));
    }

    #[test]
    fn order_matters() {
        let (a, b) = (organ(1), organ(2));
        assert_ne!(
            candidate_root(&[a.clone(), b.clone()]),
            candidate_root(&[b, a]),
            "Order of candidates must affect the root"
        );
    }

    #[test]
    fn only_ids_are_hashed() {
        let a = organ(7);
        let mut b = a.clone();
        b.blood_group = BloodGroup::AbPos;
        assert_eq!(candidate_root(&[a]), candidate_root(&[b]));
    }

    #[test]
    fn hex_form_is_64_chars() {
        let hex = candidate_root_hex(&[organ(1)]);
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
