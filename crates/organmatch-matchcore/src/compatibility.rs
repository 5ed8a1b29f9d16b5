//! ABO/Rh donor compatibility table.
//!
//! Donor group → recipient groups it may donate to:
//!
//! ```text
//! O-  -> O- O+ A- A+ B- B+ AB- AB+
//! O+  -> O+ A+ B+ AB+
//! A-  -> A- A+ AB- AB+
//! A+  -> A+ AB+
//! B-  -> B- B+ AB- AB+
//! B+  -> B+ AB+
//! AB- -> AB- AB+
//! AB+ -> AB+
//! ```
//!
//! The relation is not symmetric: O- can donate to A+, A+ cannot donate
//! to O-. Every compatibility decision in the workspace goes through this
//! module.

use organmatch_types::BloodGroup::{self, ANeg, APos, AbNeg, AbPos, BNeg, BPos, ONeg, OPos};

/// Recipient groups the donor group may donate to.
#[must_use]
pub fn compatible_recipients(donor: BloodGroup) -> &'static [BloodGroup] {
    match donor {
        ONeg => &[ONeg, OPos, ANeg, APos, BNeg, BPos, AbNeg, AbPos],
        OPos => &[OPos, APos, BPos, AbPos],
        ANeg => &[ANeg, APos, AbNeg, AbPos],
        APos => &[APos, AbPos],
        BNeg => &[BNeg, BPos, AbNeg, AbPos],
        BPos => &[BPos, AbPos],
        AbNeg => &[AbNeg, AbPos],
        AbPos => &[AbPos],
    }
}

/// Same as [`compatible_recipients`] for a raw label. Unknown labels get
/// the empty set.
#[must_use]
pub fn compatible_recipients_for_label(label: &str) -> &'static [BloodGroup] {
    match BloodGroup::from_label(label) {
        Some(donor) => compatible_recipients(donor),
        None => &[],
    }
}

/// Can an organ of group `donor` go to a recipient of group `recipient`?
#[must_use]
pub fn can_donate(donor: BloodGroup, recipient: BloodGroup) -> bool {
    compatible_recipients(donor).contains(&recipient)
}

/// Inverse view: donor groups a recipient of group `recipient` can accept.
#[must_use]
pub fn compatible_donors(recipient: BloodGroup) -> Vec<BloodGroup> {
    BloodGroup::ALL
        .into_iter()
        .filter(|donor| can_donate(*donor, recipient))
        .collect()
}
