//! Intake gate: hard validation for everything entering the directory.
//!
//! ## Design Principles
//!
//! - **Fail-closed**: the first bad field rejects the input
//! - **No bypass**: every registration path goes through the gate
//! - **Normalizing**: strings are trimmed, empty optionals become `None`

use organmatch_store::CreateUser;
use organmatch_types::{
    BloodGroup, NewUser, OrganType, OrganmatchError, Result, UrgencyLevel, constants,
};
use serde::{Deserialize, Serialize};

/// Organ registration payload from a donor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrgan {
    pub organ_type: String,
    pub blood_group: String,
}

/// Request payload from a recipient. Urgency defaults to MEDIUM.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewRequest {
    pub organ_type: String,
    pub blood_group: String,
    #[serde(default)]
    pub urgency_level: Option<UrgencyLevel>,
}

/// Validated organ fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganFields {
    pub organ_type: OrganType,
    pub blood_group: BloodGroup,
}

/// Validated request fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFields {
    pub organ_type: OrganType,
    pub blood_group: BloodGroup,
    pub urgency_level: UrgencyLevel,
}

/// Field limits applied at intake.
#[derive(Debug, Clone)]
pub struct IntakeGate {
    max_username_len: usize,
    max_name_len: usize,
    max_organ_type_len: usize,
    max_gender_len: usize,
    max_contact_len: usize,
    max_age: u16,
}

impl IntakeGate {
    /// Gate with the default limits from [`constants`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_username_len: constants::MAX_USERNAME_LEN,
            max_name_len: constants::MAX_NAME_LEN,
            max_organ_type_len: constants::MAX_ORGAN_TYPE_LEN,
            max_gender_len: constants::MAX_GENDER_LEN,
            max_contact_len: constants::MAX_CONTACT_LEN,
            max_age: constants::MAX_AGE,
        }
    }

    /// Override the oldest accepted age.
    #[must_use]
    pub fn with_max_age(mut self, max_age: u16) -> Self {
        self.max_age = max_age;
        self
    }

    /// Validate a registration payload.
    ///
    /// # Errors
    /// [`OrganmatchError::InvalidField`] for a bad field,
    /// [`OrganmatchError::UnknownBloodGroup`] for an unparseable blood group.
    pub fn validate_user(&self, input: &NewUser) -> Result<CreateUser> {
        // 1. Username: required, bounded, restricted charset
        let username = required("username", &input.username, self.max_username_len)?;
        if let Some(bad) = username
            .chars()
            .find(|c| !(c.is_alphanumeric() || "@.+-_".contains(*c)))
        {
            return Err(OrganmatchError::invalid_field(
                "username",
                format!("character {bad:?} is not allowed"),
            ));
        }

        // 2. Display name
        let name = required("name", &input.name, self.max_name_len)?;

        // 3. Age
        if let Some(age) = input.age.filter(|age| *age > self.max_age) {
            return Err(OrganmatchError::invalid_field(
                "age",
                format!("{age} exceeds maximum {}", self.max_age),
            ));
        }

        // 4. Optional free-text fields
        let gender = optional("gender", input.gender.as_deref(), self.max_gender_len)?;
        let contact = optional("contact", input.contact.as_deref(), self.max_contact_len)?;

        // 5. Blood group, if given, must be one of the eight
        let blood_group = input
            .blood_group
            .as_deref()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::parse::<BloodGroup>)
            .transpose()?;

        Ok(CreateUser {
            username,
            name,
            age: input.age,
            gender,
            blood_group,
            contact,
            role: input.role,
        })
    }

    /// Validate an organ registration payload.
    ///
    /// # Errors
    /// [`OrganmatchError::InvalidField`] for an empty or oversized organ type,
    /// [`OrganmatchError::UnknownBloodGroup`] for an unparseable blood group.
    pub fn validate_organ(&self, input: &NewOrgan) -> Result<OrganFields> {
        Ok(OrganFields {
            organ_type: self.organ_type(&input.organ_type)?,
            blood_group: input.blood_group.parse()?,
        })
    }

    /// Validate a request payload.
    ///
    /// # Errors
    /// Same as [`Self::validate_organ`].
    pub fn validate_request(&self, input: &NewRequest) -> Result<RequestFields> {
        Ok(RequestFields {
            organ_type: self.organ_type(&input.organ_type)?,
            blood_group: input.blood_group.parse()?,
            urgency_level: input.urgency_level.unwrap_or_default(),
        })
    }

    fn organ_type(&self, raw: &str) -> Result<OrganType> {
        required("organ_type", raw, self.max_organ_type_len).map(OrganType::new)
    }
}

impl Default for IntakeGate {
    fn default() -> Self {
        Self::new()
    }
}

fn required(field: &str, raw: &str, max_len: usize) -> Result<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(OrganmatchError::invalid_field(field, "must not be empty"));
    }
    check_len(field, value, max_len)?;
    Ok(value.to_string())
}

fn optional(field: &str, raw: Option<&str>, max_len: usize) -> Result<Option<String>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            check_len(field, value, max_len)?;
            Ok(Some(value.to_string()))
        }
    }
}

fn check_len(field: &str, value: &str, max_len: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(OrganmatchError::invalid_field(
            field,
            format!("{len} characters exceeds maximum {max_len}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use organmatch_types::Role;

    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            name: "Ana Lima".to_string(),
            ..NewUser::default()
        }
    }

    #[test]
    fn valid_user_passes_and_is_normalized() {
        let gate = IntakeGate::new();
        let mut input = new_user("  ana.lima ");
        input.blood_group = Some(" ab- ".to_string());
        input.gender = Some(String::new());
        input.age = Some(34);

        let out = gate.validate_user(&input).unwrap();
        assert_eq!(out.username, "ana.lima");
        assert_eq!(out.blood_group, Some(BloodGroup::AbNeg));
        assert_eq!(out.gender, None);
        assert_eq!(out.age, Some(34));
        assert_eq!(out.role, Role::Donor);
    }

    #[test]
    fn empty_username_rejected() {
        let err = IntakeGate::new().validate_user(&new_user("   ")).unwrap_err();
        assert!(matches!(err, OrganmatchError::InvalidField { ref field, .. } if field == "username"));
    }

    #[test]
    fn username_charset_enforced() {
        let err = IntakeGate::new()
            .validate_user(&new_user("ana lima"))
            .unwrap_err();
        assert!(err.to_string().contains("not allowed"));
    }

    #[test]
    fn age_limit_enforced() {
        let mut input = new_user("old");
        input.age = Some(151);
        assert!(IntakeGate::new().validate_user(&input).is_err());

        input.age = Some(90);
        let strict = IntakeGate::new().with_max_age(80);
        assert!(strict.validate_user(&input).is_err());
    }

    #[test]
    fn unknown_blood_group_rejected() {
        let mut input = new_user("ana");
        input.blood_group = Some("C+".to_string());
        let err = IntakeGate::new().validate_user(&input).unwrap_err();
        assert!(matches!(err, OrganmatchError::UnknownBloodGroup(_)));
    }

    #[test]
    fn oversized_contact_rejected() {
        let mut input = new_user("ana");
        input.contact = Some("0".repeat(21));
        let err = IntakeGate::new().validate_user(&input).unwrap_err();
        assert!(matches!(err, OrganmatchError::InvalidField { ref field, .. } if field == "contact"));
    }

    #[test]
    fn organ_fields_trimmed_and_parsed() {
        let out = IntakeGate::new()
            .validate_organ(&NewOrgan {
                organ_type: " Kidney ".to_string(),
                blood_group: "O-".to_string(),
            })
            .unwrap();
        assert_eq!(out.organ_type.as_str(), "Kidney");
        assert_eq!(out.blood_group, BloodGroup::ONeg);
    }

    #[test]
    fn empty_organ_type_rejected() {
        let err = IntakeGate::new()
            .validate_organ(&NewOrgan {
                organ_type: String::new(),
                blood_group: "O-".to_string(),
            })
            .unwrap_err();
        assert!(err.to_string().starts_with("OM_ERR_200"));
    }

    #[test]
    fn request_urgency_defaults_to_medium() {
        let input: NewRequest =
            serde_json::from_str(r#"{"organ_type":"Liver","blood_group":"B+"}"#).unwrap();
        let out = IntakeGate::new().validate_request(&input).unwrap();
        assert_eq!(out.urgency_level, UrgencyLevel::Medium);

        let input: NewRequest = serde_json::from_str(
            r#"{"organ_type":"Liver","blood_group":"B+","urgency_level":"CRITICAL"}"#,
        )
        .unwrap();
        let out = IntakeGate::new().validate_request(&input).unwrap();
        assert_eq!(out.urgency_level, UrgencyLevel::Critical);
    }
}
