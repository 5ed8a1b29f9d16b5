//! Users: administrators, donors and recipients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BloodGroup, UserId};

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[default]
    Donor,
    Recipient,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Donor => write!(f, "DONOR"),
            Self::Recipient => write!(f, "RECIPIENT"),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub age: Option<u16>,
    pub gender: Option<String>,
    pub blood_group: Option<BloodGroup>,
    pub contact: Option<String>,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Registration payload. Blood group stays a raw label until intake parses it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u16>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl User {
    pub fn dummy(role: Role) -> Self {
        let id = UserId::new();
        Self {
            id,
            username: format!("user-{}", id.0.simple()),
            name: format!("{role} {}", &id.0.simple().to_string()[..8]),
            age: None,
            gender: None,
            blood_group: None,
            contact: None,
            role,
            joined_at: Utc::now(),
        }
    }
}
