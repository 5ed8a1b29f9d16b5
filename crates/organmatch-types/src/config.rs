//! Configuration types for the OrganMatch service.

use std::{net::SocketAddr, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{OrganmatchError, Result, constants};

/// What happens to the surviving side of a match when the other side's
/// owner is deleted.
///
/// Deleting a user always deletes that user's organs, requests and every
/// match touching them. A match can also hold an organ or request belonging
/// to somebody else; the policy decides what happens to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadePolicy {
    /// Surviving organ goes back to AVAILABLE, surviving request back to
    /// PENDING with an explanatory note.
    #[default]
    Release,
    /// Surviving organ or request is deleted as well.
    Purge,
}

impl std::fmt::Display for CascadePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Release => write!(f, "release"),
            Self::Purge => write!(f, "purge"),
        }
    }
}

impl FromStr for CascadePolicy {
    type Err = OrganmatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "release" => Ok(Self::Release),
            "purge" => Ok(Self::Purge),
            other => Err(OrganmatchError::Configuration(format!(
                "unknown cascade policy {other:?} (expected \"release\" or \"purge\")"
            ))),
        }
    }
}

/// Configuration for one OrganMatch service instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address to listen on for the HTTP API.
    pub listen_addr: SocketAddr,
    /// Note written onto a request when a match approves it.
    pub match_note: String,
    /// Cascade behavior for user deletion.
    pub cascade_policy: CascadePolicy,
    /// Emit JSON log lines instead of human-readable ones.
    pub log_json: bool,
    /// Administrator account ensured at startup. Open registration never
    /// creates administrators.
    #[serde(default)]
    pub admin_username: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], constants::DEFAULT_API_PORT)),
            match_note: constants::DEFAULT_MATCH_NOTE.to_string(),
            cascade_policy: CascadePolicy::default(),
            log_json: false,
            admin_username: None,
        }
    }
}

impl ServiceConfig {
    /// Load from process environment on top of the defaults.
    ///
    /// Recognized variables: `OM_LISTEN_ADDR`, `OM_MATCH_NOTE`,
    /// `OM_CASCADE_POLICY`, `OM_LOG_JSON`, `OM_ADMIN_USERNAME`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] but with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(addr) = lookup("OM_LISTEN_ADDR") {
            cfg.listen_addr = addr.trim().parse().map_err(|_| {
                OrganmatchError::Configuration(format!("OM_LISTEN_ADDR {addr:?} is not host:port"))
            })?;
        }
        if let Some(note) = lookup("OM_MATCH_NOTE") {
            let note = note.trim();
            if note.is_empty() {
                return Err(OrganmatchError::Configuration(
                    "OM_MATCH_NOTE must not be empty".to_string(),
                ));
            }
            cfg.match_note = note.to_string();
        }
        if let Some(policy) = lookup("OM_CASCADE_POLICY") {
            cfg.cascade_policy = policy.parse()?;
        }
        if let Some(flag) = lookup("OM_LOG_JSON") {
            cfg.log_json = matches!(flag.trim(), "1" | "true" | "yes");
        }
        if let Some(username) = lookup("OM_ADMIN_USERNAME") {
            let username = username.trim();
            cfg.admin_username = (!username.is_empty()).then(|| username.to_string());
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.listen_addr.port(), 8000);
        assert_eq!(cfg.match_note, "Matched with compatible donor");
        assert_eq!(cfg.cascade_policy, CascadePolicy::Release);
        assert!(!cfg.log_json);
        assert!(cfg.admin_username.is_none());
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = ServiceConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.listen_addr, ServiceConfig::default().listen_addr);
    }

    #[test]
    fn overrides_apply() {
        let cfg = ServiceConfig::from_lookup(lookup_from(&[
            ("OM_LISTEN_ADDR", "127.0.0.1:9100"),
            ("OM_MATCH_NOTE", "Approved by transplant board"),
            ("OM_CASCADE_POLICY", "PURGE"),
            ("OM_LOG_JSON", "1"),
            ("OM_ADMIN_USERNAME", " root "),
        ]))
        .unwrap();
        assert_eq!(cfg.listen_addr.port(), 9100);
        assert_eq!(cfg.match_note, "Approved by transplant board");
        assert_eq!(cfg.cascade_policy, CascadePolicy::Purge);
        assert!(cfg.log_json);
        assert_eq!(cfg.admin_username.as_deref(), Some("root"));
    }

    #[test]
    fn blank_admin_username_is_unset() {
        let cfg = ServiceConfig::from_lookup(lookup_from(&[("OM_ADMIN_USERNAME", "  ")])).unwrap();
        assert!(cfg.admin_username.is_none());
    }

    #[test]
    fn bad_listen_addr_rejected() {
        let err =
            ServiceConfig::from_lookup(lookup_from(&[("OM_LISTEN_ADDR", "nowhere")])).unwrap_err();
        assert!(matches!(err, OrganmatchError::Configuration(_)));
    }

    #[test]
    fn bad_cascade_policy_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("OM_CASCADE_POLICY", "restrict")]))
            .unwrap_err();
        assert!(err.to_string().contains("OM_ERR_902"));
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = ServiceConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"cascade_policy\":\"release\""));
        let back: ServiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.listen_addr, cfg.listen_addr);
        assert_eq!(back.match_note, cfg.match_note);
    }
}
