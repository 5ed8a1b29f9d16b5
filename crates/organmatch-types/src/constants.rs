//! System-wide constants for the OrganMatch backend.

/// Admin note written onto a request when a match approves it.
pub const DEFAULT_MATCH_NOTE: &str = "Matched with compatible donor";

/// Admin note written onto a request rejected without an explicit note.
pub const DEFAULT_REJECT_NOTE: &str = "Request rejected by administrator";

/// Admin note written onto a request reopened because its match was deleted.
pub const CASCADE_REOPEN_NOTE: &str = "Match withdrawn: counterpart account was removed";

/// Default API listen port.
pub const DEFAULT_API_PORT: u16 = 8000;

/// Header carrying the caller's user id, set by the upstream authenticator.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Maximum username length.
pub const MAX_USERNAME_LEN: usize = 150;

/// Maximum display name length.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum organ type length.
pub const MAX_ORGAN_TYPE_LEN: usize = 100;

/// Maximum gender field length.
pub const MAX_GENDER_LEN: usize = 50;

/// Maximum contact field length.
pub const MAX_CONTACT_LEN: usize = 20;

/// Maximum admin note length.
pub const MAX_ADMIN_NOTE_LEN: usize = 2_000;

/// Oldest age accepted at registration.
pub const MAX_AGE: u16 = 150;

/// Default `RUST_LOG` filter for the server binary.
pub const DEFAULT_LOG_FILTER: &str = "info,organmatch=debug,tower_http=info";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Service name.
pub const SERVICE_NAME: &str = "OrganMatch";
