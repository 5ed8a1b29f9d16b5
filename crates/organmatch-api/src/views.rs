//! Response shapes that join in display names.

use organmatch_store::Directory;
use organmatch_types::{Match, OrganRequest, UserId};
use serde::{Deserialize, Serialize};

/// A request plus the recipient's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: OrganRequest,
    pub recipient_name: Option<String>,
}

/// A match plus both parties' display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub record: Match,
    pub donor_name: Option<String>,
    pub recipient_name: Option<String>,
}

fn name_of(dir: &impl Directory, id: UserId) -> Option<String> {
    dir.get_user(id).ok().map(|user| user.name)
}

pub fn request_views(dir: &impl Directory, requests: Vec<OrganRequest>) -> Vec<RequestView> {
    requests
        .into_iter()
        .map(|request| RequestView {
            recipient_name: name_of(dir, request.recipient_id),
            request,
        })
        .collect()
}

pub fn match_views(dir: &impl Directory, records: Vec<Match>) -> Vec<MatchView> {
    records
        .into_iter()
        .map(|record| MatchView {
            donor_name: name_of(dir, record.donor_id),
            recipient_name: name_of(dir, record.recipient_id),
            record,
        })
        .collect()
}
