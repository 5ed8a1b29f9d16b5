use axum::{
    Json,
    extract::{Path, State},
};
use organmatch_matchcore::{CandidateView, describe, find_candidates_for};
use organmatch_settlement::CommitMatch;
use organmatch_store::{Directory, Store};
use organmatch_types::{MatchId, OrganmatchError, RequestId};
use serde::{Deserialize, Serialize};

use crate::{
    auth::Caller,
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    state::AppState,
    views::{MatchView, match_views},
};

#[derive(Debug, Deserialize)]
pub struct CandidateQuery {
    pub request_id: Option<String>,
}

/// `GET /candidates?request_id=`
pub async fn candidates(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(query): ApiQuery<CandidateQuery>,
) -> ApiResult<Json<Vec<CandidateView>>> {
    caller.require_admin()?;
    let raw = query
        .request_id
        .ok_or_else(|| OrganmatchError::invalid_field("request_id", "is required"))?;
    lookup(&state, raw.parse()?)
}

/// `GET /admin/matches/suggest/:id`
pub async fn suggest(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<CandidateView>>> {
    caller.require_admin()?;
    lookup(&state, id.parse()?)
}

/// `GET /matches`: newest first.
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<Vec<MatchView>>> {
    caller.require_admin()?;
    let views = state.store.read(|t| match_views(t, t.list_matches()))?;
    Ok(Json(views))
}

/// `GET /matches/:id`
pub async fn get_one(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<MatchView>> {
    caller.require_admin()?;
    let id: MatchId = id.parse()?;
    let view = state.store.read(|t| {
        t.get_match(id)
            .map(|record| match_views(t, vec![record]).pop())
    })??;
    Ok(Json(view.ok_or(OrganmatchError::MatchNotFound(id))?))
}

#[derive(Debug, Serialize)]
pub struct CommitResponse {
    pub success: bool,
    pub match_id: MatchId,
}

/// `POST /matches`
pub async fn commit(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(pairing): ApiJson<CommitMatch>,
) -> ApiResult<Json<CommitResponse>> {
    caller.require_admin()?;
    let record = state.committer.commit_match(state.store.as_ref(), &pairing)?;
    Ok(Json(CommitResponse {
        success: true,
        match_id: record.id,
    }))
}

fn lookup(state: &AppState, request_id: RequestId) -> ApiResult<Json<Vec<CandidateView>>> {
    let views = state.store.read(|t| {
        find_candidates_for(t, request_id).map(|organs| describe(t, organs))
    })??;
    Ok(Json(views))
}
