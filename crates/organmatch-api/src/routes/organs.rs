use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use organmatch_ingress::NewOrgan;
use organmatch_matchcore::{CandidateView, describe};
use organmatch_store::{Directory, OrganFilter, Store};
use organmatch_types::{BloodGroup, Organ, OrganId, OrganType, OrganmatchError, Role};
use serde::Deserialize;

use crate::{
    auth::Caller,
    error::ApiResult,
    extract::{ApiJson, ApiQuery},
    state::AppState,
};

/// `?type=&bloodGroup=`. Blank values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct OrganQuery {
    #[serde(rename = "type")]
    pub organ_type: Option<String>,
    #[serde(rename = "bloodGroup")]
    pub blood_group: Option<String>,
}

/// `GET /organs`: AVAILABLE organs, optionally filtered.
pub async fn list(
    State(state): State<AppState>,
    _caller: Caller,
    ApiQuery(query): ApiQuery<OrganQuery>,
) -> ApiResult<Json<Vec<CandidateView>>> {
    let mut filter = OrganFilter::available();
    if let Some(organ_type) = non_blank(query.organ_type.as_deref()) {
        filter = filter.with_type(OrganType::new(organ_type));
    }
    if let Some(label) = non_blank(query.blood_group.as_deref()) {
        // An unknown label matches nothing.
        let Some(group) = BloodGroup::from_label(label) else {
            return Ok(Json(Vec::new()));
        };
        filter = filter.with_blood_group(group);
    }

    let views = state
        .store
        .read(|t| describe(t, t.list_organs(&filter)))?;
    Ok(Json(views))
}

/// `POST /organs`: donors only.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(input): ApiJson<NewOrgan>,
) -> ApiResult<(StatusCode, Json<Organ>)> {
    caller.require_role(Role::Donor)?;
    let organ = state
        .gate
        .register_organ(state.store.as_ref(), caller.id(), &input)?;
    Ok((StatusCode::CREATED, Json(organ)))
}

/// `GET /organs/:id`: the donor and admins see any status, everyone else
/// only AVAILABLE organs.
pub async fn get_one(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<CandidateView>> {
    let id: OrganId = id.parse()?;
    let organ = state.store.read(|t| t.get_organ(id))??;
    let visible =
        organ.is_available() || organ.donor_id == caller.id() || caller.user().is_admin();
    if !visible {
        return Err(OrganmatchError::OrganNotFound(id).into());
    }
    let view = state
        .store
        .read(|t| describe(t, vec![organ]).pop())?
        .ok_or(OrganmatchError::OrganNotFound(id))?;
    Ok(Json(view))
}

/// `DELETE /organs/:id`: the donor withdraws an AVAILABLE organ.
pub async fn withdraw(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id: OrganId = id.parse()?;
    state
        .gate
        .withdraw_organ(state.store.as_ref(), caller.id(), id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
