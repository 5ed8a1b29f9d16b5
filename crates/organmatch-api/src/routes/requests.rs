use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use organmatch_ingress::NewRequest;
use organmatch_settlement::reject_request;
use organmatch_store::{Directory, RequestFilter, Store};
use organmatch_types::{OrganRequest, OrganmatchError, RequestId, Role};
use serde::Deserialize;

use crate::{
    auth::Caller,
    error::ApiResult,
    extract::ApiJson,
    state::AppState,
    views::{RequestView, request_views},
};

/// `GET /requests`: admins see the whole queue, everyone else their own.
pub async fn list(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<Vec<RequestView>>> {
    let filter = if caller.user().is_admin() {
        RequestFilter::default()
    } else {
        RequestFilter::for_recipient(caller.id())
    };
    listing(&state, &filter)
}

/// `GET /requests/my`
pub async fn mine(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<Vec<RequestView>>> {
    listing(&state, &RequestFilter::for_recipient(caller.id()))
}

/// `GET /admin/requests`: every request, most urgent first.
pub async fn admin_list(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<Vec<RequestView>>> {
    caller.require_admin()?;
    listing(&state, &RequestFilter::default())
}

/// `POST /requests`: recipients only.
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(input): ApiJson<NewRequest>,
) -> ApiResult<(StatusCode, Json<OrganRequest>)> {
    caller.require_role(Role::Recipient)?;
    let request = state
        .gate
        .file_request(state.store.as_ref(), caller.id(), &input)?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[derive(Debug, Default, Deserialize)]
pub struct RejectBody {
    #[serde(default)]
    pub admin_note: Option<String>,
}

/// `POST /admin/requests/:id/reject`
pub async fn reject(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    body: Option<ApiJson<RejectBody>>,
) -> ApiResult<Json<OrganRequest>> {
    caller.require_admin()?;
    let id: RequestId = id.parse()?;
    let note = body.and_then(|ApiJson(body)| body.admin_note);
    let request = reject_request(state.store.as_ref(), id, note.as_deref())?;
    Ok(Json(request))
}

/// `GET /requests/:id`: the recipient and admins only.
pub async fn get_one(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<RequestView>> {
    let id: RequestId = id.parse()?;
    let view = state.store.read(|t| {
        t.get_request(id)
            .map(|request| request_views(t, vec![request]).pop())
    })??;
    match view {
        Some(view) if view.request.recipient_id == caller.id() || caller.user().is_admin() => {
            Ok(Json(view))
        }
        _ => Err(OrganmatchError::RequestNotFound(id).into()),
    }
}

/// `DELETE /requests/:id`: the recipient cancels a request no match holds.
pub async fn withdraw(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id: RequestId = id.parse()?;
    state
        .gate
        .withdraw_request(state.store.as_ref(), caller.id(), id)?;
    Ok(StatusCode::NO_CONTENT)
}

fn listing(state: &AppState, filter: &RequestFilter) -> ApiResult<Json<Vec<RequestView>>> {
    let views = state
        .store
        .read(|t| request_views(t, t.list_requests(filter)))?;
    Ok(Json(views))
}
