use axum::{
    Json,
    extract::{Path, State},
};
use organmatch_store::{
    CascadeReport, Directory, DirectoryMut, DirectoryStats, Store, UserFilter, stats as count,
};
use organmatch_types::{Role, User, UserId};
use serde::Serialize;

use crate::{auth::Caller, error::ApiResult, state::AppState};

/// `GET /admin/stats`
pub async fn stats(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<DirectoryStats>> {
    caller.require_admin()?;
    Ok(Json(state.store.read(count)?))
}

/// `GET /admin/users`: everyone except administrators.
pub async fn users(State(state): State<AppState>, caller: Caller) -> ApiResult<Json<Vec<User>>> {
    caller.require_admin()?;
    Ok(Json(
        state.store.read(|t| t.list_users(&UserFilter::non_admins()))?,
    ))
}

/// `GET /admin/donors`
pub async fn donors(State(state): State<AppState>, caller: Caller) -> ApiResult<Json<Vec<User>>> {
    caller.require_admin()?;
    Ok(Json(
        state
            .store
            .read(|t| t.list_users(&UserFilter::with_role(Role::Donor)))?,
    ))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub report: CascadeReport,
}

/// `DELETE /admin/users/:id`: cascade per the configured policy.
pub async fn delete_user(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    caller.require_admin()?;
    let id: UserId = id.parse()?;
    let report = state
        .store
        .transaction(|t| t.delete_user(id, state.cascade_policy))?;
    Ok(Json(DeleteResponse {
        success: true,
        report,
    }))
}
