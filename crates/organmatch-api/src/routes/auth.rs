use axum::{Json, extract::State, http::StatusCode};
use organmatch_types::{NewUser, User};

use crate::{auth::Caller, error::ApiResult, extract::ApiJson, state::AppState};

/// `POST /auth/register`: donors and recipients only.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.gate.register_user(state.store.as_ref(), &input)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /auth/me`
pub async fn me(caller: Caller) -> Json<User> {
    Json(caller.0)
}
