//! Route table.

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod health;
pub mod matches;
pub mod organs;
pub mod requests;

/// Build the full router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Identity
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        // Donor / recipient
        .route("/organs", get(organs::list).post(organs::create))
        .route("/organs/:id", get(organs::get_one).delete(organs::withdraw))
        .route("/requests", get(requests::list).post(requests::create))
        .route("/requests/my", get(requests::mine))
        .route(
            "/requests/:id",
            get(requests::get_one).delete(requests::withdraw),
        )
        // Matching
        .route("/candidates", get(matches::candidates))
        .route("/admin/matches/suggest/:id", get(matches::suggest))
        .route("/matches", get(matches::list).post(matches::commit))
        .route("/matches/:id", get(matches::get_one))
        .route("/admin/matches", get(matches::list).post(matches::commit))
        // Administration
        .route("/admin/requests", get(requests::admin_list))
        .route("/admin/requests/:id/reject", post(requests::reject))
        .route("/admin/stats", get(admin::stats))
        .route("/admin/users", get(admin::users))
        .route("/admin/donors", get(admin::donors))
        .route("/admin/users/:id", delete(admin::delete_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
