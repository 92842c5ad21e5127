//! Routes under `/auth`.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Router for the `/auth` subtree.
///
/// ```text
/// POST /login/          -> login
/// POST /token/refresh/  -> refresh
/// POST /logout/         -> logout (requires auth)
/// POST /register/       -> register
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login/", post(auth::login))
        .route("/token/refresh/", post(auth::refresh))
        .route("/logout/", post(auth::logout))
        .route("/register/", post(auth::register))
}
