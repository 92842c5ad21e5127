//! Routes under `/profile`.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Self-service profile routes, available to any authenticated user.
///
/// ```text
/// GET /profile/ -> get_profile
/// PUT /profile/ -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/profile/",
        get(profile::get_profile).put(profile::update_profile),
    )
}
