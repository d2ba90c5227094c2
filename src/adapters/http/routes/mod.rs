pub mod waitlist;

use axum::Router;

use crate::adapters::http::app_state::AppState;

/// `/signup` and `/verify`, also mounted under `/api/waitlist` where the emailed links point.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(waitlist::router())
        .nest("/api/waitlist", waitlist::router())
}
