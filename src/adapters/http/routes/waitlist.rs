//! Public waitlist routes: form signup and the emailed verification link.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::http::{app_state::AppState, client_ip::ClientIp},
    app_error::{AppError, AppResult, FieldError},
    infra::config::AppConfig,
    use_cases::waitlist::{SignupRequest, VerifyOutcome},
};

const SIGNUP_SUCCESS_MESSAGE: &str = "Signup successful! Please check your email.";
const MSG_INVALID_TOKEN: &str = "invalid token";
const MSG_UNKNOWN_TOKEN: &str = "invalid or expired token";
const MSG_VERIFY_FAILED: &str = "error verifying email";

#[derive(Serialize)]
struct SignupResponse {
    success: bool,
    position: i64,
    message: &'static str,
}

#[derive(Deserialize)]
struct VerifyQuery {
    token: Option<String>,
}

/// POST /signup
/// Validates the form, stores the entry and emails the verification link.
async fn signup(
    State(app_state): State<AppState>,
    ClientIp(ip): ClientIp,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::Validation(vec![FieldError::new("body", rejection.body_text())])
    })?;

    let signup = payload.validate()?;
    let outcome = app_state.waitlist_use_cases.signup(signup, &ip).await?;

    Ok(Json(SignupResponse {
        success: true,
        position: outcome.position,
        message: SIGNUP_SUCCESS_MESSAGE,
    }))
}

/// GET /verify?token=...
/// Always answers with a redirect to the success or error page.
async fn verify(
    State(app_state): State<AppState>,
    query: Result<Query<VerifyQuery>, QueryRejection>,
) -> Redirect {
    let config = &app_state.config;

    let token = query
        .ok()
        .and_then(|Query(q)| q.token)
        .filter(|t| !t.trim().is_empty());
    let Some(token) = token else {
        return Redirect::temporary(&page_url(config, "error", &[("message", MSG_INVALID_TOKEN)]));
    };

    match app_state.waitlist_use_cases.verify(token.trim()).await {
        Ok(VerifyOutcome::Verified { position }) => Redirect::temporary(&page_url(
            config,
            "success",
            &[("position", position.to_string().as_str())],
        )),
        Ok(VerifyOutcome::AlreadyVerified) => {
            Redirect::temporary(&page_url(config, "success", &[("already", "true")]))
        }
        Err(AppError::NotFound) => {
            Redirect::temporary(&page_url(config, "error", &[("message", MSG_UNKNOWN_TOKEN)]))
        }
        Err(err) => {
            tracing::error!(error = ?err, "Email verification failed");
            Redirect::temporary(&page_url(config, "error", &[("message", MSG_VERIFY_FAILED)]))
        }
    }
}

/// Absolute URL of a landing page under `APP_URL` and the configured base path.
fn page_url(config: &AppConfig, page: &str, query: &[(&str, &str)]) -> String {
    let mut url = config.app_url.clone();
    let path = format!(
        "{}{}/{}",
        config.app_url.path().trim_end_matches('/'),
        config.redirect_base_path,
        page
    );
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url.to_string()
}

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/verify", get(verify))
}
