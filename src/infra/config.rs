use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use url::Url;

pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    /// Apply the bundled SQL migrations at start-up.
    pub run_migrations: bool,
    pub resend_api_key: SecretString,
    pub email_from: String,
    /// Public base URL used for verification, referral and redirect links.
    pub app_url: Url,
    /// Prefix for the success/error pages, e.g. "/waitlist". Empty means site root.
    pub redirect_base_path: String,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
    /// Whether to trust X-Forwarded-For headers when recording the consent IP.
    /// Only enable this when the API sits behind a reverse proxy.
    pub trust_proxy: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url: String = get_env("DATABASE_URL");
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);
        let run_migrations: bool = get_env_default("RUN_MIGRATIONS", false);

        let resend_api_key: SecretString =
            SecretString::new(get_env::<String>("RESEND_API_KEY").into());
        let email_from: String = get_env_default(
            "EMAIL_FROM",
            "CaixaHub <noreply@caixahub.com.br>".to_string(),
        );

        let app_url: Url = get_env("APP_URL");
        let redirect_base_path =
            normalize_base_path(&get_env_default("REDIRECT_BASE_PATH", String::new()));
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3001)),
        );
        // Default to false: forwarded headers are client-controlled without a proxy
        let trust_proxy: bool = get_env_default("TRUST_PROXY", false);

        Self {
            database_url,
            db_max_connections,
            run_migrations,
            resend_api_key,
            email_from,
            app_url,
            redirect_base_path,
            cors_origin,
            bind_addr,
            trust_proxy,
        }
    }
}

/// "waitlist/" and "/waitlist" both become "/waitlist"; "/" becomes "".
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
