//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by in-memory fakes so
//! routes can be exercised with `axum_test::TestServer`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    application::use_cases::waitlist::{
        EmailSender, WaitlistEventRepo, WaitlistRepo, WaitlistUseCases,
    },
    infra::config::{AppConfig, normalize_base_path},
    test_utils::{InMemoryEmailSender, InMemoryEventRepo, InMemoryWaitlistRepo},
};

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo, events, email) = TestAppStateBuilder::new()
///     .with_trust_proxy(true)
///     .build_with_mocks();
/// ```
pub struct TestAppStateBuilder {
    repo: Option<Arc<dyn WaitlistRepo>>,
    events: Option<Arc<dyn WaitlistEventRepo>>,
    email_sender: Option<Arc<dyn EmailSender>>,
    trust_proxy: bool,
    redirect_base_path: String,
    app_url: Url,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            repo: None,
            events: None,
            email_sender: None,
            trust_proxy: false,
            redirect_base_path: String::new(),
            app_url: Url::parse("http://localhost:3000").expect("valid test url"),
        }
    }

    /// Replace the waitlist repo (e.g. with `FailingWaitlistRepo`).
    pub fn with_repo(mut self, repo: Arc<dyn WaitlistRepo>) -> Self {
        self.repo = Some(repo);
        self
    }

    pub fn with_events(mut self, events: Arc<dyn WaitlistEventRepo>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn with_email_sender(mut self, sender: Arc<dyn EmailSender>) -> Self {
        self.email_sender = Some(sender);
        self
    }

    pub fn with_trust_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    /// Override the public base URL (default `http://localhost:3000`).
    pub fn with_app_url(mut self, app_url: &str) -> Self {
        self.app_url = Url::parse(app_url).expect("valid test url");
        self
    }

    pub fn with_redirect_base_path(mut self, path: &str) -> Self {
        self.redirect_base_path = normalize_base_path(path);
        self
    }

    /// Build with default in-memory fakes for anything not overridden.
    pub fn build(self) -> AppState {
        let repo = self
            .repo
            .clone()
            .unwrap_or_else(|| Arc::new(InMemoryWaitlistRepo::new()) as Arc<dyn WaitlistRepo>);
        let events = self
            .events
            .clone()
            .unwrap_or_else(|| Arc::new(InMemoryEventRepo::new()) as Arc<dyn WaitlistEventRepo>);
        let email = self
            .email_sender
            .clone()
            .unwrap_or_else(|| Arc::new(InMemoryEmailSender::new()) as Arc<dyn EmailSender>);
        self.assemble(repo, events, email)
    }

    /// Build and also hand back the in-memory fakes for assertions.
    /// Overrides set with `with_repo`/`with_events`/`with_email_sender` are ignored.
    pub fn build_with_mocks(
        self,
    ) -> (
        AppState,
        Arc<InMemoryWaitlistRepo>,
        Arc<InMemoryEventRepo>,
        Arc<InMemoryEmailSender>,
    ) {
        let repo = Arc::new(InMemoryWaitlistRepo::new());
        let events = Arc::new(InMemoryEventRepo::new());
        let email = Arc::new(InMemoryEmailSender::new());
        let app_state = self.assemble(repo.clone(), events.clone(), email.clone());
        (app_state, repo, events, email)
    }

    fn assemble(
        self,
        repo: Arc<dyn WaitlistRepo>,
        events: Arc<dyn WaitlistEventRepo>,
        email: Arc<dyn EmailSender>,
    ) -> AppState {
        let config = AppConfig {
            database_url: "postgres://localhost/waitlist_test".to_string(),
            db_max_connections: 1,
            run_migrations: false,
            resend_api_key: SecretString::new("re_test_key".into()),
            email_from: "CaixaHub <noreply@caixahub.test>".to_string(),
            app_url: self.app_url.clone(),
            redirect_base_path: self.redirect_base_path,
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            trust_proxy: self.trust_proxy,
        };

        let use_cases = WaitlistUseCases::new(repo, events, email, self.app_url);

        AppState {
            config: Arc::new(config),
            waitlist_use_cases: Arc::new(use_cases),
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
