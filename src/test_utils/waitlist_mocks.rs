//! In-memory mock implementations for the waitlist ports.

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use std::sync::Mutex;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::waitlist::{EmailSender, WaitlistEventRepo, WaitlistRepo},
    domain::entities::{
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry, WaitlistStatus},
        waitlist_event::{WaitlistEvent, WaitlistEventType},
    },
    test_utils::test_datetime,
};

/// In-memory implementation of WaitlistRepo for testing.
///
/// Rows get strictly increasing `created_at` values (one millisecond apart) so
/// position counts are deterministic.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<Vec<WaitlistEntry>>,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all entries in insertion order (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn next_created_at(entries: &[WaitlistEntry]) -> NaiveDateTime {
        test_datetime() + Duration::milliseconds(entries.len() as i64)
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let mut entries = self.entries.lock().unwrap();

        if entries.iter().any(|e| e.email == entry.email) {
            return Err(AppError::AlreadyRegistered);
        }
        if entries
            .iter()
            .any(|e| e.verification_token == entry.verification_token)
        {
            return Err(AppError::Database("duplicate verification token".into()));
        }

        let created_at = Self::next_created_at(&entries);
        let row = WaitlistEntry {
            id: Uuid::new_v4(),
            email: entry.email.clone(),
            full_name: entry.full_name.clone(),
            company_name: entry.company_name.clone(),
            company_size: entry.company_size,
            phone: entry.phone.clone(),
            monthly_revenue: entry.monthly_revenue.clone(),
            main_bank: entry.main_bank.clone(),
            marketing_consent: entry.marketing_consent,
            terms_accepted: true,
            privacy_policy_accepted: true,
            consent_ip: entry.consent_ip.clone(),
            consent_timestamp: entry.consent_timestamp,
            referral_source: entry.referral_source.clone(),
            utm_source: entry.utm_source.clone(),
            utm_medium: entry.utm_medium.clone(),
            utm_campaign: entry.utm_campaign.clone(),
            priority_score: entry.priority_score,
            verification_token: entry.verification_token.clone(),
            email_verified: false,
            status: WaitlistStatus::Pending,
            created_at,
            updated_at: created_at,
        };
        entries.push(row.clone());
        Ok(row)
    }

    async fn count_created_up_to(&self, created_at: NaiveDateTime) -> AppResult<i64> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.created_at <= created_at)
            .count() as i64)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<WaitlistEntry>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.verification_token == token)
            .cloned())
    }

    async fn mark_verified(&self, id: Uuid, now: NaiveDateTime) -> AppResult<bool> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(AppError::NotFound)?;

        if entry.email_verified {
            return Ok(false);
        }
        entry.email_verified = true;
        entry.status = WaitlistStatus::Confirmed;
        entry.updated_at = now;
        Ok(true)
    }

    async fn count_verified_up_to(&self, created_at: NaiveDateTime) -> AppResult<i64> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.email_verified && e.created_at <= created_at)
            .count() as i64)
    }
}

/// Repo whose every call fails, for dependency-error paths.
#[derive(Default)]
pub struct FailingWaitlistRepo;

#[async_trait]
impl WaitlistRepo for FailingWaitlistRepo {
    async fn insert(&self, _entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn count_created_up_to(&self, _created_at: NaiveDateTime) -> AppResult<i64> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn find_by_token(&self, _token: &str) -> AppResult<Option<WaitlistEntry>> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn mark_verified(&self, _id: Uuid, _now: NaiveDateTime) -> AppResult<bool> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn count_verified_up_to(&self, _created_at: NaiveDateTime) -> AppResult<i64> {
        Err(AppError::Database("connection refused".into()))
    }
}

/// Repo where another request always confirms the entry first: reads see it
/// unverified, but the conditional update matches no row.
#[derive(Default)]
pub struct LostRaceWaitlistRepo {
    pub inner: InMemoryWaitlistRepo,
}

impl LostRaceWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WaitlistRepo for LostRaceWaitlistRepo {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        self.inner.insert(entry).await
    }

    async fn count_created_up_to(&self, created_at: NaiveDateTime) -> AppResult<i64> {
        self.inner.count_created_up_to(created_at).await
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<WaitlistEntry>> {
        self.inner.find_by_token(token).await
    }

    async fn mark_verified(&self, _id: Uuid, _now: NaiveDateTime) -> AppResult<bool> {
        Ok(false)
    }

    async fn count_verified_up_to(&self, created_at: NaiveDateTime) -> AppResult<i64> {
        self.inner.count_verified_up_to(created_at).await
    }
}

/// In-memory implementation of WaitlistEventRepo for testing.
#[derive(Default)]
pub struct InMemoryEventRepo {
    pub events: Mutex<Vec<WaitlistEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_all(&self) -> Vec<WaitlistEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl WaitlistEventRepo for InMemoryEventRepo {
    async fn append(
        &self,
        waitlist_id: Uuid,
        event_type: WaitlistEventType,
        event_data: serde_json::Value,
    ) -> AppResult<()> {
        self.events.lock().unwrap().push(WaitlistEvent {
            id: Uuid::new_v4(),
            waitlist_id,
            event_type,
            event_data,
            created_at: chrono::Utc::now().naive_utc(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct FailingEventRepo;

#[async_trait]
impl WaitlistEventRepo for FailingEventRepo {
    async fn append(
        &self,
        _waitlist_id: Uuid,
        _event_type: WaitlistEventType,
        _event_data: serde_json::Value,
    ) -> AppResult<()> {
        Err(AppError::Database("connection refused".into()))
    }
}

#[derive(Debug, Clone)]
pub struct CapturedEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Email sender that records every message instead of sending it.
#[derive(Default)]
pub struct InMemoryEmailSender {
    pub sent: Mutex<Vec<CapturedEmail>>,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured_emails(&self) -> Vec<CapturedEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for InMemoryEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        self.sent.lock().unwrap().push(CapturedEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    async fn send(&self, _to: &str, _subject: &str, _html: &str) -> AppResult<()> {
        Err(AppError::Email("Email API error: 503".into()))
    }
}
