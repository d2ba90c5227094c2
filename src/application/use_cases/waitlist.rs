use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult, FieldError},
    application::{
        email_templates::{self, WelcomeEmail},
        priority_score::{ScoreInputs, priority_score},
        validators::{has_min_chars, is_valid_email, is_valid_phone, normalize_optional},
    },
    domain::entities::{
        company_size::CompanySize,
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
        waitlist_event::WaitlistEventType,
    },
};

/// Signups that predate this table. The first row in the table is shown as #77.
pub const POSITION_OFFSET: i64 = 76;

/// Raw verification tokens are 32 random bytes, hex encoded.
pub const VERIFICATION_TOKEN_BYTES: usize = 32;

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    /// Inserts a new row. A duplicate email yields `AppError::AlreadyRegistered`.
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry>;
    async fn count_created_up_to(&self, created_at: NaiveDateTime) -> AppResult<i64>;
    async fn find_by_token(&self, token: &str) -> AppResult<Option<WaitlistEntry>>;
    /// Flips a pending entry to confirmed. Returns `false` when it was already verified.
    async fn mark_verified(&self, id: Uuid, now: NaiveDateTime) -> AppResult<bool>;
    async fn count_verified_up_to(&self, created_at: NaiveDateTime) -> AppResult<i64>;
}

#[async_trait]
pub trait WaitlistEventRepo: Send + Sync {
    async fn append(
        &self,
        waitlist_id: Uuid,
        event_type: WaitlistEventType,
        event_data: serde_json::Value,
    ) -> AppResult<()>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

/// Signup payload as posted by the landing page form.
///
/// Required fields are still `Option` so a missing field is reported next to
/// the other field errors instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub company_size: Option<String>,
    pub phone: Option<String>,
    pub monthly_revenue: Option<String>,
    pub main_bank: Option<String>,
    pub marketing_consent: Option<bool>,
    pub referral_source: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub email: String,
    pub full_name: String,
    pub company_name: String,
    pub company_size: CompanySize,
    pub phone: Option<String>,
    pub monthly_revenue: Option<String>,
    pub main_bank: Option<String>,
    pub marketing_consent: bool,
    pub referral_source: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

impl SignupRequest {
    /// Checks every field and reports all failures at once.
    pub fn validate(self) -> AppResult<ValidSignup> {
        let mut errors = Vec::new();

        let email = self.email.unwrap_or_default().trim().to_lowercase();
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "Invalid email"));
        }

        let full_name = self.full_name.unwrap_or_default().trim().to_string();
        if !has_min_chars(&full_name, 3) {
            errors.push(FieldError::new(
                "fullName",
                "Name must be at least 3 characters",
            ));
        }

        let company_name = self.company_name.unwrap_or_default().trim().to_string();
        if !has_min_chars(&company_name, 2) {
            errors.push(FieldError::new(
                "companyName",
                "Company name must be at least 2 characters",
            ));
        }

        let company_size = match self.company_size.as_deref().map(str::parse::<CompanySize>) {
            Some(Ok(size)) => Some(size),
            Some(Err(_)) => {
                errors.push(FieldError::new(
                    "companySize",
                    "Company size must be one of: micro, small, medium",
                ));
                None
            }
            None => {
                errors.push(FieldError::new("companySize", "Company size is required"));
                None
            }
        };

        let phone = normalize_optional(self.phone);
        if let Some(phone) = &phone
            && !is_valid_phone(phone)
        {
            errors.push(FieldError::new(
                "phone",
                "Invalid phone format. Use: (11) 99999-9999",
            ));
        }

        match company_size {
            Some(company_size) if errors.is_empty() => Ok(ValidSignup {
                email,
                full_name,
                company_name,
                company_size,
                phone,
                monthly_revenue: normalize_optional(self.monthly_revenue),
                main_bank: normalize_optional(self.main_bank),
                marketing_consent: self.marketing_consent.unwrap_or(false),
                referral_source: normalize_optional(self.referral_source),
                utm_source: normalize_optional(self.utm_source),
                utm_medium: normalize_optional(self.utm_medium),
                utm_campaign: normalize_optional(self.utm_campaign),
            }),
            _ => Err(AppError::Validation(errors)),
        }
    }
}

impl ValidSignup {
    pub fn priority_score(&self) -> i32 {
        priority_score(ScoreInputs {
            company_size: self.company_size,
            monthly_revenue: self.monthly_revenue.as_deref(),
            has_phone: self.phone.is_some(),
            has_main_bank: self.main_bank.is_some(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub position: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Newly confirmed; position among verified signups.
    Verified { position: i64 },
    AlreadyVerified,
}

#[derive(Clone)]
pub struct WaitlistUseCases {
    repo: Arc<dyn WaitlistRepo>,
    events: Arc<dyn WaitlistEventRepo>,
    email: Arc<dyn EmailSender>,
    app_url: Url,
}

impl WaitlistUseCases {
    pub fn new(
        repo: Arc<dyn WaitlistRepo>,
        events: Arc<dyn WaitlistEventRepo>,
        email: Arc<dyn EmailSender>,
        app_url: Url,
    ) -> Self {
        Self {
            repo,
            events,
            email,
            app_url,
        }
    }

    #[instrument(skip_all)]
    pub async fn signup(&self, signup: ValidSignup, consent_ip: &str) -> AppResult<SignupOutcome> {
        let score = signup.priority_score();
        let token = generate_token();

        let new_entry = NewWaitlistEntry {
            email: signup.email,
            full_name: signup.full_name,
            company_name: signup.company_name,
            company_size: signup.company_size,
            phone: signup.phone,
            monthly_revenue: signup.monthly_revenue,
            main_bank: signup.main_bank,
            marketing_consent: signup.marketing_consent,
            consent_ip: consent_ip.to_string(),
            consent_timestamp: Utc::now().naive_utc(),
            referral_source: signup.referral_source,
            utm_source: signup.utm_source,
            utm_medium: signup.utm_medium,
            utm_campaign: signup.utm_campaign,
            priority_score: score,
            verification_token: token,
        };

        let entry = self.repo.insert(&new_entry).await?;

        let count = self.repo.count_created_up_to(entry.created_at).await?;
        let position = count.max(1) + POSITION_OFFSET;

        // The row is committed at this point; mail and audit failures are logged only.
        let verification_url = self.verification_url(&entry.verification_token);
        let referral_url = email_templates::referral_url(&self.app_url, &entry.email);
        let (subject, html) = email_templates::waitlist_welcome_email(&WelcomeEmail {
            full_name: &entry.full_name,
            company_name: &entry.company_name,
            position,
            verification_url: &verification_url,
            referral_url: &referral_url,
        });
        if let Err(err) = self.email.send(&entry.email, &subject, &html).await {
            tracing::error!(error = %err, waitlist_id = %entry.id, "Failed to send welcome email");
        }

        let event_data = serde_json::json!({
            "priority_score": score,
            "has_phone": entry.phone.is_some(),
            "marketing_consent": entry.marketing_consent,
        });
        if let Err(err) = self
            .events
            .append(entry.id, WaitlistEventType::Signup, event_data)
            .await
        {
            tracing::warn!(error = %err, waitlist_id = %entry.id, "Failed to record signup event");
        }

        tracing::info!(
            waitlist_id = %entry.id,
            position,
            priority_score = score,
            company_size = %entry.company_size,
            "Waitlist signup"
        );

        Ok(SignupOutcome { position })
    }

    #[instrument(skip_all)]
    pub async fn verify(&self, token: &str) -> AppResult<VerifyOutcome> {
        if !is_well_formed_token(token) {
            return Err(AppError::NotFound);
        }

        let entry = self
            .repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::NotFound)?;

        if entry.email_verified {
            return Ok(VerifyOutcome::AlreadyVerified);
        }

        let now = Utc::now().naive_utc();
        if !self.repo.mark_verified(entry.id, now).await? {
            // Another request confirmed it between our read and the update.
            return Ok(VerifyOutcome::AlreadyVerified);
        }

        let event_data = serde_json::json!({ "verified_at": now.and_utc().to_rfc3339() });
        if let Err(err) = self
            .events
            .append(entry.id, WaitlistEventType::Verify, event_data)
            .await
        {
            tracing::warn!(error = %err, waitlist_id = %entry.id, "Failed to record verify event");
        }

        let position = self.repo.count_verified_up_to(entry.created_at).await?;

        tracing::info!(waitlist_id = %entry.id, position, "Waitlist email verified");

        Ok(VerifyOutcome::Verified { position })
    }

    fn verification_url(&self, token: &str) -> String {
        let mut url = self.app_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "waitlist", "verify"]);
        }
        url.query_pairs_mut().append_pair("token", token);
        url.to_string()
    }
}

fn generate_token() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; VERIFICATION_TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn is_well_formed_token(token: &str) -> bool {
    token.len() == VERIFICATION_TOKEN_BYTES * 2 && token.chars().all(|c| c.is_ascii_hexdigit())
}
