use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use super::company_size::CompanySize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[sqlx(type_name = "waitlist_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WaitlistStatus {
    Pending,
    Confirmed,
}

/// One signup as stored in the `waitlist` table.
///
/// `priority_score` and `created_at` are fixed at insert time. Only the
/// verification columns and `updated_at` change afterwards.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub company_name: String,
    pub company_size: CompanySize,
    pub phone: Option<String>,
    pub monthly_revenue: Option<String>,
    pub main_bank: Option<String>,
    pub marketing_consent: bool,
    pub terms_accepted: bool,
    pub privacy_policy_accepted: bool,
    pub consent_ip: String,
    pub consent_timestamp: NaiveDateTime,
    pub referral_source: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub priority_score: i32,
    #[serde(skip_serializing)]
    pub verification_token: String,
    pub email_verified: bool,
    pub status: WaitlistStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Everything needed to insert a new row; ids and timestamps come from storage.
#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    pub email: String,
    pub full_name: String,
    pub company_name: String,
    pub company_size: CompanySize,
    pub phone: Option<String>,
    pub monthly_revenue: Option<String>,
    pub main_bank: Option<String>,
    pub marketing_consent: bool,
    pub consent_ip: String,
    pub consent_timestamp: NaiveDateTime,
    pub referral_source: Option<String>,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub priority_score: i32,
    pub verification_token: String,
}
