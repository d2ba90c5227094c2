use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    adapters::persistence::{PostgresPersistence, unique_violation},
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    use_cases::waitlist::WaitlistRepo,
};

const EMAIL_UNIQUE_CONSTRAINT: &str = "waitlist_email_key";

const SELECT_COLS: &str = r#"
    id, email, full_name, company_name, company_size, phone, monthly_revenue,
    main_bank, marketing_consent, terms_accepted, privacy_policy_accepted,
    consent_ip, consent_timestamp, referral_source, utm_source, utm_medium,
    utm_campaign, priority_score, verification_token, email_verified, status,
    created_at, updated_at
"#;

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert(&self, entry: &NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let id = Uuid::new_v4();
        let result = sqlx::query_as::<_, WaitlistEntry>(&format!(
            r#"
            INSERT INTO waitlist
                (id, email, full_name, company_name, company_size, phone, monthly_revenue,
                 main_bank, marketing_consent, terms_accepted, privacy_policy_accepted,
                 consent_ip, consent_timestamp, referral_source, utm_source, utm_medium,
                 utm_campaign, priority_score, verification_token, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, TRUE, $10, $11, $12, $13, $14,
                    $15, $16, $17, 'pending')
            RETURNING {}
            "#,
            SELECT_COLS
        ))
        .bind(id)
        .bind(&entry.email)
        .bind(&entry.full_name)
        .bind(&entry.company_name)
        .bind(entry.company_size)
        .bind(&entry.phone)
        .bind(&entry.monthly_revenue)
        .bind(&entry.main_bank)
        .bind(entry.marketing_consent)
        .bind(&entry.consent_ip)
        .bind(entry.consent_timestamp)
        .bind(&entry.referral_source)
        .bind(&entry.utm_source)
        .bind(&entry.utm_medium)
        .bind(&entry.utm_campaign)
        .bind(entry.priority_score)
        .bind(&entry.verification_token)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(err) => match unique_violation(&err) {
                Some(constraint) if constraint == EMAIL_UNIQUE_CONSTRAINT => {
                    Err(AppError::AlreadyRegistered)
                }
                _ => Err(AppError::from(err)),
            },
        }
    }

    async fn count_created_up_to(&self, created_at: NaiveDateTime) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM waitlist WHERE created_at <= $1")
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(count)
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<WaitlistEntry>> {
        let row = sqlx::query_as::<_, WaitlistEntry>(&format!(
            "SELECT {} FROM waitlist WHERE verification_token = $1",
            SELECT_COLS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row)
    }

    async fn mark_verified(&self, id: Uuid, now: NaiveDateTime) -> AppResult<bool> {
        let result = sqlx::query(
            r#"UPDATE waitlist
               SET email_verified = TRUE,
                   status = 'confirmed',
                   updated_at = $2
               WHERE id = $1 AND email_verified = FALSE"#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(result.rows_affected() == 1)
    }

    async fn count_verified_up_to(&self, created_at: NaiveDateTime) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM waitlist WHERE email_verified = TRUE AND created_at <= $1",
        )
        .bind(created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(count)
    }
}
