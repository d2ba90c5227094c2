use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_event::WaitlistEventType,
    use_cases::waitlist::WaitlistEventRepo,
};

#[async_trait]
impl WaitlistEventRepo for PostgresPersistence {
    async fn append(
        &self,
        waitlist_id: Uuid,
        event_type: WaitlistEventType,
        event_data: serde_json::Value,
    ) -> AppResult<()> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO waitlist_events (id, waitlist_id, event_type, event_data)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(waitlist_id)
        .bind(event_type)
        .bind(&event_data)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(())
    }
}
