use async_trait::async_trait;
use std::error::Error;

use aeris_core::repository::AuditSink;
use aeris_domain::audit::AuditRecord;

/// Append-only audit trail. The table carries no foreign key to flights so
/// attempts against unknown flight ids remain recordable.
pub struct PostgresAuditSink {
    pub pool: sqlx::PgPool,
}

impl PostgresAuditSink {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PostgresAuditSink {
    async fn append(&self, record: &AuditRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO audit_log
                (id, recorded_at, flight_id, contact_email, seats_requested,
                 booked_before, outcome, error_detail, reservation_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(record.id)
        .bind(record.recorded_at)
        .bind(record.flight_id)
        .bind(&record.contact_email)
        .bind(record.seats_requested)
        .bind(record.booked_before)
        .bind(record.outcome.as_str())
        .bind(&record.error_detail)
        .bind(record.reservation_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
