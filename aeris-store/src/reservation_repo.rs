use async_trait::async_trait;
use chrono::Utc;
use std::error::Error;
use uuid::Uuid;

use aeris_core::repository::ReservationStore;
use aeris_domain::reservation::Passenger;

pub struct PostgresReservationStore {
    pub pool: sqlx::PgPool,
}

impl PostgresReservationStore {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStore for PostgresReservationStore {
    async fn create_reservation(
        &self,
        flight_id: Uuid,
        passenger: &Passenger,
        seats: i32,
    ) -> Result<Uuid, Box<dyn Error + Send + Sync>> {
        let reservation_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO reservations
                (id, flight_id, family_name, given_name, contact_email, seats, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(reservation_id)
        .bind(flight_id)
        .bind(&passenger.family_name)
        .bind(&passenger.given_name)
        .bind(&passenger.contact_email)
        .bind(seats)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(reservation_id)
    }
}
