use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::QueryBuilder;
use std::error::Error;
use uuid::Uuid;

use aeris_core::repository::{ConditionalWrite, FlightInventory, InventoryStore};
use aeris_domain::flight::{Flight, FlightOption, FlightQuery, FlightSort, NewFlight};

use crate::redis_repo::RedisClient;

pub struct PostgresFlightRepository {
    pub pool: sqlx::PgPool,
    pub redis: RedisClient,
    pub availability_cache_seconds: u64,
}

#[derive(Debug, sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    origin_city: String,
    destination_city: String,
    price_amount: i32,
    price_currency: String,
    duration_minutes: i32,
    capacity: i32,
    booked: i32,
}

impl PostgresFlightRepository {
    pub fn new(pool: sqlx::PgPool, redis: RedisClient, availability_cache_seconds: u64) -> Self {
        Self {
            pool,
            redis,
            availability_cache_seconds,
        }
    }

    /// Create a batch of flights inside one transaction. Every flight starts
    /// with `booked = 0` and `version = 0`.
    pub async fn create_flights(
        &self,
        requests: Vec<NewFlight>,
    ) -> Result<Vec<Flight>, Box<dyn Error + Send + Sync>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(requests.len());

        for req in requests {
            let now = Utc::now();
            let flight = Flight {
                id: Uuid::new_v4(),
                departure_time: req.departure_time,
                arrival_time: req.arrival_time,
                origin_city: req.origin_city,
                destination_city: req.destination_city,
                price_amount: req.price_amount,
                price_currency: req.price_currency,
                duration_minutes: req.duration_minutes,
                capacity: req.capacity,
                booked: 0,
                version: 0,
                created_at: now,
                updated_at: now,
            };

            sqlx::query(
                r#"
                INSERT INTO flights
                    (id, departure_time, arrival_time, origin_city, destination_city,
                     price_amount, price_currency, duration_minutes, capacity, booked,
                     version, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                "#,
            )
            .bind(flight.id)
            .bind(flight.departure_time)
            .bind(flight.arrival_time)
            .bind(&flight.origin_city)
            .bind(&flight.destination_city)
            .bind(flight.price_amount)
            .bind(&flight.price_currency)
            .bind(flight.duration_minutes)
            .bind(flight.capacity)
            .bind(flight.booked)
            .bind(flight.version)
            .bind(flight.created_at)
            .bind(flight.updated_at)
            .execute(&mut *tx)
            .await?;

            created.push(flight);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Filtered flight listing with remaining seat counts.
    ///
    /// Availability is served from the Redis cache when present and seeded
    /// from the row on a miss; the cache is evicted whenever a booking
    /// commits seats, so staleness is bounded to the TTL.
    pub async fn search_flights(
        &self,
        query: &FlightQuery,
    ) -> Result<Vec<FlightOption>, Box<dyn Error + Send + Sync>> {
        let mut builder = QueryBuilder::new(
            "SELECT id, departure_time, arrival_time, origin_city, destination_city, \
             price_amount, price_currency, duration_minutes, capacity, booked \
             FROM flights WHERE 1 = 1",
        );

        if let Some(origin) = &query.origin_city {
            builder
                .push(" AND lower(origin_city) LIKE ")
                .push_bind(format!("%{}%", origin.to_lowercase()));
        }
        if let Some(destination) = &query.destination_city {
            builder
                .push(" AND lower(destination_city) LIKE ")
                .push_bind(format!("%{}%", destination.to_lowercase()));
        }
        if let Some(date) = query.departure_date {
            builder
                .push(" AND departure_time::date = ")
                .push_bind(date);
        }

        match query.sort {
            Some(FlightSort::Price) => {
                builder.push(" ORDER BY price_amount ASC");
            }
            Some(FlightSort::Departure) | None => {
                builder.push(" ORDER BY departure_time ASC");
            }
        }

        let rows: Vec<FlightRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        let mut options = Vec::with_capacity(rows.len());
        for row in rows {
            let cached = self
                .redis
                .get_flight_availability(&row.id.to_string())
                .await
                .ok()
                .flatten();

            let available_seats = match cached {
                Some(count) => count,
                None => {
                    let count = row.capacity - row.booked;
                    let _ = self
                        .redis
                        .set_flight_availability(
                            &row.id.to_string(),
                            count,
                            self.availability_cache_seconds,
                        )
                        .await;
                    count
                }
            };

            options.push(FlightOption {
                flight_id: row.id,
                departure_time: row.departure_time,
                arrival_time: row.arrival_time,
                origin_city: row.origin_city,
                destination_city: row.destination_city,
                price_amount: row.price_amount,
                price_currency: row.price_currency,
                duration_minutes: row.duration_minutes,
                available_seats,
            });
        }

        Ok(options)
    }
}

#[async_trait]
impl InventoryStore for PostgresFlightRepository {
    async fn read_flight(
        &self,
        flight_id: Uuid,
    ) -> Result<Option<FlightInventory>, Box<dyn Error + Send + Sync>> {
        let row: Option<(i32, i32, i64)> =
            sqlx::query_as("SELECT capacity, booked, version FROM flights WHERE id = $1")
                .bind(flight_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(capacity, booked, version)| FlightInventory {
            capacity,
            booked,
            version,
        }))
    }

    async fn update_booked(
        &self,
        flight_id: Uuid,
        expected_version: i64,
        new_booked: i32,
    ) -> Result<ConditionalWrite, Box<dyn Error + Send + Sync>> {
        // The version predicate makes this a compare-and-swap: zero rows
        // updated means the row changed since it was read, or is gone.
        let updated: Option<(i64,)> = sqlx::query_as(
            r#"
            UPDATE flights
            SET booked = $1, version = version + 1, updated_at = now()
            WHERE id = $2 AND version = $3
            RETURNING version
            "#,
        )
        .bind(new_booked)
        .bind(flight_id)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await?;

        if let Some((new_version,)) = updated {
            return Ok(ConditionalWrite::Applied { new_version });
        }

        let exists: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM flights WHERE id = $1")
            .bind(flight_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(if exists.is_some() {
            ConditionalWrite::VersionMismatch
        } else {
            ConditionalWrite::NotFound
        })
    }
}
