use std::sync::Arc;

use aeris_core::BookingService;
use aeris_store::{DbClient, PostgresFlightRepository, RedisClient};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbClient>,
    pub redis: Arc<RedisClient>,
    pub flights: Arc<PostgresFlightRepository>,
    pub booking: Arc<BookingService>,
}
