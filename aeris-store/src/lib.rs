pub mod app_config;
pub mod audit_repo;
pub mod database;
pub mod events;
pub mod flight_repo;
pub mod redis_repo;
pub mod reservation_repo;

pub use audit_repo::PostgresAuditSink;
pub use database::DbClient;
pub use events::EventProducer;
pub use flight_repo::PostgresFlightRepository;
pub use redis_repo::RedisClient;
pub use reservation_repo::PostgresReservationStore;
