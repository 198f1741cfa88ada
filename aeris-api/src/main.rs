use std::net::SocketAddr;
use std::sync::Arc;

use aeris_api::{app, state::AppState};
use aeris_core::BookingService;
use aeris_store::{
    DbClient, EventProducer, PostgresAuditSink, PostgresFlightRepository,
    PostgresReservationStore, RedisClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aeris_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = aeris_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Aeris API on port {}", config.server.port);

    // Postgres
    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");
    let db_arc = Arc::new(db);

    // Redis
    let redis_client = RedisClient::new(&config.redis.url)
        .await
        .expect("Failed to connect to Redis");
    let redis_arc = Arc::new(redis_client);

    // Kafka
    let kafka_producer = EventProducer::new(&config.kafka.brokers, &config.kafka.booking_topic)
        .expect("Failed to create Kafka producer");

    let flight_repo = Arc::new(PostgresFlightRepository::new(
        db_arc.pool.clone(),
        (*redis_arc).clone(),
        config.booking.availability_cache_seconds,
    ));

    let booking = Arc::new(BookingService::new(
        flight_repo.clone(),
        Arc::new(PostgresReservationStore::new(db_arc.pool.clone())),
        Arc::new(PostgresAuditSink::new(db_arc.pool.clone())),
        Arc::new(kafka_producer),
        config.booking.max_allocation_attempts,
    ));

    let app_state = AppState {
        db: db_arc,
        redis: redis_arc,
        flights: flight_repo,
        booking,
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
