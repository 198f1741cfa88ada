use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub kafka: KafkaConfig,
    pub booking: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    /// Retry ceiling for the optimistic allocation loop.
    #[serde(default = "default_allocation_attempts")]
    pub max_allocation_attempts: u32,
    /// Seconds a cached availability count stays valid in Redis.
    #[serde(default = "default_availability_ttl")]
    pub availability_cache_seconds: u64,
}

fn default_allocation_attempts() -> u32 {
    3
}

fn default_availability_ttl() -> u64 {
    60
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    #[serde(default = "default_booking_topic")]
    pub booking_topic: String,
}

fn default_booking_topic() -> String {
    "reservations.attempted".to_string()
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Layer the current environment file on top; optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment variables with a prefix of AERIS
            // Eg. `AERIS__SERVER__PORT=9000` sets server.port
            .add_source(config::Environment::with_prefix("AERIS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
