use redis::{AsyncCommands, RedisResult};
use tracing::info;

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    pub async fn get_flight_availability(&self, flight_id: &str) -> RedisResult<Option<i32>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = format!("flight:{}:availability", flight_id);
        conn.get(key).await
    }

    pub async fn set_flight_availability(
        &self,
        flight_id: &str,
        count: i32,
        ttl_seconds: u64,
    ) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = format!("flight:{}:availability", flight_id);
        conn.set_ex::<_, _, ()>(key, count, ttl_seconds).await?;
        Ok(())
    }

    /// Drop the cached count after a booking commits seats so the next
    /// search re-seeds it from the row.
    pub async fn delete_flight_availability(&self, flight_id: &str) -> RedisResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = format!("flight:{}:availability", flight_id);
        conn.del::<_, ()>(&key).await?;
        info!("Evicted availability cache for flight {}", flight_id);
        Ok(())
    }
}
