use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use std::error::Error;
use std::time::Duration;
use tracing::{error, info};

use aeris_core::repository::EventPublisher;
use aeris_domain::events::BookingAttemptedEvent;

#[derive(Clone)]
pub struct EventProducer {
    producer: FutureProducer,
    booking_topic: String,
}

impl EventProducer {
    pub fn new(brokers: &str, booking_topic: &str) -> Result<Self, rdkafka::error::KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(Self {
            producer,
            booking_topic: booking_topic.to_string(),
        })
    }

    pub async fn send(
        &self,
        topic: &str,
        key: &str,
        payload: &str,
    ) -> Result<(), rdkafka::error::KafkaError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);

        match self
            .producer
            .send(record, Timeout::After(Duration::from_secs(0)))
            .await
        {
            Ok(delivery) => {
                let partition = delivery.partition;
                let offset = delivery.offset;
                info!(
                    "Sent message to {}/{}: partition {} offset {}",
                    topic, key, partition, offset
                );
                Ok(())
            }
            Err((e, _msg)) => {
                error!("Failed to send message to {}: {}", topic, e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl EventPublisher for EventProducer {
    async fn publish(
        &self,
        event: &BookingAttemptedEvent,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let payload = serde_json::to_string(event)?;
        self.send(&self.booking_topic, &event.flight_id.to_string(), &payload)
            .await?;
        Ok(())
    }
}
