//! Startup wiring from [`Config`] to a ready [`Publisher`].
//!
//! # Example
//!
//! ```rust,no_run
//! use kafka_provider::{Config, ProducerBootstrap};
//!
//! #[tokio::main]
//! async fn main() -> kafka_provider::Result<()> {
//!     let config = Config::from_env()?;
//!     let bootstrap = ProducerBootstrap::from_config(&config)?;
//!
//!     let publisher = bootstrap.publisher();
//!     publisher.send("events", Some("id-1"), "created").await?;
//!
//!     bootstrap.shutdown()
//! }
//! ```

use crate::config::KafkaConfig;
use crate::kafka::properties::REQUIRED_KEYS;
use crate::kafka::{
    build_configuration, build_producer_handle, build_publisher, ProducerConfiguration, Publisher,
};
use crate::{Config, Error, Result};
use std::time::Duration;
use tracing::{info, instrument};

/// Owns the process-wide publisher between startup and shutdown.
#[derive(Debug)]
pub struct ProducerBootstrap {
    publisher: Publisher,
    flush_timeout: Duration,
}

impl ProducerBootstrap {
    /// Builds the producer configuration, handle and publisher in one pass.
    ///
    /// Any missing or malformed setting aborts with [`Error::Config`] before a
    /// producer exists.
    #[instrument(skip_all)]
    pub fn from_config(config: &Config) -> Result<Self> {
        let properties = producer_configuration(&config.kafka)?;
        let handle = build_producer_handle(&properties)?;

        let mut publisher = build_publisher(handle);
        if let Some(topic) = &config.kafka.default_topic {
            publisher = publisher.with_default_topic(topic.clone());
        }

        info!(
            bootstrap = %config.kafka.bootstrap_servers,
            default_topic = ?config.kafka.default_topic,
            "Publisher ready"
        );

        Ok(Self {
            publisher,
            flush_timeout: Duration::from_secs(config.kafka.flush_timeout_secs),
        })
    }

    pub fn publisher(&self) -> Publisher {
        self.publisher.clone()
    }

    pub fn configuration(&self) -> &ProducerConfiguration {
        self.publisher.handle().configuration()
    }

    /// Flushes outstanding messages. Publishers cloned out of the bootstrap
    /// keep the producer alive until they are dropped.
    pub fn shutdown(self) -> Result<()> {
        info!(
            in_flight = self.publisher.handle().in_flight_count(),
            timeout_secs = self.flush_timeout.as_secs(),
            "Flushing producer"
        );
        self.publisher.flush(self.flush_timeout)?;
        info!("Producer shut down");
        Ok(())
    }
}

/// Property map for `kafka`, including the optional client settings.
pub fn producer_configuration(kafka: &KafkaConfig) -> Result<ProducerConfiguration> {
    let mut properties = build_configuration(&kafka.bootstrap_servers)?;

    if let Some(client_id) = &kafka.client_id {
        properties.set("client.id", client_id.clone());
    }
    if let Some(timeout) = kafka.message_timeout_ms {
        properties.set("message.timeout.ms", timeout.to_string());
    }

    let mut extras: Vec<_> = kafka.properties.iter().collect();
    extras.sort();
    for (key, value) in extras {
        if REQUIRED_KEYS.contains(&key.as_str()) {
            return Err(Error::Config(format!(
                "'{}' cannot be overridden through extra properties",
                key
            )));
        }
        properties.set(key.clone(), value.clone());
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kafka::properties::{BOOTSTRAP_SERVERS, KEY_SERIALIZER};

    fn kafka_config(bootstrap_servers: &str) -> KafkaConfig {
        KafkaConfig {
            bootstrap_servers: bootstrap_servers.to_string(),
            ..KafkaConfig::default()
        }
    }

    #[test]
    fn test_optional_settings_are_applied() {
        let mut kafka = kafka_config("localhost:9092");
        kafka.client_id = Some("orders".to_string());
        kafka.message_timeout_ms = Some(5000);
        kafka
            .properties
            .insert("compression.type".to_string(), "lz4".to_string());

        let properties = producer_configuration(&kafka).unwrap();

        assert_eq!(properties.get("client.id"), Some("orders"));
        assert_eq!(properties.get("message.timeout.ms"), Some("5000"));
        assert_eq!(properties.get("compression.type"), Some("lz4"));
        assert_eq!(properties.get(BOOTSTRAP_SERVERS), Some("localhost:9092"));
    }

    #[test]
    fn test_required_keys_cannot_be_overridden() {
        let mut kafka = kafka_config("localhost:9092");
        kafka
            .properties
            .insert(KEY_SERIALIZER.to_string(), "bytes".to_string());

        assert!(matches!(
            producer_configuration(&kafka),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_bootstrap_servers_fails_startup() {
        let config = Config::default();
        assert!(matches!(
            ProducerBootstrap::from_config(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_bootstrap_and_shutdown() {
        let mut config = Config::default();
        config.kafka = kafka_config("localhost:9092");
        config.kafka.default_topic = Some("events".to_string());
        config.kafka.flush_timeout_secs = 1;

        let bootstrap = ProducerBootstrap::from_config(&config).unwrap();
        let publisher = bootstrap.publisher();

        assert_eq!(publisher.default_topic(), Some("events"));
        assert_eq!(bootstrap.configuration().len(), 3);

        bootstrap.shutdown().unwrap();

        // Outstanding clones stay usable after the bootstrap is gone
        assert_eq!(
            publisher.handle().configuration().bootstrap_servers(),
            Some("localhost:9092")
        );
    }
}
