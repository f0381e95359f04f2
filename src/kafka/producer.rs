use crate::kafka::properties::{
    display_value, ProducerConfiguration, KEY_SERIALIZER, REQUIRED_KEYS, VALUE_SERIALIZER,
};
use crate::kafka::Serializer;
use crate::{Error, Result};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use rdkafka::ClientConfig;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Where a published message landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

/// A librdkafka producer bound to the configuration it was built from.
pub struct ProducerHandle {
    producer: FutureProducer,
    configuration: ProducerConfiguration,
    key_serializer: Serializer,
    value_serializer: Serializer,
}

/// Builds a producer from `config`.
///
/// Fails with [`Error::Config`] when a required property is missing or blank,
/// or when a serializer identifier is unknown. No broker is contacted here;
/// librdkafka connects lazily in the background.
pub fn build_producer_handle(config: &ProducerConfiguration) -> Result<ProducerHandle> {
    for key in REQUIRED_KEYS {
        config.require(key)?;
    }

    let key_serializer: Serializer = config.require(KEY_SERIALIZER)?.parse()?;
    let value_serializer: Serializer = config.require(VALUE_SERIALIZER)?.parse()?;

    // Serializers are applied by us, librdkafka rejects unknown properties.
    let mut client_config = ClientConfig::new();
    for (key, value) in config
        .iter()
        .filter(|(key, _)| *key != KEY_SERIALIZER && *key != VALUE_SERIALIZER)
    {
        debug!(
            property = key,
            value = display_value(key, value),
            "Setting producer property"
        );
        client_config.set(key, value);
    }

    let producer: FutureProducer = client_config.create().map_err(Error::Kafka)?;

    info!(
        bootstrap = config.bootstrap_servers().unwrap_or_default(),
        key_serializer = %key_serializer,
        value_serializer = %value_serializer,
        "Kafka producer created"
    );

    Ok(ProducerHandle {
        producer,
        configuration: config.clone(),
        key_serializer,
        value_serializer,
    })
}

impl ProducerHandle {
    pub fn configuration(&self) -> &ProducerConfiguration {
        &self.configuration
    }

    pub fn key_serializer(&self) -> Serializer {
        self.key_serializer
    }

    pub fn value_serializer(&self) -> Serializer {
        self.value_serializer
    }

    pub async fn send(&self, topic: &str, key: Option<&str>, value: &str) -> Result<Delivery> {
        let mut record: FutureRecord<'_, [u8], [u8]> =
            FutureRecord::to(topic).payload(self.value_serializer.serialize(value));

        if let Some(key) = key {
            record = record.key(self.key_serializer.serialize(key));
        }

        let (partition, offset) = self
            .producer
            .send(record, Timeout::Never)
            .await
            .map_err(|(e, _)| Error::Kafka(e))?;

        Ok(Delivery {
            topic: topic.to_string(),
            partition,
            offset,
        })
    }

    /// Blocks until queued messages are delivered or `timeout` elapses.
    pub fn flush(&self, timeout: Duration) -> Result<()> {
        self.producer.flush(timeout).map_err(Error::Kafka)
    }

    pub fn in_flight_count(&self) -> i32 {
        self.producer.in_flight_count()
    }

    /// Flushes and releases the underlying client.
    pub fn close(self, timeout: Duration) -> Result<()> {
        self.flush(timeout)?;
        info!(
            bootstrap = self.configuration.bootstrap_servers().unwrap_or_default(),
            "Kafka producer closed"
        );
        Ok(())
    }
}

impl fmt::Debug for ProducerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProducerHandle")
            .field("configuration", &self.configuration)
            .field("key_serializer", &self.key_serializer)
            .field("value_serializer", &self.value_serializer)
            .finish_non_exhaustive()
    }
}
