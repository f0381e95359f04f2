use crate::kafka::producer::{Delivery, ProducerHandle};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Send-oriented facade over a shared [`ProducerHandle`].
///
/// Cloning is cheap; every clone publishes through the same producer.
#[derive(Debug, Clone)]
pub struct Publisher {
    handle: Arc<ProducerHandle>,
    default_topic: Option<String>,
}

pub fn build_publisher(handle: ProducerHandle) -> Publisher {
    Publisher {
        handle: Arc::new(handle),
        default_topic: None,
    }
}

impl Publisher {
    pub fn with_default_topic(mut self, topic: impl Into<String>) -> Self {
        self.default_topic = Some(topic.into());
        self
    }

    pub fn default_topic(&self) -> Option<&str> {
        self.default_topic.as_deref()
    }

    pub fn handle(&self) -> &ProducerHandle {
        &self.handle
    }

    #[instrument(skip(self, value), fields(topic = %topic))]
    pub async fn send(&self, topic: &str, key: Option<&str>, value: &str) -> Result<Delivery> {
        let delivery = self.handle.send(topic, key, value).await?;
        debug!(
            partition = delivery.partition,
            offset = delivery.offset,
            "Message delivered"
        );
        Ok(delivery)
    }

    pub async fn send_default(&self, key: Option<&str>, value: &str) -> Result<Delivery> {
        let topic = self
            .default_topic
            .as_deref()
            .ok_or_else(|| Error::Config("No default topic configured".to_string()))?;
        self.send(topic, key, value).await
    }

    pub fn flush(&self, timeout: Duration) -> Result<()> {
        self.handle.flush(timeout)
    }
}
