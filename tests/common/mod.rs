#![allow(dead_code)]

use kafka_provider::config::{Config, KafkaConfig};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get test configuration from environment variables
pub fn get_test_config() -> Config {
    let kafka = KafkaConfig {
        bootstrap_servers: test_brokers(),
        client_id: Some(format!("kafka-provider-test-{}", std::process::id())),
        message_timeout_ms: Some(10_000),
        default_topic: Some(test_topic("default")),
        flush_timeout_secs: 5,
        ..KafkaConfig::default()
    };

    Config { kafka }
}

pub fn test_brokers() -> String {
    env::var("TEST_KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string())
}

pub fn test_topic(name: &str) -> String {
    format!("test_{}_{}", std::process::id(), name)
}

pub fn write_config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config file");
    file
}

pub fn create_test_consumer(topic: &str) -> StreamConsumer {
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", test_brokers())
        .set("group.id", format!("test_consumer_{}", std::process::id()))
        .set("auto.offset.reset", "earliest")
        .set("enable.auto.commit", "false")
        .create()
        .expect("Failed to create consumer");

    consumer
        .subscribe(&[topic])
        .expect("Failed to subscribe to topic");

    consumer
}
