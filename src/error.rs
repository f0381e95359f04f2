//! Error types and result handling for kafka-provider.
//!
//! This module defines the main error type [`Error`] and a convenience
//! [`Result`] type alias used throughout the crate.
//!
//! # Example
//!
//! ```rust
//! use kafka_provider::{Error, Result};
//!
//! fn read_brokers() -> Result<String> {
//!     Err(Error::Config("bootstrap.servers must not be empty".to_string()))
//! }
//!
//! match read_brokers() {
//!     Ok(brokers) => println!("Brokers: {}", brokers),
//!     Err(Error::Config(msg)) => eprintln!("Configuration error: {}", msg),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for kafka-provider operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required property is missing, empty or malformed.
    ///
    /// Raised while the producer is being assembled at startup. It is never
    /// recoverable locally; startup should abort.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Kafka client or producer error, passed through from librdkafka.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

/// A convenient Result type alias for kafka-provider operations.
///
/// This is equivalent to `std::result::Result<T, kafka_provider::Error>`.
pub type Result<T> = std::result::Result<T, Error>;
