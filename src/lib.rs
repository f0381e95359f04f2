pub mod bootstrap;
pub mod config;
pub mod error;

pub mod kafka;

pub use bootstrap::ProducerBootstrap;
pub use config::Config;
pub use error::{Error, Result};
pub use kafka::{Delivery, Publisher};
