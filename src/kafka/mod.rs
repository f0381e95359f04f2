pub mod producer;
pub mod properties;
pub mod publisher;
pub mod serializer;


pub use producer::{build_producer_handle, Delivery, ProducerHandle};
pub use properties::{build_configuration, ProducerConfiguration};
pub use publisher::{build_publisher, Publisher};
pub use serializer::Serializer;
