use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Encoding strategy applied to message keys and values before they are
/// handed to the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Serializer {
    /// UTF-8 passthrough.
    #[default]
    String,
}

impl Serializer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Serializer::String => "string",
        }
    }

    pub fn serialize<'a>(&self, value: &'a str) -> &'a [u8] {
        match self {
            Serializer::String => value.as_bytes(),
        }
    }
}

impl FromStr for Serializer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" | "utf8" => Ok(Serializer::String),
            other => Err(Error::Config(format!("Unknown serializer '{}'", other))),
        }
    }
}

impl fmt::Display for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_serializer_passes_utf8_through() {
        assert_eq!(Serializer::String.serialize("héllo"), "héllo".as_bytes());
        assert!(Serializer::String.serialize("").is_empty());
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("string".parse::<Serializer>().unwrap(), Serializer::String);
        assert_eq!("utf8".parse::<Serializer>().unwrap(), Serializer::String);
        assert!(matches!(
            "avro".parse::<Serializer>(),
            Err(Error::Config(_))
        ));
    }
}
