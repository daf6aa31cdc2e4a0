use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Registry API key.
///
/// `Debug` and `Display` print `[REDACTED]`. The buffer is zeroed on drop.
/// Use [`expose`](Self::expose) only to build the request query string.
#[derive(Default, Zeroize, ZeroizeOnDrop)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

struct ApiKeyVisitor;

// Environment providers may hand over an all-digit key as a number.
impl Visitor<'_> for ApiKeyVisitor {
    type Value = ApiKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an API key string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ApiKey, E> {
        Ok(ApiKey::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<ApiKey, E> {
        Ok(ApiKey(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<ApiKey, E> {
        Ok(ApiKey(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for ApiKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ApiKeyVisitor)
    }
}
