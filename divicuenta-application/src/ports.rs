use chrono::{DateTime, Utc};

use crate::{
    error::{ReceiptOcrError, StoreError},
    receipt::ReceiptImage,
};

/// Durable string key-value storage holding JSON documents.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// External receipt reader. Returns the provider's raw JSON text; the scan
/// boundary validates it before anything reaches the session.
pub trait ReceiptOcr: Send + Sync {
    fn extract_items(&self, image: &ReceiptImage<'_>) -> Result<String, ReceiptOcrError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier of the form `<prefix>-<unique>`.
    fn next_id(&self, prefix: &str) -> String;
}
