//! Fakes for the application ports.
#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use chrono::{DateTime, TimeZone, Utc};
use dashmap::DashMap;
use divicuenta_application::{
    Clock, IdGenerator, KeyValueStore, ReceiptImage, ReceiptOcr, ReceiptOcrError, StoreError,
};

#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|value| value.clone())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store whose writes always fail.
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Write {
            key: key.to_string(),
            source: "read-only store".into(),
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.set(key, "")
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 5, 17, 21, 30, 0)
                .single()
                .expect("valid timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{id}")
    }
}

/// OCR fake returning a canned response and recording what it was sent.
pub struct StubOcr {
    response: Mutex<Option<Result<String, ReceiptOcrError>>>,
    pub calls: AtomicUsize,
}

impl StubOcr {
    pub fn replying(json: &str) -> Self {
        Self {
            response: Mutex::new(Some(Ok(json.to_string()))),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: ReceiptOcrError) -> Self {
        Self {
            response: Mutex::new(Some(Err(error))),
            calls: AtomicUsize::new(0),
        }
    }
}

impl ReceiptOcr for StubOcr {
    fn extract_items(&self, image: &ReceiptImage<'_>) -> Result<String, ReceiptOcrError> {
        assert!(!image.bytes.is_empty());
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.response
            .lock()
            .expect("stub lock")
            .take()
            .unwrap_or_else(|| Err(ReceiptOcrError::NotConfigured))
    }
}
