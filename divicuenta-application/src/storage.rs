//! Logical keys and JSON helpers on top of [`KeyValueStore`].

use serde::{Serialize, de::DeserializeOwned};

use crate::{error::StoreError, ports::KeyValueStore};

pub const USERS_KEY: &str = "divicuenta_users";
pub const CURRENT_USER_KEY: &str = "divicuenta_currentUser";
pub const HISTORY_KEY: &str = "divicuenta_history";

/// Suffix of the key an undecodable document is copied to before it can be
/// overwritten.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Reads and decodes `key`.
///
/// Missing keys and documents that fail to decode both yield `Ok(None)`;
/// only storage failures are reported as errors. An undecodable document is
/// first copied to `<key>.corrupt`.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding unreadable stored document");
            let backup_key = format!("{key}{CORRUPT_SUFFIX}");
            if let Err(backup_err) = store.set(&backup_key, &raw) {
                tracing::warn!(key, error = %backup_err, "failed to keep a copy of unreadable document");
            }
            Ok(None)
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &encoded)
}
