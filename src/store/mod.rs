//! Key-value persistence shared by every component.
//!
//! Values are strings, exactly like browser local storage. Collections are
//! JSON-encoded and always written back whole.

mod file;
mod memory;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Fixed storage keys.
pub mod keys {
    pub const PROJECTS: &str = "portfolio-projects";
    pub const ADMIN_AUTHENTICATED: &str = "admin-authenticated";
    pub const ADMIN_PASSWORD: &str = "admin-password";
    pub const INQUIRIES: &str = "project-inquiries";
    pub const ANALYTICS: &str = "portfolio-analytics-enhanced";
    pub const PURCHASES: &str = "portfolio-purchases";
}

/// Raw string storage, modelled on the local-storage API.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

/// JSON helpers available on every [`Storage`].
pub trait StorageExt: Storage {
    /// Read and decode `key`. A missing key and an undecodable value both
    /// come back as `None`; the latter is logged.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.get_item(key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding unreadable stored value");
                Ok(None)
            }
        }
    }

    /// Like [`read`](StorageExt::read), but an undecodable value is an error.
    /// Use it before appending to a stored collection and writing it back.
    fn read_for_update<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.get_item(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Unreadable {
                key: key.to_string(),
                source,
            })
    }

    /// Encode `value` and overwrite `key`.
    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set_item(key, &raw)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}
