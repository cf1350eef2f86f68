//! Durable key/value storage for the cart snapshot
//!
//! The browser build persists to `window.localStorage`; native hosts and
//! tests use the in-memory store. The cart writes one JSON document under a
//! single fixed key.

mod memory;

#[cfg(feature = "wasm")]
mod local;

pub use memory::MemoryStorage;

#[cfg(feature = "wasm")]
pub use local::LocalStorage;

use crate::error::Result;

/// A key/value byte store scoped to one diner session
pub trait CartStorage {
    /// Read the value under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
