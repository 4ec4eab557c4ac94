//! Persisted key-value settings
//!
//! The resolver and the endpoint selector only ever need string keys and
//! string values. Callers treat every read failure as "absent".

mod memory;
mod settings;

pub use memory::MemoryStore;
pub use settings::SettingsStore;

use anyhow::Result;

/// Last 20-byte (EVM) address seen by the resolver, checksummed. Write-only cache.
pub const ETH_ADDRESS_KEY: &str = "ethAddress";

/// Network prefix used when deriving addresses from 20-byte input.
pub const CHAIN_SS58_PREFIX_KEY: &str = "chainSS58Prefix";

/// Active node endpoint chosen by the user.
pub const API_URL_KEY: &str = "apiUrl";

/// Reserved for user-managed endpoint lists.
pub const CUSTOM_ENDPOINT_KEY: &str = "ggx-app-custom-endpoints";

/// Minimal get/set store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
