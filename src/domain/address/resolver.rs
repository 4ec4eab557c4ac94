//! Normalizes user-supplied addresses into canonical SS58 strings

use tracing::{debug, warn};

use super::evm;
use super::ss58::{self, Ss58Prefix};
use super::AddressError;
use crate::store::{KeyValueStore, CHAIN_SS58_PREFIX_KEY, ETH_ADDRESS_KEY};

const EVM_ADDRESS_LEN: usize = 20;
const ACCOUNT_ID_LEN: usize = 32;

/// Raw input handed to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressInput<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for AddressInput<'a> {
    fn from(value: &'a str) -> Self {
        AddressInput::Text(value)
    }
}

impl<'a> From<&'a String> for AddressInput<'a> {
    fn from(value: &'a String) -> Self {
        AddressInput::Text(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for AddressInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        AddressInput::Bytes(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for AddressInput<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        AddressInput::Bytes(value.as_slice())
    }
}

impl<'a> From<&'a Vec<u8>> for AddressInput<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        AddressInput::Bytes(value.as_slice())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Prefix for native accounts, and for derived ones when no prefix is persisted.
    pub ss58_prefix: Ss58Prefix,
}

/// Address resolver over a settings store.
#[derive(Debug)]
pub struct AddressResolver<S> {
    config: ResolverConfig,
    store: S,
}

impl<S: KeyValueStore> AddressResolver<S> {
    pub fn new(config: ResolverConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Canonical address for `input`, or `None` when it is not an address.
    ///
    /// 20-byte input is remembered under [`ETH_ADDRESS_KEY`] as a side effect.
    pub fn resolve<'a>(
        &mut self,
        input: impl Into<AddressInput<'a>>,
        allow_non_account_forms: bool,
    ) -> Option<String> {
        match self.try_resolve(input.into(), allow_non_account_forms) {
            Ok(address) => Some(address),
            Err(err) => {
                debug!(%err, "input is not a resolvable address");
                None
            }
        }
    }

    fn try_resolve(
        &mut self,
        input: AddressInput<'_>,
        allow_non_account_forms: bool,
    ) -> Result<String, AddressError> {
        let bytes = match input {
            AddressInput::Text("") => return Err(AddressError::Empty),
            AddressInput::Text(text) if is_hex(text) => {
                hex::decode(&text[2..]).map_err(|err| AddressError::InvalidHex(err.to_string()))?
            }
            AddressInput::Text(text) => ss58::decode(text)?.payload,
            AddressInput::Bytes([]) => return Err(AddressError::Empty),
            AddressInput::Bytes(bytes) => bytes.to_vec(),
        };

        if !allow_non_account_forms
            && bytes.len() != ACCOUNT_ID_LEN
            && bytes.len() != EVM_ADDRESS_LEN
        {
            return Err(AddressError::IndexNotAllowed(bytes.len()));
        }

        match <[u8; EVM_ADDRESS_LEN]>::try_from(bytes.as_slice()) {
            Ok(evm_address) => self.derive_from_evm(&evm_address),
            Err(_) => ss58::encode(&bytes, self.config.ss58_prefix),
        }
    }

    fn derive_from_evm(&mut self, evm_address: &[u8; EVM_ADDRESS_LEN]) -> Result<String, AddressError> {
        let checksummed = evm::to_checksum_address(evm_address);
        if let Err(err) = self.store.set(ETH_ADDRESS_KEY, &checksummed) {
            warn!(%err, "failed to cache evm address");
        }

        let prefix = self.persisted_prefix().unwrap_or(self.config.ss58_prefix);
        ss58::encode(&evm::to_account_id(evm_address), prefix)
    }

    fn persisted_prefix(&self) -> Option<Ss58Prefix> {
        let raw = match self.store.get(CHAIN_SS58_PREFIX_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(%err, "failed to read network prefix");
                return None;
            }
        };
        match raw.parse::<Ss58Prefix>() {
            Ok(prefix) => Some(prefix),
            Err(err) => {
                debug!(%err, raw = %raw, "ignoring persisted network prefix");
                None
            }
        }
    }
}

/// `0x`-prefixed, hex digits only, even total length. `"0x"` alone counts.
fn is_hex(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(digits) => value.len() % 2 == 0 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
