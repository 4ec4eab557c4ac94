//! Address codecs and the resolver that normalizes user input
//!
//! Two account encodings are accepted:
//! - native: 32-byte account ids, SS58-encoded with a network prefix
//! - derived: 20-byte EVM addresses, mapped onto a 32-byte account id first

pub mod evm;
pub mod resolver;
pub mod ss58;

pub use resolver::{AddressInput, AddressResolver, ResolverConfig};
pub use ss58::{DecodedAddress, Ss58Prefix, DEFAULT_SS58_PREFIX};

use thiserror::Error;

/// Reasons an input is not an address.
///
/// The resolver never hands these to its callers; they only show up in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("empty input")]
    Empty,
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid base58: {0}")]
    InvalidBase58(String),
    #[error("invalid decoded length {0}")]
    InvalidEncodedLength(usize),
    #[error("invalid checksum")]
    InvalidChecksum,
    #[error("unsupported payload length {0}")]
    InvalidPayloadLength(usize),
    #[error("account index forms not allowed (length {0})")]
    IndexNotAllowed(usize),
    #[error("invalid network prefix {0}")]
    InvalidPrefix(u32),
}
