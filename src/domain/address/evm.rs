//! EVM (20-byte) addresses: EIP-55 checksum and account-id derivation

use alloy_primitives::keccak256;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

type Blake2b256 = Blake2b<U32>;

const EVM_PREFIX: &[u8] = b"evm:";

/// Checksummed `0x` form of a 20-byte address.
pub fn to_checksum_address(bytes: &[u8; 20]) -> String {
    let addr = hex::encode(bytes);
    let hash = keccak256(addr.as_bytes());
    let hash_hex = hex::encode(hash.as_slice());

    let mut result = String::with_capacity(42);
    result.push_str("0x");

    for (c, hash_char) in addr.chars().zip(hash_hex.chars()) {
        let hash_val = hash_char.to_digit(16).unwrap_or(0);

        if hash_val >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

/// Maps an EVM address onto the 32-byte account id it controls:
/// `blake2b256("evm:" ++ address)`.
pub fn to_account_id(bytes: &[u8; 20]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(EVM_PREFIX);
    hasher.update(bytes);
    hasher.finalize().into()
}
