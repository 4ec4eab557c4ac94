//! SS58 address format
//!
//! Layout: `base58(prefix ++ payload ++ checksum)` where the checksum is the
//! leading bytes of `blake2b512("SS58PRE" ++ prefix ++ payload)`. Account ids
//! (32/33 bytes) carry two checksum bytes, account indices one.

use std::fmt;
use std::str::FromStr;

use blake2::{Blake2b512, Digest};

use super::AddressError;

/// Generic substrate network prefix.
pub const DEFAULT_SS58_PREFIX: u16 = 42;

const CHECKSUM_PREAMBLE: &[u8] = b"SS58PRE";
const MAX_PREFIX: u16 = 16_383;
const RESERVED_PREFIXES: [u16; 2] = [46, 47];
const PAYLOAD_LENGTHS: [usize; 6] = [1, 2, 4, 8, 32, 33];
const ENCODED_LENGTHS: [usize; 8] = [3, 4, 6, 10, 35, 36, 37, 38];

/// Validated network prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ss58Prefix(u16);

impl Ss58Prefix {
    pub fn new(value: u16) -> Result<Self, AddressError> {
        if value > MAX_PREFIX || RESERVED_PREFIXES.contains(&value) {
            return Err(AddressError::InvalidPrefix(u32::from(value)));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    fn to_bytes(self) -> Vec<u8> {
        let ident = self.0;
        if ident < 64 {
            vec![ident as u8]
        } else {
            vec![
                (((ident & 0b0000_0000_1111_1100) >> 2) as u8) | 0b0100_0000,
                ((ident >> 8) as u8) | (((ident & 0b0000_0000_0000_0011) as u8) << 6),
            ]
        }
    }
}

impl Default for Ss58Prefix {
    fn default() -> Self {
        Self(DEFAULT_SS58_PREFIX)
    }
}

impl TryFrom<u16> for Ss58Prefix {
    type Error = AddressError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Ss58Prefix {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| AddressError::InvalidPrefix(u32::MAX))?;
        let value = u16::try_from(value).map_err(|_| AddressError::InvalidPrefix(value))?;
        Self::new(value)
    }
}

impl fmt::Display for Ss58Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of decoding an SS58 string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    pub prefix: u16,
    pub payload: Vec<u8>,
}

pub fn encode(payload: &[u8], prefix: Ss58Prefix) -> Result<String, AddressError> {
    if !PAYLOAD_LENGTHS.contains(&payload.len()) {
        return Err(AddressError::InvalidPayloadLength(payload.len()));
    }

    let mut data = prefix.to_bytes();
    data.extend_from_slice(payload);

    let hash = checksum_hash(&data);
    let checksum_len = if is_account_id(payload.len()) { 2 } else { 1 };
    data.extend_from_slice(&hash[..checksum_len]);

    Ok(bs58::encode(data).into_string())
}

pub fn decode(encoded: &str) -> Result<DecodedAddress, AddressError> {
    let decoded = bs58::decode(encoded)
        .into_vec()
        .map_err(|err| AddressError::InvalidBase58(err.to_string()))?;

    if !ENCODED_LENGTHS.contains(&decoded.len()) {
        return Err(AddressError::InvalidEncodedLength(decoded.len()));
    }

    let first = decoded[0];
    let prefix_len = if first & 0b0100_0000 != 0 { 2 } else { 1 };
    let is_public_key =
        decoded.len() == 34 + prefix_len || decoded.len() == 35 + prefix_len;
    let end = decoded.len() - if is_public_key { 2 } else { 1 };
    if end < prefix_len {
        return Err(AddressError::InvalidEncodedLength(decoded.len()));
    }

    let hash = checksum_hash(&decoded[..end]);
    let checksum_ok = if is_public_key {
        decoded[end] == hash[0] && decoded[end + 1] == hash[1]
    } else {
        decoded[end] == hash[0]
    };
    if first & 0b1000_0000 != 0 || RESERVED_PREFIXES.contains(&u16::from(first)) || !checksum_ok {
        return Err(AddressError::InvalidChecksum);
    }

    let prefix = if prefix_len == 1 {
        u16::from(first)
    } else {
        let second = u16::from(decoded[1]);
        ((u16::from(first) & 0b0011_1111) << 2) | (second >> 6) | ((second & 0b0011_1111) << 8)
    };

    Ok(DecodedAddress {
        prefix,
        payload: decoded[prefix_len..end].to_vec(),
    })
}

fn is_account_id(len: usize) -> bool {
    len == 32 || len == 33
}

fn checksum_hash(data: &[u8]) -> Vec<u8> {
    let mut hasher = Blake2b512::new();
    hasher.update(CHECKSUM_PREAMBLE);
    hasher.update(data);
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

    fn alice() -> Vec<u8> {
        hex::decode(ALICE).unwrap()
    }

    #[test]
    fn test_encode_known_account() {
        let prefix = Ss58Prefix::new(42).unwrap();
        assert_eq!(
            encode(&alice(), prefix).unwrap(),
            "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"
        );
    }

    #[test]
    fn test_decode_known_account() {
        let decoded = decode("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY").unwrap();
        assert_eq!(decoded.prefix, 42);
        assert_eq!(decoded.payload, alice());
    }

    #[test]
    fn test_two_byte_prefix_roundtrip() {
        let prefix = Ss58Prefix::new(8_886).unwrap();
        let encoded = encode(&alice(), prefix).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.prefix, 8_886);
        assert_eq!(decoded.payload, alice());
    }

    #[test]
    fn test_index_roundtrip() {
        let prefix = Ss58Prefix::default();
        let encoded = encode(&[1, 2], prefix).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.payload, vec![1, 2]);
    }

    #[test]
    fn test_rejects_bad_checksum() {
        // Last character altered.
        let err = decode("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQZ").unwrap_err();
        assert!(matches!(
            err,
            AddressError::InvalidChecksum | AddressError::InvalidEncodedLength(_)
        ));
    }

    #[test]
    fn test_rejects_bad_alphabet() {
        let err = decode("0OIl").unwrap_err();
        assert!(matches!(err, AddressError::InvalidBase58(_)));
    }

    #[test]
    fn test_rejects_payload_length() {
        let err = encode(&[0u8; 20], Ss58Prefix::default()).unwrap_err();
        assert_eq!(err, AddressError::InvalidPayloadLength(20));
    }

    #[test]
    fn test_prefix_validation() {
        assert!(Ss58Prefix::new(46).is_err());
        assert!(Ss58Prefix::new(47).is_err());
        assert!(Ss58Prefix::new(16_384).is_err());
        assert_eq!("  7 ".parse::<Ss58Prefix>().unwrap().get(), 7);
        assert!("abc".parse::<Ss58Prefix>().is_err());
        assert!("70000".parse::<Ss58Prefix>().is_err());
    }
}
