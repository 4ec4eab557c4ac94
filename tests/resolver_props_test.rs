//! Property tests for address resolution

use nodedesk::domain::address::{ss58, AddressResolver, ResolverConfig, Ss58Prefix};
use nodedesk::store::{KeyValueStore, MemoryStore, CHAIN_SS58_PREFIX_KEY, ETH_ADDRESS_KEY};
use proptest::prelude::*;

fn resolver() -> AddressResolver<MemoryStore> {
    AddressResolver::new(ResolverConfig::default(), MemoryStore::new())
}

proptest! {
    #[test]
    fn account_ids_roundtrip(bytes in prop::collection::vec(any::<u8>(), 32)) {
        let mut resolver = resolver();
        let canonical = resolver.resolve(&bytes, false).expect("32 bytes always resolve");

        let decoded = ss58::decode(&canonical).unwrap();
        prop_assert_eq!(&decoded.payload, &bytes);
        prop_assert_eq!(ss58::encode(&decoded.payload, Ss58Prefix::default()).unwrap(), canonical.clone());
        prop_assert_eq!(resolver.resolve(canonical.as_str(), false), Some(canonical.clone()));

        let hex_input = format!("0x{}", hex::encode(&bytes));
        prop_assert_eq!(resolver.resolve(hex_input.as_str(), false), Some(canonical));
    }

    #[test]
    fn evm_addresses_always_derive(bytes in prop::collection::vec(any::<u8>(), 20)) {
        let mut resolver = resolver();
        let canonical = resolver.resolve(&bytes, false).expect("20 bytes always resolve");

        let decoded = ss58::decode(&canonical).unwrap();
        prop_assert_eq!(decoded.payload.len(), 32);
        prop_assert_ne!(&decoded.payload[..20], &bytes[..]);
        prop_assert!(resolver.store().get(ETH_ADDRESS_KEY).unwrap().is_some());
    }

    #[test]
    fn other_lengths_rejected(len in 0usize..64, fill in any::<u8>()) {
        prop_assume!(len != 20 && len != 32);
        let bytes = vec![fill; len];
        prop_assert_eq!(resolver().resolve(&bytes, false), None);
    }

    #[test]
    fn prefix_changes_derived_address(prefix in 0u16..16_383) {
        prop_assume!(prefix != 42 && prefix != 46 && prefix != 47);
        let evm = "0x52908400098527886e0f7030069857d2e4169ee7";

        let mut resolver = resolver();
        let with_default = resolver.resolve(evm, false).unwrap();
        resolver.store_mut().set(CHAIN_SS58_PREFIX_KEY, &prefix.to_string()).unwrap();
        let with_prefix = resolver.resolve(evm, false).unwrap();

        prop_assert_ne!(&with_default, &with_prefix);
        prop_assert_eq!(ss58::decode(&with_prefix).unwrap().prefix, prefix);
    }
}

#[test]
fn evm_hex_with_unset_and_persisted_prefix() {
    let evm = format!("0x{}", "ab".repeat(20));
    let mut resolver = AddressResolver::new(
        ResolverConfig {
            ss58_prefix: Ss58Prefix::new(0).unwrap(),
        },
        MemoryStore::new(),
    );

    let unset = resolver.resolve(evm.as_str(), false).unwrap();
    resolver.store_mut().set(CHAIN_SS58_PREFIX_KEY, "42").unwrap();
    let with_42 = resolver.resolve(evm.as_str(), false).unwrap();

    assert_ne!(unset, with_42);
    assert_eq!(ss58::decode(&unset).unwrap().prefix, 0);
    assert_eq!(ss58::decode(&with_42).unwrap().prefix, 42);
}
