use alloy::primitives::{Address, U256};
use reactor_constants::{
    ChainConstants, ConfigError, OrderType, ReactorAddresses, ResolverAddresses,
    test_utils::{CHAIN_ID, PERMIT2, TEST_CONSTANTS},
};
use reactor_orders::{OrderTypeRegistry, RegistryError};
use reactor_test_utils::{
    orders::{
        dutch_order, hybrid_order, hybrid_resolver_payload, priority_order, relay_order,
        resolver_payload,
    },
    users::TEST_USERS,
};
use reactor_types::OrderVariant;

fn registry() -> OrderTypeRegistry {
    OrderTypeRegistry::new().with_chain(TEST_CONSTANTS)
}

#[test]
fn classifies_legacy_orders_by_reactor() {
    let swapper = TEST_USERS[0];
    let registry = registry();

    let dutch = dutch_order(swapper, U256::from(1), 100);
    assert_eq!(registry.classify(&dutch.encode(), CHAIN_ID).unwrap(), OrderType::Dutch);

    let priority = priority_order(swapper, U256::from(2), 100, 10);
    assert_eq!(registry.classify(&priority.encode(), CHAIN_ID).unwrap(), OrderType::Priority);

    let relay = relay_order(swapper, U256::from(3), 100);
    assert_eq!(registry.classify(&relay.encode(), CHAIN_ID).unwrap(), OrderType::Relay);
}

#[test]
fn classifies_resolver_payloads() {
    let order = hybrid_order(TEST_USERS[0], U256::from(1), 100, 10);
    let payload = hybrid_resolver_payload(&order);

    let registry = registry();
    assert_eq!(registry.classify(&payload, CHAIN_ID).unwrap(), OrderType::Hybrid);

    let parsed = registry.parse(&payload, CHAIN_ID).unwrap();
    assert_eq!(parsed, OrderVariant::Hybrid(order));
}

#[test]
fn parse_round_trips_and_derives_limit() {
    let order = dutch_order(TEST_USERS[1], U256::from(7), 100);
    let parsed = registry().parse(&order.encode(), CHAIN_ID).unwrap();
    assert_eq!(parsed.order_type(), OrderType::Dutch);
    assert_eq!(parsed, OrderVariant::Dutch(order));
}

#[test]
fn unknown_address_is_configuration_missing() {
    // the test chain with no dutch reactor configured
    let constants = ChainConstants::new(
        CHAIN_ID,
        PERMIT2,
        None,
        ReactorAddresses::new(),
        ResolverAddresses::new(),
    );
    let registry = OrderTypeRegistry::new().with_chain(constants);

    let order = dutch_order(TEST_USERS[0], U256::from(1), 100);
    let err = registry.classify(&order.encode(), CHAIN_ID).unwrap_err();
    assert!(matches!(err, RegistryError::Config(ConfigError::ConfigurationMissing { .. })));
}

#[test]
fn unknown_chain_is_configuration_missing() {
    let order = dutch_order(TEST_USERS[0], U256::from(1), 100);
    let err = OrderTypeRegistry::known().parse(&order.encode(), CHAIN_ID).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Config(ConfigError::ConfigurationMissing { chain_id: CHAIN_ID, .. })
    ));
}

#[test]
fn missing_decoder_is_configuration_missing() {
    let registry = registry().without_decoder(OrderType::Dutch);
    let order = dutch_order(TEST_USERS[0], U256::from(1), 100);

    assert_eq!(registry.classify(&order.encode(), CHAIN_ID).unwrap(), OrderType::Dutch);
    let err = registry.parse(&order.encode(), CHAIN_ID).unwrap_err();
    assert!(matches!(err, RegistryError::Config(ConfigError::ConfigurationMissing { .. })));
}

#[test]
fn truncated_payload_fails_to_decode() {
    // the head still names the dutch reactor, but the tail is cut off
    let encoded = dutch_order(TEST_USERS[0], U256::from(1), 100).encode();
    let bytes = &encoded[..encoded.len() - 32];

    let registry = registry();
    assert_eq!(registry.classify(bytes, CHAIN_ID).unwrap(), OrderType::Dutch);
    let err = registry.parse(bytes, CHAIN_ID).unwrap_err();
    assert!(matches!(err, RegistryError::Decode { order_type: OrderType::Dutch, .. }));
}

#[test]
fn unknown_resolver_is_not_guessed() {
    let order: OrderVariant = dutch_order(TEST_USERS[0], U256::from(1), 100).into();
    let payload = resolver_payload(Address::repeat_byte(0x99), &order);

    let err = registry().classify(&payload, CHAIN_ID).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Config(ConfigError::ConfigurationMissing { chain_id: CHAIN_ID, .. })
    ));
    assert!(matches!(registry().parse(&payload, CHAIN_ID), Err(RegistryError::Config(_))));
}

#[test]
fn unreadable_bytes_are_malformed() {
    let err = registry().classify(&[0xff; 16], CHAIN_ID).unwrap_err();
    assert!(matches!(err, RegistryError::Malformed { len: 16 }));
}
