use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::{SolCall, SolValue},
};
use reactor_bindings::{IOrderQuoter, errors};
use reactor_constants::{ConfigError, test_utils::TEST_CONSTANTS};
use reactor_orders::{
    CallResult, ChainHead, NonceAllocator, OrderValidator, ValidationEntry, ValidationError,
};
use reactor_test_utils::{
    init_tracing,
    mocks::{MockBatchCaller, MockBitmapSource, quote_ok, revert_with},
    orders::{dutch_order, priority_order, relay_order},
    users::TEST_USERS,
};
use reactor_types::{DutchOrder, OrderVariant, ValidationOutcome};

const HEAD: ChainHead = ChainHead::new(100, 1_000);

fn validator(
    caller: MockBatchCaller,
    source: MockBitmapSource,
) -> OrderValidator<MockBatchCaller, MockBitmapSource> {
    OrderValidator::new(caller, NonceAllocator::new(source), TEST_CONSTANTS)
}

fn entry(order: impl Into<OrderVariant>) -> ValidationEntry {
    ValidationEntry::new(order.into(), Bytes::from_static(&[0x1b; 65]))
}

#[tokio::test]
async fn expired_and_used_is_nonce_used() {
    let swapper = TEST_USERS[0];
    let source = MockBitmapSource::new();
    let validator = validator(MockBatchCaller::always(quote_ok()), source.clone());

    let order: OrderVariant = dutch_order(swapper, U256::from(9), 500).into();

    let outcome =
        validator.resolve_terminal_state(&order, ValidationOutcome::Expired, HEAD).await.unwrap();
    assert_eq!(outcome, ValidationOutcome::Expired);

    source.mark_used(swapper, U256::from(9));
    let outcome =
        validator.resolve_terminal_state(&order, ValidationOutcome::Expired, HEAD).await.unwrap();
    assert_eq!(outcome, ValidationOutcome::NonceUsed);
}

#[tokio::test]
async fn past_deadline_overrides_dry_run() {
    let swapper = TEST_USERS[1];
    let source = MockBitmapSource::new();
    let validator = validator(MockBatchCaller::always(quote_ok()), source.clone());

    // deadline 500 is before the head timestamp
    let order: OrderVariant = dutch_order(swapper, U256::from(3), 500).into();
    let outcome = validator
        .resolve_terminal_state(&order, ValidationOutcome::InsufficientFunds, HEAD)
        .await
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::Expired);

    // a live order keeps its outcome without touching the store
    let order: OrderVariant = dutch_order(swapper, U256::from(3), 5_000).into();
    let outcome = validator
        .resolve_terminal_state(&order, ValidationOutcome::InsufficientFunds, HEAD)
        .await
        .unwrap();
    assert_eq!(outcome, ValidationOutcome::InsufficientFunds);
    assert_eq!(source.reads(), 1);
}

#[tokio::test]
async fn future_block_requirement_is_not_fillable_yet() {
    let validator = validator(MockBatchCaller::always(quote_ok()), MockBitmapSource::new());

    let order: OrderVariant = priority_order(TEST_USERS[0], U256::from(1), 5_000, 150).into();
    let outcome = validator.resolve_terminal_state(&order, ValidationOutcome::Ok, HEAD).await;
    assert_eq!(outcome.unwrap(), ValidationOutcome::OrderNotFillableYet);

    let order: OrderVariant = priority_order(TEST_USERS[0], U256::from(1), 5_000, 100).into();
    let outcome = validator.resolve_terminal_state(&order, ValidationOutcome::Ok, HEAD).await;
    assert_eq!(outcome.unwrap(), ValidationOutcome::Ok);
}

#[tokio::test]
async fn batch_outcomes_are_index_aligned() {
    init_tracing();
    let swapper = TEST_USERS[2];
    let source = MockBitmapSource::new();
    source.mark_used(swapper, U256::from(4));

    let entries = vec![
        entry(dutch_order(swapper, U256::from(1), 5_000)),
        entry(priority_order(swapper, U256::from(2), 5_000, 200)),
        entry(relay_order(swapper, U256::from(3), 5_000)),
        entry(dutch_order(swapper, U256::from(4), 500)),
        entry(priority_order(swapper, U256::from(5), 5_000, 300)),
        entry(dutch_order(swapper, U256::from(6), 5_000)),
    ];

    // answer by nonce: 3 lacks funds, 4 is expired, 6 has a bad signature
    let caller = MockBatchCaller::new(|call, _| {
        let quote = IOrderQuoter::quoteCall::abi_decode(&call.data).unwrap();
        let order = reactor_orders::OrderTypeRegistry::new()
            .with_chain(TEST_CONSTANTS)
            .parse(&quote.order, TEST_CONSTANTS.chain_id())
            .unwrap();
        match order.nonce().to::<u64>() {
            3 => revert_with(errors::InsufficientAllowance { amount: U256::from(100) }),
            4 => revert_with(errors::SignatureExpired { signatureDeadline: U256::from(500) }),
            6 => revert_with(errors::InvalidSignature {}),
            _ => quote_ok(),
        }
    });

    let validator = validator(caller.clone(), source);
    let outcomes = validator.validate_batch(&entries, HEAD).await.unwrap();
    assert_eq!(
        outcomes,
        vec![
            ValidationOutcome::Ok,
            ValidationOutcome::OrderNotFillableYet,
            ValidationOutcome::InsufficientFunds,
            ValidationOutcome::NonceUsed,
            ValidationOutcome::OrderNotFillableYet,
            ValidationOutcome::InvalidSignature,
        ]
    );

    // one batch at latest, and one per future block
    let mut batches = caller.batches();
    batches.sort_by_key(|(block, _)| *block);
    let shape: Vec<_> = batches.iter().map(|(block, calls)| (*block, calls.len())).collect();
    assert_eq!(shape, vec![(None, 4), (Some(200), 1), (Some(300), 1)]);
    assert!(
        batches.iter().flat_map(|(_, calls)| calls).all(|c| c.to == TEST_CONSTANTS.order_quoter().unwrap())
    );
}

#[tokio::test]
async fn validation_failed_is_refined_by_exclusive_validation_data() {
    let swapper = TEST_USERS[3];

    // exclusivity enforced by the validation contract
    let mut validated = dutch_order(swapper, U256::from(1), 5_000).into_sol();
    validated.info.additionalValidationContract = Address::repeat_byte(0x77);
    validated.info.additionalValidationData =
        (TEST_USERS[4], U256::from(4_000)).abi_encode_params().into();
    let validated = DutchOrder::try_from(validated).unwrap();

    // exclusivity enforced by the reactor, with no validation data
    let mut reactor_exclusive = dutch_order(swapper, U256::from(2), 5_000).into_sol();
    reactor_exclusive.exclusiveFiller = TEST_USERS[4];
    reactor_exclusive.exclusivityOverrideBps = U256::from(10);
    let reactor_exclusive = DutchOrder::try_from(reactor_exclusive).unwrap();

    // validation data naming no filler
    let mut unnamed = dutch_order(swapper, U256::from(3), 5_000).into_sol();
    unnamed.info.additionalValidationData =
        (Address::ZERO, U256::from(4_000)).abi_encode_params().into();
    let unnamed = DutchOrder::try_from(unnamed).unwrap();

    let validator = validator(
        MockBatchCaller::always(revert_with(errors::ValidationFailed {})),
        MockBitmapSource::new(),
    );
    let entries = [
        entry(validated),
        entry(reactor_exclusive),
        entry(unnamed),
        entry(dutch_order(swapper, U256::from(4), 5_000)),
    ];
    let outcomes = validator.validate_batch(&entries, HEAD).await.unwrap();
    assert_eq!(
        outcomes,
        vec![
            ValidationOutcome::ExclusivityPeriod,
            ValidationOutcome::ValidationFailed,
            ValidationOutcome::ValidationFailed,
            ValidationOutcome::ValidationFailed,
        ]
    );
}

#[tokio::test]
async fn single_and_empty() {
    let validator = validator(
        MockBatchCaller::always(CallResult::revert(Bytes::from_static(&[1, 2, 3, 4]))),
        MockBitmapSource::new(),
    );
    assert!(validator.validate_batch(&[], HEAD).await.unwrap().is_empty());

    let outcome =
        validator.validate(&entry(dutch_order(TEST_USERS[0], U256::from(1), 5_000)), HEAD).await;
    assert_eq!(outcome.unwrap(), ValidationOutcome::UnknownError);
}

#[tokio::test]
async fn missing_quoter_is_configuration_missing() {
    let constants = reactor_constants::ChainConstants::new(
        TEST_CONSTANTS.chain_id(),
        TEST_CONSTANTS.permit2(),
        None,
        TEST_CONSTANTS.reactors(),
        TEST_CONSTANTS.resolvers(),
    );
    let validator = OrderValidator::new(
        MockBatchCaller::always(quote_ok()),
        NonceAllocator::new(MockBitmapSource::new()),
        constants,
    );

    let err = validator
        .validate_batch(&[entry(dutch_order(TEST_USERS[0], U256::from(1), 5_000))], HEAD)
        .await
        .unwrap_err();
    assert!(matches!(err, ValidationError::Config(ConfigError::ConfigurationMissing { .. })));
}
