//! Order fixtures built against the test chain's reactors.
use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolValue,
};
use reactor_bindings::{
    DutchInput, DutchOutput, ExclusiveDutchOrder, FeeEscalator, HybridInput, HybridOutput,
    OrderInfo, PriorityCosignerData, PriorityInput, PriorityOutput, RelayInput, RelayOrderInfo,
};
use reactor_constants::test_utils::{
    DUTCH_REACTOR, HYBRID_REACTOR, HYBRID_RESOLVER, PRIORITY_REACTOR, RELAY_REACTOR,
};
use reactor_types::{
    DutchOrder, HybridOrder, OrderVariant, PriorityOrder, RelayOrder, decay::WAD,
};

/// Input token of every fixture.
pub const INPUT_TOKEN: Address = Address::repeat_byte(0xa1);
/// Output token of every fixture.
pub const OUTPUT_TOKEN: Address = Address::repeat_byte(0xb1);

fn info(reactor: Address, swapper: Address, nonce: U256, deadline: u64) -> OrderInfo {
    OrderInfo {
        reactor,
        swapper,
        nonce,
        deadline: U256::from(deadline),
        additionalValidationContract: Address::ZERO,
        additionalValidationData: Bytes::new(),
    }
}

/// A Dutch order whose output decays from 1000 to 900 over `[0, deadline]`.
pub fn dutch_order(swapper: Address, nonce: U256, deadline: u64) -> DutchOrder {
    ExclusiveDutchOrder {
        info: info(DUTCH_REACTOR, swapper, nonce, deadline),
        decayStartTime: U256::ZERO,
        decayEndTime: U256::from(deadline),
        exclusiveFiller: Address::ZERO,
        exclusivityOverrideBps: U256::ZERO,
        input: DutchInput {
            token: INPUT_TOKEN,
            startAmount: U256::from(100),
            endAmount: U256::from(100),
        },
        outputs: vec![DutchOutput {
            token: OUTPUT_TOKEN,
            startAmount: U256::from(1000),
            endAmount: U256::from(900),
            recipient: swapper,
        }],
    }
    .try_into()
    .expect("valid dutch fixture")
}

/// A priority order whose auction opens at `start_block`.
pub fn priority_order(
    swapper: Address,
    nonce: U256,
    deadline: u64,
    start_block: u64,
) -> PriorityOrder {
    reactor_bindings::PriorityOrder {
        info: info(PRIORITY_REACTOR, swapper, nonce, deadline),
        cosigner: Address::ZERO,
        auctionStartBlock: U256::from(start_block),
        baselinePriorityFeeWei: U256::ZERO,
        input: PriorityInput {
            token: INPUT_TOKEN,
            amount: U256::from(100),
            mpsPerPriorityFeeWei: U256::ZERO,
        },
        outputs: vec![PriorityOutput {
            token: OUTPUT_TOKEN,
            amount: U256::from(1000),
            mpsPerPriorityFeeWei: U256::from(1),
            recipient: swapper,
        }],
        cosignerData: PriorityCosignerData { auctionTargetBlock: U256::ZERO },
        cosignature: Bytes::new(),
    }
    .try_into()
    .expect("valid priority fixture")
}

/// A hybrid order with a neutral scaling factor and no price curve, whose
/// auction opens at `start_block`.
pub fn hybrid_order(swapper: Address, nonce: U256, deadline: u64, start_block: u64) -> HybridOrder {
    reactor_bindings::HybridOrder {
        info: info(HYBRID_REACTOR, swapper, nonce, deadline),
        cosigner: Address::ZERO,
        input: HybridInput { token: INPUT_TOKEN, maxAmount: U256::from(100) },
        outputs: vec![HybridOutput {
            token: OUTPUT_TOKEN,
            minAmount: U256::from(1000),
            recipient: swapper,
        }],
        auctionStartBlock: U256::from(start_block),
        baselinePriorityFeeWei: U256::ZERO,
        scalingFactor: WAD,
        priceCurve: vec![],
        cosignerData: Default::default(),
        cosignature: Bytes::new(),
    }
    .try_into()
    .expect("valid hybrid fixture")
}

/// A relay order paying a fee escalating from 1 to 5 over `[0, deadline]`.
pub fn relay_order(swapper: Address, nonce: U256, deadline: u64) -> RelayOrder {
    reactor_bindings::RelayOrder {
        info: RelayOrderInfo {
            reactor: RELAY_REACTOR,
            swapper,
            nonce,
            deadline: U256::from(deadline),
        },
        input: RelayInput { token: INPUT_TOKEN, amount: U256::from(100), recipient: swapper },
        fee: FeeEscalator {
            token: INPUT_TOKEN,
            startAmount: U256::from(1),
            endAmount: U256::from(5),
            startTime: U256::ZERO,
            endTime: U256::from(deadline),
        },
        universalRouterCalldata: Bytes::new(),
    }
    .try_into()
    .expect("valid relay fixture")
}

/// Wrap encoded order bytes in a resolver-addressed payload.
pub fn resolver_payload(resolver: Address, order: &OrderVariant) -> Bytes {
    (resolver, order.encode()).abi_encode_params().into()
}

/// A hybrid order addressed through the test hybrid resolver.
pub fn hybrid_resolver_payload(order: &HybridOrder) -> Bytes {
    resolver_payload(HYBRID_RESOLVER, &order.clone().into())
}
