use alloy::primitives::{Address, U256};
use reactor_bindings::OrderInfo;

/// The chain state an order is resolved against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionContext {
    timestamp: u64,
    block_number: u64,
    #[serde(default)]
    base_fee_wei: Option<U256>,
    #[serde(default)]
    priority_fee_wei: U256,
    #[serde(default)]
    filler: Option<Address>,
}

impl ResolutionContext {
    /// Create a context at the given block, with no base fee, no priority
    /// fee, and no filler.
    pub const fn new(timestamp: u64, block_number: u64) -> Self {
        Self { timestamp, block_number, base_fee_wei: None, priority_fee_wei: U256::ZERO, filler: None }
    }

    /// Set the block base fee. Without one, base-fee adjustments are skipped.
    pub const fn with_base_fee(mut self, base_fee_wei: U256) -> Self {
        self.base_fee_wei = Some(base_fee_wei);
        self
    }

    /// Set the priority fee paid by the fill transaction.
    pub const fn with_priority_fee(mut self, priority_fee_wei: U256) -> Self {
        self.priority_fee_wei = priority_fee_wei;
        self
    }

    /// Set the filler. Without one, exclusivity overrides are not applied.
    pub const fn with_filler(mut self, filler: Address) -> Self {
        self.filler = Some(filler);
        self
    }

    /// Get the block timestamp.
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Get the block number.
    pub const fn block_number(&self) -> u64 {
        self.block_number
    }

    /// Get the block base fee.
    pub const fn base_fee_wei(&self) -> Option<U256> {
        self.base_fee_wei
    }

    /// Get the priority fee.
    pub const fn priority_fee_wei(&self) -> U256 {
        self.priority_fee_wei
    }

    /// Get the filler.
    pub const fn filler(&self) -> Option<Address> {
        self.filler
    }
}

/// A token and an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TokenAmount {
    /// The token.
    pub token: Address,
    /// The amount.
    pub amount: U256,
}

/// The resolved input of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedInput {
    /// The input token.
    pub token: Address,
    /// The amount the swapper pays at resolution time.
    pub amount: U256,
    /// The most the swapper can ever pay.
    pub max_amount: U256,
}

/// A resolved output of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedOutput {
    /// The output token.
    pub token: Address,
    /// The amount the recipient receives.
    pub amount: U256,
    /// The recipient.
    pub recipient: Address,
}

/// An order resolved to concrete amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrder {
    /// The order's info.
    pub info: OrderInfo,
    /// The resolved input.
    pub input: ResolvedInput,
    /// The resolved outputs.
    pub outputs: Vec<ResolvedOutput>,
    /// The resolved relay fee, for relay orders.
    pub fee: Option<TokenAmount>,
}
