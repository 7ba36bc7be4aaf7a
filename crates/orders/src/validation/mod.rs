//! Order validation by dry-run against the order quoter.

mod revert;
pub use revert::{
    QUOTE_MIN_LENGTH, classify_call, classify_revert, decode_quote, is_quote_success,
    outcome_for_selector,
};

use crate::{
    nonce::{NonceAllocator, NonceError},
    traits::{BatchCall, BatchCaller, NonceBitmapSource},
};
use alloy::{primitives::Bytes, sol_types::SolCall};
use futures_util::future::try_join_all;
use reactor_bindings::IOrderQuoter;
use reactor_constants::{ChainConstants, ConfigError};
use reactor_types::{OrderVariant, ValidationOutcome};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// The chain state orders are validated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainHead {
    /// The latest block number.
    pub number: u64,
    /// The latest block timestamp, in seconds.
    pub timestamp: u64,
}

impl ChainHead {
    /// Create a new head.
    pub const fn new(number: u64, timestamp: u64) -> Self {
        Self { number, timestamp }
    }
}

/// An order to validate, with the bytes and signature the quoter receives.
#[derive(Debug, Clone)]
pub struct ValidationEntry {
    /// The decoded order.
    pub order: OrderVariant,
    /// The order bytes passed to the quoter.
    pub encoded: Bytes,
    /// The swapper's signature.
    pub signature: Bytes,
}

impl ValidationEntry {
    /// Create an entry, encoding the order with its own ABI layout.
    pub fn new(order: OrderVariant, signature: Bytes) -> Self {
        let encoded = order.encode();
        Self { order, encoded, signature }
    }

    /// Replace the bytes passed to the quoter, e.g. with a resolver-addressed
    /// payload.
    pub fn with_encoded(mut self, encoded: Bytes) -> Self {
        self.encoded = encoded;
        self
    }

    fn quote_call(&self, quoter: alloy::primitives::Address) -> BatchCall {
        let data = IOrderQuoter::quoteCall {
            order: self.encoded.clone(),
            sig: self.signature.clone(),
        }
        .abi_encode();
        BatchCall { to: quoter, data: data.into() }
    }
}

/// Errors raised by the [`OrderValidator`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The batch caller failed.
    #[error("batch call failed: {0}")]
    Transport(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// A nonce lookup failed.
    #[error(transparent)]
    Nonce(#[from] NonceError),
    /// The chain is missing configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The batch caller returned the wrong number of results.
    #[error("batch caller returned {got} results for {expected} calls")]
    LengthMismatch {
        /// The number of calls.
        expected: usize,
        /// The number of results.
        got: usize,
    },
}

/// Validates orders by dry-running them through the order quoter, then
/// disambiguating terminal states with the nonce store.
#[derive(Debug, Clone)]
pub struct OrderValidator<C, S> {
    caller: C,
    nonces: NonceAllocator<S>,
    constants: ChainConstants,
}

impl<C, S> OrderValidator<C, S> {
    /// Create a new validator.
    pub const fn new(caller: C, nonces: NonceAllocator<S>, constants: ChainConstants) -> Self {
        Self { caller, nonces, constants }
    }

    /// Get a reference to the batch caller.
    pub const fn caller(&self) -> &C {
        &self.caller
    }

    /// Get a reference to the nonce allocator.
    pub const fn nonces(&self) -> &NonceAllocator<S> {
        &self.nonces
    }

    /// Get a reference to the chain constants.
    pub const fn constants(&self) -> &ChainConstants {
        &self.constants
    }
}

impl<C, S> OrderValidator<C, S>
where
    C: BatchCaller + Sync,
    S: NonceBitmapSource + Sync,
{
    /// Refine a dry-run outcome with state the dry-run cannot see.
    ///
    /// - An expired order whose nonce is used was filled or cancelled first,
    ///   and is reported as [`ValidationOutcome::NonceUsed`].
    /// - A fillable order whose block requirement is above the head is
    ///   reported as [`ValidationOutcome::OrderNotFillableYet`].
    pub async fn resolve_terminal_state(
        &self,
        order: &OrderVariant,
        outcome: ValidationOutcome,
        head: ChainHead,
    ) -> Result<ValidationOutcome, ValidationError> {
        if outcome == ValidationOutcome::Expired || order.is_expired_at(head.timestamp) {
            if self.nonces.is_used(order.swapper(), order.nonce()).await? {
                return Ok(ValidationOutcome::NonceUsed);
            }
            return Ok(ValidationOutcome::Expired);
        }

        if outcome.is_ok() && order.block_requirement().is_some_and(|block| block > head.number) {
            return Ok(ValidationOutcome::OrderNotFillableYet);
        }

        Ok(outcome)
    }

    /// Validate a batch of orders, returning one outcome per entry in input
    /// order.
    ///
    /// Orders with a block requirement above the head are dry-run pinned at
    /// that block. Each distinct block is one batch call, and the batches run
    /// concurrently.
    #[instrument(skip_all, fields(orders = entries.len(), block = head.number))]
    pub async fn validate_batch(
        &self,
        entries: &[ValidationEntry],
        head: ChainHead,
    ) -> Result<Vec<ValidationOutcome>, ValidationError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let quoter = self.constants.require_order_quoter()?;

        let mut groups = BTreeMap::<Option<u64>, Vec<usize>>::new();
        for (index, entry) in entries.iter().enumerate() {
            let block = entry.order.block_requirement().filter(|block| *block > head.number);
            groups.entry(block).or_default().push(index);
        }
        debug!(groups = groups.len(), "dispatching quote batches");

        let batches = groups.into_iter().map(|(block, indices)| async move {
            let calls = indices.iter().map(|&i| entries[i].quote_call(quoter)).collect();
            let results = self
                .caller
                .call_batch(calls, block)
                .await
                .map_err(|e| ValidationError::Transport(Box::new(e)))?;
            if results.len() != indices.len() {
                return Err(ValidationError::LengthMismatch {
                    expected: indices.len(),
                    got: results.len(),
                });
            }
            Ok(indices.into_iter().zip(results))
        });

        let mut outcomes = vec![ValidationOutcome::UnknownError; entries.len()];
        for (index, result) in try_join_all(batches).await?.into_iter().flatten() {
            outcomes[index] = classify_call(&result, Some(&entries[index].order));
        }

        let outcomes = try_join_all(
            entries
                .iter()
                .zip(outcomes)
                .map(|(entry, outcome)| self.resolve_terminal_state(&entry.order, outcome, head)),
        )
        .await?;

        debug!(?outcomes, "validated batch");
        Ok(outcomes)
    }

    /// Validate a single order.
    pub async fn validate(
        &self,
        entry: &ValidationEntry,
        head: ChainHead,
    ) -> Result<ValidationOutcome, ValidationError> {
        let mut outcomes = self.validate_batch(core::slice::from_ref(entry), head).await?;
        outcomes.pop().ok_or(ValidationError::LengthMismatch { expected: 1, got: 0 })
    }
}
