use crate::traits::{BatchCall, BatchCaller, CallResult};
use alloy::{
    eips::BlockNumberOrTag,
    network::TransactionBuilder,
    primitives::{Bytes, U256},
    providers::Provider,
    rpc::types::{BlockOverrides, TransactionRequest, state::StateOverride},
    transports::{RpcError, TransportError},
};
use futures_util::future::try_join_all;
use tracing::{debug, instrument};

/// Runs batches as concurrent `eth_call`s through a provider.
///
/// Reverts are recovered from the JSON-RPC error payload. Calls pinned to a
/// block run against the latest state with the block number overridden, so
/// a future block requirement can be checked before that block exists.
#[derive(Debug, Clone)]
pub struct EthCallBatcher<P> {
    provider: P,
}

impl<P> EthCallBatcher<P> {
    /// Create a new batcher.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get a reference to the provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> EthCallBatcher<P>
where
    P: Provider + Send + Sync,
{
    async fn call_one(&self, call: BatchCall, block: Option<u64>) -> Result<CallResult, TransportError> {
        let tx = TransactionRequest::default().with_to(call.to).with_input(call.data);

        let result = match block {
            None => self.provider.call(tx).await,
            Some(number) => {
                let overrides =
                    BlockOverrides { number: Some(U256::from(number)), ..Default::default() };
                self.provider
                    .raw_request::<_, Bytes>(
                        "eth_call".into(),
                        (tx, BlockNumberOrTag::Latest, StateOverride::default(), overrides),
                    )
                    .await
            }
        };

        match result {
            Ok(output) => Ok(CallResult::success(output)),
            Err(RpcError::ErrorResp(payload)) => match payload.as_revert_data() {
                Some(data) => Ok(CallResult::revert(data)),
                None => Err(RpcError::ErrorResp(payload)),
            },
            Err(err) => Err(err),
        }
    }
}

impl<P> BatchCaller for EthCallBatcher<P>
where
    P: Provider + Send + Sync,
{
    type Error = TransportError;

    #[instrument(skip_all, fields(calls = calls.len(), ?block))]
    async fn call_batch(
        &self,
        calls: Vec<BatchCall>,
        block: Option<u64>,
    ) -> Result<Vec<CallResult>, Self::Error> {
        let results = try_join_all(calls.into_iter().map(|call| self.call_one(call, block))).await?;
        debug!(reverted = results.iter().filter(|r| !r.success).count(), "batch complete");
        Ok(results)
    }
}
