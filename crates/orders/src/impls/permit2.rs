use crate::traits::NonceBitmapSource;
use alloy::{
    network::TransactionBuilder,
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::{SolCall, SolValue},
    transports::{TransportError, TransportErrorKind},
};
use reactor_bindings::IPermit2;
use reactor_constants::ChainConstants;

/// Reads nonce bitmaps from the Permit2 contract through a provider.
#[derive(Debug, Clone)]
pub struct Permit2Source<P> {
    provider: P,
    permit2: Address,
}

impl<P> Permit2Source<P> {
    /// Create a source reading from the Permit2 deployment at `permit2`.
    pub const fn new(provider: P, permit2: Address) -> Self {
        Self { provider, permit2 }
    }

    /// Create a source reading from the chain's configured Permit2.
    pub const fn for_chain(provider: P, constants: &ChainConstants) -> Self {
        Self::new(provider, constants.permit2())
    }

    /// Get the Permit2 address.
    pub const fn permit2(&self) -> Address {
        self.permit2
    }
}

impl<P> NonceBitmapSource for Permit2Source<P>
where
    P: Provider + Send + Sync,
{
    type Error = TransportError;

    async fn nonce_bitmap(&self, owner: Address, word: U256) -> Result<U256, Self::Error> {
        let call = IPermit2::nonceBitmapCall { owner, wordPos: word };
        let tx = TransactionRequest::default().with_to(self.permit2).with_input(call.abi_encode());
        let output = self.provider.call(tx).await?;
        U256::abi_decode(&output).map_err(TransportErrorKind::custom)
    }
}
