use alloy::primitives::{Address, Bytes, U256};
use core::future::Future;

/// A trait for reading Permit2 unordered-nonce bitmaps.
///
/// Implementors return the 256-bit bitmap stored for `(owner, word)`. Bit `i`
/// of word `w` is set when nonce `w * 256 + i` has been used.
pub trait NonceBitmapSource {
    /// The error type returned by reads.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Read the bitmap for `owner` at word index `word`.
    fn nonce_bitmap(
        &self,
        owner: Address,
        word: U256,
    ) -> impl Future<Output = Result<U256, Self::Error>> + Send;
}

/// A single call in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCall {
    /// The call target.
    pub to: Address,
    /// The calldata.
    pub data: Bytes,
}

/// The outcome of a single call in a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallResult {
    /// True if the call returned without reverting.
    pub success: bool,
    /// The return data, or the revert data if the call reverted.
    pub return_data: Bytes,
}

impl CallResult {
    /// A successful call.
    pub const fn success(return_data: Bytes) -> Self {
        Self { success: true, return_data }
    }

    /// A reverted call.
    pub const fn revert(return_data: Bytes) -> Self {
        Self { success: false, return_data }
    }
}

/// A trait for dry-running many calls at once.
///
/// Implementors return one [`CallResult`] per call, in input order. A revert
/// is a result, not an error; errors are reserved for transport failures.
pub trait BatchCaller {
    /// The error type returned by the transport.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Run `calls`, against the context of `block` when given, otherwise
    /// against the latest block.
    fn call_batch(
        &self,
        calls: Vec<BatchCall>,
        block: Option<u64>,
    ) -> impl Future<Output = Result<Vec<CallResult>, Self::Error>> + Send;
}
