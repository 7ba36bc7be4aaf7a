//! Mock implementations of the reactor-orders collaborator traits.
use alloy::{
    primitives::{Address, Bytes, U256},
    providers::{Provider, ProviderBuilder},
    sol_types::{SolError, SolValue},
    transports::mock::Asserter,
};
use core::convert::Infallible;
use parking_lot::Mutex;
use reactor_bindings::{OutputToken, ResolvedOrder};
use reactor_orders::{
    BatchCall, BatchCaller, CallResult, NonceBitmapSource,
    nonce::{build_nonce, split_nonce},
};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

/// A mock [`NonceBitmapSource`] backed by an in-memory map. Unset words read
/// as zero. Every read yields to the runtime once, so concurrent callers
/// interleave.
#[derive(Debug, Clone, Default)]
pub struct MockBitmapSource {
    bitmaps: Arc<Mutex<HashMap<(Address, U256), U256>>>,
    reads: Arc<AtomicUsize>,
}

impl MockBitmapSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bitmap for a word.
    pub fn set(&self, owner: Address, word: U256, bitmap: U256) {
        self.bitmaps.lock().insert((owner, word), bitmap);
    }

    /// Mark every nonce in `word` used.
    pub fn fill_word(&self, owner: Address, word: U256) {
        self.set(owner, word, U256::MAX);
    }

    /// Mark a nonce used, as a fill or cancellation would.
    pub fn mark_used(&self, owner: Address, nonce: U256) {
        let (word, bit) = split_nonce(nonce);
        let mut bitmaps = self.bitmaps.lock();
        *bitmaps.entry((owner, word)).or_default() |= U256::from(1) << bit as usize;
    }

    /// The number of reads served.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl NonceBitmapSource for MockBitmapSource {
    type Error = Infallible;

    async fn nonce_bitmap(&self, owner: Address, word: U256) -> Result<U256, Self::Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(self.bitmaps.lock().get(&(owner, word)).copied().unwrap_or_default())
    }
}

type Responder = dyn Fn(&BatchCall, Option<u64>) -> CallResult + Send + Sync;

/// A mock [`BatchCaller`] answering each call with a closure and recording
/// every batch it receives.
#[derive(Clone)]
pub struct MockBatchCaller {
    responder: Arc<Responder>,
    batches: Arc<Mutex<Vec<(Option<u64>, Vec<BatchCall>)>>>,
}

impl core::fmt::Debug for MockBatchCaller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MockBatchCaller").field("batches", &self.batches.lock().len()).finish()
    }
}

impl MockBatchCaller {
    /// Create a caller answering with `responder`.
    pub fn new(
        responder: impl Fn(&BatchCall, Option<u64>) -> CallResult + Send + Sync + 'static,
    ) -> Self {
        Self { responder: Arc::new(responder), batches: Default::default() }
    }

    /// Create a caller answering every call with `result`.
    pub fn always(result: CallResult) -> Self {
        Self::new(move |_, _| result.clone())
    }

    /// Every batch received, with its block override.
    pub fn batches(&self) -> Vec<(Option<u64>, Vec<BatchCall>)> {
        self.batches.lock().clone()
    }
}

impl BatchCaller for MockBatchCaller {
    type Error = Infallible;

    async fn call_batch(
        &self,
        calls: Vec<BatchCall>,
        block: Option<u64>,
    ) -> Result<Vec<CallResult>, Self::Error> {
        let results = calls.iter().map(|call| (self.responder)(call, block)).collect();
        self.batches.lock().push((block, calls));
        Ok(results)
    }
}

/// A quoter response reporting a successful quote, carrying an
/// ABI-encoded resolved order with one output.
pub fn quote_ok() -> CallResult {
    let resolved =
        ResolvedOrder { outputs: vec![OutputToken::default()], ..Default::default() };
    CallResult::revert(resolved.abi_encode().into())
}

/// A reverted call carrying a custom error.
pub fn revert_with<E: SolError>(error: E) -> CallResult {
    CallResult::revert(error.abi_encode().into())
}

/// A provider over alloy's mocked transport, and the asserter feeding it.
pub fn mock_provider() -> (impl Provider + Clone, Asserter) {
    let asserter = Asserter::new();
    let provider =
        ProviderBuilder::new().disable_recommended_fillers().connect_mocked_client(asserter.clone());
    (provider, asserter)
}

/// Build a nonce from a word index and bit position.
pub fn nonce_at(word: u64, bit: u8) -> U256 {
    build_nonce(U256::from(word), bit)
}
