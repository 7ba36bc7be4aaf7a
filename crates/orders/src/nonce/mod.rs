//! Permit2 unordered-nonce allocation.
//!
//! Permit2 stores nonces as bitmaps: nonce `n` is bit `n & 0xff` of word
//! `n >> 8`. The allocator hands out the lowest nonce not known to be used.

mod cache;
pub use cache::{NonceCache, NonceCursor};

use crate::traits::NonceBitmapSource;
use alloy::primitives::{Address, U256};
use reactor_bindings::IPermit2;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

/// Number of nonces per bitmap word.
pub const BITS_PER_WORD: usize = 256;

/// Configuration for a [`NonceAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceAllocatorConfig {
    /// The most words a single allocation reads before giving up.
    pub max_words: u64,
}

impl NonceAllocatorConfig {
    /// The default scan bound.
    pub const DEFAULT_MAX_WORDS: u64 = 1024;

    /// Set the scan bound. Zero is treated as one.
    pub const fn with_max_words(mut self, max_words: u64) -> Self {
        self.max_words = max_words;
        self
    }
}

impl Default for NonceAllocatorConfig {
    fn default() -> Self {
        Self { max_words: Self::DEFAULT_MAX_WORDS }
    }
}

/// Errors raised by the [`NonceAllocator`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NonceError {
    /// Every word in the scan window is fully used.
    #[error("no free nonce for {owner} in {words_scanned} words from word {start_word}")]
    Exhausted {
        /// The nonce owner.
        owner: Address,
        /// The first word scanned.
        start_word: U256,
        /// The number of words scanned.
        words_scanned: u64,
    },
    /// The bitmap store failed.
    #[error("failed to read nonce bitmap: {0}")]
    Source(#[source] Box<dyn core::error::Error + Send + Sync>),
}

/// Split a nonce into its word index and bit position.
pub fn split_nonce(nonce: U256) -> (U256, u8) {
    let bit = nonce.as_limbs()[0] as u8;
    (nonce >> 8usize, bit)
}

/// Build a nonce from a word index and bit position.
pub fn build_nonce(word: U256, bit: u8) -> U256 {
    (word << 8usize) | U256::from(bit)
}

/// The lowest unset bit of `bitmap`, if any.
pub fn first_unset_bit(bitmap: U256) -> Option<u8> {
    let free = !bitmap;
    if free.is_zero() {
        return None;
    }
    Some(free.trailing_zeros() as u8)
}

/// One Permit2 `invalidateUnorderedNonces` argument pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceCancellation {
    /// The word index.
    pub word: U256,
    /// The bits of `word` to invalidate.
    pub mask: U256,
}

/// Group `nonces` by word, producing one `(word, mask)` pair per distinct
/// word, ordered by word.
pub fn cancellation_params(nonces: impl IntoIterator<Item = U256>) -> Vec<NonceCancellation> {
    let mut words = BTreeMap::<U256, U256>::new();
    for nonce in nonces {
        let (word, bit) = split_nonce(nonce);
        *words.entry(word).or_default() |= U256::from(1) << bit as usize;
    }
    words.into_iter().map(|(word, mask)| NonceCancellation { word, mask }).collect()
}

/// Permit2 calls cancelling every nonce in `nonces`.
pub fn cancellation_calls(
    nonces: impl IntoIterator<Item = U256>,
) -> Vec<IPermit2::invalidateUnorderedNoncesCall> {
    cancellation_params(nonces)
        .into_iter()
        .map(|c| IPermit2::invalidateUnorderedNoncesCall { wordPos: c.word, mask: c.mask })
        .collect()
}

/// Allocates Permit2 unordered nonces, caching bitmaps per owner.
///
/// Allocations for the same owner are serialized. Allocations for different
/// owners run independently. See [`NonceCache`] for the staleness contract.
#[derive(Debug, Clone)]
pub struct NonceAllocator<S> {
    source: S,
    cache: NonceCache,
    config: NonceAllocatorConfig,
}

impl<S> NonceAllocator<S> {
    /// Create an allocator with a fresh cache and the default config.
    pub fn new(source: S) -> Self {
        Self::with_cache(source, NonceCache::new())
    }

    /// Create an allocator over an existing cache.
    pub fn with_cache(source: S, cache: NonceCache) -> Self {
        Self { source, cache, config: NonceAllocatorConfig::default() }
    }

    /// Set the config.
    pub const fn with_config(mut self, config: NonceAllocatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Get a reference to the bitmap source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Get a reference to the cache.
    pub const fn cache(&self) -> &NonceCache {
        &self.cache
    }

    /// Get the config.
    pub const fn config(&self) -> NonceAllocatorConfig {
        self.config
    }

    /// Forget the cached cursor for `owner`.
    pub async fn invalidate(&self, owner: Address) {
        self.cache.invalidate(owner).await
    }
}

impl<S> NonceAllocator<S>
where
    S: NonceBitmapSource + Sync,
{
    async fn read(&self, owner: Address, word: U256) -> Result<U256, NonceError> {
        self.source.nonce_bitmap(owner, word).await.map_err(|e| NonceError::Source(Box::new(e)))
    }

    /// Allocate the lowest nonce for `owner` not known to be used.
    ///
    /// The returned nonce is marked used in the cache before returning, so
    /// later calls on this allocator never return it again.
    #[instrument(skip_all, fields(%owner))]
    pub async fn allocate(&self, owner: Address) -> Result<U256, NonceError> {
        let slot = self.cache.slot(owner);
        let mut guard = slot.lock().await;

        let mut cursor = match *guard {
            Some(cursor) => {
                debug!(word = %cursor.word, "using cached nonce word");
                cursor
            }
            None => NonceCursor::new(U256::ZERO, self.read(owner, U256::ZERO).await?),
        };
        let start_word = cursor.word;
        let max_words = self.config.max_words.max(1);
        let mut words_scanned = 1;

        loop {
            if let Some(bit) = first_unset_bit(cursor.bitmap) {
                cursor.bitmap |= U256::from(1) << bit as usize;
                *guard = Some(cursor);
                let nonce = build_nonce(cursor.word, bit);
                debug!(%nonce, "allocated nonce");
                return Ok(nonce);
            }

            if words_scanned >= max_words {
                *guard = Some(cursor);
                warn!(%start_word, words_scanned, "nonce scan exhausted");
                return Err(NonceError::Exhausted { owner, start_word, words_scanned });
            }

            let word = cursor.word + U256::from(1);
            debug!(%word, "nonce word exhausted, advancing");
            cursor = NonceCursor::new(word, self.read(owner, word).await?);
            words_scanned += 1;
        }
    }

    /// Check the store for whether `nonce` has been used by `owner`.
    ///
    /// This always reads the store. The read is merged into the cache.
    pub async fn is_used(&self, owner: Address, nonce: U256) -> Result<bool, NonceError> {
        let (word, bit) = split_nonce(nonce);
        let bitmap = self.read(owner, word).await?;
        self.cache.observe(owner, word, bitmap);
        Ok(bitmap.bit(bit as usize))
    }
}
