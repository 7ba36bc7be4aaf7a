use alloy::primitives::{Address, U256};
use parking_lot::Mutex;
use std::{collections::HashMap, sync::Arc};

/// The allocator's position for one owner: the lowest word not known to be
/// exhausted, and the bits of that word known to be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceCursor {
    /// The word index.
    pub word: U256,
    /// The bits of `word` known to be used, either read from the store or
    /// handed out by this process.
    pub bitmap: U256,
}

impl NonceCursor {
    /// Create a new cursor.
    pub const fn new(word: U256, bitmap: U256) -> Self {
        Self { word, bitmap }
    }
}

pub(crate) type CursorSlot = Arc<tokio::sync::Mutex<Option<NonceCursor>>>;

/// An optimistic per-owner cache of nonce cursors.
///
/// The cache assumes this process is the only one allocating from the nonce
/// ranges it tracks. A nonce consumed out of band after its word was cached
/// will not be seen until the word is re-read, so [`NonceAllocator::allocate`]
/// may hand out a nonce that is already used on chain. Call
/// [`NonceCache::invalidate`] after out-of-band activity for an owner.
///
/// Clones share state.
///
/// [`NonceAllocator::allocate`]: crate::NonceAllocator::allocate
#[derive(Clone, Default)]
pub struct NonceCache {
    slots: Arc<Mutex<HashMap<Address, CursorSlot>>>,
}

impl core::fmt::Debug for NonceCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NonceCache").field("owners", &self.len()).finish()
    }
}

impl NonceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the slot for `owner`. Holding the slot's lock
    /// serializes allocation for that owner.
    pub(crate) fn slot(&self, owner: Address) -> CursorSlot {
        self.slots.lock().entry(owner).or_default().clone()
    }

    fn existing_slot(&self, owner: Address) -> Option<CursorSlot> {
        self.slots.lock().get(&owner).cloned()
    }

    /// The current cursor for `owner`, if cached and not locked by an
    /// in-flight allocation.
    pub fn cursor(&self, owner: Address) -> Option<NonceCursor> {
        let slot = self.existing_slot(owner)?;
        let guard = slot.try_lock().ok()?;
        *guard
    }

    /// Forget the cursor for `owner`. The next allocation re-reads from word
    /// zero. Waits for any in-flight allocation for `owner` to finish.
    pub async fn invalidate(&self, owner: Address) {
        if let Some(slot) = self.existing_slot(owner) {
            *slot.lock().await = None;
        }
    }

    /// Forget every cursor.
    pub async fn clear(&self) {
        let slots: Vec<_> = self.slots.lock().values().cloned().collect();
        for slot in slots {
            *slot.lock().await = None;
        }
    }

    /// Merge a bitmap read from the store into the cached cursor, if the
    /// cursor is on the same word. Skipped if an allocation holds the slot.
    pub fn observe(&self, owner: Address, word: U256, bitmap: U256) {
        let Some(slot) = self.existing_slot(owner) else { return };
        let Ok(mut guard) = slot.try_lock() else { return };
        if let Some(cursor) = guard.as_mut().filter(|c| c.word == word) {
            cursor.bitmap |= bitmap;
        }
    }

    /// The number of owners with a slot.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// True if no owner has a slot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
