use alloy::primitives::{Address, U256};
use reactor_orders::{
    NonceAllocator, NonceAllocatorConfig, NonceCache, NonceError, nonce::cancellation_params,
};
use reactor_test_utils::{
    init_tracing,
    mocks::{MockBitmapSource, nonce_at},
    users::TEST_USERS,
};
use std::collections::HashSet;

#[tokio::test]
async fn allocates_lowest_free_nonce() {
    init_tracing();
    let owner = TEST_USERS[0];
    let source = MockBitmapSource::new();
    source.set(owner, U256::ZERO, U256::from(0b0111));

    let allocator = NonceAllocator::new(source.clone());
    assert_eq!(allocator.allocate(owner).await.unwrap(), U256::from(3));
    assert_eq!(allocator.allocate(owner).await.unwrap(), U256::from(4));

    // the second allocation is served from the cache
    assert_eq!(source.reads(), 1);
}

#[tokio::test]
async fn advances_past_full_words() {
    let owner = TEST_USERS[0];
    let source = MockBitmapSource::new();
    source.fill_word(owner, U256::ZERO);
    source.fill_word(owner, U256::from(1));

    let allocator = NonceAllocator::new(source.clone());
    assert_eq!(allocator.allocate(owner).await.unwrap(), nonce_at(2, 0));
    assert_eq!(source.reads(), 3);
    assert_eq!(allocator.cache().cursor(owner).unwrap().word, U256::from(2));
}

#[tokio::test]
async fn scan_is_bounded() {
    let owner = TEST_USERS[1];
    let source = MockBitmapSource::new();
    for word in 0..4u64 {
        source.fill_word(owner, U256::from(word));
    }

    let allocator = NonceAllocator::new(source.clone())
        .with_config(NonceAllocatorConfig::default().with_max_words(4));
    let err = allocator.allocate(owner).await.unwrap_err();
    match err {
        NonceError::Exhausted { owner: o, start_word, words_scanned } => {
            assert_eq!(o, owner);
            assert_eq!(start_word, U256::ZERO);
            assert_eq!(words_scanned, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(source.reads(), 4);

    // the next call resumes from the last word scanned
    assert_eq!(allocator.allocate(owner).await.unwrap(), nonce_at(4, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_allocations_are_unique() {
    let owner = TEST_USERS[2];
    let source = MockBitmapSource::new();
    source.fill_word(owner, U256::ZERO);
    let allocator = NonceAllocator::new(source);

    let handles: Vec<_> = (0..64)
        .map(|_| {
            let allocator = allocator.clone();
            tokio::spawn(async move { allocator.allocate(owner).await.unwrap() })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        assert!(seen.insert(handle.await.unwrap()));
    }
    assert_eq!(seen.len(), 64);
    assert!(seen.iter().all(|nonce| *nonce >= U256::from(256) && *nonce < U256::from(320)));
}

#[tokio::test]
async fn owners_are_independent() {
    let source = MockBitmapSource::new();
    let allocator = NonceAllocator::new(source);
    let a = allocator.allocate(TEST_USERS[0]).await.unwrap();
    let b = allocator.allocate(TEST_USERS[1]).await.unwrap();
    assert_eq!(a, U256::ZERO);
    assert_eq!(b, U256::ZERO);
}

#[tokio::test]
async fn is_used_reads_the_store() {
    let owner = TEST_USERS[3];
    let source = MockBitmapSource::new();
    let allocator = NonceAllocator::new(source.clone());

    let nonce = allocator.allocate(owner).await.unwrap();
    // allocated locally, but not yet used on chain
    assert!(!allocator.is_used(owner, nonce).await.unwrap());

    source.mark_used(owner, nonce);
    assert!(allocator.is_used(owner, nonce).await.unwrap());
    assert!(!allocator.is_used(Address::repeat_byte(9), nonce).await.unwrap());
}

#[tokio::test]
async fn is_used_merges_out_of_band_use() {
    let owner = TEST_USERS[4];
    let source = MockBitmapSource::new();
    let allocator = NonceAllocator::new(source.clone());
    assert_eq!(allocator.allocate(owner).await.unwrap(), U256::ZERO);

    // nonce 1 is consumed by another process
    source.mark_used(owner, U256::from(1));
    assert!(allocator.is_used(owner, U256::from(1)).await.unwrap());

    assert_eq!(allocator.allocate(owner).await.unwrap(), U256::from(2));
}

#[tokio::test]
async fn invalidate_rereads() {
    let owner = TEST_USERS[5];
    let source = MockBitmapSource::new();
    let cache = NonceCache::new();
    let allocator = NonceAllocator::with_cache(source.clone(), cache.clone());

    assert_eq!(allocator.allocate(owner).await.unwrap(), U256::ZERO);
    assert!(cache.cursor(owner).is_some());

    source.fill_word(owner, U256::ZERO);
    allocator.invalidate(owner).await;
    assert!(cache.cursor(owner).is_none());
    assert_eq!(allocator.allocate(owner).await.unwrap(), nonce_at(1, 0));
}

#[test]
fn cancellation_pairs() {
    let params = cancellation_params([U256::from(5), U256::from(5 + 256)]);
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].word, U256::ZERO);
    assert_eq!(params[1].word, U256::from(1));
    assert!(params.iter().all(|p| p.mask.count_ones() == 1));

    let params = cancellation_params([U256::from(3), U256::from(5)]);
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].mask, U256::from(0b101000));
}
