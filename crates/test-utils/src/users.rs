//! Deterministic test signers.
use alloy::{
    primitives::{Address, B256},
    signers::local::PrivateKeySigner,
};
use std::sync::LazyLock;

/// Test signers, with private keys `0x0101..01` through `0x0808..08`.
pub static TEST_SIGNERS: LazyLock<[PrivateKeySigner; 8]> = LazyLock::new(|| {
    core::array::from_fn(|i| {
        PrivateKeySigner::from_bytes(&B256::repeat_byte(i as u8 + 1)).expect("valid test key")
    })
});

/// Addresses of [`TEST_SIGNERS`].
pub static TEST_USERS: LazyLock<[Address; 8]> =
    LazyLock::new(|| core::array::from_fn(|i| TEST_SIGNERS[i].address()));
