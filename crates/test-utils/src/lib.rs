//! Mocks, fixtures, and signers for testing reactor order components.

pub mod mocks;
pub mod orders;
pub mod users;

pub use reactor_constants::test_utils as test_constants;

/// Install a `tracing` subscriber filtered by `RUST_LOG`. Safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
