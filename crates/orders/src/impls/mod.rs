mod eth_call;
pub use eth_call::EthCallBatcher;

mod permit2;
pub use permit2::Permit2Source;
