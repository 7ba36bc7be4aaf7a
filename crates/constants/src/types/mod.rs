mod error;
pub use error::ConfigError;

mod order_type;
pub use order_type::{OrderType, ParseOrderTypeError};

mod reactors;
pub use reactors::{ReactorAddresses, ResolverAddresses};

mod chains;
pub use chains::{KnownChains, ParseChainError};

use crate::env_utils::{load_address_opt, load_u64};
use alloy::primitives::Address;
use std::str::FromStr;

/// Reactor system constants for a single chain.
///
/// Holds the chain ID, the Permit2 and order quoter deployments, and the
/// reactor and resolver tables used to route serialized orders to an order
/// type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConstants {
    /// Chain ID.
    chain_id: u64,
    /// Permit2 deployment.
    #[serde(default = "default_permit2")]
    permit2: Address,
    /// Order quoter deployment, if any.
    #[serde(default)]
    order_quoter: Option<Address>,
    /// Reactor table.
    #[serde(default)]
    reactors: ReactorAddresses,
    /// Resolver table.
    #[serde(default)]
    resolvers: ResolverAddresses,
}

const fn default_permit2() -> Address {
    crate::PERMIT2_ADDRESS
}

impl ChainConstants {
    /// Create a new set of constants.
    pub const fn new(
        chain_id: u64,
        permit2: Address,
        order_quoter: Option<Address>,
        reactors: ReactorAddresses,
        resolvers: ResolverAddresses,
    ) -> Self {
        Self { chain_id, permit2, order_quoter, reactors, resolvers }
    }

    /// Get the hard-coded Ethereum mainnet constants.
    pub const fn mainnet() -> Self {
        crate::chains::mainnet::MAINNET
    }

    /// Get the hard-coded Base constants.
    pub const fn base() -> Self {
        crate::chains::base::BASE
    }

    /// Get the hard-coded Arbitrum One constants.
    pub const fn arbitrum() -> Self {
        crate::chains::arbitrum::ARBITRUM
    }

    /// Get the hard-coded local test constants.
    #[cfg(any(test, feature = "test-utils"))]
    pub const fn test() -> Self {
        crate::chains::test_utils::TEST_CONSTANTS
    }

    /// Get the hard-coded constants for a chain ID, if the chain is known.
    pub const fn for_chain_id(chain_id: u64) -> Option<Self> {
        match KnownChains::from_chain_id(chain_id) {
            Some(chain) => Some(chain.constants()),
            None => None,
        }
    }

    /// Load the constants from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Load the constants from environment variables.
    ///
    /// `REACTOR_CHAIN_ID` is required. `PERMIT2_ADDRESS` defaults to the
    /// canonical deployment. Every reactor, resolver, and quoter variable is
    /// optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let chain_id = load_u64("REACTOR_CHAIN_ID")?;
        let permit2 = load_address_opt("PERMIT2_ADDRESS")?.unwrap_or(crate::PERMIT2_ADDRESS);
        let order_quoter = load_address_opt("ORDER_QUOTER_ADDRESS")?;

        let mut reactors = ReactorAddresses::new();
        for (key, ty) in [
            ("DUTCH_REACTOR", OrderType::Dutch),
            ("DUTCH_V2_REACTOR", OrderType::DutchV2),
            ("DUTCH_V3_REACTOR", OrderType::DutchV3),
            ("PRIORITY_REACTOR", OrderType::Priority),
            ("HYBRID_REACTOR", OrderType::Hybrid),
            ("RELAY_REACTOR", OrderType::Relay),
        ] {
            if let Some(address) = load_address_opt(key)? {
                reactors = reactors.with(ty, address);
            }
        }

        let mut resolvers = ResolverAddresses::new();
        for (key, ty) in [
            ("DUTCH_V3_RESOLVER", OrderType::DutchV3),
            ("PRIORITY_RESOLVER", OrderType::Priority),
            ("HYBRID_RESOLVER", OrderType::Hybrid),
        ] {
            if let Some(address) = load_address_opt(key)? {
                resolvers = resolvers.with(ty, address);
            }
        }

        Ok(Self::new(chain_id, permit2, order_quoter, reactors, resolvers))
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the Permit2 address.
    pub const fn permit2(&self) -> Address {
        self.permit2
    }

    /// Get the order quoter address, if deployed.
    pub const fn order_quoter(&self) -> Option<Address> {
        self.order_quoter
    }

    /// Get the order quoter address, or a
    /// [`ConfigError::ConfigurationMissing`].
    pub fn require_order_quoter(&self) -> Result<Address, ConfigError> {
        self.order_quoter
            .ok_or_else(|| ConfigError::configuration_missing("order quoter", self.chain_id))
    }

    /// Get the reactor table.
    pub const fn reactors(&self) -> ReactorAddresses {
        self.reactors
    }

    /// Get the resolver table.
    pub const fn resolvers(&self) -> ResolverAddresses {
        self.resolvers
    }

    /// Get the reactor settling `order_type`, or a
    /// [`ConfigError::ConfigurationMissing`].
    pub fn reactor_for(&self, order_type: OrderType) -> Result<Address, ConfigError> {
        self.reactors.get(order_type).ok_or_else(|| {
            ConfigError::configuration_missing(format!("{order_type} reactor"), self.chain_id)
        })
    }

    /// Get the order type settled by `reactor`, or a
    /// [`ConfigError::ConfigurationMissing`].
    pub fn order_type_for_reactor(&self, reactor: Address) -> Result<OrderType, ConfigError> {
        self.reactors.order_type_for(reactor).ok_or_else(|| {
            ConfigError::configuration_missing(format!("order type for reactor {reactor}"), self.chain_id)
        })
    }

    /// Get the order type resolved by `resolver`, or a
    /// [`ConfigError::ConfigurationMissing`].
    pub fn order_type_for_resolver(&self, resolver: Address) -> Result<OrderType, ConfigError> {
        self.resolvers.order_type_for(resolver).ok_or_else(|| {
            ConfigError::configuration_missing(
                format!("order type for resolver {resolver}"),
                self.chain_id,
            )
        })
    }

    /// True if `address` is a configured reactor or resolver.
    pub fn is_known_address(&self, address: Address) -> bool {
        self.reactors.order_type_for(address).is_some()
            || self.resolvers.order_type_for(address).is_some()
    }

    /// Override a reactor entry.
    pub const fn with_reactor(mut self, order_type: OrderType, reactor: Address) -> Self {
        self.reactors = self.reactors.with(order_type, reactor);
        self
    }

    /// Override a resolver entry.
    pub const fn with_resolver(mut self, order_type: OrderType, resolver: Address) -> Self {
        self.resolvers = self.resolvers.with(order_type, resolver);
        self
    }

    /// Override the order quoter.
    pub const fn with_order_quoter(mut self, order_quoter: Address) -> Self {
        self.order_quoter = Some(order_quoter);
        self
    }
}

impl FromStr for ChainConstants {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<KnownChains>()?.constants())
    }
}

impl TryFrom<KnownChains> for ChainConstants {
    type Error = ParseChainError;

    fn try_from(chain: KnownChains) -> Result<Self, Self::Error> {
        Ok(chain.constants())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_with_defaults() {
        let json = r#"{
            "chainId": 10,
            "reactors": { "dutchV2": "0x1111111111111111111111111111111111111111" }
        }"#;
        let constants = ChainConstants::from_json(json).unwrap();
        assert_eq!(constants.chain_id(), 10);
        assert_eq!(constants.permit2(), crate::PERMIT2_ADDRESS);
        assert_eq!(constants.order_quoter(), None);
        assert_eq!(
            constants.order_type_for_reactor(Address::repeat_byte(0x11)).unwrap(),
            OrderType::DutchV2
        );

        let again =
            ChainConstants::from_json(&serde_json::to_string(&constants).unwrap()).unwrap();
        assert_eq!(again, constants);
    }

    #[test]
    fn missing_entries_name_the_chain() {
        let constants = ChainConstants::base();
        let err = constants.reactor_for(OrderType::Relay).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ConfigurationMissing { chain_id, .. } if chain_id == crate::base::CHAIN_ID
        ));
        assert!(constants.require_order_quoter().is_err());
    }

    #[test]
    fn limit_uses_dutch_reactor() {
        let constants = ChainConstants::mainnet();
        assert_eq!(
            constants.reactor_for(OrderType::Limit).unwrap(),
            constants.reactor_for(OrderType::Dutch).unwrap()
        );
    }

    #[test]
    fn constants_by_chain_id() {
        assert_eq!(ChainConstants::for_chain_id(1), Some(ChainConstants::mainnet()));
        assert_eq!(ChainConstants::for_chain_id(42161), Some(ChainConstants::arbitrum()));
        assert_eq!(ChainConstants::for_chain_id(31337), Some(ChainConstants::test()));
        assert_eq!(ChainConstants::for_chain_id(10), None);
    }

    // Environment variables are process-wide, so every env case lives in
    // this one test.
    #[test]
    fn load_from_env() {
        let dutch_v2 = Address::repeat_byte(0x21);
        let hybrid = Address::repeat_byte(0x51);
        let hybrid_resolver = Address::repeat_byte(0x52);

        std::env::remove_var("REACTOR_CHAIN_ID");
        assert!(matches!(ChainConstants::from_env(), Err(ConfigError::Var(key)) if key == "REACTOR_CHAIN_ID"));

        std::env::set_var("REACTOR_CHAIN_ID", "not a number");
        assert!(matches!(ChainConstants::from_env(), Err(ConfigError::Parse(_))));

        std::env::set_var("REACTOR_CHAIN_ID", "777");
        std::env::set_var("DUTCH_V2_REACTOR", dutch_v2.to_string());
        std::env::set_var("HYBRID_REACTOR", hybrid.to_string());
        std::env::set_var("HYBRID_RESOLVER", hybrid_resolver.to_string());

        let constants = ChainConstants::from_env().unwrap();
        assert_eq!(constants.chain_id(), 777);
        assert_eq!(constants.permit2(), crate::PERMIT2_ADDRESS);
        assert_eq!(constants.order_quoter(), None);
        assert_eq!(constants.reactor_for(OrderType::DutchV2).unwrap(), dutch_v2);
        assert_eq!(constants.reactor_for(OrderType::Hybrid).unwrap(), hybrid);
        assert_eq!(constants.order_type_for_resolver(hybrid_resolver).unwrap(), OrderType::Hybrid);
        assert!(matches!(
            constants.reactor_for(OrderType::Priority),
            Err(ConfigError::ConfigurationMissing { chain_id: 777, .. })
        ));

        std::env::set_var("ORDER_QUOTER_ADDRESS", "0xnothex");
        assert!(matches!(ChainConstants::from_env(), Err(ConfigError::Hex(_))));

        for key in
            ["REACTOR_CHAIN_ID", "DUTCH_V2_REACTOR", "HYBRID_REACTOR", "HYBRID_RESOLVER", "ORDER_QUOTER_ADDRESS"]
        {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn parse_from_chain_name() {
        assert_eq!("test".parse::<ChainConstants>().unwrap(), ChainConstants::test());
    }
}
