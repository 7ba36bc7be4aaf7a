use crate::OrderType;
use alloy::primitives::Address;

/// Settlement reactor addresses for a single chain, keyed by order type.
///
/// A `None` entry means the order type is not deployed on the chain.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactorAddresses {
    #[serde(default)]
    dutch: Option<Address>,
    #[serde(default)]
    dutch_v2: Option<Address>,
    #[serde(default)]
    dutch_v3: Option<Address>,
    #[serde(default)]
    priority: Option<Address>,
    #[serde(default)]
    hybrid: Option<Address>,
    #[serde(default)]
    relay: Option<Address>,
}

impl ReactorAddresses {
    /// An empty table.
    pub const fn new() -> Self {
        Self {
            dutch: None,
            dutch_v2: None,
            dutch_v3: None,
            priority: None,
            hybrid: None,
            relay: None,
        }
    }

    /// Set the reactor for an order type. Setting [`OrderType::Limit`] sets
    /// the Dutch reactor.
    pub const fn with(mut self, order_type: OrderType, reactor: Address) -> Self {
        match order_type.settlement_type() {
            OrderType::Dutch | OrderType::Limit => self.dutch = Some(reactor),
            OrderType::DutchV2 => self.dutch_v2 = Some(reactor),
            OrderType::DutchV3 => self.dutch_v3 = Some(reactor),
            OrderType::Priority => self.priority = Some(reactor),
            OrderType::Hybrid => self.hybrid = Some(reactor),
            OrderType::Relay => self.relay = Some(reactor),
        }
        self
    }

    /// Get the reactor settling the given order type.
    pub const fn get(&self, order_type: OrderType) -> Option<Address> {
        match order_type.settlement_type() {
            OrderType::Dutch | OrderType::Limit => self.dutch,
            OrderType::DutchV2 => self.dutch_v2,
            OrderType::DutchV3 => self.dutch_v3,
            OrderType::Priority => self.priority,
            OrderType::Hybrid => self.hybrid,
            OrderType::Relay => self.relay,
        }
    }

    /// Iterate over the configured `(order type, reactor)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (OrderType, Address)> + '_ {
        OrderType::ALL
            .into_iter()
            .filter(|ty| *ty != OrderType::Limit)
            .filter_map(|ty| self.get(ty).map(|address| (ty, address)))
    }

    /// Reverse lookup: the order type settled by `reactor`.
    pub fn order_type_for(&self, reactor: Address) -> Option<OrderType> {
        self.iter().find(|(_, address)| *address == reactor).map(|(ty, _)| ty)
    }

    /// True if no reactor is configured.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Auction resolver addresses for a single chain. Resolver-addressed orders
/// are serialized as `(address resolver, bytes order)` and routed by the
/// resolver rather than by the reactor embedded in the order.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverAddresses {
    #[serde(default)]
    dutch_v3: Option<Address>,
    #[serde(default)]
    priority: Option<Address>,
    #[serde(default)]
    hybrid: Option<Address>,
}

impl ResolverAddresses {
    /// An empty table.
    pub const fn new() -> Self {
        Self { dutch_v3: None, priority: None, hybrid: None }
    }

    /// Set the resolver for an order type. Only V3 Dutch, priority, and hybrid
    /// orders may be resolver-addressed; other types are ignored.
    pub const fn with(mut self, order_type: OrderType, resolver: Address) -> Self {
        match order_type {
            OrderType::DutchV3 => self.dutch_v3 = Some(resolver),
            OrderType::Priority => self.priority = Some(resolver),
            OrderType::Hybrid => self.hybrid = Some(resolver),
            _ => {}
        }
        self
    }

    /// Get the resolver for the given order type.
    pub const fn get(&self, order_type: OrderType) -> Option<Address> {
        match order_type {
            OrderType::DutchV3 => self.dutch_v3,
            OrderType::Priority => self.priority,
            OrderType::Hybrid => self.hybrid,
            _ => None,
        }
    }

    /// Reverse lookup: the order type resolved by `resolver`.
    pub fn order_type_for(&self, resolver: Address) -> Option<OrderType> {
        [OrderType::DutchV3, OrderType::Priority, OrderType::Hybrid]
            .into_iter()
            .find(|ty| self.get(*ty) == Some(resolver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_routes_to_dutch() {
        let dutch = Address::repeat_byte(1);
        let table = ReactorAddresses::new().with(OrderType::Limit, dutch);
        assert_eq!(table.get(OrderType::Dutch), Some(dutch));
        assert_eq!(table.order_type_for(dutch), Some(OrderType::Dutch));
    }

    #[test]
    fn reverse_lookup_misses_unknown() {
        let table = ReactorAddresses::new()
            .with(OrderType::DutchV2, Address::repeat_byte(2))
            .with(OrderType::Relay, Address::repeat_byte(3));
        assert_eq!(table.order_type_for(Address::repeat_byte(3)), Some(OrderType::Relay));
        assert_eq!(table.order_type_for(Address::repeat_byte(4)), None);
        assert!(!table.is_empty());
        assert!(ReactorAddresses::new().is_empty());
    }

    #[test]
    fn resolvers_ignore_unsupported_types() {
        let resolvers = ResolverAddresses::new()
            .with(OrderType::Hybrid, Address::repeat_byte(5))
            .with(OrderType::Dutch, Address::repeat_byte(6));
        assert_eq!(resolvers.order_type_for(Address::repeat_byte(5)), Some(OrderType::Hybrid));
        assert_eq!(resolvers.order_type_for(Address::repeat_byte(6)), None);
    }
}
