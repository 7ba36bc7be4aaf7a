use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolValue,
};
use reactor_constants::{ChainConstants, ConfigError, KnownChains, OrderType};
use reactor_types::{
    DutchOrder, DutchV2Order, DutchV3Order, HybridOrder, OrderDecodeError, OrderVariant,
    PriorityOrder, RelayOrder,
};
use std::{borrow::Cow, collections::HashMap};
use tracing::debug;

/// Decodes the ABI bytes of one order family.
pub type OrderDecoder = fn(&[u8]) -> Result<OrderVariant, OrderDecodeError>;

/// Errors raised by the [`OrderTypeRegistry`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// A chain, address, or decoder is not configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The order bytes matched a type but failed to decode as it.
    #[error("failed to decode {order_type} order: {source}")]
    Decode {
        /// The classified type.
        order_type: OrderType,
        /// The decode error.
        #[source]
        source: OrderDecodeError,
    },
    /// The bytes hold neither a resolver payload nor a reactor address slot.
    #[error("malformed order bytes ({len} bytes)")]
    Malformed {
        /// The length of the bytes.
        len: usize,
    },
}

/// Maps serialized orders to their [`OrderType`], and types to decoders.
///
/// Classification only trusts configured addresses. An address found in
/// neither the resolver nor the reactor table is an error, never a guess.
#[derive(Debug, Clone)]
pub struct OrderTypeRegistry {
    chains: HashMap<u64, ChainConstants>,
    decoders: HashMap<OrderType, OrderDecoder>,
}

impl Default for OrderTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_dutch(bytes: &[u8]) -> Result<OrderVariant, OrderDecodeError> {
    DutchOrder::decode(bytes).map(Into::into)
}

fn decode_dutch_v2(bytes: &[u8]) -> Result<OrderVariant, OrderDecodeError> {
    DutchV2Order::decode(bytes).map(Into::into)
}

fn decode_dutch_v3(bytes: &[u8]) -> Result<OrderVariant, OrderDecodeError> {
    DutchV3Order::decode(bytes).map(Into::into)
}

fn decode_priority(bytes: &[u8]) -> Result<OrderVariant, OrderDecodeError> {
    PriorityOrder::decode(bytes).map(Into::into)
}

fn decode_hybrid(bytes: &[u8]) -> Result<OrderVariant, OrderDecodeError> {
    HybridOrder::decode(bytes).map(Into::into)
}

fn decode_relay(bytes: &[u8]) -> Result<OrderVariant, OrderDecodeError> {
    RelayOrder::decode(bytes).map(Into::into)
}

/// Read the 32-byte word at `offset`.
fn word_at(bytes: &[u8], offset: usize) -> Option<&[u8]> {
    bytes.get(offset..offset.checked_add(32)?)
}

/// Interpret a word as a small offset.
fn word_as_offset(word: &[u8]) -> Option<usize> {
    if word[..24].iter().any(|b| *b != 0) {
        return None;
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(buf)).ok()
}

/// Interpret a word as a left-padded address.
fn word_as_address(word: &[u8]) -> Option<Address> {
    if word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    Some(Address::from_slice(&word[12..]))
}

/// Candidate reactor addresses from the ABI head of a legacy order.
///
/// Word 0 is the offset `base` of the order tuple. The word at `base` is
/// either the inline reactor of a static info struct, or the offset of a
/// dynamic info struct whose first word is the reactor. Inline first.
fn legacy_reactor_candidates(bytes: &[u8]) -> Vec<Address> {
    let Some(base) = word_at(bytes, 0).and_then(word_as_offset) else {
        return Vec::new();
    };
    let Some(head) = word_at(bytes, base) else {
        return Vec::new();
    };

    let mut candidates = Vec::with_capacity(2);
    if let Some(inline) = word_as_address(head) {
        candidates.push(inline);
    }
    if let Some(reactor) = word_as_offset(head)
        .and_then(|rel| base.checked_add(rel))
        .and_then(|info| word_at(bytes, info))
        .and_then(word_as_address)
    {
        candidates.push(reactor);
    }
    candidates
}

/// Decode a resolver-addressed payload.
fn resolver_payload(bytes: &[u8]) -> Option<(Address, Bytes)> {
    <(Address, Bytes)>::abi_decode_params(bytes).ok()
}

impl OrderTypeRegistry {
    /// A registry with no chains and every decoder.
    pub fn new() -> Self {
        let decoders = HashMap::from([
            (OrderType::Dutch, decode_dutch as OrderDecoder),
            (OrderType::Limit, decode_dutch as OrderDecoder),
            (OrderType::DutchV2, decode_dutch_v2 as OrderDecoder),
            (OrderType::DutchV3, decode_dutch_v3 as OrderDecoder),
            (OrderType::Priority, decode_priority as OrderDecoder),
            (OrderType::Hybrid, decode_hybrid as OrderDecoder),
            (OrderType::Relay, decode_relay as OrderDecoder),
        ]);
        Self { chains: HashMap::new(), decoders }
    }

    /// A registry with every known production chain.
    pub fn known() -> Self {
        [KnownChains::Mainnet, KnownChains::Base, KnownChains::Arbitrum]
            .into_iter()
            .fold(Self::new(), |registry, chain| registry.with_chain(chain.constants()))
    }

    /// Add or replace the constants for a chain.
    pub fn with_chain(mut self, constants: ChainConstants) -> Self {
        self.chains.insert(constants.chain_id(), constants);
        self
    }

    /// Add or replace the decoder for a type.
    pub fn with_decoder(mut self, order_type: OrderType, decoder: OrderDecoder) -> Self {
        self.decoders.insert(order_type, decoder);
        self
    }

    /// Remove the decoder for a type.
    pub fn without_decoder(mut self, order_type: OrderType) -> Self {
        self.decoders.remove(&order_type);
        self
    }

    /// Get the constants for a chain.
    pub fn constants(&self, chain_id: u64) -> Result<&ChainConstants, ConfigError> {
        self.chains
            .get(&chain_id)
            .ok_or_else(|| ConfigError::configuration_missing("chain constants", chain_id))
    }

    /// Get the decoder for a type, if registered.
    pub fn decoder(&self, order_type: OrderType) -> Option<OrderDecoder> {
        self.decoders.get(&order_type).copied()
    }

    /// Classify order bytes, returning the type and the bytes the type's
    /// decoder expects.
    fn classify_inner<'a>(
        &self,
        bytes: &'a [u8],
        chain_id: u64,
    ) -> Result<(OrderType, Cow<'a, [u8]>), RegistryError> {
        let constants = self.constants(chain_id)?;

        let resolver = resolver_payload(bytes);
        if let Some((resolver, inner)) = &resolver {
            if let Some(order_type) = constants.resolvers().order_type_for(*resolver) {
                debug!(%resolver, %order_type, chain_id, "classified by resolver");
                return Ok((order_type, Cow::Owned(inner.to_vec())));
            }
        }

        let candidates = legacy_reactor_candidates(bytes);
        if candidates.is_empty() && resolver.is_none() {
            return Err(RegistryError::Malformed { len: bytes.len() });
        }

        for reactor in candidates {
            if let Some(order_type) = constants.reactors().order_type_for(reactor) {
                debug!(%reactor, %order_type, chain_id, "classified by reactor");
                return Ok((order_type, Cow::Borrowed(bytes)));
            }
        }

        Err(ConfigError::configuration_missing("order type for settlement address", chain_id)
            .into())
    }

    /// Classify serialized order bytes on a chain.
    ///
    /// Resolver-addressed payloads `(address resolver, bytes order)` are
    /// checked first, then the reactor address in the order's info.
    pub fn classify(&self, bytes: &[u8], chain_id: u64) -> Result<OrderType, RegistryError> {
        self.classify_inner(bytes, chain_id).map(|(order_type, _)| order_type)
    }

    /// Classify and decode serialized order bytes on a chain.
    pub fn parse(&self, bytes: &[u8], chain_id: u64) -> Result<OrderVariant, RegistryError> {
        let (order_type, payload) = self.classify_inner(bytes, chain_id)?;
        let decoder = self.decoder(order_type).ok_or_else(|| {
            ConfigError::configuration_missing(format!("decoder for {order_type} orders"), chain_id)
        })?;
        decoder(&payload).map_err(|source| RegistryError::Decode { order_type, source })
    }
}
