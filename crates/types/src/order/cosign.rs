use crate::ResolutionError;
use alloy::primitives::{keccak256, Address, Bytes, Signature, B256, U256};

/// An order whose auction parameters are authorized by a cosigner.
///
/// The cosigner signs `keccak256(order_hash ‖ chain_id ‖ abi.encode(cosignerData))`
/// with its secp256k1 key. The order hash is computed externally.
pub trait CosignedOrder {
    /// The cosigner named by the order.
    fn cosigner(&self) -> Address;

    /// The 65-byte cosignature.
    fn cosignature(&self) -> &Bytes;

    /// `abi.encode(cosignerData)`.
    fn encoded_cosigner_data(&self) -> Vec<u8>;

    /// The digest the cosigner signs.
    fn cosigner_digest(&self, order_hash: B256, chain_id: u64) -> B256 {
        let data = self.encoded_cosigner_data();
        let mut buf = Vec::with_capacity(64 + data.len());
        buf.extend_from_slice(order_hash.as_slice());
        buf.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
        buf.extend_from_slice(&data);
        keccak256(buf)
    }

    /// Check that the cosignature recovers to [`Self::cosigner`].
    fn verify_cosignature(&self, order_hash: B256, chain_id: u64) -> Result<(), ResolutionError> {
        let expected = self.cosigner();
        let recovered = Signature::from_raw(self.cosignature())
            .and_then(|sig| sig.recover_address_from_prehash(&self.cosigner_digest(order_hash, chain_id)))
            .ok();
        match recovered {
            Some(recovered) if recovered == expected => Ok(()),
            recovered => Err(ResolutionError::CosignatureInvalid { expected, recovered }),
        }
    }
}
