#![allow(clippy::too_many_arguments)]
#![allow(missing_docs)]
use alloy::primitives::{Address, U256};

mod orders {
    alloy::sol! {
        #[derive(Debug, Default, PartialEq, Eq)]
        struct OrderInfo {
            address reactor;
            address swapper;
            uint256 nonce;
            uint256 deadline;
            address additionalValidationContract;
            bytes additionalValidationData;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct DutchInput {
            address token;
            uint256 startAmount;
            uint256 endAmount;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct DutchOutput {
            address token;
            uint256 startAmount;
            uint256 endAmount;
            address recipient;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct ExclusiveDutchOrder {
            OrderInfo info;
            uint256 decayStartTime;
            uint256 decayEndTime;
            address exclusiveFiller;
            uint256 exclusivityOverrideBps;
            DutchInput input;
            DutchOutput[] outputs;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct V2CosignerData {
            uint256 decayStartTime;
            uint256 decayEndTime;
            address exclusiveFiller;
            uint256 exclusivityOverrideBps;
            uint256 inputOverride;
            uint256[] outputOverrides;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct V2DutchOrder {
            OrderInfo info;
            address cosigner;
            DutchInput baseInput;
            DutchOutput[] baseOutputs;
            V2CosignerData cosignerData;
            bytes cosignature;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct NonlinearDutchDecay {
            uint256 relativeBlocks;
            int256[] relativeAmounts;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct V3DutchInput {
            address token;
            uint256 startAmount;
            NonlinearDutchDecay curve;
            uint256 maxAmount;
            uint256 adjustmentPerGweiBaseFee;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct V3DutchOutput {
            address token;
            uint256 startAmount;
            NonlinearDutchDecay curve;
            address recipient;
            uint256 minAmount;
            uint256 adjustmentPerGweiBaseFee;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct V3CosignerData {
            uint256 decayStartBlock;
            address exclusiveFiller;
            uint256 exclusivityOverrideBps;
            uint256 inputOverride;
            uint256[] outputOverrides;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct V3DutchOrder {
            OrderInfo info;
            address cosigner;
            uint256 startingBaseFee;
            V3DutchInput baseInput;
            V3DutchOutput[] baseOutputs;
            V3CosignerData cosignerData;
            bytes cosignature;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct PriorityInput {
            address token;
            uint256 amount;
            uint256 mpsPerPriorityFeeWei;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct PriorityOutput {
            address token;
            uint256 amount;
            uint256 mpsPerPriorityFeeWei;
            address recipient;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct PriorityCosignerData {
            uint256 auctionTargetBlock;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct PriorityOrder {
            OrderInfo info;
            address cosigner;
            uint256 auctionStartBlock;
            uint256 baselinePriorityFeeWei;
            PriorityInput input;
            PriorityOutput[] outputs;
            PriorityCosignerData cosignerData;
            bytes cosignature;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct HybridInput {
            address token;
            uint256 maxAmount;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct HybridOutput {
            address token;
            uint256 minAmount;
            address recipient;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct HybridCosignerData {
            uint256 auctionTargetBlock;
            uint256[] supplementalPriceCurve;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct HybridOrder {
            OrderInfo info;
            address cosigner;
            HybridInput input;
            HybridOutput[] outputs;
            uint256 auctionStartBlock;
            uint256 baselinePriorityFeeWei;
            uint256 scalingFactor;
            uint256[] priceCurve;
            HybridCosignerData cosignerData;
            bytes cosignature;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct RelayOrderInfo {
            address reactor;
            address swapper;
            uint256 nonce;
            uint256 deadline;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct RelayInput {
            address token;
            uint256 amount;
            address recipient;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct FeeEscalator {
            address token;
            uint256 startAmount;
            uint256 endAmount;
            uint256 startTime;
            uint256 endTime;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct RelayOrder {
            RelayOrderInfo info;
            RelayInput input;
            FeeEscalator fee;
            bytes universalRouterCalldata;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct InputToken {
            address token;
            uint256 amount;
            uint256 maxAmount;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct OutputToken {
            address token;
            uint256 amount;
            address recipient;
        }

        #[derive(Debug, Default, PartialEq, Eq)]
        struct ResolvedOrder {
            OrderInfo info;
            InputToken input;
            OutputToken[] outputs;
            bytes sig;
            bytes32 hash;
        }
    }

    impl Copy for DutchInput {}
    impl Copy for DutchOutput {}
    impl Copy for PriorityInput {}
    impl Copy for PriorityOutput {}
    impl Copy for PriorityCosignerData {}
    impl Copy for HybridInput {}
    impl Copy for HybridOutput {}
    impl Copy for RelayOrderInfo {}
    impl Copy for RelayInput {}
    impl Copy for FeeEscalator {}
    impl Copy for InputToken {}
    impl Copy for OutputToken {}
}
pub use orders::*;

mod permit2 {
    alloy::sol! {
        /// The subset of Permit2 used for unordered nonce management.
        #[derive(Debug, PartialEq, Eq)]
        interface IPermit2 {
            function nonceBitmap(address owner, uint256 wordPos) external view returns (uint256);
            function invalidateUnorderedNonces(uint256 wordPos, uint256 mask) external;
        }
    }
}
pub use permit2::IPermit2;

mod quoter {
    alloy::sol! {
        /// The order quoter. `quote` dry-runs an order against its reactor and
        /// reports a successful resolution by reverting with the ABI-encoded
        /// resolved order.
        #[derive(Debug, PartialEq, Eq)]
        interface IOrderQuoter {
            function quote(bytes order, bytes sig) external;
        }
    }
}
pub use quoter::IOrderQuoter;

/// Custom errors raised by the reactors, their libraries, and Permit2.
pub mod errors {
    alloy::sol! {
        #[derive(Debug, PartialEq, Eq)]
        error InvalidSignature();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidSigner();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidSignatureLength();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidContractSignature();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidNonce();
        #[derive(Debug, PartialEq, Eq)]
        error SignatureExpired(uint256 signatureDeadline);
        #[derive(Debug, PartialEq, Eq)]
        error InvalidAmount(uint256 maxAmount);
        #[derive(Debug, PartialEq, Eq)]
        error LengthMismatch();
        #[derive(Debug, PartialEq, Eq)]
        error InsufficientAllowance(uint256 amount);
        #[derive(Debug, PartialEq, Eq)]
        error AllowanceExpired(uint256 deadline);

        #[derive(Debug, PartialEq, Eq)]
        error InvalidReactor();
        #[derive(Debug, PartialEq, Eq)]
        error DeadlinePassed();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidDeadline();
        #[derive(Debug, PartialEq, Eq)]
        error DeadlineBeforeEndTime();
        #[derive(Debug, PartialEq, Eq)]
        error EndTimeBeforeStartTime();
        #[derive(Debug, PartialEq, Eq)]
        error InputAndOutputDecay();
        #[derive(Debug, PartialEq, Eq)]
        error IncorrectAmounts();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidDecayCurve();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidCosignerInput();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidCosignerOutput();
        #[derive(Debug, PartialEq, Eq)]
        error InputOutputScaling();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidPriceCurveParameters();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidCosignature();
        #[derive(Debug, PartialEq, Eq)]
        error NoExclusiveOverride();
        #[derive(Debug, PartialEq, Eq)]
        error InvalidGasPrice();
        #[derive(Debug, PartialEq, Eq)]
        error OrderNotFillable();
        #[derive(Debug, PartialEq, Eq)]
        error ValidationFailed();
    }
}

impl OrderInfo {
    /// Get the deadline of the order, saturating at `u64::MAX`.
    pub fn deadline(&self) -> u64 {
        self.deadline.saturating_to()
    }
}

impl RelayOrderInfo {
    /// Get the deadline of the order, saturating at `u64::MAX`.
    pub fn deadline(&self) -> u64 {
        self.deadline.saturating_to()
    }
}

impl From<RelayOrderInfo> for OrderInfo {
    fn from(info: RelayOrderInfo) -> Self {
        Self {
            reactor: info.reactor,
            swapper: info.swapper,
            nonce: info.nonce,
            deadline: info.deadline,
            additionalValidationContract: Address::ZERO,
            additionalValidationData: Default::default(),
        }
    }
}

impl DutchInput {
    /// True if the input amount changes over the decay window.
    pub fn decays(&self) -> bool {
        self.startAmount != self.endAmount
    }
}

impl DutchOutput {
    /// True if the output amount changes over the decay window.
    pub fn decays(&self) -> bool {
        self.startAmount != self.endAmount
    }
}

impl NonlinearDutchDecay {
    /// Get the packed block offset at `index`. Offsets are packed as 16-bit
    /// values, element `i` occupying bits `16 * i..16 * (i + 1)`.
    pub fn block_offset(&self, index: usize) -> u16 {
        (self.relativeBlocks >> (index * 16)).as_limbs()[0] as u16
    }

    /// Pack a list of 16-bit block offsets into a single word.
    pub fn pack_blocks(offsets: &[u16]) -> U256 {
        offsets
            .iter()
            .enumerate()
            .fold(U256::ZERO, |acc, (i, offset)| acc | (U256::from(*offset) << (i * 16)))
    }
}
