use crate::traits::CallResult;
use alloy::{
    primitives::{Address, U256},
    sol_types::{Revert, SolError, SolValue},
};
use reactor_bindings::{ResolvedOrder, errors};
use reactor_types::{OrderVariant, ValidationOutcome};
use tracing::{debug, warn};

/// The length of an ABI-encoded resolved order is always above this, so a
/// quoter revert longer than it carries a successful quote.
pub const QUOTE_MIN_LENGTH: usize = 192;

/// Literal substrings found in token transfer failures.
const FUNDS_SUBSTRINGS: &[&str] =
    &["TRANSFER_FROM_FAILED", "STF", "insufficient allowance", "transfer amount exceeds balance"];

macro_rules! known_errors {
    ($($error:ident => $outcome:ident),* $(,)?) => {
        &[$(
            (errors::$error::SIGNATURE, errors::$error::SELECTOR, ValidationOutcome::$outcome)
        ),*]
    };
}

/// Known custom errors, by Solidity signature and selector.
const KNOWN_ERRORS: &[(&str, [u8; 4], ValidationOutcome)] = known_errors! {
    InvalidSignature => InvalidSignature,
    InvalidSigner => InvalidSignature,
    InvalidSignatureLength => InvalidSignature,
    InvalidContractSignature => InvalidSignature,
    InvalidNonce => NonceUsed,
    SignatureExpired => Expired,
    DeadlinePassed => Expired,
    InsufficientAllowance => InsufficientFunds,
    AllowanceExpired => InsufficientFunds,
    InvalidAmount => InvalidOrderFields,
    LengthMismatch => InvalidOrderFields,
    InvalidReactor => InvalidOrderFields,
    InvalidDeadline => InvalidOrderFields,
    DeadlineBeforeEndTime => InvalidOrderFields,
    EndTimeBeforeStartTime => InvalidOrderFields,
    InputAndOutputDecay => InvalidOrderFields,
    IncorrectAmounts => InvalidOrderFields,
    InvalidDecayCurve => InvalidOrderFields,
    InvalidCosignerInput => InvalidOrderFields,
    InvalidCosignerOutput => InvalidOrderFields,
    InputOutputScaling => InvalidOrderFields,
    InvalidPriceCurveParameters => InvalidOrderFields,
    InvalidCosignature => InvalidCosignature,
    NoExclusiveOverride => ExclusivityPeriod,
    InvalidGasPrice => InvalidGasPrice,
    OrderNotFillable => OrderNotFillableYet,
    ValidationFailed => ValidationFailed,
};

/// Look up a custom error selector.
pub fn outcome_for_selector(selector: [u8; 4]) -> Option<ValidationOutcome> {
    KNOWN_ERRORS.iter().find(|(_, s, _)| *s == selector).map(|(_, _, outcome)| *outcome)
}

/// Match free text, such as a revert string, against the transfer-failure
/// substrings, then against known error names and hex selectors. The
/// longest matching error name wins.
fn outcome_for_text(text: &str) -> Option<ValidationOutcome> {
    if FUNDS_SUBSTRINGS.iter().any(|s| text.contains(s)) {
        return Some(ValidationOutcome::InsufficientFunds);
    }
    let lower = text.to_ascii_lowercase();
    KNOWN_ERRORS
        .iter()
        .filter_map(|(signature, selector, outcome)| {
            let name = signature.split_once('(').map_or(*signature, |(name, _)| name);
            (text.contains(name) || lower.contains(&alloy::hex::encode(selector)))
                .then_some((name.len(), *outcome))
        })
        .max_by_key(|(len, _)| *len)
        .map(|(_, outcome)| outcome)
}

/// True if the order's additional validation data encodes a non-zero
/// `(address filler, uint256 lastExclusiveTimestamp)`.
fn has_exclusive_validation(order: &OrderVariant) -> bool {
    <(Address, U256)>::abi_decode_params(&order.info().additionalValidationData)
        .is_ok_and(|(filler, _)| !filler.is_zero())
}

/// Classify revert data into a [`ValidationOutcome`].
///
/// `Error(string)` payloads are unwrapped and matched against known
/// transfer-failure substrings and error names. Custom errors are matched by
/// selector. The
/// generic validation failure is refined to
/// [`ValidationOutcome::ExclusivityPeriod`] when `order` carries exclusive
/// filler validation data.
pub fn classify_revert(data: &[u8], order: Option<&OrderVariant>) -> ValidationOutcome {
    let outcome = match Revert::abi_decode(data) {
        Ok(revert) => {
            debug!(reason = %revert.reason, "unwrapped revert string");
            outcome_for_text(&revert.reason)
        }
        Err(_) => data
            .get(..4)
            .and_then(|selector| selector.try_into().ok())
            .and_then(outcome_for_selector)
            .or_else(|| outcome_for_text(&String::from_utf8_lossy(data))),
    };

    match outcome {
        Some(ValidationOutcome::ValidationFailed)
            if order.is_some_and(has_exclusive_validation) =>
        {
            debug!("validation failure refined to exclusivity");
            ValidationOutcome::ExclusivityPeriod
        }
        Some(outcome) => outcome,
        None => {
            warn!(data = %alloy::hex::encode_prefixed(data), "unrecognized revert data");
            ValidationOutcome::UnknownError
        }
    }
}

/// True if a quoter call reported a successful quote.
pub fn is_quote_success(result: &CallResult) -> bool {
    result.success || result.return_data.len() > QUOTE_MIN_LENGTH
}

/// Decode the resolved order carried by a successful quote.
pub fn decode_quote(result: &CallResult) -> Option<ResolvedOrder> {
    if !is_quote_success(result) {
        return None;
    }
    ResolvedOrder::abi_decode(&result.return_data).ok()
}

/// Classify one quoter call result.
pub fn classify_call(result: &CallResult, order: Option<&OrderVariant>) -> ValidationOutcome {
    if is_quote_success(result) {
        return ValidationOutcome::Ok;
    }
    classify_revert(&result.return_data, order)
}
