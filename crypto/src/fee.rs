//! Extra transaction cost for finishing a conditional escrow.

use crate::error::CryptoError;
use crate::fulfillment::Fulfillment;
use xrpl_types::XrpAmount;

/// Fee for an `EscrowFinish` presenting `fulfillment`:
/// `base + base × (32 + ⌊preimage_len / 16⌋)`.
///
/// Only preimage fulfillments are accepted by the network; anything else is
/// a caller error.
pub fn escrow_finish_fee(
    base_fee: XrpAmount,
    fulfillment: &Fulfillment,
) -> Result<XrpAmount, CryptoError> {
    match fulfillment {
        Fulfillment::PreimageSha256 { preimage } => {
            let multiplier = 32 + preimage.len() as u64 / 16;
            let extra = base_fee.times(multiplier)?;
            Ok(base_fee.plus(extra)?)
        }
        Fulfillment::PrefixSha256 { .. }
        | Fulfillment::ThresholdSha256 { .. }
        | Fulfillment::RsaSha256 { .. }
        | Fulfillment::Ed25519Sha256 { .. } => {
            Err(CryptoError::UnsupportedFulfillment(fulfillment.kind()))
        }
    }
}
