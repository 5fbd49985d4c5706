#![no_main]

use libfuzzer_sys::fuzz_target;
use xrpl_crypto::{escrow_finish_fee, Fulfillment};
use xrpl_types::XrpAmount;

fuzz_target!(|data: &[u8]| {
    let Ok(fulfillment) = Fulfillment::from_der(data) else {
        return;
    };
    // Deriving the condition walks nested fulfillments; it must not panic.
    let _ = fulfillment.derive_condition();
    if let Ok(base) = XrpAmount::of_drops(10) {
        let _ = escrow_finish_fee(base, &fulfillment);
    }
});
