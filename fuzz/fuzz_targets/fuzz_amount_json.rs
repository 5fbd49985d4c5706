#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xrpl_types::{CurrencyAmount, XrpAmount};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    json: &'a [u8],
    drops: u64,
    negative: bool,
    factor: u64,
}

// Amount parsing and native arithmetic must never panic; out-of-range
// results come back as errors.
fuzz_target!(|input: Input<'_>| {
    if let Ok(amount) = serde_json::from_slice::<CurrencyAmount>(input.json) {
        let encoded = serde_json::to_value(&amount).expect("amounts always encode");
        let _ = serde_json::from_value::<CurrencyAmount>(encoded);
    }

    if let Ok(xrp) = XrpAmount::of_magnitude(input.drops, input.negative) {
        let _ = xrp.times(input.factor);
        let _ = xrp.plus(xrp);
        let _ = xrp.minus(xrp);
    }
});
