#![no_main]

use libfuzzer_sys::fuzz_target;
use xrpl_ledger::LedgerObject;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(object) = LedgerObject::from_json(value) else {
        return;
    };
    let encoded = object.to_json().expect("a decoded entry must encode");
    let again = LedgerObject::from_json(encoded).expect("encoded form must decode");
    assert_eq!(again, object);
});
