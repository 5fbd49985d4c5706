#![no_main]

use libfuzzer_sys::fuzz_target;
use xrpl_crypto::{reconcile_condition, Condition};
use xrpl_types::HexBlob;

fuzz_target!(|data: &[u8]| {
    if let Ok(condition) = Condition::from_der(data) {
        assert_eq!(Condition::from_der(&condition.to_der()).ok(), Some(condition));
    }

    // Raw-only reconciliation tolerates anything and never drops the input.
    let raw = HexBlob::from_bytes(data);
    let reconciled = reconcile_condition(None, Some(raw.clone())).expect("raw-only never fails");
    assert_eq!(reconciled.raw, Some(raw));
    assert!(reconciled.typed.is_some() != reconciled.warning.is_some());
});
