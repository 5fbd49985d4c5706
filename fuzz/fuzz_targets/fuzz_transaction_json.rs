#![no_main]

use libfuzzer_sys::fuzz_target;
use xrpl_transactions::Transaction;

// Any transaction that decodes must re-encode, and the re-encoded form must
// decode to the same value.
fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(tx) = Transaction::from_json_str(json) else {
        return;
    };
    let encoded = tx.to_json().expect("a decoded transaction must encode");
    let again = Transaction::from_json(encoded).expect("encoded form must decode");
    assert_eq!(again, tx);
});
