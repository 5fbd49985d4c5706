//! Fixtures shared by the unit tests.

use crate::common::TransactionCommon;
use xrpl_types::{Address, Currency, CurrencyAmount, IssuedCurrencyAmount, XrpAmount};

pub fn alice() -> Address {
    Address::new("rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe").unwrap()
}

pub fn bob() -> Address {
    Address::new("rH4KEcG9dEwGwpn6AyoWK9cZPLL4RLSmWW").unwrap()
}

pub fn carol() -> Address {
    Address::new("r9cZA1mLK5R5Am25ArfXFmqgNwjZgnfk59").unwrap()
}

pub fn dave() -> Address {
    Address::new("rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn").unwrap()
}

pub fn common(account: Address) -> TransactionCommon {
    TransactionCommon::new(account)
}

pub fn with_flags(account: Address, flags: u32) -> TransactionCommon {
    let mut common = TransactionCommon::new(account);
    common.flags = Some(flags);
    common
}

pub fn xrp(drops: u64) -> CurrencyAmount {
    XrpAmount::of_drops(drops).unwrap().into()
}

pub fn usd(value: &str, issuer: Address) -> CurrencyAmount {
    IssuedCurrencyAmount::new(value, Currency::new("USD").unwrap(), issuer)
        .unwrap()
        .into()
}
