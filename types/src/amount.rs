//! Currency amounts: native XRP, issued currencies, and multi-purpose tokens.
//!
//! Each variant validates only its own bounds at construction. Consumers
//! dispatch on [`CurrencyAmount`] with an exhaustive `match`.

use crate::address::Address;
use crate::currency::{Currency, Issue};
use crate::error::TypesError;
use crate::hash::MptIssuanceId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Total XRP supply expressed in drops: 100 billion XRP × 10^6.
pub const MAX_XRP_DROPS: u64 = 100_000_000_000_000_000;

/// Drops per XRP.
pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Largest magnitude a multi-purpose token amount may carry (2^63 - 1).
pub const MAX_MPT_AMOUNT: u64 = 0x7FFF_FFFF_FFFF_FFFF;

// ── XRP ────────────────────────────────────────────────────────────────

/// A native amount in drops.
///
/// The wire format carries native amounts as an unsigned magnitude plus a
/// sign, so the sign is kept as a separate flag rather than using a signed
/// integer. Zero is never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct XrpAmount {
    drops: u64,
    negative: bool,
}

impl XrpAmount {
    pub const ZERO: Self = Self {
        drops: 0,
        negative: false,
    };

    pub fn of_drops(drops: u64) -> Result<Self, TypesError> {
        Self::of_magnitude(drops, false)
    }

    pub fn of_magnitude(drops: u64, negative: bool) -> Result<Self, TypesError> {
        if drops > MAX_XRP_DROPS {
            return Err(TypesError::AmountOutOfRange {
                value: drops.to_string(),
                reason: "exceeds the total XRP supply of 10^17 drops",
            });
        }
        Ok(Self {
            drops,
            negative: negative && drops != 0,
        })
    }

    /// Re-split a signed drop count into magnitude and sign.
    fn of_signed(drops: i128) -> Result<Self, TypesError> {
        let magnitude = u64::try_from(drops.unsigned_abs()).map_err(|_| {
            TypesError::AmountOutOfRange {
                value: drops.to_string(),
                reason: "exceeds the total XRP supply of 10^17 drops",
            }
        })?;
        Self::of_magnitude(magnitude, drops < 0)
    }

    /// Convert a decimal XRP value. Fails if it is not a whole number of drops.
    pub fn of_xrp(xrp: Decimal) -> Result<Self, TypesError> {
        let drops = xrp
            .checked_mul(Decimal::from(DROPS_PER_XRP))
            .filter(|d| d.fract().is_zero())
            .and_then(|d| d.to_i128())
            .ok_or(TypesError::InvalidAmount {
                value: xrp.to_string(),
                reason: "not representable as a whole number of drops",
            })?;
        Self::of_signed(drops)
    }

    pub fn drops(&self) -> u64 {
        self.drops
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.drops == 0
    }

    pub fn signed_drops(&self) -> i128 {
        let magnitude = i128::from(self.drops);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The amount in whole XRP, scaled to six decimal places.
    pub fn to_xrp(&self) -> Decimal {
        Decimal::from_i128_with_scale(self.signed_drops(), 6)
    }

    pub fn plus(&self, other: Self) -> Result<Self, TypesError> {
        Self::of_signed(self.signed_drops() + other.signed_drops())
    }

    pub fn minus(&self, other: Self) -> Result<Self, TypesError> {
        Self::of_signed(self.signed_drops() - other.signed_drops())
    }

    pub fn times(&self, factor: u64) -> Result<Self, TypesError> {
        let product = self
            .signed_drops()
            .checked_mul(i128::from(factor))
            .ok_or(TypesError::AmountOutOfRange {
                value: format!("{} * {factor}", self.signed_drops()),
                reason: "product overflows",
            })?;
        Self::of_signed(product)
    }
}

impl fmt::Display for XrpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.drops)
        } else {
            write!(f, "{}", self.drops)
        }
    }
}

impl std::str::FromStr for XrpAmount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount {
                value: s.to_string(),
                reason: "XRP amounts are an integer number of drops",
            });
        }
        let drops = digits.parse::<u64>().map_err(|_| TypesError::AmountOutOfRange {
            value: s.to_string(),
            reason: "exceeds the total XRP supply of 10^17 drops",
        })?;
        Self::of_magnitude(drops, negative)
    }
}

impl Serialize for XrpAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for XrpAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Issued currency ────────────────────────────────────────────────────

/// An issued-currency value normalised to `mantissa × 10^exponent`.
///
/// Non-zero values keep a 16-digit mantissa and an exponent in [-96, 80],
/// which bounds magnitudes to [1e-81, 9999999999999999e80].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IouValue {
    pub negative: bool,
    pub mantissa: u64,
    pub exponent: i32,
}

impl IouValue {
    pub const MAX_PRECISION: usize = 16;
    pub const MIN_MANTISSA: u64 = 1_000_000_000_000_000;
    pub const MAX_MANTISSA: u64 = 9_999_999_999_999_999;
    pub const MIN_EXPONENT: i32 = -96;
    pub const MAX_EXPONENT: i32 = 80;

    pub const ZERO: Self = Self {
        negative: false,
        mantissa: 0,
        exponent: 0,
    };

    /// Parse a decimal string such as `-12.5`, `1e-81` or `9999999999999999e80`.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let malformed = |reason| TypesError::InvalidAmount {
            value: raw.to_string(),
            reason,
        };

        let (negative, unsigned) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };
        let (coefficient, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(at) => {
                let exp = unsigned[at + 1..]
                    .parse::<i64>()
                    .map_err(|_| malformed("exponent is not an integer"))?;
                (&unsigned[..at], exp)
            }
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = match coefficient.split_once('.') {
            Some((i, f)) => (i, f),
            None => (coefficient, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(malformed("no digits"));
        }
        if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed("expected decimal digits"));
        }

        let digits = format!("{int_part}{frac_part}");
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            return Ok(Self::ZERO);
        }
        let trimmed = significant.trim_end_matches('0');
        if trimmed.len() > Self::MAX_PRECISION {
            return Err(malformed("more than 16 significant digits"));
        }

        let out_of_range = |reason| TypesError::AmountOutOfRange {
            value: raw.to_string(),
            reason,
        };
        let overflow = || out_of_range("exponent overflows");
        let mut exponent = i64::try_from(frac_part.len())
            .ok()
            .and_then(|len| exponent.checked_sub(len))
            .and_then(|e| {
                let dropped = i64::try_from(significant.len() - trimmed.len()).ok()?;
                e.checked_add(dropped)
            })
            .ok_or_else(overflow)?;

        let mut mantissa: u64 = trimmed
            .parse()
            .map_err(|_| malformed("expected decimal digits"))?;
        while mantissa < Self::MIN_MANTISSA {
            mantissa *= 10;
            exponent = exponent.checked_sub(1).ok_or_else(overflow)?;
        }
        if exponent < i64::from(Self::MIN_EXPONENT) {
            return Err(out_of_range("magnitude below the minimum positive value 1e-81"));
        }
        if exponent > i64::from(Self::MAX_EXPONENT) {
            return Err(out_of_range("magnitude above the maximum value 9999999999999999e80"));
        }
        Ok(Self {
            negative,
            mantissa,
            exponent: exponent as i32,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }
}

/// An amount of a currency issued by an account.
///
/// The value string is kept exactly as supplied; sign is derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IssuedRepr", into = "IssuedRepr")]
pub struct IssuedCurrencyAmount {
    value: String,
    currency: Currency,
    issuer: Address,
}

impl IssuedCurrencyAmount {
    pub fn new(
        value: impl Into<String>,
        currency: Currency,
        issuer: Address,
    ) -> Result<Self, TypesError> {
        let value = value.into();
        if currency.is_native() {
            return Err(TypesError::InvalidCurrency(
                "XRP cannot be an issued currency".into(),
            ));
        }
        IouValue::parse(&value)?;
        Ok(Self {
            value,
            currency,
            issuer,
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn issuer(&self) -> &Address {
        &self.issuer
    }

    /// Normalised numeric form. The value was validated at construction.
    pub fn normalized(&self) -> IouValue {
        IouValue::parse(&self.value).unwrap_or(IouValue::ZERO)
    }

    pub fn is_negative(&self) -> bool {
        self.value.starts_with('-') && !self.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.normalized().is_zero()
    }

    pub fn issue(&self) -> Issue {
        Issue::Issued {
            currency: self.currency.clone(),
            issuer: self.issuer.clone(),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct IssuedRepr {
    currency: Currency,
    issuer: Address,
    value: String,
}

impl TryFrom<IssuedRepr> for IssuedCurrencyAmount {
    type Error = TypesError;

    fn try_from(repr: IssuedRepr) -> Result<Self, Self::Error> {
        IssuedCurrencyAmount::new(repr.value, repr.currency, repr.issuer)
    }
}

impl From<IssuedCurrencyAmount> for IssuedRepr {
    fn from(a: IssuedCurrencyAmount) -> Self {
        IssuedRepr {
            currency: a.currency,
            issuer: a.issuer,
            value: a.value,
        }
    }
}

// ── Multi-purpose token ────────────────────────────────────────────────

/// An amount of a multi-purpose token: an integer string and its issuance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MptAmount {
    value: String,
    mpt_issuance_id: MptIssuanceId,
}

impl MptAmount {
    pub fn new(
        value: impl Into<String>,
        mpt_issuance_id: MptIssuanceId,
    ) -> Result<Self, TypesError> {
        let value = value.into();
        Self::parse_magnitude(&value)?;
        Ok(Self {
            value,
            mpt_issuance_id,
        })
    }

    fn parse_magnitude(value: &str) -> Result<u64, TypesError> {
        let digits = value.strip_prefix('-').unwrap_or(value);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount {
                value: value.to_string(),
                reason: "MPT amounts are unsigned integers",
            });
        }
        digits
            .parse::<u64>()
            .ok()
            .filter(|m| *m <= MAX_MPT_AMOUNT)
            .ok_or(TypesError::AmountOutOfRange {
                value: value.to_string(),
                reason: "exceeds the MPT maximum of 0x7FFFFFFFFFFFFFFF",
            })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn mpt_issuance_id(&self) -> &MptIssuanceId {
        &self.mpt_issuance_id
    }

    pub fn magnitude(&self) -> u64 {
        Self::parse_magnitude(&self.value).unwrap_or(0)
    }

    pub fn is_negative(&self) -> bool {
        self.value.starts_with('-') && !self.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude() == 0
    }
}

#[derive(Serialize, Deserialize)]
struct MptRepr {
    mpt_issuance_id: MptIssuanceId,
    value: String,
}

// ── Union ──────────────────────────────────────────────────────────────

/// Any amount that can appear in an amount field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CurrencyAmount {
    Xrp(XrpAmount),
    Issued(IssuedCurrencyAmount),
    Mpt(MptAmount),
}

impl CurrencyAmount {
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Xrp(a) => a.is_negative(),
            Self::Issued(a) => a.is_negative(),
            Self::Mpt(a) => a.is_negative(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Self::Xrp(a) => a.is_zero(),
            Self::Issued(a) => a.is_zero(),
            Self::Mpt(a) => a.is_zero(),
        }
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && !self.is_negative()
    }

    pub fn is_native(&self) -> bool {
        match self {
            Self::Xrp(_) => true,
            Self::Issued(_) | Self::Mpt(_) => false,
        }
    }

    pub fn issue(&self) -> Issue {
        match self {
            Self::Xrp(_) => Issue::XRP,
            Self::Issued(a) => a.issue(),
            Self::Mpt(a) => Issue::Mpt {
                mpt_issuance_id: a.mpt_issuance_id.clone(),
            },
        }
    }
}

impl From<XrpAmount> for CurrencyAmount {
    fn from(a: XrpAmount) -> Self {
        Self::Xrp(a)
    }
}

impl From<IssuedCurrencyAmount> for CurrencyAmount {
    fn from(a: IssuedCurrencyAmount) -> Self {
        Self::Issued(a)
    }
}

impl From<MptAmount> for CurrencyAmount {
    fn from(a: MptAmount) -> Self {
        Self::Mpt(a)
    }
}

impl Serialize for CurrencyAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Xrp(a) => a.serialize(serializer),
            Self::Issued(a) => IssuedRepr {
                currency: a.currency.clone(),
                issuer: a.issuer.clone(),
                value: a.value.clone(),
            }
            .serialize(serializer),
            Self::Mpt(a) => MptRepr {
                mpt_issuance_id: a.mpt_issuance_id.clone(),
                value: a.value.clone(),
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for CurrencyAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        use serde_json::Value;

        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::String(s) => s.parse().map(Self::Xrp).map_err(D::Error::custom),
            Value::Object(map) if map.contains_key("mpt_issuance_id") => {
                let repr: MptRepr = serde_json::from_value(value).map_err(D::Error::custom)?;
                MptAmount::new(repr.value, repr.mpt_issuance_id)
                    .map(Self::Mpt)
                    .map_err(D::Error::custom)
            }
            Value::Object(_) => {
                let repr: IssuedRepr =
                    serde_json::from_value(value).map_err(D::Error::custom)?;
                IssuedCurrencyAmount::new(repr.value, repr.currency, repr.issuer)
                    .map(Self::Issued)
                    .map_err(D::Error::custom)
            }
            other => Err(D::Error::custom(format!(
                "expected a drops string or an amount object, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issuer() -> Address {
        Address::new("rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe").unwrap()
    }

    fn usd(value: &str) -> Result<IssuedCurrencyAmount, TypesError> {
        IssuedCurrencyAmount::new(value, Currency::new("USD").unwrap(), issuer())
    }

    #[test]
    fn negative_magnitude_keeps_sign_flag() {
        let amount = XrpAmount::of_magnitude(5, true).unwrap();
        assert!(amount.is_negative());
        assert_eq!(amount.to_xrp(), Decimal::new(-5, 6));
        assert_eq!(amount.to_xrp().to_string(), "-0.000005");
        assert_eq!(amount.to_string(), "-5");
    }

    #[test]
    fn xrp_supply_cap() {
        assert!(XrpAmount::of_drops(MAX_XRP_DROPS).is_ok());
        assert!(matches!(
            XrpAmount::of_drops(MAX_XRP_DROPS + 1),
            Err(TypesError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn xrp_arithmetic_crosses_zero() {
        let ten = XrpAmount::of_drops(10).unwrap();
        let twenty = XrpAmount::of_drops(20).unwrap();
        let diff = ten.minus(twenty).unwrap();
        assert!(diff.is_negative());
        assert_eq!(diff.drops(), 10);
        assert_eq!(diff.plus(twenty).unwrap(), ten);
        assert_eq!(ten.times(3).unwrap().drops(), 30);
    }

    #[test]
    fn xrp_arithmetic_respects_cap() {
        let max = XrpAmount::of_drops(MAX_XRP_DROPS).unwrap();
        assert!(max.plus(XrpAmount::of_drops(1).unwrap()).is_err());
        assert!(max.times(2).is_err());
    }

    #[test]
    fn negative_zero_is_not_negative() {
        assert!(!XrpAmount::of_magnitude(0, true).unwrap().is_negative());
    }

    #[test]
    fn xrp_from_decimal() {
        let amount = XrpAmount::of_xrp(Decimal::new(15, 1)).unwrap();
        assert_eq!(amount.drops(), 1_500_000);
        assert!(XrpAmount::of_xrp(Decimal::new(1, 7)).is_err());
    }

    #[test]
    fn iou_bounds() {
        assert!(usd("1e-81").is_ok());
        assert!(matches!(usd("1e-82"), Err(TypesError::AmountOutOfRange { .. })));
        assert!(usd("9999999999999999e80").is_ok());
        assert!(usd("-9999999999999999e80").is_ok());
        assert!(usd("1e97").is_err());
        assert!(usd("0").is_ok());
        assert!(usd("0e-200").is_ok());
    }

    #[test]
    fn iou_extreme_exponents_are_out_of_range() {
        for extreme in [
            "1e-9223372036854775808",
            "0.5e-9223372036854775808",
            "1000e9223372036854775807",
            "-1e9223372036854775807",
        ] {
            assert!(
                matches!(usd(extreme), Err(TypesError::AmountOutOfRange { .. })),
                "{extreme:?} should be out of range"
            );
        }
        assert!(usd("0e-9223372036854775808").is_ok());

        let json = json!({
            "value": "1e-9223372036854775808",
            "currency": "USD",
            "issuer": issuer().as_str()
        });
        assert!(serde_json::from_value::<CurrencyAmount>(json).is_err());
    }

    #[test]
    fn iou_precision_window() {
        assert!(usd("1234567890123456").is_ok());
        assert!(usd("12345678901234567").is_err());
        assert!(usd("1234567890123456000").is_ok());
        assert!(usd("0.0000001234567890123456").is_ok());
    }

    #[test]
    fn iou_rejects_garbage() {
        for bad in ["", "-", ".", "1.2.3", "abc", "1e", "1e+x", "--1"] {
            assert!(usd(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn iou_normalisation() {
        let v = IouValue::parse("-12.5").unwrap();
        assert!(v.negative);
        assert_eq!(v.mantissa, 1_250_000_000_000_000);
        assert_eq!(v.exponent, -14);
        assert!(usd("-12.5").unwrap().is_negative());
        assert!(!usd("-0").unwrap().is_negative());
    }

    #[test]
    fn iou_rejects_xrp_currency() {
        assert!(IssuedCurrencyAmount::new("1", Currency::XRP, issuer()).is_err());
    }

    #[test]
    fn mpt_bounds() {
        let id = MptIssuanceId::new("00000001A407AF5856CCF3C42619DAA925813FC955C72983").unwrap();
        assert!(MptAmount::new("9223372036854775807", id.clone()).is_ok());
        assert!(MptAmount::new("9223372036854775808", id.clone()).is_err());
        assert!(MptAmount::new("1.5", id.clone()).is_err());
        assert!(MptAmount::new("-3", id).unwrap().is_negative());
    }

    #[test]
    fn wire_shape_selects_variant() {
        let xrp: CurrencyAmount = serde_json::from_value(json!("1000")).unwrap();
        assert!(matches!(xrp, CurrencyAmount::Xrp(_)));

        let iou_json = json!({
            "currency": "USD",
            "issuer": "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe",
            "value": "1.5"
        });
        let iou: CurrencyAmount = serde_json::from_value(iou_json.clone()).unwrap();
        assert!(matches!(iou, CurrencyAmount::Issued(_)));
        assert_eq!(serde_json::to_value(&iou).unwrap(), iou_json);

        let mpt_json = json!({
            "mpt_issuance_id": "00000001A407AF5856CCF3C42619DAA925813FC955C72983",
            "value": "100"
        });
        let mpt: CurrencyAmount = serde_json::from_value(mpt_json.clone()).unwrap();
        assert!(matches!(mpt, CurrencyAmount::Mpt(_)));
        assert_eq!(serde_json::to_value(&mpt).unwrap(), mpt_json);

        assert!(serde_json::from_value::<CurrencyAmount>(json!(1000)).is_err());
    }
}
