//! Currency codes and asset identifiers (`Issue`).

use crate::address::Address;
use crate::error::TypesError;
use crate::hash::MptIssuanceId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

const STANDARD_SYMBOLS: &str = "?!@#$%^&*<>(){}[]|";

/// A currency code: three printable characters, or 40 hex characters for
/// non-standard codes.
///
/// Standard codes are case-sensitive. Hex codes keep their supplied text
/// and compare case-insensitively.
#[derive(Clone)]
pub struct Currency(Cow<'static, str>);

impl Currency {
    /// The native currency. Never valid as the currency of an issued amount.
    pub const XRP: Self = Self(Cow::Borrowed("XRP"));

    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        let standard = s.len() == 3
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || STANDARD_SYMBOLS.contains(c));
        let non_standard = s.len() == 40 && hex::decode(&s).is_ok();
        if standard || non_standard {
            Ok(Self(Cow::Owned(s)))
        } else {
            Err(TypesError::InvalidCurrency(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_native(&self) -> bool {
        self.0 == "XRP"
    }

    fn normalized(&self) -> impl Iterator<Item = u8> + '_ {
        let hex = self.0.len() == 40;
        self.0
            .bytes()
            .map(move |b| if hex { b.to_ascii_uppercase() } else { b })
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.normalized().eq(other.normalized())
    }
}

impl Eq for Currency {}

impl PartialOrd for Currency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Currency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(other.normalized())
    }
}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.normalized() {
            state.write_u8(b);
        }
        state.write_usize(self.0.len());
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({})", self.0)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// An asset without an amount: the native currency, an issued currency, or
/// a multi-purpose token issuance. Used by AMM and bridge fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Issue {
    Xrp,
    Issued { currency: Currency, issuer: Address },
    Mpt { mpt_issuance_id: MptIssuanceId },
}

impl Issue {
    /// The native currency, no issuer.
    pub const XRP: Self = Self::Xrp;

    pub fn issued(currency: Currency, issuer: Address) -> Result<Self, TypesError> {
        if currency.is_native() {
            return Err(TypesError::InvalidCurrency(
                "XRP cannot be issued by an account".into(),
            ));
        }
        Ok(Self::Issued { currency, issuer })
    }

    pub fn issuer(&self) -> Option<&Address> {
        match self {
            Self::Xrp | Self::Mpt { .. } => None,
            Self::Issued { issuer, .. } => Some(issuer),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Xrp)
    }
}

#[derive(Serialize, Deserialize)]
struct IssueRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    issuer: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mpt_issuance_id: Option<MptIssuanceId>,
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let repr = match self {
            Self::Xrp => IssueRepr {
                currency: Some(Currency::XRP),
                issuer: None,
                mpt_issuance_id: None,
            },
            Self::Issued { currency, issuer } => IssueRepr {
                currency: Some(currency.clone()),
                issuer: Some(issuer.clone()),
                mpt_issuance_id: None,
            },
            Self::Mpt { mpt_issuance_id } => IssueRepr {
                currency: None,
                issuer: None,
                mpt_issuance_id: Some(mpt_issuance_id.clone()),
            },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Issue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;
        let repr = IssueRepr::deserialize(deserializer)?;
        match (repr.currency, repr.issuer, repr.mpt_issuance_id) {
            (Some(c), None, None) if c.is_native() => Ok(Self::Xrp),
            (Some(currency), Some(issuer), None) => {
                Self::issued(currency, issuer).map_err(D::Error::custom)
            }
            (None, None, Some(mpt_issuance_id)) => Ok(Self::Mpt { mpt_issuance_id }),
            _ => Err(D::Error::custom(
                "issue must be XRP, currency+issuer, or mpt_issuance_id",
            )),
        }
    }
}
