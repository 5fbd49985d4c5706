//! Transaction type discriminators and delegable permissions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! transaction_types {
    ($($variant:ident = $code:literal => $name:literal,)+) => {
        /// Every transaction type this model understands, with its numeric
        /// code and wire name.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum TransactionType {
            $($variant,)+
        }

        impl TransactionType {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            pub fn code(self) -> u16 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl FromStr for TransactionType {
            type Err = UnknownTransactionType;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    other => Err(UnknownTransactionType(other.to_string())),
                }
            }
        }
    };
}

transaction_types! {
    Payment = 0 => "Payment",
    EscrowCreate = 1 => "EscrowCreate",
    EscrowFinish = 2 => "EscrowFinish",
    AccountSet = 3 => "AccountSet",
    EscrowCancel = 4 => "EscrowCancel",
    SetRegularKey = 5 => "SetRegularKey",
    OfferCreate = 7 => "OfferCreate",
    OfferCancel = 8 => "OfferCancel",
    TicketCreate = 10 => "TicketCreate",
    SignerListSet = 12 => "SignerListSet",
    PaymentChannelCreate = 13 => "PaymentChannelCreate",
    PaymentChannelFund = 14 => "PaymentChannelFund",
    PaymentChannelClaim = 15 => "PaymentChannelClaim",
    CheckCreate = 16 => "CheckCreate",
    CheckCash = 17 => "CheckCash",
    CheckCancel = 18 => "CheckCancel",
    DepositPreauth = 19 => "DepositPreauth",
    TrustSet = 20 => "TrustSet",
    AccountDelete = 21 => "AccountDelete",
    NfTokenMint = 25 => "NFTokenMint",
    NfTokenBurn = 26 => "NFTokenBurn",
    NfTokenCreateOffer = 27 => "NFTokenCreateOffer",
    NfTokenCancelOffer = 28 => "NFTokenCancelOffer",
    NfTokenAcceptOffer = 29 => "NFTokenAcceptOffer",
    Clawback = 30 => "Clawback",
    AmmClawback = 31 => "AMMClawback",
    AmmCreate = 35 => "AMMCreate",
    AmmDeposit = 36 => "AMMDeposit",
    AmmWithdraw = 37 => "AMMWithdraw",
    AmmVote = 38 => "AMMVote",
    AmmBid = 39 => "AMMBid",
    AmmDelete = 40 => "AMMDelete",
    XChainCreateClaimId = 41 => "XChainCreateClaimID",
    XChainCommit = 42 => "XChainCommit",
    XChainClaim = 43 => "XChainClaim",
    XChainAccountCreateCommit = 44 => "XChainAccountCreateCommit",
    XChainAddClaimAttestation = 45 => "XChainAddClaimAttestation",
    XChainAddAccountCreateAttestation = 46 => "XChainAddAccountCreateAttestation",
    XChainModifyBridge = 47 => "XChainModifyBridge",
    XChainCreateBridge = 48 => "XChainCreateBridge",
    DidSet = 49 => "DIDSet",
    DidDelete = 50 => "DIDDelete",
    OracleSet = 51 => "OracleSet",
    OracleDelete = 52 => "OracleDelete",
    LedgerStateFix = 53 => "LedgerStateFix",
    MpTokenIssuanceCreate = 54 => "MPTokenIssuanceCreate",
    MpTokenIssuanceDestroy = 55 => "MPTokenIssuanceDestroy",
    MpTokenIssuanceSet = 56 => "MPTokenIssuanceSet",
    MpTokenAuthorize = 57 => "MPTokenAuthorize",
    CredentialCreate = 58 => "CredentialCreate",
    CredentialAccept = 59 => "CredentialAccept",
    CredentialDelete = 60 => "CredentialDelete",
    NfTokenModify = 61 => "NFTokenModify",
    PermissionedDomainSet = 62 => "PermissionedDomainSet",
    PermissionedDomainDelete = 63 => "PermissionedDomainDelete",
    DelegateSet = 64 => "DelegateSet",
    Batch = 71 => "Batch",
    EnableAmendment = 100 => "EnableAmendment",
    SetFee = 101 => "SetFee",
    UnlModify = 102 => "UNLModify",
}

impl TransactionType {
    /// Pseudo-transactions are injected by validators, never signed by users.
    pub fn is_pseudo(self) -> bool {
        matches!(self, Self::EnableAmendment | Self::SetFee | Self::UnlModify)
    }

    /// Whether an account may hand this transaction type to a delegate.
    pub fn is_delegable(self) -> bool {
        !self.is_pseudo()
            && !matches!(
                self,
                Self::AccountSet
                    | Self::SetRegularKey
                    | Self::SignerListSet
                    | Self::DelegateSet
                    | Self::AccountDelete
                    | Self::Batch
            )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TransactionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction type {0:?}")]
pub struct UnknownTransactionType(pub String);

// ── Permissions ─────────────────────────────────────────────────────────

macro_rules! granular_permissions {
    ($($variant:ident = $code:literal => $name:literal,)+) => {
        /// Permissions narrower than a whole transaction type.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum GranularPermission {
            $($variant,)+
        }

        impl GranularPermission {
            pub fn code(self) -> u32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            fn from_name(s: &str) -> Option<Self> {
                match s {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

// Codes start above the 16-bit transaction type space so the two never collide.
granular_permissions! {
    TrustlineAuthorize = 65537 => "TrustlineAuthorize",
    TrustlineFreeze = 65538 => "TrustlineFreeze",
    TrustlineUnfreeze = 65539 => "TrustlineUnfreeze",
    AccountDomainSet = 65540 => "AccountDomainSet",
    AccountEmailHashSet = 65541 => "AccountEmailHashSet",
    AccountMessageKeySet = 65542 => "AccountMessageKeySet",
    AccountTransferRateSet = 65543 => "AccountTransferRateSet",
    AccountTickSizeSet = 65544 => "AccountTickSizeSet",
    PaymentMint = 65545 => "PaymentMint",
    PaymentBurn = 65546 => "PaymentBurn",
    MpTokenIssuanceLock = 65547 => "MPTokenIssuanceLock",
    MpTokenIssuanceUnlock = 65548 => "MPTokenIssuanceUnlock",
}

/// A value in a delegate's permission list: a whole transaction type or a
/// granular sub-permission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PermissionValue {
    Transaction(TransactionType),
    Granular(GranularPermission),
}

impl PermissionValue {
    /// Numeric permission code: transaction types are offset by one so that
    /// zero stays invalid.
    pub fn code(self) -> u32 {
        match self {
            Self::Transaction(t) => u32::from(t.code()) + 1,
            Self::Granular(g) => g.code(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Transaction(t) => t.name(),
            Self::Granular(g) => g.name(),
        }
    }

    pub fn is_delegable(self) -> bool {
        match self {
            Self::Transaction(t) => t.is_delegable(),
            Self::Granular(_) => true,
        }
    }
}

impl FromStr for PermissionValue {
    type Err = UnknownTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(g) = GranularPermission::from_name(s) {
            return Ok(Self::Granular(g));
        }
        s.parse().map(Self::Transaction)
    }
}

impl fmt::Display for PermissionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PermissionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for PermissionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Wire wrapper: `{"Permission": {"PermissionValue": "Payment"}}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    #[serde(rename = "Permission")]
    pub permission: PermissionInner,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionInner {
    #[serde(rename = "PermissionValue")]
    pub permission_value: PermissionValue,
}

impl Permission {
    pub fn new(permission_value: PermissionValue) -> Self {
        Self {
            permission: PermissionInner { permission_value },
        }
    }

    pub fn value(&self) -> PermissionValue {
        self.permission.permission_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for t in TransactionType::ALL {
            assert_eq!(t.name().parse::<TransactionType>().unwrap(), *t);
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<u16> = TransactionType::ALL.iter().map(|t| t.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), TransactionType::ALL.len());
    }

    #[test]
    fn granular_codes_sit_above_transaction_codes() {
        let granular: PermissionValue = "TrustlineAuthorize".parse().unwrap();
        assert_eq!(granular.code(), 65537);
        let max_tx = TransactionType::ALL
            .iter()
            .map(|t| PermissionValue::Transaction(*t).code())
            .max()
            .unwrap();
        assert!(max_tx <= u32::from(u16::MAX) + 1);
        assert!(granular.code() > u32::from(u16::MAX) + 1);
    }

    #[test]
    fn payment_permission_code() {
        let p: PermissionValue = "Payment".parse().unwrap();
        assert_eq!(p, PermissionValue::Transaction(TransactionType::Payment));
        assert_eq!(p.code(), 1);
    }

    #[test]
    fn non_delegable_types() {
        for t in [
            TransactionType::AccountSet,
            TransactionType::SetRegularKey,
            TransactionType::SignerListSet,
            TransactionType::DelegateSet,
            TransactionType::AccountDelete,
            TransactionType::Batch,
            TransactionType::EnableAmendment,
            TransactionType::SetFee,
            TransactionType::UnlModify,
        ] {
            assert!(!t.is_delegable(), "{t} must not be delegable");
        }
        assert!(TransactionType::Payment.is_delegable());
        assert!("AccountDomainSet".parse::<PermissionValue>().unwrap().is_delegable());
    }

    #[test]
    fn unknown_permission_name() {
        assert!("NotAThing".parse::<PermissionValue>().is_err());
    }
}
