//! The `LedgerObject` tagged union and its JSON dispatch.
//!
//! The `LedgerEntryType` discriminator selects the variant; anything this
//! version does not know becomes [`LedgerObject::Unknown`] with every field
//! kept as-is.

use crate::account::{AccountRoot, Delegate, DepositPreauth, SignerList, Ticket};
use crate::common::EntryCommon;
use crate::error::LedgerError;
use crate::exchange::{Amm, Check, Escrow, Offer, PayChannel, RippleState};
use crate::identity::{Credential, Did, Oracle, PermissionedDomain};
use crate::mpt::{MpToken, MpTokenIssuance};
use crate::network::{Amendments, DirectoryNode, FeeSettings, LedgerHashes, NegativeUnl};
use crate::nft::{NfTokenOffer, NfTokenPage};
use crate::xchain::{Bridge, XChainOwnedClaimId, XChainOwnedCreateAccountClaimId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use xrpl_types::{Hash256, HexU64, UnknownFields};

/// Key carrying the discriminator on the wire.
pub const ENTRY_TYPE_FIELD: &str = "LedgerEntryType";

macro_rules! ledger_objects {
    ($($variant:ident($ty:ty) = $code:literal => $name:literal,)+) => {
        /// Every ledger entry type this model understands.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum LedgerEntryType {
            $($variant,)+
        }

        impl LedgerEntryType {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// The 16-bit type code used as the key space prefix.
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

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        #[derive(Clone, Debug, PartialEq)]
        pub enum LedgerObject {
            $($variant($ty),)+
            /// An entry type this version does not know, kept verbatim
            /// (minus the discriminator, which is held separately).
            Unknown {
                entry_type: String,
                fields: UnknownFields,
            },
        }

        impl LedgerObject {
            pub fn entry_type(&self) -> Option<LedgerEntryType> {
                match self {
                    $(Self::$variant(_) => Some(LedgerEntryType::$variant),)+
                    Self::Unknown { .. } => None,
                }
            }

            /// Bookkeeping fields; `None` for unknown entries.
            pub fn common(&self) -> Option<&EntryCommon> {
                match self {
                    $(Self::$variant(entry) => Some(&entry.common),)+
                    Self::Unknown { .. } => None,
                }
            }

            /// Fields carried through from the wire that no typed field
            /// claimed. For unknown entries that is every field.
            pub fn unknown_fields(&self) -> &UnknownFields {
                match self {
                    $(Self::$variant(entry) => &entry.common.unknown_fields,)+
                    Self::Unknown { fields, .. } => fields,
                }
            }

            fn decode(kind: LedgerEntryType, fields: Value) -> Result<Self, LedgerError> {
                match kind {
                    $(LedgerEntryType::$variant => serde_json::from_value(fields)
                        .map(Self::$variant)
                        .map_err(|source| LedgerError::Decode { entry_type: $name, source }),)+
                }
            }

            fn encode_fields(&self) -> Result<Map<String, Value>, LedgerError> {
                let value = match self {
                    $(Self::$variant(entry) => serde_json::to_value(entry).map_err(LedgerError::Encode)?,)+
                    Self::Unknown { fields, .. } => return Ok(fields.clone()),
                };
                match value {
                    Value::Object(map) => Ok(map),
                    _ => Err(LedgerError::NotAnObject),
                }
            }
        }
    };
}

ledger_objects! {
    AccountRoot(AccountRoot) = 0x0061 => "AccountRoot",
    Amendments(Amendments) = 0x0066 => "Amendments",
    Amm(Amm) = 0x0079 => "AMM",
    Bridge(Bridge) = 0x0069 => "Bridge",
    Check(Check) = 0x0043 => "Check",
    Credential(Credential) = 0x0081 => "Credential",
    Delegate(Delegate) = 0x0083 => "Delegate",
    DepositPreauth(DepositPreauth) = 0x0070 => "DepositPreauth",
    DirectoryNode(DirectoryNode) = 0x0064 => "DirectoryNode",
    Did(Did) = 0x0049 => "DID",
    Escrow(Escrow) = 0x0075 => "Escrow",
    FeeSettings(FeeSettings) = 0x0073 => "FeeSettings",
    LedgerHashes(LedgerHashes) = 0x0068 => "LedgerHashes",
    MpToken(MpToken) = 0x007F => "MPToken",
    MpTokenIssuance(MpTokenIssuance) = 0x007E => "MPTokenIssuance",
    NegativeUnl(NegativeUnl) = 0x004E => "NegativeUNL",
    NfTokenOffer(NfTokenOffer) = 0x0037 => "NFTokenOffer",
    NfTokenPage(NfTokenPage) = 0x0050 => "NFTokenPage",
    Offer(Offer) = 0x006F => "Offer",
    Oracle(Oracle) = 0x0080 => "Oracle",
    PayChannel(PayChannel) = 0x0078 => "PayChannel",
    PermissionedDomain(PermissionedDomain) = 0x0082 => "PermissionedDomain",
    RippleState(RippleState) = 0x0072 => "RippleState",
    SignerList(SignerList) = 0x0053 => "SignerList",
    Ticket(Ticket) = 0x0054 => "Ticket",
    XChainOwnedClaimId(XChainOwnedClaimId) = 0x0071 => "XChainOwnedClaimID",
    XChainOwnedCreateAccountClaimId(XChainOwnedCreateAccountClaimId) = 0x0074 => "XChainOwnedCreateAccountClaimID",
}

impl LedgerObject {
    pub fn from_json(value: Value) -> Result<Self, LedgerError> {
        let Value::Object(map) = value else {
            return Err(LedgerError::NotAnObject);
        };
        let entry_type = match map.get(ENTRY_TYPE_FIELD) {
            Some(Value::String(name)) => name.clone(),
            _ => return Err(LedgerError::MissingEntryType),
        };
        // Rebuild rather than remove so the remaining keys keep their order.
        let fields: UnknownFields = map
            .into_iter()
            .filter(|(key, _)| key != ENTRY_TYPE_FIELD)
            .collect();

        match LedgerEntryType::from_name(&entry_type) {
            Some(kind) => Self::decode(kind, Value::Object(fields)),
            None => {
                tracing::debug!(
                    entry_type = %entry_type,
                    fields = fields.len(),
                    "unrecognised ledger entry type, keeping raw fields"
                );
                Ok(Self::Unknown { entry_type, fields })
            }
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LedgerError> {
        let value: Value = serde_json::from_str(json).map_err(|source| LedgerError::Decode {
            entry_type: "ledger entry",
            source,
        })?;
        Self::from_json(value)
    }

    /// Wire form with the discriminator first, then the entry's fields in
    /// declaration order, then any unknown fields in arrival order.
    pub fn to_json(&self) -> Result<Value, LedgerError> {
        let mut out = Map::new();
        out.insert(
            ENTRY_TYPE_FIELD.to_string(),
            Value::String(self.entry_type_name().to_string()),
        );
        out.extend(self.encode_fields()?);
        Ok(Value::Object(out))
    }

    pub fn entry_type_name(&self) -> &str {
        match self {
            Self::Unknown { entry_type, .. } => entry_type,
            known => known.entry_type().map_or("", LedgerEntryType::name),
        }
    }

    /// The entry's ledger index, when the payload carried one.
    pub fn index(&self) -> Option<&Hash256> {
        self.common().and_then(|common| common.index.as_ref())
    }

    /// Page of the owner directory that lists this entry.
    pub fn owner_node(&self) -> Option<&HexU64> {
        match self {
            Self::Bridge(e) => Some(&e.owner_node),
            Self::Check(e) => Some(&e.owner_node),
            Self::Credential(e) => Some(&e.issuer_node),
            Self::Delegate(e) => Some(&e.owner_node),
            Self::DepositPreauth(e) => Some(&e.owner_node),
            Self::Did(e) => Some(&e.owner_node),
            Self::Escrow(e) => Some(&e.owner_node),
            Self::MpToken(e) => Some(&e.owner_node),
            Self::MpTokenIssuance(e) => Some(&e.owner_node),
            Self::NfTokenOffer(e) => Some(&e.owner_node),
            Self::Offer(e) => Some(&e.owner_node),
            Self::Oracle(e) => Some(&e.owner_node),
            Self::PayChannel(e) => Some(&e.owner_node),
            Self::PermissionedDomain(e) => Some(&e.owner_node),
            Self::SignerList(e) => Some(&e.owner_node),
            Self::Ticket(e) => Some(&e.owner_node),
            Self::XChainOwnedClaimId(e) => Some(&e.owner_node),
            Self::XChainOwnedCreateAccountClaimId(e) => Some(&e.owner_node),
            Self::Amm(e) => e.owner_node.as_ref(),
            Self::AccountRoot(_)
            | Self::Amendments(_)
            | Self::DirectoryNode(_)
            | Self::FeeSettings(_)
            | Self::LedgerHashes(_)
            | Self::NegativeUnl(_)
            | Self::NfTokenPage(_)
            | Self::RippleState(_)
            | Self::Unknown { .. } => None,
        }
    }
}

impl fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for LedgerObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LedgerObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(serde::de::Error::custom)
    }
}
