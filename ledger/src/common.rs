//! Fields and wire helpers shared by every ledger entry.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use xrpl_types::{Hash256, UnknownFields};

/// Bookkeeping fields every entry may carry, plus the pass-through map.
///
/// Flattened into each entry struct; it must stay the last flattened field
/// so the catch-all map only sees keys no typed field claimed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryCommon {
    #[serde(rename = "index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Hash256>,

    #[serde(rename = "PreviousTxnID", default, skip_serializing_if = "Option::is_none")]
    pub previous_txn_id: Option<Hash256>,

    #[serde(rename = "PreviousTxnLgrSeq", default, skip_serializing_if = "Option::is_none")]
    pub previous_txn_lgr_seq: Option<u32>,

    #[serde(flatten)]
    pub unknown_fields: UnknownFields,
}

/// `Flags` for entry types that define no flags: always encodes `0` and
/// refuses anything else on decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ZeroFlags;

impl Serialize for ZeroFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(0)
    }
}

impl<'de> Deserialize<'de> for ZeroFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u32::deserialize(deserializer)? {
            0 => Ok(ZeroFlags),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Unsigned(u64::from(other)),
                &"0 (this entry type defines no flags)",
            )),
        }
    }
}
