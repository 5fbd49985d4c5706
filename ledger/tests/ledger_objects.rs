//! Decoding ledger entries as returned by `ledger_entry` / `account_objects`.

use serde_json::{json, Value};
use xrpl_ledger::{LedgerEntryType, LedgerError, LedgerObject};

const ALICE: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";
const BOB: &str = "rH4KEcG9dEwGwpn6AyoWK9cZPLL4RLSmWW";
const INDEX: &str = "1AF19E96D2B1A1E1F1A8C6D1F7A2D7F1E5E8B1B0A3C1D7E2F4A1B2C3D4E5F6A7";

fn round_trip(raw: Value) -> LedgerObject {
    let object = LedgerObject::from_json(raw.clone()).unwrap();
    assert_eq!(object.to_json().unwrap(), raw, "re-encoding must reproduce the input");
    object
}

#[test]
fn escrow_round_trip_keeps_index_and_owner_node() {
    let object = round_trip(json!({
        "LedgerEntryType": "Escrow",
        "Account": ALICE,
        "Destination": BOB,
        "Amount": "10000",
        "Condition": "A0258020E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855810100",
        "CancelAfter": 545440232,
        "FinishAfter": 545354132,
        "Flags": 0,
        "OwnerNode": "0000000000000000",
        "DestinationNode": "0000000000000000",
        "PreviousTxnID": "C44F2EB84196B9AD820313DBEBA6316A15C9A2D35787579ED172B87A30131DA7",
        "PreviousTxnLgrSeq": 28991004,
        "index": INDEX
    }));
    assert_eq!(object.entry_type(), Some(LedgerEntryType::Escrow));
    assert_eq!(object.index().map(|h| h.as_str()), Some(INDEX));
    assert_eq!(object.owner_node().map(|n| n.value()), Some(0));
    match object {
        LedgerObject::Escrow(escrow) => assert!(escrow.decoded_condition().is_some()),
        other => panic!("expected an escrow, got {other:?}"),
    }
}

#[test]
fn unknown_fields_survive_on_known_entries() {
    let object = round_trip(json!({
        "LedgerEntryType": "Ticket",
        "Account": ALICE,
        "Flags": 0,
        "OwnerNode": "0",
        "TicketSequence": 9,
        "SomeFutureField": {"Nested": [1, 2, 3]}
    }));
    assert_eq!(
        object.unknown_fields().get("SomeFutureField"),
        Some(&json!({"Nested": [1, 2, 3]}))
    );
}

#[test]
fn unrecognised_entry_type_degrades_to_unknown() {
    let raw = json!({
        "LedgerEntryType": "Vault",
        "Owner": ALICE,
        "AssetsTotal": "100",
        "index": INDEX
    });
    let object = round_trip(raw);
    assert_eq!(object.entry_type(), None);
    assert_eq!(object.entry_type_name(), "Vault");
    assert_eq!(object.index(), None);
    assert_eq!(object.unknown_fields().len(), 3);
    assert!(!object.unknown_fields().contains_key("LedgerEntryType"));
}

#[test]
fn discriminator_comes_first_on_encode() {
    let object = LedgerObject::from_json(json!({
        "Account": ALICE,
        "Flags": 0,
        "OwnerNode": "0",
        "TicketSequence": 9,
        "LedgerEntryType": "Ticket"
    }))
    .unwrap();
    let encoded = object.to_json().unwrap();
    let first_key = encoded.as_object().unwrap().keys().next().cloned();
    assert_eq!(first_key.as_deref(), Some("LedgerEntryType"));
}

#[test]
fn flagless_entries_reject_flags() {
    let err = LedgerObject::from_json(json!({
        "LedgerEntryType": "DID",
        "Account": ALICE,
        "Flags": 1,
        "OwnerNode": "0",
        "URI": "697066733A2F2F"
    }))
    .unwrap_err();
    assert!(matches!(err, LedgerError::Decode { entry_type: "DID", .. }));
}

#[test]
fn delegate_entry_permissions() {
    let object = round_trip(json!({
        "LedgerEntryType": "Delegate",
        "Account": ALICE,
        "Authorize": BOB,
        "Flags": 0,
        "OwnerNode": "0",
        "Permissions": [
            {"Permission": {"PermissionValue": "Payment"}},
            {"Permission": {"PermissionValue": "TrustlineAuthorize"}}
        ]
    }));
    let LedgerObject::Delegate(delegate) = object else {
        panic!("expected a delegate entry");
    };
    let codes: Vec<u32> = delegate.permissions.iter().map(|p| p.value().code()).collect();
    assert_eq!(codes, vec![1, 65537]);
}

#[test]
fn serde_impls_go_through_dispatch() {
    let objects: Vec<LedgerObject> = serde_json::from_value(json!([
        {"LedgerEntryType": "Ticket", "Account": ALICE, "Flags": 0, "OwnerNode": "0", "TicketSequence": 1},
        {"LedgerEntryType": "Brand New", "Anything": true}
    ]))
    .unwrap();
    assert_eq!(objects[0].entry_type(), Some(LedgerEntryType::Ticket));
    assert!(matches!(objects[1], LedgerObject::Unknown { .. }));
    let back = serde_json::to_value(&objects).unwrap();
    assert_eq!(back[1], json!({"LedgerEntryType": "Brand New", "Anything": true}));
}
