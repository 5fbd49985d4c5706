//! A validated transaction and its JSON wire form.

use crate::builder::TransactionBuilder;
use crate::common::TransactionCommon;
use crate::error::{Rule, TransactionError};
use crate::kind::TransactionKind;
use crate::validation::{validate_common, violation};
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use xrpl_types::{Address, TransactionType};

/// A transaction that passed every envelope and per-type check.
///
/// The only ways to obtain one are [`TransactionBuilder::build`] and
/// [`Transaction::from_json`]; there is no way to mutate it afterwards
/// other than going back through a builder.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    common: TransactionCommon,
    kind: TransactionKind,
}

impl Transaction {
    /// Run the envelope checks, reconcile derived fields, then run the
    /// per-type checks.
    pub(crate) fn from_parts(
        common: TransactionCommon,
        mut kind: TransactionKind,
    ) -> Result<Self, TransactionError> {
        validate_common(&common)?;
        kind.normalize()?;
        check_shadowed_fields(&common, &kind)?;
        kind.validate(&common)?;
        Ok(Self { common, kind })
    }

    pub fn from_json(value: Value) -> Result<Self, TransactionError> {
        let Value::Object(mut fields) = value else {
            return Err(TransactionError::Decode("a transaction must be a JSON object".into()));
        };
        let type_name = match fields.remove("TransactionType") {
            Some(Value::String(name)) => name,
            Some(other) => {
                return Err(TransactionError::Decode(format!(
                    "TransactionType must be a string, got {other}"
                )))
            }
            None => return Err(TransactionError::Decode("missing TransactionType".into())),
        };
        let (common, kind) = TransactionKind::decode(&type_name, fields)?;
        let transaction = Self::from_parts(common, kind)?;
        tracing::trace!(
            transaction_type = %type_name,
            account = %transaction.account(),
            "decoded transaction"
        );
        Ok(transaction)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TransactionError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| TransactionError::Decode(e.to_string()))?;
        Self::from_json(value)
    }

    /// Wire form: `TransactionType`, the envelope, the payload, then any
    /// unrecognised fields in their original order.
    pub fn to_json(&self) -> Result<Value, TransactionError> {
        let mut out = Map::new();
        out.insert(
            "TransactionType".to_string(),
            Value::String(self.kind.type_name().to_string()),
        );

        let envelope = serde_json::to_value(&self.common)
            .map_err(|e| TransactionError::Encode(e.to_string()))?;
        if let Value::Object(envelope) = envelope {
            out.extend(
                envelope
                    .into_iter()
                    .filter(|(key, _)| !self.common.unknown_fields.contains_key(key)),
            );
        }
        out.extend(self.kind.encode_payload()?);
        out.extend(
            self.common
                .unknown_fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Ok(Value::Object(out))
    }

    pub fn to_json_string(&self) -> Result<String, TransactionError> {
        serde_json::to_string(&self.to_json()?).map_err(|e| TransactionError::Encode(e.to_string()))
    }

    pub fn common(&self) -> &TransactionCommon {
        &self.common
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    pub fn account(&self) -> &Address {
        &self.common.account
    }

    /// `None` for a discriminator this version does not know.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.kind.transaction_type()
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    pub fn into_parts(self) -> (TransactionCommon, TransactionKind) {
        (self.common, self.kind)
    }

    /// Start a builder from this transaction, e.g. to add a signature.
    pub fn to_builder(&self) -> TransactionBuilder {
        TransactionBuilder::from_parts(self.common.clone(), self.kind.clone())
    }
}

/// Pass-through fields may not carry a key the payload already encodes.
fn check_shadowed_fields(
    common: &TransactionCommon,
    kind: &TransactionKind,
) -> Result<(), TransactionError> {
    if common.unknown_fields.is_empty() {
        return Ok(());
    }
    let payload = kind.encode_payload()?;
    match common.unknown_fields.keys().find(|key| payload.contains_key(*key)) {
        Some(key) => Err(violation(
            Rule::ReservedField,
            format!("{key} is a {} field and cannot also be unrecognised", kind.type_name()),
        )),
        None => Ok(()),
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.to_json() {
            Ok(value) => value.serialize(serializer),
            Err(err) => Err(ser::Error::custom(err)),
        }
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::Payment;
    use crate::test_support::*;
    use serde_json::json;

    fn payment_json() -> Value {
        json!({
            "TransactionType": "Payment",
            "Account": alice().as_str(),
            "Fee": "12",
            "Sequence": 7,
            "Destination": bob().as_str(),
            "Amount": "1000000"
        })
    }

    #[test]
    fn test_from_json_round_trip() {
        let tx = Transaction::from_json(payment_json()).unwrap();
        assert_eq!(tx.transaction_type(), Some(TransactionType::Payment));
        assert_eq!(tx.account(), &alice());
        assert_eq!(tx.to_json().unwrap(), payment_json());
    }

    #[test]
    fn test_to_json_puts_type_first() {
        let tx = Transaction::from_json(payment_json()).unwrap();
        let Value::Object(map) = tx.to_json().unwrap() else { panic!("expected an object") };
        assert_eq!(map.keys().next().map(String::as_str), Some("TransactionType"));
    }

    #[test]
    fn test_from_json_rejects_invalid_payload() {
        let mut json = payment_json();
        json["Destination"] = json!(alice().as_str());
        let err = Transaction::from_json(json).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::SelfReference));
    }

    #[test]
    fn test_from_json_requires_type() {
        let mut json = payment_json();
        json.as_object_mut().unwrap().remove("TransactionType");
        assert!(matches!(Transaction::from_json(json), Err(TransactionError::Decode(_))));
        assert!(matches!(Transaction::from_json(json!([1])), Err(TransactionError::Decode(_))));
    }

    #[test]
    fn test_missing_payload_field_is_a_decode_error() {
        let mut json = payment_json();
        json.as_object_mut().unwrap().remove("Destination");
        assert!(matches!(Transaction::from_json(json), Err(TransactionError::Decode(_))));
    }

    #[test]
    fn test_unknown_field_shadowing_payload_is_rejected() {
        let mut common = common(alice());
        common.unknown_fields.insert("Destination".into(), json!(carol().as_str()));
        let kind = TransactionKind::from(Payment::new(bob(), xrp(1)));
        let err = Transaction::from_parts(common, kind).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::ReservedField));
    }

    #[test]
    fn test_unknown_field_shadowing_envelope_is_rejected() {
        let mut common = common(alice());
        common.unknown_fields.insert("Account".into(), json!(carol().as_str()));
        let kind = TransactionKind::from(Payment::new(bob(), xrp(1)));
        let err = Transaction::from_parts(common, kind).unwrap_err();
        assert_eq!(err.rule(), Some(Rule::ReservedField));
    }

    #[test]
    fn test_serde_goes_through_validation() {
        let tx: Transaction = serde_json::from_value(payment_json()).unwrap();
        assert_eq!(serde_json::to_value(&tx).unwrap(), payment_json());

        let mut bad = payment_json();
        bad["Amount"] = json!("0");
        assert!(serde_json::from_value::<Transaction>(bad).is_err());
    }
}
