//! The closed set of transaction payloads and the dispatch between a wire
//! discriminator and its payload type.

use crate::account::{
    AccountDelete, AccountSet, LedgerStateFix, SetRegularKey, SignerListSet, TicketCreate,
};
use crate::amm::{AmmBid, AmmClawback, AmmCreate, AmmDelete, AmmDeposit, AmmVote, AmmWithdraw};
use crate::batch::Batch;
use crate::channel::{PaymentChannelClaim, PaymentChannelCreate, PaymentChannelFund};
use crate::check::{CheckCancel, CheckCash, CheckCreate};
use crate::clawback::Clawback;
use crate::common::TransactionCommon;
use crate::credential::{
    CredentialAccept, CredentialCreate, CredentialDelete, PermissionedDomainDelete,
    PermissionedDomainSet,
};
use crate::delegate::DelegateSet;
use crate::deposit_preauth::DepositPreauth;
use crate::did::{DidDelete, DidSet};
use crate::error::TransactionError;
use crate::escrow::{EscrowCancel, EscrowCreate, EscrowFinish};
use crate::mpt::{
    MpTokenAuthorize, MpTokenIssuanceCreate, MpTokenIssuanceDestroy, MpTokenIssuanceSet,
};
use crate::nft::{
    NfTokenAcceptOffer, NfTokenBurn, NfTokenCancelOffer, NfTokenCreateOffer, NfTokenMint,
    NfTokenModify,
};
use crate::offer::{OfferCancel, OfferCreate};
use crate::oracle::{OracleDelete, OracleSet};
use crate::payment::Payment;
use crate::pseudo::{EnableAmendment, SetFee, UnlModify};
use crate::trust::TrustSet;
use crate::validation::Validate;
use crate::xchain::{
    XChainAccountCreateCommit, XChainAddAccountCreateAttestation, XChainAddClaimAttestation,
    XChainClaim, XChainCommit, XChainCreateBridge, XChainCreateClaimId, XChainModifyBridge,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use xrpl_types::TransactionType;

/// Wire shape of a known transaction minus its discriminator: the payload
/// takes its own keys first, the envelope gets the rest.
#[derive(Deserialize)]
struct Envelope<P> {
    #[serde(flatten)]
    payload: P,
    #[serde(flatten)]
    common: TransactionCommon,
}

fn decode_error(err: serde_json::Error) -> TransactionError {
    TransactionError::Decode(err.to_string())
}

fn encode_error(err: serde_json::Error) -> TransactionError {
    TransactionError::Encode(err.to_string())
}

macro_rules! transaction_kinds {
    ($($variant:ident($payload:ty),)+) => {
        /// Payload of a transaction, one variant per [`TransactionType`].
        #[derive(Clone, Debug, PartialEq)]
        pub enum TransactionKind {
            $($variant($payload),)+
            /// A discriminator this version does not know. Every field is
            /// kept in the envelope's unknown fields.
            Unknown { transaction_type: String },
        }

        impl TransactionKind {
            pub fn transaction_type(&self) -> Option<TransactionType> {
                match self {
                    $(Self::$variant(_) => Some(TransactionType::$variant),)+
                    Self::Unknown { .. } => None,
                }
            }

            /// Discriminator as it appears on the wire.
            pub fn type_name(&self) -> &str {
                match self {
                    $(Self::$variant(_) => TransactionType::$variant.name(),)+
                    Self::Unknown { transaction_type } => transaction_type,
                }
            }

            pub(crate) fn decode(
                type_name: &str,
                fields: Map<String, Value>,
            ) -> Result<(TransactionCommon, Self), TransactionError> {
                let fields = Value::Object(fields);
                let Ok(transaction_type) = type_name.parse::<TransactionType>() else {
                    tracing::debug!(
                        transaction_type = type_name,
                        "unrecognised transaction type, keeping fields as-is"
                    );
                    let common = TransactionCommon::deserialize(fields).map_err(decode_error)?;
                    let kind = Self::Unknown { transaction_type: type_name.to_string() };
                    return Ok((common, kind));
                };
                match transaction_type {
                    $(TransactionType::$variant => {
                        let envelope = Envelope::<$payload>::deserialize(fields)
                            .map_err(decode_error)?;
                        Ok((envelope.common, Self::$variant(envelope.payload)))
                    })+
                }
            }

            /// The payload's own fields, in declaration order.
            pub(crate) fn encode_payload(&self) -> Result<Map<String, Value>, TransactionError> {
                let value = match self {
                    $(Self::$variant(payload) => serde_json::to_value(payload),)+
                    Self::Unknown { .. } => return Ok(Map::new()),
                }
                .map_err(encode_error)?;
                match value {
                    Value::Object(map) => Ok(map),
                    other => Err(TransactionError::Encode(format!(
                        "{} payload encoded as {other}, expected an object",
                        self.type_name()
                    ))),
                }
            }

            pub(crate) fn validate(
                &self,
                common: &TransactionCommon,
            ) -> Result<(), TransactionError> {
                match self {
                    $(Self::$variant(payload) => payload.validate(common),)+
                    Self::Unknown { .. } => Ok(()),
                }
            }
        }

        $(
            impl From<$payload> for TransactionKind {
                fn from(payload: $payload) -> Self {
                    Self::$variant(payload)
                }
            }
        )+
    };
}

transaction_kinds! {
    Payment(Payment),
    EscrowCreate(EscrowCreate),
    EscrowFinish(EscrowFinish),
    AccountSet(AccountSet),
    EscrowCancel(EscrowCancel),
    SetRegularKey(SetRegularKey),
    OfferCreate(OfferCreate),
    OfferCancel(OfferCancel),
    TicketCreate(TicketCreate),
    SignerListSet(SignerListSet),
    PaymentChannelCreate(PaymentChannelCreate),
    PaymentChannelFund(PaymentChannelFund),
    PaymentChannelClaim(PaymentChannelClaim),
    CheckCreate(CheckCreate),
    CheckCash(CheckCash),
    CheckCancel(CheckCancel),
    DepositPreauth(DepositPreauth),
    TrustSet(TrustSet),
    AccountDelete(AccountDelete),
    NfTokenMint(NfTokenMint),
    NfTokenBurn(NfTokenBurn),
    NfTokenCreateOffer(NfTokenCreateOffer),
    NfTokenCancelOffer(NfTokenCancelOffer),
    NfTokenAcceptOffer(NfTokenAcceptOffer),
    Clawback(Clawback),
    AmmClawback(AmmClawback),
    AmmCreate(AmmCreate),
    AmmDeposit(AmmDeposit),
    AmmWithdraw(AmmWithdraw),
    AmmVote(AmmVote),
    AmmBid(AmmBid),
    AmmDelete(AmmDelete),
    XChainCreateClaimId(XChainCreateClaimId),
    XChainCommit(XChainCommit),
    XChainClaim(XChainClaim),
    XChainAccountCreateCommit(XChainAccountCreateCommit),
    XChainAddClaimAttestation(XChainAddClaimAttestation),
    XChainAddAccountCreateAttestation(XChainAddAccountCreateAttestation),
    XChainModifyBridge(XChainModifyBridge),
    XChainCreateBridge(XChainCreateBridge),
    DidSet(DidSet),
    DidDelete(DidDelete),
    OracleSet(OracleSet),
    OracleDelete(OracleDelete),
    LedgerStateFix(LedgerStateFix),
    MpTokenIssuanceCreate(MpTokenIssuanceCreate),
    MpTokenIssuanceDestroy(MpTokenIssuanceDestroy),
    MpTokenIssuanceSet(MpTokenIssuanceSet),
    MpTokenAuthorize(MpTokenAuthorize),
    CredentialCreate(CredentialCreate),
    CredentialAccept(CredentialAccept),
    CredentialDelete(CredentialDelete),
    NfTokenModify(NfTokenModify),
    PermissionedDomainSet(PermissionedDomainSet),
    PermissionedDomainDelete(PermissionedDomainDelete),
    DelegateSet(DelegateSet),
    Batch(Batch),
    EnableAmendment(EnableAmendment),
    SetFee(SetFee),
    UnlModify(UnlModify),
}

impl TransactionKind {
    /// Reconcile derived representations before validation. Only escrow
    /// fulfillment has any.
    pub(crate) fn normalize(&mut self) -> Result<(), TransactionError> {
        if let Self::EscrowFinish(finish) = self {
            finish.normalize()?;
        }
        Ok(())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }
}
