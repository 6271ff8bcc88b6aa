//! The cosmos envelope around an elder rollup submission.
//!
//! The flow mirrors cosmos-sdk direct signing: a [`RollSubmission`] is packed into a
//! `TxBody`, a [`PublicKeyRecord`] and the account sequence go into the `AuthInfo`, and the
//! two encoded byte strings are bound to the chain id and account number by a [`SignDoc`].
//! The signature over the sign doc is finally attached with [`SignDoc::into_tx_raw`].
use base64::{
    prelude::BASE64_STANDARD,
    Engine as _,
};
use bytes::Bytes;
use prost::Message as _;

use crate::{
    address::{
        self,
        Address,
    },
    crypto::CompressedPublicKey,
    generated::{
        cosmos::{
            base::v1beta1::Coin,
            tx::{
                signing::v1beta1::SignMode,
                v1beta1 as raw,
            },
        },
        elder::{
            crypto::eldersecp256k1,
            router::MsgSubmitRollTx,
        },
        ethermint::crypto::v1::ethsecp256k1,
    },
    Protobuf,
};


/// Multiplier applied to the simulated gas to obtain the gas limit of the fee.
pub const GAS_ADJUSTMENT: u64 = 5;
/// Fee amount attached to every elder transaction.
pub const DEFAULT_FEE_AMOUNT: u64 = 500_000;
/// Denomination the fee is paid in.
pub const DEFAULT_FEE_DENOM: &str = "uelder";

/// The signing ecosystem a request originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WalletKind {
    /// A cosmos wallet extension signing in direct mode.
    Cosmos,
    /// An ethereum wallet signing EIP-191 personal messages.
    Ethereum,
}

/// The public key attached to a signer info.
///
/// The record type is determined by the wallet kind alone: cosmos wallets register their key
/// as an ethermint `ethsecp256k1` key, ethereum wallets as an elder `eldersecp256k1` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublicKeyRecord {
    ElderSecp256k1(CompressedPublicKey),
    EthSecp256k1(CompressedPublicKey),
}

impl PublicKeyRecord {
    #[must_use]
    pub fn for_wallet(kind: WalletKind, key: CompressedPublicKey) -> Self {
        match kind {
            WalletKind::Cosmos => Self::EthSecp256k1(key),
            WalletKind::Ethereum => Self::ElderSecp256k1(key),
        }
    }

    #[must_use]
    pub fn key(&self) -> &CompressedPublicKey {
        match self {
            Self::ElderSecp256k1(key) | Self::EthSecp256k1(key) => key,
        }
    }

    #[must_use]
    pub fn type_url(&self) -> String {
        use prost::Name as _;
        match self {
            Self::ElderSecp256k1(_) => eldersecp256k1::PubKey::type_url(),
            Self::EthSecp256k1(_) => ethsecp256k1::PubKey::type_url(),
        }
    }

    #[must_use]
    pub fn to_any(&self) -> pbjson_types::Any {
        let key = self.key().as_bytes().to_vec();
        let value = match self {
            Self::ElderSecp256k1(_) => eldersecp256k1::PubKey {
                key,
            }
            .encode_to_vec(),
            Self::EthSecp256k1(_) => ethsecp256k1::PubKey {
                key,
            }
            .encode_to_vec(),
        };
        pbjson_types::Any {
            type_url: self.type_url(),
            value: value.into(),
        }
    }
}

/// A `MsgSubmitRollTx`: the unsigned legacy encoding of a rollup transaction, submitted by an
/// elder account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollSubmission {
    sender: Address,
    roll_id: u64,
    tx_data: Bytes,
    account_number: u64,
}

impl RollSubmission {
    #[must_use]
    pub fn new(sender: Address, roll_id: u64, tx_data: Bytes, account_number: u64) -> Self {
        Self {
            sender,
            roll_id,
            tx_data,
            account_number,
        }
    }

    #[must_use]
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    #[must_use]
    pub fn roll_id(&self) -> u64 {
        self.roll_id
    }

    #[must_use]
    pub fn tx_data(&self) -> &Bytes {
        &self.tx_data
    }

    #[must_use]
    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    /// Packs the submission into an `Any` under the router message type URL.
    #[must_use]
    pub fn to_any(&self) -> pbjson_types::Any {
        pbjson_types::Any {
            type_url: Self::type_url(),
            value: self.to_raw().encode_to_vec().into(),
        }
    }
}

impl Protobuf for RollSubmission {
    type Error = Error;
    type Raw = MsgSubmitRollTx;

    fn try_from_raw_ref(raw: &Self::Raw) -> Result<Self, Self::Error> {
        let MsgSubmitRollTx {
            sender,
            roll_id,
            tx_data,
            acc_num,
        } = raw;
        let sender = sender.parse().map_err(Error::sender)?;
        Ok(Self {
            sender,
            roll_id: *roll_id,
            tx_data: Bytes::copy_from_slice(tx_data),
            account_number: *acc_num,
        })
    }

    fn to_raw(&self) -> Self::Raw {
        MsgSubmitRollTx {
            sender: self.sender.to_string(),
            roll_id: self.roll_id,
            tx_data: self.tx_data.to_vec(),
            acc_num: self.account_number,
        }
    }
}

/// Returns a fee of `amount` `denom` with a gas limit of `gas_used * GAS_ADJUSTMENT`.
#[must_use]
pub fn fee_for_gas_used(gas_used: u64, denom: &str, amount: u64) -> raw::Fee {
    raw::Fee {
        amount: vec![Coin {
            denom: denom.to_string(),
            amount: amount.to_string(),
        }],
        gas_limit: gas_used.saturating_mul(GAS_ADJUSTMENT),
        payer: String::new(),
        granter: String::new(),
    }
}

fn body_bytes(message: pbjson_types::Any) -> Vec<u8> {
    raw::TxBody {
        messages: vec![message],
        ..raw::TxBody::default()
    }
    .encode_to_vec()
}

fn signer_info(public_key: &PublicKeyRecord, sequence: u64, mode: SignMode) -> raw::SignerInfo {
    raw::SignerInfo {
        public_key: Some(public_key.to_any()),
        mode_info: Some(raw::ModeInfo {
            sum: Some(raw::mode_info::Sum::Single(raw::mode_info::Single {
                mode: mode.into(),
            })),
        }),
        sequence,
    }
}

/// Encodes the envelope used to dry-run `message` against the simulate endpoint.
///
/// The envelope carries a single signer with an unspecified sign mode, an empty fee, and one
/// zero-length placeholder signature.
#[must_use]
pub fn simulation_tx_bytes(
    message: pbjson_types::Any,
    public_key: &PublicKeyRecord,
    sequence: u64,
) -> Vec<u8> {
    raw::Tx {
        body: Some(raw::TxBody {
            messages: vec![message],
            ..raw::TxBody::default()
        }),
        auth_info: Some(raw::AuthInfo {
            signer_infos: vec![signer_info(public_key, sequence, SignMode::Unspecified)],
            fee: Some(raw::Fee::default()),
        }),
        signatures: vec![vec![]],
    }
    .encode_to_vec()
}

/// The document signed in `SIGN_MODE_DIRECT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignDoc {
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
    chain_id: String,
    account_number: u64,
}

impl SignDoc {
    #[must_use = "the builder must be built to construct a sign doc"]
    pub fn builder() -> SignDocBuilder {
        SignDocBuilder::default()
    }

    #[must_use]
    pub fn body_bytes(&self) -> &[u8] {
        &self.body_bytes
    }

    #[must_use]
    pub fn auth_info_bytes(&self) -> &[u8] {
        &self.auth_info_bytes
    }

    #[must_use]
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    #[must_use]
    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    /// The canonical bytes a signer signs over.
    #[must_use]
    pub fn sign_bytes(&self) -> Vec<u8> {
        self.to_raw().encode_to_vec()
    }

    /// Attaches `signature` to the body and auth info of this document.
    #[must_use]
    pub fn into_tx_raw(self, signature: Vec<u8>) -> raw::TxRaw {
        raw::TxRaw {
            body_bytes: self.body_bytes,
            auth_info_bytes: self.auth_info_bytes,
            signatures: vec![signature],
        }
    }
}

impl Protobuf for SignDoc {
    type Error = std::convert::Infallible;
    type Raw = raw::SignDoc;

    fn try_from_raw_ref(raw: &Self::Raw) -> Result<Self, Self::Error> {
        Ok(Self {
            body_bytes: raw.body_bytes.clone(),
            auth_info_bytes: raw.auth_info_bytes.clone(),
            chain_id: raw.chain_id.clone(),
            account_number: raw.account_number,
        })
    }

    fn to_raw(&self) -> Self::Raw {
        raw::SignDoc {
            body_bytes: self.body_bytes.clone(),
            auth_info_bytes: self.auth_info_bytes.clone(),
            chain_id: self.chain_id.clone(),
            account_number: self.account_number,
        }
    }
}

#[derive(Default)]
pub struct SignDocBuilder {
    message: Option<pbjson_types::Any>,
    public_key: Option<PublicKeyRecord>,
    fee: Option<raw::Fee>,
    sequence: u64,
    account_number: u64,
    chain_id: Option<String>,
}

impl SignDocBuilder {
    #[must_use = "the builder must be built to construct a sign doc"]
    pub fn message(self, message: pbjson_types::Any) -> Self {
        Self {
            message: Some(message),
            ..self
        }
    }

    /// Sets the signer's key, choosing its record type from `kind`.
    #[must_use = "the builder must be built to construct a sign doc"]
    pub fn public_key(self, kind: WalletKind, key: CompressedPublicKey) -> Self {
        Self {
            public_key: Some(PublicKeyRecord::for_wallet(kind, key)),
            ..self
        }
    }

    #[must_use = "the builder must be built to construct a sign doc"]
    pub fn fee(self, fee: raw::Fee) -> Self {
        Self {
            fee: Some(fee),
            ..self
        }
    }

    #[must_use = "the builder must be built to construct a sign doc"]
    pub fn sequence(self, sequence: u64) -> Self {
        Self {
            sequence,
            ..self
        }
    }

    #[must_use = "the builder must be built to construct a sign doc"]
    pub fn account_number(self, account_number: u64) -> Self {
        Self {
            account_number,
            ..self
        }
    }

    #[must_use = "the builder must be built to construct a sign doc"]
    pub fn chain_id<T: Into<String>>(self, chain_id: T) -> Self {
        Self {
            chain_id: Some(chain_id.into()),
            ..self
        }
    }

    /// Constructs the sign doc.
    ///
    /// # Errors
    /// Returns an error if the message, public key, fee or chain id was not set.
    pub fn try_build(self) -> Result<SignDoc, Error> {
        let Self {
            message,
            public_key,
            fee,
            sequence,
            account_number,
            chain_id,
        } = self;
        let message = message.ok_or_else(|| Error::unset_field("message"))?;
        let public_key = public_key.ok_or_else(|| Error::unset_field("public_key"))?;
        let fee = fee.ok_or_else(|| Error::unset_field("fee"))?;
        let chain_id = chain_id.ok_or_else(|| Error::unset_field("chain_id"))?;

        let auth_info_bytes = raw::AuthInfo {
            signer_infos: vec![signer_info(&public_key, sequence, SignMode::Direct)],
            fee: Some(fee),
        }
        .encode_to_vec();
        Ok(SignDoc {
            body_bytes: body_bytes(message),
            auth_info_bytes,
            chain_id,
            account_number,
        })
    }
}

/// A secp256k1 signature in the amino `StdSignature` JSON shape returned by wallets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct StdSignature {
    pub pub_key: StdPublicKey,
    /// base64 of the 64 byte `r || s` signature.
    pub signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct StdPublicKey {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub key_type: String,
    /// base64 of the compressed public key.
    pub value: String,
}

impl StdSignature {
    pub const SECP256K1_KEY_TYPE: &'static str = "tendermint/PubKeySecp256k1";

    #[must_use]
    pub fn secp256k1(public_key: &CompressedPublicKey, signature: &[u8; 64]) -> Self {
        Self {
            pub_key: StdPublicKey {
                key_type: Self::SECP256K1_KEY_TYPE.to_string(),
                value: BASE64_STANDARD.encode(public_key.as_bytes()),
            },
            signature: BASE64_STANDARD.encode(signature),
        }
    }

    /// Decodes the base64 signature.
    ///
    /// # Errors
    /// Returns an error if the signature is not valid base64.
    pub fn signature_bytes(&self) -> Result<Vec<u8>, Error> {
        BASE64_STANDARD
            .decode(&self.signature)
            .map_err(Error::signature_base64)
    }
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    fn sender(source: address::Error) -> Self {
        Self(ErrorKind::Sender {
            source,
        })
    }

    fn signature_base64(source: base64::DecodeError) -> Self {
        Self(ErrorKind::SignatureBase64 {
            source,
        })
    }

    fn unset_field(field: &'static str) -> Self {
        Self(ErrorKind::UnsetField {
            field,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum ErrorKind {
    #[error("`sender` field is not a valid bech32 address")]
    Sender { source: address::Error },
    #[error("signature is not valid base64")]
    SignatureBase64 { source: base64::DecodeError },
    #[error("`{field}` must be set")]
    UnsetField { field: &'static str },
}
