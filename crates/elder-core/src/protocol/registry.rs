//! Mapping from protobuf type URLs to the messages elder knows how to pack and unpack.
use std::collections::HashMap;

use prost::{
    Message as _,
    Name as _,
};

use super::transaction::{
    self,
    PublicKeyRecord,
    RollSubmission,
};
use crate::{
    crypto::{
        self,
        CompressedPublicKey,
    },
    generated::{
        elder::{
            crypto::eldersecp256k1,
            router::MsgSubmitRollTx,
        },
        ethermint::crypto::v1::ethsecp256k1,
    },
    Protobuf as _,
};

/// Returns the protobuf encoding of the message, or `None` if it is not of the entry's type.
type Encoder = fn(&KnownMessage) -> Option<Vec<u8>>;
type Decoder = fn(&[u8]) -> Result<KnownMessage, Error>;

#[derive(Clone, Copy, Debug)]
struct Codec {
    encode: Encoder,
    decode: Decoder,
}

/// A message packed into a protobuf `Any` that elder can interpret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KnownMessage {
    SubmitRollTx(RollSubmission),
    PublicKey(PublicKeyRecord),
}

impl KnownMessage {
    #[must_use]
    pub fn type_url(&self) -> String {
        match self {
            Self::SubmitRollTx(_) => MsgSubmitRollTx::type_url(),
            Self::PublicKey(record) => record.type_url(),
        }
    }
}

impl From<RollSubmission> for KnownMessage {
    fn from(value: RollSubmission) -> Self {
        Self::SubmitRollTx(value)
    }
}

impl From<PublicKeyRecord> for KnownMessage {
    fn from(value: PublicKeyRecord) -> Self {
        Self::PublicKey(value)
    }
}

/// An immutable table of type URLs and their encoders and decoders.
///
/// Built once at startup and shared by reference.
#[derive(Clone, Debug)]
pub struct Registry {
    codecs: HashMap<String, Codec>,
}

impl Registry {
    /// Returns a registry with the router message and both public key records.
    #[must_use]
    pub fn elder() -> Self {
        let mut codecs = HashMap::new();
        codecs.insert(
            MsgSubmitRollTx::type_url(),
            Codec {
                encode: encode_submit_roll_tx,
                decode: decode_submit_roll_tx,
            },
        );
        codecs.insert(
            eldersecp256k1::PubKey::type_url(),
            Codec {
                encode: encode_elder_public_key,
                decode: decode_elder_public_key,
            },
        );
        codecs.insert(
            ethsecp256k1::PubKey::type_url(),
            Codec {
                encode: encode_eth_public_key,
                decode: decode_eth_public_key,
            },
        );
        Self {
            codecs,
        }
    }

    #[must_use]
    pub fn contains(&self, type_url: &str) -> bool {
        self.codecs.contains_key(type_url)
    }

    /// Packs `message` into an `Any` using the encoder registered for its type URL.
    ///
    /// # Errors
    /// Returns an error if the message's type URL is not registered, or if the registered
    /// encoder does not accept the message.
    pub fn encode(&self, message: &KnownMessage) -> Result<pbjson_types::Any, Error> {
        let type_url = message.type_url();
        let Some(codec) = self.codecs.get(&type_url) else {
            return Err(Error::unregistered(type_url));
        };
        let value = (codec.encode)(message).ok_or_else(|| Error::mismatched(type_url.clone()))?;
        Ok(pbjson_types::Any {
            type_url,
            value: value.into(),
        })
    }

    /// Unpacks `any` using the decoder registered for its type URL.
    ///
    /// # Errors
    /// Returns an error if the type URL is not registered or the value fails to decode.
    pub fn decode(&self, any: &pbjson_types::Any) -> Result<KnownMessage, Error> {
        let codec = self
            .codecs
            .get(&any.type_url)
            .ok_or_else(|| Error::unregistered(any.type_url.clone()))?;
        (codec.decode)(&any.value)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::elder()
    }
}

fn encode_submit_roll_tx(message: &KnownMessage) -> Option<Vec<u8>> {
    let KnownMessage::SubmitRollTx(submission) = message else {
        return None;
    };
    Some(submission.to_raw().encode_to_vec())
}

fn encode_elder_public_key(message: &KnownMessage) -> Option<Vec<u8>> {
    let KnownMessage::PublicKey(PublicKeyRecord::ElderSecp256k1(key)) = message else {
        return None;
    };
    Some(
        eldersecp256k1::PubKey {
            key: key.as_bytes().to_vec(),
        }
        .encode_to_vec(),
    )
}

fn encode_eth_public_key(message: &KnownMessage) -> Option<Vec<u8>> {
    let KnownMessage::PublicKey(PublicKeyRecord::EthSecp256k1(key)) = message else {
        return None;
    };
    Some(
        ethsecp256k1::PubKey {
            key: key.as_bytes().to_vec(),
        }
        .encode_to_vec(),
    )
}

fn decode_submit_roll_tx(bytes: &[u8]) -> Result<KnownMessage, Error> {
    let raw = MsgSubmitRollTx::decode(bytes).map_err(Error::protobuf)?;
    RollSubmission::try_from_raw(raw)
        .map(KnownMessage::SubmitRollTx)
        .map_err(Error::submission)
}

fn decode_elder_public_key(bytes: &[u8]) -> Result<KnownMessage, Error> {
    let raw = eldersecp256k1::PubKey::decode(bytes).map_err(Error::protobuf)?;
    let key = CompressedPublicKey::try_from_slice(&raw.key).map_err(Error::public_key)?;
    Ok(PublicKeyRecord::ElderSecp256k1(key).into())
}

fn decode_eth_public_key(bytes: &[u8]) -> Result<KnownMessage, Error> {
    let raw = ethsecp256k1::PubKey::decode(bytes).map_err(Error::protobuf)?;
    let key = CompressedPublicKey::try_from_slice(&raw.key).map_err(Error::public_key)?;
    Ok(PublicKeyRecord::EthSecp256k1(key).into())
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    fn protobuf(source: prost::DecodeError) -> Self {
        Self(ErrorKind::Protobuf {
            source,
        })
    }

    fn public_key(source: crypto::Error) -> Self {
        Self(ErrorKind::PublicKey {
            source,
        })
    }

    fn submission(source: transaction::Error) -> Self {
        Self(ErrorKind::Submission {
            source,
        })
    }

    fn mismatched(type_url: String) -> Self {
        Self(ErrorKind::Mismatched {
            type_url,
        })
    }

    fn unregistered(type_url: String) -> Self {
        Self(ErrorKind::Unregistered {
            type_url,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum ErrorKind {
    #[error("failed decoding protobuf message")]
    Protobuf { source: prost::DecodeError },
    #[error("public key record does not hold a valid compressed secp256k1 key")]
    PublicKey { source: crypto::Error },
    #[error("failed converting raw roll submission")]
    Submission { source: transaction::Error },
    #[error("encoder registered for type URL `{type_url}` does not accept the message")]
    Mismatched { type_url: String },
    #[error("no codec registered for type URL `{type_url}`")]
    Unregistered { type_url: String },
}
