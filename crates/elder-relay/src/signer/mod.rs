//! Signing identities for the cosmos envelope.
//!
//! The relay only talks to [`SigningIdentity`]. Two implementations exist:
//!
//! - [`CosmosNative`] forwards the sign doc to a cosmos wallet that signs in direct mode.
//! - [`DelegatedSecp256k1`] owns an ethereum wallet's public key, derives the elder address
//!   from it, and asks the wallet for an EIP-191 personal-sign signature over the sign bytes.
//!
//! Both obtain their signatures from capabilities injected by the caller ([`DirectSignCapability`]
//! and [`MessageSignCapability`]). [`LocalDirectSigner`] and [`LocalMessageSigner`] implement
//! them with a local key.
use async_trait::async_trait;
use elder_core::{
    address::{
        self,
        Address,
    },
    crypto,
    protocol::transaction::{
        SignDoc,
        StdSignature,
    },
};
use ethers::types::Address as EthereumAddress;

mod cosmos;
mod delegated;
mod local;

pub use cosmos::CosmosNative;
pub use delegated::DelegatedSecp256k1;
pub use local::{
    LocalDirectSigner,
    LocalMessageSigner,
};

/// The error type returned by injected capabilities.
pub type CapabilityError = Box<dyn std::error::Error + Send + Sync>;

/// The result of signing a [`SignDoc`] in direct mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectSignResponse {
    /// The document that was signed. Signers may not alter it.
    pub signed: SignDoc,
    pub signature: StdSignature,
}

/// An identity able to authorize elder envelopes.
#[async_trait]
pub trait SigningIdentity: Send + Sync {
    /// The bech32 elder address this identity signs for.
    async fn address(&self) -> Result<Address, Error>;

    /// Signs `sign_doc` on behalf of `signer`.
    async fn sign_direct(
        &self,
        signer: &Address,
        sign_doc: SignDoc,
    ) -> Result<DirectSignResponse, Error>;
}

/// A cosmos wallet capable of direct-mode signing.
#[async_trait]
pub trait DirectSignCapability: Send + Sync {
    async fn accounts(&self) -> Result<Vec<Address>, CapabilityError>;

    async fn sign_direct(
        &self,
        signer: &Address,
        sign_doc: &SignDoc,
    ) -> Result<DirectSignResponse, CapabilityError>;
}

/// An ethereum wallet capable of EIP-191 personal-sign.
#[async_trait]
pub trait MessageSignCapability: Send + Sync {
    async fn accounts(&self) -> Result<Vec<EthereumAddress>, CapabilityError>;

    /// Signs `message` with `account`, returning the 65 byte `r || s || v` signature as hex.
    async fn sign_message(
        &self,
        message: &[u8],
        account: EthereumAddress,
    ) -> Result<String, CapabilityError>;
}

/// Converts a hex encoded 65 byte recoverable signature into its 64 byte `r || s` part.
///
/// The `0x` prefix is optional. The trailing recovery byte is dropped.
///
/// # Errors
/// Returns [`Error::InvalidSignatureLength`] if the input is not exactly 130 hex characters,
/// and [`Error::InvalidSignatureHex`] if any of them, the recovery byte included, is not hex.
pub fn signature_from_hex(signature: &str) -> Result<[u8; 64], Error> {
    const RECOVERABLE_SIGNATURE_HEX_LENGTH: usize = 2 * crypto::RECOVERABLE_SIGNATURE_LENGTH;

    let signature = elder_core::encoding::strip_0x(signature);
    if signature.len() != RECOVERABLE_SIGNATURE_HEX_LENGTH {
        return Err(Error::InvalidSignatureLength {
            received: signature.len(),
        });
    }
    let mut recoverable = [0u8; crypto::RECOVERABLE_SIGNATURE_LENGTH];
    hex::decode_to_slice(signature, &mut recoverable).map_err(|source| {
        Error::InvalidSignatureHex {
            source,
        }
    })?;
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&recoverable[..64]);
    Ok(bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("signer `{received}` does not match the identity's address `{expected}`")]
    AddressMismatch { expected: Address, received: Address },
    #[error("signature must be 130 hex characters, got {received}")]
    InvalidSignatureLength { received: usize },
    #[error("signature is not valid hex")]
    InvalidSignatureHex { source: hex::FromHexError },
    #[error("signing capability failed")]
    Capability { source: CapabilityError },
    #[error("signing capability exposes no accounts")]
    NoAccounts,
    #[error("invalid public key")]
    InvalidPublicKey { source: crypto::Error },
    #[error("failed deriving the elder address")]
    Address { source: address::Error },
}

impl Error {
    fn capability(source: CapabilityError) -> Self {
        Self::Capability {
            source,
        }
    }
}
