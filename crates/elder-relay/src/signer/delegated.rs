use std::sync::Arc;

use async_trait::async_trait;
use elder_core::{
    address::{
        Address,
        DEFAULT_PREFIX,
    },
    crypto::CompressedPublicKey,
    protocol::transaction::{
        SignDoc,
        StdSignature,
    },
};
use elder_telemetry::display::hex;
use tracing::{
    debug,
    instrument,
};

use super::{
    signature_from_hex,
    DirectSignResponse,
    Error,
    MessageSignCapability,
    SigningIdentity,
};

/// An ethereum wallet's key acting as an elder account.
///
/// The wallet never sees the sign doc structure: it is asked to personal-sign the raw sign
/// bytes, and the returned recoverable signature is cut down to `r || s`.
#[derive(Clone)]
pub struct DelegatedSecp256k1 {
    public_key: CompressedPublicKey,
    address: Address,
    capability: Arc<dyn MessageSignCapability>,
}

impl DelegatedSecp256k1 {
    /// Creates an identity for `public_key` under the default `elder` prefix.
    ///
    /// # Errors
    /// See [`DelegatedSecp256k1::with_prefix`].
    pub fn new(
        public_key: CompressedPublicKey,
        capability: Arc<dyn MessageSignCapability>,
    ) -> Result<Self, Error> {
        Self::with_prefix(public_key, DEFAULT_PREFIX, capability)
    }

    /// Creates an identity for `public_key` whose address uses `prefix`.
    ///
    /// # Errors
    /// Returns an error if `prefix` is not a valid bech32 human readable part.
    pub fn with_prefix(
        public_key: CompressedPublicKey,
        prefix: &str,
        capability: Arc<dyn MessageSignCapability>,
    ) -> Result<Self, Error> {
        let address = public_key
            .elder_address(prefix)
            .map_err(|source| Error::Address {
                source,
            })?;
        Ok(Self {
            public_key,
            address,
            capability,
        })
    }

    /// Creates an identity from a compressed or uncompressed SEC1 encoded key.
    ///
    /// # Errors
    /// Returns an error if `public_key` is not a valid secp256k1 key, or if `prefix` is
    /// invalid.
    pub fn from_sec1_bytes(
        public_key: &[u8],
        prefix: &str,
        capability: Arc<dyn MessageSignCapability>,
    ) -> Result<Self, Error> {
        let public_key =
            CompressedPublicKey::try_from_slice(public_key).map_err(|source| {
                Error::InvalidPublicKey {
                    source,
                }
            })?;
        Self::with_prefix(public_key, prefix, capability)
    }

    #[must_use]
    pub fn public_key(&self) -> &CompressedPublicKey {
        &self.public_key
    }
}

impl std::fmt::Debug for DelegatedSecp256k1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedSecp256k1")
            .field("public_key", &self.public_key)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SigningIdentity for DelegatedSecp256k1 {
    async fn address(&self) -> Result<Address, Error> {
        Ok(self.address)
    }

    #[instrument(skip_all, fields(%signer), err)]
    async fn sign_direct(
        &self,
        signer: &Address,
        sign_doc: SignDoc,
    ) -> Result<DirectSignResponse, Error> {
        if signer != &self.address {
            return Err(Error::AddressMismatch {
                expected: self.address,
                received: *signer,
            });
        }
        let sign_bytes = sign_doc.sign_bytes();
        let account = self
            .capability
            .accounts()
            .await
            .map_err(Error::capability)?
            .into_iter()
            .next()
            .ok_or(Error::NoAccounts)?;
        let signature = self
            .capability
            .sign_message(&sign_bytes, account)
            .await
            .map_err(Error::capability)?;
        let signature = signature_from_hex(&signature)?;
        debug!(
            %account,
            signature = %hex(&signature),
            "received personal-sign signature over sign bytes"
        );
        Ok(DirectSignResponse {
            signed: sign_doc,
            signature: StdSignature::secp256k1(&self.public_key, &signature),
        })
    }
}
