use async_trait::async_trait;
use elder_core::{
    address::Address,
    crypto::CompressedPublicKey,
    protocol::transaction::{
        SignDoc,
        StdSignature,
    },
};
use ethers::{
    core::k256::ecdsa::SigningKey,
    signers::{
        LocalWallet,
        Signer as _,
    },
    types::Address as EthereumAddress,
};
use sha2::{
    Digest as _,
    Sha256,
};

use super::{
    CapabilityError,
    DirectSignCapability,
    DirectSignResponse,
    Error,
    MessageSignCapability,
};

#[derive(Debug, thiserror::Error)]
#[error("account `{0}` is not held by this signer")]
pub struct UnknownAccount(String);

fn public_key_of(key: &SigningKey) -> Result<CompressedPublicKey, Error> {
    CompressedPublicKey::try_from_slice(key.verifying_key().to_encoded_point(true).as_bytes())
        .map_err(|source| Error::InvalidPublicKey {
            source,
        })
}

/// Personal-signs messages with a key held in memory.
#[derive(Clone, Debug)]
pub struct LocalMessageSigner {
    wallet: LocalWallet,
}

impl LocalMessageSigner {
    #[must_use]
    pub fn new(wallet: LocalWallet) -> Self {
        Self {
            wallet,
        }
    }

    /// The compressed public key of the wallet.
    ///
    /// # Errors
    /// Returns an error if the wallet's verifying key is not a valid compressed point.
    pub fn public_key(&self) -> Result<CompressedPublicKey, Error> {
        public_key_of(self.wallet.signer())
    }
}

#[async_trait]
impl MessageSignCapability for LocalMessageSigner {
    async fn accounts(&self) -> Result<Vec<EthereumAddress>, CapabilityError> {
        Ok(vec![self.wallet.address()])
    }

    async fn sign_message(
        &self,
        message: &[u8],
        account: EthereumAddress,
    ) -> Result<String, CapabilityError> {
        if account != self.wallet.address() {
            return Err(Box::new(UnknownAccount(format!("{account:?}"))));
        }
        let signature = self.wallet.sign_message(message).await?;
        Ok(format!("0x{signature}"))
    }
}

/// Signs sign docs in direct mode with a key held in memory.
///
/// The signature is a plain secp256k1 signature over the sha256 digest of the sign bytes.
#[derive(Clone, Debug)]
pub struct LocalDirectSigner {
    key: SigningKey,
    public_key: CompressedPublicKey,
    address: Address,
}

impl LocalDirectSigner {
    /// # Errors
    /// Returns an error if `prefix` is not a valid bech32 human readable part.
    pub fn new(key: SigningKey, prefix: &str) -> Result<Self, Error> {
        let public_key = public_key_of(&key)?;
        let address = public_key
            .elder_address(prefix)
            .map_err(|source| Error::Address {
                source,
            })?;
        Ok(Self {
            key,
            public_key,
            address,
        })
    }

    #[must_use]
    pub fn public_key(&self) -> &CompressedPublicKey {
        &self.public_key
    }

    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

#[async_trait]
impl DirectSignCapability for LocalDirectSigner {
    async fn accounts(&self) -> Result<Vec<Address>, CapabilityError> {
        Ok(vec![self.address])
    }

    async fn sign_direct(
        &self,
        signer: &Address,
        sign_doc: &SignDoc,
    ) -> Result<DirectSignResponse, CapabilityError> {
        if signer != &self.address {
            return Err(Box::new(UnknownAccount(signer.to_string())));
        }
        let digest = Sha256::digest(sign_doc.sign_bytes());
        let (signature, _) = self.key.sign_prehash_recoverable(&digest)?;
        let mut bytes = [0u8; 64];
        bytes.copy_from_slice(&signature.to_bytes());
        Ok(DirectSignResponse {
            signed: sign_doc.clone(),
            signature: StdSignature::secp256k1(&self.public_key, &bytes),
        })
    }
}
