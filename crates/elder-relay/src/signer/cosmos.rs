use std::sync::Arc;

use async_trait::async_trait;
use elder_core::{
    address::Address,
    protocol::transaction::SignDoc,
};
use tracing::instrument;

use super::{
    DirectSignCapability,
    DirectSignResponse,
    Error,
    SigningIdentity,
};

/// A cosmos wallet signing envelopes itself.
#[derive(Clone)]
pub struct CosmosNative {
    capability: Arc<dyn DirectSignCapability>,
}

impl CosmosNative {
    pub fn new(capability: Arc<dyn DirectSignCapability>) -> Self {
        Self {
            capability,
        }
    }
}

impl std::fmt::Debug for CosmosNative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosNative").finish_non_exhaustive()
    }
}

#[async_trait]
impl SigningIdentity for CosmosNative {
    async fn address(&self) -> Result<Address, Error> {
        let accounts = self
            .capability
            .accounts()
            .await
            .map_err(Error::capability)?;
        accounts.into_iter().next().ok_or(Error::NoAccounts)
    }

    #[instrument(skip_all, fields(%signer), err)]
    async fn sign_direct(
        &self,
        signer: &Address,
        sign_doc: SignDoc,
    ) -> Result<DirectSignResponse, Error> {
        let expected = self.address().await?;
        if &expected != signer {
            return Err(Error::AddressMismatch {
                expected,
                received: *signer,
            });
        }
        self.capability
            .sign_direct(signer, &sign_doc)
            .await
            .map_err(Error::capability)
    }
}
