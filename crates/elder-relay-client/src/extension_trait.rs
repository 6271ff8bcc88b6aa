//! Extension trait for broadcasting elder transactions over tendermint JSONRPC.
//!
//! [`ElderClientExt`] is implemented for [`tendermint_rpc::HttpClient`].
use std::time::Duration;

use async_trait::async_trait;
use elder_core::generated::cosmos::tx::v1beta1::TxRaw;
use prost::Message as _;
use tendermint::Hash;
use tendermint_rpc::{
    endpoint::{
        broadcast::tx_sync,
        tx,
    },
    Client,
    HttpClient,
};
use tracing::{
    debug,
    instrument,
    warn,
};

use crate::error::Error;

impl ElderClientExt for HttpClient {}

/// Polling behaviour of [`ElderClientExt::wait_for_tx_inclusion`].
#[derive(Clone, Copy, Debug)]
pub struct InclusionConfig {
    /// Delay before the first retry; doubled on every attempt.
    pub min_poll_interval: Duration,
    pub max_poll_interval: Duration,
    /// Total time to wait before giving up.
    pub timeout: Duration,
}

impl Default for InclusionConfig {
    fn default() -> Self {
        Self {
            min_poll_interval: Duration::from_millis(100),
            max_poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(60),
        }
    }
}

#[async_trait]
pub trait ElderClientExt: Client {
    /// Submits the raw envelope and returns the result of `CheckTx`.
    ///
    /// # Errors
    /// Returns an error if calling the tendermint RPC endpoint fails.
    #[instrument(skip_all, err)]
    async fn submit_tx_raw_sync(&self, tx: &TxRaw) -> Result<tx_sync::Response, Error> {
        let response = self
            .broadcast_tx_sync(tx.encode_to_vec())
            .await
            .map_err(|source| Error::broadcast("broadcast_tx_sync", source))?;
        debug!(
            code = response.code.value(),
            hash = %response.hash,
            log = %response.log,
            "transaction was checked"
        );
        Ok(response)
    }

    /// Polls the `tx` endpoint with exponential backoff until `tx_hash` is found.
    ///
    /// # Errors
    /// Returns [`Error::InclusionTimeout`] if the transaction is not found within
    /// `config.timeout`.
    #[instrument(skip_all, fields(%tx_hash), err)]
    async fn wait_for_tx_inclusion(
        &self,
        tx_hash: Hash,
        config: InclusionConfig,
    ) -> Result<tx::Response, Error> {
        let retry_config = tryhard::RetryFutureConfig::new(u32::MAX)
            .exponential_backoff(config.min_poll_interval)
            .max_delay(config.max_poll_interval)
            .on_retry(
                |attempt: u32, next_delay: Option<Duration>, error: &tendermint_rpc::Error| {
                    let wait_seconds = next_delay.map(|delay| delay.as_secs_f32());
                    warn!(
                        attempt,
                        wait_seconds,
                        error = %error,
                        "transaction not yet included; retrying after backoff",
                    );
                    std::future::ready(())
                },
            );
        let poll = tryhard::retry_fn(|| self.tx(tx_hash, false)).with_config(retry_config);
        tokio::time::timeout(config.timeout, poll)
            .await
            .map_err(|_| Error::InclusionTimeout {
                tx_hash,
            })?
            .map_err(|source| Error::broadcast("tx", source))
    }
}
