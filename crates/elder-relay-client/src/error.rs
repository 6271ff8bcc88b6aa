use reqwest::StatusCode;

/// Errors returned by the elder clients.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to initialize the http client")]
    ClientInit { source: reqwest::Error },
    #[error("account query responded with HTTP status `{0}`")]
    NetworkError(StatusCode),
    #[error("simulation responded with HTTP status `{0}`")]
    SimulationFailed(StatusCode),
    #[error("failed sending request to the `{endpoint}` endpoint")]
    Transport {
        endpoint: &'static str,
        source: reqwest::Error,
    },
    #[error("failed reading JSON response of the `{endpoint}` endpoint")]
    Decode {
        endpoint: &'static str,
        source: reqwest::Error,
    },
    #[error("account field `{field}` is not an unsigned integer: `{value}`")]
    InvalidAccountField { field: &'static str, value: String },
    #[error("simulated `gas_used` is not an unsigned integer: `{value}`")]
    InvalidGasUsed { value: String },
    #[error("tendermint RPC `{rpc}` failed")]
    Broadcast {
        rpc: &'static str,
        source: tendermint_rpc::Error,
    },
    #[error("transaction `{tx_hash}` was not included before the deadline")]
    InclusionTimeout { tx_hash: tendermint::Hash },
}

impl Error {
    pub(crate) fn transport(endpoint: &'static str, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint,
            source,
        }
    }

    pub(crate) fn decode(endpoint: &'static str, source: reqwest::Error) -> Self {
        Self::Decode {
            endpoint,
            source,
        }
    }

    pub(crate) fn broadcast(rpc: &'static str, source: tendermint_rpc::Error) -> Self {
        Self::Broadcast {
            rpc,
            source,
        }
    }
}
