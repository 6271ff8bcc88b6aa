use base64::{
    prelude::BASE64_STANDARD,
    Engine as _,
};
use elder_core::{
    address::Address,
    generated::cosmos::tx::v1beta1::Fee,
    protocol::transaction::{
        fee_for_gas_used,
        simulation_tx_bytes,
        PublicKeyRecord,
    },
};
use serde::Deserialize;
use tracing::{
    debug,
    instrument,
};

use crate::error::Error;

const ACCOUNTS_ENDPOINT: &str = "cosmos/auth/v1beta1/accounts";
const SIMULATE_ENDPOINT: &str = "cosmos/tx/v1beta1/simulate";

/// The on-chain numbers identifying an account and its next transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Account {
    pub account_number: u64,
    pub sequence: u64,
}

/// Gas consumed by a simulated transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasEstimate {
    pub gas_used: u64,
}

impl GasEstimate {
    /// The fee to attach to the transaction that was simulated.
    #[must_use]
    pub fn fee(&self, denom: &str, amount: u64) -> Fee {
        fee_for_gas_used(self.gas_used, denom, amount)
    }
}

/// Client for the cosmos REST API served by an elder node.
#[derive(Clone, Debug)]
pub struct RestClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RestClient {
    /// Creates a client without a request timeout.
    ///
    /// Callers bounding request time pass their own client to [`Self::with_http_client`].
    ///
    /// # Errors
    /// Returns an error if the underlying http client could not be built.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|source| Error::ClientInit {
                source,
            })?;
        Ok(Self::with_http_client(base_url, http_client))
    }

    #[must_use]
    pub fn with_http_client(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the account number and sequence of `address`.
    ///
    /// # Errors
    /// Returns [`Error::NetworkError`] if the node answers with a non-success status.
    #[instrument(skip_all, fields(%address), err)]
    pub async fn get_account(&self, address: &Address) -> Result<Account, Error> {
        let url = format!("{}/{ACCOUNTS_ENDPOINT}/{address}", self.base_url);
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::transport("accounts", source))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::NetworkError(status));
        }
        let AccountResponse {
            account,
        } = response
            .json()
            .await
            .map_err(|source| Error::decode("accounts", source))?;
        let account = account.try_into_account()?;
        debug!(
            account_number = account.account_number,
            sequence = account.sequence,
            "fetched account"
        );
        Ok(account)
    }

    /// Dry-runs `message` signed by `public_key` at `sequence`.
    ///
    /// # Errors
    /// See [`RestClient::simulate`].
    pub async fn simulate_message(
        &self,
        message: pbjson_types::Any,
        public_key: &PublicKeyRecord,
        sequence: u64,
    ) -> Result<GasEstimate, Error> {
        self.simulate(&simulation_tx_bytes(message, public_key, sequence))
            .await
    }

    /// Posts encoded transaction bytes to the simulate endpoint.
    ///
    /// # Errors
    /// Returns [`Error::SimulationFailed`] if the node answers with a non-success status.
    #[instrument(skip_all, fields(tx_bytes.len = tx_bytes.len()), err)]
    pub async fn simulate(&self, tx_bytes: &[u8]) -> Result<GasEstimate, Error> {
        let url = format!("{}/{SIMULATE_ENDPOINT}", self.base_url);
        let response = self
            .http_client
            .post(url)
            .json(&serde_json::json!({
                "tx_bytes": BASE64_STANDARD.encode(tx_bytes),
            }))
            .send()
            .await
            .map_err(|source| Error::transport("simulate", source))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::SimulationFailed(status));
        }
        let SimulateResponse {
            gas_info,
        } = response
            .json()
            .await
            .map_err(|source| Error::decode("simulate", source))?;
        let gas_used = gas_info
            .gas_used
            .to_u64()
            .ok_or_else(|| Error::InvalidGasUsed {
                value: gas_info.gas_used.to_string(),
            })?;
        debug!(gas_used, "simulated transaction");
        Ok(GasEstimate {
            gas_used,
        })
    }
}

#[derive(Deserialize)]
struct AccountResponse {
    account: RawAccount,
}

/// A `BaseAccount`, or an account type wrapping one under `base_account`.
#[derive(Deserialize)]
struct RawAccount {
    #[serde(default)]
    account_number: Option<Uint>,
    #[serde(default)]
    sequence: Option<Uint>,
    #[serde(default)]
    base_account: Option<Box<RawAccount>>,
}

impl RawAccount {
    fn try_into_account(self) -> Result<Account, Error> {
        if let Some(base) = self.base_account {
            return base.try_into_account();
        }
        Ok(Account {
            account_number: field("account_number", self.account_number)?,
            sequence: field("sequence", self.sequence)?,
        })
    }
}

fn field(name: &'static str, value: Option<Uint>) -> Result<u64, Error> {
    // proto3 JSON omits zero values
    let Some(value) = value else {
        return Ok(0);
    };
    value.to_u64().ok_or_else(|| Error::InvalidAccountField {
        field: name,
        value: value.to_string(),
    })
}

#[derive(Deserialize)]
struct SimulateResponse {
    gas_info: GasInfo,
}

#[derive(Deserialize)]
struct GasInfo {
    gas_used: Uint,
}

/// cosmos REST encodes 64 bit integers as JSON strings, but plain numbers are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum Uint {
    Number(u64),
    Text(String),
}

impl Uint {
    fn to_u64(&self) -> Option<u64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(text) => text.parse().ok(),
        }
    }
}

impl std::fmt::Display for Uint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => number.fmt(f),
            Self::Text(text) => f.write_str(text),
        }
    }
}
