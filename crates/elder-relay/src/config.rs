use elder_core::{
    address::DEFAULT_PREFIX,
    protocol::transaction::{
        DEFAULT_FEE_AMOUNT,
        DEFAULT_FEE_DENOM,
    },
};
use serde::{
    Deserialize,
    Serialize,
};

/// The elder chain and the rollup a relayed transaction is destined for.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    /// The cosmos chain id bound into every sign doc.
    pub chain_id: String,
    /// Base URL of the cosmos REST API.
    pub rest: String,
    /// Base URL of the tendermint RPC.
    pub rpc: String,
    /// Identifier of the rollup on the elder router.
    pub roll_id: u64,
    /// EIP-155 chain id of the rollup.
    pub roll_chain_id: u64,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_fee_denom")]
    pub fee_denom: String,
    #[serde(default = "default_fee_amount")]
    pub fee_amount: u64,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_fee_denom() -> String {
    DEFAULT_FEE_DENOM.to_string()
}

fn default_fee_amount() -> u64 {
    DEFAULT_FEE_AMOUNT
}
