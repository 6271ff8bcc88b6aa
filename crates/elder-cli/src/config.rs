use elder_relay::ChainConfig;
use serde::{
    Deserialize,
    Serialize,
};

/// The configuration of `elder-cli relay`, read from `ELDER_RELAY_` prefixed environment
/// variables.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log filter directives.
    pub log: String,
    pub pretty_print: bool,
    pub chain_id: String,
    pub rest: String,
    pub rpc: String,
    pub roll_id: u64,
    pub roll_chain_id: u64,
    pub prefix: String,
    pub fee_denom: String,
    pub fee_amount: u64,
}

impl Config {
    #[must_use]
    pub fn chain(&self) -> ChainConfig {
        ChainConfig {
            chain_id: self.chain_id.clone(),
            rest: self.rest.clone(),
            rpc: self.rpc.clone(),
            roll_id: self.roll_id,
            roll_chain_id: self.roll_chain_id,
            prefix: self.prefix.clone(),
            fee_denom: self.fee_denom.clone(),
            fee_amount: self.fee_amount,
        }
    }
}

impl elder_config::Config for Config {
    const PREFIX: &'static str = "ELDER_RELAY_";
}
