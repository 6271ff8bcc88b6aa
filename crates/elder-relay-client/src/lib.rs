//! Clients for talking to an elder node.
//!
//! [`RestClient`] covers the two cosmos REST endpoints the relay needs (account lookup and
//! transaction simulation). Broadcasting goes through the tendermint RPC and is provided by
//! [`ElderClientExt`], implemented for [`HttpClient`].
mod error;
pub mod extension_trait;
pub mod rest;

pub use error::Error;
pub use extension_trait::{
    ElderClientExt,
    InclusionConfig,
};
pub use rest::{
    Account,
    GasEstimate,
    RestClient,
};
pub use tendermint_rpc::{
    self,
    Client,
    HttpClient,
};

#[cfg(test)]
mod tests;
