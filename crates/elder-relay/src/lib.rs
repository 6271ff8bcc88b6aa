//! Relays ethereum style rollup transactions through the elder chain.
//!
//! A caller hands [`Relayer::relay`] a draft rollup transaction, the elder account that pays
//! for it, and a [`signer::SigningIdentity`]. The relayer fetches the account, derives the
//! inner transaction hash, wraps the rollup payload in a `MsgSubmitRollTx`, estimates gas,
//! has the identity sign the envelope, and returns the broadcastable raw transaction.
//!
//! Nothing is cached between calls: the account sequence is read fresh every time, so two
//! concurrent relays for the same sender produce envelopes with the same sequence and only
//! one of them will be accepted. Callers relaying for one account must serialize their calls.
pub mod config;
pub mod relay;
pub mod signer;

pub use config::ChainConfig;
pub use relay::{
    RelayOutput,
    RelayRequest,
    Relayer,
};
