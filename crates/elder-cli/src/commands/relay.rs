use std::sync::Arc;

use base64::{
    prelude::BASE64_STANDARD,
    Engine as _,
};
use color_eyre::eyre::{
    self,
    ensure,
    WrapErr as _,
};
use elder_core::{
    crypto::CompressedPublicKey,
    encoding::encode_hex_prefixed,
    protocol::{
        transaction::WalletKind,
        Registry,
    },
    roll::{
        InnerTransaction,
        Quantity,
    },
};
use elder_relay::{
    signer::{
        CosmosNative,
        DelegatedSecp256k1,
        LocalDirectSigner,
        LocalMessageSigner,
        SigningIdentity,
    },
    RelayOutput,
    RelayRequest,
    Relayer,
};
use elder_relay_client::{
    ElderClientExt as _,
    HttpClient,
    InclusionConfig,
    RestClient,
};
use ethers::signers::LocalWallet;
use serde::Serialize;
use tracing::info;

use super::{
    hex_arg,
    print_json,
};
use crate::Config;

#[derive(Debug, clap::Args)]
pub(crate) struct Command {
    /// The rollup transaction in one of the standard ethereum encodings, as hex
    #[arg(long, value_name = "HEX")]
    tx: String,

    /// The secp256k1 private key of the elder account paying for the transaction, as hex
    #[arg(long, env = "ELDER_PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// The kind of wallet the elder account is held in
    #[arg(long, value_enum, default_value_t = Wallet::Ethereum)]
    wallet: Wallet,

    /// The gas limit of the rollup transaction. Taken from `--tx` if not given
    #[arg(long)]
    gas_limit: Option<Quantity>,

    /// The value transferred by the rollup transaction. Taken from `--tx` if not given
    #[arg(long)]
    value: Option<Quantity>,

    /// Broadcast the signed envelope with `broadcast_tx_sync`
    #[arg(long)]
    broadcast: bool,

    /// After broadcasting, wait until the envelope is included in a block
    #[arg(long, requires = "broadcast")]
    wait: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Wallet {
    /// An ethereum wallet that personal-signs the envelope
    Ethereum,
    /// A cosmos wallet that signs the envelope in direct mode
    Cosmos,
}

impl From<Wallet> for WalletKind {
    fn from(wallet: Wallet) -> Self {
        match wallet {
            Wallet::Ethereum => Self::Ethereum,
            Wallet::Cosmos => Self::Cosmos,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    tx_hash: String,
    raw_tx: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    broadcast: Option<Broadcast>,
}

#[derive(Debug, Serialize)]
struct Broadcast {
    cosmos_tx_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u64>,
}

impl Command {
    pub(crate) async fn run(self, config: &Config) -> eyre::Result<()> {
        let tx = hex_arg("tx", &self.tx)?;
        let draft = InnerTransaction::parse(&tx).wrap_err("failed parsing `--tx`")?;
        let gas_limit = self
            .gas_limit
            .unwrap_or_else(|| draft.gas_limit().into());
        let value = self.value.unwrap_or_else(|| draft.value().into());

        let key = hex_arg("private-key", &self.private_key)?;
        let wallet = LocalWallet::from_bytes(&key).wrap_err("`--private-key` is not a valid key")?;
        let (identity, public_key) = identity(self.wallet, wallet, &config.prefix)?;
        let sender = identity
            .address()
            .await
            .wrap_err("failed getting the address of the signing identity")?;

        let registry = Registry::elder();
        let rest = RestClient::new(&config.rest).wrap_err("failed constructing REST client")?;
        let relayer = Relayer::new(config.chain(), rest, &registry);
        let output = relayer
            .relay(
                RelayRequest {
                    draft: draft.into_fields(),
                    sender,
                    sender_public_key: public_key,
                    gas_limit,
                    value,
                },
                identity.as_ref(),
                self.wallet.into(),
            )
            .await
            .wrap_err("failed relaying the transaction")?;

        let broadcast = if self.broadcast {
            Some(broadcast(&config.rpc, &output, self.wait).await?)
        } else {
            None
        };
        print_json(&Report {
            tx_hash: encode_hex_prefixed(output.tx_hash),
            raw_tx: BASE64_STANDARD.encode(output.raw_tx_bytes()),
            broadcast,
        })
    }
}

fn identity(
    kind: Wallet,
    wallet: LocalWallet,
    prefix: &str,
) -> eyre::Result<(Box<dyn SigningIdentity>, CompressedPublicKey)> {
    match kind {
        Wallet::Ethereum => {
            let signer = LocalMessageSigner::new(wallet);
            let public_key = signer
                .public_key()
                .wrap_err("failed deriving the public key of the private key")?;
            let identity = DelegatedSecp256k1::with_prefix(public_key, prefix, Arc::new(signer))
                .wrap_err("failed constructing the ethereum signing identity")?;
            Ok((Box::new(identity), public_key))
        }
        Wallet::Cosmos => {
            let signer = LocalDirectSigner::new(wallet.signer().clone(), prefix)
                .wrap_err("failed constructing the cosmos signer")?;
            let public_key = *signer.public_key();
            Ok((Box::new(CosmosNative::new(Arc::new(signer))), public_key))
        }
    }
}

async fn broadcast(rpc: &str, output: &RelayOutput, wait: bool) -> eyre::Result<Broadcast> {
    let client = HttpClient::new(rpc).wrap_err("failed constructing tendermint RPC client")?;
    let response = client
        .submit_tx_raw_sync(&output.raw_tx)
        .await
        .wrap_err("failed broadcasting the envelope")?;
    ensure!(
        response.code.is_ok(),
        "elder rejected the envelope with code `{}`: {}",
        response.code.value(),
        response.log,
    );
    info!(cosmos_tx_hash = %response.hash, "broadcast envelope");

    let mut height = None;
    if wait {
        let included = client
            .wait_for_tx_inclusion(response.hash, InclusionConfig::default())
            .await
            .wrap_err("envelope was not included")?;
        ensure!(
            included.tx_result.code.is_ok(),
            "envelope was included at height `{}` but failed with code `{}`: {}",
            included.height,
            included.tx_result.code.value(),
            included.tx_result.log,
        );
        height = Some(included.height.value());
    }
    Ok(Broadcast {
        cosmos_tx_hash: response.hash.to_string(),
        height,
    })
}
