use color_eyre::eyre::{
    self,
    WrapErr as _,
};
use elder_core::{
    crypto::CompressedPublicKey,
    encoding::encode_hex_prefixed,
    roll::{
        InnerTransaction,
        TransactionFields,
    },
};
use serde::Serialize;

use super::{
    hex_arg,
    print_json,
    public_key_arg,
};

#[derive(Debug, clap::Args)]
pub(crate) struct Command {
    /// The rollup transaction in one of the standard ethereum encodings, as hex
    #[arg(long, value_name = "HEX")]
    tx: String,
    /// The public key of the elder account submitting the transaction, as hex
    #[arg(long, value_name = "HEX")]
    public_key: String,
    /// The sequence of the elder account at submission
    #[arg(long)]
    sequence: u64,
}

#[derive(Debug, Serialize)]
struct Report {
    tx_type: String,
    tx_hash: String,
}

impl Command {
    pub(crate) fn run(self) -> eyre::Result<()> {
        let tx = hex_arg("tx", &self.tx)?;
        let public_key = public_key_arg(&self.public_key)?;
        let inner = elder_transaction(&tx, &public_key, self.sequence)?;
        print_json(&Report {
            tx_type: inner.tx_type().to_string(),
            tx_hash: encode_hex_prefixed(inner.hash()),
        })
    }
}

/// Attaches the elder account fields to a parsed rollup transaction.
fn elder_transaction(
    tx: &[u8],
    public_key: &CompressedPublicKey,
    sequence: u64,
) -> eyre::Result<InnerTransaction> {
    let parsed = InnerTransaction::parse(tx).wrap_err("failed parsing `--tx`")?;
    InnerTransaction::from_fields(TransactionFields {
        elder_public_key: Some(public_key.to_hex()),
        elder_account_sequence: Some(sequence),
        ..parsed.into_fields()
    })
    .wrap_err("failed attaching the elder account to the transaction")
}
