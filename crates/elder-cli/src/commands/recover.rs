use color_eyre::eyre::{
    self,
    WrapErr as _,
};
use elder_core::{
    address::DEFAULT_PREFIX,
    crypto::{
        recover_elder_account,
        RecoveredAccount,
    },
};
use serde::Serialize;

use super::{
    hex_arg,
    print_json,
};

#[derive(Debug, clap::Args)]
pub(crate) struct Command {
    /// The message that was personal-signed, as text
    #[arg(long)]
    message: String,
    /// The 65 byte `r || s || v` signature returned by the wallet, as hex
    #[arg(long, value_name = "HEX")]
    signature: String,
    /// The bech32 prefix of the elder address
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

#[derive(Debug, Serialize)]
struct Report {
    address: String,
    public_key: String,
    uncompressed_public_key: String,
}

impl Command {
    pub(crate) fn run(self) -> eyre::Result<()> {
        let signature = hex_arg("signature", &self.signature)?;
        let account = recover(&self.message, &signature, &self.prefix)?;
        print_json(&Report {
            address: account.address.to_string(),
            public_key: account.public_key.to_hex(),
            uncompressed_public_key: account.uncompressed_public_key_hex(),
        })
    }
}

fn recover(message: &str, signature: &[u8], prefix: &str) -> eyre::Result<RecoveredAccount> {
    recover_elder_account(message.as_bytes(), signature, prefix)
        .wrap_err("failed recovering the signer of the message")
}

#[cfg(test)]
mod tests {
    use ethers::{
        signers::LocalWallet,
        utils::hash_message,
    };
    use hex_literal::hex;

    use super::*;

    const MESSAGE: &str = "link my elder account";

    fn wallet() -> LocalWallet {
        LocalWallet::from_bytes(&hex!(
            "0000000000000000000000000000000000000000000000000000000000000001"
        ))
        .unwrap()
    }

    #[test]
    fn personal_sign_signature_recovers_signing_account() {
        let signature = wallet().sign_hash(hash_message(MESSAGE)).unwrap();
        let account = recover(MESSAGE, &signature.to_vec(), "elder").unwrap();
        assert_eq!(
            account.public_key.to_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            account.address.as_bytes(),
            &hex!("7e5f4552091a69125d5dfcb7b8c2659029395bdf")
        );
    }

    #[test]
    fn signature_over_other_message_recovers_other_account() {
        let signature = wallet().sign_hash(hash_message(MESSAGE)).unwrap();
        let account = recover("something else", &signature.to_vec(), "elder").unwrap();
        assert_ne!(
            account.address.as_bytes(),
            &hex!("7e5f4552091a69125d5dfcb7b8c2659029395bdf")
        );
    }

    #[test]
    fn truncated_signature_is_rejected() {
        let signature = wallet().sign_hash(hash_message(MESSAGE)).unwrap();
        assert!(recover(MESSAGE, &signature.to_vec()[..64], "elder").is_err());
    }
}
