use color_eyre::eyre::{
    self,
    WrapErr as _,
};
use elder_core::{
    address::DEFAULT_PREFIX,
    crypto::CompressedPublicKey,
};
use ethers::utils::to_checksum;
use serde::Serialize;

use super::{
    print_json,
    public_key_arg,
};

#[derive(Debug, clap::Args)]
pub(crate) struct Command {
    /// The secp256k1 public key, compressed or uncompressed, as hex
    #[arg(long, value_name = "HEX")]
    public_key: String,
    /// The bech32 prefix of the elder address
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct Addresses {
    elder: String,
    ethereum: String,
    public_key: String,
}

impl Command {
    pub(crate) fn run(self) -> eyre::Result<()> {
        let public_key = public_key_arg(&self.public_key)?;
        print_json(&addresses(&public_key, &self.prefix)?)
    }
}

fn addresses(public_key: &CompressedPublicKey, prefix: &str) -> eyre::Result<Addresses> {
    let elder = public_key
        .elder_address(prefix)
        .wrap_err("failed constructing an elder address with the provided prefix")?;
    Ok(Addresses {
        elder: elder.to_string(),
        ethereum: to_checksum(&public_key.ethereum_address(), None),
        public_key: public_key.to_hex(),
    })
}

#[cfg(test)]
mod tests {
    use elder_core::address::Address;
    use hex_literal::hex;

    use super::*;

    const UNCOMPRESSED: [u8; 65] = hex!(
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
    );

    #[test]
    fn uncompressed_key_yields_compressed_hex_and_both_addresses() {
        let public_key = public_key_arg(&format!("0x{}", hex::encode(UNCOMPRESSED))).unwrap();
        let addresses = addresses(&public_key, "elder").unwrap();
        let expected_elder = Address::builder()
            .array(hex!("7e5f4552091a69125d5dfcb7b8c2659029395bdf"))
            .try_build()
            .unwrap();
        assert_eq!(
            addresses,
            Addresses {
                elder: expected_elder.to_string(),
                ethereum: "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf".to_string(),
                public_key: "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
                    .to_string(),
            }
        );
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        let public_key = public_key_arg(
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        )
        .unwrap();
        assert!(addresses(&public_key, "").is_err());
    }
}
