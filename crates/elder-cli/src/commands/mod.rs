use color_eyre::eyre::{
    self,
    WrapErr as _,
};
use elder_core::{
    crypto::CompressedPublicKey,
    encoding::decode_hex,
};
use serde::Serialize;

pub(crate) mod address;
pub(crate) mod hash;
pub(crate) mod recover;
pub(crate) mod relay;

/// Writes `report` to stdout as pretty printed JSON.
fn print_json<T: Serialize>(report: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(report).wrap_err("failed encoding output as JSON")?;
    println!("{json}");
    Ok(())
}

/// Decodes a hex argument, naming the flag it came from on failure.
fn hex_arg(flag: &str, value: &str) -> eyre::Result<Vec<u8>> {
    decode_hex(value).wrap_err_with(|| format!("`--{flag}` is not valid hex"))
}

fn public_key_arg(value: &str) -> eyre::Result<CompressedPublicKey> {
    let bytes = hex_arg("public-key", value)?;
    CompressedPublicKey::try_from_slice(&bytes)
        .wrap_err("`--public-key` is not a compressed or uncompressed secp256k1 public key")
}
