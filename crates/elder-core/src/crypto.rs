//! secp256k1 key handling shared by the elder and ethereum sides of an account.
//!
//! An elder account is controlled by the same secp256k1 key as its ethereum counterpart. Both
//! addresses are the last 20 bytes of the keccak256 hash of the uncompressed public key (without
//! its `0x04` tag); they only differ in how those bytes are rendered.
use std::{
    fmt::{
        self,
        Debug,
        Display,
        Formatter,
    },
    str::FromStr,
};

use ethers::{
    core::k256::ecdsa::{
        RecoveryId,
        Signature as EcdsaSignature,
        VerifyingKey,
    },
    types::{
        Address as EthereumAddress,
        H256,
    },
    utils::{
        hash_message,
        keccak256,
    },
};

use crate::{
    address::{
        self,
        Address,
        ADDRESS_LENGTH,
    },
    encoding::decode_hex,
};

pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;
pub const RECOVERABLE_SIGNATURE_LENGTH: usize = 65;

/// A validated secp256k1 public key, held in its 33 byte compressed SEC1 form.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressedPublicKey([u8; COMPRESSED_PUBLIC_KEY_LENGTH]);

impl CompressedPublicKey {
    /// Constructs a key from its SEC1 encoding.
    ///
    /// Both the 33 byte compressed and the 65 byte uncompressed forms are accepted.
    ///
    /// # Errors
    /// Returns an error if `bytes` is not a valid SEC1 encoded point on the curve.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() == COMPRESSED_PUBLIC_KEY_LENGTH && !matches!(bytes[0], 0x02 | 0x03) {
            return Err(Error::invalid_compressed_prefix(bytes[0]));
        }
        let key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| Error::invalid_key())?;
        Ok(Self::from_verifying_key(&key))
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut compressed = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        compressed.copy_from_slice(point.as_bytes());
        Self(compressed)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        self.0
    }

    /// Returns the 65 byte uncompressed SEC1 encoding, including the leading `0x04`.
    #[must_use]
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH] {
        let key = VerifyingKey::from_sec1_bytes(&self.0)
            .expect("the bytes were validated as a curve point on construction");
        let point = key.to_encoded_point(false);
        let mut uncompressed = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
        uncompressed.copy_from_slice(point.as_bytes());
        uncompressed
    }

    /// The lower-case hex of the compressed key without a `0x` prefix.
    ///
    /// This is the text the elder chain expects in the `elderPublicKey` field of an inner
    /// transaction.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the 20 account bytes shared by the elder and ethereum address of this key.
    #[must_use]
    pub fn account_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        let uncompressed = self.to_uncompressed();
        let digest = keccak256(&uncompressed[1..]);
        let mut account = [0u8; ADDRESS_LENGTH];
        account.copy_from_slice(&digest[32 - ADDRESS_LENGTH..]);
        account
    }

    /// Returns the bech32 account address of this key under `prefix`.
    ///
    /// # Errors
    /// Returns an error if `prefix` is not a valid bech32 human readable part.
    pub fn elder_address(&self, prefix: &str) -> Result<Address, address::Error> {
        Address::builder()
            .array(self.account_bytes())
            .prefix(prefix)
            .try_build()
    }

    #[must_use]
    pub fn ethereum_address(&self) -> EthereumAddress {
        EthereumAddress::from(self.account_bytes())
    }
}

impl Debug for CompressedPublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompressedPublicKey")
            .field(&self.to_hex())
            .finish()
    }
}

impl Display for CompressedPublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for CompressedPublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s).map_err(Error::hex)?;
        Self::try_from_slice(&bytes)
    }
}

impl TryFrom<&[u8]> for CompressedPublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(bytes)
    }
}

/// Derives the checksummed ethereum address of a compressed public key given as hex.
///
/// # Errors
/// Returns an error if `compressed` is not hex, does not start with `0x02` or `0x03`, or is not
/// a point on the curve.
pub fn ethereum_address_from_compressed_hex(compressed: &str) -> Result<String, Error> {
    let bytes = decode_hex(compressed).map_err(Error::hex)?;
    if bytes.len() != COMPRESSED_PUBLIC_KEY_LENGTH {
        return Err(Error::incorrect_length(
            COMPRESSED_PUBLIC_KEY_LENGTH,
            bytes.len(),
        ));
    }
    let key = CompressedPublicKey::try_from_slice(&bytes)?;
    Ok(ethers::utils::to_checksum(&key.ethereum_address(), None))
}

/// The account an elder wallet controls, as recovered from a personal-sign signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecoveredAccount {
    pub address: Address,
    pub public_key: CompressedPublicKey,
}

impl RecoveredAccount {
    /// The uncompressed public key as `0x04`-tagged hex with a `0x` prefix.
    #[must_use]
    pub fn uncompressed_public_key_hex(&self) -> String {
        crate::encoding::encode_hex_prefixed(self.public_key.to_uncompressed())
    }
}

/// Recovers the signer of an EIP-191 personal-sign `signature` over `message`.
///
/// `signature` is the 65 byte `r || s || v` form returned by ethereum wallets, where `v` is
/// either `0`/`1` or `27`/`28`.
///
/// # Errors
/// Returns an error if the signature has the wrong length, an invalid recovery byte, or if
/// no public key can be recovered from it.
pub fn recover_elder_account(
    message: &[u8],
    signature: &[u8],
    prefix: &str,
) -> Result<RecoveredAccount, Error> {
    let digest = hash_message(message);
    let public_key = recover_public_key(digest, signature)?;
    let address = public_key
        .elder_address(prefix)
        .map_err(Error::address)?;
    Ok(RecoveredAccount {
        address,
        public_key,
    })
}

/// Recovers the public key that produced `signature` over the 32 byte `prehash`.
///
/// # Errors
/// See [`recover_elder_account`].
pub fn recover_public_key(prehash: H256, signature: &[u8]) -> Result<CompressedPublicKey, Error> {
    if signature.len() != RECOVERABLE_SIGNATURE_LENGTH {
        return Err(Error::incorrect_length(
            RECOVERABLE_SIGNATURE_LENGTH,
            signature.len(),
        ));
    }
    let v = signature[64];
    let recovery_id = RecoveryId::from_byte(if v >= 27 { v - 27 } else { v })
        .ok_or_else(|| Error::invalid_recovery_byte(v))?;
    let signature =
        EcdsaSignature::from_slice(&signature[..64]).map_err(|_| Error::recovery())?;
    let key = VerifyingKey::recover_from_prehash(prehash.as_bytes(), &signature, recovery_id)
        .map_err(|_| Error::recovery())?;
    Ok(CompressedPublicKey::from_verifying_key(&key))
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    fn address(source: address::Error) -> Self {
        Self(ErrorKind::Address {
            source,
        })
    }

    fn hex(source: hex::FromHexError) -> Self {
        Self(ErrorKind::Hex {
            source,
        })
    }

    fn incorrect_length(expected: usize, received: usize) -> Self {
        Self(ErrorKind::IncorrectLength {
            expected,
            received,
        })
    }

    fn invalid_compressed_prefix(prefix: u8) -> Self {
        Self(ErrorKind::InvalidCompressedPrefix {
            prefix,
        })
    }

    fn invalid_key() -> Self {
        Self(ErrorKind::InvalidKey)
    }

    fn invalid_recovery_byte(v: u8) -> Self {
        Self(ErrorKind::InvalidRecoveryByte {
            v,
        })
    }

    fn recovery() -> Self {
        Self(ErrorKind::Recovery)
    }
}

#[derive(Debug, thiserror::Error)]
enum ErrorKind {
    #[error("failed to construct address from recovered public key")]
    Address { source: address::Error },
    #[error("input was not valid hex")]
    Hex { source: hex::FromHexError },
    #[error("expected `{expected}` bytes, got `{received}`")]
    IncorrectLength { expected: usize, received: usize },
    #[error("compressed public keys must start with 0x02 or 0x03, got `{prefix:#04x}`")]
    InvalidCompressedPrefix { prefix: u8 },
    #[error("bytes are not a valid SEC1 encoded secp256k1 point")]
    InvalidKey,
    #[error("signature recovery byte `{v}` is not one of 0, 1, 27, 28")]
    InvalidRecoveryByte { v: u8 },
    #[error("failed to recover a public key from the signature")]
    Recovery,
}

#[cfg(test)]
mod tests {
    use ethers::signers::{
        LocalWallet,
        Signer as _,
    };
    use hex_literal::hex;

    use super::*;

    // the secp256k1 generator point
    const GENERATOR_COMPRESSED: [u8; 33] =
        hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    // address of the private key `1`, whose public key is the generator
    const GENERATOR_ETHEREUM_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

    #[test]
    fn ethereum_address_of_generator_matches_known_value() {
        let actual =
            ethereum_address_from_compressed_hex(&hex::encode(GENERATOR_COMPRESSED)).unwrap();
        assert_eq!(GENERATOR_ETHEREUM_ADDRESS, actual);
    }

    #[test]
    fn elder_and_ethereum_addresses_share_account_bytes() {
        let key = CompressedPublicKey::try_from_slice(&GENERATOR_COMPRESSED).unwrap();
        let elder = key.elder_address("elder").unwrap();
        assert_eq!(elder.as_bytes(), key.ethereum_address().as_bytes());
        assert!(elder.to_string().starts_with("elder1"));
    }

    #[test]
    fn uncompressed_input_is_compressed() {
        let key = CompressedPublicKey::try_from_slice(&GENERATOR_COMPRESSED).unwrap();
        let uncompressed = key.to_uncompressed();
        assert_eq!(0x04, uncompressed[0]);
        let roundtripped = CompressedPublicKey::try_from_slice(&uncompressed).unwrap();
        assert_eq!(key, roundtripped);
    }

    #[test]
    fn compressed_key_with_wrong_prefix_is_rejected() {
        let mut bad = GENERATOR_COMPRESSED;
        bad[0] = 0x04;
        let error = CompressedPublicKey::try_from_slice(&bad).unwrap_err();
        assert!(matches!(
            error,
            Error(ErrorKind::InvalidCompressedPrefix {
                prefix: 0x04
            })
        ));
    }

    #[test]
    fn public_key_hex_has_no_prefix() {
        let key: CompressedPublicKey = format!("0x{}", hex::encode(GENERATOR_COMPRESSED))
            .parse()
            .unwrap();
        assert_eq!(hex::encode(GENERATOR_COMPRESSED), key.to_hex());
    }

    #[tokio::test]
    async fn personal_sign_signature_recovers_signer() {
        let wallet: LocalWallet =
            "0000000000000000000000000000000000000000000000000000000000000001"
                .parse()
                .unwrap();
        let message = b"elder account access";
        let signature = wallet.sign_message(message).await.unwrap();

        let recovered = recover_elder_account(message, &signature.to_vec(), "elder").unwrap();
        assert_eq!(GENERATOR_COMPRESSED, recovered.public_key.to_bytes());
        assert_eq!(
            wallet.address().as_bytes(),
            recovered.address.as_bytes().as_slice()
        );
        assert!(recovered.uncompressed_public_key_hex().starts_with("0x04"));
    }

    #[test]
    fn short_signature_is_rejected() {
        let error = recover_public_key(H256::zero(), &[0; 64]).unwrap_err();
        assert!(matches!(
            error,
            Error(ErrorKind::IncorrectLength {
                expected: 65,
                received: 64,
            })
        ));
    }
}
