//! The inner rollup transaction carried by an elder `MsgSubmitRollTx`.
//!
//! An [`InnerTransaction`] is parsed from any of the four standard ethereum encodings (legacy,
//! EIP-2930, EIP-1559, EIP-4844) or assembled from a [`TransactionFields`] bag. On top of the
//! standard fields it carries the submitting account's compressed public key and elder account
//! sequence. Its identity is [`InnerTransaction::hash`]: the keccak256 of an elder specific RLP
//! list that does not match any of the parseable encodings, and that ignores the gas price,
//! the signature and the type.
use ethers::types::{
    Address as EthereumAddress,
    Bytes,
    H256,
    U256,
};

mod decode;
mod encode;
mod fields;
mod quantity;
#[cfg(test)]
mod tests;

pub use fields::TransactionFields;
pub use quantity::Quantity;

/// The four standard transaction envelopes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TxType {
    Legacy,
    AccessList,
    DynamicFee,
    Blob,
}

impl TxType {
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Legacy => 0,
            Self::AccessList => 1,
            Self::DynamicFee => 2,
            Self::Blob => 3,
        }
    }

    #[must_use]
    pub fn from_u8(ty: u8) -> Option<Self> {
        match ty {
            0 => Some(Self::Legacy),
            1 => Some(Self::AccessList),
            2 => Some(Self::DynamicFee),
            3 => Some(Self::Blob),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Legacy => "legacy",
            Self::AccessList => "eip-2930",
            Self::DynamicFee => "eip-1559",
            Self::Blob => "eip-4844",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessListItem {
    pub address: EthereumAddress,
    pub storage_keys: Vec<H256>,
}

/// A blob together with its KZG commitment and proof, as found in the network form of an
/// EIP-4844 transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlobSidecar {
    pub data: Bytes,
    pub commitment: Bytes,
    pub proof: Bytes,
}

/// An ECDSA signature over the standard signing hash of a transaction.
///
/// `v` is kept as it was found: the raw (possibly EIP-155 encoded) `v` of a legacy transaction
/// or the y-parity of a typed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    r: H256,
    s: H256,
    v: U256,
}

impl Signature {
    #[must_use]
    pub fn new(r: H256, s: H256, v: U256) -> Self {
        Self {
            r,
            s,
            v,
        }
    }

    #[must_use]
    pub fn r(&self) -> H256 {
        self.r
    }

    #[must_use]
    pub fn s(&self) -> H256 {
        self.s
    }

    #[must_use]
    pub fn v(&self) -> U256 {
        self.v
    }

    /// The parity of the curve point's y coordinate, derived from either `v` encoding.
    #[must_use]
    pub fn y_parity(&self) -> u8 {
        let normalized = if self.v >= U256::from(35u8) {
            self.v - U256::from(35u8)
        } else if self.v >= U256::from(27u8) {
            self.v - U256::from(27u8)
        } else {
            self.v
        };
        u8::from(normalized.bit(0))
    }

    fn to_ethers(self) -> ethers::types::Signature {
        ethers::types::Signature {
            r: U256::from_big_endian(self.r.as_bytes()),
            s: U256::from_big_endian(self.s.as_bytes()),
            v: 27 + u64::from(self.y_parity()),
        }
    }
}

/// The elder inner transaction.
///
/// Construct it with [`InnerTransaction::parse`] or [`InnerTransaction::from_fields`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InnerTransaction {
    tx_type: TxType,
    nonce: u64,
    gas_limit: U256,
    gas_price: Option<U256>,
    max_priority_fee_per_gas: Option<U256>,
    max_fee_per_gas: Option<U256>,
    max_fee_per_blob_gas: Option<U256>,
    to: Option<EthereumAddress>,
    value: U256,
    data: Bytes,
    access_list: Vec<AccessListItem>,
    blob_versioned_hashes: Vec<H256>,
    blobs: Vec<BlobSidecar>,
    chain_id: U256,
    signature: Option<Signature>,
    elder_public_key: String,
    elder_account_sequence: u64,
}

impl Default for InnerTransaction {
    fn default() -> Self {
        Self {
            tx_type: TxType::DynamicFee,
            nonce: 0,
            gas_limit: U256::zero(),
            gas_price: None,
            max_priority_fee_per_gas: None,
            max_fee_per_gas: None,
            max_fee_per_blob_gas: None,
            to: None,
            value: U256::zero(),
            data: Bytes::new(),
            access_list: Vec::new(),
            blob_versioned_hashes: Vec::new(),
            blobs: Vec::new(),
            chain_id: U256::zero(),
            signature: None,
            elder_public_key: String::new(),
            elder_account_sequence: 0,
        }
    }
}

impl InnerTransaction {
    /// Parses one of the standard ethereum transaction encodings.
    ///
    /// A leading byte of `0x7f` or above is read as a legacy RLP list; `0x01`, `0x02` and
    /// `0x03` select the EIP-2930, EIP-1559 and EIP-4844 payloads. The elder specific fields
    /// are left at their defaults.
    ///
    /// # Errors
    /// Returns an error if the leading byte selects no known format, or if the payload
    /// violates the field layout of its format.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        decode::parse(bytes)
    }

    /// Builds a transaction from a bag of optional fields.
    ///
    /// See [`TransactionFields`] for the defaults and the checks performed.
    ///
    /// # Errors
    /// Returns an error if the fields are inconsistent with each other.
    pub fn from_fields(fields: TransactionFields) -> Result<Self, Error> {
        fields::build(fields)
    }

    /// Converts back into a field bag carrying every field of this transaction.
    #[must_use]
    pub fn into_fields(self) -> TransactionFields {
        fields::unbuild(self)
    }

    /// The elder RLP encoding used to compute [`Self::hash`].
    ///
    /// This encoding is not one of the standard formats and cannot be parsed back.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        encode::elder(self)
    }

    /// The elder transaction hash, `keccak256(self.serialize())`.
    #[must_use]
    pub fn hash(&self) -> H256 {
        H256::from(ethers::utils::keccak256(self.serialize()))
    }

    /// The standard unsigned encoding of this transaction for its type.
    ///
    /// Legacy transactions with a non-zero chain id use the EIP-155 form.
    #[must_use]
    pub fn unsigned_serialized(&self) -> Vec<u8> {
        encode::unsigned(self)
    }

    /// The hash an ethereum wallet signs for this transaction.
    #[must_use]
    pub fn unsigned_hash(&self) -> H256 {
        H256::from(ethers::utils::keccak256(self.unsigned_serialized()))
    }

    /// Recovers the ethereum address that signed this transaction.
    ///
    /// Returns `None` if the transaction is unsigned.
    ///
    /// # Errors
    /// Returns an error if no address can be recovered from the signature.
    pub fn recover_sender(&self) -> Result<Option<EthereumAddress>, Error> {
        let Some(signature) = self.signature else {
            return Ok(None);
        };
        signature
            .to_ethers()
            .recover(self.unsigned_hash())
            .map(Some)
            .map_err(Error::recovery)
    }

    #[must_use]
    pub fn tx_type(&self) -> TxType {
        self.tx_type
    }

    #[must_use]
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    #[must_use]
    pub fn gas_limit(&self) -> U256 {
        self.gas_limit
    }

    #[must_use]
    pub fn gas_price(&self) -> Option<U256> {
        self.gas_price
    }

    #[must_use]
    pub fn max_priority_fee_per_gas(&self) -> Option<U256> {
        self.max_priority_fee_per_gas
    }

    #[must_use]
    pub fn max_fee_per_gas(&self) -> Option<U256> {
        self.max_fee_per_gas
    }

    #[must_use]
    pub fn max_fee_per_blob_gas(&self) -> Option<U256> {
        self.max_fee_per_blob_gas
    }

    #[must_use]
    pub fn to(&self) -> Option<EthereumAddress> {
        self.to
    }

    #[must_use]
    pub fn value(&self) -> U256 {
        self.value
    }

    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    #[must_use]
    pub fn access_list(&self) -> &[AccessListItem] {
        &self.access_list
    }

    #[must_use]
    pub fn blob_versioned_hashes(&self) -> &[H256] {
        &self.blob_versioned_hashes
    }

    #[must_use]
    pub fn blobs(&self) -> &[BlobSidecar] {
        &self.blobs
    }

    #[must_use]
    pub fn chain_id(&self) -> U256 {
        self.chain_id
    }

    #[must_use]
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    #[must_use]
    pub fn elder_public_key(&self) -> &str {
        &self.elder_public_key
    }

    #[must_use]
    pub fn elder_account_sequence(&self) -> u64 {
        self.elder_account_sequence
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot parse an empty byte sequence as a transaction")]
    Empty,
    #[error("leading byte `{prefix:#04x}` does not select a supported transaction format")]
    UnsupportedFormat { prefix: u8 },
    #[error("{tx_type} transaction has an invalid number of fields: `{received}`")]
    FieldCountMismatch { tx_type: TxType, received: usize },
    #[error(
        "blob sidecar lists must have equal lengths; got `{blobs}` blobs, `{commitments}` \
         commitments, `{proofs}` proofs"
    )]
    BlobCountMismatch {
        blobs: usize,
        commitments: usize,
        proofs: usize,
    },
    #[error("blob versioned hash at index `{index}` has `{length}` bytes instead of 32")]
    InvalidBlobHash { index: usize, length: usize },
    #[error("eip-4844 transactions require a destination address")]
    MissingDestination,
    #[error("legacy signature has non-canonical `v` value `{v}` for a transaction without chain id")]
    NonCanonicalV { v: U256 },
    #[error("y-parity must be 0 or 1, got `{y_parity}`")]
    InvalidYParity { y_parity: U256 },
    #[error("value `{value}` does not fit in 32 bytes")]
    ValueTooLarge { value: String },
    #[error("declared hash `{declared:?}` does not match computed hash `{computed:?}`")]
    HashMismatch { declared: H256, computed: H256 },
    #[error("declared sender `{declared:?}` does not match recovered signer `{recovered:?}`")]
    FromMismatch {
        declared: EthereumAddress,
        recovered: EthereumAddress,
    },
    #[error("an unsigned transaction cannot declare a hash")]
    UnsignedDeclaresHash,
    #[error("an unsigned transaction cannot declare a sender")]
    UnsignedDeclaresFrom,
    #[error("fee fields conflict with the {tx_type} transaction type")]
    ConflictingFeeFields { tx_type: TxType },
    #[error("address must be 0 or 20 bytes, got `{length}`")]
    InvalidAddress { length: usize },
    #[error("access list storage key must be 32 bytes, got `{length}`")]
    InvalidStorageKey { length: usize },
    #[error("field `{field}` must be an RLP list")]
    ExpectedList { field: &'static str },
    #[error("field `{field}` must be an RLP byte string")]
    ExpectedBytes { field: &'static str },
    #[error("transaction is followed by trailing bytes")]
    TrailingBytes,
    #[error("`{input}` is not a valid quantity")]
    InvalidQuantity { input: String },
    #[error("failed decoding RLP")]
    Rlp {
        #[source]
        source: ethers::utils::rlp::DecoderError,
    },
    #[error("failed recovering the signer of the transaction")]
    Recovery {
        #[source]
        source: ethers::types::SignatureError,
    },
}

impl Error {
    fn rlp(source: ethers::utils::rlp::DecoderError) -> Self {
        Self::Rlp {
            source,
        }
    }

    fn recovery(source: ethers::types::SignatureError) -> Self {
        Self::Recovery {
            source,
        }
    }

    fn value_too_large(bytes: &[u8]) -> Self {
        Self::ValueTooLarge {
            value: crate::encoding::encode_hex_prefixed(bytes),
        }
    }
}
