use ethers::types::{
    Address as EthereumAddress,
    Bytes,
    H256,
};

use super::{
    AccessListItem,
    BlobSidecar,
    Error,
    InnerTransaction,
    Quantity,
    Signature,
    TxType,
};

/// A partial set of transaction fields.
///
/// Only fields that are `Some` are applied by [`InnerTransaction::from_fields`]. Everything
/// else falls back to its default:
///
/// | field | default |
/// |---|---|
/// | `tx_type` | inferred, see below |
/// | `nonce`, `gas_limit`, `value`, `chain_id` | zero |
/// | fee fields | unset |
/// | `to` | unset (contract creation) |
/// | `data` | empty |
/// | `access_list`, `blob_versioned_hashes`, `blobs` | empty |
/// | `signature` | unset |
/// | `elder_public_key` | empty string |
/// | `elder_account_sequence` | zero |
///
/// If `tx_type` is not given it is inferred from the fields that are present: any blob field
/// selects EIP-4844, EIP-1559 fee fields select EIP-1559, a gas price selects legacy (or
/// EIP-2930 together with an access list), an access list alone selects EIP-2930, and no
/// hints at all select EIP-1559.
///
/// `hash` and `from` are not stored on the transaction. They are assertions checked against the
/// built transaction: `hash` must equal [`InnerTransaction::hash`] and `from` must equal the
/// signer recovered from the signature. Both require a signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFields {
    pub tx_type: Option<TxType>,
    pub to: Option<EthereumAddress>,
    pub nonce: Option<u64>,
    pub gas_limit: Option<Quantity>,
    pub gas_price: Option<Quantity>,
    pub max_priority_fee_per_gas: Option<Quantity>,
    pub max_fee_per_gas: Option<Quantity>,
    pub max_fee_per_blob_gas: Option<Quantity>,
    pub data: Option<Bytes>,
    pub value: Option<Quantity>,
    pub chain_id: Option<Quantity>,
    pub signature: Option<Signature>,
    pub access_list: Option<Vec<AccessListItem>>,
    pub blob_versioned_hashes: Option<Vec<H256>>,
    pub blobs: Option<Vec<BlobSidecar>>,
    pub elder_public_key: Option<String>,
    pub elder_account_sequence: Option<u64>,
    pub hash: Option<H256>,
    pub from: Option<EthereumAddress>,
}

impl TransactionFields {
    fn infer_type(&self) -> TxType {
        let has_blob_fields = self.max_fee_per_blob_gas.is_some()
            || self.blob_versioned_hashes.is_some()
            || self.blobs.is_some();
        let has_fee_market =
            self.max_fee_per_gas.is_some() || self.max_priority_fee_per_gas.is_some();
        if has_blob_fields {
            TxType::Blob
        } else if has_fee_market {
            TxType::DynamicFee
        } else if self.gas_price.is_some() {
            if self.access_list.is_some() {
                TxType::AccessList
            } else {
                TxType::Legacy
            }
        } else if self.access_list.is_some() {
            TxType::AccessList
        } else {
            TxType::DynamicFee
        }
    }
}

pub(super) fn build(fields: TransactionFields) -> Result<InnerTransaction, Error> {
    let tx_type = fields.tx_type.unwrap_or_else(|| fields.infer_type());

    let TransactionFields {
        tx_type: _,
        to,
        nonce,
        gas_limit,
        gas_price,
        max_priority_fee_per_gas,
        max_fee_per_gas,
        max_fee_per_blob_gas,
        data,
        value,
        chain_id,
        signature,
        access_list,
        blob_versioned_hashes,
        blobs,
        elder_public_key,
        elder_account_sequence,
        hash,
        from,
    } = fields;

    let has_fee_market = max_fee_per_gas.is_some() || max_priority_fee_per_gas.is_some();
    let conflicting_fees = match tx_type {
        TxType::Legacy | TxType::AccessList => has_fee_market,
        TxType::DynamicFee | TxType::Blob => gas_price.is_some(),
    };
    if conflicting_fees {
        return Err(Error::ConflictingFeeFields {
            tx_type,
        });
    }
    if tx_type == TxType::Blob && to.is_none() {
        return Err(Error::MissingDestination);
    }

    let defaults = InnerTransaction::default();
    let tx = InnerTransaction {
        tx_type,
        nonce: nonce.unwrap_or(defaults.nonce),
        gas_limit: gas_limit.map_or(defaults.gas_limit, Quantity::get),
        gas_price: gas_price.map(Quantity::get),
        max_priority_fee_per_gas: max_priority_fee_per_gas.map(Quantity::get),
        max_fee_per_gas: max_fee_per_gas.map(Quantity::get),
        max_fee_per_blob_gas: max_fee_per_blob_gas.map(Quantity::get),
        to,
        value: value.map_or(defaults.value, Quantity::get),
        data: data.unwrap_or(defaults.data),
        access_list: access_list.unwrap_or(defaults.access_list),
        blob_versioned_hashes: blob_versioned_hashes.unwrap_or(defaults.blob_versioned_hashes),
        blobs: blobs.unwrap_or(defaults.blobs),
        chain_id: chain_id.map_or(defaults.chain_id, Quantity::get),
        signature,
        elder_public_key: elder_public_key.unwrap_or(defaults.elder_public_key),
        elder_account_sequence: elder_account_sequence.unwrap_or(defaults.elder_account_sequence),
    };

    if let Some(declared) = hash {
        if tx.signature.is_none() {
            return Err(Error::UnsignedDeclaresHash);
        }
        let computed = tx.hash();
        if computed != declared {
            return Err(Error::HashMismatch {
                declared,
                computed,
            });
        }
    }

    if let Some(declared) = from {
        let Some(recovered) = tx.recover_sender()? else {
            return Err(Error::UnsignedDeclaresFrom);
        };
        if recovered != declared {
            return Err(Error::FromMismatch {
                declared,
                recovered,
            });
        }
    }

    Ok(tx)
}

pub(super) fn unbuild(tx: InnerTransaction) -> TransactionFields {
    let InnerTransaction {
        tx_type,
        nonce,
        gas_limit,
        gas_price,
        max_priority_fee_per_gas,
        max_fee_per_gas,
        max_fee_per_blob_gas,
        to,
        value,
        data,
        access_list,
        blob_versioned_hashes,
        blobs,
        chain_id,
        signature,
        elder_public_key,
        elder_account_sequence,
    } = tx;
    TransactionFields {
        tx_type: Some(tx_type),
        to,
        nonce: Some(nonce),
        gas_limit: Some(gas_limit.into()),
        gas_price: gas_price.map(Into::into),
        max_priority_fee_per_gas: max_priority_fee_per_gas.map(Into::into),
        max_fee_per_gas: max_fee_per_gas.map(Into::into),
        max_fee_per_blob_gas: max_fee_per_blob_gas.map(Into::into),
        data: Some(data),
        value: Some(value.into()),
        chain_id: Some(chain_id.into()),
        signature,
        access_list: Some(access_list),
        blob_versioned_hashes: (!blob_versioned_hashes.is_empty()).then_some(blob_versioned_hashes),
        blobs: (!blobs.is_empty()).then_some(blobs),
        elder_public_key: Some(elder_public_key),
        elder_account_sequence: Some(elder_account_sequence),
        hash: None,
        from: None,
    }
}
