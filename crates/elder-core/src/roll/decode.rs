use ethers::{
    types::{
        Address as EthereumAddress,
        Bytes,
        H256,
        U256,
    },
    utils::rlp::Rlp,
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

pub(super) fn parse(bytes: &[u8]) -> Result<InnerTransaction, Error> {
    let Some(&prefix) = bytes.first() else {
        return Err(Error::Empty);
    };
    if prefix >= 0x7f {
        return legacy(bytes);
    }
    let payload = &bytes[1..];
    match TxType::from_u8(prefix) {
        Some(TxType::AccessList) => access_list(payload),
        Some(TxType::DynamicFee) => dynamic_fee(payload),
        Some(TxType::Blob) => blob(payload),
        Some(TxType::Legacy) | None => Err(Error::UnsupportedFormat {
            prefix,
        }),
    }
}

fn legacy(bytes: &[u8]) -> Result<InnerTransaction, Error> {
    let fields = top_level_list(bytes)?;
    if !matches!(fields.len(), 6 | 9) {
        return Err(Error::FieldCountMismatch {
            tx_type: TxType::Legacy,
            received: fields.len(),
        });
    }

    let mut tx = InnerTransaction {
        tx_type: TxType::Legacy,
        nonce: nonce(&fields[0])?,
        gas_price: Some(uint(&fields[1], "gasPrice")?),
        gas_limit: uint(&fields[2], "gasLimit")?,
        to: address(&fields[3], "to")?,
        value: uint(&fields[4], "value")?,
        data: data(&fields[5])?,
        ..InnerTransaction::default()
    };

    if fields.len() == 9 {
        let v = uint(&fields[6], "v")?;
        let r = uint(&fields[7], "r")?;
        let s = uint(&fields[8], "s")?;
        if r.is_zero() && s.is_zero() {
            // EIP-155 signing payload: v carries the chain id and there is no signature
            tx.chain_id = v;
        } else {
            let chain_id = if v < U256::from(35u8) {
                U256::zero()
            } else {
                (v - U256::from(35u8)) / U256::from(2u8)
            };
            if chain_id.is_zero() && v != U256::from(27u8) && v != U256::from(28u8) {
                return Err(Error::NonCanonicalV {
                    v,
                });
            }
            tx.chain_id = chain_id;
            tx.signature = Some(Signature::new(word(&fields[7], "r")?, word(&fields[8], "s")?, v));
        }
    }
    Ok(tx)
}

fn access_list(payload: &[u8]) -> Result<InnerTransaction, Error> {
    let fields = top_level_list(payload)?;
    if !matches!(fields.len(), 8 | 11) {
        return Err(Error::FieldCountMismatch {
            tx_type: TxType::AccessList,
            received: fields.len(),
        });
    }
    Ok(InnerTransaction {
        tx_type: TxType::AccessList,
        chain_id: uint(&fields[0], "chainId")?,
        nonce: nonce(&fields[1])?,
        gas_price: Some(uint(&fields[2], "gasPrice")?),
        gas_limit: uint(&fields[3], "gasLimit")?,
        to: address(&fields[4], "to")?,
        value: uint(&fields[5], "value")?,
        data: data(&fields[6])?,
        access_list: access_list_items(&fields[7])?,
        signature: typed_signature(&fields[8..])?,
        ..InnerTransaction::default()
    })
}

fn dynamic_fee(payload: &[u8]) -> Result<InnerTransaction, Error> {
    let fields = top_level_list(payload)?;
    if !matches!(fields.len(), 9 | 12) {
        return Err(Error::FieldCountMismatch {
            tx_type: TxType::DynamicFee,
            received: fields.len(),
        });
    }
    Ok(InnerTransaction {
        tx_type: TxType::DynamicFee,
        chain_id: uint(&fields[0], "chainId")?,
        nonce: nonce(&fields[1])?,
        max_priority_fee_per_gas: Some(uint(&fields[2], "maxPriorityFeePerGas")?),
        max_fee_per_gas: Some(uint(&fields[3], "maxFeePerGas")?),
        gas_limit: uint(&fields[4], "gasLimit")?,
        to: address(&fields[5], "to")?,
        value: uint(&fields[6], "value")?,
        data: data(&fields[7])?,
        access_list: access_list_items(&fields[8])?,
        signature: typed_signature(&fields[9..])?,
        ..InnerTransaction::default()
    })
}

fn blob(payload: &[u8]) -> Result<InnerTransaction, Error> {
    let outer = top_level_list(payload)?;

    // the network form wraps the canonical fields together with the sidecar lists
    let (fields, blobs) = if outer.len() == 4 && outer[0].is_list() {
        let fields = list(&outer[0], "transaction")?;
        let blobs = list(&outer[1], "blobs")?;
        let commitments = list(&outer[2], "commitments")?;
        let proofs = list(&outer[3], "proofs")?;
        if blobs.len() != commitments.len() || blobs.len() != proofs.len() {
            return Err(Error::BlobCountMismatch {
                blobs: blobs.len(),
                commitments: commitments.len(),
                proofs: proofs.len(),
            });
        }
        let sidecars = blobs
            .iter()
            .zip(&commitments)
            .zip(&proofs)
            .map(|((blob, commitment), proof)| {
                Ok(BlobSidecar {
                    data: Bytes::from(bytes(blob, "blob")?.to_vec()),
                    commitment: Bytes::from(bytes(commitment, "commitment")?.to_vec()),
                    proof: Bytes::from(bytes(proof, "proof")?.to_vec()),
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        (fields, sidecars)
    } else {
        (outer, Vec::new())
    };

    if !matches!(fields.len(), 11 | 14) {
        return Err(Error::FieldCountMismatch {
            tx_type: TxType::Blob,
            received: fields.len(),
        });
    }
    let to = address(&fields[5], "to")?.ok_or(Error::MissingDestination)?;
    Ok(InnerTransaction {
        tx_type: TxType::Blob,
        chain_id: uint(&fields[0], "chainId")?,
        nonce: nonce(&fields[1])?,
        max_priority_fee_per_gas: Some(uint(&fields[2], "maxPriorityFeePerGas")?),
        max_fee_per_gas: Some(uint(&fields[3], "maxFeePerGas")?),
        gas_limit: uint(&fields[4], "gasLimit")?,
        to: Some(to),
        value: uint(&fields[6], "value")?,
        data: data(&fields[7])?,
        access_list: access_list_items(&fields[8])?,
        max_fee_per_blob_gas: Some(uint(&fields[9], "maxFeePerBlobGas")?),
        blob_versioned_hashes: versioned_hashes(&fields[10])?,
        blobs,
        signature: typed_signature(&fields[11..])?,
        ..InnerTransaction::default()
    })
}

fn top_level_list(bytes: &[u8]) -> Result<Vec<Rlp<'_>>, Error> {
    let rlp = Rlp::new(bytes);
    let info = rlp.payload_info().map_err(Error::rlp)?;
    if info.header_len + info.value_len != bytes.len() {
        return Err(Error::TrailingBytes);
    }
    list(&rlp, "transaction")
}

fn list<'a>(rlp: &Rlp<'a>, field: &'static str) -> Result<Vec<Rlp<'a>>, Error> {
    if !rlp.is_list() {
        return Err(Error::ExpectedList {
            field,
        });
    }
    Ok(rlp.iter().collect())
}

fn bytes<'a>(rlp: &Rlp<'a>, field: &'static str) -> Result<&'a [u8], Error> {
    if rlp.is_list() {
        return Err(Error::ExpectedBytes {
            field,
        });
    }
    rlp.data().map_err(Error::rlp)
}

fn uint(rlp: &Rlp<'_>, field: &'static str) -> Result<U256, Error> {
    Quantity::from_be_slice(bytes(rlp, field)?).map(Quantity::get)
}

fn nonce(rlp: &Rlp<'_>) -> Result<u64, Error> {
    let raw = bytes(rlp, "nonce")?;
    let nonce = uint(rlp, "nonce")?;
    if nonce > U256::from(u64::MAX) {
        return Err(Error::value_too_large(raw));
    }
    Ok(nonce.as_u64())
}

/// Reads a 32 byte word, left-padding shorter values.
fn word(rlp: &Rlp<'_>, field: &'static str) -> Result<H256, Error> {
    let raw = bytes(rlp, field)?;
    crate::encoding::left_pad::<32>(raw)
        .map(H256::from)
        .ok_or_else(|| Error::value_too_large(raw))
}

fn address(rlp: &Rlp<'_>, field: &'static str) -> Result<Option<EthereumAddress>, Error> {
    let raw = bytes(rlp, field)?;
    match raw.len() {
        0 => Ok(None),
        20 => Ok(Some(EthereumAddress::from_slice(raw))),
        length => Err(Error::InvalidAddress {
            length,
        }),
    }
}

fn data(rlp: &Rlp<'_>) -> Result<Bytes, Error> {
    bytes(rlp, "data").map(|raw| Bytes::from(raw.to_vec()))
}

fn access_list_items(rlp: &Rlp<'_>) -> Result<Vec<AccessListItem>, Error> {
    list(rlp, "accessList")?
        .iter()
        .map(|entry| {
            let pair = list(entry, "accessList entry")?;
            let [address_rlp, keys_rlp] = pair.as_slice() else {
                return Err(Error::ExpectedList {
                    field: "accessList entry",
                });
            };
            let raw_address = bytes(address_rlp, "accessList address")?;
            if raw_address.len() != 20 {
                return Err(Error::InvalidAddress {
                    length: raw_address.len(),
                });
            }
            let storage_keys = list(keys_rlp, "storageKeys")?
                .iter()
                .map(|key| {
                    let raw = bytes(key, "storageKey")?;
                    if raw.len() != 32 {
                        return Err(Error::InvalidStorageKey {
                            length: raw.len(),
                        });
                    }
                    Ok(H256::from_slice(raw))
                })
                .collect::<Result<_, _>>()?;
            Ok(AccessListItem {
                address: EthereumAddress::from_slice(raw_address),
                storage_keys,
            })
        })
        .collect()
}

fn versioned_hashes(rlp: &Rlp<'_>) -> Result<Vec<H256>, Error> {
    list(rlp, "blobVersionedHashes")?
        .iter()
        .enumerate()
        .map(|(index, hash)| {
            let raw = bytes(hash, "blobVersionedHash")?;
            if raw.len() != 32 {
                return Err(Error::InvalidBlobHash {
                    index,
                    length: raw.len(),
                });
            }
            Ok(H256::from_slice(raw))
        })
        .collect()
}

/// Reads the trailing `[yParity, r, s]` of a typed transaction, if present.
fn typed_signature(fields: &[Rlp<'_>]) -> Result<Option<Signature>, Error> {
    let [y_parity, r, s] = fields else {
        return Ok(None);
    };
    let y_parity = uint(y_parity, "yParity")?;
    if y_parity > U256::one() {
        return Err(Error::InvalidYParity {
            y_parity,
        });
    }
    Ok(Some(Signature::new(
        word(r, "r")?,
        word(s, "s")?,
        y_parity,
    )))
}
