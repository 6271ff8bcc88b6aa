use ethers::{
    types::U256,
    utils::rlp::RlpStream,
};

use super::{
    AccessListItem,
    InnerTransaction,
    TxType,
};

const ELDER_FIELD_COUNT: usize = 9;

/// `[chainId, nonce, gasLimit, to, value, data, accessList, elderPublicKey, elderAccountSequence]`
pub(super) fn elder(tx: &InnerTransaction) -> Vec<u8> {
    let mut stream = RlpStream::new_list(ELDER_FIELD_COUNT);
    stream.append(&tx.chain_id);
    stream.append(&tx.nonce);
    stream.append(&tx.gas_limit);
    append_to(&mut stream, tx);
    stream.append(&tx.value);
    stream.append(&tx.data.to_vec());
    append_access_list(&mut stream, &tx.access_list);
    // the key travels as the ascii bytes of its hex text, not as the decoded key bytes
    stream.append(&tx.elder_public_key.as_bytes().to_vec());
    stream.append(&tx.elder_account_sequence);
    stream.out().to_vec()
}

pub(super) fn unsigned(tx: &InnerTransaction) -> Vec<u8> {
    match tx.tx_type {
        TxType::Legacy => legacy(tx),
        TxType::AccessList => typed(TxType::AccessList, access_list_payload(tx)),
        TxType::DynamicFee => typed(TxType::DynamicFee, dynamic_fee_payload(tx)),
        TxType::Blob => typed(TxType::Blob, blob_payload(tx)),
    }
}

fn legacy(tx: &InnerTransaction) -> Vec<u8> {
    let eip155 = !tx.chain_id.is_zero();
    let mut stream = RlpStream::new_list(if eip155 { 9 } else { 6 });
    stream.append(&tx.nonce);
    stream.append(&gas_price(tx));
    stream.append(&tx.gas_limit);
    append_to(&mut stream, tx);
    stream.append(&tx.value);
    stream.append(&tx.data.to_vec());
    if eip155 {
        stream.append(&tx.chain_id);
        stream.append_empty_data();
        stream.append_empty_data();
    }
    stream.out().to_vec()
}

fn access_list_payload(tx: &InnerTransaction) -> RlpStream {
    let mut stream = RlpStream::new_list(8);
    stream.append(&tx.chain_id);
    stream.append(&tx.nonce);
    stream.append(&gas_price(tx));
    stream.append(&tx.gas_limit);
    append_to(&mut stream, tx);
    stream.append(&tx.value);
    stream.append(&tx.data.to_vec());
    append_access_list(&mut stream, &tx.access_list);
    stream
}

fn dynamic_fee_payload(tx: &InnerTransaction) -> RlpStream {
    let mut stream = RlpStream::new_list(9);
    append_fee_market_head(&mut stream, tx);
    stream
}

fn blob_payload(tx: &InnerTransaction) -> RlpStream {
    let mut stream = RlpStream::new_list(11);
    append_fee_market_head(&mut stream, tx);
    stream.append(&tx.max_fee_per_blob_gas.unwrap_or_default());
    stream.begin_list(tx.blob_versioned_hashes.len());
    for hash in &tx.blob_versioned_hashes {
        stream.append(hash);
    }
    stream
}

/// The nine leading fields shared by EIP-1559 and EIP-4844 payloads.
fn append_fee_market_head(stream: &mut RlpStream, tx: &InnerTransaction) {
    stream.append(&tx.chain_id);
    stream.append(&tx.nonce);
    stream.append(&tx.max_priority_fee_per_gas.unwrap_or_default());
    stream.append(&tx.max_fee_per_gas.unwrap_or_default());
    stream.append(&tx.gas_limit);
    append_to(stream, tx);
    stream.append(&tx.value);
    stream.append(&tx.data.to_vec());
    append_access_list(stream, &tx.access_list);
}

fn typed(tx_type: TxType, payload: RlpStream) -> Vec<u8> {
    let payload = payload.out();
    let mut out = Vec::with_capacity(payload.len() + 1);
    out.push(tx_type.as_u8());
    out.extend_from_slice(&payload);
    out
}

fn gas_price(tx: &InnerTransaction) -> U256 {
    tx.gas_price.unwrap_or_default()
}

fn append_to(stream: &mut RlpStream, tx: &InnerTransaction) {
    match &tx.to {
        Some(to) => stream.append(to),
        None => stream.append_empty_data(),
    };
}

fn append_access_list(stream: &mut RlpStream, access_list: &[AccessListItem]) {
    stream.begin_list(access_list.len());
    for item in access_list {
        stream.begin_list(2);
        stream.append(&item.address);
        stream.begin_list(item.storage_keys.len());
        for key in &item.storage_keys {
            stream.append(key);
        }
    }
}
