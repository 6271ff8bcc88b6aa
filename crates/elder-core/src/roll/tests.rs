use ethers::{
    signers::{
        LocalWallet,
        Signer as _,
    },
    types::{
        transaction::eip2718::TypedTransaction,
        Address as EthereumAddress,
        Eip1559TransactionRequest,
        TransactionRequest,
        H256,
        U256,
    },
    utils::rlp::RlpStream,
};
use hex_literal::hex;

use super::{
    Error,
    InnerTransaction,
    Quantity,
    Signature,
    TransactionFields,
    TxType,
};

const DESTINATION: [u8; 20] = hex!("1111111111111111111111111111111111111111");
const GENERATOR_PUBLIC_KEY: &str =
    "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const TWENTY_GWEI: u64 = 20_000_000_000;
const ONE_ETHER: u64 = 1_000_000_000_000_000_000;

fn wallet() -> LocalWallet {
    "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
        .parse()
        .unwrap()
}

fn to_signature(signature: &ethers::types::Signature, v: U256) -> Signature {
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    signature.r.to_big_endian(&mut r);
    signature.s.to_big_endian(&mut s);
    Signature::new(H256::from(r), H256::from(s), v)
}

fn elder_fixture() -> InnerTransaction {
    InnerTransaction::from_fields(TransactionFields {
        chain_id: Some(1337u64.into()),
        nonce: Some(0),
        gas_limit: Some(21_000u64.into()),
        to: Some(EthereumAddress::from(DESTINATION)),
        value: Some(ONE_ETHER.into()),
        elder_public_key: Some(GENERATOR_PUBLIC_KEY.to_string()),
        elder_account_sequence: Some(5),
        ..TransactionFields::default()
    })
    .unwrap()
}

#[track_caller]
fn assert_field_count_mismatch(error: Error, expected_type: TxType, expected_count: usize) {
    let Error::FieldCountMismatch {
        tx_type,
        received,
    } = error
    else {
        panic!("expected Error::FieldCountMismatch, got {error:?}");
    };
    assert_eq!(expected_type, tx_type);
    assert_eq!(expected_count, received);
}

#[test]
fn elder_encoding_is_stable() {
    let tx = elder_fixture();
    insta::assert_snapshot!(
        hex::encode(tx.serialize()),
        @"f86c82053980825208941111111111111111111111111111111111111111880de0b6b3a764000080c0b84230323739626536363765663964636262616335356130363239356365383730623037303239626663646232646365323864393539663238313562313666383137393805"
    );
    assert_eq!(
        H256::from(hex!(
            "11a15d74073e1a448eecd87d76917249552ef33a6245db23cfb5b22cb09a8d02"
        )),
        tx.hash(),
    );
}

#[test]
fn hash_is_deterministic() {
    assert_eq!(elder_fixture().hash(), elder_fixture().hash());
}

#[test]
fn hash_ignores_gas_price_signature_and_type() {
    let plain = elder_fixture();
    let mut fields = plain.clone().into_fields();
    fields.tx_type = Some(TxType::Legacy);
    fields.gas_price = Some(TWENTY_GWEI.into());
    fields.signature = Some(Signature::new(
        H256::repeat_byte(1),
        H256::repeat_byte(2),
        U256::from(27u8),
    ));
    let decorated = InnerTransaction::from_fields(fields).unwrap();
    assert_eq!(plain.hash(), decorated.hash());
}

#[test]
fn hash_depends_on_elder_fields() {
    let base = elder_fixture();
    let mut fields = base.clone().into_fields();
    fields.elder_account_sequence = Some(6);
    let bumped = InnerTransaction::from_fields(fields).unwrap();
    assert_ne!(base.hash(), bumped.hash());
}

#[test]
fn elder_encoding_is_not_parseable() {
    let error = InnerTransaction::parse(&elder_fixture().serialize()).unwrap_err();
    assert!(
        matches!(error, Error::ExpectedBytes { .. }),
        "expected the access list to be rejected as a legacy `v`, got {error:?}"
    );
}

#[test]
fn unsigned_legacy_without_chain_id() {
    let tx = InnerTransaction::parse(&hex!(
        "e9018504a817c800825208941111111111111111111111111111111111111111880de0b6b3a764000080"
    ))
    .unwrap();
    assert_eq!(TxType::Legacy, tx.tx_type());
    assert_eq!(U256::zero(), tx.chain_id());
    assert_eq!(1, tx.nonce());
    assert_eq!(Some(U256::from(TWENTY_GWEI)), tx.gas_price());
    assert_eq!(Some(EthereumAddress::from(DESTINATION)), tx.to());
    assert!(tx.signature().is_none());
}

#[test]
fn signed_legacy_derives_chain_id_from_v() {
    let tx = InnerTransaction::parse(&hex!(
        "ec018504a817c800825208941111111111111111111111111111111111111111880de0b6b3a764000080250102"
    ))
    .unwrap();
    assert_eq!(U256::one(), tx.chain_id());
    let signature = tx.signature().unwrap();
    assert_eq!(U256::from(37u8), signature.v());
    assert_eq!(H256::from_low_u64_be(1), signature.r());
    assert_eq!(H256::from_low_u64_be(2), signature.s());
    assert_eq!(0, signature.y_parity());
}

#[test]
fn eip155_placeholder_carries_chain_id_in_v() {
    let tx = InnerTransaction::parse(&hex!(
        "ec018504a817c800825208941111111111111111111111111111111111111111880de0b6b3a7640000802a8080"
    ))
    .unwrap();
    assert_eq!(U256::from(42u8), tx.chain_id());
    assert!(tx.signature().is_none());
}

#[test]
fn legacy_v_without_chain_id_must_be_27_or_28() {
    let error = InnerTransaction::parse(&hex!(
        "ec018504a817c800825208941111111111111111111111111111111111111111880de0b6b3a764000080230102"
    ))
    .unwrap_err();
    assert!(matches!(error, Error::NonCanonicalV { v } if v == U256::from(35u8)));
}

#[test]
fn legacy_with_seven_fields_is_rejected() {
    let error = InnerTransaction::parse(&hex!(
        "ea018504a817c800825208941111111111111111111111111111111111111111880de0b6b3a76400008080"
    ))
    .unwrap_err();
    assert_field_count_mismatch(error, TxType::Legacy, 7);
}

#[test]
fn unknown_leading_bytes_are_unsupported() {
    for prefix in [0x00, 0x04, 0x7e] {
        let error = InnerTransaction::parse(&[prefix, 0xc0]).unwrap_err();
        assert!(
            matches!(error, Error::UnsupportedFormat { prefix: p } if p == prefix),
            "prefix {prefix:#04x} gave {error:?}"
        );
    }
    assert!(matches!(
        InnerTransaction::parse(&[]).unwrap_err(),
        Error::Empty
    ));
}

#[test]
fn access_list_y_parity_must_be_a_bit() {
    let error = InnerTransaction::parse(&hex!(
        "01e601808504a817c8008252089411111111111111111111111111111111111111118080c0020102"
    ))
    .unwrap_err();
    assert!(matches!(error, Error::InvalidYParity { y_parity } if y_parity == U256::from(2u8)));
}

#[test]
fn blob_network_form_is_unwrapped() {
    let tx = InnerTransaction::parse(&hex!(
        "03f856f842018001028252089411111111111111111111111111111111111111118080c003e1a001aaaaaaaa\
         aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaac58400000000c58402020202c584030303\
         03"
    ))
    .unwrap();
    assert_eq!(TxType::Blob, tx.tx_type());
    assert_eq!(1, tx.blobs().len());
    assert_eq!(&[2u8; 4][..], tx.blobs()[0].commitment.as_ref());
    assert_eq!(1, tx.blob_versioned_hashes().len());
    assert_eq!(Some(U256::from(3u8)), tx.max_fee_per_blob_gas());
}

#[test]
fn blob_sidecar_lists_must_have_equal_length() {
    let error = InnerTransaction::parse(&hex!(
        "03f85bf842018001028252089411111111111111111111111111111111111111118080c003e1a001aaaaaaaa\
         aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaca84000000008401010101c58402020202\
         c58403030303"
    ))
    .unwrap_err();
    assert!(matches!(
        error,
        Error::BlobCountMismatch {
            blobs: 2,
            commitments: 1,
            proofs: 1,
        }
    ));
}

/// An unsigned EIP-4844 payload with a single versioned hash.
fn blob_payload(to: &[u8], versioned_hash: &[u8]) -> Vec<u8> {
    let mut stream = RlpStream::new_list(11);
    stream.append(&1u64);
    stream.append(&0u64);
    stream.append(&1u64);
    stream.append(&2u64);
    stream.append(&21_000u64);
    stream.append(&to.to_vec());
    stream.append_empty_data();
    stream.append_empty_data();
    stream.begin_list(0);
    stream.append(&3u64);
    stream.begin_list(1);
    stream.append(&versioned_hash.to_vec());
    let mut payload = vec![0x03];
    payload.extend_from_slice(&stream.out());
    payload
}

#[test]
fn blob_payload_fixture_is_well_formed() {
    let tx = InnerTransaction::parse(&blob_payload(&DESTINATION, &[0x01; 32])).unwrap();
    assert_eq!(tx.blob_versioned_hashes(), &[H256::repeat_byte(0x01)]);
}

#[test]
fn blob_transaction_requires_destination() {
    let error = InnerTransaction::parse(&blob_payload(&[], &[0x01; 32])).unwrap_err();
    assert!(matches!(error, Error::MissingDestination));
}

#[test]
fn blob_versioned_hashes_must_be_32_bytes() {
    let error = InnerTransaction::parse(&blob_payload(&DESTINATION, &[0x01; 31])).unwrap_err();
    assert!(matches!(
        error,
        Error::InvalidBlobHash {
            index: 0,
            length: 31,
        }
    ));
}

#[test]
fn unsigned_legacy_matches_ethers_eip155_encoding() {
    let request = TransactionRequest::new()
        .nonce(3)
        .gas_price(TWENTY_GWEI)
        .gas(21_000)
        .to(EthereumAddress::from(DESTINATION))
        .value(ONE_ETHER)
        .data(vec![0xde, 0xad])
        .chain_id(1337);
    let tx = InnerTransaction::from_fields(TransactionFields {
        tx_type: Some(TxType::Legacy),
        nonce: Some(3),
        gas_price: Some(TWENTY_GWEI.into()),
        gas_limit: Some(21_000u64.into()),
        to: Some(EthereumAddress::from(DESTINATION)),
        value: Some(ONE_ETHER.into()),
        data: Some(vec![0xde, 0xad].into()),
        chain_id: Some(1337u64.into()),
        ..TransactionFields::default()
    })
    .unwrap();
    assert_eq!(request.rlp().to_vec(), tx.unsigned_serialized());
}

#[test]
fn signed_legacy_transaction_recovers_its_sender() {
    let wallet = wallet();
    let request: TypedTransaction = TransactionRequest::new()
        .nonce(7)
        .gas_price(TWENTY_GWEI)
        .gas(21_000)
        .to(EthereumAddress::from(DESTINATION))
        .value(ONE_ETHER)
        .chain_id(1)
        .into();
    let signature = wallet.sign_transaction_sync(&request).unwrap();
    let signed = request.rlp_signed(&signature);

    let tx = InnerTransaction::parse(&signed).unwrap();
    assert_eq!(U256::one(), tx.chain_id());
    assert_eq!(Some(wallet.address()), tx.recover_sender().unwrap());
}

#[test]
fn signed_dynamic_fee_transaction_recovers_its_sender() {
    let wallet = wallet();
    let request: TypedTransaction = Eip1559TransactionRequest::new()
        .nonce(7)
        .max_priority_fee_per_gas(1_000_000_000u64)
        .max_fee_per_gas(TWENTY_GWEI)
        .gas(21_000)
        .to(EthereumAddress::from(DESTINATION))
        .value(ONE_ETHER)
        .chain_id(1337)
        .into();
    let signature = wallet.sign_transaction_sync(&request).unwrap();
    let signed = request.rlp_signed(&signature);

    let tx = InnerTransaction::parse(&signed).unwrap();
    assert_eq!(TxType::DynamicFee, tx.tx_type());
    assert_eq!(U256::from(1337u64), tx.chain_id());
    assert_eq!(Some(wallet.address()), tx.recover_sender().unwrap());
}

fn signed_legacy_fields(wallet: &LocalWallet) -> TransactionFields {
    let request: TypedTransaction = TransactionRequest::new()
        .nonce(0)
        .gas_price(TWENTY_GWEI)
        .gas(21_000)
        .to(EthereumAddress::from(DESTINATION))
        .value(1u64)
        .chain_id(5)
        .into();
    let signature = wallet.sign_transaction_sync(&request).unwrap();
    TransactionFields {
        tx_type: Some(TxType::Legacy),
        nonce: Some(0),
        gas_price: Some(TWENTY_GWEI.into()),
        gas_limit: Some(21_000u64.into()),
        to: Some(EthereumAddress::from(DESTINATION)),
        value: Some(1u64.into()),
        chain_id: Some(5u64.into()),
        signature: Some(to_signature(&signature, U256::from(signature.v))),
        ..TransactionFields::default()
    }
}

#[test]
fn declared_sender_must_match_signature() {
    let wallet = wallet();

    let fields = TransactionFields {
        from: Some(wallet.address()),
        ..signed_legacy_fields(&wallet)
    };
    InnerTransaction::from_fields(fields).unwrap();

    let fields = TransactionFields {
        from: Some(EthereumAddress::repeat_byte(0x42)),
        ..signed_legacy_fields(&wallet)
    };
    let error = InnerTransaction::from_fields(fields).unwrap_err();
    assert!(matches!(error, Error::FromMismatch { recovered, .. } if recovered == wallet.address()));
}

#[test]
fn declared_hash_must_match_elder_hash() {
    let wallet = wallet();
    let expected = InnerTransaction::from_fields(signed_legacy_fields(&wallet))
        .unwrap()
        .hash();

    let fields = TransactionFields {
        hash: Some(expected),
        ..signed_legacy_fields(&wallet)
    };
    InnerTransaction::from_fields(fields).unwrap();

    let fields = TransactionFields {
        hash: Some(H256::zero()),
        ..signed_legacy_fields(&wallet)
    };
    let error = InnerTransaction::from_fields(fields).unwrap_err();
    assert!(matches!(error, Error::HashMismatch { computed, .. } if computed == expected));
}

#[test]
fn unsigned_fields_cannot_declare_hash_or_sender() {
    let error = InnerTransaction::from_fields(TransactionFields {
        hash: Some(H256::zero()),
        ..TransactionFields::default()
    })
    .unwrap_err();
    assert!(matches!(error, Error::UnsignedDeclaresHash));

    let error = InnerTransaction::from_fields(TransactionFields {
        from: Some(EthereumAddress::zero()),
        ..TransactionFields::default()
    })
    .unwrap_err();
    assert!(matches!(error, Error::UnsignedDeclaresFrom));
}

#[test]
fn absent_fields_keep_defaults() {
    let tx = InnerTransaction::from_fields(TransactionFields::default()).unwrap();
    assert_eq!(TxType::DynamicFee, tx.tx_type());
    assert_eq!(0, tx.nonce());
    assert_eq!(U256::zero(), tx.value());
    assert!(tx.to().is_none());
    assert!(tx.data().is_empty());
    assert_eq!("", tx.elder_public_key());
    assert_eq!(0, tx.elder_account_sequence());
}

#[test]
fn type_is_inferred_from_present_fields() {
    let infer = |fields: TransactionFields| InnerTransaction::from_fields(fields).unwrap().tx_type();
    assert_eq!(
        TxType::Legacy,
        infer(TransactionFields {
            gas_price: Some(Quantity::from(1u64)),
            ..TransactionFields::default()
        })
    );
    assert_eq!(
        TxType::AccessList,
        infer(TransactionFields {
            gas_price: Some(Quantity::from(1u64)),
            access_list: Some(vec![]),
            ..TransactionFields::default()
        })
    );
    assert_eq!(
        TxType::DynamicFee,
        infer(TransactionFields {
            max_fee_per_gas: Some(Quantity::from(1u64)),
            ..TransactionFields::default()
        })
    );
    assert_eq!(
        TxType::Blob,
        infer(TransactionFields {
            to: Some(EthereumAddress::from(DESTINATION)),
            max_fee_per_blob_gas: Some(Quantity::from(1u64)),
            ..TransactionFields::default()
        })
    );
}

#[test]
fn gas_price_conflicts_with_fee_market_type() {
    let error = InnerTransaction::from_fields(TransactionFields {
        tx_type: Some(TxType::DynamicFee),
        gas_price: Some(Quantity::from(1u64)),
        ..TransactionFields::default()
    })
    .unwrap_err();
    assert!(matches!(
        error,
        Error::ConflictingFeeFields {
            tx_type: TxType::DynamicFee
        }
    ));
}
