use std::time::Duration;

use base64::{
    prelude::BASE64_STANDARD,
    Engine as _,
};
use elder_core::{
    address::Address,
    generated::cosmos::tx::v1beta1::TxRaw,
};
use reqwest::StatusCode;
use serde_json::json;
use tendermint::Hash;
use wiremock::{
    matchers::{
        body_partial_json,
        method,
        path,
    },
    Mock,
    MockGuard,
    MockServer,
    ResponseTemplate,
};

use crate::{
    Account,
    ElderClientExt as _,
    Error,
    HttpClient,
    InclusionConfig,
    RestClient,
};

struct MockElder {
    server: MockServer,
    rest: RestClient,
    rpc: HttpClient,
}

impl MockElder {
    async fn start() -> Self {
        let server = MockServer::start().await;
        let rest = RestClient::new(&server.uri()).unwrap();
        let rpc = HttpClient::new(&*format!("http://{}", server.address())).unwrap();
        Self {
            server,
            rest,
            rpc,
        }
    }
}

fn sender() -> Address {
    Address::builder()
        .array([0x11; 20])
        .try_build()
        .unwrap()
}

async fn register_account_response(
    server: &MockServer,
    address: &Address,
    response: ResponseTemplate,
) -> MockGuard {
    Mock::given(method("GET"))
        .and(path(format!("/cosmos/auth/v1beta1/accounts/{address}")))
        .respond_with(response)
        .expect(1)
        .mount_as_scoped(server)
        .await
}

async fn register_simulate_response(server: &MockServer, response: ResponseTemplate) -> MockGuard {
    Mock::given(method("POST"))
        .and(path("/cosmos/tx/v1beta1/simulate"))
        .respond_with(response)
        .expect(1)
        .mount_as_scoped(server)
        .await
}

#[tokio::test]
async fn account_numbers_given_as_strings_are_accepted() {
    let MockElder {
        server,
        rest,
        ..
    } = MockElder::start().await;
    let _guard = register_account_response(
        &server,
        &sender(),
        ResponseTemplate::new(200).set_body_json(json!({
            "account": {
                "@type": "/cosmos.auth.v1beta1.BaseAccount",
                "address": sender().to_string(),
                "pub_key": null,
                "account_number": "42",
                "sequence": "7"
            }
        })),
    )
    .await;

    let account = rest.get_account(&sender()).await.unwrap();
    assert_eq!(
        account,
        Account {
            account_number: 42,
            sequence: 7,
        }
    );
}

#[tokio::test]
async fn eth_account_is_read_through_base_account() {
    let MockElder {
        server,
        rest,
        ..
    } = MockElder::start().await;
    let _guard = register_account_response(
        &server,
        &sender(),
        ResponseTemplate::new(200).set_body_json(json!({
            "account": {
                "@type": "/ethermint.types.v1.EthAccount",
                "base_account": {
                    "address": sender().to_string(),
                    "account_number": 3,
                    "sequence": "11"
                },
                "code_hash": "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
            }
        })),
    )
    .await;

    let account = rest.get_account(&sender()).await.unwrap();
    assert_eq!(
        account,
        Account {
            account_number: 3,
            sequence: 11,
        }
    );
}

#[tokio::test]
async fn missing_account_surfaces_status() {
    let MockElder {
        server,
        rest,
        ..
    } = MockElder::start().await;
    let _guard =
        register_account_response(&server, &sender(), ResponseTemplate::new(404)).await;

    let error = rest.get_account(&sender()).await.unwrap_err();
    let Error::NetworkError(status) = error else {
        panic!("expected a network error, got `{error:?}`");
    };
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn account_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "account": {
            "@type": "/cosmos.auth.v1beta1.BaseAccount",
            "address": sender().to_string(),
            "account_number": "1",
            "sequence": "2"
        }
    }))
}

#[tokio::test]
async fn slow_account_response_is_awaited() {
    let MockElder {
        server,
        rest,
        ..
    } = MockElder::start().await;
    let _guard = register_account_response(
        &server,
        &sender(),
        account_response().set_delay(Duration::from_secs(6)),
    )
    .await;

    let account = rest.get_account(&sender()).await.unwrap();
    assert_eq!(account.sequence, 2);
}

#[tokio::test]
async fn caller_supplied_client_bounds_requests() {
    let server = MockServer::start().await;
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let rest = RestClient::with_http_client(&server.uri(), http_client);
    let _guard = register_account_response(
        &server,
        &sender(),
        account_response().set_delay(Duration::from_secs(1)),
    )
    .await;

    let error = rest.get_account(&sender()).await.unwrap_err();
    assert!(matches!(error, Error::Transport { .. }), "got `{error:?}`");
}

#[tokio::test]
async fn simulate_posts_base64_tx_bytes_and_reads_gas_used() {
    let MockElder {
        server,
        rest,
        ..
    } = MockElder::start().await;
    let tx_bytes = b"\x0a\x00\x12\x00".to_vec();
    let _guard = register_simulate_response(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "gas_info": {
                "gas_wanted": "0",
                "gas_used": "100000"
            },
            "result": null
        })),
    )
    .await;

    let estimate = rest.simulate(&tx_bytes).await.unwrap();
    assert_eq!(estimate.gas_used, 100_000);
    assert_eq!(estimate.fee("uelder", 500_000).gas_limit, 500_000);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body, json!({ "tx_bytes": BASE64_STANDARD.encode(&tx_bytes) }));
}

#[tokio::test]
async fn failed_simulation_surfaces_status() {
    let MockElder {
        server,
        rest,
        ..
    } = MockElder::start().await;
    let _guard = register_simulate_response(&server, ResponseTemplate::new(400)).await;

    let error = rest.simulate(b"").await.unwrap_err();
    let Error::SimulationFailed(status) = error else {
        panic!("expected a simulation error, got `{error:?}`");
    };
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_gas_used_is_rejected() {
    let MockElder {
        server,
        rest,
        ..
    } = MockElder::start().await;
    let _guard = register_simulate_response(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "gas_info": {
                "gas_used": "lots"
            }
        })),
    )
    .await;

    let error = rest.simulate(b"").await.unwrap_err();
    let Error::InvalidGasUsed {
        value,
    } = error
    else {
        panic!("expected an invalid gas error");
    };
    assert_eq!(value, "lots");
}

#[tokio::test]
async fn submit_tx_raw_sync() {
    let MockElder {
        server,
        rpc,
        ..
    } = MockElder::start().await;
    let tx_hash = Hash::Sha256([0xab; 32]);
    let _guard = Mock::given(body_partial_json(json!({
        "method": "broadcast_tx_sync"
    })))
    .respond_with(
        ResponseTemplate::new(200)
            .set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "code": 0,
                    "codespace": "",
                    "data": "",
                    "log": "",
                    "hash": tx_hash.to_string()
                }
            }))
            .append_header("Content-Type", "application/json"),
    )
    .expect(1)
    .mount_as_scoped(&server)
    .await;

    let tx = TxRaw {
        body_bytes: vec![1],
        auth_info_bytes: vec![2],
        signatures: vec![vec![3; 64]],
    };
    let response = rpc.submit_tx_raw_sync(&tx).await.unwrap();
    assert!(response.code.is_ok());
    assert_eq!(response.hash, tx_hash);
}

#[tokio::test]
async fn waiting_for_missing_tx_times_out() {
    let MockElder {
        server,
        rpc,
        ..
    } = MockElder::start().await;
    Mock::given(body_partial_json(json!({
        "method": "tx"
    })))
    .respond_with(
        ResponseTemplate::new(200)
            .set_body_json(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {
                    "code": -32603,
                    "message": "Internal error",
                    "data": "tx not found"
                }
            }))
            .append_header("Content-Type", "application/json"),
    )
    .mount(&server)
    .await;

    let config = InclusionConfig {
        min_poll_interval: Duration::from_millis(10),
        max_poll_interval: Duration::from_millis(20),
        timeout: Duration::from_millis(200),
    };
    let tx_hash = Hash::Sha256([7; 32]);
    let error = rpc
        .wait_for_tx_inclusion(tx_hash, config)
        .await
        .unwrap_err();
    let Error::InclusionTimeout {
        tx_hash: timed_out,
    } = error
    else {
        panic!("expected an inclusion timeout, got `{error:?}`");
    };
    assert_eq!(timed_out, tx_hash);
    assert!(server.received_requests().await.unwrap().len() > 1);
}
