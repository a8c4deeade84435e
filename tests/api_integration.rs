use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use starknet_wrapped_api::api::{app_router, AppState};
use starknet_wrapped_api::config::Config;

// 2024-03-09, 2024-03-03, 2023-12-19 in unix seconds.
const TS_MAR_A: i64 = 1_710_000_000;
const TS_MAR_B: i64 = 1_709_500_000;
const TS_DEC_2023: i64 = 1_703_000_000;

#[tokio::test]
async fn health_endpoint_works() {
    let (voyager_url, voyager) = spawn_mock_voyager(default_contract(), default_page()).await;
    let (base_url, app) = spawn_app(&voyager_url).await;

    let res = Client::new()
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body.get("status").and_then(|s| s.as_str()), Some("ok"));

    app.abort();
    voyager.abort();
}

#[tokio::test]
async fn invalid_address_is_rejected_before_any_upstream_call() {
    let (voyager_url, voyager) = spawn_mock_voyager(default_contract(), default_page()).await;
    let (base_url, app) = spawn_app(&voyager_url).await;

    for bad in ["0x1234567", "notanaddress", "0x1234567g", ""] {
        let res = Client::new()
            .get(format!("{}/api/wrapped?address={}", base_url, bad))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400, "address {bad:?}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(
            body.get("error").and_then(|e| e.as_str()),
            Some("Invalid address")
        );
    }

    app.abort();
    voyager.abort();
}

#[tokio::test]
async fn wrapped_returns_year_summary_envelope() {
    let (voyager_url, voyager) = spawn_mock_voyager(default_contract(), default_page()).await;
    let (base_url, app) = spawn_app(&voyager_url).await;

    let res = Client::new()
        .get(format!("{}/api/wrapped?address=0xABCDEF0123", base_url))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let body: Value = res.json().await.unwrap();

    assert_eq!(body["address"], "0xABCDEF0123");
    assert_eq!(body["voyager"]["sampledTxns"], 3);
    assert_eq!(body["voyager"]["partial"], false);
    assert_eq!(body["voyager"]["contract"]["creationTimestamp"], 1_650_000_000);
    // Two March 2024 items count; the December 2023 item is excluded.
    assert_eq!(body["act1"]["totalTransactions"], 2);
    assert_eq!(body["act1"]["mostActiveMonth"], "Mar");
    assert_eq!(body["act1"]["uniqueContracts"], 2);
    assert_eq!(body["act1"]["firstTxDate"], "2022-04-15");
    assert!(body["act1"]["gasSavedUSD"].is_null());
    assert!(body["act2"].is_null());

    app.abort();
    voyager.abort();
}

#[tokio::test]
async fn trims_whitespace_around_the_address() {
    let (voyager_url, voyager) = spawn_mock_voyager(default_contract(), default_page()).await;
    let (base_url, app) = spawn_app(&voyager_url).await;

    let res = Client::new()
        .get(format!(
            "{}/api/wrapped?address=%20%200xABCDEF0123%20",
            base_url
        ))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["address"], "0xABCDEF0123");

    app.abort();
    voyager.abort();
}

#[tokio::test]
async fn missing_credential_yields_configuration_error() {
    let state = AppState {
        client: None,
        request_deadline: Duration::from_secs(5),
    };
    let (base_url, app) = spawn_router(app_router(state)).await;

    let res = Client::new()
        .get(format!("{}/api/wrapped?address=0xABCDEF0123", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body.get("error").and_then(|e| e.as_str()),
        Some("VOYAGER_API_KEY is not set on the server")
    );
    assert!(body.get("hint").is_some());

    app.abort();
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let broken = Router::new().route(
        "/contracts/:address",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "voyager down") }),
    );
    let (voyager_url, voyager) = spawn_router(broken).await;
    let (base_url, app) = spawn_app(&voyager_url).await;

    let res = Client::new()
        .get(format!("{}/api/wrapped?address=0xABCDEF0123", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 502);
    let body: Value = res.json().await.unwrap();
    // Generic body only; upstream status and body excerpt stay server-side.
    assert_eq!(
        body.get("error").and_then(|e| e.as_str()),
        Some("Upstream explorer request failed")
    );
    assert!(body.get("hint").is_none());

    app.abort();
    voyager.abort();
}

fn default_contract() -> Value {
    json!({
        "address": "0xabcdef0123",
        "creationTimestamp": 1_650_000_000i64,
        "isAccount": true,
        "classHash": null,
        "version": "0.1.0",
    })
}

fn default_page() -> Value {
    json!({
        "lastPage": 1,
        "items": [
            { "hash": "0x1", "timestamp": TS_MAR_A, "type": "INVOKE", "contractAddress": "0xc1" },
            { "hash": "0x2", "timestamp": TS_MAR_B, "type": "INVOKE", "contractAddress": "0xc2" },
            { "hash": "0x3", "timestamp": TS_DEC_2023, "type": "INVOKE", "contractAddress": "0xc1" },
        ],
    })
}

async fn spawn_mock_voyager(contract: Value, page: Value) -> (String, JoinHandle<()>) {
    let router = Router::new()
        .route(
            "/contracts/:address",
            get(move |Path(_addr): Path<String>| {
                let body = contract.clone();
                async move { Json(body) }
            }),
        )
        .route(
            "/txns",
            get(move |Query(_q): Query<HashMap<String, String>>| {
                let body = page.clone();
                async move { Json(body) }
            }),
        );
    spawn_router(router).await
}

async fn spawn_app(voyager_url: &str) -> (String, JoinHandle<()>) {
    let config = Config {
        voyager_api_key: Some("test-session-cookie".to_string()),
        voyager_base_url: voyager_url.to_string(),
        http_bind_addr: "127.0.0.1:0".to_string(),
        fetch_timeout: Duration::from_secs(5),
        request_deadline: Duration::from_secs(10),
        state_path: std::env::temp_dir().join("wrapped-test-state.json"),
    };
    let state = AppState::from_config(&config).unwrap();
    spawn_router(app_router(state)).await
}

async fn spawn_router(app: Router) -> (String, JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);
    let server = axum::serve(listener, app);
    let handle = tokio::spawn(async move {
        let _ = server.await;
    });
    (base_url, handle)
}
