use std::sync::Arc;

use wiremock::matchers::{body_string, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_rest::auth::{Credentials, SequentialNonce, sign};
use kraken_rest::error::{ClientError, Severity};
use kraken_rest::rest::{AddOrderRequest, EditOrderRequest, RestClient, TradesRequest};
use kraken_rest::types::BuySell;

// The key/secret pair published in Kraken's signing documentation.
const TEST_SECRET: &str =
    "kQH5HW/8p1uGOVjbgWA7FunAmGO8lsSUXNsu3eow76sz84Q18fWxnyRzBHCd3pd5nE9qa99HAZtuZuj6F1huXg==";

fn public_client(server: &MockServer) -> RestClient {
    RestClient::builder().base_url(server.uri()).build().unwrap()
}

fn private_client(server: &MockServer, first_nonce: u64) -> RestClient {
    RestClient::builder()
        .base_url(server.uri())
        .credentials(Credentials::new("test_key", TEST_SECRET))
        .nonce_source(Arc::new(SequentialNonce::starting_at(first_nonce)))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_public_get_decodes_server_time() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": { "unixtime": 1616336594, "rfc1123": "Sun, 21 Mar 21 14:23:14 +0000" }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let time = public_client(&server)
        .server_time()
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(time.unixtime, 1616336594);
    assert!(time.rfc1123.starts_with("Sun"));
}

#[tokio::test]
async fn test_public_trades_round_trip() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [
                ["50243.2", "0.1", 1616663618.0942, "b", "m", "", 123],
                ["50243.1", "2.0", 1616663620.0, "s", "l", "", 124]
            ],
            "last": "1616663620000000000"
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Trades"))
        .and(query_param("pair", "XXBTZUSD"))
        .and(query_param("since", "1616663610000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let request = TradesRequest::new("XXBTZUSD").since("1616663610000000000");
    let page = public_client(&server)
        .trades(&request)
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(page.last, "1616663620000000000");
    let trades = page.for_pair("XXBTZUSD");
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].side.as_str(), "buy");
    assert_eq!(trades[1].kind.as_str(), "limit");
    assert_eq!(trades[1].trade_id, Some(124));
}

#[tokio::test]
async fn test_private_post_signs_the_transmitted_body() {
    let server = MockServer::start().await;
    let nonce = 1616492376594u64;
    let body = format!("nonce={nonce}");
    let expected_sign = sign("/0/private/Balance", nonce, &body, TEST_SECRET).unwrap();

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .and(header("API-Key", "test_key"))
        .and(header("API-Sign", expected_sign.as_str()))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": { "XXBT": "1.5", "ZUSD": "100.0" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let balances = private_client(&server, nonce)
        .balance()
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(balances["XXBT"], "1.5".parse().unwrap());
}

#[tokio::test]
async fn test_add_order_posts_nonce_first_and_params_in_order() {
    let server = MockServer::start().await;
    let nonce = 1616492376594u64;
    let body = format!("nonce={nonce}&pair=XBTUSD&type=buy&ordertype=limit&volume=1.25&price=37500");
    let expected_sign = sign("/0/private/AddOrder", nonce, &body, TEST_SECRET).unwrap();

    Mock::given(method("POST"))
        .and(path("/0/private/AddOrder"))
        .and(header("API-Sign", expected_sign.as_str()))
        .and(body_string(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [],
            "result": {
                "descr": { "order": "buy 1.25000000 XBTUSD @ limit 37500.0" },
                "txid": ["OUF4EM-FRGI2-MQMWZD"]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = AddOrderRequest::limit(
        "XBTUSD",
        BuySell::Buy,
        "1.25".parse().unwrap(),
        "37500".parse().unwrap(),
    );
    let receipt = private_client(&server, nonce)
        .add_order(&request)
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(receipt.txid, vec!["OUF4EM-FRGI2-MQMWZD"]);
    assert!(receipt.descr.order.contains("XBTUSD"));
}

#[tokio::test]
async fn test_private_call_without_credentials_makes_no_request() {
    let server = MockServer::start().await;
    let client = public_client(&server);

    let err = client.balance().await.unwrap_err();
    assert!(matches!(err, ClientError::Configuration(_)));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty(), "no HTTP request may be sent");
}

#[tokio::test]
async fn test_private_call_with_empty_secret_makes_no_request() {
    let server = MockServer::start().await;
    let client = RestClient::builder()
        .base_url(server.uri())
        .credentials(Credentials::new("test_key", ""))
        .build()
        .unwrap();

    let err = client.balance().await.unwrap_err();
    assert!(matches!(err, ClientError::Configuration(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_order_missing_arguments_lists_all_and_makes_no_request() {
    let server = MockServer::start().await;
    let client = private_client(&server, 1);

    let request = AddOrderRequest::new().pair("XBTUSD").side(BuySell::Buy);
    let err = client.add_order(&request).await.unwrap_err();

    match err {
        ClientError::MissingArguments { endpoint, keys } => {
            assert_eq!(endpoint, "AddOrder");
            assert_eq!(keys, vec!["ordertype", "volume"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_order_missing_arguments_makes_no_request() {
    let server = MockServer::start().await;
    let client = private_client(&server, 1);

    let err = client.edit_order(&EditOrderRequest::new()).await.unwrap_err();
    match err {
        ClientError::MissingArguments { endpoint, keys } => {
            assert_eq!(endpoint, "EditOrder");
            assert_eq!(keys, vec!["txid", "pair"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exchange_errors_stay_data_on_the_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": ["EAPI:Rate limit exceeded"],
            "result": {}
        })))
        .mount(&server)
        .await;

    let envelope = private_client(&server, 1).balance().await.unwrap();

    assert!(!envelope.is_success());
    let errors = envelope.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].severity, Severity::Error);
    assert_eq!(errors[0].category, "EAPI");
    assert!(errors[0].is_rate_limited());
}

#[tokio::test]
async fn test_non_success_status_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = public_client(&server).server_time().await.unwrap_err();
    match err {
        ClientError::Status { code, body } => {
            assert_eq!(code.as_u16(), 502);
            assert_eq!(body, "bad gateway");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = public_client(&server).server_time().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_each_private_call_draws_a_fresh_nonce() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .and(body_string_contains("nonce=100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [], "result": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .and(body_string_contains("nonce=101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [], "result": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = private_client(&server, 100);
    client.balance().await.unwrap();
    client.balance().await.unwrap();
}

#[tokio::test]
async fn test_custom_version_changes_paths_and_signature_base() {
    let server = MockServer::start().await;
    let nonce = 7u64;
    let expected_sign = sign("/2/private/Balance", nonce, "nonce=7", TEST_SECRET).unwrap();

    Mock::given(method("POST"))
        .and(path("/2/private/Balance"))
        .and(header("API-Sign", expected_sign.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": [], "result": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RestClient::builder()
        .base_url(server.uri())
        .version(2)
        .credentials(Credentials::new("test_key", TEST_SECRET))
        .nonce_source(Arc::new(SequentialNonce::starting_at(nonce)))
        .build()
        .unwrap();
    client.balance().await.unwrap();
}
