//! Tests for the HTTP transport module

use super::*;
use crate::config::{ClientConfig, DEFAULT_CONTENT_TYPE};
use crate::error::Error;
use std::time::Duration;
use test_case::test_case;
use url::Url;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(ClientConfig::new(server.uri())).unwrap()
}

fn url(server: &MockServer, rest: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), rest)).unwrap()
}

#[test]
fn test_transport_request_builders() {
    let target = Url::parse("http://localhost:9200/_search/scroll").unwrap();

    let get = TransportRequest::get(target.clone());
    assert_eq!(get.method, reqwest::Method::GET);
    assert!(get.body.is_none());
    assert!(get.timeout.is_none());

    let post = TransportRequest::post(target, "{}").with_timeout(Duration::from_secs(3));
    assert_eq!(post.method, reqwest::Method::POST);
    assert_eq!(post.body.as_deref(), Some("{}"));
    assert_eq!(post.timeout, Some(Duration::from_secs(3)));
}

#[test_case(200, true ; "ok")]
#[test_case(201, true ; "created")]
#[test_case(202, false ; "accepted")]
#[test_case(204, false ; "no content")]
#[test_case(301, false ; "redirect")]
#[test_case(400, false ; "bad request")]
#[test_case(404, false ; "not found")]
#[test_case(500, false ; "server error")]
fn test_is_accepted_status(status: u16, accepted: bool) {
    assert_eq!(is_accepted_status(status), accepted);
}

#[tokio::test]
async fn test_get_returns_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_search/scroll"))
        .and(query_param("scroll", "60s"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"_scroll_id":"abc"}"#))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = client
        .send(TransportRequest::get(url(&mock_server, "/_search/scroll?scroll=60s")))
        .await
        .unwrap();

    assert_eq!(&body[..], br#"{"_scroll_id":"abc"}"#);
}

#[tokio::test]
async fn test_post_sends_body_and_form_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders/all/_search"))
        .and(header("content-type", DEFAULT_CONTENT_TYPE))
        .and(body_string(r#"{"query":{"match_all":{}}}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .send(TransportRequest::post(
            url(&mock_server, "/orders/all/_search"),
            r#"{"query":{"match_all":{}}}"#,
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_configured_content_type_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/idx/doc/_search"))
        .and(header("content-type", "application/json"))
        .and(header("X-Tenant", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .base_url(mock_server.uri())
        .content_type("application/json")
        .header("X-Tenant", "acme")
        .build();
    let client = HttpClient::new(config).unwrap();
    assert_eq!(client.config().content_type, "application/json");

    client
        .send(TransportRequest::post(url(&mock_server, "/idx/doc/_search"), "{}"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejected_status_keeps_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_search/scroll"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"error":"SearchContextMissingException"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .send(TransportRequest::get(url(&mock_server, "/_search/scroll")))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("SearchContextMissingException"));
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_search/scroll"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Server error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .send(TransportRequest::get(url(&mock_server, "/_search/scroll")))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_accepted_but_unfinished_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_search/scroll"))
        .respond_with(ResponseTemplate::new(202).set_body_string("accepted-not-done"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .send(TransportRequest::get(url(&mock_server, "/_search/scroll")))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(
        err,
        Error::HttpStatus { status: 202, ref body } if body == "accepted-not-done"
    ));
}

#[tokio::test]
async fn test_request_timeout_override() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .send(TransportRequest::get(url(&mock_server, "/slow")).with_timeout(Duration::from_millis(50)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let address = "http://127.0.0.1:1";

    let client = HttpClient::new(ClientConfig::new(address)).unwrap();
    let err = client
        .send(TransportRequest::get(Url::parse(address).unwrap()))
        .await
        .unwrap_err();

    assert!(err.is_transport());
}

#[test]
fn test_zero_timeout_config_rejected() {
    let config = ClientConfig::builder()
        .base_url("http://localhost:9200")
        .timeout(Duration::ZERO)
        .build();

    let err = HttpClient::new(config).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[tokio::test]
async fn test_sub_second_timeout_still_reaches_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/_search/scroll"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(500))
        .build();
    let client = HttpClient::new(config).unwrap();

    let body = client
        .send(TransportRequest::get(url(&mock_server, "/_search/scroll")))
        .await
        .unwrap();
    assert_eq!(&body[..], b"{}");
}

#[test]
fn test_http_client_debug() {
    let client = HttpClient::new(ClientConfig::default()).unwrap();
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("config"));
}
