use std::time::Duration;

use chrono::NaiveDate;
use moex_iss_api::{CandleQuery, Client, DividendQuery, Error};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_dividends_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("dividends.json");

    Mock::given(method("GET"))
        .and(path("/iss/securities/SBER/dividends.json"))
        .and(query_param("from", "2015-01-01"))
        .and(query_param("iss.meta", "off"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query =
        DividendQuery::new("SBER").with_from(NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
    let result = client.get_dividends(&query).await;
    assert!(result.is_ok());

    let records = result.unwrap().records().unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[3].registry_close_date.as_deref(), Some("2023-05-11"));
}

#[tokio::test]
async fn get_dividends_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iss/securities/SBER/dividends.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_dividends(&DividendQuery::new("SBER")).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        _ => panic!("expected HttpStatus error"),
    }
}

#[tokio::test]
async fn get_dividends_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/iss/securities/SBER/dividends.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let result = client.get_dividends(&DividendQuery::new("SBER")).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}

#[tokio::test]
async fn get_candles_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("candles.json");

    Mock::given(method("GET"))
        .and(path(
            "/iss/engines/stock/markets/shares/securities/SBER/candles.json",
        ))
        .and(query_param("from", "2024-07-09"))
        .and(query_param("till", "2024-07-13"))
        .and(query_param("interval", "24"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri());
    let query = CandleQuery::new("SBER").with_range(
        NaiveDate::from_ymd_opt(2024, 7, 9).unwrap(),
        NaiveDate::from_ymd_opt(2024, 7, 13).unwrap(),
    );
    let resp = client.get_candles(&query).await.unwrap();
    assert_eq!(resp.records().unwrap().len(), 4);
}

#[tokio::test]
async fn get_candles_timeout_is_request_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/iss/engines/stock/markets/shares/securities/SBER/candles.json",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(load_fixture("candles.json"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client =
        Client::with_base_url(&mock_server.uri()).with_timeout(Duration::from_millis(50));
    let result = client.get_candles(&CandleQuery::new("SBER")).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
