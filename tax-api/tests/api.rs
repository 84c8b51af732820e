//! Endpoint tests driving the full router through `axum-test`.

use axum::http::{HeaderValue, Method, StatusCode, header};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tax_api::{AppState, ServerConfig, create_router};

fn test_server() -> TestServer {
    let router = create_router(AppState::default(), &ServerConfig::default())
        .expect("default config should build a router");
    TestServer::new(router).expect("Failed to start test server")
}

fn declaration_body() -> Value {
    json!({
        "taxpayer_name": "Ahmad Mohammadi",
        "taxpayer_id": "14001234567",
        "previous_year_income": 0,
        "activities": [{
            "code": "1",
            "name": "Retail",
            "activity_type": "goods",
            "activity_percentage": 15,
            "non_specialized_percentage": 0,
            "sales": 3_000_000_000i64
        }],
        "profit_loss": {
            "goods_sales": 3_000_000_000i64,
            "service_sales": 0,
            "goods_cogs": 500_000_000,
            "service_cogs": 0,
            "admin_expenses": 200_000_000
        },
        "other_deductions": 0
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = test_server();

    let response = server.get("/").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "working");
}

#[tokio::test]
async fn test_calculate_returns_report() {
    let server = test_server();

    let response = server
        .post("/api/v1/calculate")
        .json(&declaration_body())
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["taxpayer"]["id"], "14001234567");
    assert!(body["timestamp"].is_string());

    let data = &body["data"];
    assert_eq!(data["profit_loss_statement"]["gross_profit"], 2_500_000_000i64);
    assert_eq!(data["profit_loss_statement"]["net_profit"], 2_300_000_000i64);
    assert_eq!(data["deductions_and_exemptions"]["taxable_income"], 300_000_000);

    let scenarios = &data["tax_scenarios"];
    assert_eq!(scenarios["intack_based"]["final_tax"], 67_500_000);
    assert_eq!(scenarios["auditor_ideal"]["final_tax"], 75_000_000);
    assert_eq!(scenarios["declaration_proposal"]["final_tax"], 64_125_000);
    assert_eq!(scenarios["declaration_proposal"]["reduction_amount"], 3_375_000);
    assert!(scenarios["auditor_ideal"].get("reduction_amount").is_none());
}

#[tokio::test]
async fn test_calculate_overflow_is_bad_request() {
    let server = test_server();
    let mut body = declaration_body();
    body["profit_loss"]["goods_sales"] = json!(i64::MAX);
    body["profit_loss"]["service_sales"] = json!(i64::MAX);

    let response = server.post("/api/v1/calculate").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let detail = body["detail"].as_str().expect("detail should be a string");
    assert!(detail.starts_with("Calculation error:"), "got {detail}");
}

#[tokio::test]
async fn test_calculate_rejects_malformed_body() {
    let server = test_server();

    let response = server
        .post("/api/v1/calculate")
        .json(&json!({ "taxpayer_name": "only a name" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["detail"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_validate_data_accepts_valid_request() {
    let server = test_server();

    let response = server
        .post("/api/v1/validate-data")
        .json(&declaration_body())
        .await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "valid");
}

#[tokio::test]
async fn test_validate_data_lists_every_problem() {
    let server = test_server();
    let mut body = declaration_body();
    body["taxpayer_name"] = json!("");
    body["activities"] = json!([]);
    body["profit_loss"]["admin_expenses"] = json!(-1);

    let response = server.post("/api/v1/validate-data").json(&body).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(
        body["detail"],
        json!([
            "Taxpayer name is required",
            "At least one activity is required",
            "Administrative expenses cannot be negative"
        ])
    );
}

#[tokio::test]
async fn test_tax_regulations() {
    let server = test_server();

    let response = server.get("/api/v1/tax-regulations").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["year"], 1404);
    assert_eq!(body["tax_brackets"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["tax_brackets"][2]["max"], Value::Null);
    assert_eq!(body["tax_brackets"][0]["rate_percent"], "15%");
    assert_eq!(body["article_101_ceiling"], 2_000_000_000i64);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_method() {
    let server = test_server();

    let response = server
        .method(Method::OPTIONS, "/api/v1/calculate")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("DELETE"),
        )
        .await;

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "http://localhost:5173"
    );
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_METHODS), "*");
}
