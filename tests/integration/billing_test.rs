//! Integration tests for the plan catalogue.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_lists_active_plans_in_order() {
    let app = TestApp::new();
    app.create_plan("Enterprise", 30, true);
    app.create_plan("Legacy", 5, false);
    app.create_plan("Starter", 10, true);
    app.create_plan("Pro", 20, true);

    let response = app.request("GET", "/api/billing/plans", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);

    let plans = response.body["data"].as_array().unwrap();
    let names: Vec<&str> = plans.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["Starter", "Pro", "Enterprise"]);

    let starter = &plans[0];
    assert_eq!(starter["price_cents"], 10000);
    assert_eq!(starter["currency"], "usd");
    assert_eq!(starter["billing_interval"], "month");
    assert_eq!(starter["features"][0], "Starter support");
}

#[tokio::test]
async fn test_empty_catalogue() {
    let app = TestApp::new();
    app.create_plan("Retired", 1, false);

    let response = app.request("GET", "/api/billing/plans", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], serde_json::json!([]));
}
