use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use storefront_core::UnknownPathPolicy;
use storefront_gateway::{create_router, AppState, GatewayConfig};

fn server_with(config: GatewayConfig) -> TestServer {
    let app = create_router(AppState::shared(config));
    TestServer::new(app).expect("Failed to create test server")
}

fn server() -> TestServer {
    server_with(GatewayConfig::default())
}

const SIGNED_IN: &str = "auth-token=test-token";

// ============= Health Check Tests =============

#[tokio::test]
async fn test_health_check() {
    let server = server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_health_is_not_gated() {
    let mut config = GatewayConfig::default();
    config.unknown_paths = UnknownPathPolicy::RequireAuth;
    let server = server_with(config);

    server.get("/health").await.assert_status_ok();
}

// ============= Route Gate Tests =============

#[tokio::test]
async fn test_protected_path_without_cookie_redirects_to_login() {
    let server = server();

    let response = server.get("/dashboard/orders").await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "/login?redirect=%2Fdashboard%2Forders"
    );
}

#[tokio::test]
async fn test_empty_cookie_counts_as_signed_out() {
    let server = server();

    let response = server
        .get("/dashboard/users")
        .add_header("cookie", "auth-token=")
        .await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_protected_path_with_cookie_is_served() {
    let server = server();

    let response = server
        .get("/dashboard/orders")
        .add_header("cookie", SIGNED_IN)
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_login_with_cookie_redirects_to_target() {
    let server = server();

    let response = server
        .get("/login?redirect=%2Fdashboard%2Fusers")
        .add_header("cookie", SIGNED_IN)
        .await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/dashboard/users");

    let response = server.get("/login").add_header("cookie", SIGNED_IN).await;
    assert_eq!(response.header("location"), "/dashboard");
}

#[tokio::test]
async fn test_login_uses_first_of_repeated_redirects() {
    let server = server();

    let response = server
        .get("/login?redirect=%2Fdashboard%2Forders&redirect=%2Fdashboard%2Fusers")
        .add_header("cookie", SIGNED_IN)
        .await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/dashboard/orders");
}

#[tokio::test]
async fn test_login_ignores_off_site_target() {
    let server = server();

    let response = server
        .get("/login?redirect=https%3A%2F%2Fevil.example")
        .add_header("cookie", SIGNED_IN)
        .await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/dashboard");
}

#[tokio::test]
async fn test_login_without_cookie_shows_page() {
    let server = server();

    let response = server.get("/login").await;
    response.assert_status_ok();
    assert!(response.text().contains("Sign in"));
}

#[tokio::test]
async fn test_unknown_path_policy() {
    let server = server();
    server.get("/checkout").await.assert_status_not_found();

    let mut config = GatewayConfig::default();
    config.unknown_paths = UnknownPathPolicy::RequireAuth;
    let strict = server_with(config);

    let response = strict.get("/checkout").await;
    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/login?redirect=%2Fcheckout");
}

// ============= Cart Tests =============

fn demo_items() -> Value {
    json!([
        { "id": "1", "name": "Mountain Bike Pro", "category": "Bikes", "unit_price": 89999, "quantity": 1 },
        { "id": "2", "name": "Gaming Laptop Ultra", "category": "Electronics", "unit_price": 159999, "quantity": 1 },
        { "id": "3", "name": "Smart Phone X1", "category": "Electronics", "unit_price": 79999, "quantity": 2 }
    ])
}

#[tokio::test]
async fn test_cart_summary() {
    let server = server();

    let response = server
        .post("/api/cart/summary")
        .json(&json!({ "items": demo_items(), "promo_code": "SAVE10" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let summary = &body["summary"];
    assert_eq!(summary["subtotal"], 409996);
    assert_eq!(summary["shipping"], 0);
    assert_eq!(summary["tax"], 32800);
    assert_eq!(summary["discount"], 41000);
    assert_eq!(summary["total"], 409996 + 32800 - 41000);
    assert_eq!(summary["promo_applied"], true);
}

#[tokio::test]
async fn test_empty_cart_pays_shipping() {
    let server = server();

    let response = server.post("/api/cart/summary").json(&json!({})).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["summary"]["shipping"], 1000);
    assert_eq!(body["summary"]["total"], 1000);
}

#[tokio::test]
async fn test_cart_quantity_zero_removes_line() {
    let server = server();

    let response = server
        .post("/api/cart/quantity")
        .json(&json!({ "items": demo_items(), "id": "2", "quantity": 0 }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["change"], "removed");
    assert_eq!(body["items"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["summary"]["subtotal"], 89999 + 79999 * 2);
}

#[tokio::test]
async fn test_cart_quantity_errors() {
    let server = server();

    let response = server
        .post("/api/cart/quantity")
        .json(&json!({ "items": demo_items(), "id": "9", "quantity": 1 }))
        .await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");

    let response = server
        .post("/api/cart/quantity")
        .json(&json!({ "items": demo_items(), "id": "1", "quantity": -1 }))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_cart_price_out_of_range_is_rejected() {
    let server = server();

    let response = server
        .post("/api/cart/summary")
        .json(&json!({
            "items": [
                { "id": "1", "name": "Yacht", "category": "Boats", "unit_price": 4611686018427387904i64, "quantity": 2 }
            ]
        }))
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_gets_error_body() {
    let server = server();

    let response = server
        .post("/api/cart/summary")
        .text("{ not json")
        .content_type("application/json")
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_demo_cart() {
    let server = server();

    let response = server.get("/api/cart").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["items"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["summary"]["subtotal"], 409996);
}

// ============= Catalog Tests =============

#[tokio::test]
async fn test_product_search() {
    let server = server();

    let response = server.get("/api/products?q=BIKE").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], 2);
    assert_eq!(body["products"][0]["id"], "1");
    assert_eq!(body["products"][1]["id"], "5");

    let body: Value = server.get("/api/products").await.json();
    assert_eq!(body["total"], 6);
}

#[tokio::test]
async fn test_category_search() {
    let server = server();

    let body: Value = server
        .get("/api/products?category=electronics&q=premium")
        .await
        .json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["products"][0]["name"], "Wireless Headphones");
}

#[tokio::test]
async fn test_product_detail() {
    let server = server();

    let response = server.get("/products/1?quantity=40").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["savings"], 30000);
    assert_eq!(body["full_stars"], 4);
    assert_eq!(body["quantity"], 15);
    assert_eq!(body["category_slug"], "bikes");

    server.get("/products/404").await.assert_status_not_found();
}

// ============= Dashboard Tests =============

#[tokio::test]
async fn test_orders_table() {
    let server = server();

    let response = server
        .get("/dashboard/orders?sort=total&dir=desc&page_size=2")
        .add_header("cookie", SIGNED_IN)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["rows"][0]["id"], "ORD-005");
    assert_eq!(body["rows"][1]["id"], "ORD-001");
    assert_eq!(body["page_count"], 3);
    assert_eq!(body["has_next"], true);
    assert_eq!(body["stats"]["completed"], 1);
    assert_eq!(body["stats"]["pending"], 2);
    assert_eq!(body["stats"]["revenue"], 29999);
}

#[tokio::test]
async fn test_users_table_search_and_clamp() {
    let server = server();

    let body: Value = server
        .get("/dashboard/users?q=JOHN&page=7")
        .add_header("cookie", SIGNED_IN)
        .await
        .json();
    assert_eq!(body["total_rows"], 2);
    assert_eq!(body["page_index"], 0);
}

#[tokio::test]
async fn test_table_bad_params() {
    let server = server();

    let response = server
        .get("/dashboard/products?sort=nope")
        .add_header("cookie", SIGNED_IN)
        .await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "TABLE_ERROR");

    server
        .get("/dashboard/products?page_size=0")
        .add_header("cookie", SIGNED_IN)
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_toggle_user_suspension() {
    let server = server();

    let response = server
        .post("/dashboard/users/3/toggle-suspension")
        .add_header("cookie", SIGNED_IN)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["users"][2]["status"], "active");
    assert_eq!(body["stats"]["suspended"], 0);

    server
        .post("/dashboard/users/99/toggle-suspension")
        .add_header("cookie", SIGNED_IN)
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_user() {
    let server = server();

    let body: Value = server
        .delete("/dashboard/users/2")
        .add_header("cookie", SIGNED_IN)
        .await
        .json();
    assert_eq!(body["users"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["stats"]["admins"], 0);
}

#[tokio::test]
async fn test_delete_product() {
    let server = server();

    let response = server
        .delete("/dashboard/products/3")
        .add_header("cookie", SIGNED_IN)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let products = body["products"].as_array().cloned().unwrap_or_default();
    assert_eq!(products.len(), 4);
    assert!(products.iter().all(|p| p["id"] != "3"));
    assert_eq!(body["stats"]["total"], 4);
    assert_eq!(body["stats"]["out_of_stock"], 0);
    assert_eq!(body["stats"]["low_stock"], 1);

    server
        .delete("/dashboard/products/99")
        .add_header("cookie", SIGNED_IN)
        .await
        .assert_status_not_found();

    // Signed-out deletes never reach the handler
    server
        .delete("/dashboard/products/3")
        .await
        .assert_status(StatusCode::TEMPORARY_REDIRECT);
}
