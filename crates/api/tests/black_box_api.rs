use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = husktrack_api::app::build_app().expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn register_client(client: &reqwest::Client, base_url: &str, name: &str) -> String {
    let res = client
        .post(format!("{}/clients", base_url))
        .json(&json!({ "name": name, "kind": "local" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

async fn stock_of(client: &reqwest::Client, base_url: &str, sku: &str) -> i64 {
    let res = client
        .get(format!("{}/products/{}", base_url, sku))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["stock"].as_i64().unwrap()
}

#[tokio::test]
async fn health_and_seeded_catalog() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    // Catalog is seeded with zero stock.
    for item in items {
        assert_eq!(item["stock"], 0);
    }
}

#[tokio::test]
async fn purchase_raises_stock_and_books_an_expense() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let supplier_id = register_client(&client, &srv.base_url, "Island Husk Supply").await;

    let res = client
        .post(format!("{}/purchases", srv.base_url))
        .json(&json!({
            "supplier_id": supplier_id,
            "sku": "coir-fiber",
            "quantity": 500,
            "unit_price": 10,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let receipt: serde_json::Value = res.json().await.unwrap();
    assert_eq!(receipt["transaction"]["amount"], -5000);
    assert_eq!(receipt["transaction"]["kind"], "expense");

    assert_eq!(stock_of(&client, &srv.base_url, "coir-fiber").await, 500);

    let res = client
        .get(format!("{}/finance/transactions", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn order_completion_decrements_stock_and_is_idempotent() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let client_id = register_client(&client, &srv.base_url, "Lanka Coir Traders").await;

    client
        .post(format!("{}/purchases", srv.base_url))
        .json(&json!({
            "supplier_id": client_id,
            "sku": "coco-pith",
            "quantity": 100,
            "unit_price": 5,
        }))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/sales", srv.base_url))
        .json(&json!({
            "client_id": client_id,
            "sku": "coco-pith",
            "quantity": 40,
            "unit_price": 900,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: serde_json::Value = res.json().await.unwrap();
    let order_id = order["id"].as_str().unwrap().to_string();
    assert_eq!(order["status"], "to-do");

    let res = client
        .post(format!("{}/sales/{}/complete", srv.base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let completion: serde_json::Value = res.json().await.unwrap();
    assert_eq!(completion["stock_adjusted"], true);
    assert_eq!(completion["remaining_stock"], 60);

    // Completing again is a no-op, never a double decrement.
    let res = client
        .post(format!("{}/sales/{}/complete", srv.base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let again: serde_json::Value = res.json().await.unwrap();
    assert_eq!(again["stock_adjusted"], false);
    assert_eq!(stock_of(&client, &srv.base_url, "coco-pith").await, 60);
}

#[tokio::test]
async fn insufficient_stock_rejects_completion_untouched() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let client_id = register_client(&client, &srv.base_url, "Pith Importers GmbH").await;

    client
        .post(format!("{}/purchases", srv.base_url))
        .json(&json!({
            "supplier_id": client_id,
            "sku": "husk-chips",
            "quantity": 10,
            "unit_price": 3,
        }))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/exports", srv.base_url))
        .json(&json!({
            "client_id": client_id,
            "sku": "husk-chips",
            "quantity": 50,
            "unit_price": 650,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: serde_json::Value = res.json().await.unwrap();
    let order_id = order["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/exports/{}/complete", srv.base_url, order_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_stock");

    // Order and stock are untouched.
    let res = client
        .get(format!("{}/exports/{}", srv.base_url, order_id))
        .send()
        .await
        .unwrap();
    let order: serde_json::Value = res.json().await.unwrap();
    assert_eq!(order["status"], "to-do");
    assert_eq!(stock_of(&client, &srv.base_url, "husk-chips").await, 10);
}

#[tokio::test]
async fn validation_failures_report_fields() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/clients", srv.base_url))
        .json(&json!({ "name": "   ", "kind": "local", "contact": { "email": "nope" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert!(body["fields"]["name"].is_string());
    assert!(body["fields"]["email"].is_string());

    // Extreme negative amounts are a validation failure, not a fault.
    let res = client
        .post(format!("{}/finance/transactions", srv.base_url))
        .json(&json!({ "kind": "expense", "amount": i64::MIN, "category": "Transport" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["fields"]["amount"].is_string());
}

#[tokio::test]
async fn status_route_rejects_completed_target() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let client_id = register_client(&client, &srv.base_url, "Lanka Coir Traders").await;

    let res = client
        .post(format!("{}/sales", srv.base_url))
        .json(&json!({
            "client_id": client_id,
            "sku": "coir-fiber",
            "quantity": 5,
            "unit_price": 1400,
        }))
        .send()
        .await
        .unwrap();
    let order: serde_json::Value = res.json().await.unwrap();
    let order_id = order["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/sales/{}/status", srv.base_url, order_id))
        .json(&json!({ "status": "completed" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(format!("{}/sales/{}/status", srv.base_url, order_id))
        .json(&json!({ "status": "in-progress" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["status"], "in-progress");
}

#[tokio::test]
async fn dashboard_reflects_the_ledger() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let client_id = register_client(&client, &srv.base_url, "Island Husk Supply").await;

    client
        .post(format!("{}/purchases", srv.base_url))
        .json(&json!({
            "supplier_id": client_id,
            "sku": "coir-fiber",
            "quantity": 200,
            "unit_price": 8,
        }))
        .send()
        .await
        .unwrap();
    client
        .post(format!("{}/finance/transactions", srv.base_url))
        .json(&json!({
            "kind": "income",
            "amount": 4000,
            "category": "Coir Fiber",
        }))
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/dashboard", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let kpis: serde_json::Value = res.json().await.unwrap();
    assert_eq!(kpis["total_income"], 4000);
    assert_eq!(kpis["total_expenses"], 1600);
    assert_eq!(kpis["net"], 2400);
    assert_eq!(kpis["stock"]["coir-fiber"], 200);
    assert_eq!(kpis["client_count"], 1);
}

#[tokio::test]
async fn narrative_answers_and_rejects_blank_questions() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/reports/narrative", srv.base_url))
        .json(&json!({ "question": "how is the year going?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["text"].as_str().unwrap().contains("net"));

    let res = client
        .post(format!("{}/reports/narrative", srv.base_url))
        .json(&json!({ "question": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reset_wipes_ledger_but_keeps_purchases() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let client_id = register_client(&client, &srv.base_url, "Island Husk Supply").await;

    client
        .post(format!("{}/purchases", srv.base_url))
        .json(&json!({
            "supplier_id": client_id,
            "sku": "coco-pith",
            "quantity": 50,
            "unit_price": 5,
        }))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/admin/reset", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let summary: serde_json::Value = res.json().await.unwrap();
    assert_eq!(summary["clients"], 1);
    assert_eq!(summary["financial_transactions"], 1);

    assert_eq!(stock_of(&client, &srv.base_url, "coco-pith").await, 0);

    let res = client
        .get(format!("{}/clients", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());

    let res = client
        .get(format!("{}/purchases", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}
