use pricegate_api::config::ApiConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: ApiConfig) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = pricegate_api::app::build_app(&config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api/products", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn empty() -> Self {
        Self::spawn(ApiConfig::default()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create(client: &reqwest::Client, srv: &TestServer, name: &str, price: i64) -> Value {
    let res = client
        .post(srv.url(""))
        .json(&json!({ "name": name, "price": price }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product created successfully.");
    body["product"].clone()
}

async fn items(client: &reqwest::Client, url: String) -> Vec<Value> {
    let res = client.get(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    body["items"].as_array().unwrap().clone()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::empty().await;
    let health = srv.base_url.replace("/api/products", "/health");

    let res = reqwest::get(health).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn seeded_catalog_lists_newest_first() {
    let srv = TestServer::spawn(ApiConfig {
        seed_demo_catalog: true,
        ..ApiConfig::default()
    })
    .await;
    let client = reqwest::Client::new();

    let listed = items(&client, srv.url("")).await;
    let names: Vec<&str> = listed.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["HP Laser Printer", "iPhone", "Laptop"]);

    let created = create(&client, &srv, "Tablet", 800).await;
    assert_eq!(created["id"], 103);
}

#[tokio::test]
async fn create_gates_on_price() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let cheap = create(&client, &srv, "Chair", 120).await;
    assert_eq!(cheap["approval_status"], "approved");
    assert_eq!(cheap["is_active"], true);
    assert_eq!(cheap["approval_request_date"], Value::Null);

    let pricey = create(&client, &srv, "Server", 7_500).await;
    assert_eq!(pricey["approval_status"], "pending_approval");
    assert_eq!(pricey["approval_reason"], "Price exceeds $5000");
    assert!(pricey["approval_request_date"].is_string());

    let res = client
        .post(srv.url(""))
        .json(&json!({ "name": "Yacht", "price": 10_001 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], "Product price cannot exceed $10,000.");

    assert_eq!(items(&client, srv.url("")).await.len(), 2);
}

#[tokio::test]
async fn update_escalation_and_cap() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();
    let lamp = create(&client, &srv, "Lamp", 100).await;
    let id = lamp["id"].as_u64().unwrap();

    // within 1.5x: stays approved
    let res = client
        .put(srv.url(&format!("/{id}")))
        .json(&json!({ "name": "Lamp", "price": "150" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product updated successfully.");
    assert_eq!(body["product"]["approval_status"], "approved");

    // above the cap: refused, price untouched
    let res = client
        .put(srv.url(&format!("/{id}")))
        .json(&json!({ "name": "Lamp", "price": 12_000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let current: Value = client
        .get(srv.url(&format!("/{id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current["price"], "150");

    // more than 50% over 150: queued
    let res = client
        .put(srv.url(&format!("/{id}")))
        .json(&json!({ "name": "Lamp XL", "price": 226 }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["product"]["approval_status"], "pending_approval");
    assert_eq!(
        body["product"]["approval_reason"],
        "Price exceeds $5000 or 50% of previous price."
    );
    assert_eq!(body["product"]["previous_price"], "150");

    let queue = items(&client, srv.url("/queue")).await;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["id"], id);
}

#[tokio::test]
async fn delete_requests_approval_and_keeps_product() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();
    let lamp = create(&client, &srv, "Lamp", 100).await;
    let id = lamp["id"].as_u64().unwrap();

    let res = client.delete(srv.url(&format!("/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product delete request submitted.");
    assert_eq!(body["product"]["approval_status"], "pending_approval");
    assert_eq!(body["product"]["approval_reason"], "Delete request");
    assert_eq!(body["product"]["is_active"], true);

    assert_eq!(items(&client, srv.url("")).await.len(), 1);
    assert_eq!(items(&client, srv.url("/queue")).await.len(), 1);

    let res = client.post(srv.url(&format!("/approve/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product approved successfully.");
    assert_eq!(body["product"]["approval_status"], "approved");
    assert_eq!(body["product"]["approval_reason"], "");
    assert_eq!(body["product"]["approval_request_date"], Value::Null);

    assert!(items(&client, srv.url("/queue")).await.is_empty());
}

#[tokio::test]
async fn reject_settles_pending_product() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();
    let server = create(&client, &srv, "Server", 6_000).await;
    let id = server["id"].as_u64().unwrap();

    let res = client.post(srv.url(&format!("/reject/{id}"))).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Product rejected successfully.");
    assert_eq!(body["product"]["approval_status"], "rejected");
    assert!(items(&client, srv.url("/queue")).await.is_empty());
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let requests = vec![
        client.put(srv.url("/999")).json(&json!({ "name": "X", "price": 1 })),
        client.delete(srv.url("/999")),
        client.post(srv.url("/approve/999")),
        client.post(srv.url("/reject/999")),
        client.get(srv.url("/999")),
    ];
    for req in requests {
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "Product not found.");
    }

    let res = client.post(srv.url("/approve/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn search_filters_combine() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();
    create(&client, &srv, "Laptop", 2_500).await;
    create(&client, &srv, "iPhone", 1_300).await;
    create(&client, &srv, "HP Laser Printer", 500).await;

    let all = items(&client, srv.url("/search")).await;
    let names: Vec<&str> = all.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Laptop", "iPhone", "HP Laser Printer"]);

    let lap = items(&client, srv.url("/search?name=lap")).await;
    assert_eq!(lap.len(), 1);
    assert_eq!(lap[0]["name"], "Laptop");

    let mid = items(&client, srv.url("/search?minPrice=500&maxPrice=1300")).await;
    let names: Vec<&str> = mid.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["iPhone", "HP Laser Printer"]);

    let none = items(
        &client,
        srv.url("/search?name=laser&postedDateEnd=2000-01-01T00:00:00Z"),
    )
    .await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn queue_is_oldest_request_first() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();
    let first = create(&client, &srv, "First", 6_000).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create(&client, &srv, "Second", 7_000).await;

    let queue = items(&client, srv.url("/queue")).await;
    let ids: Vec<&Value> = queue.iter().map(|p| &p["id"]).collect();
    assert_eq!(ids, vec![&first["id"], &second["id"]]);
}

#[tokio::test]
async fn malformed_bodies_are_json_client_errors() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();
    let lamp = create(&client, &srv, "Lamp", 100).await;
    let id = lamp["id"].as_u64().unwrap();

    let requests = vec![
        client
            .post(srv.url(""))
            .header("content-type", "application/json")
            .body("{\"name\": \"Lamp\""),
        client.post(srv.url("")).json(&json!({ "name": "Lamp", "price": "cheap" })),
        client.put(srv.url(&format!("/{id}"))).json(&json!({ "price": 10 })),
        client.put(srv.url(&format!("/{id}"))).body("name=Lamp"),
    ];
    for req in requests {
        let res = req.send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_body");
        assert!(body["message"].is_string());
    }

    let listed = items(&client, srv.url("")).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["price"], "100");
}
