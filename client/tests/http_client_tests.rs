//! Marketplace HTTP client tests
//!
//! Runs the reqwest client against an in-process axum stub of the
//! LiveMART backend bound to an ephemeral port.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use livemart_client::config::{ApiConfig, PurchaseConfig};
use livemart_client::{ClientError, MarketplaceApi, MarketplaceClient, WholesalePurchasePage};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use shared::{
    FailureCategory, MessageResponse, ProductListView, ProductQuery, PurchaseForm, PurchaseRequest,
    SessionUser,
};

/// Requests the stub saw
#[derive(Clone, Default)]
struct Recorded {
    product_queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    purchases: Arc<Mutex<Vec<Value>>>,
}

fn catalog() -> Value {
    json!([
        {"id": "p_wh_apple", "name": "Apple (WH)", "category_id": "c1", "price": 70.0, "stock": 500,
         "seller_id": "wh1", "description": "Fresh red apples", "rating": 0.0},
        {"id": "p_wh_milk", "name": "Milk (WH)", "category_id": "c2", "price": 40.0, "stock": 300,
         "seller_id": "wh1", "description": "Fresh dairy milk", "rating": 0.0},
        {"id": "p_ret_bread", "name": "Bread (Retail)", "category_id": "c3", "price": 50.0, "stock": 20,
         "seller_id": "ret1", "description": "Premium bread", "rating": 0.0}
    ])
}

async fn list_products(
    State(recorded): State<Recorded>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorded.product_queries.lock().unwrap().push(params);
    Json(catalog())
}

async fn accept_purchase(State(recorded): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
    recorded.purchases.lock().unwrap().push(body);
    Json(json!({ "message": "Purchase successful" }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": "2024-12-23T10:00:00+00:00"
    }))
}

async fn dashboard(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("user_id").map(String::as_str) {
        Some("ret1") => Json(json!({"products_count": 1, "orders_count": 4, "total_revenue": 250.0}))
            .into_response(),
        _ => (StatusCode::BAD_REQUEST, Json(json!({"detail": "user_id required"}))).into_response(),
    }
}

fn backend(recorded: Recorded) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/purchase/from-wholesaler", post(accept_purchase))
        .route("/api/purchase/test", get(|| async { Json(json!({"message": "purchase route ok"})) }))
        .route("/api/health", get(health))
        .route("/api/dashboard/retailer", get(dashboard))
        .with_state(recorded)
}

/// Serve `router` on an ephemeral port and return its base URL
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn purchase_request() -> PurchaseRequest {
    PurchaseRequest {
        wholesaler_id: "wh1".to_string(),
        product_id: "p_wh_apple".to_string(),
        retailer_id: "ret1".to_string(),
        quantity: 5,
        markup_percent: Decimal::from(20),
    }
}

#[tokio::test]
async fn test_list_products_requests_available_only() {
    let recorded = Recorded::default();
    let client = MarketplaceClient::with_base_url(spawn(backend(recorded.clone())).await);

    let products = client
        .list_products(&ProductQuery::available().with_search("bread"))
        .await
        .unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].price, Decimal::from(70));

    let queries = recorded.product_queries.lock().unwrap();
    assert_eq!(queries[0].get("available_only").map(String::as_str), Some("true"));
    assert_eq!(queries[0].get("search").map(String::as_str), Some("bread"));
}

#[tokio::test]
async fn test_submit_purchase_posts_json_body() {
    let recorded = Recorded::default();
    let client = MarketplaceClient::with_base_url(spawn(backend(recorded.clone())).await);

    let response = client.submit_purchase(&purchase_request()).await.unwrap();
    assert_eq!(response.message.as_deref(), Some("Purchase successful"));

    let purchases = recorded.purchases.lock().unwrap();
    assert_eq!(
        purchases[0],
        json!({
            "wholesaler_id": "wh1",
            "product_id": "p_wh_apple",
            "retailer_id": "ret1",
            "quantity": 5,
            "markup_percent": 20.0
        })
    );
}

#[tokio::test]
async fn test_method_not_allowed_is_classified() {
    // The real backend has no POST route for this path
    let router = Router::new().route(
        "/api/purchase/from-wholesaler",
        get(|| async { Json(json!({"message": "only GET here"})) }),
    );
    let client = MarketplaceClient::with_base_url(spawn(router).await);

    let err = client.submit_purchase(&purchase_request()).await.unwrap_err();
    assert_eq!(err.status(), Some(405));
    assert_eq!(err.category(), FailureCategory::MethodNotAllowed);
    assert_ne!(err.user_message(), FailureCategory::Network.user_message(""));
}

#[tokio::test]
async fn test_structured_detail_is_extracted() {
    let router = Router::new().route(
        "/api/purchase/from-wholesaler",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Insufficient stock for Apple (WH)"})),
            )
        }),
    );
    let client = MarketplaceClient::with_base_url(spawn(router).await);

    let err = client.submit_purchase(&purchase_request()).await.unwrap_err();
    match &err {
        ClientError::Http { status, detail } => {
            assert_eq!(*status, 400);
            assert_eq!(detail, "Insufficient stock for Apple (WH)");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(err.category(), FailureCategory::Generic);
}

#[tokio::test]
async fn test_raw_text_error_body_is_kept() {
    let router = Router::new().route(
        "/api/purchase/from-wholesaler",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
    );
    let client = MarketplaceClient::with_base_url(spawn(router).await);

    let err = client.submit_purchase(&purchase_request()).await.unwrap_err();
    assert_eq!(err.detail(), "Internal Server Error");
    assert_eq!(err.user_message(), "Purchase failed: Internal Server Error");
}

#[tokio::test]
async fn test_unreachable_backend_is_network_failure() {
    // Grab a free port, then close it so nothing is listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = MarketplaceClient::with_base_url(format!("http://{}", addr));
    let err = client.submit_purchase(&purchase_request()).await.unwrap_err();

    assert!(matches!(err, ClientError::Request(_)));
    assert_eq!(err.category(), FailureCategory::Network);
    assert_eq!(err.user_message(), FailureCategory::Network.user_message(""));
}

#[tokio::test]
async fn test_health_route_check_and_dashboard() {
    let client = MarketplaceClient::with_base_url(spawn(backend(Recorded::default())).await);

    let health = client.health().await.unwrap();
    assert!(health.is_healthy());

    let route = client.purchase_route_check().await.unwrap();
    assert_eq!(route["message"], "purchase route ok");

    let stats = client.retailer_dashboard("ret1").await.unwrap();
    assert_eq!(stats.orders_count, 4);
    assert_eq!(stats.total_revenue, Decimal::from(250));

    let err = client.retailer_dashboard("").await.unwrap_err();
    assert_eq!(err.detail(), "user_id required");
}

#[tokio::test]
async fn test_page_end_to_end_over_http() {
    let recorded = Recorded::default();
    let base_url = spawn(backend(recorded.clone())).await;
    let client = MarketplaceClient::new(&ApiConfig {
        base_url,
        timeout_secs: 5,
    })
    .unwrap();

    let mut page = WholesalePurchasePage::new(
        Arc::new(client),
        SessionUser::retailer("ret1"),
        PurchaseConfig {
            redirect_delay_ms: 0,
            ..PurchaseConfig::default()
        },
    );
    page.mount().await;

    match page.list_view() {
        ProductListView::Products(products) => {
            assert_eq!(products.len(), 2);
            assert!(products.iter().all(|p| p.seller_id != "ret1"));
        }
        other => panic!("unexpected view {:?}", other),
    }

    page.select_product("p_wh_milk").unwrap();
    page.set_quantity(3);
    page.submit().await.unwrap();

    assert_eq!(page.form(), &PurchaseForm::default());
    assert_eq!(recorded.product_queries.lock().unwrap().len(), 2);
    assert_eq!(recorded.purchases.lock().unwrap()[0]["product_id"], "p_wh_milk");
    assert_eq!(
        page.follow_navigation().await.as_deref(),
        Some("/retailer/dashboard")
    );
}

#[tokio::test]
async fn test_malformed_catalog_items_do_not_blank_the_grid() {
    let router = Router::new().route(
        "/api/products",
        get(|| async {
            Json(json!([
                {"id": "p_wh_apple", "name": "Apple (WH)", "price": 70.0, "stock": 500,
                 "seller_id": "wh1", "description": null},
                {"id": "p_wh_rice", "name": null, "price": 30.0, "stock": 40, "seller_id": "wh2"},
                {"id": "p_orphan", "name": "Orphan", "price": 10.0, "stock": 5},
                {"id": "p_ret_bread", "name": "Bread (Retail)", "price": 50.0, "stock": 20,
                 "seller_id": "ret1", "description": "Premium bread"}
            ]))
        }),
    );
    let client = MarketplaceClient::with_base_url(spawn(router).await);

    let products = client.list_products(&ProductQuery::available()).await.unwrap();
    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p_wh_apple", "p_wh_rice", "p_ret_bread"]);
    assert!(products[0].description.is_empty());
    assert!(products[1].name.is_empty());

    let mut page = WholesalePurchasePage::new(
        Arc::new(client),
        SessionUser::retailer("ret1"),
        PurchaseConfig::default(),
    );
    page.mount().await;
    assert_eq!(page.products().len(), 2);
    assert!(page.notifications().is_empty());
}

#[tokio::test]
async fn test_empty_success_body_is_default_response() {
    let router = Router::new().route(
        "/api/purchase/from-wholesaler",
        post(|| async { StatusCode::OK }),
    );
    let client = MarketplaceClient::with_base_url(spawn(router).await);

    let response = client.submit_purchase(&purchase_request()).await.unwrap();
    assert_eq!(response, MessageResponse::default());
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_error() {
    let router = Router::new()
        .route(
            "/api/purchase/from-wholesaler",
            post(|| async { "<html>ok</html>" }),
        )
        .route("/api/health", get(|| async { "up" }));
    let client = MarketplaceClient::with_base_url(spawn(router).await);

    let err = client.submit_purchase(&purchase_request()).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    assert_eq!(err.category(), FailureCategory::Generic);

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}
