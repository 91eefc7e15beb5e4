use axum::{
    http::{header, Method, StatusCode},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        categories::{
            attach_product, create_category, detach_product, get_category, list_categories,
            update_category,
        },
        health::{healthz, livez},
        products::{
            attach_category, create_product, detach_category, get_product, list_products,
            update_product,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // Store-scoped API routes
    let api_routes = Router::new()
        // Product routes
        .route(
            "/stores/{store_id}/products",
            get(list_products).post(create_product),
        )
        .route(
            "/stores/{store_id}/products/{product_id}",
            get(get_product).put(update_product),
        )
        .route(
            "/stores/{store_id}/products/{product_id}/categories",
            post(attach_category),
        )
        .route(
            "/stores/{store_id}/products/{product_id}/categories/{category_id}",
            delete(detach_category),
        )
        // Category routes
        .route(
            "/stores/{store_id}/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/stores/{store_id}/categories/{category_id}",
            get(get_category).put(update_category),
        )
        .route(
            "/stores/{store_id}/categories/{category_id}/products",
            post(attach_product),
        )
        .route(
            "/stores/{store_id}/categories/{category_id}/products/{product_id}",
            delete(detach_product),
        )
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .with_state(state)
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use chrono::{DateTime, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use catalog_core::catalog::Product;
    use catalog_core::storage::{keys, CatalogRow, EntityKind, StorageGateway, WriteOp};

    use crate::storage::inmemory::InMemoryGateway;

    use super::*;

    fn test_app() -> (Router, InMemoryGateway) {
        let gateway = InMemoryGateway::new();
        let config = Config {
            table_name: "catalog".to_string(),
            request_timeout_seconds: 10,
        };
        let app = create_app(AppState::new(Arc::new(gateway.clone())), &config);
        (app, gateway)
    }

    async fn request(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_product_in(app: &Router, store_id: &str, name: &str) -> serde_json::Value {
        let (status, json) = request(
            app,
            "POST",
            &format!("/stores/{store_id}/products"),
            Some(serde_json::json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json
    }

    async fn create_category_in(app: &Router, store_id: &str, name: &str) -> serde_json::Value {
        let (status, json) = request(
            app,
            "POST",
            &format!("/stores/{store_id}/categories"),
            Some(serde_json::json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json
    }

    fn parse_time(value: &serde_json::Value) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value.as_str().unwrap())
            .unwrap()
            .with_timezone(&Utc)
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _) = test_app();

        let (status, _) = request(&app, "GET", "/livez", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = request(&app, "GET", "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_product_round_trip() {
        let (app, _) = test_app();

        let product = create_product_in(&app, "store-1", "Mechanical Keyboard").await;
        assert_eq!(product["name"], "Mechanical Keyboard");
        assert_eq!(product["storeId"], "store-1");
        assert_eq!(product["categoryIds"], serde_json::json!([]));
        assert!(!product["id"].as_str().unwrap().is_empty());
        assert!(product.get("createdAt").is_some());
        assert!(product.get("updatedAt").is_none());

        // The point read returns the same entity with an empty derived set.
        let id = product["id"].as_str().unwrap();
        let (status, fetched) =
            request(&app, "GET", &format!("/stores/store-1/products/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], product["id"]);
        assert_eq!(fetched["name"], product["name"]);
        assert_eq!(fetched["categoryIds"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_product_rejects_empty_name() {
        let (app, _) = test_app();

        let (status, json) = request(
            &app,
            "POST",
            "/stores/store-1/products",
            Some(serde_json::json!({ "name": "" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "invalid_input");
        assert!(json["error"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_update_product_merges_fields() {
        let (app, _) = test_app();

        let product = create_product_in(&app, "store-1", "Old name").await;
        let id = product["id"].as_str().unwrap();

        // Make sure the refreshed timestamp is strictly later.
        tokio::time::sleep(Duration::from_millis(5)).await;

        let (status, updated) = request(
            &app,
            "PUT",
            &format!("/stores/store-1/products/{id}"),
            Some(serde_json::json!({ "name": "New name" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "New name");
        assert_eq!(updated["id"], product["id"]);
        assert_eq!(updated["storeId"], product["storeId"]);
        assert_eq!(updated["createdAt"], product["createdAt"]);
        assert!(parse_time(&updated["updatedAt"]) > parse_time(&product["createdAt"]));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let (app, _) = test_app();

        let (status, json) = request(
            &app,
            "PUT",
            "/stores/store-1/products/does-not-exist",
            Some(serde_json::json!({ "name": "New name" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["kind"], "not_found");
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let (app, _) = test_app();

        let (status, _) = request(
            &app,
            "GET",
            "/stores/store-1/products/does-not-exist",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_products_is_store_scoped() {
        let (app, gateway) = test_app();

        let product = create_product_in(&app, "store-a", "Keyboard").await;
        let id = product["id"].as_str().unwrap();

        // Another store holding an entity with the exact same id must not
        // leak into store-a's listing.
        gateway
            .put(CatalogRow::Product(
                Product::new("store-b", "Impostor").with_id(id),
            ))
            .await
            .unwrap();

        let (status, json) = request(&app, "GET", "/stores/store-a/products", None).await;
        assert_eq!(status, StatusCode::OK);

        let products = json["products"].as_array().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0]["storeId"], "store-a");
        assert_eq!(products[0]["name"], "Keyboard");
    }

    #[tokio::test]
    async fn test_list_is_empty_not_absent() {
        let (app, _) = test_app();

        let (status, json) = request(&app, "GET", "/stores/store-1/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["products"], serde_json::json!([]));

        let (status, json) = request(&app, "GET", "/stores/store-1/categories", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["categories"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_associate_links_both_sides() {
        let (app, _) = test_app();

        let product = create_product_in(&app, "store-1", "Keyboard").await;
        let category = create_category_in(&app, "store-1", "Peripherals").await;
        let product_id = product["id"].as_str().unwrap();
        let category_id = category["id"].as_str().unwrap();

        let (status, pair) = request(
            &app,
            "POST",
            &format!("/stores/store-1/products/{product_id}/categories"),
            Some(serde_json::json!({ "categoryId": category_id })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(pair["product"]["id"], product["id"]);
        assert_eq!(pair["category"]["id"], category["id"]);

        let (_, hydrated) = request(
            &app,
            "GET",
            &format!("/stores/store-1/products/{product_id}"),
            None,
        )
        .await;
        assert_eq!(
            hydrated["categoryIds"],
            serde_json::json!([category_id])
        );

        let (_, hydrated) = request(
            &app,
            "GET",
            &format!("/stores/store-1/categories/{category_id}"),
            None,
        )
        .await;
        assert_eq!(hydrated["productIds"], serde_json::json!([product_id]));
    }

    #[tokio::test]
    async fn test_disassociate_is_idempotent() {
        let (app, _) = test_app();

        let product = create_product_in(&app, "store-1", "Keyboard").await;
        let category = create_category_in(&app, "store-1", "Peripherals").await;
        let product_id = product["id"].as_str().unwrap();
        let category_id = category["id"].as_str().unwrap();

        request(
            &app,
            "POST",
            &format!("/stores/store-1/products/{product_id}/categories"),
            Some(serde_json::json!({ "categoryId": category_id })),
        )
        .await;

        let unlink_uri =
            format!("/stores/store-1/products/{product_id}/categories/{category_id}");

        let (status, pair) = request(&app, "DELETE", &unlink_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pair["product"]["id"], product["id"]);

        // Unlinking an already-unlinked pair succeeds as a no-op.
        let (status, _) = request(&app, "DELETE", &unlink_uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, hydrated) = request(
            &app,
            "GET",
            &format!("/stores/store-1/products/{product_id}"),
            None,
        )
        .await;
        assert_eq!(hydrated["categoryIds"], serde_json::json!([]));

        let (_, hydrated) = request(
            &app,
            "GET",
            &format!("/stores/store-1/categories/{category_id}"),
            None,
        )
        .await;
        assert_eq!(hydrated["productIds"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_include_categories_expands_entities() {
        let (app, gateway) = test_app();

        let product = create_product_in(&app, "store-1", "Keyboard").await;
        let c1 = create_category_in(&app, "store-1", "Peripherals").await;
        let c2 = create_category_in(&app, "store-1", "Sale").await;
        let product_id = product["id"].as_str().unwrap();

        for category in [&c1, &c2] {
            request(
                &app,
                "POST",
                &format!("/stores/store-1/products/{product_id}/categories"),
                Some(serde_json::json!({ "categoryId": category["id"] })),
            )
            .await;
        }

        let include_uri =
            format!("/stores/store-1/products/{product_id}?include=categories");
        let (status, hydrated) = request(&app, "GET", &include_uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let mut ids: Vec<&str> = hydrated["categoryIds"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        ids.sort_unstable();
        let mut expected = vec![c1["id"].as_str().unwrap(), c2["id"].as_str().unwrap()];
        expected.sort_unstable();
        assert_eq!(ids, expected);
        assert_eq!(hydrated["categories"].as_array().unwrap().len(), 2);

        // Delete one category row out from under its still-present link: the
        // derived id survives, the nested entity is dropped.
        gateway
            .transact_write(vec![WriteOp::Delete(keys::entity_key(
                "store-1",
                EntityKind::Category,
                c1["id"].as_str().unwrap(),
            ))])
            .await
            .unwrap();

        let (_, hydrated) = request(&app, "GET", &include_uri, None).await;
        assert_eq!(hydrated["categoryIds"].as_array().unwrap().len(), 2);

        let nested = hydrated["categories"].as_array().unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0]["id"], c2["id"]);
    }

    #[tokio::test]
    async fn test_include_without_links_omits_nested_sequence() {
        let (app, _) = test_app();

        let product = create_product_in(&app, "store-1", "Keyboard").await;
        let id = product["id"].as_str().unwrap();

        let (status, hydrated) = request(
            &app,
            "GET",
            &format!("/stores/store-1/products/{id}?include=categories"),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(hydrated["categoryIds"], serde_json::json!([]));
        assert!(hydrated.get("categories").is_none());
    }

    #[tokio::test]
    async fn test_associate_with_missing_category_still_links() {
        let (app, _) = test_app();

        let product = create_product_in(&app, "store-1", "Keyboard").await;
        let product_id = product["id"].as_str().unwrap();

        let (status, pair) = request(
            &app,
            "POST",
            &format!("/stores/store-1/products/{product_id}/categories"),
            Some(serde_json::json!({ "categoryId": "ghost" })),
        )
        .await;

        // The link is created; the missing side is simply absent.
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pair["product"]["id"], product["id"]);
        assert!(pair.get("category").is_none());

        let (_, hydrated) = request(
            &app,
            "GET",
            &format!("/stores/store-1/products/{product_id}"),
            None,
        )
        .await;
        assert_eq!(hydrated["categoryIds"], serde_json::json!(["ghost"]));
    }

    #[tokio::test]
    async fn test_category_routes_mirror_products() {
        let (app, _) = test_app();

        let product = create_product_in(&app, "store-1", "Keyboard").await;
        let category = create_category_in(&app, "store-1", "Peripherals").await;
        let product_id = product["id"].as_str().unwrap();
        let category_id = category["id"].as_str().unwrap();

        // Associate from the category side.
        let (status, pair) = request(
            &app,
            "POST",
            &format!("/stores/store-1/categories/{category_id}/products"),
            Some(serde_json::json!({ "productId": product_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(pair["product"]["id"], product["id"]);
        assert_eq!(pair["category"]["id"], category["id"]);

        let (status, hydrated) = request(
            &app,
            "GET",
            &format!("/stores/store-1/categories/{category_id}?include=products"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hydrated["productIds"], serde_json::json!([product_id]));
        let nested = hydrated["products"].as_array().unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0]["id"], product["id"]);

        // And disassociate from the category side.
        let (status, _) = request(
            &app,
            "DELETE",
            &format!("/stores/store-1/categories/{category_id}/products/{product_id}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, hydrated) = request(
            &app,
            "GET",
            &format!("/stores/store-1/categories/{category_id}"),
            None,
        )
        .await;
        assert_eq!(hydrated["productIds"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_update_category_refreshes_updated_at() {
        let (app, _) = test_app();

        let category = create_category_in(&app, "store-1", "Peripherals").await;
        let id = category["id"].as_str().unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let (status, updated) = request(
            &app,
            "PUT",
            &format!("/stores/store-1/categories/{id}"),
            Some(serde_json::json!({ "name": "Accessories" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Accessories");
        assert_eq!(updated["createdAt"], category["createdAt"]);
        assert!(parse_time(&updated["updatedAt"]) > parse_time(&category["updatedAt"]));
    }
}
