use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query;

use catalog_core::catalog::{AssociationPair, Product, ProductInput, ProductPatch};

use crate::{
    error::ApiError,
    models::{AttachCategory, IncludeQuery, ProductsResponse},
    state::AppState,
};

/// List a store's products (GET /stores/{store_id}/products).
pub async fn list_products(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let products = state.products.list(&store_id).await?;
    Ok(Json(ProductsResponse { products }))
}

/// Create a new product (POST /stores/{store_id}/products).
pub async fn create_product(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.products.create(&store_id, input).await?;

    tracing::info!(store_id = %store_id, product_id = %product.id, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a single product with derived category ids
/// (GET /stores/{store_id}/products/{product_id}?include=categories).
pub async fn get_product(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(String, String)>,
    Query(query): Query<IncludeQuery>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .associations
        .product_with_relations(&store_id, &product_id, query.contains("categories"))
        .await?;

    Ok(Json(product))
}

/// Update a product (PUT /stores/{store_id}/products/{product_id}).
pub async fn update_product(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(String, String)>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.update(&store_id, &product_id, patch).await?;

    tracing::info!(store_id = %store_id, product_id = %product_id, "Updated product");

    Ok(Json(product))
}

/// Link a category to a product
/// (POST /stores/{store_id}/products/{product_id}/categories).
pub async fn attach_category(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(String, String)>,
    Json(body): Json<AttachCategory>,
) -> Result<Json<AssociationPair>, ApiError> {
    let pair = state
        .associations
        .associate(&store_id, &product_id, &body.category_id)
        .await?;

    tracing::info!(
        store_id = %store_id,
        product_id = %product_id,
        category_id = %body.category_id,
        "Associated product with category"
    );

    Ok(Json(pair))
}

/// Unlink a category from a product
/// (DELETE /stores/{store_id}/products/{product_id}/categories/{category_id}).
pub async fn detach_category(
    State(state): State<AppState>,
    Path((store_id, product_id, category_id)): Path<(String, String, String)>,
) -> Result<Json<AssociationPair>, ApiError> {
    let pair = state
        .associations
        .disassociate(&store_id, &product_id, &category_id)
        .await?;

    tracing::info!(
        store_id = %store_id,
        product_id = %product_id,
        category_id = %category_id,
        "Disassociated product from category"
    );

    Ok(Json(pair))
}
