use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query;

use catalog_core::catalog::{AssociationPair, Category, CategoryInput, CategoryPatch};

use crate::{
    error::ApiError,
    models::{AttachProduct, CategoriesResponse, IncludeQuery},
    state::AppState,
};

/// List a store's categories (GET /stores/{store_id}/categories).
pub async fn list_categories(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.categories.list(&store_id).await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Create a new category (POST /stores/{store_id}/categories).
pub async fn create_category(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Json(input): Json<CategoryInput>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state.categories.create(&store_id, input).await?;

    tracing::info!(store_id = %store_id, category_id = %category.id, "Created category");

    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a single category with derived product ids
/// (GET /stores/{store_id}/categories/{category_id}?include=products).
pub async fn get_category(
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(String, String)>,
    Query(query): Query<IncludeQuery>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .associations
        .category_with_relations(&store_id, &category_id, query.contains("products"))
        .await?;

    Ok(Json(category))
}

/// Update a category (PUT /stores/{store_id}/categories/{category_id}).
pub async fn update_category(
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(String, String)>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Json<Category>, ApiError> {
    let category = state
        .categories
        .update(&store_id, &category_id, patch)
        .await?;

    tracing::info!(store_id = %store_id, category_id = %category_id, "Updated category");

    Ok(Json(category))
}

/// Link a product to a category
/// (POST /stores/{store_id}/categories/{category_id}/products).
pub async fn attach_product(
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(String, String)>,
    Json(body): Json<AttachProduct>,
) -> Result<Json<AssociationPair>, ApiError> {
    let pair = state
        .associations
        .associate(&store_id, &body.product_id, &category_id)
        .await?;

    tracing::info!(
        store_id = %store_id,
        category_id = %category_id,
        product_id = %body.product_id,
        "Associated category with product"
    );

    Ok(Json(pair))
}

/// Unlink a product from a category
/// (DELETE /stores/{store_id}/categories/{category_id}/products/{product_id}).
pub async fn detach_product(
    State(state): State<AppState>,
    Path((store_id, category_id, product_id)): Path<(String, String, String)>,
) -> Result<Json<AssociationPair>, ApiError> {
    let pair = state
        .associations
        .disassociate(&store_id, &product_id, &category_id)
        .await?;

    tracing::info!(
        store_id = %store_id,
        category_id = %category_id,
        product_id = %product_id,
        "Disassociated category from product"
    );

    Ok(Json(pair))
}
