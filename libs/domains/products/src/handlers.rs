use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use axum_helpers::{AppError, ErrorResponse, ValidatedJson};
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::error::ProductError;
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI tag for product endpoints
const TAG: &str = "Products";

/// Acknowledgment body for a successful delete
#[derive(Serialize, ToSchema)]
pub struct DeleteAck {
    pub message: String,
}

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(schemas(Product, CreateProduct, UpdateProduct, DeleteAck, ErrorResponse)),
    tags(
        (name = TAG, description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List products with an optional minimum-price filter
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "Matching products (possibly empty)", body = Vec<Product>),
        (status = 422, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Unexpected persistence failure", body = ErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = service.list_products(filter).await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 400, description = "Duplicate product name", body = ErrorResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Unexpected persistence failure", body = ErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> Result<Json<Product>, AppError> {
    match service.create_product(input).await {
        Ok(product) => Ok(Json(product)),
        Err(ProductError::DuplicateName(name)) => {
            tracing::warn!(%name, "rejected create: duplicate product name");
            Err(AppError::BadRequest(
                "Product creation failed due to duplicate name.".to_string(),
            ))
        }
        Err(err @ ProductError::Validation(_)) => Err(err.into()),
        Err(err) => {
            tracing::error!(error = %err, "product creation failed");
            Err(AppError::InternalServerError(
                "An error occurred while creating the product.".to_string(),
            ))
        }
    }
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Unexpected persistence failure", body = ErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<i32>,
) -> Result<Json<Product>, AppError> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Partially update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Duplicate product name", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 422, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Unexpected persistence failure", body = ErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> Result<Json<Product>, AppError> {
    match service.update_product(id, input).await {
        Ok(product) => Ok(Json(product)),
        Err(ProductError::DuplicateName(name)) => {
            tracing::warn!(%name, "rejected update: duplicate product name");
            Err(AppError::BadRequest(
                "Update failed due to duplicate name.".to_string(),
            ))
        }
        Err(err) => Err(err.into()),
    }
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteAck),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Unexpected persistence failure", body = ErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteAck>, AppError> {
    service.delete_product(id).await?;

    Ok(Json(DeleteAck {
        message: "Product deleted successfully".to_string(),
    }))
}
