//! Product API routes

use axum::Router;
use database::postgres::DatabaseConnection;
use domain_products::{handlers, PgProductRepository, ProductService};

/// Create the products router backed by Postgres
pub fn router(db: &DatabaseConnection) -> Router {
    let repository = PgProductRepository::new(db.clone());
    let service = ProductService::new(repository);
    handlers::router(service)
}
