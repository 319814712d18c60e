//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer validates DTOs before any persistence attempt and maps
/// repository outcomes to domain errors.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.insert(input).await
    }

    /// Get a product by id
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List products with an optional minimum-price filter
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        filter
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.list(filter).await
    }

    /// Apply a partial update to an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn widget() -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            price: 9.99,
            quantity: 5,
            description: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_before_persistence() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(CreateProduct {
                name: "Gadget".to_string(),
                price: -1.0,
                quantity: 5,
                description: None,
                category: None,
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_passes_valid_input_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().returning(|input| {
            let mut product = widget();
            product.name = input.name;
            Ok(product)
        });

        let service = ProductService::new(mock_repo);
        let product = service
            .create_product(CreateProduct {
                name: "Widget".to_string(),
                price: 9.99,
                quantity: 5,
                description: None,
                category: None,
            })
            .await
            .unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Widget");
    }

    #[tokio::test]
    async fn test_get_maps_missing_row_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(42).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_list_rejects_negative_threshold_before_persistence() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_list().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .list_products(ProductFilter {
                price_gte: Some(-1.0),
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_present_field_before_persistence() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update_product(
                1,
                UpdateProduct {
                    quantity: Some(-3),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_maps_missing_row_to_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);
        let result = service.delete_product(42).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_succeeds_when_row_removed() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(true));

        let service = ProductService::new(mock_repo);
        assert!(service.delete_product(1).await.is_ok());
    }
}
