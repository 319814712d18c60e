use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[cfg(test)]
use mockall::automock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductFilter, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product, assigning its id. Fails with `DuplicateName`
    /// when the name is already taken; nothing is stored in that case.
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by id
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// List products matching the filter, in insertion (id) order
    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>>;

    /// Apply the supplied fields to an existing product. Fails with
    /// `NotFound` for an unknown id and `DuplicateName` when the new name
    /// collides with a different product, leaving the row unchanged.
    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by id, returning whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing).
///
/// Mirrors the Postgres semantics: ids are monotonic, name collisions fail
/// the whole operation, and listing follows insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i32, Product>>>,
    next_id: Arc<AtomicI32>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if products.values().any(|p| p.name == input.name) {
            return Err(ProductError::DuplicateName(input.name));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product::new(id, input);
        products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        // BTreeMap iteration is id-ordered, which is insertion order here
        let result = products
            .values()
            .filter(|p| match filter.price_gte {
                Some(threshold) => p.price >= threshold,
                None => true,
            })
            .cloned()
            .collect();

        Ok(result)
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        if !products.contains_key(&id) {
            return Err(ProductError::NotFound(id));
        }

        if let Some(ref new_name) = input.name {
            let name_taken = products.values().any(|p| p.id != id && &p.name == new_name);
            if name_taken {
                return Err(ProductError::DuplicateName(new_name.clone()));
            }
        }

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(name: &str, price: f64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price,
            quantity: 5,
            description: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_get_roundtrips() {
        let repo = InMemoryProductRepository::new();

        let first = repo.insert(create_input("Widget", 9.99)).await.unwrap();
        let second = repo.insert(create_input("Gadget", 4.50)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        let fetched = repo.get_by_id(first.id).await.unwrap();
        assert_eq!(fetched, Some(first));
    }

    #[tokio::test]
    async fn test_duplicate_name_fails_and_leaves_store_unchanged() {
        let repo = InMemoryProductRepository::new();
        repo.insert(create_input("Widget", 9.99)).await.unwrap();

        let result = repo.insert(create_input("Widget", 1.0)).await;
        assert!(matches!(result, Err(ProductError::DuplicateName(_))));

        let all = repo.list(ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price, 9.99);
    }

    #[tokio::test]
    async fn test_update_applies_only_supplied_fields() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(create_input("Widget", 9.99)).await.unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateProduct {
                    price: Some(19.99),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, 19.99);
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.quantity, 5);
    }

    #[tokio::test]
    async fn test_update_rejects_name_collision_with_other_product() {
        let repo = InMemoryProductRepository::new();
        repo.insert(create_input("Widget", 9.99)).await.unwrap();
        let other = repo.insert(create_input("Gadget", 4.50)).await.unwrap();

        let result = repo
            .update(
                other.id,
                UpdateProduct {
                    name: Some("Widget".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ProductError::DuplicateName(_))));

        // Keeping (or re-setting) your own name is not a collision
        let kept = repo
            .update(
                other.id,
                UpdateProduct {
                    name: Some("Gadget".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(kept.is_ok());
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = InMemoryProductRepository::new();

        let result = repo.update(42, UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_succeeds_once_then_reports_missing() {
        let repo = InMemoryProductRepository::new();
        let created = repo.insert(create_input("Widget", 9.99)).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.get_by_id(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_filters_by_price_threshold() {
        let repo = InMemoryProductRepository::new();
        repo.insert(create_input("Cheap", 10.0)).await.unwrap();
        repo.insert(create_input("Pricey", 20.0)).await.unwrap();

        let filtered = repo
            .list(ProductFilter {
                price_gte: Some(15.0),
            })
            .await
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Pricey");

        // Threshold is inclusive
        let inclusive = repo
            .list(ProductFilter {
                price_gte: Some(20.0),
            })
            .await
            .unwrap();
        assert_eq!(inclusive.len(), 1);
    }

    #[tokio::test]
    async fn test_list_returns_empty_vec_when_nothing_matches() {
        let repo = InMemoryProductRepository::new();

        let empty = repo.list(ProductFilter::default()).await.unwrap();
        assert!(empty.is_empty());

        repo.insert(create_input("Widget", 9.99)).await.unwrap();
        let none_match = repo
            .list(ProductFilter {
                price_gte: Some(100.0),
            })
            .await
            .unwrap();
        assert!(none_match.is_empty());
    }
}
