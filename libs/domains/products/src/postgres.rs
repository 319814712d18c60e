use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr, TransactionTrait,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, ProductFilter, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL-backed ProductRepository.
///
/// Uniqueness of `name` is enforced by the table's unique constraint; the
/// violating write surfaces as a typed SQL error and is mapped to
/// `DuplicateName` without inspecting message strings.
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_write_err(err: DbErr, name: &str) -> ProductError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ProductError::DuplicateName(name.to_string())
        }
        _ => ProductError::Database(err.to_string()),
    }
}

fn db_err(err: DbErr) -> ProductError {
    ProductError::Database(err.to_string())
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let name = input.name.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_err(e, &name))?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mut query = entity::Entity::find();

        if let Some(price_gte) = filter.price_gte {
            query = query.filter(entity::Column::Price.gte(price_gte));
        }

        let models = query
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        // Read-patch-write in one transaction; every error path drops the
        // transaction, which rolls it back and leaves the original row intact.
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = entity::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(ProductError::NotFound(id))?;

        let mut product: Product = model.into();
        product.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            price: Set(product.price),
            quantity: Set(product.quantity),
            description: Set(product.description.clone()),
            category: Set(product.category.clone()),
        };

        let updated = active_model
            .update(&txn)
            .await
            .map_err(|e| map_write_err(e, &product.name))?;

        txn.commit().await.map_err(db_err)?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected > 0 {
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
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn widget_model(id: i32) -> entity::Model {
        entity::Model {
            id,
            name: "Widget".to_string(),
            price: 9.99,
            quantity: 5,
            description: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_get_by_id_maps_row_to_domain_product() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget_model(1)]])
            .into_connection();

        let repo = PgProductRepository::new(db);
        let product = repo.get_by_id(1).await.unwrap().unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.description, None);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();

        let repo = PgProductRepository::new(db);
        assert!(repo.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_maps_all_rows_in_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![widget_model(1), widget_model(2)]])
            .into_connection();

        let repo = PgProductRepository::new(db);
        let products = repo.list(ProductFilter::default()).await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[1].id, 2);
    }
}
