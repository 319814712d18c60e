use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Validator for string fields that must carry content: rejects values that
/// are empty or whitespace-only after trimming.
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("cannot be empty or whitespace-only".into());
        return Err(err);
    }
    Ok(())
}

/// Product entity - an inventory item with a store-assigned id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned by the store on creation
    pub id: i32,
    /// Product name (unique across all products)
    pub name: String,
    /// Unit price, strictly positive
    pub price: f64,
    /// Stock quantity, never negative
    pub quantity: i32,
    /// Optional free-text description
    pub description: Option<String>,
    /// Optional category label
    pub category: Option<String>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub price: f64,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub quantity: i32,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub category: Option<String>,
}

/// DTO for partially updating an existing product.
///
/// Every field is independently present-or-absent; absent fields leave the
/// stored value untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub quantity: Option<i32>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub category: Option<String>,
}

/// Query filters for listing products
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema, IntoParams)]
pub struct ProductFilter {
    /// Only return products with `price >= price_gte`
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub price_gte: Option<f64>,
}

impl Product {
    /// Build a product from a CreateProduct DTO and a store-assigned id
    pub fn new(id: i32, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            description: input.description,
            category: input.category,
        }
    }

    /// Apply the supplied fields of an UpdateProduct DTO, leaving absent
    /// fields at their prior values
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
    }
}
