use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppError, models::Product};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub internal_item_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.internal_item_id.trim().is_empty() {
            return Err(AppError::BadRequest("internal_item_id must not be empty".into()));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".into()));
        }
        if self.price < 0 {
            return Err(AppError::BadRequest("price must not be negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub internal_item_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i32>,
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(sku: &str, name: &str, price: i64) -> CreateProductRequest {
        CreateProductRequest {
            internal_item_id: sku.into(),
            name: name.into(),
            description: None,
            price,
            stock: 1,
        }
    }

    #[test]
    fn create_requires_identifier_and_name() {
        assert!(request("FM-1", "Ferris Mug", 100).validate().is_ok());
        assert!(request(" ", "Ferris Mug", 100).validate().is_err());
        assert!(request("FM-1", "", 100).validate().is_err());
        assert!(request("FM-1", "Ferris Mug", -1).validate().is_err());
    }
}
