use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{
    products::Model as ProductModel, related_products::Model as RelatedLinkModel,
    users::Model as UserModel,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    /// Internal catalog identifier (SKU).
    pub internal_item_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// A related-product link as seen from its owner: the target product plus
/// the per-link order and display title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RelatedProduct {
    pub link_id: Uuid,
    pub product: Product,
    pub related_order: i32,
    pub related_title: Option<String>,
}

pub fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        internal_item_id: model.internal_item_id,
        name: model.name,
        description: model.description,
        price: model.price,
        stock: model.stock,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub fn related_from_entity(link: RelatedLinkModel, target: ProductModel) -> RelatedProduct {
    RelatedProduct {
        link_id: link.id,
        product: product_from_entity(target),
        related_order: link.related_order,
        related_title: link.related_title,
    }
}

pub fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at.with_timezone(&Utc),
        role: model.role,
    }
}
