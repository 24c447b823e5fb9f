use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, RelatedProduct};

/// Result of a related-products read. Iterating it does not consume it;
/// asking the capability again yields a fresh list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RelatedProductList {
    #[schema(value_type = Vec<RelatedProduct>)]
    pub items: Vec<RelatedProduct>,
}

impl RelatedProductList {
    pub fn new(items: Vec<RelatedProduct>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RelatedProduct> {
        self.items.iter()
    }

    /// Target products in list order.
    pub fn products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.items.iter().map(|link| &link.product)
    }
}

impl<'a> IntoIterator for &'a RelatedProductList {
    type Item = &'a RelatedProduct;
    type IntoIter = std::slice::Iter<'a, RelatedProduct>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for RelatedProductList {
    type Item = RelatedProduct;
    type IntoIter = std::vec::IntoIter<RelatedProduct>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachRelatedRequest {
    pub related_product_id: Uuid,
    pub related_title: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRelatedRequest {
    pub related_title: Option<String>,
    pub related_order: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReorderRelatedRequest {
    /// Every currently linked target, in the desired order.
    pub related_product_ids: Vec<Uuid>,
}

/// A product offered by the "link existing" search.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RelatedCandidate {
    pub id: Uuid,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RelatedCandidateList {
    #[schema(value_type = Vec<RelatedCandidate>)]
    pub items: Vec<RelatedCandidate>,
}
