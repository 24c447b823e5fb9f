use crate::models::RelatedProduct;

/// Observer for related-product reads. Runs after ordering and limiting,
/// and may reorder, filter or replace the list.
pub trait UpdateRelatedProducts: Send + Sync {
    fn update_related_products(
        &self,
        items: &mut Vec<RelatedProduct>,
        limit: Option<usize>,
        random: bool,
    );
}

impl<F> UpdateRelatedProducts for F
where
    F: Fn(&mut Vec<RelatedProduct>, Option<usize>, bool) + Send + Sync,
{
    fn update_related_products(
        &self,
        items: &mut Vec<RelatedProduct>,
        limit: Option<usize>,
        random: bool,
    ) {
        self(items, limit, random)
    }
}

/// Emits one debug event per read.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceRelatedProducts;

impl UpdateRelatedProducts for TraceRelatedProducts {
    fn update_related_products(
        &self,
        items: &mut Vec<RelatedProduct>,
        limit: Option<usize>,
        random: bool,
    ) {
        tracing::debug!(count = items.len(), ?limit, random, "related products read");
    }
}

/// Drops targets that cannot be bought right now.
#[derive(Debug, Default, Clone, Copy)]
pub struct HideOutOfStock;

impl UpdateRelatedProducts for HideOutOfStock {
    fn update_related_products(
        &self,
        items: &mut Vec<RelatedProduct>,
        _limit: Option<usize>,
        _random: bool,
    ) {
        items.retain(|link| link.product.stock > 0);
    }
}
