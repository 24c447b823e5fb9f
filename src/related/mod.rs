//! Ordered "related products" relation between products.
//!
//! [`RelatedProducts`] is the capability the rest of the service talks to: it
//! reads links through a [`RelationStore`], orders or shuffles them, runs the
//! registered [`UpdateRelatedProducts`] hooks, describes the admin grid and
//! clears an owner's links before the owner is deleted.

mod hooks;
pub mod store;
pub mod surface;

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use rand::seq::SliceRandom;
use uuid::Uuid;

pub use hooks::{HideOutOfStock, TraceRelatedProducts, UpdateRelatedProducts};
pub use store::OrmRelationStore;

use crate::{
    dto::related::RelatedProductList,
    error::{AppError, AppResult},
    i18n::Translations,
    models::{Product, RelatedProduct},
};
use surface::{
    AUTOCOMPLETE_RESULTS_LIMIT, CANDIDATE_FORMAT, EditableColumn, FieldList, FormField,
    GridFeature, GridField, GridRow, InputKind, RelationEditorConfig,
};

pub const RELATION_NAME: &str = "RelatedProductsRelation";
pub const RELATED_TAB: &str = "Root.Related";
pub const ORDER_FIELD: &str = "related_order";
pub const TITLE_FIELD: &str = "related_title";
pub const SEARCH_FIELDS: [&str; 2] = ["internal_item_id", "name"];

const TAB_LABEL: (&str, &str) = ("HasRelatedProducts.Related", "Related");
const GRID_TITLE: (&str, &str) = (
    "HasRelatedProducts.RelatedProductsRelation",
    "Related Products",
);
const GRID_DESCRIPTION: (&str, &str) = (
    "HasRelatedProducts.Description",
    "Link related products using the search field top right and then add a title for this related product.  Drag and drop to reorder.",
);

/// Persistence of an owner's outgoing links.
pub trait RelationStore: Sync {
    /// Every link owned by `owner`, in storage order.
    fn links(&self, owner: Uuid) -> impl Future<Output = AppResult<Vec<RelatedProduct>>> + Send;

    /// Delete every link owned by `owner`, returning how many went.
    fn remove_all(&self, owner: Uuid) -> impl Future<Output = AppResult<u64>> + Send;
}

pub struct RelatedProducts {
    hooks: Vec<Arc<dyn UpdateRelatedProducts>>,
    translations: Arc<Translations>,
}

impl Default for RelatedProducts {
    fn default() -> Self {
        Self::new(Translations::default())
    }
}

impl RelatedProducts {
    pub fn new(translations: Translations) -> Self {
        Self {
            hooks: Vec::new(),
            translations: Arc::new(translations),
        }
    }

    pub fn with_hook(mut self, hook: impl UpdateRelatedProducts + 'static) -> Self {
        self.register_hook(hook);
        self
    }

    /// Hooks run in registration order.
    pub fn register_hook(&mut self, hook: impl UpdateRelatedProducts + 'static) {
        self.hooks.push(Arc::new(hook));
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Links of `owner`, sorted by `related_order` (or shuffled when `random`),
    /// truncated to `limit`, then passed through the hooks.
    pub async fn get_related_products<S: RelationStore>(
        &self,
        store: &S,
        owner: Uuid,
        limit: Option<usize>,
        random: bool,
    ) -> AppResult<RelatedProductList> {
        let mut items = store.links(owner).await?;

        if random {
            shuffle(&mut items);
        } else {
            sort_by_related_order(&mut items);
        }

        if let Some(limit) = limit {
            items.truncate(limit);
        }

        for hook in &self.hooks {
            hook.update_related_products(&mut items, limit, random);
        }

        Ok(RelatedProductList::new(items))
    }

    /// Add the "Related" tab with the relation grid. Products that have not
    /// been saved yet get nothing.
    pub async fn configure_editing_surface<S: RelationStore>(
        &self,
        store: &S,
        owner: Option<&Product>,
        fields: &mut FieldList,
    ) -> AppResult<()> {
        let Some(owner) = owner else {
            return Ok(());
        };

        let mut links = store.links(owner.id).await?;
        sort_by_related_order(&mut links);

        let features = RelationEditorConfig::relation_editor()
            .with(GridFeature::EditableColumns {
                columns: vec![EditableColumn {
                    field: TITLE_FIELD.to_string(),
                    input: InputKind::Text,
                }],
            })
            .with(GridFeature::AddExistingAutocompleter {
                search_fields: SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
                results_format: CANDIDATE_FORMAT.to_string(),
                results_limit: AUTOCOMPLETE_RESULTS_LIMIT,
            })
            .with_if(
                links.len() > 1,
                GridFeature::OrderableRows {
                    sort_field: ORDER_FIELD.to_string(),
                },
            )
            .build();

        let grid = GridField {
            name: RELATION_NAME.to_string(),
            title: self.label(GRID_TITLE),
            description: Some(self.label(GRID_DESCRIPTION)),
            features,
            rows: links.iter().map(GridRow::from).collect(),
        };

        fields.add_fields_to_tab(RELATED_TAB, self.label(TAB_LABEL), vec![FormField::Grid(grid)]);
        Ok(())
    }

    /// Remove every link the owner has. Target products are untouched.
    pub async fn on_before_delete<S: RelationStore>(&self, store: &S, owner: Uuid) -> AppResult<u64> {
        let removed = store.remove_all(owner).await?;
        if removed > 0 {
            tracing::debug!(product_id = %owner, removed, "related product links removed");
        }
        Ok(removed)
    }

    fn label(&self, (key, default): (&str, &str)) -> String {
        self.translations.translate(key, default)
    }
}

/// Stable: links sharing an order keep their storage order.
pub fn sort_by_related_order(items: &mut [RelatedProduct]) {
    items.sort_by_key(|link| link.related_order);
}

fn shuffle(items: &mut [RelatedProduct]) {
    items.shuffle(&mut rand::thread_rng());
}

/// Turn a requested target order into `(link_id, related_order)` updates.
///
/// Reordering needs at least two links, and `ordered_targets` must list each
/// current target exactly once. Orders are assigned from 1.
pub fn plan_reorder(
    current: &[RelatedProduct],
    ordered_targets: &[Uuid],
) -> AppResult<Vec<(Uuid, i32)>> {
    if current.len() < 2 {
        return Err(AppError::BadRequest(
            "reordering needs at least two related products".into(),
        ));
    }
    if ordered_targets.len() != current.len() {
        return Err(AppError::BadRequest(format!(
            "expected {} related products, got {}",
            current.len(),
            ordered_targets.len()
        )));
    }

    let mut seen = HashSet::with_capacity(ordered_targets.len());
    let mut plan = Vec::with_capacity(ordered_targets.len());
    for (position, target) in ordered_targets.iter().enumerate() {
        if !seen.insert(*target) {
            return Err(AppError::BadRequest(format!(
                "product {target} listed more than once"
            )));
        }
        let link = current
            .iter()
            .find(|link| link.product.id == *target)
            .ok_or_else(|| AppError::BadRequest(format!("product {target} is not related")))?;
        plan.push((link.link_id, position as i32 + 1));
    }
    Ok(plan)
}
