use sea_orm::{EntityTrait, TransactionTrait};
use uuid::Uuid;

use crate::{
    audit::log_related_change,
    dto::related::{
        AttachRelatedRequest, RelatedCandidate, RelatedCandidateList, RelatedProductList,
        ReorderRelatedRequest, UpdateRelatedRequest,
    },
    entity::products::Entity as Products,
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Product, product_from_entity},
    related::{
        OrmRelationStore, RelationStore, plan_reorder, sort_by_related_order,
        surface::{AUTOCOMPLETE_RESULTS_LIMIT, FieldList, FormField, candidate_label},
    },
    response::{ApiResponse, Meta},
    routes::params::CandidateQuery,
    services::product_service::find_product,
    state::AppState,
};

const MAIN_TAB: &str = "Root.Main";
const MAIN_TAB_LABEL: (&str, &str) = ("Product.Main", "Main");

/// Admin form for a product: its own fields on the main tab, then whatever
/// the related-products capability adds. `None` describes a product that
/// has not been created yet.
pub async fn product_fields(
    state: &AppState,
    user: &AuthUser,
    id: Option<Uuid>,
) -> AppResult<ApiResponse<FieldList>> {
    ensure_admin(user)?;
    let product = match id {
        Some(id) => Some(find_product(state, id).await?),
        None => None,
    };

    let (key, default) = MAIN_TAB_LABEL;
    let main_title = state.related.translations().translate(key, default);
    let mut fields = base_fields(product.as_ref(), &main_title);
    let store = OrmRelationStore::new(&state.orm);
    state
        .related
        .configure_editing_surface(&store, product.as_ref(), &mut fields)
        .await?;

    Ok(ApiResponse::success("Fields", fields, Some(Meta::empty())))
}

fn base_fields(product: Option<&Product>, main_title: &str) -> FieldList {
    let text = |name: &str, title: &str, value: Option<String>| FormField::Text {
        name: name.to_string(),
        title: title.to_string(),
        value,
    };
    let number = |name: &str, title: &str, value: Option<i64>| FormField::Number {
        name: name.to_string(),
        title: title.to_string(),
        value,
    };

    let mut fields = FieldList::new();
    fields.add_fields_to_tab(
        MAIN_TAB,
        main_title,
        vec![
            text(
                "internal_item_id",
                "Internal Item ID",
                product.map(|p| p.internal_item_id.clone()),
            ),
            text("name", "Name", product.map(|p| p.name.clone())),
            FormField::TextArea {
                name: "description".into(),
                title: "Description".into(),
                value: product.and_then(|p| p.description.clone()),
            },
            number("price", "Price", product.map(|p| p.price)),
            number("stock", "Stock", product.map(|p| i64::from(p.stock))),
        ],
    );
    fields
}

/// Every link of the product in editor order, with no hooks applied.
pub async fn list_links(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<RelatedProductList>> {
    ensure_admin(user)?;
    find_product(state, id).await?;
    let mut links = OrmRelationStore::new(&state.orm).links(id).await?;
    sort_by_related_order(&mut links);
    let meta = Meta::total(links.len());
    Ok(ApiResponse::success(
        "Related products",
        RelatedProductList::new(links),
        Some(meta),
    ))
}

pub async fn search_candidates(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    query: CandidateQuery,
) -> AppResult<ApiResponse<RelatedCandidateList>> {
    ensure_admin(user)?;
    find_product(state, id).await?;

    let q = query.q.unwrap_or_default();
    let items: Vec<RelatedCandidate> = OrmRelationStore::new(&state.orm)
        .search_candidates(id, &q, u64::from(AUTOCOMPLETE_RESULTS_LIMIT))
        .await?
        .into_iter()
        .map(product_from_entity)
        .map(|p| RelatedCandidate {
            label: candidate_label(&p),
            id: p.id,
        })
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Candidates",
        RelatedCandidateList { items },
        Some(meta),
    ))
}

pub async fn attach_related(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: AttachRelatedRequest,
) -> AppResult<ApiResponse<RelatedProductList>> {
    ensure_admin(user)?;
    find_product(state, id).await?;

    let target = Products::find_by_id(payload.related_product_id)
        .one(&state.orm)
        .await?;
    if target.is_none() {
        return Err(AppError::BadRequest("Product not found".into()));
    }

    let title = payload.related_title.filter(|t| !t.trim().is_empty());
    OrmRelationStore::new(&state.orm)
        .attach(id, payload.related_product_id, title)
        .await?;

    log_related_change(
        &state.pool,
        user.user_id,
        "related_attach",
        id,
        Some(payload.related_product_id),
    )
    .await;

    let resp = list_links(state, user, id).await?;
    Ok(ApiResponse { message: "Related product linked".into(), ..resp })
}

pub async fn update_related(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    related_id: Uuid,
    payload: UpdateRelatedRequest,
) -> AppResult<ApiResponse<RelatedProductList>> {
    ensure_admin(user)?;
    let store = OrmRelationStore::new(&state.orm);
    let link = match store.find_link(id, related_id).await? {
        Some(link) => link,
        None => return Err(AppError::NotFound),
    };
    store
        .update_link(link, payload.related_title, payload.related_order)
        .await?;

    log_related_change(&state.pool, user.user_id, "related_update", id, Some(related_id)).await;

    let resp = list_links(state, user, id).await?;
    Ok(ApiResponse { message: "Related product updated".into(), ..resp })
}

/// Removes the link only; the related product itself stays.
pub async fn detach_related(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    related_id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;
    let removed = OrmRelationStore::new(&state.orm)
        .detach(id, related_id)
        .await?;
    if !removed {
        return Err(AppError::NotFound);
    }

    log_related_change(&state.pool, user.user_id, "related_detach", id, Some(related_id)).await;

    Ok(ApiResponse::success(
        "Related product unlinked",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn reorder_related(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: ReorderRelatedRequest,
) -> AppResult<ApiResponse<RelatedProductList>> {
    ensure_admin(user)?;
    find_product(state, id).await?;

    let txn = state.orm.begin().await?;
    let store = OrmRelationStore::new(&txn);
    let current = store.links(id).await?;
    let plan = plan_reorder(&current, &payload.related_product_ids)?;
    for (link_id, order) in plan {
        store.set_order(link_id, order).await?;
    }
    txn.commit().await?;

    log_related_change(&state.pool, user.user_id, "related_reorder", id, None).await;

    let resp = list_links(state, user, id).await?;
    Ok(ApiResponse { message: "Related products reordered".into(), ..resp })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{i18n::Translations, related::RelatedProducts};
    use chrono::Utc;

    #[test]
    fn main_tab_title_is_translated() {
        let related = RelatedProducts::new(
            Translations::from_json_str(r#"{"Product.Main": "Haupt"}"#).unwrap(),
        );
        let (key, default) = MAIN_TAB_LABEL;
        let title = related.translations().translate(key, default);
        let fields = base_fields(None, &title);
        assert_eq!(fields.tab(MAIN_TAB).unwrap().title, "Haupt");

        let fallback = RelatedProducts::default().translations().translate(key, default);
        assert_eq!(fallback, "Main");
    }

    #[test]
    fn new_product_form_has_only_main_tab_without_values() {
        let fields = base_fields(None, "Main");
        assert_eq!(fields.tabs.len(), 1);
        assert_eq!(fields.tabs[0].name, MAIN_TAB);
        assert_eq!(fields.tabs[0].title, "Main");
        assert!(matches!(
            fields.field("name"),
            Some(FormField::Text { value: None, .. })
        ));
    }

    #[test]
    fn existing_product_form_is_prefilled() {
        let product = Product {
            id: Uuid::new_v4(),
            internal_item_id: "FM-001".into(),
            name: "Ferris Mug".into(),
            description: Some("Coffee tastes better with Ferris".into()),
            price: 120000,
            stock: 100,
            created_at: Utc::now(),
        };
        let fields = base_fields(Some(&product), "Main");
        assert_eq!(
            fields.field("internal_item_id"),
            Some(&FormField::Text {
                name: "internal_item_id".into(),
                title: "Internal Item ID".into(),
                value: Some("FM-001".into()),
            })
        );
        assert!(matches!(
            fields.field("stock"),
            Some(FormField::Number { value: Some(100), .. })
        ));
    }
}
