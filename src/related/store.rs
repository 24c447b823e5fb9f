use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use sea_orm::ActiveValue::NotSet;
use uuid::Uuid;

use crate::{
    entity::{
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
        related_products::{
            ActiveModel as LinkActive, Column as LinkCol, Entity as Links, Model as LinkModel,
        },
    },
    error::{AppError, AppResult},
    models::{RelatedProduct, related_from_entity},
};

use super::RelationStore;

/// `RelationStore` over SeaORM. Borrowing the connection lets the same store
/// run on the pool or inside a caller's transaction.
pub struct OrmRelationStore<'a, C> {
    conn: &'a C,
}

impl<'a, C> OrmRelationStore<'a, C>
where
    C: ConnectionTrait + Sync,
{
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn find_link(&self, owner: Uuid, target: Uuid) -> AppResult<Option<LinkModel>> {
        let link = Links::find()
            .filter(LinkCol::ProductId.eq(owner))
            .filter(LinkCol::RelatedProductId.eq(target))
            .one(self.conn)
            .await?;
        Ok(link)
    }

    /// Link `target` to `owner`, appended after the current last link.
    /// An existing link is kept and only its title replaced. The insert
    /// yields on the `(product_id, related_product_id)` key, so concurrent
    /// attaches of the same pair settle on one row.
    pub async fn attach(
        &self,
        owner: Uuid,
        target: Uuid,
        title: Option<String>,
    ) -> AppResult<LinkModel> {
        let next_order = self.max_order(owner).await?.map_or(1, |max| max + 1);
        let inserted = Links::insert(LinkActive {
            id: Set(Uuid::new_v4()),
            product_id: Set(owner),
            related_product_id: Set(target),
            related_order: Set(next_order),
            related_title: Set(title.clone()),
            created_at: NotSet,
        })
        .on_conflict(
            OnConflict::columns([LinkCol::ProductId, LinkCol::RelatedProductId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.conn)
        .await?;

        let link = match self.find_link(owner, target).await? {
            Some(link) => link,
            None => return Err(AppError::NotFound),
        };
        match title {
            Some(title) if inserted == 0 => self.update_link(link, Some(title), None).await,
            _ => Ok(link),
        }
    }

    pub async fn update_link(
        &self,
        link: LinkModel,
        title: Option<String>,
        order: Option<i32>,
    ) -> AppResult<LinkModel> {
        if title.is_none() && order.is_none() {
            return Ok(link);
        }
        let mut active: LinkActive = link.into();
        if let Some(title) = title {
            active.related_title = Set(Some(title).filter(|t| !t.trim().is_empty()));
        }
        if let Some(order) = order {
            active.related_order = Set(order);
        }
        Ok(active.update(self.conn).await?)
    }

    /// Returns false when the two products were not linked.
    pub async fn detach(&self, owner: Uuid, target: Uuid) -> AppResult<bool> {
        let result = Links::delete_many()
            .filter(LinkCol::ProductId.eq(owner))
            .filter(LinkCol::RelatedProductId.eq(target))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn set_order(&self, link_id: Uuid, order: i32) -> AppResult<()> {
        Links::update_many()
            .col_expr(LinkCol::RelatedOrder, Expr::value(order))
            .filter(LinkCol::Id.eq(link_id))
            .exec(self.conn)
            .await?;
        Ok(())
    }

    /// Products matching `query` on identifier or name that are not yet
    /// linked to `owner`, sorted by identifier.
    pub async fn search_candidates(
        &self,
        owner: Uuid,
        query: &str,
        limit: u64,
    ) -> AppResult<Vec<ProductModel>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let linked: Vec<Uuid> = Links::find()
            .select_only()
            .column(LinkCol::RelatedProductId)
            .filter(LinkCol::ProductId.eq(owner))
            .into_tuple()
            .all(self.conn)
            .await?;

        let pattern = format!("%{}%", query);
        let mut condition = Condition::all().add(
            Condition::any()
                .add(Expr::col(ProdCol::InternalItemId).ilike(pattern.clone()))
                .add(Expr::col(ProdCol::Name).ilike(pattern)),
        );
        if !linked.is_empty() {
            condition = condition.add(ProdCol::Id.is_not_in(linked));
        }

        let products = Products::find()
            .filter(condition)
            .order_by_asc(ProdCol::InternalItemId)
            .limit(limit)
            .all(self.conn)
            .await?;
        Ok(products)
    }

    async fn max_order(&self, owner: Uuid) -> AppResult<Option<i32>> {
        let max: Option<Option<i32>> = Links::find()
            .select_only()
            .column_as(LinkCol::RelatedOrder.max(), "max_order")
            .filter(LinkCol::ProductId.eq(owner))
            .into_tuple()
            .one(self.conn)
            .await?;
        Ok(max.flatten())
    }
}

impl<C> RelationStore for OrmRelationStore<'_, C>
where
    C: ConnectionTrait + Sync,
{
    async fn links(&self, owner: Uuid) -> AppResult<Vec<RelatedProduct>> {
        let rows = Links::find()
            .filter(LinkCol::ProductId.eq(owner))
            .order_by_asc(LinkCol::CreatedAt)
            .order_by_asc(LinkCol::Id)
            .find_also_related(Products)
            .all(self.conn)
            .await?;

        // The target FK cascades, so a missing target only shows up mid-delete.
        Ok(rows
            .into_iter()
            .filter_map(|(link, target)| target.map(|target| related_from_entity(link, target)))
            .collect())
    }

    async fn remove_all(&self, owner: Uuid) -> AppResult<u64> {
        let result = Links::delete_many()
            .filter(LinkCol::ProductId.eq(owner))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected)
    }
}
