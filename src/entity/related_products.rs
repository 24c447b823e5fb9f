use sea_orm::entity::prelude::*;

/// Join record between a source product and one of its related products.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "related_products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub related_product_id: Uuid,
    pub related_order: i32,
    pub related_title: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "Restrict"
    )]
    Source,
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::RelatedProductId",
        to = "super::products::Column::Id",
        on_delete = "Cascade"
    )]
    Target,
}

// `find_also_related` resolves the target side of the link.
impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Target.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
