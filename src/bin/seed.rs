use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use sea_orm::ActiveValue::NotSet;
use shop_related_products::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        products::{ActiveModel as ProductActive, Column as ProdCol, Entity as Products},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    related::OrmRelationStore,
    services::auth_service::hash_password,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin@example.com", "admin123", "admin").await?;
    let user_id = ensure_user(&orm, "user@example.com", "user1234", "user").await?;
    let hoodie = seed_products(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}, Hoodie ID: {hoodie}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        let mut active: UserActive = existing.into();
        active.role = Set(role.to_string());
        let user = active.update(orm).await?;
        println!("Ensured user {email} (role={role})");
        return Ok(user.id);
    }

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password)?),
        role: Set(role.to_string()),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user.id)
}

/// Seeds the catalog and links a few accessories to the hoodie.
async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<Uuid> {
    let products = [
        ("AH-001", "Axum Hoodie", "Warm hoodie for Rustaceans", 550000, 50),
        ("FM-001", "Ferris Mug", "Coffee tastes better with Ferris", 120000, 100),
        ("RS-001", "Rust Sticker Pack", "Decorate your laptop", 50000, 200),
        ("EB-001", "E-book: Async Rust", "Learn async Rust patterns", 250000, 75),
    ];

    let mut ids = Vec::with_capacity(products.len());
    for (sku, name, desc, price, stock) in products {
        let existing = Products::find()
            .filter(ProdCol::InternalItemId.eq(sku))
            .one(orm)
            .await?;
        let id = match existing {
            Some(p) => p.id,
            None => {
                ProductActive {
                    id: Set(Uuid::new_v4()),
                    internal_item_id: Set(sku.to_string()),
                    name: Set(name.to_string()),
                    description: Set(Some(desc.to_string())),
                    price: Set(price),
                    stock: Set(stock),
                    created_at: NotSet,
                }
                .insert(orm)
                .await?
                .id
            }
        };
        ids.push(id);
    }
    println!("Seeded products");

    let store = OrmRelationStore::new(orm);
    let hoodie = ids[0];
    store.attach(hoodie, ids[1], Some("Pairs well with".into())).await?;
    store.attach(hoodie, ids[2], Some("Accessory".into())).await?;
    store.attach(hoodie, ids[3], Some("Further reading".into())).await?;
    println!("Linked related products");

    Ok(hoodie)
}
