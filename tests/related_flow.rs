use std::sync::Arc;

use shop_related_products::{
    db::{create_pool, orm_from_pool, run_migrations},
    dto::related::{AttachRelatedRequest, ReorderRelatedRequest, UpdateRelatedRequest},
    entity::{
        products::{ActiveModel as ProductActive, Entity as Products, Model as ProductModel},
        related_products::{Column as LinkCol, Entity as Links},
        users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    related::{RELATED_TAB, RELATION_NAME, RelatedProducts, surface::GridFeature},
    routes::params::{CandidateQuery, RelatedQuery},
    services::{product_service, related_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    Statement,
};
use uuid::Uuid;

// Editor flow: link, retitle, reorder, search, read, unlink, then delete the owner.
#[tokio::test]
async fn related_products_editor_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run the related products flow."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;
    let admin = AuthUser {
        user_id: create_user(&state, "admin", "admin@example.com").await?,
        role: "admin".into(),
    };
    let shopper = AuthUser {
        user_id: create_user(&state, "user", "user@example.com").await?,
        role: "user".into(),
    };

    let owner = create_product(&state, "AH-001", "Axum Hoodie").await?;
    let a = create_product(&state, "FM-001", "Ferris Mug").await?;
    let b = create_product(&state, "RS-001", "Rust Sticker Pack").await?;
    let c = create_product(&state, "EB-001", "E-book: Async Rust").await?;

    // Non-admins cannot edit.
    let denied = related_service::attach_related(
        &state,
        &shopper,
        owner.id,
        AttachRelatedRequest {
            related_product_id: a.id,
            related_title: None,
        },
    )
    .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));

    // A single link: grid present, no reordering.
    related_service::attach_related(
        &state,
        &admin,
        owner.id,
        AttachRelatedRequest {
            related_product_id: a.id,
            related_title: Some("Accessory".into()),
        },
    )
    .await?;
    let fields = related_service::product_fields(&state, &admin, Some(owner.id))
        .await?
        .data
        .unwrap();
    let grid = fields
        .field(RELATION_NAME)
        .and_then(|f| f.as_grid())
        .expect("related grid");
    assert!(!grid.has_feature(GridFeature::ORDERABLE_ROWS));

    // Concurrent attaches of the same pair both succeed on a single row.
    let (first, second) = tokio::join!(
        related_service::attach_related(
            &state,
            &admin,
            owner.id,
            AttachRelatedRequest {
                related_product_id: b.id,
                related_title: Some("Upgrade".into()),
            },
        ),
        related_service::attach_related(
            &state,
            &admin,
            owner.id,
            AttachRelatedRequest {
                related_product_id: b.id,
                related_title: None,
            },
        ),
    );
    first?;
    second?;

    // Re-attaching does not duplicate.
    related_service::attach_related(
        &state,
        &admin,
        owner.id,
        AttachRelatedRequest {
            related_product_id: b.id,
            related_title: None,
        },
    )
    .await?;
    let link_count = Links::find()
        .filter(LinkCol::ProductId.eq(owner.id))
        .count(&state.orm)
        .await?;
    assert_eq!(link_count, 2);

    // A(order 2), B(order 1) reads as [B, A].
    related_service::update_related(
        &state,
        &admin,
        owner.id,
        a.id,
        UpdateRelatedRequest {
            related_title: None,
            related_order: Some(2),
        },
    )
    .await?;
    related_service::update_related(
        &state,
        &admin,
        owner.id,
        b.id,
        UpdateRelatedRequest {
            related_title: None,
            related_order: Some(1),
        },
    )
    .await?;

    let read = |limit: Option<usize>, random: bool| {
        product_service::get_related_products(
            &state,
            owner.id,
            RelatedQuery {
                limit,
                random: Some(random),
            },
        )
    };
    let all = read(None, false).await?.data.unwrap();
    let ids: Vec<Uuid> = all.products().map(|p| p.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
    assert_eq!(all.items[0].related_title.as_deref(), Some("Upgrade"));
    assert_eq!(all.items[1].related_title.as_deref(), Some("Accessory"));

    let first = read(Some(1), false).await?.data.unwrap();
    assert_eq!(first.products().map(|p| p.id).collect::<Vec<_>>(), vec![b.id]);

    let mut shuffled: Vec<Uuid> = read(None, true).await?.data.unwrap().products().map(|p| p.id).collect();
    shuffled.sort();
    let mut expected = vec![a.id, b.id];
    expected.sort();
    assert_eq!(shuffled, expected);

    // Two links: the grid can be reordered.
    let fields = related_service::product_fields(&state, &admin, Some(owner.id))
        .await?
        .data
        .unwrap();
    let grid = fields
        .field(RELATION_NAME)
        .and_then(|f| f.as_grid())
        .expect("related grid");
    assert!(grid.has_feature(GridFeature::ORDERABLE_ROWS));
    assert_eq!(grid.rows[0].related_product_id, b.id);

    related_service::reorder_related(
        &state,
        &admin,
        owner.id,
        ReorderRelatedRequest {
            related_product_ids: vec![a.id, b.id],
        },
    )
    .await?;
    let ids: Vec<Uuid> = read(None, false).await?.data.unwrap().products().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);

    // Search skips products that are already linked.
    let candidates = related_service::search_candidates(
        &state,
        &admin,
        owner.id,
        CandidateQuery {
            q: Some("-001".into()),
        },
    )
    .await?
    .data
    .unwrap();
    let labels: Vec<&str> = candidates.items.iter().map(|c| c.label.as_str()).collect();
    assert!(labels.contains(&"EB-001 - E-book: Async Rust"));
    assert!(!candidates.items.iter().any(|cand| cand.id == a.id || cand.id == b.id));
    assert!(candidates.items.iter().any(|cand| cand.id == c.id));

    // Unlink keeps the target product.
    related_service::detach_related(&state, &admin, owner.id, b.id).await?;
    let again = related_service::detach_related(&state, &admin, owner.id, b.id).await;
    assert!(matches!(again, Err(AppError::NotFound)));
    assert!(Products::find_by_id(b.id).one(&state.orm).await?.is_some());

    // Deleting the owner clears its links and nothing else.
    product_service::delete_product(&state, &admin, owner.id).await?;
    let remaining = Links::find()
        .filter(LinkCol::ProductId.eq(owner.id))
        .count(&state.orm)
        .await?;
    assert_eq!(remaining, 0);
    assert!(Products::find_by_id(a.id).one(&state.orm).await?.is_some());

    // A product that does not exist yet gets no related tab.
    let fresh = related_service::product_fields(&state, &admin, None)
        .await?
        .data
        .unwrap();
    assert!(fresh.tab(RELATED_TAB).is_none());

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = orm_from_pool(&pool);
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE related_products, audit_logs, products, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState {
        pool,
        orm,
        related: Arc::new(RelatedProducts::default()),
    })
}

async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}

async fn create_product(state: &AppState, sku: &str, name: &str) -> anyhow::Result<ProductModel> {
    let product = ProductActive {
        id: Set(Uuid::new_v4()),
        internal_item_id: Set(sku.into()),
        name: Set(name.into()),
        description: Set(None),
        price: Set(1000),
        stock: Set(10),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}
