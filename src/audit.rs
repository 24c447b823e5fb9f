use serde_json::Value;
use uuid::Uuid;

use crate::{db::DbPool, error::AppResult};

/// Writes one row to `audit_logs`. Callers log and swallow failures so that
/// auditing never fails the request it describes.
pub async fn log_audit(
    pool: &DbPool,
    user_id: Option<Uuid>,
    action: &str,
    resource: Option<&str>,
    metadata: Option<Value>,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_logs (id, user_id, action, resource, metadata)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(action)
    .bind(resource)
    .bind(metadata.map(sqlx::types::Json))
    .execute(pool)
    .await?;

    Ok(())
}

/// Audit entry for a change to one product's related links.
pub async fn log_related_change(
    pool: &DbPool,
    user_id: Uuid,
    action: &str,
    product_id: Uuid,
    related_product_id: Option<Uuid>,
) {
    let metadata = serde_json::json!({
        "product_id": product_id,
        "related_product_id": related_product_id,
    });
    if let Err(err) = log_audit(pool, Some(user_id), action, Some("related_products"), Some(metadata)).await {
        tracing::warn!(error = %err, action, "audit log failed");
    }
}
