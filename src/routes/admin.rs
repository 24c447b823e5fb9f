use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, put},
};
use uuid::Uuid;

use crate::{
    dto::related::{
        AttachRelatedRequest, RelatedCandidateList, RelatedProductList, ReorderRelatedRequest,
        UpdateRelatedRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    related::surface::FieldList,
    response::ApiResponse,
    routes::params::CandidateQuery,
    services::related_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products/new/fields", get(new_product_fields))
        .route("/products/{id}/fields", get(product_fields))
        .route(
            "/products/{id}/related",
            get(list_related_links).post(attach_related),
        )
        .route("/products/{id}/related/search", get(search_related_candidates))
        .route("/products/{id}/related/order", put(reorder_related))
        .route(
            "/products/{id}/related/{related_id}",
            patch(update_related).delete(detach_related),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/products/new/fields",
    responses(
        (status = 200, description = "Form for a product that is not saved yet", body = ApiResponse<FieldList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn new_product_fields(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<FieldList>>> {
    let resp = related_service::product_fields(&state, &user, None).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}/fields",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product form including the related products grid", body = ApiResponse<FieldList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn product_fields(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FieldList>>> {
    let resp = related_service::product_fields(&state, &user, Some(id)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}/related",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Every related link in editor order", body = ApiResponse<RelatedProductList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_related_links(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<RelatedProductList>>> {
    let resp = related_service::list_links(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}/related/search",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        CandidateQuery
    ),
    responses(
        (status = 200, description = "Products that can be linked", body = ApiResponse<RelatedCandidateList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn search_related_candidates(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<CandidateQuery>,
) -> AppResult<Json<ApiResponse<RelatedCandidateList>>> {
    let resp = related_service::search_candidates(&state, &user, id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/products/{id}/related",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = AttachRelatedRequest,
    responses(
        (status = 200, description = "Link an existing product", body = ApiResponse<RelatedProductList>),
        (status = 400, description = "Related product not found"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn attach_related(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AttachRelatedRequest>,
) -> AppResult<Json<ApiResponse<RelatedProductList>>> {
    let resp = related_service::attach_related(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/products/{id}/related/{related_id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("related_id" = Uuid, Path, description = "Related product ID")
    ),
    request_body = UpdateRelatedRequest,
    responses(
        (status = 200, description = "Edit title or order of a link", body = ApiResponse<RelatedProductList>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not linked"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_related(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, related_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateRelatedRequest>,
) -> AppResult<Json<ApiResponse<RelatedProductList>>> {
    let resp = related_service::update_related(&state, &user, id, related_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}/related/{related_id}",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("related_id" = Uuid, Path, description = "Related product ID")
    ),
    responses(
        (status = 200, description = "Unlink; the related product itself is kept"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not linked"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn detach_related(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, related_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = related_service::detach_related(&state, &user, id, related_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}/related/order",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ReorderRelatedRequest,
    responses(
        (status = 200, description = "Reordered links", body = ApiResponse<RelatedProductList>),
        (status = 400, description = "Fewer than two links, or ids do not match"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn reorder_related(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReorderRelatedRequest>,
) -> AppResult<Json<ApiResponse<RelatedProductList>>> {
    let resp = related_service::reorder_related(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
