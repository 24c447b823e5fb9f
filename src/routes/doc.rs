use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
        related::{
            AttachRelatedRequest, RelatedCandidate, RelatedCandidateList, RelatedProductList,
            ReorderRelatedRequest, UpdateRelatedRequest,
        },
    },
    models::{Product, RelatedProduct, User},
    related::surface::{
        EditableColumn, FieldList, FormField, GridFeature, GridField, GridRow, InputKind, Tab,
    },
    response::{ApiResponse, Meta},
    routes::{admin, auth, health, params, products},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        auth::login,
        auth::register,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::list_related_products,
        admin::new_product_fields,
        admin::product_fields,
        admin::list_related_links,
        admin::search_related_candidates,
        admin::attach_related,
        admin::update_related,
        admin::detach_related,
        admin::reorder_related
    ),
    components(
        schemas(
            User,
            Product,
            RelatedProduct,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            RelatedProductList,
            RelatedCandidate,
            RelatedCandidateList,
            AttachRelatedRequest,
            UpdateRelatedRequest,
            ReorderRelatedRequest,
            FieldList,
            Tab,
            FormField,
            GridField,
            GridFeature,
            GridRow,
            EditableColumn,
            InputKind,
            params::Pagination,
            params::ProductQuery,
            params::RelatedQuery,
            params::CandidateQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<RelatedProductList>,
            ApiResponse<RelatedCandidateList>,
            ApiResponse<FieldList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Products", description = "Product catalog and related product reads"),
        (name = "Admin", description = "Related products editor"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
