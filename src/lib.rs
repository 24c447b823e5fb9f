pub mod audit;
pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod related;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

use crate::{
    config::AppConfig,
    i18n::Translations,
    related::{HideOutOfStock, RelatedProducts, TraceRelatedProducts},
};

/// Assemble the related-products capability from configuration.
pub async fn build_related_products(config: &AppConfig) -> anyhow::Result<RelatedProducts> {
    let translations = match &config.translations_path {
        Some(path) => Translations::load(path).await?,
        None => Translations::default(),
    };
    tracing::debug!(entries = translations.len(), "translations loaded");

    let mut related = RelatedProducts::new(translations);
    if config.hide_out_of_stock {
        related.register_hook(HideOutOfStock);
    }
    related.register_hook(TraceRelatedProducts);
    Ok(related)
}
