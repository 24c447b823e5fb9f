use std::sync::Arc;

use crate::{
    db::{DbPool, OrmConn},
    related::RelatedProducts,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub related: Arc<RelatedProducts>,
}
