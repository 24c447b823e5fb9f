pub mod audit_logs;
pub mod products;
pub mod related_products;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use products::Entity as Products;
pub use related_products::Entity as RelatedProductLinks;
pub use users::Entity as Users;
