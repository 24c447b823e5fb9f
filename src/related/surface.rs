//! Admin form descriptors.
//!
//! The admin frontend renders whatever `FieldList` the API hands it. Grids are
//! assembled from named [`GridFeature`]s through [`RelationEditorConfig`].

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, RelatedProduct};

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct FieldList {
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Tab {
    /// Dotted path such as `Root.Main`.
    pub name: String,
    pub title: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormField {
    Text {
        name: String,
        title: String,
        value: Option<String>,
    },
    TextArea {
        name: String,
        title: String,
        value: Option<String>,
    },
    Number {
        name: String,
        title: String,
        value: Option<i64>,
    },
    Grid(GridField),
}

impl FormField {
    pub fn name(&self) -> &str {
        match self {
            FormField::Text { name, .. }
            | FormField::TextArea { name, .. }
            | FormField::Number { name, .. } => name,
            FormField::Grid(grid) => &grid.name,
        }
    }

    pub fn as_grid(&self) -> Option<&GridField> {
        match self {
            FormField::Grid(grid) => Some(grid),
            _ => None,
        }
    }
}

impl FieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.iter().all(|tab| tab.fields.is_empty())
    }

    /// Append `fields` to the tab at `path`, creating the tab with `title` if
    /// it does not exist yet. An existing tab keeps its title.
    pub fn add_fields_to_tab(&mut self, path: &str, title: impl Into<String>, fields: Vec<FormField>) {
        match self.tabs.iter_mut().find(|tab| tab.name == path) {
            Some(tab) => tab.fields.extend(fields),
            None => self.tabs.push(Tab {
                name: path.to_string(),
                title: title.into(),
                fields,
            }),
        }
    }

    pub fn tab(&self, path: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.name == path)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.tabs
            .iter()
            .flat_map(|tab| tab.fields.iter())
            .find(|field| field.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GridField {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub features: Vec<GridFeature>,
    pub rows: Vec<GridRow>,
}

impl GridField {
    pub fn has_feature(&self, kind: &str) -> bool {
        self.features.iter().any(|f| f.kind() == kind)
    }

    pub fn feature(&self, kind: &str) -> Option<&GridFeature> {
        self.features.iter().find(|f| f.kind() == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct GridRow {
    pub related_product_id: Uuid,
    pub internal_item_id: String,
    pub name: String,
    pub related_title: Option<String>,
    pub related_order: i32,
}

impl From<&RelatedProduct> for GridRow {
    fn from(link: &RelatedProduct) -> Self {
        Self {
            related_product_id: link.product.id,
            internal_item_id: link.product.internal_item_id.clone(),
            name: link.product.name.clone(),
            related_title: link.related_title.clone(),
            related_order: link.related_order,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EditableColumn {
    pub field: String,
    pub input: InputKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "feature", rename_all = "snake_case")]
pub enum GridFeature {
    ToolbarHeader,
    SortableHeader,
    FilterHeader,
    /// Removes the link only; the target record survives.
    UnlinkAction,
    Pagination {
        items_per_page: u32,
    },
    EditableColumns {
        columns: Vec<EditableColumn>,
    },
    AddExistingAutocompleter {
        search_fields: Vec<String>,
        results_format: String,
        results_limit: u32,
    },
    OrderableRows {
        sort_field: String,
    },
}

impl GridFeature {
    pub const TOOLBAR_HEADER: &'static str = "toolbar_header";
    pub const SORTABLE_HEADER: &'static str = "sortable_header";
    pub const FILTER_HEADER: &'static str = "filter_header";
    pub const UNLINK_ACTION: &'static str = "unlink_action";
    pub const PAGINATION: &'static str = "pagination";
    pub const EDITABLE_COLUMNS: &'static str = "editable_columns";
    pub const ADD_EXISTING_AUTOCOMPLETER: &'static str = "add_existing_autocompleter";
    pub const ORDERABLE_ROWS: &'static str = "orderable_rows";

    /// Matches the serialized `feature` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            GridFeature::ToolbarHeader => Self::TOOLBAR_HEADER,
            GridFeature::SortableHeader => Self::SORTABLE_HEADER,
            GridFeature::FilterHeader => Self::FILTER_HEADER,
            GridFeature::UnlinkAction => Self::UNLINK_ACTION,
            GridFeature::Pagination { .. } => Self::PAGINATION,
            GridFeature::EditableColumns { .. } => Self::EDITABLE_COLUMNS,
            GridFeature::AddExistingAutocompleter { .. } => Self::ADD_EXISTING_AUTOCOMPLETER,
            GridFeature::OrderableRows { .. } => Self::ORDERABLE_ROWS,
        }
    }
}

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 20;
pub const AUTOCOMPLETE_RESULTS_LIMIT: u32 = 20;

/// Builds the feature set of a relation grid. Each feature kind appears at
/// most once; adding a kind again replaces the earlier one in place.
#[derive(Debug, Clone, Default)]
pub struct RelationEditorConfig {
    features: Vec<GridFeature>,
}

impl RelationEditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header, filtering, unlinking and paging for a grid over a relation
    /// of existing records. Creating, editing and archiving rows are left
    /// out; callers opt into editable columns and search explicitly.
    pub fn relation_editor() -> Self {
        Self::new()
            .with(GridFeature::ToolbarHeader)
            .with(GridFeature::SortableHeader)
            .with(GridFeature::FilterHeader)
            .with(GridFeature::UnlinkAction)
            .with(GridFeature::Pagination {
                items_per_page: DEFAULT_ITEMS_PER_PAGE,
            })
    }

    pub fn with(mut self, feature: GridFeature) -> Self {
        match self.features.iter_mut().find(|f| f.kind() == feature.kind()) {
            Some(slot) => *slot = feature,
            None => self.features.push(feature),
        }
        self
    }

    pub fn with_if(self, enabled: bool, feature: GridFeature) -> Self {
        if enabled { self.with(feature) } else { self }
    }

    pub fn build(self) -> Vec<GridFeature> {
        self.features
    }
}

/// Label for an autocomplete candidate: `"<internal_item_id> - <name>"`.
pub fn candidate_label(product: &Product) -> String {
    render_results_format(CANDIDATE_FORMAT, product)
}

pub const CANDIDATE_FORMAT: &str = "{internal_item_id} - {name}";

/// Fills `{field}` placeholders in a single pass. Inserted values are never
/// scanned again; unknown placeholders are kept as written.
pub fn render_results_format(format: &str, product: &Product) -> String {
    let mut out = String::with_capacity(format.len() + product.name.len());
    let mut rest = format;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len;
        out.push_str(&rest[..start]);
        match placeholder_value(&rest[start + 1..end], product) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..=end]),
        }
        rest = &rest[end + 1..];
    }
    out.push_str(rest);
    out
}

fn placeholder_value<'a>(field: &str, product: &'a Product) -> Option<&'a str> {
    match field {
        "internal_item_id" => Some(&product.internal_item_id),
        "name" => Some(&product.name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(sku: &str, name: &str) -> Product {
        Product {
            id: Uuid::new_v4(),
            internal_item_id: sku.into(),
            name: name.into(),
            description: None,
            price: 0,
            stock: 1,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn relation_editor_has_no_create_or_edit_affordances() {
        let features = RelationEditorConfig::relation_editor().build();
        let kinds: Vec<_> = features.iter().map(GridFeature::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "toolbar_header",
                "sortable_header",
                "filter_header",
                "unlink_action",
                "pagination"
            ]
        );
    }

    #[test]
    fn adding_same_kind_replaces_in_place() {
        let features = RelationEditorConfig::relation_editor()
            .with(GridFeature::Pagination { items_per_page: 50 })
            .build();
        assert_eq!(features.len(), 5);
        assert_eq!(features[4], GridFeature::Pagination { items_per_page: 50 });
    }

    #[test]
    fn with_if_skips_disabled_features() {
        let features = RelationEditorConfig::new()
            .with_if(
                false,
                GridFeature::OrderableRows {
                    sort_field: "related_order".into(),
                },
            )
            .build();
        assert!(features.is_empty());
    }

    #[test]
    fn add_fields_to_tab_reuses_existing_tab() {
        let mut fields = FieldList::new();
        assert!(fields.is_empty());
        fields.add_fields_to_tab(
            "Root.Main",
            "Main",
            vec![FormField::Text {
                name: "name".into(),
                title: "Name".into(),
                value: None,
            }],
        );
        fields.add_fields_to_tab(
            "Root.Main",
            "Ignored",
            vec![FormField::Number {
                name: "stock".into(),
                title: "Stock".into(),
                value: Some(3),
            }],
        );
        assert_eq!(fields.tabs.len(), 1);
        let tab = fields.tab("Root.Main").unwrap();
        assert_eq!(tab.title, "Main");
        assert_eq!(tab.fields.len(), 2);
        assert!(fields.field("stock").is_some());
        assert!(!fields.is_empty());
    }

    #[test]
    fn candidate_label_joins_identifier_and_name() {
        assert_eq!(
            candidate_label(&product("FM-001", "Ferris Mug")),
            "FM-001 - Ferris Mug"
        );
    }

    #[test]
    fn candidate_label_does_not_expand_placeholders_inside_values() {
        assert_eq!(
            candidate_label(&product("SKU-{name}", "Mug")),
            "SKU-{name} - Mug"
        );
        assert_eq!(
            candidate_label(&product("FM-001", "Mug {internal_item_id}")),
            "FM-001 - Mug {internal_item_id}"
        );
    }

    #[test]
    fn results_format_keeps_unknown_and_unclosed_placeholders() {
        let p = product("FM-001", "Ferris Mug");
        assert_eq!(
            render_results_format("{name} ({price}) {internal_item_id", &p),
            "Ferris Mug ({price}) {internal_item_id"
        );
    }

    #[test]
    fn features_serialize_with_kind_tag() {
        let json = serde_json::to_value(GridFeature::OrderableRows {
            sort_field: "related_order".into(),
        })
        .unwrap();
        assert_eq!(json["feature"], "orderable_rows");
        assert_eq!(json["sort_field"], "related_order");
    }
}
