use crate::error::StoreResult;
use crate::models::{Product, SortKey};
use crate::store::Store;

use super::components::ProductForm;

/// The query feeding the table browser: one of the catalog views the
/// store can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    All,
    Search(String),
    Category(String),
    Location(String),
    LowStock(i64),
}

impl Dataset {
    /// Short description for the header line.
    pub fn describe(&self) -> String {
        match self {
            Dataset::All => "All products".to_string(),
            Dataset::Search(term) => format!("Search '{}'", term),
            Dataset::Category(category) => format!("Category '{}'", category),
            Dataset::Location(location) => format!("Location '{}'", location),
            Dataset::LowStock(threshold) => format!("Quantity <= {}", threshold),
        }
    }

    /// Runs the matching store query. The low-stock view keeps its own
    /// quantity ordering and ignores the sort settings.
    pub fn load(
        &self,
        store: &Store,
        sort: Option<SortKey>,
        descending: bool,
    ) -> StoreResult<Vec<Product>> {
        match self {
            Dataset::All => store.list(sort, descending),
            Dataset::Search(term) => store.search(term, sort, descending),
            Dataset::Category(category) => store.filter_by_category(category, sort, descending),
            Dataset::Location(location) => store.filter_by_location(location, sort, descending),
            Dataset::LowStock(threshold) => store.low_stock(*threshold),
        }
    }
}

/// A single-line input request at the bottom of the table browser.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    Search,
    FilterMenu,
    FilterCategory,
    FilterLocation,
    FilterThreshold,
    SortField,
    ExportFile,
    ConfirmDelete { id: i64, code: String },
}

impl Prompt {
    pub fn label(&self) -> String {
        match self {
            Prompt::Search => "Search (code or name): ".to_string(),
            Prompt::FilterMenu => {
                "Filter: 1 = category, 2 = location, 3 = low stock, 0 = clear: ".to_string()
            }
            Prompt::FilterCategory => "Category: ".to_string(),
            Prompt::FilterLocation => "Location: ".to_string(),
            Prompt::FilterThreshold => "Low-stock threshold: ".to_string(),
            Prompt::SortField => {
                "Sort by (id, code, name, quantity, price, category, location; empty for default): "
                    .to_string()
            }
            Prompt::ExportFile => "Export filename (empty for default): ".to_string(),
            Prompt::ConfirmDelete { code, .. } => format!("Delete product '{}'? (y/N): ", code),
        }
    }
}

/// State of the keyboard-driven table browser.
pub struct BrowserState {
    pub rows: Vec<Product>,
    pub selected: usize,
    pub sort: Option<SortKey>,
    pub descending: bool,
    pub dataset: Dataset,
    pub status: String,
    pub prompt: Option<Prompt>,
    pub prompt_input: String,
    pub form: Option<ProductForm>,
    pub details: Option<Product>,
    pub scroll_to_selected: bool,
    pub needs_reload: bool,
}

impl Default for BrowserState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            sort: None,
            descending: false,
            dataset: Dataset::All,
            status: String::new(),
            prompt: None,
            prompt_input: String::new(),
            form: None,
            details: None,
            scroll_to_selected: false,
            needs_reload: true,
        }
    }
}

/// State of the management window.
pub struct ManagerState {
    pub search: String,
    pub category_filter: String,
    pub location_filter: String,
    pub low_stock_limit: Option<i64>,
    pub sort: Option<SortKey>,
    pub descending: bool,
    pub selected: Option<i64>,
    pub products: Vec<Product>,
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub total_value: f64,
    pub status: String,
    pub form: Option<ProductForm>,
    pub confirm_delete: Option<(i64, String)>,
    pub threshold_input: Option<String>,
    pub focus_search: bool,
    pub needs_reload: bool,
}

impl Default for ManagerState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category_filter: String::new(),
            location_filter: String::new(),
            low_stock_limit: None,
            sort: None,
            descending: false,
            selected: None,
            products: Vec::new(),
            categories: Vec::new(),
            locations: Vec::new(),
            total_value: 0.0,
            status: String::new(),
            form: None,
            confirm_delete: None,
            threshold_input: None,
            focus_search: false,
            needs_reload: true,
        }
    }
}
