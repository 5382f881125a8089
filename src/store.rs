//! The record store: a product catalog persisted in a local SQLite
//! database.
//!
//! Every read and write goes through the operations on [`Store`]; the
//! front-ends never touch SQL themselves. Each operation is a single
//! statement, so a failed call leaves the catalog unchanged.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};

use crate::error::{StoreError, StoreResult};
use crate::models::{NewProduct, Product, ProductChanges, SortKey};

/// Columns selected for every product read, in struct field order.
const PRODUCT_COLUMNS: &str = "id, code, name, description, category, quantity, price, location";

/// A handle on the product catalog. Owns the database connection for
/// its whole lifetime.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the catalog database at `path` and makes sure
    /// the schema exists. Missing parent directories are created.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                // If this fails, Connection::open reports the real error.
                std::fs::create_dir_all(parent).ok();
            }
        }
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        log::info!("Opened inventory database at {}", path.display());
        Ok(Store { conn })
    }

    /// Opens a throwaway in-memory catalog. Used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    /// Inserts a new product and returns its assigned id.
    ///
    /// Code and name must be non-empty after trimming; quantity and
    /// price must be non-negative. Empty optional text fields are
    /// stored as NULL. A code already in use yields
    /// [`StoreError::DuplicateCode`].
    pub fn add(&self, product: &NewProduct) -> StoreResult<i64> {
        let code = product.code.trim();
        let name = product.name.trim();
        if code.is_empty() {
            return Err(StoreError::InvalidInput("code must not be empty".to_string()));
        }
        if name.is_empty() {
            return Err(StoreError::InvalidInput("name must not be empty".to_string()));
        }
        validate_quantity(product.quantity)?;
        validate_price(product.price)?;

        self.conn
            .execute(
                "INSERT INTO products (code, name, description, category, quantity, price, location)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    code,
                    name,
                    optional_text(&product.description),
                    optional_text(&product.category),
                    product.quantity,
                    product.price,
                    optional_text(&product.location),
                ],
            )
            .map_err(|e| map_code_conflict(e, code))?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Added product {} with code '{}'", id, code);
        Ok(id)
    }

    /// Fetches a single product by id.
    pub fn get(&self, id: i64) -> StoreResult<Product> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(product_from_row(row)?),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Applies a partial update to the product with the given id.
    ///
    /// Only the fields set in `changes` are written; the rest keep
    /// their stored values. An update with no fields set is rejected,
    /// as is an empty code or name. Changing the code to one already
    /// used by another record yields [`StoreError::DuplicateCode`].
    pub fn update(&self, id: i64, changes: &ProductChanges) -> StoreResult<()> {
        if changes.is_empty() {
            return Err(StoreError::InvalidInput("no fields to update".to_string()));
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(code) = &changes.code {
            let code = code.trim();
            if code.is_empty() {
                return Err(StoreError::InvalidInput("code must not be empty".to_string()));
            }
            assignments.push("code = ?");
            values.push(Value::Text(code.to_string()));
        }
        if let Some(name) = &changes.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(StoreError::InvalidInput("name must not be empty".to_string()));
            }
            assignments.push("name = ?");
            values.push(Value::Text(name.to_string()));
        }
        if let Some(description) = &changes.description {
            assignments.push("description = ?");
            values.push(text_or_null(description));
        }
        if let Some(category) = &changes.category {
            assignments.push("category = ?");
            values.push(text_or_null(category));
        }
        if let Some(quantity) = changes.quantity {
            validate_quantity(quantity)?;
            assignments.push("quantity = ?");
            values.push(Value::Integer(quantity));
        }
        if let Some(price) = changes.price {
            validate_price(price)?;
            assignments.push("price = ?");
            values.push(Value::Real(price));
        }
        if let Some(location) = &changes.location {
            assignments.push("location = ?");
            values.push(text_or_null(location));
        }

        values.push(Value::Integer(id));
        let sql = format!(
            "UPDATE products SET {} WHERE id = ?",
            assignments.join(", ")
        );

        let new_code = changes.code.as_deref().unwrap_or("").trim();
        let affected = self
            .conn
            .execute(&sql, params_from_iter(values))
            .map_err(|e| map_code_conflict(e, new_code))?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        log::debug!("Updated product {}", id);
        Ok(())
    }

    /// Removes the product with the given id.
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let affected = self
            .conn
            .execute("DELETE FROM products WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        log::debug!("Deleted product {}", id);
        Ok(())
    }

    /// Returns the whole catalog, ordered by the given key, or by id
    /// when no key is given.
    pub fn list(&self, sort: Option<SortKey>, descending: bool) -> StoreResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products{}",
            PRODUCT_COLUMNS,
            order_clause(sort, descending)
        );
        self.query_products(&sql, [])
    }

    /// Returns products whose code or name contains `term`,
    /// case-insensitively. An empty term matches everything.
    pub fn search(
        &self,
        term: &str,
        sort: Option<SortKey>,
        descending: bool,
    ) -> StoreResult<Vec<Product>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list(sort, descending);
        }
        let pattern = format!("%{}%", term);
        let sql = format!(
            "SELECT {} FROM products
             WHERE code LIKE ?1 COLLATE NOCASE OR name LIKE ?1 COLLATE NOCASE{}",
            PRODUCT_COLUMNS,
            order_clause(sort, descending)
        );
        self.query_products(&sql, params![pattern])
    }

    /// Returns products in the given category (case-insensitive exact
    /// match). An empty value matches everything.
    pub fn filter_by_category(
        &self,
        category: &str,
        sort: Option<SortKey>,
        descending: bool,
    ) -> StoreResult<Vec<Product>> {
        self.filter_by_column("category", category, sort, descending)
    }

    /// Returns products at the given location (case-insensitive exact
    /// match). An empty value matches everything.
    pub fn filter_by_location(
        &self,
        location: &str,
        sort: Option<SortKey>,
        descending: bool,
    ) -> StoreResult<Vec<Product>> {
        self.filter_by_column("location", location, sort, descending)
    }

    fn filter_by_column(
        &self,
        column: &str,
        value: &str,
        sort: Option<SortKey>,
        descending: bool,
    ) -> StoreResult<Vec<Product>> {
        let value = value.trim();
        if value.is_empty() {
            return self.list(sort, descending);
        }
        let sql = format!(
            "SELECT {} FROM products WHERE {} = ?1 COLLATE NOCASE{}",
            PRODUCT_COLUMNS,
            column,
            order_clause(sort, descending)
        );
        self.query_products(&sql, params![value])
    }

    /// Returns products with quantity at or below `threshold`, lowest
    /// quantities first. A negative threshold is rejected.
    pub fn low_stock(&self, threshold: i64) -> StoreResult<Vec<Product>> {
        if threshold < 0 {
            return Err(StoreError::InvalidInput(
                "threshold must be zero or greater".to_string(),
            ));
        }
        let sql = format!(
            "SELECT {} FROM products WHERE quantity <= ?1 ORDER BY quantity ASC, id ASC",
            PRODUCT_COLUMNS
        );
        self.query_products(&sql, params![threshold])
    }

    /// Total value of the catalog: the sum of quantity times price over
    /// all products. Zero for an empty catalog.
    pub fn total_value(&self) -> StoreResult<f64> {
        let total: f64 = self.conn.query_row(
            "SELECT COALESCE(SUM(quantity * price), 0.0) FROM products",
            [],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Distinct categories in use, alphabetically.
    pub fn categories(&self) -> StoreResult<Vec<String>> {
        self.distinct_values("category")
    }

    /// Distinct locations in use, alphabetically.
    pub fn locations(&self) -> StoreResult<Vec<String>> {
        self.distinct_values("location")
    }

    fn distinct_values(&self, column: &str) -> StoreResult<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT {col} FROM products WHERE {col} IS NOT NULL ORDER BY {col}",
            col = column
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(values)
    }

    fn query_products<P: rusqlite::Params>(
        &self,
        sql: &str,
        params: P,
    ) -> StoreResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(sql)?;
        let products = stmt
            .query_map(params, |row| product_from_row(row))?
            .collect::<rusqlite::Result<Vec<Product>>>()?;
        Ok(products)
    }
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS products (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            code        TEXT NOT NULL UNIQUE,
            name        TEXT NOT NULL,
            description TEXT,
            category    TEXT,
            quantity    INTEGER NOT NULL,
            price       REAL NOT NULL,
            location    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_products_category ON products(category);
        CREATE INDEX IF NOT EXISTS idx_products_location ON products(location);",
    )
}

fn product_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        quantity: row.get(5)?,
        price: row.get(6)?,
        location: row.get(7)?,
    })
}

/// Builds the ORDER BY clause for a listing. Every ordering breaks
/// ties by id ascending so results are deterministic.
fn order_clause(sort: Option<SortKey>, descending: bool) -> String {
    match sort {
        Some(SortKey::Id) => {
            let direction = if descending { "DESC" } else { "ASC" };
            format!(" ORDER BY id {}", direction)
        }
        Some(key) => {
            let direction = if descending { "DESC" } else { "ASC" };
            format!(" ORDER BY {} {}, id ASC", key.column(), direction)
        }
        None => " ORDER BY id ASC".to_string(),
    }
}

fn validate_quantity(quantity: i64) -> StoreResult<()> {
    if quantity < 0 {
        return Err(StoreError::InvalidInput(
            "quantity must be zero or greater".to_string(),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> StoreResult<()> {
    if !price.is_finite() {
        return Err(StoreError::InvalidInput(
            "price must be a finite number".to_string(),
        ));
    }
    if price < 0.0 {
        return Err(StoreError::InvalidInput(
            "price must be zero or greater".to_string(),
        ));
    }
    Ok(())
}

/// Trims an optional text field; empty input becomes NULL.
fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn text_or_null(value: &str) -> Value {
    match optional_text(value) {
        Some(text) => Value::Text(text),
        None => Value::Null,
    }
}

/// Maps the UNIQUE constraint failure on the code column to
/// [`StoreError::DuplicateCode`]; everything else stays a database
/// error.
fn map_code_conflict(err: rusqlite::Error, code: &str) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::DuplicateCode(code.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> Store {
        Store::open_in_memory().unwrap()
    }

    fn sample(code: &str, name: &str) -> NewProduct {
        NewProduct {
            code: code.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: String::new(),
            quantity: 1,
            price: 1.0,
            location: String::new(),
        }
    }

    fn stocked(code: &str, name: &str, category: &str, quantity: i64, price: f64, location: &str) -> NewProduct {
        NewProduct {
            code: code.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            quantity,
            price,
            location: location.to_string(),
        }
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let store = test_store();
        assert_eq!(store.add(&sample("A1", "First")).unwrap(), 1);
        assert_eq!(store.add(&sample("A2", "Second")).unwrap(), 2);
        assert_eq!(store.add(&sample("A3", "Third")).unwrap(), 3);
    }

    #[test]
    fn test_add_trims_and_normalizes_fields() {
        let store = test_store();
        let product = NewProduct {
            code: "  A100 ".to_string(),
            name: " Widget ".to_string(),
            description: "   ".to_string(),
            category: " Tools ".to_string(),
            quantity: 10,
            price: 2.5,
            location: String::new(),
        };
        let id = store.add(&product).unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.code, "A100");
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.description, None);
        assert_eq!(stored.category, Some("Tools".to_string()));
        assert_eq!(stored.location, None);
    }

    #[test]
    fn test_add_rejects_blank_code_and_name() {
        let store = test_store();
        let err = store.add(&sample("", "Widget")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));

        let err = store.add(&sample("A100", "   ")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));

        assert!(store.list(None, false).unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_negative_values() {
        let store = test_store();
        let mut product = sample("A100", "Widget");
        product.quantity = -1;
        assert!(matches!(
            store.add(&product).unwrap_err(),
            StoreError::InvalidInput(_)
        ));

        let mut product = sample("A100", "Widget");
        product.price = -0.01;
        assert!(matches!(
            store.add(&product).unwrap_err(),
            StoreError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_add_duplicate_code_rejected() {
        let store = test_store();
        store.add(&sample("A100", "Widget")).unwrap();

        let err = store.add(&sample("A100", "Other")).unwrap_err();
        match err {
            StoreError::DuplicateCode(code) => assert_eq!(code, "A100"),
            other => panic!("expected DuplicateCode, got {:?}", other),
        }
        assert_eq!(store.list(None, false).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_code_check_is_case_sensitive() {
        // Codes are compared exactly; "a100" and "A100" are distinct.
        let store = test_store();
        store.add(&sample("A100", "Widget")).unwrap();
        assert!(store.add(&sample("a100", "Other")).is_ok());
    }

    #[test]
    fn test_get_missing_product() {
        let store = test_store();
        match store.get(99).unwrap_err() {
            StoreError::NotFound(id) => assert_eq!(id, 99),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_update_single_field() {
        let store = test_store();
        let id = store
            .add(&stocked("A100", "Widget", "Tools", 10, 2.5, "ShelfA"))
            .unwrap();

        let changes = ProductChanges {
            quantity: Some(4),
            ..Default::default()
        };
        store.update(id, &changes).unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.quantity, 4);
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.price, 2.5);
        assert_eq!(stored.location, Some("ShelfA".to_string()));
    }

    #[test]
    fn test_update_code() {
        let store = test_store();
        let id = store.add(&sample("A100", "Widget")).unwrap();

        let changes = ProductChanges {
            code: Some("B200".to_string()),
            ..Default::default()
        };
        store.update(id, &changes).unwrap();
        assert_eq!(store.get(id).unwrap().code, "B200");
    }

    #[test]
    fn test_update_code_conflict() {
        let store = test_store();
        store.add(&sample("A100", "Widget")).unwrap();
        let id = store.add(&sample("B200", "Gadget")).unwrap();

        let changes = ProductChanges {
            code: Some("A100".to_string()),
            ..Default::default()
        };
        match store.update(id, &changes).unwrap_err() {
            StoreError::DuplicateCode(code) => assert_eq!(code, "A100"),
            other => panic!("expected DuplicateCode, got {:?}", other),
        }
        // The record kept its original code.
        assert_eq!(store.get(id).unwrap().code, "B200");
    }

    #[test]
    fn test_update_code_to_its_own_value() {
        let store = test_store();
        let id = store.add(&sample("A100", "Widget")).unwrap();

        let changes = ProductChanges {
            code: Some("A100".to_string()),
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        store.update(id, &changes).unwrap();
        assert_eq!(store.get(id).unwrap().name, "Renamed");
    }

    #[test]
    fn test_update_clears_optional_field() {
        let store = test_store();
        let id = store
            .add(&stocked("A100", "Widget", "Tools", 10, 2.5, "ShelfA"))
            .unwrap();

        let changes = ProductChanges {
            category: Some(String::new()),
            ..Default::default()
        };
        store.update(id, &changes).unwrap();

        let stored = store.get(id).unwrap();
        assert_eq!(stored.category, None);
        assert_eq!(stored.location, Some("ShelfA".to_string()));
    }

    #[test]
    fn test_update_with_no_fields_rejected() {
        let store = test_store();
        let id = store.add(&sample("A100", "Widget")).unwrap();

        let err = store.update(id, &ProductChanges::default()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn test_update_rejects_invalid_values() {
        let store = test_store();
        let id = store.add(&sample("A100", "Widget")).unwrap();
        let before = store.get(id).unwrap();

        let changes = ProductChanges {
            quantity: Some(-5),
            ..Default::default()
        };
        assert!(matches!(
            store.update(id, &changes).unwrap_err(),
            StoreError::InvalidInput(_)
        ));

        let changes = ProductChanges {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update(id, &changes).unwrap_err(),
            StoreError::InvalidInput(_)
        ));

        // The rejected updates left the row as it was.
        assert_eq!(store.get(id).unwrap(), before);
    }

    #[test]
    fn test_update_missing_product() {
        let store = test_store();
        let changes = ProductChanges {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update(42, &changes).unwrap_err(),
            StoreError::NotFound(42)
        ));
    }

    #[test]
    fn test_delete_then_operations_fail() {
        let store = test_store();
        let id = store.add(&sample("A100", "Widget")).unwrap();
        store.delete(id).unwrap();

        assert!(matches!(
            store.get(id).unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            store.delete(id).unwrap_err(),
            StoreError::NotFound(_)
        ));
        let changes = ProductChanges {
            quantity: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            store.update(id, &changes).unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let store = test_store();
        store.add(&sample("A1", "First")).unwrap();
        let second = store.add(&sample("A2", "Second")).unwrap();
        store.delete(second).unwrap();

        let third = store.add(&sample("A3", "Third")).unwrap();
        assert!(third > second);
    }

    #[test]
    fn test_list_default_order_is_id() {
        let store = test_store();
        store.add(&sample("C", "Gamma")).unwrap();
        store.add(&sample("A", "Alpha")).unwrap();
        store.add(&sample("B", "Beta")).unwrap();

        let ids: Vec<i64> = store
            .list(None, false)
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_list_sorted_by_name() {
        let store = test_store();
        store.add(&sample("C", "Gamma")).unwrap();
        store.add(&sample("A", "Alpha")).unwrap();
        store.add(&sample("B", "Beta")).unwrap();

        let names: Vec<String> = store
            .list(Some(SortKey::Name), false)
            .unwrap()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

        let names: Vec<String> = store
            .list(Some(SortKey::Name), true)
            .unwrap()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["Gamma", "Beta", "Alpha"]);
    }

    #[test]
    fn test_sort_ties_break_by_id() {
        let store = test_store();
        let mut a = sample("A", "Same");
        a.quantity = 5;
        let mut b = sample("B", "Same");
        b.quantity = 5;
        let mut c = sample("C", "Other");
        c.quantity = 5;
        store.add(&a).unwrap();
        store.add(&b).unwrap();
        store.add(&c).unwrap();

        // Equal quantities keep insertion (id) order, even descending.
        let ids: Vec<i64> = store
            .list(Some(SortKey::Quantity), true)
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_search_matches_code_and_name() {
        let store = test_store();
        store.add(&stocked("WID-1", "Widget", "", 1, 1.0, "")).unwrap();
        store.add(&stocked("GAD-1", "Gadget", "", 1, 1.0, "")).unwrap();
        store.add(&stocked("BOLT-9", "Hex bolt", "", 1, 1.0, "")).unwrap();

        // Substring of a name, different case.
        let hits = store.search("wid", None, false).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "WID-1");

        // Substring shared by a code and a name.
        let hits = store.search("GAD", None, false).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Gadget");

        let hits = store.search("bolt", None, false).unwrap();
        assert_eq!(hits.len(), 1);

        assert!(store.search("xyz", None, false).unwrap().is_empty());
    }

    #[test]
    fn test_search_empty_term_returns_all() {
        let store = test_store();
        store.add(&sample("A1", "First")).unwrap();
        store.add(&sample("A2", "Second")).unwrap();

        assert_eq!(store.search("", None, false).unwrap().len(), 2);
        assert_eq!(store.search("   ", None, false).unwrap().len(), 2);
    }

    #[test]
    fn test_filter_by_category_case_insensitive() {
        let store = test_store();
        store.add(&stocked("A1", "Widget", "Tools", 1, 1.0, "")).unwrap();
        store.add(&stocked("A2", "Gadget", "tools", 1, 1.0, "")).unwrap();
        store.add(&stocked("A3", "Cable", "Electronics", 1, 1.0, "")).unwrap();
        store.add(&sample("A4", "Uncategorized")).unwrap();

        let hits = store.filter_by_category("TOOLS", None, false).unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.filter_by_category("Electronics", None, false).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "A3");

        assert!(store
            .filter_by_category("Garden", None, false)
            .unwrap()
            .is_empty());
        assert_eq!(store.filter_by_category("", None, false).unwrap().len(), 4);
    }

    #[test]
    fn test_filter_by_location() {
        let store = test_store();
        store.add(&stocked("A1", "Widget", "", 1, 1.0, "ShelfA")).unwrap();
        store.add(&stocked("A2", "Gadget", "", 1, 1.0, "shelfa")).unwrap();
        store.add(&stocked("A3", "Cable", "", 1, 1.0, "ShelfB")).unwrap();

        let hits = store.filter_by_location("ShelfA", None, false).unwrap();
        assert_eq!(hits.len(), 2);

        let hits = store.filter_by_location("shelfb", None, false).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "A3");
    }

    #[test]
    fn test_low_stock_threshold_is_inclusive() {
        let store = test_store();
        store.add(&stocked("A1", "Scarce", "", 2, 1.0, "")).unwrap();
        store.add(&stocked("A2", "Exact", "", 5, 1.0, "")).unwrap();
        store.add(&stocked("A3", "Plenty", "", 6, 1.0, "")).unwrap();
        store.add(&stocked("A4", "Gone", "", 0, 1.0, "")).unwrap();

        let hits = store.low_stock(5).unwrap();
        let codes: Vec<&str> = hits.iter().map(|p| p.code.as_str()).collect();
        // Lowest quantities first.
        assert_eq!(codes, vec!["A4", "A1", "A2"]);
    }

    #[test]
    fn test_low_stock_zero_threshold() {
        let store = test_store();
        store.add(&stocked("A1", "Stocked", "", 2, 1.0, "")).unwrap();
        store.add(&stocked("A2", "Out", "", 0, 1.0, "")).unwrap();
        store.add(&stocked("A3", "Also out", "", 0, 1.0, "")).unwrap();

        // Only exhausted products qualify at zero.
        let hits = store.low_stock(0).unwrap();
        let codes: Vec<&str> = hits.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["A2", "A3"]);
    }

    #[test]
    fn test_low_stock_above_max_returns_all() {
        let store = test_store();
        store.add(&stocked("A1", "Mid", "", 5, 1.0, "")).unwrap();
        store.add(&stocked("A2", "Low", "", 1, 1.0, "")).unwrap();
        store.add(&stocked("A3", "Mid too", "", 5, 1.0, "")).unwrap();

        // A threshold above every quantity returns the whole catalog,
        // lowest quantities first, ties in id order.
        let hits = store.low_stock(100).unwrap();
        let codes: Vec<&str> = hits.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["A2", "A1", "A3"]);
    }

    #[test]
    fn test_low_stock_rejects_negative_threshold() {
        let store = test_store();
        assert!(matches!(
            store.low_stock(-1).unwrap_err(),
            StoreError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_total_value() {
        let store = test_store();
        assert_eq!(store.total_value().unwrap(), 0.0);

        store.add(&stocked("A1", "Widget", "", 10, 2.5, "")).unwrap();
        store.add(&stocked("A2", "Gadget", "", 3, 10.0, "")).unwrap();
        store.add(&stocked("A3", "Free", "", 100, 0.0, "")).unwrap();

        let total = store.total_value().unwrap();
        assert!((total - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_distinct_categories_and_locations() {
        let store = test_store();
        store.add(&stocked("A1", "W", "Tools", 1, 1.0, "ShelfB")).unwrap();
        store.add(&stocked("A2", "X", "Electronics", 1, 1.0, "ShelfA")).unwrap();
        store.add(&stocked("A3", "Y", "Tools", 1, 1.0, "ShelfA")).unwrap();
        store.add(&sample("A4", "Z")).unwrap();

        assert_eq!(store.categories().unwrap(), vec!["Electronics", "Tools"]);
        assert_eq!(store.locations().unwrap(), vec!["ShelfA", "ShelfB"]);
    }

    #[test]
    fn test_catalog_round_trip() {
        let store = test_store();
        let id = store
            .add(&NewProduct {
                code: "A100".to_string(),
                name: "Widget".to_string(),
                description: String::new(),
                category: "Tools".to_string(),
                quantity: 10,
                price: 2.5,
                location: "ShelfA".to_string(),
            })
            .unwrap();
        assert_eq!(id, 1);

        assert!(matches!(
            store.add(&sample("A100", "Other")).unwrap_err(),
            StoreError::DuplicateCode(_)
        ));

        let listing = store.list(Some(SortKey::Name), false).unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].line_value(), 25.0);
        assert_eq!(store.total_value().unwrap(), 25.0);
    }
}
