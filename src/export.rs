//! CSV export of the product catalog.

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::Product;
use crate::store::Store;

/// Header row of the export file. Matches [`ExportRow`] field order.
const EXPORT_HEADERS: [&str; 9] = [
    "ID",
    "Code",
    "Name",
    "Description",
    "Category",
    "Quantity",
    "Price",
    "Location",
    "Total Value",
];

/// One exported row: every product field plus the computed value of
/// the stocked quantity.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    code: &'a str,
    name: &'a str,
    description: &'a str,
    category: &'a str,
    quantity: i64,
    price: f64,
    location: &'a str,
    total_value: f64,
}

impl<'a> ExportRow<'a> {
    fn from_product(product: &'a Product) -> Self {
        ExportRow {
            id: product.id,
            code: &product.code,
            name: &product.name,
            description: product.description.as_deref().unwrap_or(""),
            category: product.category.as_deref().unwrap_or(""),
            quantity: product.quantity,
            price: product.price,
            location: product.location.as_deref().unwrap_or(""),
            total_value: product.line_value(),
        }
    }
}

/// Default export filename in the current directory, stamped so that
/// repeated exports do not collide.
fn default_export_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("inventory_export_{}.csv", timestamp))
}

/// Writes the whole catalog in id order to `path`, or to a timestamped
/// file in the current directory when no path is given. The header row
/// is written even for an empty catalog. Returns the absolute path of
/// the written file.
pub fn export_csv(store: &Store, path: Option<&Path>) -> Result<PathBuf, Box<dyn Error>> {
    let target = match path {
        Some(p) => p.to_path_buf(),
        None => default_export_path(),
    };

    let products = store.list(None, false)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&target)?;
    writer.write_record(EXPORT_HEADERS)?;
    for product in &products {
        writer.serialize(ExportRow::from_product(product))?;
    }
    writer.flush()?;

    let absolute = std::fs::canonicalize(&target)?;
    log::info!(
        "Exported {} products to {}",
        products.len(),
        absolute.display()
    );
    Ok(absolute)
}
