//! Plain-text rendering of product listings for the console front-end
//! and the table browser.

use crate::models::Product;

/// Column titles shared by the plain-text table and the table browser.
pub const TABLE_HEADERS: [&str; 9] = [
    "ID",
    "Code",
    "Name",
    "Description",
    "Category",
    "Quantity",
    "Price",
    "Location",
    "Value",
];

/// Formats a price or value for display.
pub fn format_money(value: f64) -> String {
    format!("{value:.2} €")
}

/// The display cells for one product row, in table column order.
pub fn row_cells(product: &Product) -> [String; 9] {
    [
        product.id.to_string(),
        product.code.clone(),
        product.name.clone(),
        product.description.clone().unwrap_or_default(),
        product.category.clone().unwrap_or_default(),
        product.quantity.to_string(),
        format!("{:.2}", product.price),
        product.location.clone().unwrap_or_default(),
        format!("{:.2}", product.line_value()),
    ]
}

/// Renders products as a width-aligned table with a header row and a
/// separator line.
pub fn format_table(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }

    let rows: Vec<[String; 9]> = products.iter().map(row_cells).collect();

    // Calculate maximum lengths for alignment
    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.len());
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| format!("{:<width$}", cell, width = widths[idx]))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let header_cells: Vec<String> = TABLE_HEADERS.iter().map(|h| h.to_string()).collect();
    let separator = widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(&header_cells));
    lines.push(separator);
    for row in &rows {
        lines.push(render_row(row));
    }
    lines.join("\n")
}

/// One-line detail view of a single product. Empty optional fields
/// show as "-".
pub fn format_details(product: &Product) -> String {
    format!(
        "ID: {} | Code: {} | Name: {} | Description: {} | Category: {} | Quantity: {} | Price: {} | Location: {} | Value: {}",
        product.id,
        product.code,
        product.name,
        product.description.as_deref().unwrap_or("-"),
        product.category.as_deref().unwrap_or("-"),
        product.quantity,
        format_money(product.price),
        product.location.as_deref().unwrap_or("-"),
        format_money(product.line_value()),
    )
}
