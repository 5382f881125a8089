//! Menu-driven console front-end.
//!
//! Mirrors the classic numbered-menu workflow: pick an operation,
//! answer the prompts, see the result. Leaving a prompt empty during
//! an update keeps the stored value.

use std::io::{self, BufRead, Write};

use crate::export;
use crate::format::{format_details, format_money, format_table};
use crate::models::{NewProduct, ProductChanges, SortKey};
use crate::store::Store;

const MENU: &str = "\
==============================
 Stockroom - Inventory Menu
==============================
 1. Add product
 2. View inventory
 3. Update product
 4. Delete product
 5. Search products
 6. Filter by category
 7. Filter by location
 8. Low-stock report
 9. Total inventory value
 10. Export inventory to CSV
 0. Exit";

/// Runs the interactive menu loop on stdin until the user exits.
pub fn run(store: &Store) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_loop(store, &mut input)
}

fn run_loop(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    loop {
        println!("\n{}", MENU);
        let Some(choice) = prompt(input, "\nSelect an option: ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "0" => {
                println!("Goodbye.");
                return Ok(());
            }
            "1" => add_product(store, input)?,
            "2" => view_inventory(store, input)?,
            "3" => update_product(store, input)?,
            "4" => delete_product(store, input)?,
            "5" => search_products(store, input)?,
            "6" => filter_by_category(store, input)?,
            "7" => filter_by_location(store, input)?,
            "8" => low_stock_report(store, input)?,
            "9" => show_total_value(store),
            "10" => export_inventory(store, input)?,
            "" => {}
            _ => println!("Invalid option, please try again."),
        }
    }
}

/// Prints `label` without a newline and reads one trimmed line.
/// Returns `None` when the input stream ends.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompts until a valid product id is entered.
fn prompt_id(input: &mut impl BufRead, label: &str) -> io::Result<Option<i64>> {
    loop {
        let Some(line) = prompt(input, label)? else {
            return Ok(None);
        };
        match line.parse::<i64>() {
            Ok(id) => return Ok(Some(id)),
            Err(_) => println!("Error: '{}' is not a valid id", line),
        }
    }
}

/// Prompts until a valid non-negative whole number is entered.
fn prompt_quantity(input: &mut impl BufRead, label: &str) -> io::Result<Option<i64>> {
    loop {
        let Some(line) = prompt(input, label)? else {
            return Ok(None);
        };
        match crate::parse::parse_quantity(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => println!("Error: {}", e),
        }
    }
}

/// Prompts until a valid non-negative price is entered. Both "2.50"
/// and "2,50" are accepted.
fn prompt_price(input: &mut impl BufRead, label: &str) -> io::Result<Option<f64>> {
    loop {
        let Some(line) = prompt(input, label)? else {
            return Ok(None);
        };
        match crate::parse::parse_price(&line) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => println!("Error: {}", e),
        }
    }
}

/// Like [`prompt_quantity`], but an empty line means "keep".
fn prompt_optional_quantity(
    input: &mut impl BufRead,
    label: &str,
) -> io::Result<Option<Option<i64>>> {
    loop {
        let Some(line) = prompt(input, label)? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(None));
        }
        match crate::parse::parse_quantity(&line) {
            Ok(value) => return Ok(Some(Some(value))),
            Err(e) => println!("Error: {}", e),
        }
    }
}

/// Like [`prompt_price`], but an empty line means "keep".
fn prompt_optional_price(
    input: &mut impl BufRead,
    label: &str,
) -> io::Result<Option<Option<f64>>> {
    loop {
        let Some(line) = prompt(input, label)? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(None));
        }
        match crate::parse::parse_price(&line) {
            Ok(value) => return Ok(Some(Some(value))),
            Err(e) => println!("Error: {}", e),
        }
    }
}

/// Asks for an optional sort order. Returns `(key, descending)`.
fn prompt_sort(input: &mut impl BufRead) -> io::Result<Option<(Option<SortKey>, bool)>> {
    let fields = SortKey::all()
        .iter()
        .map(|key| key.column())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Sortable fields: {}", fields);
    loop {
        let Some(field) = prompt(input, "Sort by (leave empty for default order): ")? else {
            return Ok(None);
        };
        if field.is_empty() {
            return Ok(Some((None, false)));
        }
        match SortKey::parse(&field) {
            Some(key) => {
                let Some(answer) = prompt(input, "Descending? (y/N): ")? else {
                    return Ok(None);
                };
                let descending = answer.eq_ignore_ascii_case("y");
                return Ok(Some((Some(key), descending)));
            }
            None => println!("Unknown field '{}'.", field),
        }
    }
}

fn add_product(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    println!("\n--- Add product ---");
    let Some(code) = prompt(input, "Code: ")? else {
        return Ok(());
    };
    let Some(name) = prompt(input, "Name: ")? else {
        return Ok(());
    };
    let Some(description) = prompt(input, "Description (optional): ")? else {
        return Ok(());
    };
    let Some(category) = prompt(input, "Category (optional): ")? else {
        return Ok(());
    };
    let Some(quantity) = prompt_quantity(input, "Quantity: ")? else {
        return Ok(());
    };
    let Some(price) = prompt_price(input, "Unit price: ")? else {
        return Ok(());
    };
    let Some(location) = prompt(input, "Location (optional): ")? else {
        return Ok(());
    };

    let product = NewProduct {
        code,
        name,
        description,
        category,
        quantity,
        price,
        location,
    };
    match store.add(&product) {
        Ok(id) => println!("Product added with id {}.", id),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn view_inventory(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some((sort, descending)) = prompt_sort(input)? else {
        return Ok(());
    };
    match store.list(sort, descending) {
        Ok(products) => println!("\n{}", format_table(&products)),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn update_product(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    println!("\n--- Update product ---");
    let Some(id) = prompt_id(input, "Product id: ")? else {
        return Ok(());
    };
    let current = match store.get(id) {
        Ok(product) => product,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    println!("{}", format_details(&current));
    println!("Leave a field empty to keep its current value.");

    let Some(code) = prompt(input, "New code: ")? else {
        return Ok(());
    };
    let Some(name) = prompt(input, "New name: ")? else {
        return Ok(());
    };
    let Some(description) = prompt(input, "New description: ")? else {
        return Ok(());
    };
    let Some(category) = prompt(input, "New category: ")? else {
        return Ok(());
    };
    let Some(quantity) = prompt_optional_quantity(input, "New quantity: ")? else {
        return Ok(());
    };
    let Some(price) = prompt_optional_price(input, "New price: ")? else {
        return Ok(());
    };
    let Some(location) = prompt(input, "New location: ")? else {
        return Ok(());
    };

    let non_empty = |value: String| if value.is_empty() { None } else { Some(value) };
    let changes = ProductChanges {
        code: non_empty(code),
        name: non_empty(name),
        description: non_empty(description),
        category: non_empty(category),
        quantity,
        price,
        location: non_empty(location),
    };
    if changes.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }
    match store.update(id, &changes) {
        Ok(()) => println!("Product {} updated.", id),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn delete_product(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(id) = prompt_id(input, "Product id to delete: ")? else {
        return Ok(());
    };
    match store.delete(id) {
        Ok(()) => println!("Product {} deleted.", id),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn search_products(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(term) = prompt(input, "Search term (code or name): ")? else {
        return Ok(());
    };
    let Some((sort, descending)) = prompt_sort(input)? else {
        return Ok(());
    };
    match store.search(&term, sort, descending) {
        Ok(products) => println!("\n{}", format_table(&products)),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn filter_by_category(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(category) = prompt(input, "Category: ")? else {
        return Ok(());
    };
    let Some((sort, descending)) = prompt_sort(input)? else {
        return Ok(());
    };
    match store.filter_by_category(&category, sort, descending) {
        Ok(products) => println!("\n{}", format_table(&products)),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn filter_by_location(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(location) = prompt(input, "Location: ")? else {
        return Ok(());
    };
    let Some((sort, descending)) = prompt_sort(input)? else {
        return Ok(());
    };
    match store.filter_by_location(&location, sort, descending) {
        Ok(products) => println!("\n{}", format_table(&products)),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn low_stock_report(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(threshold) = prompt_quantity(input, "Low-stock threshold: ")? else {
        return Ok(());
    };
    match store.low_stock(threshold) {
        Ok(products) => println!("\n{}", format_table(&products)),
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn show_total_value(store: &Store) {
    match store.total_value() {
        Ok(total) => println!("Total inventory value: {}", format_money(total)),
        Err(e) => println!("Error: {}", e),
    }
}

fn export_inventory(store: &Store, input: &mut impl BufRead) -> io::Result<()> {
    let Some(filename) = prompt(input, "Export filename (empty for default): ")? else {
        return Ok(());
    };
    let path = if filename.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(filename))
    };
    match export::export_csv(store, path.as_deref()) {
        Ok(written) => println!("Inventory exported to {}", written.display()),
        Err(e) => println!("Error: export failed: {}", e),
    }
    Ok(())
}
