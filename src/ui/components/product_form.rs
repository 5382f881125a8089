//! Shared add/edit/duplicate form window used by both windowed
//! front-ends.

use eframe::egui;

use crate::models::{NewProduct, Product, ProductChanges};
use crate::parse::{parse_price, parse_quantity};
use crate::store::Store;

/// What the form is for. Editing keeps the code read-only; duplicating
/// pre-fills everything and suggests a derived code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit,
    Duplicate,
}

/// Editable text state for every product field.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub mode: FormMode,
    pub product_id: Option<i64>,
    pub code: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub quantity: String,
    pub price: String,
    pub location: String,
    pub error: Option<String>,
}

impl ProductForm {
    /// An empty form for a brand-new product.
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            product_id: None,
            code: String::new(),
            name: String::new(),
            description: String::new(),
            category: String::new(),
            quantity: "0".to_string(),
            price: "0.00".to_string(),
            location: String::new(),
            error: None,
        }
    }

    /// A form pre-filled with an existing product's values.
    pub fn edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit,
            product_id: Some(product.id),
            code: product.code.clone(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
            quantity: product.quantity.to_string(),
            price: format!("{:.2}", product.price),
            location: product.location.clone().unwrap_or_default(),
            error: None,
        }
    }

    /// A copy of an existing product with a fresh, derived code.
    pub fn duplicate(product: &Product) -> Self {
        let mut form = Self::edit(product);
        form.mode = FormMode::Duplicate;
        form.product_id = None;
        form.code = format!("{}-copy", product.code);
        form
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "New product",
            FormMode::Edit => "Edit product",
            FormMode::Duplicate => "Duplicate product",
        }
    }

    /// Validates the fields into a record for insertion.
    pub fn to_new_product(&self) -> Result<NewProduct, String> {
        if self.code.trim().is_empty() {
            return Err("Code is required.".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Name is required.".to_string());
        }
        let quantity = parse_quantity(&self.quantity).map_err(|e| e.to_string())?;
        let price = parse_price(&self.price).map_err(|e| e.to_string())?;
        Ok(NewProduct {
            code: self.code.trim().to_string(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity,
            price,
            location: self.location.trim().to_string(),
        })
    }

    /// Validates the fields into a full-field update. The code is left
    /// untouched; the windowed front-ends treat it as fixed once a
    /// product exists.
    pub fn to_changes(&self) -> Result<ProductChanges, String> {
        if self.name.trim().is_empty() {
            return Err("Name is required.".to_string());
        }
        let quantity = parse_quantity(&self.quantity).map_err(|e| e.to_string())?;
        let price = parse_price(&self.price).map_err(|e| e.to_string())?;
        Ok(ProductChanges {
            code: None,
            name: Some(self.name.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            category: Some(self.category.trim().to_string()),
            quantity: Some(quantity),
            price: Some(price),
            location: Some(self.location.trim().to_string()),
        })
    }
}

/// Persists the form. Returns a status line on success, or the error
/// text to show inside the form.
pub fn save_to_store(form: &ProductForm, store: &Store) -> Result<String, String> {
    match form.mode {
        FormMode::Edit => {
            let Some(id) = form.product_id else {
                return Err("No product selected.".to_string());
            };
            let changes = form.to_changes()?;
            store.update(id, &changes).map_err(|e| e.to_string())?;
            Ok(format!("Product {} updated.", id))
        }
        FormMode::Add | FormMode::Duplicate => {
            let product = form.to_new_product()?;
            let id = store.add(&product).map_err(|e| e.to_string())?;
            Ok(format!("Product added with id {}.", id))
        }
    }
}

/// What the caller should do after drawing the form for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Save,
    Cancel,
}

/// Draws the form window. Enter saves, Escape cancels.
pub fn show_form(ctx: &egui::Context, form: &mut ProductForm) -> FormAction {
    let mut action = FormAction::None;
    egui::Window::new(form.title())
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("product_form_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Code");
                    ui.add_enabled(
                        form.mode != FormMode::Edit,
                        egui::TextEdit::singleline(&mut form.code),
                    );
                    ui.end_row();

                    ui.label("Name");
                    ui.text_edit_singleline(&mut form.name);
                    ui.end_row();

                    ui.label("Description");
                    ui.text_edit_singleline(&mut form.description);
                    ui.end_row();

                    ui.label("Category");
                    ui.text_edit_singleline(&mut form.category);
                    ui.end_row();

                    ui.label("Quantity");
                    ui.text_edit_singleline(&mut form.quantity);
                    ui.end_row();

                    ui.label("Price");
                    ui.add(
                        egui::TextEdit::singleline(&mut form.price).hint_text("e.g. 2.50 or 2,50"),
                    );
                    ui.end_row();

                    ui.label("Location");
                    ui.text_edit_singleline(&mut form.location);
                    ui.end_row();
                });

            if let Some(error) = &form.error {
                ui.add_space(6.0);
                ui.colored_label(egui::Color32::RED, error);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    action = FormAction::Cancel;
                }
                if ui.button("Save").clicked() {
                    action = FormAction::Save;
                }
            });

            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = FormAction::Save;
            }
            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                action = FormAction::Cancel;
            }
        });
    action
}

#[cfg(test)]
#[path = "product_form_tests.rs"]
mod tests;
