//! Management window: toolbar, filterable table, dialogs.

use eframe::{self, egui};
use egui::ViewportBuilder;

use crate::export;
use crate::format::{self, format_money};
use crate::models::{Product, SortKey};
use crate::parse::parse_quantity;
use crate::store::Store;

use super::components::{save_to_store, show_form, FormAction, ProductForm};
use super::state::ManagerState;

/// Rows with this quantity or less are tinted as running low.
const LOW_STOCK_WARNING: i64 = 5;
const LOW_STOCK_COLOR: egui::Color32 = egui::Color32::from_rgb(205, 92, 72);

/// Table columns in display order. Sortable ones carry their key.
const COLUMNS: [(&str, Option<SortKey>); 9] = [
    ("ID", Some(SortKey::Id)),
    ("Code", Some(SortKey::Code)),
    ("Name", Some(SortKey::Name)),
    ("Description", None),
    ("Category", Some(SortKey::Category)),
    ("Quantity", Some(SortKey::Quantity)),
    ("Price", Some(SortKey::Price)),
    ("Location", Some(SortKey::Location)),
    ("Value", None),
];

pub struct ManagerApp {
    store: Store,
    state: ManagerState,
}

impl ManagerApp {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            state: ManagerState::default(),
        }
    }

    /// Re-runs the store queries behind the current view. The search
    /// term and sort order are pushed down to the store; category,
    /// location and low-stock narrowing are applied to the result.
    fn reload(&mut self) {
        self.state.needs_reload = false;
        match self
            .store
            .search(&self.state.search, self.state.sort, self.state.descending)
        {
            Ok(mut rows) => {
                let state = &mut self.state;
                if !state.category_filter.is_empty() {
                    rows.retain(|p| {
                        p.category
                            .as_deref()
                            .map_or(false, |c| c.eq_ignore_ascii_case(&state.category_filter))
                    });
                }
                if !state.location_filter.is_empty() {
                    rows.retain(|p| {
                        p.location
                            .as_deref()
                            .map_or(false, |l| l.eq_ignore_ascii_case(&state.location_filter))
                    });
                }
                if let Some(limit) = state.low_stock_limit {
                    rows.retain(|p| p.quantity <= limit);
                }
                if let Some(id) = state.selected {
                    if !rows.iter().any(|p| p.id == id) {
                        state.selected = None;
                    }
                }
                state.products = rows;
            }
            Err(e) => {
                log::error!("Failed to load products: {}", e);
                self.state.status = format!("Error: {}", e);
            }
        }

        match self.store.categories() {
            Ok(categories) => self.state.categories = categories,
            Err(e) => log::error!("Failed to load categories: {}", e),
        }
        match self.store.locations() {
            Ok(locations) => self.state.locations = locations,
            Err(e) => log::error!("Failed to load locations: {}", e),
        }
        match self.store.total_value() {
            Ok(total) => self.state.total_value = total,
            Err(e) => log::error!("Failed to compute total value: {}", e),
        }
    }

    fn selected_product(&self) -> Option<Product> {
        let id = self.state.selected?;
        self.state.products.iter().find(|p| p.id == id).cloned()
    }

    fn edit_selected(&mut self) {
        if let Some(product) = self.selected_product() {
            self.state.form = Some(ProductForm::edit(&product));
        }
    }

    fn duplicate_selected(&mut self) {
        if let Some(product) = self.selected_product() {
            self.state.form = Some(ProductForm::duplicate(&product));
        }
    }

    fn request_delete_selected(&mut self) {
        if let Some(product) = self.selected_product() {
            self.state.confirm_delete = Some((product.id, product.code));
        }
    }

    fn clear_filters(&mut self) {
        let state = &mut self.state;
        state.search.clear();
        state.category_filter.clear();
        state.location_filter.clear();
        state.low_stock_limit = None;
        state.needs_reload = true;
        state.status = "Filters cleared.".to_string();
    }

    fn export_dialog(&mut self) {
        let default_name = format!(
            "inventory_export_{}.csv",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let picked = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name(default_name)
            .save_file();
        if let Some(path) = picked {
            match export::export_csv(&self.store, Some(&path)) {
                Ok(written) => {
                    self.state.status = format!("Exported to {}", written.display());
                }
                Err(e) => {
                    log::error!("Export failed: {}", e);
                    self.state.status = format!("Error: export failed: {}", e);
                }
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.state.form.is_some()
            || self.state.confirm_delete.is_some()
            || self.state.threshold_input.is_some()
        {
            return;
        }

        let command = |key: egui::Key| ctx.input(|i| i.modifiers.command && i.key_pressed(key));

        if command(egui::Key::N) {
            self.state.form = Some(ProductForm::add());
        }
        if command(egui::Key::E) {
            self.edit_selected();
        }
        if command(egui::Key::F) {
            self.state.focus_search = true;
        }
        if command(egui::Key::R) {
            self.clear_filters();
        }
        if command(egui::Key::Q) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.state.needs_reload = true;
        }
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            self.request_delete_selected();
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        self.filter_row(ui);
        self.action_row(ui);
        ui.add_space(4.0);
    }

    fn filter_row(&mut self, ui: &mut egui::Ui) {
        let mut clear_requested = false;
        {
            let state = &mut self.state;
            ui.horizontal(|ui| {
                ui.label("Search:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.search)
                        .desired_width(180.0)
                        .hint_text("code or name"),
                );
                if state.focus_search {
                    response.request_focus();
                    state.focus_search = false;
                }
                if response.changed() {
                    state.needs_reload = true;
                }

                ui.label("Category:");
                let category_text = if state.category_filter.is_empty() {
                    "All".to_string()
                } else {
                    state.category_filter.clone()
                };
                let categories = state.categories.clone();
                egui::ComboBox::from_id_salt("category_filter")
                    .selected_text(category_text)
                    .show_ui(ui, |ui| {
                        if ui
                            .selectable_value(&mut state.category_filter, String::new(), "All")
                            .clicked()
                        {
                            state.needs_reload = true;
                        }
                        for category in categories {
                            if ui
                                .selectable_value(
                                    &mut state.category_filter,
                                    category.clone(),
                                    &category,
                                )
                                .clicked()
                            {
                                state.needs_reload = true;
                            }
                        }
                    });

                ui.label("Location:");
                let location_text = if state.location_filter.is_empty() {
                    "All".to_string()
                } else {
                    state.location_filter.clone()
                };
                let locations = state.locations.clone();
                egui::ComboBox::from_id_salt("location_filter")
                    .selected_text(location_text)
                    .show_ui(ui, |ui| {
                        if ui
                            .selectable_value(&mut state.location_filter, String::new(), "All")
                            .clicked()
                        {
                            state.needs_reload = true;
                        }
                        for location in locations {
                            if ui
                                .selectable_value(
                                    &mut state.location_filter,
                                    location.clone(),
                                    &location,
                                )
                                .clicked()
                            {
                                state.needs_reload = true;
                            }
                        }
                    });

                let low_label = match state.low_stock_limit {
                    Some(limit) => format!("Low stock: <= {}", limit),
                    None => "Low stock...".to_string(),
                };
                if ui.button(low_label).clicked() {
                    state.threshold_input = Some(
                        state
                            .low_stock_limit
                            .map(|l| l.to_string())
                            .unwrap_or_default(),
                    );
                }
                if ui.button("Clear filters").clicked() {
                    clear_requested = true;
                }
            });
        }
        if clear_requested {
            self.clear_filters();
        }
    }

    fn action_row(&mut self, ui: &mut egui::Ui) {
        let mut open_add = false;
        let mut open_edit = false;
        let mut open_duplicate = false;
        let mut request_delete = false;
        let mut export_requested = false;

        let has_selection = self.state.selected.is_some();
        ui.horizontal(|ui| {
            if ui.button("New").clicked() {
                open_add = true;
            }
            if ui
                .add_enabled(has_selection, egui::Button::new("Edit"))
                .clicked()
            {
                open_edit = true;
            }
            if ui
                .add_enabled(has_selection, egui::Button::new("Duplicate"))
                .clicked()
            {
                open_duplicate = true;
            }
            if ui
                .add_enabled(has_selection, egui::Button::new("Delete"))
                .clicked()
            {
                request_delete = true;
            }
            ui.separator();
            if ui.button("Export CSV").clicked() {
                export_requested = true;
            }
            if ui.button("Refresh").clicked() {
                self.state.needs_reload = true;
            }
        });

        if open_add {
            self.state.form = Some(ProductForm::add());
        }
        if open_edit {
            self.edit_selected();
        }
        if open_duplicate {
            self.duplicate_selected();
        }
        if request_delete {
            self.request_delete_selected();
        }
        if export_requested {
            self.export_dialog();
        }
    }

    fn table(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;
        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("manager_table")
                .striped(true)
                .spacing([16.0, 4.0])
                .min_col_width(24.0)
                .show(ui, |ui| {
                    for (title, key) in COLUMNS {
                        match key {
                            Some(key) => {
                                let mut label = title.to_string();
                                if state.sort == Some(key) {
                                    label.push_str(if state.descending {
                                        " (desc)"
                                    } else {
                                        " (asc)"
                                    });
                                }
                                if ui.button(label).clicked() {
                                    if state.sort == Some(key) {
                                        state.descending = !state.descending;
                                    } else {
                                        state.sort = Some(key);
                                        state.descending = false;
                                    }
                                    state.needs_reload = true;
                                }
                            }
                            None => {
                                ui.strong(title);
                            }
                        }
                    }
                    ui.end_row();

                    for product in &state.products {
                        let is_selected = state.selected == Some(product.id);
                        let low = product.quantity <= LOW_STOCK_WARNING;
                        let cells = format::row_cells(product);
                        for cell in &cells {
                            let text = if low {
                                egui::RichText::new(cell).color(LOW_STOCK_COLOR)
                            } else {
                                egui::RichText::new(cell)
                            };
                            let response = ui.selectable_label(is_selected, text);
                            if response.clicked() {
                                state.selected = Some(product.id);
                            }
                            if response.double_clicked() {
                                state.form = Some(ProductForm::edit(product));
                            }
                        }
                        ui.end_row();
                    }
                });
            if state.products.is_empty() {
                ui.label("No products match the current view.");
            }
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        let shown_value: f64 = self.state.products.iter().map(|p| p.line_value()).sum();
        ui.horizontal(|ui| {
            ui.label(format!("Products shown: {}", self.state.products.len()));
            ui.separator();
            ui.label(format!("Shown value: {}", format_money(shown_value)));
            ui.separator();
            ui.label(format!(
                "Total inventory value: {}",
                format_money(self.state.total_value)
            ));
            if !self.state.status.is_empty() {
                ui.separator();
                ui.label(self.state.status.clone());
            }
        });
    }

    fn save_form(&mut self) {
        let Some(form) = self.state.form.as_ref() else {
            return;
        };
        match save_to_store(form, &self.store) {
            Ok(status) => {
                self.state.form = None;
                self.state.status = status;
                self.state.needs_reload = true;
            }
            Err(message) => {
                if let Some(form) = self.state.form.as_mut() {
                    form.error = Some(message);
                }
            }
        }
    }

    fn form_window(&mut self, ctx: &egui::Context) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        match show_form(ctx, form) {
            FormAction::Save => self.save_form(),
            FormAction::Cancel => self.state.form = None,
            FormAction::None => {}
        }
    }

    fn confirm_delete_dialog(&mut self, ctx: &egui::Context) {
        let Some((id, code)) = self.state.confirm_delete.clone() else {
            return;
        };
        let mut do_delete = false;
        let mut cancel = false;
        egui::Window::new("Delete product")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Delete product '{}' (id {})?", code, id));
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                    if ui.button("Delete").clicked() {
                        do_delete = true;
                    }
                });
                if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    do_delete = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancel = true;
                }
            });
        if do_delete {
            match self.store.delete(id) {
                Ok(()) => {
                    self.state.status = format!("Deleted product '{}'.", code);
                    self.state.selected = None;
                    self.state.needs_reload = true;
                }
                Err(e) => {
                    log::error!("Delete failed: {}", e);
                    self.state.status = format!("Error: {}", e);
                }
            }
            self.state.confirm_delete = None;
        } else if cancel {
            self.state.confirm_delete = None;
        }
    }

    fn threshold_dialog(&mut self, ctx: &egui::Context) {
        let mut apply = false;
        let mut cancel = false;
        let mut clear = false;
        let has_limit = self.state.low_stock_limit.is_some();
        {
            let Some(buffer) = self.state.threshold_input.as_mut() else {
                return;
            };
            egui::Window::new("Low-stock threshold")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Show products with quantity at or below:");
                    ui.text_edit_singleline(buffer);
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        if ui.button("Cancel").clicked() {
                            cancel = true;
                        }
                        if has_limit && ui.button("Clear").clicked() {
                            clear = true;
                        }
                        if ui.button("Apply").clicked() {
                            apply = true;
                        }
                    });
                    if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        apply = true;
                    }
                    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                        cancel = true;
                    }
                });
        }
        if apply {
            let entry = self.state.threshold_input.take().unwrap_or_default();
            match parse_quantity(&entry) {
                Ok(limit) => {
                    self.state.low_stock_limit = Some(limit);
                    self.state.needs_reload = true;
                    self.state.status = format!("Showing products with quantity <= {}", limit);
                }
                Err(e) => {
                    self.state.status = format!("Error: {}", e);
                    self.state.threshold_input = Some(entry);
                }
            }
        } else if clear {
            self.state.threshold_input = None;
            self.state.low_stock_limit = None;
            self.state.needs_reload = true;
            self.state.status = "Low-stock filter cleared.".to_string();
        } else if cancel {
            self.state.threshold_input = None;
        }
    }
}

impl eframe::App for ManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.needs_reload {
            self.reload();
        }
        self.handle_shortcuts(ctx);

        egui::TopBottomPanel::top("manager_toolbar").show(ctx, |ui| self.toolbar(ui));
        egui::TopBottomPanel::bottom("manager_status").show(ctx, |ui| self.status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.table(ui));

        self.form_window(ctx);
        self.confirm_delete_dialog(ctx);
        self.threshold_dialog(ctx);
    }
}

/// Opens the management window over the given catalog.
pub fn launch_manager(store: Store) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([1150.0, 680.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stockroom - Inventory Manager",
        options,
        Box::new(move |_cc| Ok(Box::new(ManagerApp::new(store)))),
    )
}
