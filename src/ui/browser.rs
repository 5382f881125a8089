//! Keyboard-driven table browser.
//!
//! A single scrollable table over the catalog with one-key commands,
//! a prompt line at the bottom for text entry, and popup windows for
//! record details and the add/edit form.

use eframe::{self, egui};
use egui::ViewportBuilder;

use crate::export;
use crate::format::{self, format_money};
use crate::models::SortKey;
use crate::parse::parse_quantity;
use crate::store::Store;

use super::components::{save_to_store, show_form, FormAction, ProductForm};
use super::state::{BrowserState, Dataset, Prompt};

const PAGE_STEP: i64 = 15;

const KEY_HELP: &str = "arrows/j/k move | Enter details | a add | e edit | d delete | / search | \
                        f filter | o sort | O reverse | r reload | t total | x export | q quit";

pub struct BrowserApp {
    store: Store,
    state: BrowserState,
}

impl BrowserApp {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            state: BrowserState::default(),
        }
    }

    fn reload(&mut self) {
        self.state.needs_reload = false;
        match self
            .state
            .dataset
            .load(&self.store, self.state.sort, self.state.descending)
        {
            Ok(rows) => {
                if rows.is_empty() {
                    self.state.selected = 0;
                } else if self.state.selected >= rows.len() {
                    self.state.selected = rows.len() - 1;
                }
                self.state.rows = rows;
            }
            Err(e) => {
                log::error!("Failed to load products: {}", e);
                self.state.status = format!("Error: {}", e);
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let pressed = |key: egui::Key| ctx.input(|i| i.key_pressed(key));

        if pressed(egui::Key::ArrowDown) || pressed(egui::Key::J) {
            self.move_selection(1);
        }
        if pressed(egui::Key::ArrowUp) || pressed(egui::Key::K) {
            self.move_selection(-1);
        }
        if pressed(egui::Key::PageDown) {
            self.move_selection(PAGE_STEP);
        }
        if pressed(egui::Key::PageUp) {
            self.move_selection(-PAGE_STEP);
        }
        if pressed(egui::Key::Home) {
            self.select_index(0);
        }
        if pressed(egui::Key::End) {
            self.select_index(self.state.rows.len().saturating_sub(1));
        }
        if pressed(egui::Key::Enter) {
            self.open_details();
        }
        if pressed(egui::Key::A) {
            self.state.form = Some(ProductForm::add());
        }
        if pressed(egui::Key::E) {
            self.edit_selected();
        }
        if pressed(egui::Key::D) {
            self.confirm_delete_selected();
        }
        if pressed(egui::Key::Slash) {
            self.open_prompt(Prompt::Search);
        }
        if pressed(egui::Key::F) {
            self.open_prompt(Prompt::FilterMenu);
        }
        if pressed(egui::Key::O) {
            if ctx.input(|i| i.modifiers.shift) {
                self.state.descending = !self.state.descending;
                self.state.needs_reload = true;
            } else {
                self.open_prompt(Prompt::SortField);
            }
        }
        if pressed(egui::Key::R) {
            self.state.needs_reload = true;
            self.state.status = "Reloaded.".to_string();
        }
        if pressed(egui::Key::T) {
            self.show_total();
        }
        if pressed(egui::Key::X) {
            self.open_prompt(Prompt::ExportFile);
        }
        if pressed(egui::Key::Q) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn open_prompt(&mut self, prompt: Prompt) {
        self.state.prompt_input.clear();
        self.state.prompt = Some(prompt);
    }

    fn move_selection(&mut self, delta: i64) {
        let len = self.state.rows.len();
        if len == 0 {
            return;
        }
        let next = (self.state.selected as i64 + delta).clamp(0, len as i64 - 1);
        self.select_index(next as usize);
    }

    fn select_index(&mut self, index: usize) {
        if self.state.rows.is_empty() {
            return;
        }
        self.state.selected = index.min(self.state.rows.len() - 1);
        self.state.scroll_to_selected = true;
    }

    fn open_details(&mut self) {
        if let Some(product) = self.state.rows.get(self.state.selected).cloned() {
            self.state.details = Some(product);
        }
    }

    fn edit_selected(&mut self) {
        if let Some(product) = self.state.rows.get(self.state.selected) {
            self.state.form = Some(ProductForm::edit(product));
        }
    }

    fn confirm_delete_selected(&mut self) {
        if let Some(product) = self.state.rows.get(self.state.selected) {
            let prompt = Prompt::ConfirmDelete {
                id: product.id,
                code: product.code.clone(),
            };
            self.state.prompt_input.clear();
            self.state.prompt = Some(prompt);
        }
    }

    fn show_total(&mut self) {
        match self.store.total_value() {
            Ok(total) => {
                self.state.status = format!("Total inventory value: {}", format_money(total));
            }
            Err(e) => self.state.status = format!("Error: {}", e),
        }
    }

    fn commit_prompt(&mut self) {
        let Some(prompt) = self.state.prompt.take() else {
            return;
        };
        let entry = self.state.prompt_input.trim().to_string();
        self.state.prompt_input.clear();

        match prompt {
            Prompt::Search => {
                self.state.dataset = if entry.is_empty() {
                    Dataset::All
                } else {
                    Dataset::Search(entry)
                };
                self.state.needs_reload = true;
                self.state.status = self.state.dataset.describe();
            }
            Prompt::FilterMenu => match entry.as_str() {
                "1" => self.state.prompt = Some(Prompt::FilterCategory),
                "2" => self.state.prompt = Some(Prompt::FilterLocation),
                "3" => self.state.prompt = Some(Prompt::FilterThreshold),
                "0" => {
                    self.state.dataset = Dataset::All;
                    self.state.needs_reload = true;
                    self.state.status = "Filter cleared.".to_string();
                }
                _ => self.state.status = "Unknown filter option.".to_string(),
            },
            Prompt::FilterCategory => {
                if !entry.is_empty() {
                    self.state.dataset = Dataset::Category(entry);
                    self.state.needs_reload = true;
                    self.state.status = self.state.dataset.describe();
                }
            }
            Prompt::FilterLocation => {
                if !entry.is_empty() {
                    self.state.dataset = Dataset::Location(entry);
                    self.state.needs_reload = true;
                    self.state.status = self.state.dataset.describe();
                }
            }
            Prompt::FilterThreshold => match parse_quantity(&entry) {
                Ok(threshold) => {
                    self.state.dataset = Dataset::LowStock(threshold);
                    self.state.needs_reload = true;
                    self.state.status = self.state.dataset.describe();
                }
                Err(e) => self.state.status = format!("Error: {}", e),
            },
            Prompt::SortField => {
                if entry.is_empty() {
                    self.state.sort = None;
                    self.state.needs_reload = true;
                    self.state.status = "Sort reset to default order.".to_string();
                } else if let Some(key) = SortKey::parse(&entry) {
                    self.state.sort = Some(key);
                    self.state.needs_reload = true;
                    self.state.status = format!("Sorted by {}.", key.label());
                } else {
                    self.state.status = format!("Unknown field '{}'.", entry);
                }
            }
            Prompt::ExportFile => {
                let path = if entry.is_empty() {
                    None
                } else {
                    Some(std::path::PathBuf::from(entry))
                };
                match export::export_csv(&self.store, path.as_deref()) {
                    Ok(written) => {
                        self.state.status = format!("Exported to {}", written.display());
                    }
                    Err(e) => {
                        log::error!("Export failed: {}", e);
                        self.state.status = format!("Error: export failed: {}", e);
                    }
                }
            }
            Prompt::ConfirmDelete { id, code } => {
                if entry.eq_ignore_ascii_case("y") || entry.eq_ignore_ascii_case("yes") {
                    match self.store.delete(id) {
                        Ok(()) => {
                            self.state.status = format!("Deleted product '{}'.", code);
                            self.state.needs_reload = true;
                        }
                        Err(e) => self.state.status = format!("Error: {}", e),
                    }
                } else {
                    self.state.status = "Deletion cancelled.".to_string();
                }
            }
        }
    }

    fn cancel_prompt(&mut self) {
        self.state.prompt = None;
        self.state.prompt_input.clear();
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

    fn header(&self, ui: &mut egui::Ui) {
        let sort_text = match self.state.sort {
            Some(key) => format!(
                "Sort: {}{}",
                key.label(),
                if self.state.descending { " (desc)" } else { "" }
            ),
            None => "Sort: default".to_string(),
        };
        ui.horizontal(|ui| {
            ui.strong("Inventory Browser");
            ui.separator();
            ui.label(self.state.dataset.describe());
            ui.separator();
            ui.label(sort_text);
        });
    }

    fn table(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;
        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("browser_table")
                .striped(true)
                .spacing([16.0, 4.0])
                .min_col_width(24.0)
                .show(ui, |ui| {
                    for title in format::TABLE_HEADERS {
                        ui.strong(title);
                    }
                    ui.end_row();

                    for (index, product) in state.rows.iter().enumerate() {
                        let is_selected = index == state.selected;
                        let cells = format::row_cells(product);
                        for (cell_index, cell) in cells.iter().enumerate() {
                            let response = ui.selectable_label(is_selected, cell.as_str());
                            if cell_index == 0 && is_selected && state.scroll_to_selected {
                                response.scroll_to_me(Some(egui::Align::Center));
                            }
                            if response.clicked() {
                                state.selected = index;
                            }
                            if response.double_clicked() {
                                state.details = Some(product.clone());
                            }
                        }
                        ui.end_row();
                    }
                });
            if state.rows.is_empty() {
                ui.label("No products found.");
            }
        });
        state.scroll_to_selected = false;
    }

    fn status_bar(&mut self, ui: &mut egui::Ui) {
        let Some(label) = self.state.prompt.as_ref().map(|p| p.label()) else {
            ui.horizontal(|ui| {
                ui.label(format!("{} products", self.state.rows.len()));
                if !self.state.status.is_empty() {
                    ui.separator();
                    ui.label(self.state.status.clone());
                }
            });
            ui.label(egui::RichText::new(KEY_HELP).weak());
            return;
        };

        ui.horizontal(|ui| {
            ui.label(label);
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.prompt_input)
                    .desired_width(f32::INFINITY),
            );
            response.request_focus();
        });
        if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            self.commit_prompt();
        } else if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.cancel_prompt();
        }
    }

    fn details_window(&mut self, ctx: &egui::Context) {
        let Some(product) = self.state.details.clone() else {
            return;
        };
        let mut close = false;
        egui::Window::new(format!("Product {}", product.code))
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("product_details")
                    .num_columns(2)
                    .spacing([24.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("ID");
                        ui.label(product.id.to_string());
                        ui.end_row();
                        ui.label("Code");
                        ui.label(&product.code);
                        ui.end_row();
                        ui.label("Name");
                        ui.label(&product.name);
                        ui.end_row();
                        ui.label("Description");
                        ui.label(product.description.as_deref().unwrap_or("-"));
                        ui.end_row();
                        ui.label("Category");
                        ui.label(product.category.as_deref().unwrap_or("-"));
                        ui.end_row();
                        ui.label("Quantity");
                        ui.label(product.quantity.to_string());
                        ui.end_row();
                        ui.label("Price");
                        ui.label(format_money(product.price));
                        ui.end_row();
                        ui.label("Location");
                        ui.label(product.location.as_deref().unwrap_or("-"));
                        ui.end_row();
                        ui.label("Value");
                        ui.label(format_money(product.line_value()));
                        ui.end_row();
                    });
                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    close = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    close = true;
                }
            });
        if close {
            self.state.details = None;
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
}

impl eframe::App for BrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.needs_reload {
            self.reload();
        }

        let dialog_open = self.state.prompt.is_some()
            || self.state.form.is_some()
            || self.state.details.is_some();
        if !dialog_open {
            self.handle_keys(ctx);
        }

        egui::TopBottomPanel::top("browser_header").show(ctx, |ui| self.header(ui));
        egui::TopBottomPanel::bottom("browser_status").show(ctx, |ui| self.status_bar(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.table(ui));

        self.details_window(ctx);
        self.form_window(ctx);
    }
}

/// Opens the table browser window over the given catalog.
pub fn launch_browser(store: Store) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([1100.0, 650.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stockroom - Inventory Browser",
        options,
        Box::new(move |_cc| Ok(Box::new(BrowserApp::new(store)))),
    )
}
