//! Stockroom: a local warehouse inventory manager.
//!
//! Products live in a single-table SQLite catalog. Three front-ends
//! sit on top of the same record store: a menu-driven console, a
//! keyboard-driven table browser, and a management window.

pub mod console;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
pub mod parse;
pub mod store;
pub mod ui;

pub use error::{StoreError, StoreResult};
pub use export::export_csv;
pub use models::{NewProduct, Product, ProductChanges, SortKey};
pub use store::Store;
