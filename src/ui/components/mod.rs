mod product_form;

pub use product_form::{save_to_store, show_form, FormAction, ProductForm};
