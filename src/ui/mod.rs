//! Windowed front-ends built on eframe.

mod app;
mod browser;
mod components;
mod state;

pub use app::launch_manager;
pub use browser::launch_browser;
