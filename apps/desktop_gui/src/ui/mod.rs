//! UI layer: app shell, contact listing, forms, and notices.

pub mod app;

pub use app::ContactDeskApp;
