pub mod catalog;
pub mod draft;
pub mod library;
pub mod render;
