pub mod api;
pub mod editable;
pub mod filter;
pub mod ui;
