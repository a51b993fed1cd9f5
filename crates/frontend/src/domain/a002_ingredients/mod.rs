pub mod api;
pub mod editable;
pub mod ui;
