pub mod api_utils;
pub mod config;
pub mod date_utils;
pub mod dialogs;
pub mod error;
pub mod form_utils;
pub mod icons;
pub mod page_frame;
pub mod row_editor;
pub mod scheduler;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;
