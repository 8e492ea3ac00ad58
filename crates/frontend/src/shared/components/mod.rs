pub mod file_uploader;
pub mod filter_panel;
pub mod filter_toolbar;
pub mod manage_columns;
pub mod not_found;
pub mod pagination_controls;
pub mod table;
pub mod ui;
