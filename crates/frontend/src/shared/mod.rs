pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod icons;
pub mod list_utils;
pub mod model_utils;
pub mod page_frame;
pub mod page_standard;
pub mod purl;
pub mod query;
pub mod route_params;
pub mod selection;
pub mod table_controls;
pub mod upload;
