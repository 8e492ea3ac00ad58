pub mod hub;
pub mod labels;
pub mod license;
