pub mod badge;

pub use badge::{Badge, LabelBadges, SeverityBadge};
