pub mod severity;

pub use severity::Severity;
