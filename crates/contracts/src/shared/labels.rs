use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form labels attached to SBOMs and advisories
pub type Labels = BTreeMap<String, String>;

/// Single label pair, as used by label filters
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
