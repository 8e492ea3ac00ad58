//! Small conversions shared by list pages and filters.

use contracts::shared::labels::{KeyValue, Labels};

/// `key=value`, or just `key` when the value is empty
pub fn join_key_value_as_string(key: &str, value: &str) -> String {
    if value.is_empty() {
        key.to_string()
    } else {
        format!("{}={}", key, value)
    }
}

/// Split on the first `=`; without one the whole string is the key
pub fn split_string_as_key_value(raw: &str) -> KeyValue {
    match raw.split_once('=') {
        Some((key, value)) => KeyValue::new(key.trim(), value.trim()),
        None => KeyValue::new(raw.trim(), ""),
    }
}

/// Labels as `key=value` strings, ordered by key
pub fn labels_as_strings(labels: &Labels) -> Vec<String> {
    labels
        .iter()
        .map(|(k, v)| join_key_value_as_string(k, v))
        .collect()
}

/// Human readable byte count, e.g. `1.5 MB`
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_key_value() {
        assert_eq!(join_key_value_as_string("type", "spdx"), "type=spdx");
        assert_eq!(join_key_value_as_string("importer", ""), "importer");
    }

    #[test]
    fn test_split_on_first_equals() {
        let kv = split_string_as_key_value("source=a=b");
        assert_eq!(kv.key, "source");
        assert_eq!(kv.value, "a=b");
        let kv = split_string_as_key_value("importer");
        assert_eq!(kv.key, "importer");
        assert_eq!(kv.value, "");
    }

    #[test]
    fn test_labels_as_strings() {
        let labels: Labels = [
            ("type".to_string(), "spdx".to_string()),
            ("file".to_string(), String::new()),
        ]
        .into_iter()
        .collect();
        assert_eq!(labels_as_strings(&labels), vec!["file", "type=spdx"]);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(500 * 1024 * 1024), "500.0 MB");
    }
}
