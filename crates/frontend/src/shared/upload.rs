//! Bookkeeping for multi-file uploads.
//!
//! The tracker knows nothing about HTTP: a page adds files, sends the ones that
//! validated, and reports progress and outcome back by entry id.

use thiserror::Error;
use uuid::Uuid;

use crate::shared::model_utils::format_bytes;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("{0}: only .json and .json.bz2 files are accepted")]
    UnsupportedExtension(String),

    #[error("{name} is {size} but the upload limit is {limit}")]
    TooLarge {
        name: String,
        size: String,
        limit: String,
    },

    #[error("{0} is empty")]
    Empty(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadContentType {
    Json,
    JsonBzip2,
}

impl UploadContentType {
    pub fn mime(&self) -> &'static str {
        match self {
            UploadContentType::Json => "application/json",
            UploadContentType::JsonBzip2 => "application/json+bzip2",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        if lower.ends_with(".json") {
            Some(UploadContentType::Json)
        } else if lower.ends_with(".bz2") {
            Some(UploadContentType::JsonBzip2)
        } else {
            None
        }
    }
}

/// Accepted `<input accept>` value
pub const ACCEPTED_EXTENSIONS: &str = ".json,.bz2";

pub fn validate_file(name: &str, size: u64, limit: u64) -> Result<UploadContentType, UploadError> {
    let content_type = UploadContentType::from_file_name(name)
        .ok_or_else(|| UploadError::UnsupportedExtension(name.to_string()))?;
    if size == 0 {
        return Err(UploadError::Empty(name.to_string()));
    }
    if size > limit {
        return Err(UploadError::TooLarge {
            name: name.to_string(),
            size: format_bytes(size),
            limit: format_bytes(limit),
        });
    }
    Ok(content_type)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UploadStatus {
    InProgress { percent: u8 },
    Success,
    Danger { message: String },
}

impl UploadStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, UploadStatus::InProgress { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    pub id: Uuid,
    pub file_name: String,
    pub size: u64,
    pub content_type: Option<UploadContentType>,
    pub status: UploadStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadTracker {
    entries: Vec<UploadEntry>,
}

impl UploadTracker {
    pub fn entries(&self) -> &[UploadEntry] {
        &self.entries
    }

    /// Register a file. Rejected files are stored as failed right away and
    /// must not be sent; the returned content type says whether to send.
    pub fn add_file(
        &mut self,
        file_name: &str,
        size: u64,
        limit: u64,
    ) -> (Uuid, Option<UploadContentType>) {
        let id = Uuid::new_v4();
        let (content_type, status) = match validate_file(file_name, size, limit) {
            Ok(content_type) => (Some(content_type), UploadStatus::InProgress { percent: 0 }),
            Err(e) => {
                log::warn!("rejected upload: {}", e);
                (
                    None,
                    UploadStatus::Danger {
                        message: e.to_string(),
                    },
                )
            }
        };
        self.entries.push(UploadEntry {
            id,
            file_name: file_name.to_string(),
            size,
            content_type,
            status,
        });
        (id, content_type)
    }

    fn entry_mut(&mut self, id: Uuid) -> Option<&mut UploadEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn set_progress(&mut self, id: Uuid, percent: u8) {
        if let Some(entry) = self.entry_mut(id) {
            if !entry.status.is_finished() {
                entry.status = UploadStatus::InProgress {
                    percent: percent.min(100),
                };
            }
        }
    }

    pub fn mark_success(&mut self, id: Uuid) {
        if let Some(entry) = self.entry_mut(id) {
            entry.status = UploadStatus::Success;
        }
    }

    pub fn mark_failed(&mut self, id: Uuid, message: impl Into<String>) {
        if let Some(entry) = self.entry_mut(id) {
            entry.status = UploadStatus::Danger {
                message: message.into(),
            };
        }
    }

    pub fn remove(&mut self, id: Uuid) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn success_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == UploadStatus::Success)
            .count()
    }

    pub fn is_uploading(&self) -> bool {
        self.entries.iter().any(|e| !e.status.is_finished())
    }

    /// `1 of 2 files uploaded`
    pub fn summary_text(&self) -> String {
        format!(
            "{} of {} files uploaded",
            self.success_count(),
            self.entries.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 500 * 1024 * 1024;

    #[test]
    fn test_content_types() {
        assert_eq!(validate_file("sbom.json", 10, LIMIT), Ok(UploadContentType::Json));
        assert_eq!(
            validate_file("sbom.JSON.bz2", 10, LIMIT),
            Ok(UploadContentType::JsonBzip2)
        );
        assert_eq!(UploadContentType::JsonBzip2.mime(), "application/json+bzip2");
        assert!(matches!(
            validate_file("sbom.xml", 10, LIMIT),
            Err(UploadError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            validate_file("big.json", LIMIT + 1, LIMIT),
            Err(UploadError::TooLarge { .. })
        ));
        assert!(matches!(validate_file("empty.json", 0, LIMIT), Err(UploadError::Empty(_))));
    }

    #[test]
    fn test_one_of_two_uploaded() {
        let mut tracker = UploadTracker::default();
        let (ok, ok_type) = tracker.add_file("a.json", 100, LIMIT);
        let (bad, _) = tracker.add_file("b.json", 100, LIMIT);
        assert_eq!(ok_type, Some(UploadContentType::Json));
        assert!(tracker.is_uploading());

        tracker.set_progress(ok, 50);
        tracker.mark_success(ok);
        tracker.mark_failed(bad, "HTTP 400: invalid document");

        assert_eq!(tracker.summary_text(), "1 of 2 files uploaded");
        assert_eq!(tracker.entries()[0].status, UploadStatus::Success);
        assert!(matches!(tracker.entries()[1].status, UploadStatus::Danger { .. }));
        assert!(!tracker.is_uploading());
    }

    #[test]
    fn test_unsupported_second_file_leaves_one_of_two() {
        let mut tracker = UploadTracker::default();
        let (ok, ok_type) = tracker.add_file("a.json", 100, LIMIT);
        let (_, xml_type) = tracker.add_file("b.xml", 100, LIMIT);
        assert_eq!(ok_type, Some(UploadContentType::Json));
        assert_eq!(xml_type, None);

        tracker.mark_success(ok);

        assert_eq!(tracker.summary_text(), "1 of 2 files uploaded");
        assert_eq!(tracker.entries()[0].status, UploadStatus::Success);
        assert!(matches!(tracker.entries()[1].status, UploadStatus::Danger { .. }));
        assert_eq!(tracker.entries()[1].content_type, None);
        assert!(!tracker.is_uploading());
    }

    #[test]
    fn test_rejected_file_is_danger_without_request() {
        let mut tracker = UploadTracker::default();
        let (id, content_type) = tracker.add_file("notes.txt", 100, LIMIT);
        assert_eq!(content_type, None);
        assert!(matches!(tracker.entries()[0].status, UploadStatus::Danger { .. }));

        // late progress does not resurrect a finished entry
        tracker.set_progress(id, 10);
        assert!(tracker.entries()[0].status.is_finished());

        tracker.remove(id);
        assert_eq!(tracker.summary_text(), "0 of 0 files uploaded");
    }
}
