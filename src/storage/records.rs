//! Media records storage
//!
//! Records live in a single JSON array file. Every operation reloads the file,
//! so there is no in-memory cache to invalidate. Read and write failures are
//! logged and swallowed: a broken file behaves like an empty store.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::core::error::AppResult;

/// Kind of media attached to a channel post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Document,
    Video,
    Photo,
}

impl MediaKind {
    /// Title used when the post has no caption
    pub fn default_title(self, source_message_id: i32) -> String {
        let label = match self {
            MediaKind::Document => "Document",
            MediaKind::Video => "Video",
            MediaKind::Photo => "Photo",
        };
        format!("{} {}", label, source_message_id)
    }
}

/// A stored reference to one piece of channel media
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Callback identifier, the decimal form of `source_message_id`
    pub id: String,
    /// Caption or synthesized default
    pub title: String,
    /// Telegram file_id used to resend the media without re-uploading
    #[serde(rename = "file_id")]
    pub file_ref: String,
    /// Message id of the post in the source channel
    #[serde(rename = "msg_id")]
    pub source_message_id: i32,
    /// Absent in files written before kinds were tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
}

impl MediaRecord {
    pub fn new(title: impl Into<String>, file_ref: impl Into<String>, source_message_id: i32, kind: MediaKind) -> Self {
        Self {
            id: source_message_id.to_string(),
            title: title.into(),
            file_ref: file_ref.into(),
            source_message_id,
            kind: Some(kind),
        }
    }
}

/// Result of an upsert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new record was appended
    Inserted,
    /// A record for the same source message was overwritten
    Updated,
}

/// Persistent owner of the media records.
///
/// Implementations never propagate I/O errors to callers; see the module docs.
pub trait RecordStore: Send + Sync {
    /// All records in insertion order. Empty if the backing store is missing or unreadable.
    fn load(&self) -> Vec<MediaRecord>;

    /// Replace the stored records.
    fn save(&self, records: &[MediaRecord]);

    /// Insert a record, or update title and file reference of the record with the
    /// same `source_message_id`.
    fn upsert(&self, title: &str, file_ref: &str, source_message_id: i32, kind: MediaKind) -> UpsertOutcome;

    /// Record with the given callback id.
    fn find(&self, id: &str) -> Option<MediaRecord> {
        self.load().into_iter().find(|record| record.id == id)
    }

    fn is_empty(&self) -> bool {
        self.load().is_empty()
    }
}

/// Flat JSON file store.
///
/// Upserts are read-modify-write cycles over the whole file; `write_lock`
/// serializes them within the process. Other processes writing the same
/// file are not coordinated with.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the backing file, reporting why it could not be used.
    ///
    /// A missing file is not an error and yields an empty list.
    pub fn try_load(&self) -> AppResult<Vec<MediaRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs_err::read_to_string(&self.path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        // The file may hold valid JSON that isn't a list (e.g. `{}` after a manual edit)
        if !value.is_array() {
            log::warn!("Store file {} does not contain a JSON array, ignoring it", self.path.display());
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Writes the full record list, creating parent directories on demand.
    pub fn try_save(&self, records: &[MediaRecord]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        fs_err::write(&self.path, json)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> Vec<MediaRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to load store {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[MediaRecord]) {
        if let Err(e) = self.try_save(records) {
            log::error!("Failed to save store {}: {}", self.path.display(), e);
        }
    }

    fn upsert(&self, title: &str, file_ref: &str, source_message_id: i32, kind: MediaKind) -> UpsertOutcome {
        // Poisoning only means another upsert panicked mid-write; the file is reloaded anyway.
        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut records = self.load();
        let outcome = match records
            .iter_mut()
            .find(|record| record.source_message_id == source_message_id)
        {
            Some(existing) => {
                existing.title = title.to_string();
                existing.file_ref = file_ref.to_string();
                existing.kind = Some(kind);
                UpsertOutcome::Updated
            }
            None => {
                records.push(MediaRecord::new(title, file_ref, source_message_id, kind));
                UpsertOutcome::Inserted
            }
        };
        self.save(&records);
        outcome
    }
}
