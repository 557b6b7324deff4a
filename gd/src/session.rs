//! Session handoff between the wizard and the results view
//!
//! A single persisted slot, keyed by [`SESSION_KEY`], holds the serialized
//! [`WizardAnswers`]. The wizard writes it once on submission; the results
//! view reads it on entry. Only an explicit restart clears it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::WizardAnswers;

/// Key of the handoff slot
pub const SESSION_KEY: &str = "analysisData";

/// Errors writing or clearing the handoff slot
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persisted single-slot store for completed wizard answers
///
/// `load` never fails: a missing, unreadable or unparseable slot is reported
/// as `None` so the caller can send the user back to the wizard.
pub trait SessionStore: Send + Sync {
    fn save(&self, answers: &WizardAnswers) -> Result<(), SessionError>;
    fn load(&self) -> Option<WizardAnswers>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// File-backed store: a small JSON document of key → value slots
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Option<BTreeMap<String, serde_json::Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "read_slots: no session file");
                return None;
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "read_slots: failed to read session file");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(slots) => Some(slots),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "read_slots: session file is not a JSON object");
                None
            }
        }
    }

    fn write_slots(&self, slots: &BTreeMap<String, serde_json::Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        // Write-then-rename so a reader never sees a half-written slot
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(slots)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, answers: &WizardAnswers) -> Result<(), SessionError> {
        debug!(path = ?self.path, "FileSessionStore::save: called");
        let mut slots = self.read_slots().unwrap_or_default();
        slots.insert(SESSION_KEY.to_string(), serde_json::to_value(answers)?);
        self.write_slots(&slots)?;
        info!(path = ?self.path, "Session saved");
        Ok(())
    }

    fn load(&self) -> Option<WizardAnswers> {
        debug!(path = ?self.path, "FileSessionStore::load: called");
        let mut slots = self.read_slots()?;
        let value = slots.remove(SESSION_KEY)?;
        match serde_json::from_value(value) {
            Ok(answers) => Some(answers),
            Err(e) => {
                warn!(error = %e, "FileSessionStore::load: session slot is corrupt");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), SessionError> {
        debug!(path = ?self.path, "FileSessionStore::clear: called");
        let Some(mut slots) = self.read_slots() else {
            // Nothing readable to keep; drop whatever is there
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        };
        if slots.remove(SESSION_KEY).is_some() {
            self.write_slots(&slots)?;
            info!(path = ?self.path, "Session cleared");
        }
        Ok(())
    }
}

/// In-process store holding the serialized slot
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw slot contents as-is, bypassing serialization
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).is_none()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, answers: &WizardAnswers) -> Result<(), SessionError> {
        let json = serde_json::to_string(answers)?;
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(json);
        Ok(())
    }

    fn load(&self) -> Option<WizardAnswers> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        let raw = slot.as_deref()?;
        serde_json::from_str(raw)
            .inspect_err(|e| warn!(error = %e, "MemorySessionStore::load: session slot is corrupt"))
            .ok()
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnalysisType, CityPair};
    use tempfile::TempDir;

    fn sample_answers() -> WizardAnswers {
        WizardAnswers {
            step: 4,
            cities: Some(CityPair::new("Pune", "Chennai")),
            analysis_type: Some(AnalysisType::Hair),
            type_answers: None,
            duration: Some("1-2weeks".to_string()),
        }
    }

    #[test]
    fn test_file_store_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("nested").join("session.json"));

        assert!(store.load().is_none());
        store.save(&sample_answers()).unwrap();
        assert_eq!(store.load(), Some(sample_answers()));

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw[SESSION_KEY]["cities"]["homeCity"], "Pune");
    }

    #[test]
    fn test_file_store_load_survives_repeated_reads() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("session.json"));
        store.save(&sample_answers()).unwrap();

        assert!(store.load().is_some());
        assert!(store.load().is_some());
    }

    #[test]
    fn test_file_store_clear_keeps_other_slots() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = FileSessionStore::new(&path);
        store.save(&sample_answers()).unwrap();
        store.clear().unwrap();

        assert!(store.load().is_none());
        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_file_store_corrupt_file_loads_as_none_and_clears() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().is_none());
        store.clear().unwrap();
        assert!(!path.exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_wrong_shape_loads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, r#"{"analysisData": {"analysisType": "teeth"}}"#).unwrap();

        assert!(FileSessionStore::new(&path).load().is_none());
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::new();
        assert!(store.is_empty());
        store.save(&sample_answers()).unwrap();
        assert_eq!(store.load(), Some(sample_answers()));
        store.clear().unwrap();
        assert!(store.load().is_none());

        let corrupt = MemorySessionStore::with_raw("[1, 2");
        assert!(corrupt.load().is_none());
        assert!(!corrupt.is_empty());
    }
}
