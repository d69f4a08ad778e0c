// ── JSON file stack store ──
//
// One pretty-printed JSON document per device (`device-<id>.json`).
// Commits write a temp file in the same directory and rename it over the
// target, so a crash leaves either the old or the new record.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{StackRecord, StackStore, StoreError};
use crate::model::DeviceId;

const PREFIX: &str = "device-";
const EXTENSION: &str = "json";

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record_path(&self, device: DeviceId) -> PathBuf {
        self.dir.join(format!("{PREFIX}{device}.{EXTENSION}"))
    }
}

fn device_from_file_name(name: &str) -> Option<DeviceId> {
    let id = name.strip_prefix(PREFIX)?.strip_suffix(".json")?;
    id.parse::<DeviceId>().ok().filter(|d| d.is_valid())
}

impl StackStore for JsonFileStore {
    fn load(&self, device: DeviceId) -> Result<StackRecord, StoreError> {
        match fs::read_to_string(self.record_path(device)) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(StackRecord::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn commit(&self, device: DeviceId, record: StackRecord) -> Result<(), StoreError> {
        let path = self.record_path(device);
        if record.is_empty() {
            return match fs::remove_file(&path) {
                Ok(()) => {
                    debug!(device = %device, path = %path.display(), "removed stack record");
                    Ok(())
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            };
        }

        let body = serde_json::to_vec_pretty(&record)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        debug!(device = %device, path = %path.display(), "wrote stack record");
        Ok(())
    }

    fn devices(&self) -> Result<Vec<DeviceId>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(id) = entry.file_name().to_str().and_then(device_from_file_name) {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
