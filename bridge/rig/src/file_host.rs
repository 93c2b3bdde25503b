//! File-backed host platform for the developer rig.
//!
//! The broadcaster record lives in a single JSON file. A missing file means
//! the broadcaster has never saved. Every write replaces the file and then
//! fires a configuration-changed event, as the real host does for every
//! scope write. The host holds its own event sender, so the rig ends its
//! loop on the UI source rather than on the host source.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use easel_bridge_core::{HostEvent, HostPlatform, LogPayload, PersistedRecord};

/// Log target for diagnostics forwarded to the rig console
pub const RIG_LOG_TARGET: &str = "easel::rig";

/// Host platform simulated on top of a JSON file
pub struct FileHost {
    path: PathBuf,
    events: Mutex<Option<mpsc::UnboundedSender<HostEvent>>>,
}

impl FileHost {
    /// Create a host storing its record at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            events: Mutex::new(None),
        }
    }

    /// Fire configuration-changed events on `events` after each write
    pub fn notify_on(&self, events: &mpsc::UnboundedSender<HostEvent>) {
        *self.events.lock() = Some(events.clone());
    }

    /// File backing the broadcaster record
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, record: &PersistedRecord) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn notify_changed(&self) {
        match self.events.lock().as_ref() {
            Some(tx) => {
                if tx.send(HostEvent::ConfigurationChanged).is_err() {
                    debug!("Bridge gone, change notification dropped");
                }
            }
            None => debug!("No event listener, change notification dropped"),
        }
    }
}

impl HostPlatform for FileHost {
    fn broadcaster_configuration(&self) -> Option<PersistedRecord> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Failed to read broadcaster record");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Broadcaster record file is corrupt");
                None
            }
        }
    }

    fn set_configuration(&self, record: PersistedRecord) {
        match self.write_record(&record) {
            Ok(()) => {
                info!(
                    path = %self.path.display(),
                    version = %record.version,
                    "Broadcaster record written"
                );
                self.notify_changed();
            }
            // Rejected writes are not reported to the bridge
            Err(e) => warn!(error = %e, path = %self.path.display(), "Write rejected"),
        }
    }

    fn log(&self, message: &LogPayload) {
        info!(target: RIG_LOG_TARGET, "{message}");
    }
}
