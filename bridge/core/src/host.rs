//! Host Platform
//!
//! Capability interface for the extension host: the broadcaster configuration
//! record, the persistence write, and the diagnostic log. The host is the
//! single source of truth for the record; the bridge never caches it.
//!
//! All calls are fire-and-forget. Writes and logs return nothing because the
//! host offers no acknowledgment path; a rejected write is the platform's
//! problem, not the bridge's.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::PersistedRecord;
use crate::events::LogPayload;

/// Extension host capability
///
/// Implementations must not block or suspend.
pub trait HostPlatform: Send + Sync {
    /// Current broadcaster record, `None` until the broadcaster first saves
    fn broadcaster_configuration(&self) -> Option<PersistedRecord>;

    /// Persist a record (one-way)
    fn set_configuration(&self, record: PersistedRecord);

    /// Forward a diagnostic message to the host's log (one-way)
    fn log(&self, message: &LogPayload);
}

impl<T: HostPlatform + ?Sized> HostPlatform for Arc<T> {
    fn broadcaster_configuration(&self) -> Option<PersistedRecord> {
        (**self).broadcaster_configuration()
    }

    fn set_configuration(&self, record: PersistedRecord) {
        (**self).set_configuration(record);
    }

    fn log(&self, message: &LogPayload) {
        (**self).log(message);
    }
}

/// In-memory host platform
///
/// Stores the broadcaster record and keeps a journal of every write and log
/// call. Used when embedding the bridge without a real host, and in tests.
#[derive(Debug, Default)]
pub struct MemoryHost {
    broadcaster: Mutex<Option<PersistedRecord>>,
    writes: Mutex<Vec<PersistedRecord>>,
    logs: Mutex<Vec<LogPayload>>,
}

impl MemoryHost {
    /// Host with no broadcaster record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose broadcaster record already holds `content`
    pub fn with_broadcaster_content(content: impl Into<String>) -> Self {
        let host = Self::new();
        *host.broadcaster.lock() = Some(PersistedRecord::broadcaster(content));
        host
    }

    /// Replace the stored record without journaling a write
    ///
    /// Simulates another writer updating the record.
    pub fn put_broadcaster(&self, record: Option<PersistedRecord>) {
        *self.broadcaster.lock() = record;
    }

    /// Every record written through [`HostPlatform::set_configuration`], in order
    #[must_use]
    pub fn writes(&self) -> Vec<PersistedRecord> {
        self.writes.lock().clone()
    }

    /// Every payload forwarded through [`HostPlatform::log`], in order
    #[must_use]
    pub fn logs(&self) -> Vec<LogPayload> {
        self.logs.lock().clone()
    }
}

impl HostPlatform for MemoryHost {
    fn broadcaster_configuration(&self) -> Option<PersistedRecord> {
        self.broadcaster.lock().clone()
    }

    fn set_configuration(&self, record: PersistedRecord) {
        *self.broadcaster.lock() = Some(record.clone());
        self.writes.lock().push(record);
    }

    fn log(&self, message: &LogPayload) {
        self.logs.lock().push(message.clone());
    }
}
