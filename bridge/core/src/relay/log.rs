//! Log relay: UI diagnostics to the developer console and the host log.

use std::sync::Arc;

use tracing::info;

use crate::events::LogPayload;
use crate::host::HostPlatform;

/// Target used for the local developer sink
pub const UI_LOG_TARGET: &str = "easel::ui";

/// Forwards UI log messages, best-effort
///
/// Nothing is reported back to the UI, and neither sink can fail the other.
pub struct LogRelay<H: HostPlatform> {
    host: Arc<H>,
    prefix: String,
}

impl<H: HostPlatform> LogRelay<H> {
    /// Create a relay; `prefix` tags local console lines and may be empty
    pub fn new(host: Arc<H>, prefix: impl Into<String>) -> Self {
        Self {
            host,
            prefix: prefix.into(),
        }
    }

    /// Prefix applied to local console lines
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handle one UI log message
    pub fn on_log(&self, payload: &LogPayload) {
        if self.prefix.is_empty() {
            info!(target: UI_LOG_TARGET, "{payload}");
        } else {
            info!(target: UI_LOG_TARGET, "{} {payload}", self.prefix);
        }

        self.host.log(payload);
    }
}
