//! Bridge Events
//!
//! Events flowing into the bridge: those emitted by the UI process on its
//! outbound ports, and those delivered by the host platform.
//!
//! Neither kind is interpreted beyond routing. Save payloads are serialized
//! as received and log payloads are forwarded as received.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ExtensionConfig;
use crate::messages::{AuthContext, UiPort};

/// Diagnostic payload emitted by the UI process
///
/// Either a plain string or any structured value; no schema is enforced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogPayload(serde_json::Value);

impl LogPayload {
    /// Wrap a structured payload
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Plain text payload
    pub fn text(message: impl Into<String>) -> Self {
        Self(serde_json::Value::String(message.into()))
    }

    /// Borrow the raw payload
    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<&str> for LogPayload {
    fn from(message: &str) -> Self {
        Self::text(message)
    }
}

impl From<serde_json::Value> for LogPayload {
    fn from(payload: serde_json::Value) -> Self {
        Self(payload)
    }
}

impl fmt::Display for LogPayload {
    // Strings print bare, everything else as compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// Events from the UI process to the bridge
///
/// Wire form is `{"port": "<name>", "payload": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload")]
pub enum UiEvent {
    /// Broadcaster asked to persist a configuration
    #[serde(rename = "saveConfig")]
    SaveConfig(ExtensionConfig),

    /// UI diagnostic message
    #[serde(rename = "log")]
    Log(LogPayload),
}

impl UiEvent {
    /// The port this event arrived on
    #[must_use]
    pub fn port(&self) -> UiPort {
        match self {
            Self::SaveConfig(_) => UiPort::SaveConfig,
            Self::Log(_) => UiPort::Log,
        }
    }
}

/// Events delivered by the host platform
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "host", content = "payload", rename_all = "camelCase")]
pub enum HostEvent {
    /// Session established or token refreshed
    Authorized(AuthContext),

    /// Stored configuration became readable or was rewritten
    ///
    /// Carries no payload; the current record must be re-read.
    ConfigurationChanged,
}
