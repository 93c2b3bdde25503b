//! UI Messages
//!
//! Messages pushed from the bridge into the UI process's inbound ports, and
//! the port catalogue shared with [`crate::events`].
//!
//! # Design Philosophy
//!
//! The UI process is an opaque collaborator exposing named ports. It owns all
//! state; the bridge only pushes complete values at it. There is no
//! request/response on any port.

use serde::{Deserialize, Serialize};

use crate::config::ExtensionConfig;

/// Opaque authorization bundle issued by the host
///
/// Forwarded verbatim. The bridge never reads, validates or rewrites it;
/// token verification is the host's business.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthContext(serde_json::Value);

impl AuthContext {
    /// Wrap a host-issued payload
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Borrow the raw payload
    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Messages from the bridge to the UI process
///
/// Wire form is `{"port": "<name>", "payload": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "port", content = "payload")]
pub enum UiMessage {
    /// Host authorization, forwarded on every authorized event
    #[serde(rename = "authorization")]
    Authorization(AuthContext),

    /// Full normalized configuration snapshot
    #[serde(rename = "receiveConfig")]
    ReceiveConfig(ExtensionConfig),
}

impl UiMessage {
    /// The port this message is delivered on
    #[must_use]
    pub fn port(&self) -> UiPort {
        match self {
            Self::Authorization(_) => UiPort::Authorization,
            Self::ReceiveConfig(_) => UiPort::ReceiveConfig,
        }
    }
}

/// Named message ports exposed by the UI process
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiPort {
    /// `authorization`: [`AuthContext`] to the UI
    Authorization,
    /// `receiveConfig`: normalized [`ExtensionConfig`] to the UI
    ReceiveConfig,
    /// `saveConfig`: raw [`ExtensionConfig`] from the UI
    SaveConfig,
    /// `log`: diagnostic payload from the UI
    Log,
}

impl UiPort {
    /// All ports, inbound first
    pub const ALL: [UiPort; 4] = [
        UiPort::Authorization,
        UiPort::ReceiveConfig,
        UiPort::SaveConfig,
        UiPort::Log,
    ];

    /// Port name as the UI process declares it
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Authorization => "authorization",
            Self::ReceiveConfig => "receiveConfig",
            Self::SaveConfig => "saveConfig",
            Self::Log => "log",
        }
    }
}

impl std::fmt::Display for UiPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
