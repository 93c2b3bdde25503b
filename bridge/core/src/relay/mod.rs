//! Relays
//!
//! One relay per flow between the host and the UI process:
//!
//! | Relay | From | To |
//! |---|---|---|
//! | [`AuthRelay`] | host authorized event | `authorization` port |
//! | [`ConfigInbound`] | host configuration-changed event | `receiveConfig` port |
//! | [`ConfigOutbound`] | `saveConfig` port | host persistence write |
//! | [`LogRelay`] | `log` port | local sink + host log |
//!
//! Each relay is constructed with exactly the capabilities it needs and keeps
//! no state between events. Every handler runs to completion synchronously.

pub mod auth;
pub mod config_channel;
pub mod log;

use thiserror::Error;

use crate::channel::ChannelError;

pub use auth::AuthRelay;
pub use config_channel::{ConfigInbound, ConfigOutbound};
pub use log::LogRelay;

/// Errors a relay can hand back to its caller
#[derive(Debug, Error)]
pub enum RelayError {
    /// The UI side of a port is gone
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// A configuration could not be turned into record content
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
