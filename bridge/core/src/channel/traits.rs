//! UI Channel Traits
//!
//! Capability interface for pushing messages into the UI process.

use std::sync::Arc;

use thiserror::Error;

use crate::messages::{UiMessage, UiPort};

/// Errors that can occur while pushing to the UI
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The UI process stopped listening on a port
    #[error("UI port `{port}` is closed")]
    Closed {
        /// Port the message was meant for
        port: UiPort,
    },
}

/// Push side of the UI process's inbound ports
///
/// `send` must not block or suspend: the bridge dispatches on a single
/// cooperative thread and a push that waits stalls every relay.
pub trait UiChannel: Send + Sync {
    /// Deliver one message to the port named by [`UiMessage::port`]
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::Closed`] if the UI side has gone away.
    fn send(&self, message: UiMessage) -> Result<(), ChannelError>;

    /// Whether the UI side is still listening
    fn is_open(&self) -> bool;
}

impl<T: UiChannel + ?Sized> UiChannel for Arc<T> {
    fn send(&self, message: UiMessage) -> Result<(), ChannelError> {
        (**self).send(message)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}
