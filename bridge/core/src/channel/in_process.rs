//! In-Process UI Channel
//!
//! Direct channel-based delivery for an embedded UI process.
//!
//! # Usage
//!
//! ```ignore
//! let (ui, mut inbox) = InProcessUiChannel::new_pair();
//!
//! // Give `ui` to the Bridge, hand `inbox` to the UI process
//! while let Some(msg) = inbox.recv().await {
//!     render(msg);
//! }
//! ```

use tokio::sync::mpsc;

use crate::messages::UiMessage;

use super::traits::{ChannelError, UiChannel};

/// In-process UI channel using an unbounded tokio channel
///
/// Unbounded so a push never waits on the UI; bursts of host events become
/// a matching burst of queued messages on the UI side.
#[derive(Clone, Debug)]
pub struct InProcessUiChannel {
    /// Sender half feeding the UI's inbound ports
    tx: mpsc::UnboundedSender<UiMessage>,
}

impl InProcessUiChannel {
    /// Create a channel pair
    ///
    /// Returns:
    /// - `InProcessUiChannel`: give this to the Bridge
    /// - `mpsc::UnboundedReceiver<UiMessage>`: the UI process reads here
    #[must_use]
    pub fn new_pair() -> (Self, mpsc::UnboundedReceiver<UiMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl UiChannel for InProcessUiChannel {
    fn send(&self, message: UiMessage) -> Result<(), ChannelError> {
        self.tx.send(message).map_err(|err| ChannelError::Closed {
            port: err.0.port(),
        })
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}
