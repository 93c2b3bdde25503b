//! Authorization relay: host authorized events to the `authorization` port.

use std::sync::Arc;

use tracing::debug;

use crate::channel::UiChannel;
use crate::messages::{AuthContext, UiMessage};

use super::RelayError;

/// Forwards host authorization to the UI, verbatim
///
/// Repeated events (token refresh) are forwarded independently; reconciling
/// them is up to the UI.
pub struct AuthRelay<U: UiChannel> {
    ui: Arc<U>,
}

impl<U: UiChannel> AuthRelay<U> {
    /// Create a relay pushing into `ui`
    pub fn new(ui: Arc<U>) -> Self {
        Self { ui }
    }

    /// Handle one authorized event
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Channel`] if the UI stopped listening.
    pub fn on_authorized(&self, auth: AuthContext) -> Result<(), RelayError> {
        debug!("Relaying authorization to UI");
        self.ui.send(UiMessage::Authorization(auth))?;
        Ok(())
    }
}
