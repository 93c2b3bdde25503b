//! Configuration channel: the two independent halves of config sync.
//!
//! - [`ConfigInbound`]: host change notification → re-read record → normalize
//!   → `receiveConfig`. Every notification produces exactly one push of the
//!   full snapshot; nothing is de-duplicated.
//! - [`ConfigOutbound`]: `saveConfig` → serialize → versioned host write.
//!   Only the broadcaster configuration variant subscribes to it.
//!
//! The halves share nothing but [`CONFIG_VERSION`](crate::config::CONFIG_VERSION).

use std::sync::Arc;

use tracing::{debug, info};

use crate::channel::{ChannelError, UiChannel};
use crate::config::{normalize_record, ExtensionConfig, PersistedRecord};
use crate::host::HostPlatform;
use crate::messages::{UiMessage, UiPort};

use super::RelayError;

/// Inbound half: pushes the current configuration into the UI
pub struct ConfigInbound<H: HostPlatform, U: UiChannel> {
    host: Arc<H>,
    ui: Arc<U>,
}

impl<H: HostPlatform, U: UiChannel> ConfigInbound<H, U> {
    /// Create the inbound half
    pub fn new(host: Arc<H>, ui: Arc<U>) -> Self {
        Self { host, ui }
    }

    /// Handle one configuration-changed notification
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Channel`] if the UI stopped listening. The host
    /// record is not read in that case.
    pub fn on_changed(&self) -> Result<(), RelayError> {
        if !self.ui.is_open() {
            return Err(ChannelError::Closed {
                port: UiPort::ReceiveConfig,
            }
            .into());
        }

        let record = self.host.broadcaster_configuration();
        let config = normalize_record(record.as_ref());

        debug!(
            has_record = record.is_some(),
            is_default = config.is_default(),
            "Relaying configuration to UI"
        );

        self.ui.send(UiMessage::ReceiveConfig(config))?;
        Ok(())
    }
}

/// Outbound half: persists UI save requests on the host
pub struct ConfigOutbound<H: HostPlatform> {
    host: Arc<H>,
}

impl<H: HostPlatform> ConfigOutbound<H> {
    /// Create the outbound half
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    /// Handle one save request
    ///
    /// The payload is serialized as received and written once. The write is
    /// not awaited or retried.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Serialize`] if the payload cannot be serialized;
    /// nothing is written in that case.
    pub fn on_save(&self, config: &ExtensionConfig) -> Result<(), RelayError> {
        let content = config.to_content()?;
        let record = PersistedRecord::broadcaster(content);

        info!(
            scope = %record.scope,
            version = %record.version,
            bytes = record.content.len(),
            "Persisting broadcaster configuration"
        );

        self.host.set_configuration(record);
        Ok(())
    }
}
