//! Bridge - Relay Wiring and Dispatch
//!
//! The Bridge owns the injected host and UI capabilities, builds the relays
//! a deployment variant subscribes to, and dispatches events to them one at a
//! time.
//!
//! # Deployment Variants
//!
//! | Port | Config | Viewer |
//! |---|---|---|
//! | `authorization` | yes | yes |
//! | `receiveConfig` | yes | yes |
//! | `saveConfig` | yes | no |
//! | `log` | yes | yes |
//!
//! The viewer is read-only: it has no save subscription, so a save request
//! arriving there never reaches the host.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::channel::UiChannel;
use crate::events::{HostEvent, UiEvent};
use crate::host::HostPlatform;
use crate::messages::UiPort;
use crate::relay::{AuthRelay, ConfigInbound, ConfigOutbound, LogRelay, RelayError};
use crate::settings::BridgeSettings;

/// Which UI the bridge is serving
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionVariant {
    /// Broadcaster configuration page: reads and writes configuration
    #[default]
    Config,
    /// Viewer overlay: reads configuration only
    Viewer,
}

impl ExtensionVariant {
    /// Stable name used in settings files and on the command line
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Viewer => "viewer",
        }
    }

    /// Prefix for local console lines when none is configured
    #[must_use]
    pub fn default_log_prefix(self) -> &'static str {
        match self {
            Self::Config => "LOG",
            Self::Viewer => "",
        }
    }

    /// Whether this variant wires `port`
    #[must_use]
    pub fn subscribes_to(self, port: UiPort) -> bool {
        match port {
            UiPort::SaveConfig => self == Self::Config,
            UiPort::Authorization | UiPort::ReceiveConfig | UiPort::Log => true,
        }
    }
}

impl fmt::Display for ExtensionVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "config" | "broadcaster" => Ok(Self::Config),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!(
                "unknown extension variant `{other}` (expected `config` or `viewer`)"
            )),
        }
    }
}

/// The Bridge - relays wired for one deployment variant
pub struct Bridge<H: HostPlatform, U: UiChannel> {
    variant: ExtensionVariant,
    auth: AuthRelay<U>,
    config_inbound: ConfigInbound<H, U>,
    /// `None` when the variant has no save subscription
    config_outbound: Option<ConfigOutbound<H>>,
    log: LogRelay<H>,
}

impl<H: HostPlatform, U: UiChannel> Bridge<H, U> {
    /// Wire a bridge with the variant's default log prefix
    pub fn new(host: H, ui: U, variant: ExtensionVariant) -> Self {
        Self::with_log_prefix(host, ui, variant, variant.default_log_prefix())
    }

    /// Wire a bridge from loaded settings
    pub fn from_settings(host: H, ui: U, settings: &BridgeSettings) -> Self {
        Self::with_log_prefix(host, ui, settings.variant, settings.log_prefix())
    }

    /// Wire a bridge with an explicit prefix for local log lines
    pub fn with_log_prefix(
        host: H,
        ui: U,
        variant: ExtensionVariant,
        log_prefix: impl Into<String>,
    ) -> Self {
        let host = Arc::new(host);
        let ui = Arc::new(ui);

        let config_outbound = variant
            .subscribes_to(UiPort::SaveConfig)
            .then(|| ConfigOutbound::new(Arc::clone(&host)));

        let log = LogRelay::new(Arc::clone(&host), log_prefix);

        info!(variant = %variant, log_prefix = log.prefix(), "Bridge wired");

        Self {
            variant,
            auth: AuthRelay::new(Arc::clone(&ui)),
            config_inbound: ConfigInbound::new(host, ui),
            config_outbound,
            log,
        }
    }

    /// The deployment variant
    #[must_use]
    pub fn variant(&self) -> ExtensionVariant {
        self.variant
    }

    /// Whether a relay is wired for `port`
    #[must_use]
    pub fn subscribes_to(&self, port: UiPort) -> bool {
        match port {
            UiPort::SaveConfig => self.config_outbound.is_some(),
            UiPort::Authorization | UiPort::ReceiveConfig | UiPort::Log => true,
        }
    }

    /// Dispatch one host event
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Channel`] if the UI stopped listening.
    pub fn handle_host_event(&self, event: HostEvent) -> Result<(), RelayError> {
        match event {
            HostEvent::Authorized(auth) => self.auth.on_authorized(auth),
            HostEvent::ConfigurationChanged => self.config_inbound.on_changed(),
        }
    }

    /// Dispatch one UI event
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Serialize`] if a save payload cannot be serialized.
    pub fn handle_ui_event(&self, event: UiEvent) -> Result<(), RelayError> {
        match event {
            UiEvent::SaveConfig(config) => match &self.config_outbound {
                Some(outbound) => outbound.on_save(&config),
                None => {
                    debug!(variant = %self.variant, "No saveConfig subscription, dropping save");
                    Ok(())
                }
            },
            UiEvent::Log(payload) => {
                self.log.on_log(&payload);
                Ok(())
            }
        }
    }

    /// Process events until both sources close
    ///
    /// Each event is handled to completion before the next is taken. Relay
    /// failures are logged and do not stop the loop.
    pub async fn run(
        &self,
        host_rx: mpsc::UnboundedReceiver<HostEvent>,
        ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    ) {
        self.dispatch(host_rx, ui_rx, false).await;
    }

    /// Process events until the UI source closes
    ///
    /// For hosts whose event source outlives the UI, such as a host that
    /// fires a change notification after each write. Once the UI source is
    /// closed, host events already queued are handled and the loop ends. A
    /// save handled before that point always has its change notification
    /// relayed.
    pub async fn run_until_ui_closed(
        &self,
        host_rx: mpsc::UnboundedReceiver<HostEvent>,
        ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    ) {
        self.dispatch(host_rx, ui_rx, true).await;
    }

    async fn dispatch(
        &self,
        mut host_rx: mpsc::UnboundedReceiver<HostEvent>,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        stop_with_ui: bool,
    ) {
        let mut host_open = true;
        let mut ui_open = true;

        loop {
            tokio::select! {
                event = host_rx.recv(), if host_open => match event {
                    Some(event) => self.relay_host_event(event),
                    None => {
                        debug!("Host event source closed");
                        host_open = false;
                    }
                },
                event = ui_rx.recv(), if ui_open => match event {
                    Some(event) => {
                        let port = event.port();
                        if let Err(e) = self.handle_ui_event(event) {
                            warn!(error = %e, port = %port, "UI event relay failed");
                        }
                    }
                    None => {
                        debug!("UI event source closed");
                        ui_open = false;
                        if stop_with_ui {
                            while let Ok(event) = host_rx.try_recv() {
                                self.relay_host_event(event);
                            }
                            break;
                        }
                    }
                },
                else => break,
            }
        }

        info!(variant = %self.variant, "Bridge stopped");
    }

    fn relay_host_event(&self, event: HostEvent) {
        if let Err(e) = self.handle_host_event(event) {
            warn!(error = %e, "Host event relay failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::InProcessUiChannel;
    use crate::config::ExtensionConfig;
    use crate::events::LogPayload;
    use crate::host::MemoryHost;
    use crate::messages::{AuthContext, UiMessage};
    use serde_json::json;

    #[test]
    fn test_variant_parsing() {
        assert_eq!("config".parse::<ExtensionVariant>(), Ok(ExtensionVariant::Config));
        assert_eq!(" Viewer ".parse::<ExtensionVariant>(), Ok(ExtensionVariant::Viewer));
        assert_eq!(
            "broadcaster".parse::<ExtensionVariant>(),
            Ok(ExtensionVariant::Config)
        );
        assert!("panel".parse::<ExtensionVariant>().is_err());
    }

    #[test]
    fn test_variant_ports() {
        for port in UiPort::ALL {
            assert!(ExtensionVariant::Config.subscribes_to(port));
        }
        assert!(!ExtensionVariant::Viewer.subscribes_to(UiPort::SaveConfig));
        assert!(ExtensionVariant::Viewer.subscribes_to(UiPort::ReceiveConfig));
    }

    #[test]
    fn test_default_log_prefixes() {
        assert_eq!(ExtensionVariant::Config.default_log_prefix(), "LOG");
        assert_eq!(ExtensionVariant::Viewer.default_log_prefix(), "");
    }

    #[test]
    fn test_bridge_routes_host_events() {
        let host = Arc::new(MemoryHost::new());
        let (ui, mut inbox) = InProcessUiChannel::new_pair();
        let bridge = Bridge::new(Arc::clone(&host), ui, ExtensionVariant::Viewer);

        let auth = AuthContext::new(json!({ "token": "t" }));
        bridge
            .handle_host_event(HostEvent::Authorized(auth.clone()))
            .unwrap();
        bridge
            .handle_host_event(HostEvent::ConfigurationChanged)
            .unwrap();

        assert_eq!(inbox.try_recv().unwrap(), UiMessage::Authorization(auth));
        assert_eq!(
            inbox.try_recv().unwrap(),
            UiMessage::ReceiveConfig(ExtensionConfig::default())
        );
    }

    #[test]
    fn test_viewer_drops_saves() {
        let host = Arc::new(MemoryHost::new());
        let (ui, mut inbox) = InProcessUiChannel::new_pair();
        let bridge = Bridge::new(Arc::clone(&host), ui, ExtensionVariant::Viewer);

        assert!(!bridge.subscribes_to(UiPort::SaveConfig));
        bridge
            .handle_ui_event(UiEvent::SaveConfig(ExtensionConfig::default()))
            .unwrap();

        assert!(host.writes().is_empty());
        assert!(host.broadcaster_configuration().is_none());
        assert!(inbox.try_recv().is_err());
    }

    #[test]
    fn test_config_variant_saves_and_logs() {
        let host = Arc::new(MemoryHost::new());
        let (ui, _inbox) = InProcessUiChannel::new_pair();
        let bridge = Bridge::new(Arc::clone(&host), ui, ExtensionVariant::Config);

        assert!(bridge.subscribes_to(UiPort::SaveConfig));
        bridge
            .handle_ui_event(UiEvent::SaveConfig(ExtensionConfig::default()))
            .unwrap();
        bridge
            .handle_ui_event(UiEvent::Log(LogPayload::text("saved")))
            .unwrap();

        assert_eq!(host.writes().len(), 1);
        assert_eq!(host.logs(), vec![LogPayload::text("saved")]);
    }

    #[tokio::test]
    async fn test_run_ends_when_sources_close() {
        let host = Arc::new(MemoryHost::new());
        let (ui, mut inbox) = InProcessUiChannel::new_pair();
        let bridge = Bridge::new(Arc::clone(&host), ui, ExtensionVariant::Config);

        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();

        host_tx.send(HostEvent::ConfigurationChanged).unwrap();
        ui_tx
            .send(UiEvent::Log(LogPayload::text("ready")))
            .unwrap();
        drop(host_tx);
        drop(ui_tx);

        bridge.run(host_rx, ui_rx).await;

        assert!(matches!(
            inbox.try_recv().unwrap(),
            UiMessage::ReceiveConfig(_)
        ));
        assert_eq!(host.logs().len(), 1);
    }

    /// Host that queues a change notification after every write
    struct NotifyingHost {
        inner: MemoryHost,
        events: mpsc::UnboundedSender<HostEvent>,
    }

    impl HostPlatform for NotifyingHost {
        fn broadcaster_configuration(&self) -> Option<crate::config::PersistedRecord> {
            self.inner.broadcaster_configuration()
        }

        fn set_configuration(&self, record: crate::config::PersistedRecord) {
            self.inner.set_configuration(record);
            let _ = self.events.send(HostEvent::ConfigurationChanged);
        }

        fn log(&self, message: &LogPayload) {
            self.inner.log(message);
        }
    }

    #[tokio::test]
    async fn test_run_until_ui_closed_relays_final_save() {
        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let host = NotifyingHost {
            inner: MemoryHost::new(),
            events: host_tx,
        };
        let (ui, mut inbox) = InProcessUiChannel::new_pair();
        let bridge = Bridge::new(host, ui, ExtensionVariant::Config);

        let saved = ExtensionConfig {
            selected_colors: vec![],
            colors: vec![json!("green")],
            tools: vec![],
        };
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        ui_tx.send(UiEvent::SaveConfig(saved.clone())).unwrap();
        drop(ui_tx);

        // The host keeps its sender, so only the UI source closes
        bridge.run_until_ui_closed(host_rx, ui_rx).await;

        assert_eq!(inbox.try_recv().unwrap(), UiMessage::ReceiveConfig(saved));
        assert!(inbox.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_run_survives_closed_ui() {
        let host = Arc::new(MemoryHost::new());
        let (ui, inbox) = InProcessUiChannel::new_pair();
        drop(inbox);
        let bridge = Bridge::new(Arc::clone(&host), ui, ExtensionVariant::Config);

        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();

        host_tx.send(HostEvent::ConfigurationChanged).unwrap();
        ui_tx
            .send(UiEvent::SaveConfig(ExtensionConfig::default()))
            .unwrap();
        drop(host_tx);
        drop(ui_tx);

        bridge.run(host_rx, ui_rx).await;

        assert_eq!(host.writes().len(), 1);
    }
}
