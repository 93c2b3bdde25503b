//! Easel Bridge Core - Host/UI Synchronization for the easel extension
//!
//! This crate sits between the extension host platform (authorization,
//! configuration storage, diagnostics) and the embedded easel UI process. It
//! never renders anything and holds no durable state: every host event is
//! turned into a message on one of the UI's inbound ports, and every message on
//! one of the UI's outbound ports is turned into a host API call.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Host Platform                           │
//! │   onAuthorized   configuration.onChanged   set()   rig.log()  │
//! └───────┬──────────────────┬──────────────────▲─────────▲──────┘
//!         │                  │                  │         │
//!      HostEvent (in)     HostEvent (in)   PersistedRecord  LogPayload
//!         │                  │                  │         │
//! ┌───────┼──────────────────┼──────────────────┼─────────┼──────┐
//! │       ▼                  ▼                  │         │      │
//! │  ┌─────────┐    ┌────────────────┐   ┌────────────┐ ┌─────┐  │
//! │  │AuthRelay│    │ ConfigInbound  │   │ConfigOutbnd│ │ Log │  │
//! │  │         │    │  + normalize() │   │ (config    │ │Relay│  │
//! │  │         │    │                │   │  variant)  │ │     │  │
//! │  └────┬────┘    └───────┬────────┘   └─────▲──────┘ └──▲──┘  │
//! │       │   BRIDGE CORE   │                  │           │     │
//! └───────┼─────────────────┼──────────────────┼───────────┼─────┘
//!         ▼                 ▼                  │           │
//!   authorization     receiveConfig        saveConfig     log
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Process                             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Bridge`]: wires the relays for one deployment variant and dispatches events
//! - [`ExtensionConfig`]: the synchronized configuration value
//! - [`HostPlatform`]: capability interface for the extension host
//! - [`UiChannel`]: capability interface for the UI process's inbound ports
//! - [`UiMessage`] / [`UiEvent`]: messages to and from the UI process
//! - [`HostEvent`]: events delivered by the host platform
//!
//! # Quick Start
//!
//! ```ignore
//! use easel_bridge_core::{
//!     Bridge, ExtensionVariant, HostEvent, InProcessUiChannel, MemoryHost, UiMessage,
//! };
//! use tokio::sync::mpsc;
//!
//! let (ui, mut ui_inbox) = InProcessUiChannel::new_pair();
//! let bridge = Bridge::new(MemoryHost::new(), ui, ExtensionVariant::Config);
//!
//! let (host_tx, host_rx) = mpsc::unbounded_channel();
//! let (ui_tx, ui_rx) = mpsc::unbounded_channel();
//! host_tx.send(HostEvent::ConfigurationChanged).unwrap();
//! drop((host_tx, ui_tx));
//!
//! bridge.run(host_rx, ui_rx).await;
//! assert!(matches!(ui_inbox.try_recv(), Ok(UiMessage::ReceiveConfig(_))));
//! ```
//!
//! # Concurrency
//!
//! Dispatch is single-threaded and cooperative. Relays never block or
//! suspend; host calls are fire-and-forget and UI pushes never wait.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bridge;
pub mod channel;
pub mod config;
pub mod events;
pub mod host;
pub mod messages;
pub mod relay;
pub mod settings;

// Re-exports for convenience
pub use bridge::{Bridge, ExtensionVariant};
pub use channel::{ChannelError, InProcessUiChannel, UiChannel};
pub use config::{
    normalize, normalize_record, ColorDef, ColorRef, ConfigScope, ExtensionConfig,
    PersistedRecord, ToolDef, CONFIG_VERSION,
};
pub use events::{HostEvent, LogPayload, UiEvent};
pub use host::{HostPlatform, MemoryHost};
pub use messages::{AuthContext, UiMessage, UiPort};
pub use relay::{AuthRelay, ConfigInbound, ConfigOutbound, LogRelay, RelayError};
pub use settings::{
    default_settings_path, load_settings, load_settings_from_path, BridgeSettings,
    ConfigSource, SettingsError, SettingsOverrides,
};
