//! JSON-lines input accepted by the rig.
//!
//! Each line is either something the UI process emitted on one of its
//! outbound ports, or a directive standing in for the host:
//!
//! ```text
//! {"port":"saveConfig","payload":{"selectedColors":[],"colors":["green"],"tools":[]}}
//! {"port":"log","payload":"hello"}
//! {"host":"authorized","payload":{"token":"..."}}
//! {"host":"configurationChanged"}
//! ```

use serde::Deserialize;
use thiserror::Error;

use easel_bridge_core::{HostEvent, UiEvent};

/// One parsed input line
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RigInput {
    /// Message from the UI process
    Ui(UiEvent),
    /// Simulated host event
    Host(HostEvent),
}

/// Rejected input line
#[derive(Debug, Error)]
#[error("line {line}: not a UI event or host directive: {source}")]
pub struct InputError {
    /// 1-based line number
    pub line: usize,
    #[source]
    source: serde_json::Error,
}

/// Parse one line; blank lines yield `None`
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<RigInput>, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| InputError {
            line: line_no,
            source,
        })
}
