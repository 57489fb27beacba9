//! Transport mode tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a transport mode tag is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0}")]
pub struct UnknownTransportMode(pub String);

/// The three kinds of ticket the system stores.
///
/// Each mode has its own record source and its own rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Bus,
    Train,
    Plane,
}

impl TransportMode {
    /// All modes, in the order sources are queried and reported.
    pub const ALL: [TransportMode; 3] = [
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Plane,
    ];

    /// Lowercase tag (`bus`, `train`, `plane`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Plane => "plane",
        }
    }

    /// Name of the backing table for this mode.
    pub fn table(&self) -> &'static str {
        match self {
            TransportMode::Bus => "bus_tickets",
            TransportMode::Train => "train_tickets",
            TransportMode::Plane => "plane_tickets",
        }
    }
}

impl FromStr for TransportMode {
    type Err = UnknownTransportMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bus" => Ok(TransportMode::Bus),
            "train" => Ok(TransportMode::Train),
            "plane" => Ok(TransportMode::Plane),
            _ => Err(UnknownTransportMode(s.to_string())),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
