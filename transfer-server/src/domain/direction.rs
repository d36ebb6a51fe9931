//! Transfer direction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown direction tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transfer direction: {0}")]
pub struct InvalidDirection(String);

/// Which train comes first in a transfer option.
///
/// The wire tags (`TRA2THSR`, `THSR2TRA`) are the ones used in URLs and
/// JSON payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Conventional rail first, then high-speed rail.
    #[serde(rename = "TRA2THSR")]
    TraToThsr,

    /// High-speed rail first, then conventional rail.
    #[serde(rename = "THSR2TRA")]
    ThsrToTra,
}

impl Direction {
    /// Both directions, in display order.
    pub const ALL: [Direction; 2] = [Direction::TraToThsr, Direction::ThsrToTra];

    /// Parse a wire tag.
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        match s {
            "TRA2THSR" => Ok(Direction::TraToThsr),
            "THSR2TRA" => Ok(Direction::ThsrToTra),
            other => Err(InvalidDirection(other.to_string())),
        }
    }

    /// The wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TraToThsr => "TRA2THSR",
            Direction::ThsrToTra => "THSR2TRA",
        }
    }

    /// Whether the first leg of this direction is the TRA leg.
    pub fn rail_first(&self) -> bool {
        matches!(self, Direction::TraToThsr)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
