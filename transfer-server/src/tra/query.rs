//! Transfer query parameters.

use serde::{Deserialize, Serialize};

use crate::domain::Direction;

/// Stations of a transfer trip, as TRA station codes.
///
/// TRA accepts either a bare code (`1000`) or `code-name`
/// (`1190-北新竹`); both are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub start_station: String,
    pub end_station: String,
    pub transfer_station: String,
}

impl Route {
    pub fn new(
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        transfer_station: impl Into<String>,
    ) -> Self {
        Self {
            start_station: start_station.into(),
            end_station: end_station.into(),
            transfer_station: transfer_station.into(),
        }
    }

    /// 北新竹 to Taipei, changing at 新竹/六家.
    pub fn default_rail_first() -> Self {
        Self::new("1190-北新竹", "1000", "1194")
    }

    /// Taipei back to 北新竹, changing at 新竹/六家.
    pub fn default_high_speed_first() -> Self {
        Self::new("1000", "1190-北新竹", "1194")
    }

    /// The default route for a direction.
    pub fn default_for(direction: Direction) -> Self {
        match direction {
            Direction::TraToThsr => Self::default_rail_first(),
            Direction::ThsrToTra => Self::default_high_speed_first(),
        }
    }
}

/// A complete transfer query. Also the cache key for its results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransferQuery {
    pub direction: Direction,
    pub route: Route,
    /// Travel date as `YYYY/MM/DD`.
    pub date: String,
}

impl TransferQuery {
    pub fn new(direction: Direction, route: Route, date: impl Into<String>) -> Self {
        Self {
            direction,
            route,
            date: date.into(),
        }
    }

    /// Value of the form's `queryWay` field.
    pub fn query_way(&self) -> &'static str {
        match self.direction {
            Direction::TraToThsr => "0",
            Direction::ThsrToTra => "1",
        }
    }
}
