//! Data transfer objects for web requests and responses.
//!
//! The record shape matches what existing front ends of the transfer
//! service already consume, so field names are not Rust-style in places.

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, TrainLeg, TransferRecord};
use crate::feasibility::FeasibilityTier;
use crate::tra::Route;

/// Parameter names every transfer query must carry.
pub const REQUIRED_PARAMS: [&str; 3] = ["startStation", "endStation", "transferStation"];

/// Parameters of a transfer query, from the query string or a JSON body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferParams {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub transfer_station: Option<String>,

    /// Travel date as `YYYY/MM/DD` (defaults to today in Taiwan)
    pub query_date: Option<String>,
}

impl TransferParams {
    /// The route, if all three stations are present and non-empty.
    pub fn route(&self) -> Option<Route> {
        let present = |value: &Option<String>| value.clone().filter(|s| !s.is_empty());
        Some(Route::new(
            present(&self.start_station)?,
            present(&self.end_station)?,
            present(&self.transfer_station)?,
        ))
    }

    /// The requested date, if one was given.
    pub fn date(&self) -> Option<&str> {
        self.query_date.as_deref().filter(|d| !d.is_empty())
    }
}

/// One train of a transfer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegResult {
    pub train_number: Option<String>,
    pub start_time: Option<String>,
    pub start_station: Option<String>,
    pub end_time: Option<String>,
    pub end_station: Option<String>,

    /// Riding time in minutes
    pub spend_time: Option<u32>,
}

impl LegResult {
    /// Create from a domain TrainLeg.
    pub fn from_leg(leg: &TrainLeg) -> Self {
        Self {
            train_number: leg.train_number.clone(),
            start_time: leg.start.time.clone(),
            start_station: leg.start.station.clone(),
            end_time: leg.end.time.clone(),
            end_station: leg.end.station.clone(),
            spend_time: leg.duration_minutes,
        }
    }
}

/// A transfer option in query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordResult {
    #[serde(rename = "type")]
    pub direction: Direction,

    #[serde(rename = "THSR")]
    pub thsr: LegResult,

    #[serde(rename = "TRA")]
    pub tra: LegResult,

    /// Door-to-door minutes, including the wait at the transfer station
    pub total_spend_time: Option<u32>,

    pub date: String,
}

impl RecordResult {
    /// Create from a domain TransferRecord.
    pub fn from_record(record: &TransferRecord) -> Self {
        Self {
            direction: record.direction,
            thsr: LegResult::from_leg(&record.thsr),
            tra: LegResult::from_leg(&record.tra),
            total_spend_time: record.total_duration_minutes,
            date: record.date.clone(),
        }
    }
}

/// A transfer option with its feasibility.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedResult {
    #[serde(flatten)]
    pub record: RecordResult,
    pub tier: FeasibilityTier,
}

/// Board contents for one direction.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DirectionBoard {
    Ready {
        records: Vec<ClassifiedResult>,

        /// Index of the option to bring into view
        focus: Option<usize>,
    },
    Failed {
        error: String,
    },
}

/// Response for the board endpoint.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Date the board is for, as `YYYY/MM/DD`
    pub date: String,

    /// Taiwan time the tiers were computed at, as `HH:MM`
    pub now: String,

    #[serde(rename = "TRA2THSR")]
    pub rail_first: DirectionBoard,

    #[serde(rename = "THSR2TRA")]
    pub high_speed_first: DirectionBoard,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response when query parameters are missing.
#[derive(Debug, Serialize)]
pub struct MissingParamsResponse {
    pub error: &'static str,
    pub required: [&'static str; 3],
}

/// Response when the result page could not be understood.
#[derive(Debug, Serialize)]
pub struct ParseErrorResponse {
    pub error: &'static str,
    pub message: String,
}

/// Usage hints returned for unknown paths.
#[derive(Debug, Serialize)]
pub struct HelpResponse {
    pub message: &'static str,
    #[serde(rename = "example_TRA2THSR")]
    pub example_rail_first: &'static str,
    #[serde(rename = "example_THSR2TRA")]
    pub example_high_speed_first: &'static str,
}

impl Default for HelpResponse {
    fn default() -> Self {
        Self {
            message: "Invalid endpoint. Please use /TRA2THSR or /THSR2TRA.",
            example_rail_first: "/TRA2THSR?startStation=1190-北新竹&endStation=1000&transferStation=1194",
            example_high_speed_first: "/THSR2TRA?startStation=1000&endStation=1190-北新竹&transferStation=1194",
        }
    }
}
