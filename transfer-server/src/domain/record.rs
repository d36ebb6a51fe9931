//! Transfer records: a TRA leg and a THSR leg paired by the timetable.

use serde::{Deserialize, Serialize};

use super::clock::parse_clock_minutes;
use super::direction::Direction;

/// A clock time and station as printed in one "time station" cell.
///
/// Either part may be missing when the cell was blank. The time is kept
/// exactly as printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTime {
    pub time: Option<String>,
    pub station: Option<String>,
}

impl StopTime {
    pub fn new(time: impl Into<String>, station: impl Into<String>) -> Self {
        Self {
            time: Some(time.into()),
            station: Some(station.into()),
        }
    }

    /// The time as minutes since midnight, if it parses.
    pub fn minutes(&self) -> Option<u32> {
        self.time.as_deref().and_then(parse_clock_minutes)
    }
}

/// One train of a transfer option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainLeg {
    pub train_number: Option<String>,
    pub start: StopTime,
    pub end: StopTime,
    pub duration_minutes: Option<u32>,
}

/// A single transfer option: one TRA train and one THSR train.
///
/// The legs are stored by role; `direction` says which one is ridden first.
/// `total_duration_minutes` is the journey time printed by the site, which
/// includes the wait at the transfer station, so it is not the sum of the
/// leg durations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub direction: Direction,
    pub tra: TrainLeg,
    pub thsr: TrainLeg,
    pub total_duration_minutes: Option<u32>,
    pub date: String,
}

impl TransferRecord {
    /// Build a record from legs in riding order.
    pub fn from_legs(
        direction: Direction,
        first: TrainLeg,
        second: TrainLeg,
        total_duration_minutes: Option<u32>,
        date: impl Into<String>,
    ) -> Self {
        let (tra, thsr) = if direction.rail_first() {
            (first, second)
        } else {
            (second, first)
        };

        Self {
            direction,
            tra,
            thsr,
            total_duration_minutes,
            date: date.into(),
        }
    }

    /// The leg ridden first.
    pub fn first_leg(&self) -> &TrainLeg {
        if self.direction.rail_first() {
            &self.tra
        } else {
            &self.thsr
        }
    }

    /// The leg ridden after the transfer.
    pub fn second_leg(&self) -> &TrainLeg {
        if self.direction.rail_first() {
            &self.thsr
        } else {
            &self.tra
        }
    }

    /// Departure of the first leg, in minutes since midnight.
    pub fn departure_minutes(&self) -> Option<u32> {
        self.first_leg().start.minutes()
    }

    /// Arrival of the second leg, in minutes since midnight.
    pub fn arrival_minutes(&self) -> Option<u32> {
        self.second_leg().end.minutes()
    }
}
