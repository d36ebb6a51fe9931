//! Domain types for the transfer timetable.
//!
//! Everything here is plain data plus the small text parsers shared by the
//! timetable and feasibility layers. None of it performs I/O.

mod cell;
mod clock;
mod direction;
mod duration;
mod record;

pub use cell::{Cell, FlatRow, RawRow};
pub use clock::{
    minutes_since_midnight, parse_clock_minutes, query_date, taiwan_now, taiwan_offset,
};
pub use direction::{Direction, InvalidDirection};
pub use duration::parse_duration_minutes;
pub use record::{StopTime, TrainLeg, TransferRecord};
