//! TRA transfer timetable parsing.
//!
//! Turns the HTML result page into [`TransferRecord`]s in three steps:
//!
//! 1. [`extract_rows`] pulls raw cells (text + rowspan) out of the page.
//! 2. [`reconstruct`] replays merged cells so every row is self-contained.
//! 3. [`normalize`] parses each row into a structured record.
//!
//! Only step 1 can fail. Rows that don't look like options are dropped.

mod error;
mod extract;
mod normalize;
mod reconstruct;

pub use error::ExtractError;
pub use extract::{ITINERARY_TABLE_CLASS, NO_RESULTS_MARKERS, extract_rows};
pub use normalize::{MIN_FIELDS, normalize, normalize_all};
pub use reconstruct::{
    Carry, LeadingCarry, MergeStrategy, TrailingSplice, reconstruct, reconstruct_with,
    strategy_for,
};

use crate::domain::{Direction, TransferRecord};

/// Parse a result page into transfer records.
pub fn parse_timetable(
    html: &str,
    direction: Direction,
    date: &str,
) -> Result<Vec<TransferRecord>, ExtractError> {
    let rows = extract_rows(html)?;
    let flat = reconstruct(&rows, direction);
    Ok(normalize_all(&flat, direction, date))
}
