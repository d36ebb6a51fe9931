//! Feasibility of transfer options relative to the current time.
//!
//! Classification is a pure function of the records, "now" and the
//! thresholds, so it is cheap to rerun on every refresh.

mod classify;
mod config;

pub use classify::{FeasibilityTier, classify, focus_index, is_sorted_by_departure};
pub use config::{DEFAULT_STEP_MINUTES, ThresholdConfig};
