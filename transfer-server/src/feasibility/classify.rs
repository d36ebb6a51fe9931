//! Feasibility classification.
//!
//! Each option is sorted into a tier by an ordered list of rules. The first
//! rule that matches wins; options no rule matches are [`FeasibilityTier::Ample`].
//!
//! | rule             | tier         | grace |
//! |------------------|--------------|-------|
//! | departed         | `Disabled`   | -     |
//! | urgent           | `Extreme`    | 0     |
//! | becoming urgent  | `Acceptable` | step  |
//!
//! "Urgent" holds when the option departs within `depart_early` minutes,
//! when the *last* option of the list does (the whole set is about to run
//! out), or when it arrives after the arrival cutoff. "Becoming urgent" is
//! the same test with every boundary moved out by one step.
//!
//! A time that didn't parse never satisfies a condition, so a record with
//! garbled times falls through to `Ample` instead of failing the list.

use serde::Serialize;
use tracing::{debug, warn};

use super::config::ThresholdConfig;
use crate::domain::TransferRecord;

/// How catchable an option is, most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeasibilityTier {
    /// Already departed.
    Disabled,
    /// Catchable only in a hurry.
    Extreme,
    /// Will become urgent within one step.
    Acceptable,
    /// Comfortably catchable.
    Ample,
}

/// Times relevant to one option, in minutes since midnight.
#[derive(Debug, Clone, Copy)]
struct Moment {
    now: i64,
    depart: Option<i64>,
    arrive: Option<i64>,
    last_depart: Option<i64>,
}

/// A named classification rule.
struct Rule {
    name: &'static str,
    tier: FeasibilityTier,
    matches: fn(&Moment, &ThresholdConfig) -> bool,
}

/// Rules in priority order.
const RULES: [Rule; 3] = [
    Rule {
        name: "departed",
        tier: FeasibilityTier::Disabled,
        matches: departed,
    },
    Rule {
        name: "urgent",
        tier: FeasibilityTier::Extreme,
        matches: urgent,
    },
    Rule {
        name: "becoming urgent",
        tier: FeasibilityTier::Acceptable,
        matches: becoming_urgent,
    },
];

fn departed(m: &Moment, _cfg: &ThresholdConfig) -> bool {
    m.depart.is_some_and(|d| d <= m.now)
}

fn urgent(m: &Moment, cfg: &ThresholdConfig) -> bool {
    pressed_for_time(m, cfg, 0)
}

fn becoming_urgent(m: &Moment, cfg: &ThresholdConfig) -> bool {
    pressed_for_time(m, cfg, i64::from(cfg.step_minutes))
}

fn pressed_for_time(m: &Moment, cfg: &ThresholdConfig, grace: i64) -> bool {
    let departs_soon = |t: Option<i64>| match (t, cfg.depart_early_minutes) {
        (Some(t), Some(early)) => t - grace <= m.now + i64::from(early),
        _ => false,
    };

    let arrives_late = match (m.arrive, cfg.arrival_cutoff()) {
        (Some(arrive), Some(cutoff)) => arrive + grace >= cutoff,
        _ => false,
    };

    departs_soon(m.depart) || departs_soon(m.last_depart) || arrives_late
}

fn tier_of(m: &Moment, cfg: &ThresholdConfig) -> FeasibilityTier {
    RULES
        .iter()
        .find(|rule| (rule.matches)(m, cfg))
        .map_or(FeasibilityTier::Ample, |rule| rule.tier)
}

/// Name of the rule deciding a tier, for logs.
fn rule_name(tier: FeasibilityTier) -> &'static str {
    RULES
        .iter()
        .find(|rule| rule.tier == tier)
        .map_or("default", |rule| rule.name)
}

/// Classify every record against `now_minutes` (minutes since local midnight).
///
/// Order is preserved. The last record's departure stands in for "the last
/// option of the day", so the records are expected in ascending departure
/// order; a warning is logged when they are not.
pub fn classify<'a>(
    records: &'a [TransferRecord],
    now_minutes: u32,
    cfg: &ThresholdConfig,
) -> Vec<(&'a TransferRecord, FeasibilityTier)> {
    if !is_sorted_by_departure(records) {
        warn!(
            count = records.len(),
            "records are not in departure order; last-option check may be off"
        );
    }

    let now = i64::from(now_minutes);
    let last_depart = records
        .last()
        .and_then(TransferRecord::departure_minutes)
        .map(i64::from);

    let classified: Vec<_> = records
        .iter()
        .map(|record| {
            let moment = Moment {
                now,
                depart: record.departure_minutes().map(i64::from),
                arrive: record.arrival_minutes().map(i64::from),
                last_depart,
            };
            let tier = tier_of(&moment, cfg);
            (record, tier)
        })
        .collect();

    if let Some(first_open) = focus_index(classified.iter().map(|(_, t)| *t)) {
        let tier = classified[first_open].1;
        debug!(
            records = classified.len(),
            focus = first_open,
            rule = rule_name(tier),
            "classified transfer options"
        );
    }

    classified
}

/// Whether departures never go backwards. Records without a parseable
/// departure are ignored.
pub fn is_sorted_by_departure(records: &[TransferRecord]) -> bool {
    let departures: Vec<u32> = records
        .iter()
        .filter_map(TransferRecord::departure_minutes)
        .collect();
    departures.windows(2).all(|w| w[0] <= w[1])
}

/// The option a display should bring into view.
///
/// That is the first option that is still comfortably or acceptably
/// catchable, or failing that the first urgent one.
pub fn focus_index<I>(tiers: I) -> Option<usize>
where
    I: IntoIterator<Item = FeasibilityTier>,
{
    let mut first_extreme = None;
    for (i, tier) in tiers.into_iter().enumerate() {
        match tier {
            FeasibilityTier::Acceptable | FeasibilityTier::Ample => return Some(i),
            FeasibilityTier::Extreme if first_extreme.is_none() => first_extreme = Some(i),
            _ => {}
        }
    }
    first_extreme
}
