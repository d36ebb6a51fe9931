//! Flat row → [`TransferRecord`].

use crate::domain::{
    Direction, FlatRow, StopTime, TrainLeg, TransferRecord, parse_duration_minutes,
};

/// Rows shorter than this are header fragments or layout noise.
pub const MIN_FIELDS: usize = 9;

/// Fields describing one leg: train number, start, end, duration.
const LEG_FIELDS: usize = 4;

/// Normalize one reconstructed row.
///
/// Fields 0..4 are the first leg and 4..8 the second; the total duration is
/// always the row's last field, since continuation rows can carry extras.
/// Returns `None` for rows with fewer than [`MIN_FIELDS`] fields.
pub fn normalize(row: &FlatRow, direction: Direction, date: &str) -> Option<TransferRecord> {
    if row.len() < MIN_FIELDS {
        return None;
    }

    let first = parse_leg(&row[..LEG_FIELDS]);
    let second = parse_leg(&row[LEG_FIELDS..2 * LEG_FIELDS]);
    let total = row.last().and_then(|s| parse_duration_minutes(s));

    Some(TransferRecord::from_legs(
        direction, first, second, total, date,
    ))
}

/// Normalize every row, silently dropping the short ones.
pub fn normalize_all(rows: &[FlatRow], direction: Direction, date: &str) -> Vec<TransferRecord> {
    rows.iter()
        .filter_map(|row| normalize(row, direction, date))
        .collect()
}

fn parse_leg(fields: &[String]) -> TrainLeg {
    TrainLeg {
        train_number: parse_train_number(&fields[0]),
        start: parse_stop(&fields[1]),
        end: parse_stop(&fields[2]),
        duration_minutes: parse_duration_minutes(&fields[3]),
    }
}

/// Train numbers are printed with stray spaces and line breaks.
fn parse_train_number(s: &str) -> Option<String> {
    let number: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    (!number.is_empty()).then_some(number)
}

/// Split "HH:MM Station Name" into time and station.
fn parse_stop(s: &str) -> StopTime {
    let mut parts = s.split_whitespace();
    let Some(time) = parts.next() else {
        return StopTime::default();
    };
    let station = parts.collect::<Vec<_>>().join(" ");

    StopTime {
        time: Some(time.to_string()),
        station: Some(station),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> FlatRow {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn tra_row() -> FlatRow {
        row(&[
            "區間 1203",
            "07:10 北新竹",
            "07:20 六家",
            "10分",
            "612",
            "07:40 新竹",
            "08:50 台北",
            "1時10分",
            "1時40分",
        ])
    }

    #[test]
    fn short_rows_are_skipped() {
        let full = tra_row();
        let short: FlatRow = full[..8].to_vec();
        assert!(normalize(&short, Direction::TraToThsr, "d").is_none());
        assert!(normalize(&Vec::new(), Direction::TraToThsr, "d").is_none());
    }

    #[test]
    fn nine_field_row_uses_every_field() {
        let record = normalize(&tra_row(), Direction::TraToThsr, "2025/05/01").unwrap();

        assert_eq!(record.direction, Direction::TraToThsr);
        assert_eq!(record.date, "2025/05/01");

        assert_eq!(record.tra.train_number.as_deref(), Some("區間1203"));
        assert_eq!(record.tra.start, StopTime::new("07:10", "北新竹"));
        assert_eq!(record.tra.end, StopTime::new("07:20", "六家"));
        assert_eq!(record.tra.duration_minutes, Some(10));

        assert_eq!(record.thsr.train_number.as_deref(), Some("612"));
        assert_eq!(record.thsr.start, StopTime::new("07:40", "新竹"));
        assert_eq!(record.thsr.end, StopTime::new("08:50", "台北"));
        assert_eq!(record.thsr.duration_minutes, Some(70));

        assert_eq!(record.total_duration_minutes, Some(100));
    }

    #[test]
    fn high_speed_first_assigns_roles() {
        let record = normalize(&tra_row(), Direction::ThsrToTra, "d").unwrap();
        assert_eq!(record.thsr.train_number.as_deref(), Some("區間1203"));
        assert_eq!(record.tra.train_number.as_deref(), Some("612"));
    }

    #[test]
    fn total_comes_from_last_field() {
        let mut long = tra_row();
        long.insert(8, "extra".to_string());
        long[9] = "2時".to_string();

        let record = normalize(&long, Direction::TraToThsr, "d").unwrap();
        assert_eq!(record.total_duration_minutes, Some(120));
    }

    #[test]
    fn total_is_independent_of_leg_durations() {
        let mut r = tra_row();
        r[8] = "1時55分".to_string();
        let record = normalize(&r, Direction::TraToThsr, "d").unwrap();
        assert_eq!(record.total_duration_minutes, Some(115));
        assert_eq!(record.tra.duration_minutes, Some(10));
        assert_eq!(record.thsr.duration_minutes, Some(70));
    }

    #[test]
    fn blank_fields_become_none() {
        let record = normalize(
            &row(&["  ", "", "08:00", "", "", "", "", "", "?"]),
            Direction::TraToThsr,
            "d",
        )
        .unwrap();

        assert_eq!(record.tra.train_number, None);
        assert_eq!(record.tra.start, StopTime::default());
        assert_eq!(record.tra.end.time.as_deref(), Some("08:00"));
        assert_eq!(record.tra.end.station.as_deref(), Some(""));
        assert_eq!(record.tra.duration_minutes, None);
        assert_eq!(record.total_duration_minutes, None);
    }

    #[test]
    fn station_names_with_spaces_are_rejoined() {
        let stop = parse_stop("09:15   Hsinchu   Science  Park");
        assert_eq!(stop.time.as_deref(), Some("09:15"));
        assert_eq!(stop.station.as_deref(), Some("Hsinchu Science Park"));
    }

    #[test]
    fn normalize_all_filters_short_rows() {
        let rows = vec![tra_row(), row(&["header"]), tra_row()];
        let records = normalize_all(&rows, Direction::TraToThsr, "d");
        assert_eq!(records.len(), 2);
    }
}
