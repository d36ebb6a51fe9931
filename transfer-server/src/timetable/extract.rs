//! HTML → raw table rows.
//!
//! The TRA transfer page is server-rendered and stable enough that a few
//! regular expressions locate everything needed; a full DOM parser buys
//! nothing here.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::error::ExtractError;
use crate::domain::{Cell, RawRow};

/// Class of the itinerary table on the result page.
pub const ITINERARY_TABLE_CLASS: &str = "itinerary-controls";

/// Phrases the site shows instead of a table when nothing matches.
pub const NO_RESULTS_MARKERS: [&str; 2] = ["查無資料", "查無符合條件之車次"];

/// Leading rows of the table that hold column headings.
const HEADER_ROWS: usize = 2;

static TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table[^>]*class="itinerary-controls"[^>]*>(.*?)</table>"#)
        .expect("valid table regex")
});

static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr(?:\s[^>]*)?>(.*?)</tr>").expect("valid row regex"));

static CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<td(\s[^>]*)?>(.*?)</td>").expect("valid cell regex")
});

static ROWSPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)rowspan\s*=\s*["']?(\d+)"#).expect("valid rowspan regex")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Extract the itinerary table body as raw rows.
///
/// Header rows are dropped. A page without the table but with a
/// "no results" phrase yields an empty list; a page with neither is an
/// error, because it means the layout is not the one we understand.
pub fn extract_rows(html: &str) -> Result<Vec<RawRow>, ExtractError> {
    let Some(body) = TABLE.captures(html).and_then(|c| c.get(1)) else {
        if NO_RESULTS_MARKERS.iter().any(|m| html.contains(m)) {
            debug!("result page reports no matching trains");
            return Ok(Vec::new());
        }
        return Err(ExtractError::TableNotFound {
            class: ITINERARY_TABLE_CLASS,
        });
    };

    let rows: Vec<RawRow> = ROW
        .captures_iter(body.as_str())
        .skip(HEADER_ROWS)
        .filter_map(|c| c.get(1))
        .map(|row| extract_cells(row.as_str()))
        .collect();

    debug!(rows = rows.len(), "extracted itinerary rows");
    Ok(rows)
}

fn extract_cells(row_html: &str) -> RawRow {
    CELL.captures_iter(row_html)
        .map(|c| {
            let attrs = c.get(1).map_or("", |m| m.as_str());
            let inner = c.get(2).map_or("", |m| m.as_str());
            Cell::new(cell_text(inner), rowspan(attrs))
        })
        .collect()
}

fn rowspan(attrs: &str) -> u32 {
    ROWSPAN
        .captures(attrs)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1)
}

fn cell_text(inner: &str) -> String {
    let text = TAG.replace_all(inner, "");
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
