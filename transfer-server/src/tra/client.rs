//! TRA transfer-query HTTP client.
//!
//! Submits the same form the TRA website's "臺鐵轉乘高鐵" page submits and
//! parses the rendered result page.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, REFERER};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::error::TraError;
use super::query::TransferQuery;
use crate::domain::{Direction, TransferRecord};
use crate::timetable::parse_timetable;

/// Default base URL of the TRA transfer query pages.
pub const DEFAULT_BASE_URL: &str = "https://www.railway.gov.tw/tra-tip-web/tip/tip001/tip117";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// The search window sent with every query: the whole day.
const DAY_START: &str = "00:00";
const DAY_END: &str = "23:59";

/// Minimum transfer time, in minutes, requested from the site.
const TRANSFER_MINUTES: &str = "50";

/// Configuration for the TRA client.
#[derive(Debug, Clone)]
pub struct TraConfig {
    /// Base URL of the query pages (defaults to the production site)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TraConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TraConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

/// Client for the TRA transfer query.
#[derive(Debug, Clone)]
pub struct TraClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl TraClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TraConfig) -> Result<Self, TraError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let referer = HeaderValue::from_str(&referer_for(&base_url))
            .map_err(|_| TraError::Config(format!("invalid base URL: {}", config.base_url)))?;
        headers.insert(REFERER, referer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// URL the form for a direction is posted to.
    pub fn endpoint(&self, direction: Direction) -> String {
        let page = match direction {
            Direction::TraToThsr => "sendTraTransferThsr",
            Direction::ThsrToTra => "sendThsrTransferTra",
        };
        format!("{}/{}", self.base_url, page)
    }

    /// Fetch the raw result page for a query.
    pub async fn fetch_html(&self, query: &TransferQuery) -> Result<String, TraError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| TraError::Config("request limiter closed".to_string()))?;

        let url = self.endpoint(query.direction);
        debug!(%url, direction = %query.direction, date = %query.date, "querying TRA");

        let response = self
            .http
            .post(&url)
            .form(&form_fields(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), direction = %query.direction, "TRA query failed");
            return Err(TraError::Upstream {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse the transfer options for a query.
    pub async fn fetch_records(
        &self,
        query: &TransferQuery,
    ) -> Result<Vec<TransferRecord>, TraError> {
        let html = self.fetch_html(query).await?;
        let records = parse_timetable(&html, query.direction, &query.date)?;
        debug!(
            direction = %query.direction,
            records = records.len(),
            "parsed TRA result page"
        );
        Ok(records)
    }
}

/// The search page the form is submitted from.
fn referer_for(base_url: &str) -> String {
    format!("{base_url}/query")
}

/// Form fields for a query, in the order the site's own form sends them.
///
/// The site only checks that `_csrf` is present, so a fresh random token is
/// sent each time.
fn form_fields(query: &TransferQuery) -> Vec<(&'static str, String)> {
    vec![
        ("_csrf", uuid::Uuid::new_v4().to_string()),
        ("queryWay", query.query_way().to_string()),
        ("startStation", query.route.start_station.clone()),
        ("endStation", query.route.end_station.clone()),
        ("queryDate", query.date.clone()),
        ("queryStartOrEnd", "s".to_string()),
        ("startTime", DAY_START.to_string()),
        ("endTime", DAY_END.to_string()),
        ("transferTime", TRANSFER_MINUTES.to_string()),
        ("hasTransferStation", "true".to_string()),
        ("_hasTransferStation", "on".to_string()),
        ("transferStation", query.route.transfer_station.clone()),
    ]
}
