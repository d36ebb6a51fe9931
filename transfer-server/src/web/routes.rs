//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info, warn};

use crate::domain::{Direction, minutes_since_midnight, query_date, taiwan_now};
use crate::feasibility::{classify, focus_index};
use crate::tra::{TraError, TransferQuery};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/board", get(board))
        .route("/:direction", get(transfers_get).post(transfers_post))
        .fallback(not_found)
        .layer(cors())
        .with_state(state)
}

/// Any origin may call the API from a browser.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Unknown paths get usage hints.
async fn not_found() -> AppError {
    AppError::NotFound
}

/// The path segment must name a transfer direction.
fn parse_direction(segment: &str) -> Result<Direction, AppError> {
    Direction::parse(segment).map_err(|_| AppError::NotFound)
}

/// Transfer options, with parameters in the query string.
async fn transfers_get(
    State(state): State<AppState>,
    Path(direction): Path<String>,
    Query(params): Query<TransferParams>,
) -> Result<Response, AppError> {
    let direction = parse_direction(&direction)?;
    transfers(&state, direction, params).await
}

/// Transfer options, with parameters in a JSON body.
async fn transfers_post(
    State(state): State<AppState>,
    Path(direction): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let direction = parse_direction(&direction)?;
    let params: TransferParams = serde_json::from_slice(&body).map_err(|e| {
        debug!(error = %e, "rejecting request body");
        AppError::BadRequest {
            message: "Invalid JSON body".to_string(),
        }
    })?;
    transfers(&state, direction, params).await
}

async fn transfers(
    state: &AppState,
    direction: Direction,
    params: TransferParams,
) -> Result<Response, AppError> {
    let route = params.route().ok_or(AppError::MissingParams)?;
    let date = params
        .date()
        .map_or_else(|| query_date(taiwan_now().date_naive()), str::to_string);

    let query = TransferQuery::new(direction, route, date);
    let records = state.tra.get_records(&query).await?;
    info!(
        %direction,
        date = %query.date,
        records = records.len(),
        "served transfer query"
    );

    let body: Vec<RecordResult> = records.iter().map(RecordResult::from_record).collect();
    let cache_control = format!("public, max-age={}", state.max_age.as_secs());

    Ok(([(header::CACHE_CONTROL, cache_control)], Json(body)).into_response())
}

/// Today's options in both directions along the configured routes, each
/// tagged with how catchable it is right now.
async fn board(State(state): State<AppState>) -> Json<BoardResponse> {
    let now = taiwan_now();
    let date = query_date(now.date_naive());
    let now_minutes = minutes_since_midnight(now.time());

    let (rail_first, high_speed_first) = tokio::join!(
        direction_board(&state, Direction::TraToThsr, &date, now_minutes),
        direction_board(&state, Direction::ThsrToTra, &date, now_minutes),
    );

    Json(BoardResponse {
        now: now.format("%H:%M").to_string(),
        date,
        rail_first,
        high_speed_first,
    })
}

async fn direction_board(
    state: &AppState,
    direction: Direction,
    date: &str,
    now_minutes: u32,
) -> DirectionBoard {
    let settings = state.settings.for_direction(direction);
    let query = TransferQuery::new(direction, settings.route.clone(), date);

    let records = match state.tra.get_records(&query).await {
        Ok(records) => records,
        Err(e) => {
            warn!(%direction, error = %e, "board query failed");
            return DirectionBoard::Failed {
                error: e.to_string(),
            };
        }
    };

    let classified = classify(&records, now_minutes, &settings.thresholds);
    let focus = focus_index(classified.iter().map(|(_, tier)| *tier));

    DirectionBoard::Ready {
        records: classified
            .into_iter()
            .map(|(record, tier)| ClassifiedResult {
                record: RecordResult::from_record(record),
                tier,
            })
            .collect(),
        focus,
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    MissingParams,
    NotFound,
    Upstream { status: StatusCode, message: String },
    Parse { message: String },
    Internal { message: String },
}

impl From<TraError> for AppError {
    fn from(e: TraError) -> Self {
        match e {
            TraError::Upstream { status, .. } => AppError::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                message: e.to_string(),
            },
            TraError::Http(_) => AppError::Upstream {
                status: StatusCode::BAD_GATEWAY,
                message: e.to_string(),
            },
            TraError::Parse(inner) => AppError::Parse {
                message: inner.to_string(),
            },
            TraError::Config(message) => AppError::Internal { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest { message } => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
            }
            AppError::MissingParams => (
                StatusCode::BAD_REQUEST,
                Json(MissingParamsResponse {
                    error: "Missing required parameters",
                    required: REQUIRED_PARAMS,
                }),
            )
                .into_response(),
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json(HelpResponse::default())).into_response()
            }
            AppError::Upstream { status, message } => {
                warn!(status = status.as_u16(), %message, "TRA request failed");
                let body = ErrorResponse {
                    error: "Failed to fetch from TRA server".to_string(),
                };
                (status, Json(body)).into_response()
            }
            AppError::Parse { message } => {
                warn!(%message, "could not parse TRA result page");
                let body = ParseErrorResponse {
                    error: "Failed to parse HTML response.",
                    message,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                let body = Json(ErrorResponse { error: message });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
