use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{DayRecord, Schedule, ShiftCode};

/// One loaded roster behind a single lock; the schedule itself has none.
#[derive(Clone)]
pub struct AppState {
    schedule: Arc<RwLock<Schedule>>,
}

impl AppState {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule: Arc::new(RwLock::new(schedule)),
        }
    }

    fn schedule(&self) -> Arc<RwLock<Schedule>> {
        self.schedule.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Rejected(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn rejected(message: impl Into<String>) -> Self {
        ApiError::Rejected(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Rejected(message) => {
                let body = Json(ErrorBody {
                    error: "rejected",
                    message,
                });
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayView {
    pub day: i64,
    pub shifts: HashMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwapPayload {
    pub day1: i64,
    pub day2: i64,
    pub user1: String,
    pub user2: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusPayload {
    pub day: i64,
    pub user: String,
    pub status: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/employees", get(list_employees))
        .route("/days", get(list_days))
        .route("/days/:day", get(get_day))
        .route("/days/:day/duty", get(get_duty))
        .route("/swap", post(swap_shifts))
        .route("/status", post(change_status))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, schedule: Schedule) -> std::io::Result<()> {
    let state = AppState::new(schedule);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "roster HTTP API listening");
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_employees(State(state): State<AppState>) -> Json<Vec<String>> {
    let schedule = state.schedule();
    let employees = schedule.read().employees().to_vec();
    Json(employees)
}

async fn list_days(State(state): State<AppState>) -> Json<Vec<DayRecord>> {
    let schedule = state.schedule();
    let days = schedule.read().get_full_schedule().to_vec();
    Json(days)
}

async fn get_day(
    State(state): State<AppState>,
    Path(day): Path<i64>,
) -> Result<Json<DayView>, ApiError> {
    let schedule = state.schedule();
    let shifts = {
        let guard = schedule.read();
        guard.get_day_schedule(day).cloned()
    };
    match shifts {
        Some(shifts) => Ok(Json(DayView { day, shifts })),
        None => Err(ApiError::not_found(format!("no roster entry for day {day}"))),
    }
}

async fn get_duty(
    State(state): State<AppState>,
    Path(day): Path<i64>,
) -> Result<Json<Vec<String>>, ApiError> {
    let schedule = state.schedule();
    let on_duty = {
        let guard = schedule.read();
        guard
            .employees_with(day, ShiftCode::Duty)
            .map(|names| names.into_iter().map(str::to_string).collect::<Vec<_>>())
    };
    on_duty
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no roster entry for day {day}")))
}

async fn swap_shifts(
    State(state): State<AppState>,
    Json(payload): Json<SwapPayload>,
) -> Result<StatusCode, ApiError> {
    let schedule = state.schedule();
    let swapped = {
        let mut guard = schedule.write();
        guard.swap_shifts(payload.day1, payload.day2, &payload.user1, &payload.user2)
    };
    if !swapped {
        return Err(ApiError::rejected(format!(
            "cannot swap {} on day {} with {} on day {}",
            payload.user1, payload.day1, payload.user2, payload.day2
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn change_status(
    State(state): State<AppState>,
    Json(payload): Json<StatusPayload>,
) -> Result<StatusCode, ApiError> {
    let schedule = state.schedule();
    let changed = {
        let mut guard = schedule.write();
        guard.change_status(payload.day, &payload.user, &payload.status)
    };
    if !changed {
        return Err(ApiError::rejected(format!(
            "cannot set status '{}' for {} on day {}",
            payload.status, payload.user, payload.day
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}
