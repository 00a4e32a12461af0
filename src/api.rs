use std::sync::Arc;

use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::PowercastError;
use crate::calendar;
use crate::forecast::{
    DailyForecast, DailyInput, ForecastService, HourlyForecast, HourlyInput, MonthlyForecast,
    MonthlyInput,
};
use crate::models::{HeatingType, HomeSize};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub predictor: String,
}

/// Daily form body; `date` defaults to tomorrow
#[derive(Debug, Serialize, Deserialize)]
pub struct DailyRequest {
    pub date: Option<NaiveDate>,
    pub previous_day_usage: f64,
    pub previous_week_usage: f64,
}

/// Monthly form body; categories stay text until parsed so unknown values
/// are reported with the category's own message
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyRequest {
    pub year: i32,
    pub month: u32,
    pub previous_month_usage: f64,
    pub average_monthly_usage: f64,
    pub average_temperature_c: i32,
    pub household_size: u8,
    pub home_size: String,
    pub heating_type: String,
}

impl Default for MonthlyRequest {
    fn default() -> Self {
        let input = MonthlyInput::default();
        Self {
            year: input.year,
            month: input.month,
            previous_month_usage: input.previous_month_usage,
            average_monthly_usage: input.average_monthly_usage,
            average_temperature_c: input.average_temperature_c,
            household_size: input.household_size,
            home_size: input.home_size.into(),
            heating_type: input.heating_type.into(),
        }
    }
}

impl TryFrom<MonthlyRequest> for MonthlyInput {
    type Error = PowercastError;

    fn try_from(request: MonthlyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            year: request.year,
            month: request.month,
            previous_month_usage: request.previous_month_usage,
            average_monthly_usage: request.average_monthly_usage,
            average_temperature_c: request.average_temperature_c,
            household_size: request.household_size,
            home_size: request.home_size.parse::<HomeSize>()?,
            heating_type: request.heating_type.parse::<HeatingType>()?,
        })
    }
}

/// Body errors keep axum's status (422 for well-formed JSON of the wrong
/// shape) but use the same JSON error body as forecast failures
fn body_rejection(rejection: JsonRejection) -> (StatusCode, Json<ApiError>) {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ApiError {
            error: rejection.body_text(),
        }),
    )
}

impl From<PowercastError> for (StatusCode, Json<ApiError>) {
    fn from(err: PowercastError) -> Self {
        let status = if err.is_input_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            tracing::error!("Forecast failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (
            status,
            Json(ApiError {
                error: err.user_message(),
            }),
        )
    }
}

pub fn router(service: Arc<ForecastService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/forecast/hourly", post(hourly))
        .route("/forecast/daily", post(daily))
        .route("/forecast/monthly", post(monthly))
        .with_state(service)
}

async fn health(State(service): State<Arc<ForecastService>>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        predictor: service.predictor_name().to_string(),
    })
}

async fn hourly(
    State(service): State<Arc<ForecastService>>,
    body: Result<Json<HourlyInput>, JsonRejection>,
) -> ApiResult<HourlyForecast> {
    let Json(input) = body.map_err(body_rejection)?;
    Ok(Json(service.hourly(input)?))
}

async fn daily(
    State(service): State<Arc<ForecastService>>,
    body: Result<Json<DailyRequest>, JsonRejection>,
) -> ApiResult<DailyForecast> {
    let Json(request) = body.map_err(body_rejection)?;
    let input = DailyInput {
        date: request.date.unwrap_or_else(calendar::tomorrow),
        previous_day_usage: request.previous_day_usage,
        previous_week_usage: request.previous_week_usage,
    };
    Ok(Json(service.daily(input)?))
}

async fn monthly(
    State(service): State<Arc<ForecastService>>,
    body: Result<Json<MonthlyRequest>, JsonRejection>,
) -> ApiResult<MonthlyForecast> {
    let Json(request) = body.map_err(body_rejection)?;
    let input = MonthlyInput::try_from(request)?;
    Ok(Json(service.monthly(input)?))
}
