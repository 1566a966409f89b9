//! Holiday endpoints
//!
//! On the wire a holiday points at its location with `location` (alias
//! `locationId`). `null`, a missing field, or `-1` all mean "no location".
//! Prices are decimals: numbers or strings are accepted, strings are returned.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::locations::LocationResponse;
use crate::db::repos::Holiday;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::validation::positive_id;
use crate::models::{parse_date, HolidayFields, HolidayFilter, Price, ValidationError, DATE_FORMAT};

/// Location reference meaning "none"
const NO_LOCATION: i64 = -1;

/// Create holiday request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHolidayRequest {
    pub title: String,
    pub start_date: String,
    pub duration: i32,
    pub free_slots: i32,
    pub price: Decimal,
    #[serde(default, alias = "locationId")]
    pub location: Option<i64>,
}

impl CreateHolidayRequest {
    pub fn to_fields(&self) -> Result<HolidayFields, ValidationError> {
        let location_id = self.location.filter(|id| *id != NO_LOCATION);

        HolidayFields::new(
            &self.title,
            parse_date("startDate", &self.start_date)?,
            self.duration,
            self.free_slots,
            Price::new(self.price)?,
            location_id,
        )
    }
}

/// Update holiday request (full overwrite, id in body)
#[derive(Debug, Deserialize)]
pub struct UpdateHolidayRequest {
    pub id: i64,
    #[serde(flatten)]
    pub fields: CreateHolidayRequest,
}

/// Query parameters for GET /holidays
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayListParams {
    pub start_date: Option<String>,
    pub duration: Option<String>,
}

impl HolidayListParams {
    pub fn to_filter(&self) -> Result<HolidayFilter, ValidationError> {
        HolidayFilter::parse(self.start_date.as_deref(), self.duration.as_deref())
    }
}

/// Holiday response with the location embedded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayResponse {
    pub id: i64,
    pub title: String,
    pub start_date: String,
    pub duration: i32,
    pub free_slots: i32,
    pub price: Decimal,
    pub location: Option<LocationResponse>,
}

impl From<Holiday> for HolidayResponse {
    fn from(h: Holiday) -> Self {
        Self {
            id: h.id,
            title: h.title,
            start_date: h.start_date.format(DATE_FORMAT).to_string(),
            duration: h.duration,
            free_slots: h.free_slots,
            price: h.price,
            location: h.location.map(LocationResponse::from),
        }
    }
}

/// GET /holidays?startDate=&duration= - list holidays
async fn list_holidays(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<HolidayListParams>,
) -> Result<Json<Vec<HolidayResponse>>, ApiError> {
    let filter = params.to_filter()?;
    let holidays = state.holidays.list(filter).await?;

    Ok(Json(holidays.into_iter().map(HolidayResponse::from).collect()))
}

/// POST /holidays - create a holiday
async fn create_holiday(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateHolidayRequest>,
) -> Result<(StatusCode, Json<HolidayResponse>), ApiError> {
    let fields = req.to_fields()?;
    let holiday = state.holidays.create(fields).await?;

    Ok((StatusCode::CREATED, Json(HolidayResponse::from(holiday))))
}

/// PUT /holidays - overwrite a holiday
async fn update_holiday(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UpdateHolidayRequest>,
) -> Result<Json<HolidayResponse>, ApiError> {
    let id = positive_id("id", req.id)?;
    let fields = req.fields.to_fields()?;
    let holiday = state.holidays.update(id, fields).await?;

    Ok(Json(HolidayResponse::from(holiday)))
}

/// GET /holidays/{id} - get a single holiday
async fn get_holiday(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<HolidayResponse>, ApiError> {
    let holiday = state.holidays.get(id).await?;
    Ok(Json(HolidayResponse::from(holiday)))
}

/// DELETE /holidays/{id} - delete a holiday
async fn delete_holiday(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.holidays.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Holiday routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/holidays",
            get(list_holidays).post(create_holiday).put(update_holiday),
        )
        .route("/holidays/{id}", get(get_holiday).delete(delete_holiday))
}
