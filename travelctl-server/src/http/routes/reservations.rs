//! Reservation endpoints
//!
//! Writes name the holiday by id (`holiday`, alias `holidayId`); every read
//! embeds the full holiday.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::holidays::HolidayResponse;
use crate::db::repos::Reservation;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::validation::positive_id;
use crate::models::{ReservationFields, ValidationError};

/// Create reservation request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[serde(alias = "phone_number")]
    pub phone_number: String,
    #[serde(alias = "contact_name")]
    pub contact_name: String,
    #[serde(alias = "holidayId")]
    pub holiday: i64,
}

impl CreateReservationRequest {
    /// Validated holiday id and fields.
    pub fn to_parts(&self) -> Result<(i64, ReservationFields), ValidationError> {
        let holiday_id = positive_id("holiday", self.holiday)?;
        let fields = ReservationFields::new(&self.phone_number, &self.contact_name)?;
        Ok((holiday_id, fields))
    }
}

/// Update reservation request. Any holiday reference in the body is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationRequest {
    pub id: i64,
    #[serde(alias = "phone_number")]
    pub phone_number: String,
    #[serde(alias = "contact_name")]
    pub contact_name: String,
}

/// Reservation response with the holiday embedded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i64,
    pub phone_number: String,
    pub contact_name: String,
    pub holiday: HolidayResponse,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            phone_number: r.phone_number,
            contact_name: r.contact_name,
            holiday: HolidayResponse::from(r.holiday),
        }
    }
}

/// GET /reservations - list all reservations
async fn list_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let reservations = state.reservations.list().await?;
    Ok(Json(
        reservations.into_iter().map(ReservationResponse::from).collect(),
    ))
}

/// POST /reservations - book a holiday
async fn create_reservation(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let (holiday_id, fields) = req.to_parts()?;
    let reservation = state.reservations.create(holiday_id, fields).await?;

    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

/// PUT /reservations - change contact details
async fn update_reservation(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UpdateReservationRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let id = positive_id("id", req.id)?;
    let fields = ReservationFields::new(&req.phone_number, &req.contact_name)?;
    let reservation = state.reservations.update(id, fields).await?;

    Ok(Json(ReservationResponse::from(reservation)))
}

/// GET /reservations/{id} - get a single reservation
async fn get_reservation(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation = state.reservations.get(id).await?;
    Ok(Json(ReservationResponse::from(reservation)))
}

/// DELETE /reservations/{id} - cancel a reservation
async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.reservations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reservation routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/reservations",
            get(list_reservations)
                .post(create_reservation)
                .put(update_reservation),
        )
        .route(
            "/reservations/{id}",
            get(get_reservation).delete(delete_reservation),
        )
}
