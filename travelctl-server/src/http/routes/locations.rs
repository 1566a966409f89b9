//! Location endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::Location;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::validation::positive_id;
use crate::models::{LocationFields, ValidationError};

/// Create location request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    #[serde(default)]
    pub number: String,
    pub country: String,
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub image_url: String,
}

impl CreateLocationRequest {
    pub fn to_fields(&self) -> Result<LocationFields, ValidationError> {
        LocationFields::new(
            &self.number,
            &self.country,
            &self.city,
            &self.street,
            &self.image_url,
        )
    }
}

/// Update location request (full overwrite, id in body)
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    pub id: i64,
    #[serde(flatten)]
    pub fields: CreateLocationRequest,
}

/// Location response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub id: i64,
    pub number: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub image_url: String,
}

impl From<Location> for LocationResponse {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            number: l.number,
            country: l.country,
            city: l.city,
            street: l.street,
            image_url: l.image_url,
        }
    }
}

/// GET /locations - list all locations
async fn list_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocationResponse>>, ApiError> {
    let locations = state.locations.list().await?;
    Ok(Json(locations.into_iter().map(LocationResponse::from).collect()))
}

/// POST /locations - create a location
async fn create_location(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateLocationRequest>,
) -> Result<(StatusCode, Json<LocationResponse>), ApiError> {
    let fields = req.to_fields()?;
    let location = state.locations.create(fields).await?;

    Ok((StatusCode::CREATED, Json(LocationResponse::from(location))))
}

/// PUT /locations - overwrite a location
async fn update_location(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UpdateLocationRequest>,
) -> Result<Json<LocationResponse>, ApiError> {
    let id = positive_id("id", req.id)?;
    let fields = req.fields.to_fields()?;
    let location = state.locations.update(id, fields).await?;

    Ok(Json(LocationResponse::from(location)))
}

/// GET /locations/{id} - get a single location
async fn get_location(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<LocationResponse>, ApiError> {
    let location = state.locations.get(id).await?;
    Ok(Json(LocationResponse::from(location)))
}

/// DELETE /locations/{id} - delete a location
async fn delete_location(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<StatusCode, ApiError> {
    state.locations.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Location routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/locations",
            get(list_locations).post(create_location).put(update_location),
        )
        .route("/locations/{id}", get(get_location).delete(delete_location))
}
