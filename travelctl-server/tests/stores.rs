//! Repository integration tests against PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p travelctl-server -- --ignored

mod common;

use std::str::FromStr;

use axum::http::StatusCode;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use travelctl_server::db::{DbError, Location};
use travelctl_server::models::{HolidayFields, HolidayFilter, LocationFields, Price, ReservationFields};
use travelctl_server::{build_router, AppState, ServerConfig};

fn varna() -> LocationFields {
    LocationFields::new(
        "3",
        "Bulgaria",
        "Varna",
        "Primorski Blvd",
        "https://img.example.com/varna.jpg",
    )
    .unwrap()
}

fn holiday(title: &str, duration: i32, location_id: Option<i64>) -> HolidayFields {
    HolidayFields::new(
        title,
        NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        duration,
        20,
        Price::new(Decimal::from_str("499.90").unwrap()).unwrap(),
        location_id,
    )
    .unwrap()
}

fn booking(name: &str) -> ReservationFields {
    ReservationFields::new("+359 88 123 4567", name).unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn location_round_trip() {
    let stores = common::stores().await;

    let fields = varna();
    let created = stores.locations.create(fields.clone()).await.unwrap();
    assert!(created.id > 0);

    let fetched = stores.locations.get(created.id).await.unwrap();
    assert_eq!(
        fetched,
        Location {
            id: created.id,
            number: fields.number,
            country: fields.country,
            city: fields.city,
            street: fields.street,
            image_url: fields.image_url,
        }
    );

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn empty_location_list_is_not_an_error() {
    let stores = common::stores().await;

    let locations = stores.locations.list().await.unwrap();
    assert!(locations.is_empty());

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_location_is_not_found() {
    let stores = common::stores().await;

    let err = stores.locations.get(4242).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "location", id: 4242 }));

    let err = stores.locations.delete(4242).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    let err = stores.locations.update(4242, varna()).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn location_update_overwrites_all_fields() {
    let stores = common::stores().await;

    let created = stores.locations.create(varna()).await.unwrap();
    let replacement = LocationFields::new("10", "Greece", "Thessaloniki", "Tsimiski", "").unwrap();

    let updated = stores
        .locations
        .update(created.id, replacement.clone())
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.city, "Thessaloniki");
    assert_eq!(updated.image_url, "");

    assert_eq!(stores.locations.get(created.id).await.unwrap(), updated);

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn holiday_embeds_its_location() {
    let stores = common::stores().await;

    let location = stores.locations.create(varna()).await.unwrap();
    let created = stores
        .holidays
        .create(holiday("Sea week", 7, Some(location.id)))
        .await
        .unwrap();
    assert_eq!(created.location.as_ref(), Some(&location));

    let fetched = stores.holidays.get(created.id).await.unwrap();
    assert_eq!(fetched.location, Some(location));
    assert_eq!(fetched.price, Decimal::from_str("499.90").unwrap());

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn holiday_without_location() {
    let stores = common::stores().await;

    let created = stores.holidays.create(holiday("Mystery", 3, None)).await.unwrap();
    assert_eq!(created.location, None);
    assert_eq!(stores.holidays.get(created.id).await.unwrap().location, None);

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn holiday_with_unknown_location_is_rejected() {
    let stores = common::stores().await;

    let err = stores
        .holidays
        .create(holiday("Nowhere", 3, Some(999)))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::MissingReference { resource: "location", id: 999 }));

    assert!(stores.holidays.list(HolidayFilter::default()).await.unwrap().is_empty());

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_holiday_is_not_found() {
    let stores = common::stores().await;

    let err = stores
        .holidays
        .update(999, holiday("Ghost trip", 3, None))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "holiday", id: 999 }));

    let err = stores.holidays.delete(999).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "holiday", id: 999 }));

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn holiday_update_to_unknown_location_keeps_row() {
    let stores = common::stores().await;

    let location = stores.locations.create(varna()).await.unwrap();
    let created = stores
        .holidays
        .create(holiday("Sea week", 7, Some(location.id)))
        .await
        .unwrap();

    let err = stores
        .holidays
        .update(created.id, holiday("Sea week", 7, Some(555)))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::MissingReference { resource: "location", id: 555 }));

    let unchanged = stores.holidays.get(created.id).await.unwrap();
    assert_eq!(unchanged.location, Some(location));

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_reservation_update_is_not_found() {
    let stores = common::stores().await;

    let err = stores
        .reservations
        .update(999, booking("Nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "reservation", id: 999 }));

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn holiday_update_changes_only_given_fields() {
    let stores = common::stores().await;

    let location = stores.locations.create(varna()).await.unwrap();
    let original = stores
        .holidays
        .create(holiday("Sea week", 7, Some(location.id)))
        .await
        .unwrap();

    let mut changed = holiday("Sea week", 10, Some(location.id));
    changed.price = Price::new(Decimal::from_str("650").unwrap()).unwrap();

    stores.holidays.update(original.id, changed).await.unwrap();
    let fetched = stores.holidays.get(original.id).await.unwrap();

    assert_eq!(fetched.duration, 10);
    assert_eq!(fetched.price, Decimal::from_str("650.00").unwrap());
    assert_eq!(fetched.title, original.title);
    assert_eq!(fetched.start_date, original.start_date);
    assert_eq!(fetched.free_slots, original.free_slots);
    assert_eq!(fetched.location, original.location);

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn holiday_filter_by_duration() {
    let stores = common::stores().await;

    for (title, duration) in [("A", 3), ("B", 7), ("C", 3)] {
        stores.holidays.create(holiday(title, duration, None)).await.unwrap();
    }

    let filter = HolidayFilter::parse(None, Some("3")).unwrap();
    let matching = stores.holidays.list(filter).await.unwrap();

    assert_eq!(matching.len(), 2);
    assert!(matching.iter().all(|h| h.duration == 3));
    assert_eq!(
        matching.iter().map(|h| h.title.as_str()).collect::<Vec<_>>(),
        ["A", "C"]
    );

    let all = stores.holidays.list(HolidayFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn holiday_filter_by_start_date_and_duration() {
    let stores = common::stores().await;

    stores.holidays.create(holiday("July", 3, None)).await.unwrap();
    let mut august = holiday("August", 3, None);
    august.start_date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    stores.holidays.create(august).await.unwrap();

    let filter = HolidayFilter::parse(Some("2025-08-01"), Some("3")).unwrap();
    let matching = stores.holidays.list(filter).await.unwrap();

    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].title, "August");

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn referenced_location_cannot_be_deleted() {
    let stores = common::stores().await;

    let location = stores.locations.create(varna()).await.unwrap();
    stores
        .holidays
        .create(holiday("Sea week", 7, Some(location.id)))
        .await
        .unwrap();

    let err = stores.locations.delete(location.id).await.unwrap_err();
    assert!(matches!(err, DbError::Conflict { resource: "location", .. }));
    assert!(stores.locations.get(location.id).await.is_ok());

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn minimal_lookup_message() {
    let stores = common::stores().await;

    let created = stores.holidays.create(holiday("Sea week", 7, None)).await.unwrap();
    let summary = stores.holidays.get_minimal(created.id).await.unwrap();
    assert_eq!(summary.title, "Sea week");
    assert_eq!(summary.start_date, created.start_date);

    let err = stores.holidays.get_minimal(777).await.unwrap_err();
    assert_eq!(err.to_string(), "holiday with ID 777 not found");

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn reservation_requires_existing_holiday() {
    let stores = common::stores().await;

    let err = stores
        .reservations
        .create(31337, booking("Elena"))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "associated holiday not found: holiday with ID 31337 not found"
    );
    assert!(matches!(err, DbError::MissingReference { .. }));

    assert!(stores.reservations.list().await.unwrap().is_empty());

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn reservation_reads_embed_holiday() {
    let stores = common::stores().await;

    let location = stores.locations.create(varna()).await.unwrap();
    let trip = stores
        .holidays
        .create(holiday("Sea week", 7, Some(location.id)))
        .await
        .unwrap();

    let created = stores.reservations.create(trip.id, booking("Elena")).await.unwrap();
    assert_eq!(created.holiday, trip);

    let fetched = stores.reservations.get(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let listed = stores.reservations.list().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(listed[0].holiday.location, Some(location));

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn reservation_update_keeps_holiday() {
    let stores = common::stores().await;

    let trip = stores.holidays.create(holiday("Sea week", 7, None)).await.unwrap();
    let created = stores.reservations.create(trip.id, booking("Elena")).await.unwrap();

    let updated = stores
        .reservations
        .update(created.id, ReservationFields::new("0899000111", "Elena Ivanova").unwrap())
        .await
        .unwrap();

    assert_eq!(updated.phone_number, "0899000111");
    assert_eq!(updated.contact_name, "Elena Ivanova");
    assert_eq!(updated.holiday.id, trip.id);

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleted_reservation_is_not_found() {
    let stores = common::stores().await;

    let trip = stores.holidays.create(holiday("Sea week", 7, None)).await.unwrap();
    let created = stores.reservations.create(trip.id, booking("Elena")).await.unwrap();

    stores.reservations.delete(created.id).await.unwrap();

    let err = stores.reservations.get(created.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { resource: "reservation", .. }));

    let err = stores.reservations.delete(created.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn booked_holiday_cannot_be_deleted() {
    let stores = common::stores().await;

    let trip = stores.holidays.create(holiday("Sea week", 7, None)).await.unwrap();
    stores.reservations.create(trip.id, booking("Elena")).await.unwrap();

    let err = stores.holidays.delete(trip.id).await.unwrap_err();
    assert!(matches!(err, DbError::Conflict { resource: "holiday", .. }));

    stores.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn http_booking_flow() {
    let stores = common::stores().await;
    let app = build_router(AppState::new(stores.pool.clone()), &ServerConfig::default());

    let (status, location) = common::send(
        app.clone(),
        "POST",
        "/locations",
        Some(json!({
            "number": "3",
            "country": "Bulgaria",
            "city": "Varna",
            "street": "Primorski Blvd",
            "imageUrl": "https://img.example.com/varna.jpg"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, trip) = common::send(
        app.clone(),
        "POST",
        "/holidays",
        Some(json!({
            "title": "Sea week",
            "startDate": "2025-07-01",
            "duration": 7,
            "freeSlots": 20,
            "price": 499.9,
            "location": location["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(trip["price"], "499.90");
    assert_eq!(trip["location"], location);

    let (status, body) = common::send(
        app.clone(),
        "POST",
        "/reservations",
        Some(json!({
            "phoneNumber": "0888123456",
            "contactName": "Elena",
            "holiday": 999
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "missing_reference");

    let (status, booking) = common::send(
        app.clone(),
        "POST",
        "/reservations",
        Some(json!({
            "phoneNumber": "0888123456",
            "contactName": "Elena",
            "holiday": trip["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["holiday"], trip);

    let uri = format!("/reservations/{}", booking["id"]);
    let (status, _) = common::send(app.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = common::send(app.clone(), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, list) = common::send(app, "GET", "/holidays?duration=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    stores.cleanup().await;
}
