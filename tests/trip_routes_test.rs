mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;
use serial_test::serial;

use common::{louvre_json, FakeModel, TestApp, PARIS_REPLY};

#[actix_rt::test]
#[serial]
async fn test_default_trip_is_empty() {
    let test_app = TestApp::new(FakeModel::replying(PARIS_REPLY));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/trip").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["trip"]["name"], "My Trip");
    assert_eq!(body["trip"]["items"], json!([]));

    let req = test::TestRequest::get().uri("/api/trip/default/id").to_request();
    let id_body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(id_body["trip_id"], body["trip"]["id"]);
}

#[actix_rt::test]
#[serial]
async fn test_get_trip_by_id() {
    let test_app = TestApp::new(FakeModel::replying(PARIS_REPLY));
    let trip_id = test_app.trips.default_trip_id().to_string();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/trip/{}", trip_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["trip"]["id"], trip_id);
}

#[actix_rt::test]
#[serial]
async fn test_unknown_trip_is_not_found() {
    let test_app = TestApp::new(FakeModel::replying(PARIS_REPLY));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/trip/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Trip not found");

    let req = test::TestRequest::post()
        .uri("/api/trip/add-location")
        .set_json(&json!({"location": louvre_json(), "trip_id": "does-not-exist"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
#[serial]
async fn test_add_and_remove_location() {
    let test_app = TestApp::new(FakeModel::replying(PARIS_REPLY));
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/trip/add-location")
        .set_json(&json!({"location": louvre_json()}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let items = body["trip"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["location"]["name"], "Louvre Museum");
    assert!(items[0]["notes"].is_null());
    let item_id = items[0]["id"].as_str().unwrap().to_string();

    // adding the same place again leaves the trip unchanged
    let req = test::TestRequest::post()
        .uri("/api/trip/add-location")
        .set_json(&json!({"location": louvre_json()}))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["trip"]["items"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/trip/remove-location/{}", item_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["trip"]["items"], json!([]));
}

#[actix_rt::test]
#[serial]
async fn test_remove_location_with_explicit_trip() {
    let test_app = TestApp::new(FakeModel::replying(PARIS_REPLY));
    let trip_id = test_app.trips.default_trip_id().to_string();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/trip/remove-location/unknown-item?trip_id={}", trip_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri("/api/trip/remove-location/unknown-item?trip_id=missing")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
#[serial]
async fn test_add_location_rejects_bad_coordinates() {
    let test_app = TestApp::new(FakeModel::replying(PARIS_REPLY));
    let app = test::init_service(test_app.create_app()).await;

    let mut location = louvre_json();
    location["lat"] = json!(123.0);

    let req = test::TestRequest::post()
        .uri("/api/trip/add-location")
        .set_json(&json!({"location": location}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/trip").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["trip"]["items"], json!([]));
}
