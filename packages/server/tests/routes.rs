use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use global_api_database::Store;
use global_api_server::{AppState, configure};
use global_api_test_utils::{
    asset, empty_store, insert_asset, insert_boundary, insert_datasource, insert_grid_cell,
    insert_overlap, insert_rect_boundary,
};
use serde_json::Value;

const TRIANGLE: &str = "POLYGON ((0 0, 10 0, 0 10, 0 0))";

fn seeded() -> Store {
    let store = empty_store();
    insert_boundary(&store, "BR TRI", TRIANGLE, 10.0, 0.0, 10.0, 0.0);
    insert_rect_boundary(&store, "BR SQA", 5.0, -5.0, 20.0, 5.0);

    insert_asset(&store, &asset("ch4", Some(10.0)), "2022-12-31 00:00:00");
    insert_asset(&store, &asset("co2e_100yr", Some(298.0)), "2022-12-31 00:00:00");

    insert_overlap(&store, "US NYC", (40.65, -73.95), 1.0);
    insert_grid_cell(&store, (40.65, -73.95), "CH4", 2021, "II.1.1", 10.0);
    store
}

async fn get(uri: &str, store: Store) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(AppState {
                store: Arc::new(store),
            }))
            .configure(configure),
    )
    .await;
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[actix_web::test]
async fn health_reports_version() {
    let (status, body) = get("/api/v0/health", empty_store()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["healthy"], true);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn locodes_for_point() {
    let (status, body) = get("/api/v0/cityboundary/locode/1.0/1.0", seeded()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "locodes": ["BR TRI"] }));
}

#[actix_web::test]
async fn overlapping_locodes_are_sorted() {
    let (status, body) = get("/api/v0/cityboundary/locode/2/6", seeded()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locodes"], serde_json::json!(["BR SQA", "BR TRI"]));
}

#[actix_web::test]
async fn locodes_empty_when_nothing_contains_point() {
    let (status, body) = get("/api/v0/cityboundary/locode/-45/170", seeded()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["locodes"], serde_json::json!([]));
}

#[actix_web::test]
async fn non_numeric_latitude_is_rejected() {
    let (status, body) = get("/api/v0/cityboundary/locode/north/1.0", seeded()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "invalid_input");
}

#[actix_web::test]
async fn city_boundary_found() {
    let (status, body) = get("/api/v0/cityboundary/city/BR%20SQA", seeded()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bbox_north"], 5.0);
    assert_eq!(body["bbox_west"], 5.0);
    assert!(body["city_geometry"].as_str().unwrap().starts_with("POLYGON"));
}

#[actix_web::test]
async fn city_boundary_missing_is_404() {
    let (status, body) = get("/api/v0/cityboundary/city/XX%20ZZZ", seeded()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "City boundary not found");
    assert_eq!(body["kind"], "not_found");
}

#[actix_web::test]
async fn climatetrace_totals_and_points() {
    let (status, body) = get(
        "/api/v0/climatetrace/city/US%20NYC/2022/II.1.1",
        seeded(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let totals = &body["totals"]["emissions"];
    assert_eq!(totals["ch4_mass"], "10");
    assert_eq!(totals["ch4_co2eq_100yr"], "298.0");
    assert_eq!(totals["co2eq_100yr"], "298");
    assert_eq!(totals["gpc_quality"], "TBD");
    assert_eq!(body["points"].as_array().unwrap().len(), 1);
    assert_eq!(body["points"][0]["capacity"]["factor"], "NA");
}

#[actix_web::test]
async fn climatetrace_without_rows_is_zero() {
    let (status, body) = get(
        "/api/v0/climatetrace/city/US%20NYC/1999/II.1.1",
        seeded(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["emissions"]["co2_mass"], "0");
    assert_eq!(body["points"], serde_json::json!([]));
}

#[actix_web::test]
async fn non_integer_year_is_rejected() {
    let (status, body) = get(
        "/api/v0/climatetrace/city/US%20NYC/twenty/II.1.1",
        seeded(),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "invalid_input");
}

#[actix_web::test]
async fn edgar_weighted_totals() {
    let (status, body) = get("/api/v0/edgar/city/US%20NYC/2021/II.1.1", seeded()).await;

    assert_eq!(status, StatusCode::OK);
    let totals = &body["totals"]["emissions"];
    assert_eq!(totals["ch4_mass"], "10.0");
    assert_eq!(totals["ch4_co2eq_100yr"], "298.0");
    assert_eq!(totals["co2eq_100yr"], "298");
    assert!(body.get("points").is_none());
}

#[actix_web::test]
async fn edgar_without_rows_is_404() {
    let (status, body) = get("/api/v0/edgar/city/US%20NYC/2020/II.1.1", seeded()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No data available");
}

#[actix_web::test]
async fn last_update_empty_catalogue_is_404() {
    let (status, body) = get("/api/v0/catalogue/last-update", seeded()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[actix_web::test]
async fn last_update_reports_latest() {
    let store = seeded();
    insert_datasource(&store, "a", "A", "2024-01-01 00:00:00");
    insert_datasource(&store, "b", "B", "2024-01-17 17:44:56.668");

    let (status, body) = get("/api/v0/catalogue/last-update", store).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "last_update": 1_705_513_497 }));
}
