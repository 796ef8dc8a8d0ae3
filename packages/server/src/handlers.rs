//! HTTP handler functions for the Global API.

use actix_web::{HttpResponse, web};
use global_api_database::catalogue;
use global_api_emissions::{EmissionsQuery, aggregate_grid_overlap, aggregate_point_source};
use global_api_geography::{city_boundary as find_city_boundary, resolve_locodes};
use global_api_server_models::{ApiCityBoundary, ApiHealth, ApiLastUpdate, ApiLocodes};

use crate::AppState;
use crate::error::{ApiError, NO_DATA};

/// `GET /api/v0/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/v0/cityboundary/locode/{lat}/{lon}`
///
/// Returns the locodes of every city whose boundary contains the point.
pub async fn locodes(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (lat, lon) = path.into_inner();
    let lat = parse_coordinate("lat", &lat)?;
    let lon = parse_coordinate("lon", &lon)?;

    let store = state.store.clone();
    let locodes = web::block(move || resolve_locodes(&store, lat, lon)).await??;

    Ok(HttpResponse::Ok().json(ApiLocodes {
        locodes: locodes.into_iter().collect(),
    }))
}

/// `GET /api/v0/cityboundary/city/{locode}`
pub async fn city_boundary(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let locode = path.into_inner();

    let store = state.store.clone();
    let row = web::block(move || find_city_boundary(&store, &locode)).await??;

    Ok(HttpResponse::Ok().json(ApiCityBoundary::from(row)))
}

/// `GET /api/v0/climatetrace/city/{locode}/{year}/{gpcReferenceNumber}`
///
/// Point-source totals and per-asset detail.
pub async fn climatetrace(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> Result<HttpResponse, ApiError> {
    let query = parse_query(path)?;

    let store = state.store.clone();
    let emissions = web::block(move || aggregate_point_source(&store, &query)).await??;

    Ok(HttpResponse::Ok().json(emissions))
}

/// `GET /api/v0/edgar/city/{locode}/{year}/{gpcReferenceNumber}`
///
/// Grid-overlap totals weighted by each cell's fraction inside the city.
pub async fn edgar(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
) -> Result<HttpResponse, ApiError> {
    let query = parse_query(path)?;

    let store = state.store.clone();
    let emissions = web::block(move || aggregate_grid_overlap(&store, &query)).await??;

    Ok(HttpResponse::Ok().json(emissions))
}

/// `GET /api/v0/catalogue/last-update`
pub async fn last_update(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let store = state.store.clone();
    let latest = web::block(move || {
        let session = store.session()?;
        catalogue::last_update(&session)
    })
    .await??;

    latest.map_or_else(
        || Err(ApiError::not_found(NO_DATA)),
        |last_update| Ok(HttpResponse::Ok().json(ApiLastUpdate { last_update })),
    )
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::invalid_input(format!("{name} must be a number, got {raw:?}")))
}

fn parse_query(path: web::Path<(String, String, String)>) -> Result<EmissionsQuery, ApiError> {
    let (locode, year, reference_number) = path.into_inner();
    Ok(EmissionsQuery::parse(&locode, &year, &reference_number)?)
}
