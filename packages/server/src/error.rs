//! Mapping of domain errors onto HTTP responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use global_api_database::DbError;
use global_api_emissions::EmissionsError;
use global_api_geography::GeoError;
use global_api_server_models::{ApiErrorBody, ApiErrorKind};

/// Detail sent when a city has no stored boundary.
pub const BOUNDARY_NOT_FOUND: &str = "City boundary not found";

/// Detail sent when a query matched no data.
pub const NO_DATA: &str = "No data available";

/// An error ready to be returned from a handler.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct ApiError {
    /// Response category.
    pub kind: ApiErrorKind,
    /// Message sent to the client.
    pub detail: String,
}

impl ApiError {
    /// Creates an error of the given kind.
    pub fn new(kind: ApiErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Nothing matched the query.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, detail)
    }

    /// The request was rejected before storage was touched.
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidInput, detail)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            ApiErrorKind::NotFound => StatusCode::NOT_FOUND,
            ApiErrorKind::InvalidInput => StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorKind::DataIntegrity | ApiErrorKind::Storage => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::debug!("{self}");
        }

        HttpResponse::build(status).json(ApiErrorBody {
            detail: self.detail.clone(),
            kind: self.kind,
        })
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        let kind = match &e {
            DbError::Conversion { .. }
            | DbError::Database(
                duckdb::Error::FromSqlConversionFailure(..)
                | duckdb::Error::InvalidColumnType(..),
            ) => ApiErrorKind::DataIntegrity,
            DbError::Database(_) | DbError::Io(_) => ApiErrorKind::Storage,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<GeoError> for ApiError {
    fn from(e: GeoError) -> Self {
        match e {
            GeoError::Database(e) => e.into(),
            GeoError::Geometry { .. } => Self::new(ApiErrorKind::DataIntegrity, e.to_string()),
            GeoError::NotFound { .. } => Self::not_found(BOUNDARY_NOT_FOUND),
            GeoError::InvalidInput { message } => Self::invalid_input(message),
        }
    }
}

impl From<EmissionsError> for ApiError {
    fn from(e: EmissionsError) -> Self {
        match e {
            EmissionsError::Database(e) => e.into(),
            EmissionsError::NotFound { .. } => Self::not_found(NO_DATA),
            EmissionsError::DataIntegrity { .. } => {
                Self::new(ApiErrorKind::DataIntegrity, e.to_string())
            }
            EmissionsError::InvalidInput { message } => Self::invalid_input(message),
        }
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        Self::new(ApiErrorKind::Storage, e.to_string())
    }
}
