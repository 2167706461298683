//! API error type and its JSON response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use aitools_catalog::{AdSenseError, CatalogError, ProcessError, SettingsError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("admin session required")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    pub fn tool_not_found(id: &str) -> Self {
        ApiError::NotFound(format!("tool '{id}' not found"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("Rejected admin request: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::DuplicateId(_) => ApiError::Conflict(err.to_string()),
            CatalogError::EmptyId | CatalogError::InvalidSlug(_) | CatalogError::EmptyName(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::EmptyInput => ApiError::BadRequest(err.to_string()),
            // Inactive tools are hidden from the public surface
            ProcessError::Inactive(id) => ApiError::tool_not_found(&id),
        }
    }
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AdSenseError> for ApiError {
    fn from(err: AdSenseError) -> Self {
        match err {
            AdSenseError::UnitNotFound(_) => ApiError::NotFound(err.to_string()),
            AdSenseError::InvalidPublisherId(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_errors_map_to_status() {
        assert_eq!(
            ApiError::from(CatalogError::DuplicateId("a".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(CatalogError::NotFound("a".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CatalogError::InvalidSlug("A b".into())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_process_errors_map_to_status() {
        assert_eq!(ApiError::from(ProcessError::EmptyInput).status(), StatusCode::BAD_REQUEST);
        let inactive = ApiError::from(ProcessError::Inactive("logo-maker".into()));
        assert_eq!(inactive.status(), StatusCode::NOT_FOUND);
        assert_eq!(inactive.to_string(), "tool 'logo-maker' not found");
    }

    #[test]
    fn test_settings_and_adsense_errors() {
        assert_eq!(ApiError::from(SettingsError::EmptySiteName).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(AdSenseError::UnitNotFound("x".into())).status(),
            StatusCode::NOT_FOUND
        );
    }
}
