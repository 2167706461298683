//! Error types for catalog loading and admin mutations
//!
//! Queries, selection changes and status toggles never fail; only loading a
//! catalog and the admin create/update paths carry validation errors.

use thiserror::Error;

/// Catalog validation and CRUD errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("tool id must not be empty")]
    EmptyId,

    #[error("invalid tool id '{0}': use lowercase letters, digits and single hyphens")]
    InvalidSlug(String),

    #[error("duplicate tool id '{0}'")]
    DuplicateId(String),

    #[error("tool name must not be empty (id: '{0}')")]
    EmptyName(String),

    #[error("tool '{0}' not found")]
    NotFound(String),
}

/// Simulated processing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("no input provided")]
    EmptyInput,

    #[error("tool '{0}' is not active")]
    Inactive(String),
}

/// Site settings validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("site name must not be empty")]
    EmptySiteName,

    #[error("tools per page must be between 1 and 100, got {0}")]
    ToolsPerPage(u32),

    #[error("featured tools count must be between 1 and 50, got {0}")]
    FeaturedCount(u32),

    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),
}

/// AdSense unit management errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdSenseError {
    #[error("ad unit '{0}' not found")]
    UnitNotFound(String),

    #[error("invalid publisher id '{0}': must start with 'ca-pub-'")]
    InvalidPublisherId(String),
}

/// Errors loading the embedded seed data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to parse seed {name}: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid seed catalog: {0}")]
    Invalid(#[from] CatalogError),
}
