//! AI tools directory catalog
//!
//! Tool records and the logic around them:
//! - Query engine (text/category/status filters, limit, pagination)
//! - Selection state for bulk admin actions
//! - Status toggle and admin CRUD
//! - Simulated tool processing
//! - Analytics, AdSense units and site settings backing the admin pages

pub mod adsense;
pub mod analytics;
pub mod error;
pub mod model;
pub mod processing;
pub mod query;
pub mod seed;
pub mod selection;
pub mod settings;
pub mod store;

pub use error::{AdSenseError, CatalogError, ProcessError, SeedError, SettingsError};
pub use model::{AdPosition, Category, InputKind, OutputKind, ToolRecord, ToolStatus};
pub use query::{paginate, query, CategoryFilter, Page, PageRequest, QueryResult, StatusFilter, ToolQuery};
pub use seed::SeedData;
pub use selection::{bulk_remove, SelectionSet};
pub use store::{generate_slug, toggle_status, Catalog, ToolDraft, ToolPatch};
