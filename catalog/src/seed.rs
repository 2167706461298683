//! Embedded seed data: the catalog, analytics series and ad units
//!
//! Parsed and validated once at startup. A malformed seed is a startup
//! error, not a runtime one.

use tracing::info;

use crate::adsense::AdSenseConfig;
use crate::analytics::AnalyticsData;
use crate::error::SeedError;
use crate::model::ToolRecord;
use crate::store::Catalog;

const TOOLS_JSON: &str = include_str!("../data/tools.json");
const ANALYTICS_JSON: &str = include_str!("../data/analytics.json");
const ADSENSE_JSON: &str = include_str!("../data/adsense.json");

/// Everything a fresh process or admin session starts from
#[derive(Debug, Clone)]
pub struct SeedData {
    pub catalog: Catalog,
    pub analytics: AnalyticsData,
    pub adsense: AdSenseConfig,
}

impl SeedData {
    pub fn load() -> Result<Self, SeedError> {
        let data = Self {
            catalog: seed_catalog()?,
            analytics: parse("analytics", ANALYTICS_JSON)?,
            adsense: parse("adsense", ADSENSE_JSON)?,
        };
        info!(
            "Seed loaded: {} tools, {} usage points, {} ad units",
            data.catalog.len(),
            data.analytics.daily_usage.len(),
            data.adsense.units.len()
        );
        Ok(data)
    }
}

pub fn seed_catalog() -> Result<Catalog, SeedError> {
    let records: Vec<ToolRecord> = parse("tools", TOOLS_JSON)?;
    Ok(Catalog::load(records)?)
}

fn parse<T: serde::de::DeserializeOwned>(name: &'static str, json: &str) -> Result<T, SeedError> {
    serde_json::from_str(json).map_err(|source| SeedError::Parse { name, source })
}
