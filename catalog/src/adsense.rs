//! AdSense unit management (units and publisher id only; no ad script)

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AdSenseError;
use crate::model::AdPosition;

const PUBLISHER_PREFIX: &str = "ca-pub-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdUnit {
    pub id: String,
    pub name: String,
    pub size: String,
    pub slot: String,
    pub position: AdPosition,
    pub active: bool,
    pub impressions: u64,
    pub clicks: u64,
    pub revenue: f64,
    /// Click-through rate in percent
    pub ctr: f64,
}

/// Editable fields of an ad unit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdUnitPatch {
    pub name: Option<String>,
    pub size: Option<String>,
    pub slot: Option<String>,
    pub position: Option<AdPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdTotals {
    pub revenue: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub active_units: usize,
}

/// Publisher id plus ad units for one admin session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdSenseConfig {
    pub publisher_id: String,
    pub units: Vec<AdUnit>,
}

impl AdSenseConfig {
    pub fn new(publisher_id: &str, units: Vec<AdUnit>) -> Self {
        Self {
            publisher_id: publisher_id.to_string(),
            units,
        }
    }

    pub fn unit(&self, id: &str) -> Option<&AdUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Flip a unit's active flag, returning the new state
    pub fn toggle_unit(&mut self, id: &str) -> Result<bool, AdSenseError> {
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AdSenseError::UnitNotFound(id.to_string()))?;
        unit.active = !unit.active;
        info!("Ad unit {id} active={}", unit.active);
        Ok(unit.active)
    }

    pub fn update_unit(&mut self, id: &str, patch: AdUnitPatch) -> Result<AdUnit, AdSenseError> {
        let unit = self
            .units
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AdSenseError::UnitNotFound(id.to_string()))?;
        if let Some(name) = patch.name {
            unit.name = name;
        }
        if let Some(size) = patch.size {
            unit.size = size;
        }
        if let Some(slot) = patch.slot {
            unit.slot = slot;
        }
        if let Some(position) = patch.position {
            unit.position = position;
        }
        Ok(unit.clone())
    }

    pub fn set_publisher_id(&mut self, publisher_id: &str) -> Result<(), AdSenseError> {
        let publisher_id = publisher_id.trim();
        if !publisher_id.starts_with(PUBLISHER_PREFIX) || publisher_id.len() == PUBLISHER_PREFIX.len() {
            return Err(AdSenseError::InvalidPublisherId(publisher_id.to_string()));
        }
        self.publisher_id = publisher_id.to_string();
        Ok(())
    }

    pub fn totals(&self) -> AdTotals {
        let revenue = self.units.iter().map(|u| u.revenue).sum();
        let impressions: u64 = self.units.iter().map(|u| u.impressions).sum();
        let clicks: u64 = self.units.iter().map(|u| u.clicks).sum();
        let ctr = if impressions > 0 {
            clicks as f64 / impressions as f64 * 100.0
        } else {
            0.0
        };
        AdTotals {
            revenue,
            impressions,
            clicks,
            ctr,
            active_units: self.units.iter().filter(|u| u.active).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, active: bool, impressions: u64, clicks: u64, revenue: f64) -> AdUnit {
        AdUnit {
            id: id.to_string(),
            name: format!("Unit {id}"),
            size: "728x90".into(),
            slot: "1234567890".into(),
            position: AdPosition::Top,
            active,
            impressions,
            clicks,
            revenue,
            ctr: 0.0,
        }
    }

    fn config() -> AdSenseConfig {
        AdSenseConfig::new(
            "ca-pub-1",
            vec![unit("u1", true, 1000, 20, 10.5), unit("u2", false, 1000, 30, 4.5)],
        )
    }

    #[test]
    fn test_toggle_unit() {
        let mut cfg = config();
        assert_eq!(cfg.toggle_unit("u2"), Ok(true));
        assert!(cfg.unit("u2").unwrap().active);
        assert_eq!(
            cfg.toggle_unit("missing"),
            Err(AdSenseError::UnitNotFound("missing".into()))
        );
    }

    #[test]
    fn test_update_unit_only_touches_given_fields() {
        let mut cfg = config();
        let patch = AdUnitPatch {
            name: Some("Sidebar".into()),
            position: Some(AdPosition::Sidebar),
            ..Default::default()
        };
        let updated = cfg.update_unit("u1", patch).unwrap();
        assert_eq!(updated.name, "Sidebar");
        assert_eq!(updated.position, AdPosition::Sidebar);
        assert_eq!(updated.size, "728x90");
        assert_eq!(updated.impressions, 1000);
    }

    #[test]
    fn test_publisher_id_validation() {
        let mut cfg = config();
        assert!(cfg.set_publisher_id("ca-pub-999").is_ok());
        assert_eq!(cfg.publisher_id, "ca-pub-999");
        assert!(cfg.set_publisher_id("pub-999").is_err());
        assert!(cfg.set_publisher_id("ca-pub-").is_err());
        assert_eq!(cfg.publisher_id, "ca-pub-999");
    }

    #[test]
    fn test_totals() {
        let totals = config().totals();
        assert!((totals.revenue - 15.0).abs() < 1e-9);
        assert_eq!(totals.impressions, 2000);
        assert_eq!(totals.clicks, 50);
        assert!((totals.ctr - 2.5).abs() < 1e-9);
        assert_eq!(totals.active_units, 1);
    }
}
