//! Admin sessions
//!
//! Each session owns a working copy of the catalog, its selection, the ad
//! units and the site settings. Mutations never reach the public catalog or
//! another session. The session keeps the selection a subset of its catalog:
//! unknown ids are ignored on select and deleted ids are dropped.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use aitools_catalog::adsense::AdSenseConfig;
use aitools_catalog::settings::{SiteSettings, SiteSettingsPatch};
use aitools_catalog::{
    bulk_remove, toggle_status, Catalog, CatalogError, SeedData, SelectionSet, SettingsError,
    ToolDraft, ToolPatch, ToolRecord,
};

/// One administrator's working state
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub id: String,
    pub catalog: Catalog,
    pub selection: SelectionSet,
    pub adsense: AdSenseConfig,
    pub settings: SiteSettings,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn new(seed: &SeedData, settings: SiteSettings, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            catalog: seed.catalog.clone(),
            selection: SelectionSet::new(),
            adsense: seed.adsense.clone(),
            settings,
            created_at: now,
            last_seen: now,
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id.clone(),
            created_at: self.created_at,
        }
    }

    pub fn tool(&self, id: &str) -> Result<&ToolRecord, CatalogError> {
        self.catalog
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn create_tool(&mut self, draft: ToolDraft, today: NaiveDate) -> Result<ToolRecord, CatalogError> {
        let (catalog, record) = self.catalog.create(draft, today)?;
        self.catalog = catalog;
        info!("Session {} created tool {}", self.id, record.id);
        Ok(record)
    }

    pub fn update_tool(
        &mut self,
        id: &str,
        patch: ToolPatch,
        today: NaiveDate,
    ) -> Result<ToolRecord, CatalogError> {
        let (catalog, record) = self.catalog.update(id, patch, today)?;
        self.catalog = catalog;
        Ok(record)
    }

    pub fn delete_tool(&mut self, id: &str) -> Result<(), CatalogError> {
        if !self.catalog.contains(id) {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        self.catalog = self.catalog.without(&[id]);
        self.selection.remove(id);
        info!("Session {} deleted tool {id}", self.id);
        Ok(())
    }

    /// Flip a tool's status and return the updated record
    pub fn toggle_status(&mut self, id: &str) -> Result<ToolRecord, CatalogError> {
        if !self.catalog.contains(id) {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        self.catalog = toggle_status(&self.catalog, id);
        self.tool(id).cloned()
    }

    /// Toggle one id in the selection. Returns whether it is now selected;
    /// ids outside the catalog are ignored.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        if self.catalog.contains(id) {
            self.selection.toggle(id);
        }
        self.selection.contains(id)
    }

    /// Select the given ids, or every tool when `ids` is `None`
    pub fn select_all(&mut self, ids: Option<Vec<String>>) {
        match ids {
            Some(ids) => {
                let present: Vec<String> = ids
                    .into_iter()
                    .filter(|id| self.catalog.contains(id))
                    .collect();
                self.selection.select_all(present);
            }
            None => self.selection.select_all(self.catalog.ids()),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Remove every selected tool; returns the removed ids
    pub fn delete_selected(&mut self) -> Vec<String> {
        let removed = self.selection.ids();
        self.catalog = bulk_remove(&self.catalog, &mut self.selection);
        if !removed.is_empty() {
            info!("Session {} bulk-deleted {} tools", self.id, removed.len());
        }
        removed
    }

    /// Merge a partial update into this session's settings
    pub fn update_settings(&mut self, patch: SiteSettingsPatch) -> Result<&SiteSettings, SettingsError> {
        self.settings = self.settings.patched(patch)?;
        Ok(&self.settings)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = now;
    }

    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_seen > ttl
    }
}

/// All live admin sessions, keyed by session id
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, AdminSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: AdminSession) -> SessionInfo {
        let info = session.info();
        self.sessions.insert(session.id.clone(), session);
        info
    }

    /// Look up a session and mark it as used
    pub fn get_mut(&mut self, id: &str, now: DateTime<Utc>) -> Option<&mut AdminSession> {
        let session = self.sessions.get_mut(id)?;
        session.touch(now);
        Some(session)
    }

    pub fn remove(&mut self, id: &str) -> Option<AdminSession> {
        self.sessions.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than `ttl`; returns how many were dropped
    pub fn sweep_expired(&mut self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|id, session| {
            let keep = !session.is_expired(now, ttl);
            if !keep {
                debug!("Expiring admin session {id}");
            }
            keep
        });
        before - self.sessions.len()
    }
}
