//! Shared server state and the idle-session sweeper

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use aitools_catalog::processing::ToolProcessor;
use aitools_catalog::settings::SiteSettings;
use aitools_catalog::SeedData;

use crate::config::SiteConfig;
use crate::session::SessionStore;

/// Mutable site state behind the shared lock
#[derive(Debug)]
pub struct SiteState {
    /// Public catalog, analytics and ad units; never mutated after start
    pub seed: SeedData,
    pub sessions: SessionStore,
    /// Settings every new admin session starts from
    pub default_settings: SiteSettings,
}

impl SiteState {
    pub fn new(seed: SeedData, default_settings: SiteSettings) -> Self {
        Self {
            seed,
            sessions: SessionStore::new(),
            default_settings,
        }
    }
}

pub type SharedState = Arc<RwLock<SiteState>>;

/// State handed to every axum handler
#[derive(Clone)]
pub struct AppState {
    pub site: SharedState,
    pub processor: Arc<ToolProcessor>,
    pub config: Arc<SiteConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(seed: SeedData, config: SiteConfig) -> Self {
        let default_settings = SiteSettings {
            tools_per_page: config.site.tools_per_page,
            featured_tools_count: config.site.featured_tools_count,
            ..SiteSettings::default()
        };
        let processor = ToolProcessor::new(Duration::from_millis(config.processing.delay_ms));
        Self {
            site: Arc::new(RwLock::new(SiteState::new(seed, default_settings))),
            processor: Arc::new(processor),
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    pub fn per_page(&self) -> usize {
        self.config.site.tools_per_page.max(1) as usize
    }

    pub fn featured_count(&self) -> usize {
        self.config.site.featured_tools_count as usize
    }
}

/// Evict idle admin sessions until cancelled
pub async fn run_session_sweeper(
    state: SharedState,
    ttl: chrono::Duration,
    interval: Duration,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Session sweeper shutting down");
                break;
            }
            _ = tokio::time::sleep(interval) => {
                let swept = state
                    .write()
                    .await
                    .sessions
                    .sweep_expired(chrono::Utc::now(), ttl);
                if swept > 0 {
                    info!("Expired {swept} idle admin sessions");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AdminSession;

    #[test]
    fn test_app_state_applies_site_config() {
        let mut config = SiteConfig::default();
        config.site.tools_per_page = 20;
        config.site.featured_tools_count = 4;
        config.processing.delay_ms = 5;
        let state = AppState::new(SeedData::load().unwrap(), config);

        assert_eq!(state.per_page(), 20);
        assert_eq!(state.featured_count(), 4);
        assert_eq!(state.processor.delay(), Duration::from_millis(5));
        let site = state.site.try_read().unwrap();
        assert_eq!(site.default_settings.tools_per_page, 20);
        assert_eq!(site.default_settings.featured_tools_count, 4);
    }

    #[tokio::test]
    async fn test_sweeper_expires_and_stops() {
        let state = AppState::new(SeedData::load().unwrap(), SiteConfig::default());
        {
            let mut site = state.site.write().await;
            let stale = chrono::Utc::now() - chrono::Duration::hours(2);
            let session = AdminSession::new(&site.seed, SiteSettings::default(), stale);
            site.sessions.insert(session);
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_session_sweeper(
            state.site.clone(),
            chrono::Duration::minutes(60),
            Duration::from_millis(10),
            cancel.clone(),
        ));

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(state.site.read().await.sessions.is_empty());

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper should stop on cancel")
            .unwrap();
    }
}
