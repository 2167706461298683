//! Admin API
//!
//! Every route except login resolves the caller's session from the
//! `x-admin-session` header (or `Authorization: Bearer <id>`) and works on
//! that session's private copy of the catalog.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use aitools_catalog::adsense::{AdSenseConfig, AdTotals, AdUnit, AdUnitPatch};
use aitools_catalog::analytics::{dashboard_summary, AnalyticsReport, DashboardSummary, TimeRange};
use aitools_catalog::settings::{SiteSettings, SiteSettingsPatch};
use aitools_catalog::{
    paginate, CategoryFilter, Page, PageRequest, SeedData, StatusFilter, ToolDraft, ToolPatch,
    ToolQuery, ToolRecord,
};

use crate::error::ApiError;
use crate::session::{AdminSession, SessionInfo};
use crate::state::{AppState, SiteState};

pub const SESSION_HEADER: &str = "x-admin-session";

const POPULAR_TOOLS: usize = 5;

/// Session id from the custom header, falling back to a bearer token
pub fn extract_session_id(headers: &HeaderMap) -> Option<String> {
    if let Some(id) = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok()) {
        if !id.trim().is_empty() {
            return Some(id.trim().to_string());
        }
    }

    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Run `f` against the caller's session under the write lock
async fn with_session<T>(
    state: &AppState,
    headers: &HeaderMap,
    f: impl FnOnce(&mut AdminSession, &SeedData) -> Result<T, ApiError>,
) -> Result<T, ApiError> {
    let id = extract_session_id(headers).ok_or(ApiError::Unauthorized)?;
    let mut site = state.site.write().await;
    let SiteState { seed, sessions, .. } = &mut *site;
    let session = sessions.get_mut(&id, Utc::now()).ok_or(ApiError::Unauthorized)?;
    f(session, seed)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// --- Request / response types ---

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Deserialize, Default)]
pub struct AdminToolParams {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    page: Option<usize>,
    #[serde(default)]
    per_page: Option<usize>,
}

impl AdminToolParams {
    fn to_query(&self) -> ToolQuery {
        let mut q = ToolQuery::text(self.q.as_deref().unwrap_or_default())
            .with_category(CategoryFilter::parse(self.category.as_deref().unwrap_or_default()))
            .with_status(StatusFilter::parse(self.status.as_deref().unwrap_or_default()));
        if let Some(limit) = self.limit {
            q = q.with_limit(limit);
        }
        q
    }
}

#[derive(Serialize)]
pub struct AdminToolPage {
    #[serde(flatten)]
    page: Page,
    selected: Vec<String>,
}

#[derive(Serialize)]
pub struct SelectionResponse {
    ids: Vec<String>,
    count: usize,
}

impl SelectionResponse {
    fn of(session: &AdminSession) -> Self {
        Self {
            ids: session.selection.ids(),
            count: session.selection.len(),
        }
    }
}

#[derive(Deserialize)]
pub struct ToggleSelectionRequest {
    id: String,
}

#[derive(Deserialize, Default)]
pub struct SelectAllRequest {
    #[serde(default)]
    ids: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct BulkDeleteResponse {
    removed: Vec<String>,
    remaining: usize,
}

#[derive(Deserialize, Default)]
pub struct AnalyticsParams {
    #[serde(default)]
    range: Option<String>,
}

#[derive(Serialize)]
pub struct AdSenseResponse {
    #[serde(flatten)]
    config: AdSenseConfig,
    totals: AdTotals,
}

impl AdSenseResponse {
    fn of(session: &AdminSession) -> Self {
        Self {
            config: session.adsense.clone(),
            totals: session.adsense.totals(),
        }
    }
}

#[derive(Deserialize)]
pub struct PublisherRequest {
    publisher_id: String,
}

#[derive(Serialize)]
pub struct UnitToggleResponse {
    id: String,
    active: bool,
}

// --- Session ---

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionInfo>, ApiError> {
    if req.password != state.config.admin.password {
        warn!("Admin login rejected");
        return Err(ApiError::Unauthorized);
    }
    let mut site = state.site.write().await;
    let session = AdminSession::new(&site.seed, site.default_settings.clone(), Utc::now());
    let info = site.sessions.insert(session);
    info!("Admin session {} opened", info.session_id);
    Ok(Json(info))
}

/// POST /api/admin/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode, ApiError> {
    let id = extract_session_id(&headers).ok_or(ApiError::Unauthorized)?;
    let removed = state.site.write().await.sessions.remove(&id);
    match removed {
        Some(_) => {
            info!("Admin session {id} closed");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(ApiError::Unauthorized),
    }
}

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardSummary>, ApiError> {
    let recent = state.config.site.recent_tools_count;
    with_session(&state, &headers, |session, seed| {
        Ok(Json(dashboard_summary(&session.catalog, &seed.analytics, POPULAR_TOOLS, recent)))
    })
    .await
}

// --- Tools ---

/// GET /api/admin/tools
pub async fn list_tools(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AdminToolParams>,
) -> Result<Json<AdminToolPage>, ApiError> {
    let request = PageRequest::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or_else(|| state.per_page()),
    );
    with_session(&state, &headers, |session, _| {
        Ok(Json(AdminToolPage {
            page: paginate(session.catalog.as_slice(), &params.to_query(), request),
            selected: session.selection.ids(),
        }))
    })
    .await
}

/// POST /api/admin/tools
pub async fn create_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<ToolDraft>,
) -> Result<(StatusCode, Json<ToolRecord>), ApiError> {
    with_session(&state, &headers, |session, _| {
        let record = session.create_tool(draft, today())?;
        Ok((StatusCode::CREATED, Json(record)))
    })
    .await
}

/// GET /api/admin/tools/:id
pub async fn get_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ToolRecord>, ApiError> {
    with_session(&state, &headers, |session, _| Ok(Json(session.tool(&id)?.clone()))).await
}

/// PUT /api/admin/tools/:id
pub async fn update_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<ToolPatch>,
) -> Result<Json<ToolRecord>, ApiError> {
    with_session(&state, &headers, |session, _| {
        Ok(Json(session.update_tool(&id, patch, today())?))
    })
    .await
}

/// DELETE /api/admin/tools/:id
pub async fn delete_tool(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    with_session(&state, &headers, |session, _| {
        session.delete_tool(&id)?;
        Ok(StatusCode::NO_CONTENT)
    })
    .await
}

/// POST /api/admin/tools/:id/toggle-status
pub async fn toggle_tool_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ToolRecord>, ApiError> {
    with_session(&state, &headers, |session, _| Ok(Json(session.toggle_status(&id)?))).await
}

// --- Selection ---

/// GET /api/admin/selection
pub async fn get_selection(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SelectionResponse>, ApiError> {
    with_session(&state, &headers, |session, _| Ok(Json(SelectionResponse::of(session)))).await
}

/// DELETE /api/admin/selection
pub async fn clear_selection(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SelectionResponse>, ApiError> {
    with_session(&state, &headers, |session, _| {
        session.clear_selection();
        Ok(Json(SelectionResponse::of(session)))
    })
    .await
}

/// POST /api/admin/selection/toggle
pub async fn toggle_selection(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ToggleSelectionRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    with_session(&state, &headers, |session, _| {
        session.toggle_selection(&req.id);
        Ok(Json(SelectionResponse::of(session)))
    })
    .await
}

/// POST /api/admin/selection/all
pub async fn select_all(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<SelectAllRequest>>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let ids = body.and_then(|Json(req)| req.ids);
    with_session(&state, &headers, |session, _| {
        session.select_all(ids);
        Ok(Json(SelectionResponse::of(session)))
    })
    .await
}

/// POST /api/admin/selection/delete
pub async fn delete_selected(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    with_session(&state, &headers, |session, _| {
        let removed = session.delete_selected();
        Ok(Json(BulkDeleteResponse {
            removed,
            remaining: session.catalog.len(),
        }))
    })
    .await
}

// --- Analytics ---

/// GET /api/admin/analytics?range=
pub async fn analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<AnalyticsParams>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let range = match params.range.as_deref() {
        None | Some("") => TimeRange::default(),
        Some(value) => TimeRange::parse(value)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown time range '{value}'")))?,
    };
    with_session(&state, &headers, |_, seed| Ok(Json(seed.analytics.report(range)))).await
}

// --- AdSense ---

/// GET /api/admin/adsense
pub async fn get_adsense(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdSenseResponse>, ApiError> {
    with_session(&state, &headers, |session, _| Ok(Json(AdSenseResponse::of(session)))).await
}

/// PUT /api/admin/adsense/publisher
pub async fn set_publisher(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PublisherRequest>,
) -> Result<Json<AdSenseResponse>, ApiError> {
    with_session(&state, &headers, |session, _| {
        session.adsense.set_publisher_id(&req.publisher_id)?;
        Ok(Json(AdSenseResponse::of(session)))
    })
    .await
}

/// PUT /api/admin/adsense/units/:id
pub async fn update_ad_unit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<AdUnitPatch>,
) -> Result<Json<AdUnit>, ApiError> {
    with_session(&state, &headers, |session, _| {
        Ok(Json(session.adsense.update_unit(&id, patch)?))
    })
    .await
}

/// POST /api/admin/adsense/units/:id/toggle
pub async fn toggle_ad_unit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<UnitToggleResponse>, ApiError> {
    with_session(&state, &headers, |session, _| {
        let active = session.adsense.toggle_unit(&id)?;
        Ok(Json(UnitToggleResponse { id: id.clone(), active }))
    })
    .await
}

// --- Settings ---

/// GET /api/admin/settings
pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SiteSettings>, ApiError> {
    with_session(&state, &headers, |session, _| Ok(Json(session.settings.clone()))).await
}

/// PUT /api/admin/settings
pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<SiteSettingsPatch>,
) -> Result<Json<SiteSettings>, ApiError> {
    with_session(&state, &headers, |session, _| {
        Ok(Json(session.update_settings(patch)?.clone()))
    })
    .await
}
