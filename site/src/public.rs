//! Public directory API: browsing, search, tool pages and processing
//!
//! Only active tools are visible here. Inactive and unknown ids are both 404.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use aitools_catalog::analytics::most_used;
use aitools_catalog::processing::{ProcessInput, ProcessOutput};
use aitools_catalog::query::ALL_SENTINEL;
use aitools_catalog::{
    paginate, query, Category, CategoryFilter, Page, PageRequest, StatusFilter, ToolQuery,
    ToolRecord, ToolStatus,
};

use crate::error::ApiError;
use crate::state::AppState;

const RELATED_TOOLS: usize = 3;

#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

impl BrowseParams {
    fn page_request(&self, default_per_page: usize) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.per_page.unwrap_or(default_per_page))
    }

    fn text(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    tools: usize,
    active_tools: usize,
    admin_sessions: usize,
    uptime_seconds: u64,
}

#[derive(Serialize)]
pub struct CategoryResponse {
    slug: &'static str,
    name: &'static str,
    tool_count: usize,
}

#[derive(Serialize)]
pub struct CategoryPageResponse {
    category: CategoryResponse,
    #[serde(flatten)]
    page: Page,
}

#[derive(Serialize)]
pub struct ToolDetailResponse {
    #[serde(flatten)]
    tool: ToolRecord,
    related: Vec<ToolRecord>,
}

fn active_query(text: &str) -> ToolQuery {
    ToolQuery::text(text).with_status(StatusFilter::Only(ToolStatus::Active))
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let site = state.site.read().await;
    let catalog = &site.seed.catalog;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        tools: catalog.len(),
        active_tools: catalog.iter().filter(|t| t.is_active()).count(),
        admin_sessions: site.sessions.len(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryResponse>> {
    let site = state.site.read().await;
    let catalog = site.seed.catalog.as_slice();
    let response = Category::ALL
        .into_iter()
        .map(|category| CategoryResponse {
            slug: category.as_str(),
            name: category.display_name(),
            tool_count: query(
                catalog,
                &active_query("").with_category(CategoryFilter::Only(category)),
            )
            .total,
        })
        .collect();
    Json(response)
}

/// GET /api/categories/:category; `all` lists every active tool
pub async fn category_tools(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<CategoryPageResponse>, ApiError> {
    let category = match CategoryFilter::parse(&slug) {
        CategoryFilter::Unknown(_) => {
            return Err(ApiError::NotFound(format!("category '{slug}' not found")))
        }
        filter => filter,
    };

    let site = state.site.read().await;
    let catalog = site.seed.catalog.as_slice();
    let q = active_query(params.text()).with_category(category.clone());
    let page = paginate(catalog, &q, params.page_request(state.per_page()));
    let tool_count = query(catalog, &active_query("").with_category(category.clone())).total;

    let (slug, name) = match category {
        CategoryFilter::Only(c) => (c.as_str(), c.display_name()),
        _ => (ALL_SENTINEL, "All Tools"),
    };
    Ok(Json(CategoryPageResponse {
        category: CategoryResponse {
            slug,
            name,
            tool_count,
        },
        page,
    }))
}

/// GET /api/tools
pub async fn list_tools(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Json<Page> {
    let category = CategoryFilter::parse(params.category.as_deref().unwrap_or_default());
    let q = active_query(params.text()).with_category(category);
    let site = state.site.read().await;
    Json(paginate(
        site.seed.catalog.as_slice(),
        &q,
        params.page_request(state.per_page()),
    ))
}

/// GET /api/tools/popular: most used active tools, optionally per category
pub async fn popular_tools(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Json<Vec<ToolRecord>> {
    let category = CategoryFilter::parse(params.category.as_deref().unwrap_or_default());
    let site = state.site.read().await;
    let matches = query(site.seed.catalog.as_slice(), &active_query("").with_category(category));
    Json(
        most_used(&matches.items, state.featured_count())
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// GET /api/search: a blank query yields no results
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> Json<Page> {
    let request = params.page_request(state.per_page());
    if params.text().trim().is_empty() {
        return Json(paginate(&[], &ToolQuery::default(), request));
    }
    let site = state.site.read().await;
    Json(paginate(
        site.seed.catalog.as_slice(),
        &active_query(params.text()),
        request,
    ))
}

/// GET /api/tools/:id
pub async fn get_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ToolDetailResponse>, ApiError> {
    let site = state.site.read().await;
    let tool = site
        .seed
        .catalog
        .get(&id)
        .filter(|t| t.is_active())
        .cloned()
        .ok_or_else(|| ApiError::tool_not_found(&id))?;

    let related = site
        .seed
        .catalog
        .iter()
        .filter(|t| t.id != tool.id && t.category == tool.category && t.is_active())
        .take(RELATED_TOOLS)
        .cloned()
        .collect();

    Ok(Json(ToolDetailResponse { tool, related }))
}

/// POST /api/tools/:id/process
pub async fn process_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProcessInput>,
) -> Result<Json<ProcessOutput>, ApiError> {
    // Clone out so the read lock is not held across the processing delay
    let tool = {
        let site = state.site.read().await;
        site.seed
            .catalog
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::tool_not_found(&id))?
    };

    let output = state.processor.process(&tool, input).await?;
    Ok(Json(output))
}
