//! Query Engine — filtering, limiting and paging over a catalog
//!
//! Pure functions: the same catalog and query always produce the same
//! result. Output keeps catalog order; there is no relevance ranking.

use serde::{Deserialize, Serialize};

use crate::model::{Category, ToolRecord, ToolStatus};

/// Sentinel accepted by both filters to mean "no filtering"
pub const ALL_SENTINEL: &str = "all";

/// Category filter parsed from user input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
    /// A value outside the enumeration; matches nothing
    Unknown(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_SENTINEL {
            return CategoryFilter::All;
        }
        match Category::from_slug(value) {
            Some(category) => CategoryFilter::Only(category),
            None => CategoryFilter::Unknown(value.to_string()),
        }
    }

    fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
            CategoryFilter::Unknown(_) => false,
        }
    }
}

/// Status filter parsed from user input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ToolStatus),
    Unknown(String),
}

impl StatusFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_SENTINEL {
            return StatusFilter::All;
        }
        match ToolStatus::from_str_opt(value) {
            Some(status) => StatusFilter::Only(status),
            None => StatusFilter::Unknown(value.to_string()),
        }
    }

    fn matches(&self, status: ToolStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
            StatusFilter::Unknown(_) => false,
        }
    }
}

/// Filter criteria; all supplied filters are ANDed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolQuery {
    pub text: String,
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub limit: Option<usize>,
}

impl ToolQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Does a single record satisfy every filter?
    pub fn matches(&self, tool: &ToolRecord) -> bool {
        self.category.matches(tool.category)
            && self.status.matches(tool.status)
            && matches_text(tool, &normalize(&self.text))
    }
}

/// Matches plus the pre-limit match count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub items: Vec<ToolRecord>,
    /// Number of matches before `limit` was applied
    pub total: usize,
}

/// Run a query against a catalog
pub fn query(catalog: &[ToolRecord], q: &ToolQuery) -> QueryResult {
    let needle = normalize(&q.text);
    let matched: Vec<&ToolRecord> = catalog
        .iter()
        .filter(|t| q.category.matches(t.category))
        .filter(|t| q.status.matches(t.status))
        .filter(|t| matches_text(t, &needle))
        .collect();

    let total = matched.len();
    let take = q.limit.unwrap_or(total);
    QueryResult {
        items: matched.into_iter().take(take).cloned().collect(),
        total,
    }
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<ToolRecord>,
    /// Full match count, before `limit`
    pub total: usize,
    /// Matches left to page through once `limit` is applied
    pub available: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Page {
    /// Index of the first item on this page, 1-based ("showing X to Y of Z")
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }
}

/// Run a query and return one page of the matches
///
/// A `limit` on the query caps the match set before paging; `total` still
/// reports every match while `available` and the page count follow the cap.
pub fn paginate(catalog: &[ToolRecord], q: &ToolQuery, request: PageRequest) -> Page {
    let request = PageRequest::new(request.page, request.per_page);
    let result = query(catalog, q);
    let available = result.items.len();
    let total_pages = available.div_ceil(request.per_page);
    let start = (request.page - 1).saturating_mul(request.per_page);

    let items: Vec<ToolRecord> = result
        .items
        .into_iter()
        .skip(start)
        .take(request.per_page)
        .collect();

    Page {
        items,
        total: result.total,
        available,
        page: request.page,
        per_page: request.per_page,
        total_pages,
        has_previous: request.page > 1 && total_pages > 0,
        has_next: request.page < total_pages,
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn matches_text(tool: &ToolRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    tool.name.to_lowercase().contains(needle)
        || tool.description.to_lowercase().contains(needle)
        || tool.category.as_str().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tool(id: &str, name: &str, description: &str, category: Category, status: ToolStatus) -> ToolRecord {
        let date = NaiveDate::from_ymd_opt(2023, 10, 10).unwrap();
        ToolRecord::new(id, name, description, category, status, date)
    }

    fn two_tools() -> Vec<ToolRecord> {
        vec![
            tool("a", "Text Summarizer", "Summarize long articles", Category::Writing, ToolStatus::Active),
            tool("b", "Logo Maker", "Create professional logos", Category::Design, ToolStatus::Inactive),
        ]
    }

    fn ids(result: &[ToolRecord]) -> Vec<&str> {
        result.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_text_query_scenario() {
        let catalog = two_tools();
        let result = query(&catalog, &ToolQuery::text("logo"));
        assert_eq!(ids(&result.items), vec!["b"]);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_category_query_scenario() {
        let catalog = two_tools();
        let q = ToolQuery::default().with_category(CategoryFilter::parse("writing"));
        assert_eq!(ids(&query(&catalog, &q).items), vec!["a"]);
    }

    #[test]
    fn test_status_query_scenario() {
        let catalog = two_tools();
        let q = ToolQuery::default().with_status(StatusFilter::parse("inactive"));
        assert_eq!(ids(&query(&catalog, &q).items), vec!["b"]);
    }

    #[test]
    fn test_text_is_trimmed_and_case_insensitive() {
        let catalog = two_tools();
        assert_eq!(ids(&query(&catalog, &ToolQuery::text("  SUMMAR  ")).items), vec!["a"]);
        assert_eq!(ids(&query(&catalog, &ToolQuery::text("Professional")).items), vec!["b"]);
    }

    #[test]
    fn test_text_matches_category_value() {
        let catalog = two_tools();
        assert_eq!(ids(&query(&catalog, &ToolQuery::text("design")).items), vec!["b"]);
    }

    #[test]
    fn test_empty_and_whitespace_text_match_everything() {
        let catalog = two_tools();
        assert_eq!(query(&catalog, &ToolQuery::text("")).items, catalog);
        assert_eq!(query(&catalog, &ToolQuery::text("   \t")).items, catalog);
    }

    #[test]
    fn test_all_sentinel_equals_no_filter() {
        let catalog = two_tools();
        let all = ToolQuery::default()
            .with_category(CategoryFilter::parse("all"))
            .with_status(StatusFilter::parse("all"));
        assert_eq!(query(&catalog, &all), query(&catalog, &ToolQuery::default()));
    }

    #[test]
    fn test_unknown_filters_match_nothing() {
        let catalog = two_tools();
        let q = ToolQuery::default().with_category(CategoryFilter::parse("astrology"));
        assert_eq!(q.category, CategoryFilter::Unknown("astrology".into()));
        assert!(query(&catalog, &q).items.is_empty());

        let q = ToolQuery::default().with_status(StatusFilter::parse("archived"));
        assert!(query(&catalog, &q).items.is_empty());
    }

    #[test]
    fn test_filters_are_anded() {
        let catalog = two_tools();
        let q = ToolQuery::text("logo").with_category(CategoryFilter::parse("writing"));
        assert!(query(&catalog, &q).items.is_empty());

        let q = ToolQuery::text("logo")
            .with_category(CategoryFilter::parse("design"))
            .with_status(StatusFilter::parse("inactive"));
        assert_eq!(ids(&query(&catalog, &q).items), vec!["b"]);
    }

    #[test]
    fn test_limit_truncates_but_total_counts_all() {
        let catalog = two_tools();
        let result = query(&catalog, &ToolQuery::default().with_limit(1));
        assert_eq!(ids(&result.items), vec!["a"]);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_query_is_idempotent() {
        let catalog = two_tools();
        let q = ToolQuery::text("a").with_status(StatusFilter::parse("active"));
        assert_eq!(query(&catalog, &q), query(&catalog, &q));
    }

    #[test]
    fn test_matches_agrees_with_query() {
        let catalog = two_tools();
        let q = ToolQuery::text("maker");
        let expected: Vec<_> = catalog.iter().filter(|t| q.matches(t)).cloned().collect();
        assert_eq!(query(&catalog, &q).items, expected);
    }

    fn numbered(n: usize) -> Vec<ToolRecord> {
        (1..=n)
            .map(|i| {
                tool(
                    &format!("tool-{i}"),
                    &format!("Tool {i}"),
                    "Numbered tool",
                    Category::Productivity,
                    ToolStatus::Active,
                )
            })
            .collect()
    }

    #[test]
    fn test_paginate_middle_page() {
        let catalog = numbered(25);
        let page = paginate(&catalog, &ToolQuery::default(), PageRequest::new(2, 10));
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].id, "tool-11");
        assert!(page.has_previous);
        assert!(page.has_next);
        assert_eq!(page.first_index(), 11);
        assert_eq!(page.last_index(), 20);
    }

    #[test]
    fn test_paginate_last_and_past_end() {
        let catalog = numbered(25);
        let last = paginate(&catalog, &ToolQuery::default(), PageRequest::new(3, 10));
        assert_eq!(last.items.len(), 5);
        assert!(!last.has_next);

        let past = paginate(&catalog, &ToolQuery::default(), PageRequest::new(9, 10));
        assert!(past.items.is_empty());
        assert_eq!(past.total, 25);
        assert_eq!(past.first_index(), 0);
    }

    #[test]
    fn test_paginate_no_matches() {
        let catalog = numbered(5);
        let page = paginate(&catalog, &ToolQuery::text("nothing here"), PageRequest::new(1, 10));
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }

    #[test]
    fn test_paginate_clamps_zero_values() {
        let catalog = numbered(3);
        let page = paginate(&catalog, &ToolQuery::default(), PageRequest { page: 0, per_page: 0 });
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_paginate_respects_limit() {
        let catalog = numbered(25);
        let page = paginate(&catalog, &ToolQuery::default().with_limit(12), PageRequest::new(2, 10));
        assert_eq!(page.total, 25);
        assert_eq!(page.available, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert!(!page.has_next);
    }

    #[test]
    fn test_paginate_limit_keeps_full_total() {
        let catalog = numbered(25);
        let q = ToolQuery::default().with_limit(5);
        let page = paginate(&catalog, &q, PageRequest::new(1, 10));
        assert_eq!(page.total, query(&catalog, &q).total);
        assert_eq!(page.total, 25);
        assert_eq!(page.available, 5);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_pages, 1);
    }
}
