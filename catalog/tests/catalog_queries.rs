//! Integration tests for the catalog query engine and admin operations
//!
//! These run against the embedded seed catalog to check the filtering,
//! selection and toggle contracts across a realistic data set.

use aitools_catalog::{
    bulk_remove, paginate, query, seed::seed_catalog, toggle_status, Category, CategoryFilter,
    PageRequest, SelectionSet, StatusFilter, ToolQuery, ToolStatus,
};

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

/// Every seeded query text returns exactly the records that satisfy the predicate
#[test]
fn test_text_query_sound_and_complete() {
    let catalog = seed_catalog().unwrap();
    let texts = ["pdf", "IMAGE", " voice ", "ai", "design", "zzz", "convert", "e"];

    for text in texts {
        let result = query(catalog.as_slice(), &ToolQuery::text(text));
        let expected: Vec<_> = catalog
            .iter()
            .filter(|t| {
                contains_ci(&t.name, text)
                    || contains_ci(&t.description, text)
                    || contains_ci(t.category.as_str(), text)
            })
            .cloned()
            .collect();
        assert_eq!(result.items, expected, "query text {text:?}");
        assert_eq!(result.total, expected.len());
    }
}

#[test]
fn test_empty_query_returns_catalog_in_order() {
    let catalog = seed_catalog().unwrap();
    let result = query(catalog.as_slice(), &ToolQuery::default());
    assert_eq!(result.items.as_slice(), catalog.as_slice());
}

#[test]
fn test_category_filter_per_category() {
    let catalog = seed_catalog().unwrap();
    let mut seen = 0;
    for category in Category::ALL {
        let q = ToolQuery::default().with_category(CategoryFilter::Only(category));
        let result = query(catalog.as_slice(), &q);
        assert!(result.items.iter().all(|t| t.category == category));
        seen += result.total;
    }
    assert_eq!(seen, catalog.len());
}

#[test]
fn test_status_and_text_combined() {
    let catalog = seed_catalog().unwrap();
    let q = ToolQuery::text("logo").with_status(StatusFilter::Only(ToolStatus::Active));
    assert!(query(catalog.as_slice(), &q).items.is_empty());

    let q = ToolQuery::text("logo").with_status(StatusFilter::Only(ToolStatus::Inactive));
    let ids: Vec<_> = query(catalog.as_slice(), &q).items.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["logo-maker"]);
}

#[test]
fn test_recent_preview_limit_keeps_total() {
    let catalog = seed_catalog().unwrap();
    let result = query(catalog.as_slice(), &ToolQuery::default().with_limit(5));
    assert_eq!(result.items.len(), 5);
    assert_eq!(result.total, catalog.len());
}

#[test]
fn test_pages_cover_all_matches_once() {
    let catalog = seed_catalog().unwrap();
    let q = ToolQuery::default();
    let first = paginate(catalog.as_slice(), &q, PageRequest::new(1, 7));

    let mut collected = Vec::new();
    for page in 1..=first.total_pages {
        collected.extend(paginate(catalog.as_slice(), &q, PageRequest::new(page, 7)).items);
    }
    assert_eq!(collected.as_slice(), catalog.as_slice());
}

#[test]
fn test_bulk_remove_then_toggle() {
    let catalog = seed_catalog().unwrap();
    let mut selection = SelectionSet::new();
    selection.select_all(["text-summarizer", "logo-maker"]);

    let remaining = bulk_remove(&catalog, &mut selection);
    assert_eq!(remaining.len(), catalog.len() - 2);
    assert!(!remaining.contains("text-summarizer"));
    assert!(!remaining.contains("logo-maker"));
    assert!(selection.is_empty());

    let toggled = toggle_status(&remaining, "pdf-merger");
    assert_eq!(toggled.get("pdf-merger").unwrap().status, ToolStatus::Inactive);
    assert_eq!(toggle_status(&toggled, "pdf-merger"), remaining);
}
