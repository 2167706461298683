//! Selection State — identifiers marked for bulk actions in the admin table

use std::collections::BTreeSet;

use serde::Serialize;

use crate::store::Catalog;

/// Set of selected tool ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    ids: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Replace the selection with exactly `ids`
    pub fn select_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in sorted order
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    /// Drop ids that are no longer in the catalog
    pub fn retain_present(&mut self, catalog: &Catalog) {
        self.ids.retain(|id| catalog.contains(id));
    }

    /// True when every selected id exists in the catalog
    pub fn is_subset_of(&self, catalog: &Catalog) -> bool {
        self.ids.iter().all(|id| catalog.contains(id))
    }
}

/// Remove every selected record and clear the selection
pub fn bulk_remove(catalog: &Catalog, selection: &mut SelectionSet) -> Catalog {
    let selected = selection.ids();
    let remaining = catalog.without(&selected);
    selection.clear();
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ToolRecord, ToolStatus};
    use chrono::NaiveDate;

    fn catalog() -> Catalog {
        let date = NaiveDate::from_ymd_opt(2023, 10, 10).unwrap();
        Catalog::load(vec![
            ToolRecord::new("a", "Text Summarizer", "", Category::Writing, ToolStatus::Active, date),
            ToolRecord::new("b", "Logo Maker", "", Category::Design, ToolStatus::Inactive, date),
        ])
        .unwrap()
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut sel = SelectionSet::new();
        sel.toggle("a");
        assert!(sel.contains("a"));
        sel.toggle("a");
        assert!(!sel.contains("a"));
        assert!(sel.is_empty());
    }

    #[test]
    fn test_select_all_replaces() {
        let mut sel = SelectionSet::new();
        sel.toggle("x");
        sel.select_all(["a", "b"]);
        assert_eq!(sel.ids(), vec!["a", "b"]);
        assert!(!sel.contains("x"));
    }

    #[test]
    fn test_clear() {
        let mut sel = SelectionSet::new();
        sel.select_all(vec!["a".to_string()]);
        sel.clear();
        assert_eq!(sel.len(), 0);
    }

    #[test]
    fn test_bulk_remove_scenario() {
        let catalog = catalog();
        let mut sel = SelectionSet::new();
        sel.select_all(["a", "b"]);
        sel.toggle("b");

        let remaining = bulk_remove(&catalog, &mut sel);
        assert_eq!(remaining.ids(), vec!["b"]);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_bulk_remove_leaves_no_selected_record() {
        let catalog = catalog();
        let mut sel = SelectionSet::new();
        sel.select_all(catalog.ids());
        let selected = sel.ids();

        let remaining = bulk_remove(&catalog, &mut sel);
        assert!(selected.iter().all(|id| !remaining.contains(id)));
        assert!(remaining.is_empty());
        assert!(sel.is_empty());
    }

    #[test]
    fn test_retain_present_drops_dangling_ids() {
        let catalog = catalog();
        let mut sel = SelectionSet::new();
        sel.select_all(["a", "ghost"]);
        assert!(!sel.is_subset_of(&catalog));

        sel.retain_present(&catalog);
        assert_eq!(sel.ids(), vec!["a"]);
        assert!(sel.is_subset_of(&catalog));
    }
}
