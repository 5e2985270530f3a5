//! Client-side search, category filter and name sort over a loaded page.
//!
//! These never touch the network and never reorder or modify the loaded
//! entries; they produce a derived view.

use std::cmp::Ordering;

use serde::Serialize;
use unicase::UniCase;

use crate::types::{Category, Entry};

/// User-controlled filter inputs of the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewFilter {
    /// Case-insensitive name substring; empty matches everything
    pub search: String,
    /// Only entries carrying this category, when set
    pub category: Option<Category>,
    /// Order by name instead of list order
    pub sort_by_name: bool,
}

impl ViewFilter {
    /// Both predicates must hold.
    pub fn matches(&self, entry: &Entry) -> bool {
        contains_case_insensitive(&entry.name, &self.search)
            && self
                .category
                .is_none_or(|category| entry.has_category(category))
    }

    /// Whether any predicate narrows the view.
    pub fn is_narrowing(&self) -> bool {
        !self.search.is_empty() || self.category.is_some()
    }
}

/// The displayed subset of `entries` under `filter`.
pub fn apply_filter<'a>(entries: &'a [Entry], filter: &ViewFilter) -> Vec<&'a Entry> {
    let mut shown: Vec<&Entry> = entries.iter().filter(|e| filter.matches(e)).collect();
    if filter.sort_by_name {
        // stable, so equal names keep list order
        shown.sort_by(|a, b| compare_names(&a.name, &b.name));
    }
    shown
}

/// Locale-style name ordering: case-folded first, exact bytes as tie-break.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    UniCase::new(a)
        .cmp(&UniCase::new(b))
        .then_with(|| a.cmp(b))
}

/// Case-insensitive substring match.
///
/// Uses `unicase` for Unicode case folding.
fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack_folded = UniCase::new(haystack).to_folded_case();
    let needle_folded = UniCase::new(needle).to_folded_case();
    haystack_folded.contains(&needle_folded)
}
