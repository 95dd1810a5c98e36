//! Suggestion filtering for the autocomplete dropdown

use crate::model::SearchResultItem;

/// Case-insensitive substring test. An empty query matches every title.
pub fn matches(query: &str, title: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&query.to_lowercase())
}

/// Keep the items whose title contains `query`, in their original order.
pub fn filter_suggestions<'a>(query: &str, items: &'a [SearchResultItem]) -> Vec<&'a SearchResultItem> {
    items.iter().filter(|item| matches(query, &item.title)).collect()
}
