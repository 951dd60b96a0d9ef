use crate::db::models::document::Document;

/// Category value that disables the classification predicate.
pub const ALL_CATEGORIES: &str = "all";

/// Library filter: case-insensitive substring over title and filename, AND an
/// exact classification match unless the filter is [`ALL_CATEGORIES`].
/// Input order is preserved.
pub fn filter(documents: &[Document], search_term: &str, category_filter: &str) -> Vec<Document> {
    let needle = search_term.to_lowercase();

    documents
        .iter()
        .filter(|doc| matches_search(doc, &needle) && matches_category(doc, category_filter))
        .cloned()
        .collect()
}

fn matches_search(doc: &Document, needle: &str) -> bool {
    doc.title.to_lowercase().contains(needle) || doc.filename.to_lowercase().contains(needle)
}

fn matches_category(doc: &Document, category_filter: &str) -> bool {
    category_filter == ALL_CATEGORIES || doc.classification == category_filter
}
