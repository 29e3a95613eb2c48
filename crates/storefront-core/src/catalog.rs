//! # Catalog Search
//!
//! Derives the visible product list from the full catalog and the text in
//! the search box.
//!
//! ```text
//!  search box: "BIKE"
//!        │
//!        ▼
//!  lowercase query ──► for each item (original order):
//!                        name ⊇ q  OR  description ⊇ q  [OR category ⊇ q]
//!        │
//!        ▼
//!  Vec<&CatalogItem>  (borrowed view, catalog untouched)
//! ```

use serde::{Deserialize, Serialize};

use crate::types::CatalogItem;

/// Which fields a catalog search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Name and description (category pages).
    NameDescription,
    /// Name, description and category (the main product listing).
    #[default]
    NameDescriptionCategory,
}

/// Case-insensitive substring test.
///
/// An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Filters the catalog the way the product listing does: name,
/// description or category contains the query, ignoring case.
///
/// ## Example
/// ```rust,ignore
/// let hits = filter_catalog(&catalog, "BIKE");
/// assert!(hits.iter().all(|p| p.name.to_lowercase().contains("bike")
///     || p.description.to_lowercase().contains("bike")
///     || p.category.to_lowercase().contains("bike")));
/// ```
pub fn filter_catalog<'a>(items: &'a [CatalogItem], query: &str) -> Vec<&'a CatalogItem> {
    filter_catalog_in(items, query, SearchScope::NameDescriptionCategory)
}

/// Filters the catalog over the fields selected by `scope`.
///
/// Relative order of the matches is the catalog order.
pub fn filter_catalog_in<'a>(
    items: &'a [CatalogItem],
    query: &str,
    scope: SearchScope,
) -> Vec<&'a CatalogItem> {
    if query.is_empty() {
        return items.iter().collect();
    }

    let needle = query.to_lowercase();
    let hit = |field: &str| field.to_lowercase().contains(&needle);

    items
        .iter()
        .filter(|item| {
            hit(&item.name)
                || hit(&item.description)
                || (scope == SearchScope::NameDescriptionCategory && hit(&item.category))
        })
        .collect()
}

/// Items in a category, matched by slug (`/category/home-garden`).
pub fn items_in_category<'a>(items: &'a [CatalogItem], slug: &str) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .filter(|item| item.category_slug() == slug)
        .collect()
}

/// Turns a label into a URL slug.
///
/// Lower-cases, drops anything that is not a word character, whitespace or
/// hyphen, collapses runs of whitespace/underscores/hyphens into a single
/// hyphen and trims hyphens from both ends.
///
/// ## Example
/// ```rust
/// use storefront_core::catalog::slugify;
///
/// assert_eq!(slugify("Home & Garden"), "home-garden");
/// assert_eq!(slugify("  Sports_Outdoors "), "sports-outdoors");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        } else if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        }
    }

    slug
}

// =============================================================================
// Unit Tests
// =============================================================================
