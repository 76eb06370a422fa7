//! Case-insensitive text search and brand ordering.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

use dealfront_core::{initial, Brand, BrandWithCount, Category, Coupon};
use serde::{Deserialize, Serialize};

/// Bucket for names that do not start with a character.
pub const OTHER_BUCKET: &str = "#";

/// Brand directory ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandSort {
    #[default]
    Name,
    Popular,
}

impl FromStr for BrandSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "name" => Ok(BrandSort::Name),
            "popular" => Ok(BrandSort::Popular),
            other => Err(format!("unknown sort '{other}' (expected name or popular)")),
        }
    }
}

/// Trimmed, lowercased query; `None` when nothing is left.
#[must_use]
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Brands whose name contains `text`, ignoring case. Empty text keeps all.
#[must_use]
pub fn filter_brands_by_text(brands: Vec<BrandWithCount>, text: &str) -> Vec<BrandWithCount> {
    match normalize_query(text) {
        None => brands,
        Some(needle) => brands
            .into_iter()
            .filter(|b| contains_ci(&b.brand.name, &needle))
            .collect(),
    }
}

/// Case-insensitive name order with a byte-order tiebreak.
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorts in place. Both orders are stable.
pub fn sort_brands(brands: &mut [BrandWithCount], sort: BrandSort) {
    match sort {
        BrandSort::Name => brands.sort_by(|a, b| compare_names(&a.brand.name, &b.brand.name)),
        BrandSort::Popular => brands.sort_by(|a, b| b.coupon_count.cmp(&a.coupon_count)),
    }
}

/// Uppercased first character of `name`, or [`OTHER_BUCKET`].
#[must_use]
pub fn first_letter(name: &str) -> String {
    initial(name).unwrap_or_else(|| OTHER_BUCKET.to_string())
}

/// Groups brands by [`first_letter`]. Keys iterate in order; members keep
/// their input order.
#[must_use]
pub fn group_by_first_letter(brands: Vec<BrandWithCount>) -> BTreeMap<String, Vec<BrandWithCount>> {
    let mut groups: BTreeMap<String, Vec<BrandWithCount>> = BTreeMap::new();
    for brand in brands {
        groups
            .entry(first_letter(&brand.brand.name))
            .or_default()
            .push(brand);
    }
    groups
}

/// Matches of one query across the three searchable kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchMatches {
    pub coupons: Vec<Coupon>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

impl SearchMatches {
    #[must_use]
    pub fn total(&self) -> usize {
        self.coupons.len() + self.categories.len() + self.brands.len()
    }
}

/// Filters each collection independently with a case-insensitive substring
/// match: coupons on plain title or excerpt, categories and brands on name or
/// slug. An empty query matches nothing.
#[must_use]
pub fn multi_entity_search(
    query: &str,
    coupons: Vec<Coupon>,
    categories: Vec<Category>,
    brands: Vec<Brand>,
) -> SearchMatches {
    let Some(needle) = normalize_query(query) else {
        return SearchMatches::default();
    };
    SearchMatches {
        coupons: coupons
            .into_iter()
            .filter(|c| {
                contains_ci(&c.title, &needle)
                    || c.excerpt.as_deref().is_some_and(|e| contains_ci(e, &needle))
            })
            .collect(),
        categories: categories
            .into_iter()
            .filter(|c| contains_ci(&c.name, &needle) || contains_ci(&c.slug, &needle))
            .collect(),
        brands: brands
            .into_iter()
            .filter(|b| contains_ci(&b.name, &needle) || contains_ci(&b.slug, &needle))
            .collect(),
    }
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
