//! Best-effort aggregation over coupons and their embedded brand terms.
//!
//! Counts come only from the coupons fetched for the current request, so
//! they are approximate whenever the site has more coupons than one page.

use std::collections::{HashMap, HashSet};

use dealfront_core::{Brand, BrandWithCount, Category, Coupon, EmbeddedTerm, SiteStats};

/// Number of coupons per brand id, counted from brand-kind embedded terms.
///
/// Terms without an id are skipped. A brand listed twice on one coupon is
/// counted twice.
#[must_use]
pub fn brand_coupon_counts(coupons: &[Coupon]) -> HashMap<i64, u32> {
    let mut counts = HashMap::new();
    for id in coupons
        .iter()
        .flat_map(Coupon::brand_terms)
        .filter_map(|term| term.id)
    {
        *counts.entry(id).or_insert(0) += 1;
    }
    counts
}

/// Attaches a coupon count to every brand, keeping input order.
///
/// The derived count wins, then the API's term count, then zero.
#[must_use]
pub fn merge_brand_counts(
    brands: impl IntoIterator<Item = Brand>,
    counts: &HashMap<i64, u32>,
) -> Vec<BrandWithCount> {
    brands
        .into_iter()
        .map(|brand| {
            let coupon_count = counts
                .get(&brand.id)
                .copied()
                .or(brand.count)
                .unwrap_or(0);
            BrandWithCount {
                brand,
                coupon_count,
            }
        })
        .collect()
}

/// Distinct brands embedded in `coupons`, in first-seen order.
///
/// Only terms with both an id and a name qualify; the first occurrence of an
/// id wins.
#[must_use]
pub fn unique_brands_from_coupons(coupons: &[Coupon]) -> Vec<Brand> {
    let mut seen = HashSet::new();
    coupons
        .iter()
        .flat_map(Coupon::brand_terms)
        .filter_map(EmbeddedTerm::to_brand)
        .filter(|brand| seen.insert(brand.id))
        .collect()
}

/// Replaces each embedded brand with its full record from `details` when one
/// has the same id. Order and length follow `embedded`.
#[must_use]
pub fn fill_brand_details(embedded: Vec<Brand>, details: Vec<Brand>) -> Vec<Brand> {
    let mut by_id: HashMap<i64, Brand> = details.into_iter().map(|b| (b.id, b)).collect();
    embedded
        .into_iter()
        .map(|brand| by_id.remove(&brand.id).unwrap_or(brand))
        .collect()
}

/// The `limit` brands with the highest API count. Ties keep input order.
#[must_use]
pub fn rank_popular_brands(mut brands: Vec<Brand>, limit: usize) -> Vec<Brand> {
    brands.sort_by(|a, b| b.count.unwrap_or(0).cmp(&a.count.unwrap_or(0)));
    brands.truncate(limit);
    brands
}

#[must_use]
pub fn site_stats(coupons: &[Coupon], brands: &[Brand], categories: &[Category]) -> SiteStats {
    SiteStats {
        total_coupons: coupons.len(),
        total_brands: brands.len(),
        total_categories: categories.len(),
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
