use serde::Serialize;

use super::{PageContext, Unavailable};
use crate::cards::{BrandCard, CategoryCard, CouponCard};
use crate::search::{multi_entity_search, normalize_query};

/// The search page: a prompt until there is something to search for.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchPage {
    Prompt,
    Results {
        query: String,
        coupons: Vec<CouponCard>,
        categories: Vec<CategoryCard>,
        brands: Vec<BrandCard>,
        total: usize,
        unavailable: Vec<&'static str>,
    },
}

impl SearchPage {
    /// A blank query returns [`SearchPage::Prompt`] without touching the CMS.
    pub async fn load(ctx: &PageContext, raw_query: &str) -> Self {
        if normalize_query(raw_query).is_none() {
            return SearchPage::Prompt;
        }
        let query = raw_query.trim();
        let client = ctx.client();
        let (coupons, categories, brands) = tokio::join!(
            ctx.settle("coupons", client.coupons(ctx.limits().coupon_page_size)),
            ctx.settle("categories", client.categories()),
            ctx.settle("brands", client.brands()),
        );

        let mut unavailable = Unavailable::default();
        let matches = multi_entity_search(
            query,
            unavailable.take("coupons", coupons),
            unavailable.take("categories", categories),
            unavailable.take("brands", brands),
        );
        let total = matches.total();
        tracing::debug!(query, total, "search page assembled");

        let today = ctx.today();
        SearchPage::Results {
            query: query.to_string(),
            coupons: CouponCard::many(&matches.coupons, today),
            categories: CategoryCard::many(&matches.categories),
            brands: matches
                .brands
                .iter()
                .map(|b| BrandCard::new(b, b.count.unwrap_or(0)))
                .collect(),
            total,
            unavailable: unavailable.into_inner(),
        }
    }
}
