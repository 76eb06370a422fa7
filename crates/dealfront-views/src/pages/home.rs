use dealfront_core::SiteStats;
use serde::Serialize;

use super::{PageContext, Unavailable};
use crate::aggregate::{brand_coupon_counts, merge_brand_counts, rank_popular_brands, site_stats};
use crate::cards::{BrandCard, CategoryCard, CouponCard};

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub latest_coupons: Vec<CouponCard>,
    pub popular_brands: Vec<BrandCard>,
    pub categories: Vec<CategoryCard>,
    pub stats: SiteStats,
    pub unavailable: Vec<&'static str>,
}

impl HomePage {
    pub async fn load(ctx: &PageContext) -> Self {
        let limits = ctx.limits();
        let client = ctx.client();
        let (coupons, brands, categories) = tokio::join!(
            ctx.settle("coupons", client.coupons(limits.coupon_page_size)),
            ctx.settle("brands", client.brands()),
            ctx.settle("categories", client.categories()),
        );

        let mut unavailable = Unavailable::default();
        let coupons = unavailable.take("coupons", coupons);
        let brands = unavailable.take("brands", brands);
        let categories = unavailable.take("categories", categories);

        let stats = site_stats(&coupons, &brands, &categories);
        let counts = brand_coupon_counts(&coupons);
        let popular = merge_brand_counts(
            rank_popular_brands(brands, limits.popular_brand_limit),
            &counts,
        );
        let today = ctx.today();
        let latest: Vec<_> = coupons
            .iter()
            .take(limits.home_coupon_limit)
            .map(|c| CouponCard::new(c, today))
            .collect();

        tracing::debug!(
            coupons = stats.total_coupons,
            brands = stats.total_brands,
            categories = stats.total_categories,
            "home page assembled"
        );

        Self {
            latest_coupons: latest,
            popular_brands: BrandCard::many(&popular),
            categories: CategoryCard::many(&categories),
            stats,
            unavailable: unavailable.into_inner(),
        }
    }
}
