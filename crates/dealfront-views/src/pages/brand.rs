use dealfront_core::TaxonomyKind;
use serde::Serialize;

use super::{title_from_slug, PageContext, Unavailable};
use crate::cards::{BrandCard, CouponCard};

/// A single brand with its coupons. An unknown brand renders an empty state.
#[derive(Debug, Clone, Serialize)]
pub struct BrandPage {
    pub slug: String,
    pub title: String,
    pub brand: Option<BrandCard>,
    pub description: Option<String>,
    pub coupons: Vec<CouponCard>,
    pub is_empty: bool,
    pub unavailable: Vec<&'static str>,
}

impl BrandPage {
    pub async fn load(ctx: &PageContext, slug: &str) -> Self {
        let client = ctx.client();
        let mut unavailable = Unavailable::default();

        let brand = unavailable.take(
            "brand",
            ctx.settle("brand", client.brand_by_slug(slug)).await,
        );
        let coupons = match &brand {
            Some(b) => unavailable.take(
                "coupons",
                ctx.settle(
                    "coupons",
                    client.coupons_in_term(TaxonomyKind::Brand, b.id, ctx.limits().coupon_page_size),
                )
                .await,
            ),
            None => Vec::new(),
        };
        let coupons = CouponCard::many(&coupons, ctx.today());

        let title = brand
            .as_ref()
            .map_or_else(|| title_from_slug(slug), |b| b.name.clone());
        let card = brand.as_ref().map(|b| {
            let count = u32::try_from(coupons.len()).unwrap_or(u32::MAX);
            BrandCard::new(b, count)
        });
        if brand.is_none() {
            tracing::debug!(slug, "brand not found, rendering empty state");
        }

        Self {
            slug: slug.to_string(),
            title,
            description: brand.and_then(|b| b.description),
            brand: card,
            is_empty: coupons.is_empty(),
            coupons,
            unavailable: unavailable.into_inner(),
        }
    }
}
