use dealfront_cms::QueryOutcome;
use serde::Serialize;

use super::{PageContext, PageError, Unavailable};
use crate::aggregate::{
    brand_coupon_counts, fill_brand_details, merge_brand_counts, unique_brands_from_coupons,
};
use crate::cards::{BrandCard, CategoryCard, CouponCard};

/// A category with its coupons and the brands that appear in them.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub category: CategoryCard,
    pub coupons: Vec<CouponCard>,
    /// Brands seen on this category's coupons, in first-seen order, with
    /// coupon counts taken across the whole site.
    pub brands: Vec<BrandCard>,
    pub is_empty: bool,
    pub unavailable: Vec<&'static str>,
}

impl CategoryPage {
    /// # Errors
    ///
    /// - [`PageError::NotFound`] when the slug is not in the category list.
    /// - [`PageError::Unavailable`] when the category list could not be fetched.
    pub async fn load(ctx: &PageContext, slug: &str) -> Result<Self, PageError> {
        let client = ctx.client();
        let page_size = ctx.limits().coupon_page_size;
        let (categories, all_coupons) = tokio::join!(
            ctx.settle("categories", client.categories()),
            ctx.settle("coupons", client.coupons(page_size)),
        );

        let categories = match categories {
            QueryOutcome::Loaded(categories) => categories,
            QueryOutcome::Failed(source) => {
                return Err(PageError::Unavailable {
                    what: "categories",
                    source,
                })
            }
        };
        let category = categories
            .into_iter()
            .find(|c| c.slug == slug)
            .ok_or_else(|| PageError::NotFound {
                kind: "category",
                slug: slug.to_string(),
            })?;

        let mut unavailable = Unavailable::default();
        let all_coupons = unavailable.take("coupons", all_coupons);
        let scoped = unavailable.take(
            "category_coupons",
            ctx.settle(
                "category_coupons",
                client.coupons_in_category(category.id, page_size),
            )
            .await,
        );

        let embedded = unique_brands_from_coupons(&scoped);
        let without_logo: Vec<i64> = embedded
            .iter()
            .filter(|b| b.logo_url().is_none())
            .map(|b| b.id)
            .collect();
        let details = unavailable.take(
            "brand_details",
            ctx.settle("brand_details", client.brands_by_ids(&without_logo))
                .await,
        );

        let counts = brand_coupon_counts(&all_coupons);
        let brands = merge_brand_counts(fill_brand_details(embedded, details), &counts);
        let coupons = CouponCard::many(&scoped, ctx.today());

        Ok(Self {
            category: CategoryCard::new(&category),
            is_empty: coupons.is_empty(),
            coupons,
            brands: BrandCard::many(&brands),
            unavailable: unavailable.into_inner(),
        })
    }
}
