//! Typed content operations: one method per page data need.
//!
//! Every method returns a [`QueryOutcome`] instead of a `Result`; failures
//! are already logged by [`CmsClient::load`].

use dealfront_core::{Brand, Category, Coupon, Post, TaxonomyKind};

use crate::normalize::{normalize_brand, normalize_category, normalize_coupon, normalize_post};
use crate::outcome::QueryOutcome;
use crate::query::{ContentKind, ContentQuery, MAX_PER_PAGE};
use crate::types::{WpBrand, WpCategory, WpCoupon, WpPost};

use super::CmsClient;

impl CmsClient {
    /// The most recent `limit` coupons with embedded terms and media.
    pub async fn coupons(&self, limit: u32) -> QueryOutcome<Vec<Coupon>> {
        let query = ContentQuery::new(ContentKind::Coupon)
            .per_page(limit)
            .embed();
        self.load::<WpCoupon, _>(&query, normalize_coupon).await
    }

    pub async fn coupon_by_slug(&self, slug: &str) -> QueryOutcome<Option<Coupon>> {
        let query = ContentQuery::new(ContentKind::Coupon).slug(slug).embed();
        self.load::<WpCoupon, _>(&query, normalize_coupon)
            .await
            .map(first)
    }

    /// Coupons tagged with term `term_id` of `taxonomy`.
    pub async fn coupons_in_term(
        &self,
        taxonomy: TaxonomyKind,
        term_id: i64,
        limit: u32,
    ) -> QueryOutcome<Vec<Coupon>> {
        let query = ContentQuery::new(ContentKind::Coupon)
            .in_term(taxonomy, term_id)
            .per_page(limit)
            .embed();
        self.load::<WpCoupon, _>(&query, normalize_coupon).await
    }

    pub async fn coupons_in_category(
        &self,
        category_id: i64,
        limit: u32,
    ) -> QueryOutcome<Vec<Coupon>> {
        self.coupons_in_term(TaxonomyKind::Category, category_id, limit)
            .await
    }

    /// Resolves a brand slug, then lists its coupons.
    ///
    /// An unknown slug yields an empty list; a failed lookup yields `Failed`.
    pub async fn coupons_by_brand(&self, slug: &str, limit: u32) -> QueryOutcome<Vec<Coupon>> {
        match self.brand_by_slug(slug).await {
            QueryOutcome::Loaded(Some(brand)) => {
                self.coupons_in_term(TaxonomyKind::Brand, brand.id, limit)
                    .await
            }
            QueryOutcome::Loaded(None) => QueryOutcome::Loaded(Vec::new()),
            QueryOutcome::Failed(err) => QueryOutcome::Failed(err),
        }
    }

    /// All brands (first API page of 100).
    pub async fn brands(&self) -> QueryOutcome<Vec<Brand>> {
        let query = ContentQuery::new(ContentKind::Brand).per_page(MAX_PER_PAGE);
        self.load::<WpBrand, _>(&query, normalize_brand).await
    }

    /// Brands by id; the category page uses it to complete brands seen only as
    /// embedded terms.
    pub async fn brands_by_ids(&self, ids: &[i64]) -> QueryOutcome<Vec<Brand>> {
        if ids.is_empty() {
            return QueryOutcome::Loaded(Vec::new());
        }
        let query = ContentQuery::new(ContentKind::Brand)
            .include(ids.iter().copied())
            .per_page(MAX_PER_PAGE);
        self.load::<WpBrand, _>(&query, normalize_brand).await
    }

    pub async fn brand_by_slug(&self, slug: &str) -> QueryOutcome<Option<Brand>> {
        let query = ContentQuery::new(ContentKind::Brand).slug(slug);
        self.load::<WpBrand, _>(&query, normalize_brand)
            .await
            .map(first)
    }

    /// All coupon categories (first API page of 100).
    pub async fn categories(&self) -> QueryOutcome<Vec<Category>> {
        let query = ContentQuery::new(ContentKind::CouponCategory).per_page(MAX_PER_PAGE);
        self.load::<WpCategory, _>(&query, normalize_category).await
    }

    pub async fn category_by_slug(&self, slug: &str) -> QueryOutcome<Option<Category>> {
        let query = ContentQuery::new(ContentKind::CouponCategory).slug(slug);
        self.load::<WpCategory, _>(&query, normalize_category)
            .await
            .map(first)
    }

    /// The most recent `limit` blog posts with featured media.
    pub async fn posts(&self, limit: u32) -> QueryOutcome<Vec<Post>> {
        let query = ContentQuery::new(ContentKind::Post)
            .per_page(limit)
            .embed();
        self.load::<WpPost, _>(&query, normalize_post).await
    }

    pub async fn post_by_slug(&self, slug: &str) -> QueryOutcome<Option<Post>> {
        let query = ContentQuery::new(ContentKind::Post).slug(slug).embed();
        self.load::<WpPost, _>(&query, normalize_post)
            .await
            .map(first)
    }
}

fn first<T>(items: Vec<T>) -> Option<T> {
    items.into_iter().next()
}
