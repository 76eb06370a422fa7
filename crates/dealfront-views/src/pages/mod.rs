//! Page assembly: concurrent content queries, then aggregation into view models.
//!
//! Every page issues its queries together and waits for all of them. Each
//! query is bounded by the page deadline; a failed or late query becomes an
//! empty section and its name is listed in the page's `unavailable` field.

mod blog;
mod brand;
mod brands;
mod categories;
mod category;
mod coupon;
mod home;
mod search;

use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use dealfront_cms::{CmsClient, CmsError, QueryOutcome};
use dealfront_core::AppConfig;
use thiserror::Error;

pub use blog::{BlogPage, PostPage};
pub use brand::BrandPage;
pub use brands::BrandsPage;
pub use categories::CategoriesPage;
pub use category::CategoryPage;
pub use coupon::CouponPage;
pub use home::HomePage;
pub use search::SearchPage;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("{kind} '{slug}' not found")]
    NotFound { kind: &'static str, slug: String },

    #[error("{what} is unavailable: {source}")]
    Unavailable {
        what: &'static str,
        #[source]
        source: CmsError,
    },
}

/// Limits that shape page contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Coupons fetched for aggregation.
    pub coupon_page_size: u32,
    pub home_coupon_limit: usize,
    pub popular_brand_limit: usize,
    pub blog_post_limit: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            coupon_page_size: 100,
            home_coupon_limit: 12,
            popular_brand_limit: 12,
            blog_post_limit: 10,
        }
    }
}

/// Everything a page needs: the client, the deadline and the limits.
#[derive(Clone)]
pub struct PageContext {
    client: CmsClient,
    deadline: Duration,
    limits: PageLimits,
}

impl PageContext {
    #[must_use]
    pub fn new(client: CmsClient, deadline: Duration, limits: PageLimits) -> Self {
        Self {
            client,
            deadline,
            limits,
        }
    }

    #[must_use]
    pub fn from_app_config(client: CmsClient, config: &AppConfig) -> Self {
        Self::new(
            client,
            Duration::from_secs(config.page_deadline_secs),
            PageLimits {
                coupon_page_size: config.coupon_page_size,
                home_coupon_limit: config.home_coupon_limit,
                popular_brand_limit: config.popular_brand_limit,
                ..PageLimits::default()
            },
        )
    }

    #[must_use]
    pub fn client(&self) -> &CmsClient {
        &self.client
    }

    #[must_use]
    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// The date coupon expiry is judged against.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }

    /// Awaits `query` within the page deadline.
    pub(crate) async fn settle<T>(
        &self,
        what: &'static str,
        query: impl Future<Output = QueryOutcome<T>>,
    ) -> QueryOutcome<T> {
        if let Ok(outcome) = tokio::time::timeout(self.deadline, query).await {
            outcome
        } else {
            tracing::warn!(
                section = what,
                deadline_secs = self.deadline.as_secs(),
                "content query missed the page deadline"
            );
            QueryOutcome::Failed(CmsError::DeadlineExceeded {
                what: what.to_string(),
                secs: self.deadline.as_secs(),
            })
        }
    }
}

/// Names of sections whose query failed, for the page's `unavailable` list.
#[derive(Debug, Default)]
pub(crate) struct Unavailable(Vec<&'static str>);

impl Unavailable {
    /// Records a failure and hands back the value or an empty default.
    pub(crate) fn take<T: Default>(&mut self, what: &'static str, outcome: QueryOutcome<T>) -> T {
        if outcome.is_failed() {
            self.0.push(what);
        }
        outcome.or_empty()
    }

    pub(crate) fn into_inner(self) -> Vec<&'static str> {
        self.0
    }
}

/// `"levis-jeans"` → `"Levis Jeans"`, for titles of pages whose entity is missing.
#[must_use]
pub fn title_from_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
