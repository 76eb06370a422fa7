//! Request-scoped content entities sourced from the CMS.
//!
//! Nothing here is persisted: every value is rebuilt from fresh API responses
//! on each request. Raw API shapes live in `dealfront-cms`; these are the
//! normalized forms the aggregation and search code works with.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Taxonomy an embedded term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyKind {
    Brand,
    Category,
    /// Any taxonomy the site does not model (tags, post formats, ...).
    Other,
}

impl TaxonomyKind {
    /// REST base of the taxonomy on the CMS. Also the query parameter name
    /// used to filter coupons by a term of this taxonomy.
    #[must_use]
    pub fn rest_base(self) -> Option<&'static str> {
        match self {
            TaxonomyKind::Brand => Some("brand"),
            TaxonomyKind::Category => Some("coupon_category"),
            TaxonomyKind::Other => None,
        }
    }

    /// Maps the API's `taxonomy` field on a term to a kind.
    #[must_use]
    pub fn from_taxonomy(name: &str) -> Self {
        match name {
            "brand" => TaxonomyKind::Brand,
            "coupon_category" => TaxonomyKind::Category,
            _ => TaxonomyKind::Other,
        }
    }
}

impl std::fmt::Display for TaxonomyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxonomyKind::Brand => write!(f, "brand"),
            TaxonomyKind::Category => write!(f, "category"),
            TaxonomyKind::Other => write!(f, "other"),
        }
    }
}

/// Image reference attached to a brand (ACF `brand_logo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    pub url: String,
    pub alt: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Logo {
    /// Returns the URL only when it is an absolute http(s) URL.
    #[must_use]
    pub fn valid_url(&self) -> Option<&str> {
        let url = self.url.trim();
        (url.starts_with("http://") || url.starts_with("https://")).then_some(url)
    }
}

/// A taxonomy term embedded in a coupon response, tagged with its taxonomy.
///
/// Embedded terms are partial records: the API may omit anything but the
/// taxonomy, so identity fields stay optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedTerm {
    pub kind: TaxonomyKind,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo: Option<Logo>,
}

impl EmbeddedTerm {
    /// Promotes the term to a [`Brand`] when it has both an id and a name.
    #[must_use]
    pub fn to_brand(&self) -> Option<Brand> {
        let id = self.id?;
        let name = self.name.clone()?;
        Some(Brand {
            id,
            slug: self.slug.clone().unwrap_or_default(),
            name,
            count: None,
            description: None,
            link: None,
            logo: self.logo.clone(),
            website: None,
            color: None,
        })
    }
}

/// Flat ACF attribute bag of a coupon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponAttributes {
    pub code: Option<String>,
    /// Display label such as `"20%"` or `"$10"`.
    pub discount: Option<String>,
    pub affiliate_url: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub verified: bool,
    pub featured: bool,
    pub short_description: Option<String>,
    pub store_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: i64,
    pub slug: String,
    /// Rendered title as returned by the CMS (may contain entities/markup).
    pub title_html: String,
    /// Decoded plain-text title.
    pub title: String,
    pub excerpt_html: Option<String>,
    /// Decoded plain-text excerpt.
    pub excerpt: Option<String>,
    pub attributes: CouponAttributes,
    pub image_url: Option<String>,
    pub terms: Vec<EmbeddedTerm>,
}

impl Coupon {
    /// Embedded terms tagged as brands, in API order.
    pub fn brand_terms(&self) -> impl Iterator<Item = &EmbeddedTerm> {
        self.terms_of(TaxonomyKind::Brand)
    }

    /// Embedded terms tagged as categories, in API order.
    pub fn category_terms(&self) -> impl Iterator<Item = &EmbeddedTerm> {
        self.terms_of(TaxonomyKind::Category)
    }

    fn terms_of(&self, kind: TaxonomyKind) -> impl Iterator<Item = &EmbeddedTerm> {
        self.terms.iter().filter(move |t| t.kind == kind)
    }

    /// The first brand term, used for the card logo.
    #[must_use]
    pub fn primary_brand(&self) -> Option<&EmbeddedTerm> {
        self.brand_terms().next()
    }

    /// `true` when the coupon has an expiry date strictly before `today`.
    #[must_use]
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.attributes.expires_on.is_some_and(|d| d < today)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: i64,
    pub slug: String,
    pub name: String,
    /// Term count reported by the CMS, when present.
    pub count: Option<u32>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub logo: Option<Logo>,
    pub website: Option<String>,
    pub color: Option<String>,
}

/// Uppercased first character of `name`, ignoring leading whitespace.
///
/// Used for logo fallbacks and A–Z grouping. `None` for a blank name.
#[must_use]
pub fn initial(name: &str) -> Option<String> {
    name.trim_start()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
}

impl Brand {
    #[must_use]
    pub fn logo_url(&self) -> Option<&str> {
        self.logo.as_ref().and_then(Logo::valid_url)
    }
}

/// A brand with its coupon count derived for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandWithCount {
    #[serde(flatten)]
    pub brand: Brand,
    pub coupon_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub count: Option<u32>,
    /// Description as stored in the CMS; may contain markup.
    pub description: Option<String>,
    /// Description with markup stripped, for plain-text display.
    pub plain_description: Option<String>,
    pub icon: Option<String>,
    pub image_url: Option<String>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub image_url: Option<String>,
    pub published_at: Option<NaiveDateTime>,
}

/// Site-wide totals shown on the home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStats {
    pub total_coupons: usize,
    pub total_brands: usize,
    pub total_categories: usize,
}

#[cfg(test)]
#[path = "entities_test.rs"]
mod tests;
