//! Card view models. The only logic here is presentational branching.

use chrono::NaiveDate;
use dealfront_core::{initial, Brand, BrandWithCount, Category, Coupon, EmbeddedTerm, Logo};
use serde::Serialize;

/// How a brand is pictured: its logo when the URL is usable, else its initial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrandMark {
    Logo { url: String, alt: String },
    Initial { letter: String },
}

impl BrandMark {
    fn new(name: &str, logo: Option<&Logo>) -> Self {
        match logo.and_then(Logo::valid_url) {
            Some(url) => BrandMark::Logo {
                url: url.to_string(),
                alt: logo
                    .and_then(|l| l.alt.clone())
                    .unwrap_or_else(|| name.to_string()),
            },
            None => BrandMark::Initial {
                letter: initial(name).unwrap_or_default(),
            },
        }
    }
}

/// Call to action on a coupon card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouponAction {
    /// Show the code with a copy button; the link opens the store.
    CopyCode { code: String, url: Option<String> },
    /// No code: a plain "get deal" link.
    OpenDeal { url: Option<String> },
}

/// Brand shown on a coupon card, taken from the first brand term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponBrand {
    pub id: Option<i64>,
    pub name: String,
    pub slug: Option<String>,
    pub mark: BrandMark,
}

impl CouponBrand {
    fn from_term(term: &EmbeddedTerm) -> Option<Self> {
        let name = term.name.clone()?;
        Some(Self {
            id: term.id,
            slug: term.slug.clone(),
            mark: BrandMark::new(&name, term.logo.as_ref()),
            name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponCard {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub discount: Option<String>,
    pub verified: bool,
    pub featured: bool,
    pub store_name: Option<String>,
    pub expires_on: Option<NaiveDate>,
    pub is_expired: bool,
    pub image_url: Option<String>,
    pub brand: Option<CouponBrand>,
    pub categories: Vec<String>,
    pub action: CouponAction,
}

impl CouponCard {
    /// Builds the card; `today` decides `is_expired`.
    #[must_use]
    pub fn new(coupon: &Coupon, today: NaiveDate) -> Self {
        let attrs = &coupon.attributes;
        let url = attrs.affiliate_url.clone();
        let action = match &attrs.code {
            Some(code) => CouponAction::CopyCode {
                code: code.clone(),
                url,
            },
            None => CouponAction::OpenDeal { url },
        };
        Self {
            id: coupon.id,
            slug: coupon.slug.clone(),
            title: coupon.title.clone(),
            description: attrs
                .short_description
                .clone()
                .or_else(|| coupon.excerpt.clone()),
            discount: attrs.discount.clone(),
            verified: attrs.verified,
            featured: attrs.featured,
            store_name: attrs.store_name.clone(),
            expires_on: attrs.expires_on,
            is_expired: coupon.is_expired(today),
            image_url: coupon.image_url.clone(),
            brand: coupon.primary_brand().and_then(CouponBrand::from_term),
            categories: coupon
                .category_terms()
                .filter_map(|t| t.name.clone())
                .collect(),
            action,
        }
    }

    pub fn many(coupons: &[Coupon], today: NaiveDate) -> Vec<Self> {
        coupons.iter().map(|c| Self::new(c, today)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandCard {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub mark: BrandMark,
    pub coupon_count: u32,
    /// `"1 coupon"` / `"N coupons"`.
    pub count_label: String,
    pub website: Option<String>,
}

impl BrandCard {
    #[must_use]
    pub fn new(brand: &Brand, coupon_count: u32) -> Self {
        Self {
            id: brand.id,
            slug: brand.slug.clone(),
            name: brand.name.clone(),
            mark: BrandMark::new(&brand.name, brand.logo.as_ref()),
            coupon_count,
            count_label: count_label(coupon_count),
            website: brand.website.clone(),
        }
    }

    pub fn many(brands: &[BrandWithCount]) -> Vec<Self> {
        brands
            .iter()
            .map(|b| Self::new(&b.brand, b.coupon_count))
            .collect()
    }
}

#[must_use]
pub fn count_label(count: u32) -> String {
    if count == 1 {
        "1 coupon".to_string()
    } else {
        format!("{count} coupons")
    }
}

/// Picture for a category: image first, then icon, then initial letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryVisual {
    Image { url: String },
    Icon { icon: String },
    Initial { letter: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCard {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub visual: CategoryVisual,
    pub coupon_count: Option<u32>,
}

impl CategoryCard {
    #[must_use]
    pub fn new(category: &Category) -> Self {
        let visual = if let Some(url) = &category.image_url {
            CategoryVisual::Image { url: url.clone() }
        } else if let Some(icon) = &category.icon {
            CategoryVisual::Icon { icon: icon.clone() }
        } else {
            CategoryVisual::Initial {
                letter: initial(&category.name).unwrap_or_default(),
            }
        };
        Self {
            id: category.id,
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.plain_description.clone(),
            visual,
            coupon_count: category.count,
        }
    }

    pub fn many(categories: &[Category]) -> Vec<Self> {
        categories.iter().map(Self::new).collect()
    }
}
