//! Normalization from raw WordPress shapes to [`dealfront_core`] entities.
//!
//! Normalization never fails: a record that deserialized at all yields an
//! entity, with blank or malformed optional fields dropped to `None`.

use dealfront_core::{
    Brand, Category, Coupon, CouponAttributes, EmbeddedTerm, Logo, Post, TaxonomyKind,
};
use serde_json::Value;

use crate::text::{non_empty, parse_expiry_date, parse_wp_datetime, to_plain_text};
use crate::types::{
    WpBrand, WpCategory, WpCoupon, WpCouponAcf, WpEmbedded, WpImage, WpPost, WpTerm,
};

/// Normalizes a raw [`WpCoupon`] into a [`Coupon`].
#[must_use]
pub fn normalize_coupon(raw: WpCoupon) -> Coupon {
    let WpCoupon {
        id,
        slug,
        title,
        excerpt,
        acf,
        embedded,
    } = raw;
    let embedded = embedded.unwrap_or_default();
    let image_url = featured_image(&embedded);
    let excerpt_html = non_empty(excerpt.map(|e| e.rendered));
    let excerpt = excerpt_html
        .as_deref()
        .map(to_plain_text)
        .filter(|e| !e.is_empty());

    Coupon {
        id,
        slug,
        title: to_plain_text(&title.rendered),
        title_html: title.rendered,
        excerpt_html,
        excerpt,
        attributes: normalize_attributes(acf),
        image_url,
        terms: tag_term_groups(embedded.terms),
    }
}

fn normalize_attributes(acf: WpCouponAcf) -> CouponAttributes {
    CouponAttributes {
        code: non_empty(acf.coupon_code),
        discount: non_empty(acf.discount_amount),
        affiliate_url: non_empty(acf.affiliate_link),
        expires_on: acf.expiry_date.as_deref().and_then(parse_expiry_date),
        verified: acf.is_verified,
        featured: acf.is_featured,
        short_description: non_empty(acf.short_desc),
        store_name: non_empty(acf.store_name),
    }
}

/// Tags each embedded term with the taxonomy it belongs to.
///
/// A term's own `taxonomy` field wins. Untagged terms fall back to position:
/// the first non-empty group is the brand group and later groups are
/// categories. Entries that are not term objects are skipped.
#[must_use]
pub fn tag_term_groups(groups: Vec<Vec<Value>>) -> Vec<EmbeddedTerm> {
    let mut terms = Vec::new();
    let mut seen_group = false;
    for group in groups {
        let parsed: Vec<WpTerm> = group
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect();
        if parsed.is_empty() {
            continue;
        }
        let positional = if seen_group {
            TaxonomyKind::Category
        } else {
            TaxonomyKind::Brand
        };
        seen_group = true;
        terms.extend(parsed.into_iter().map(|term| {
            let kind = term
                .taxonomy
                .as_deref()
                .map_or(positional, TaxonomyKind::from_taxonomy);
            EmbeddedTerm {
                kind,
                id: term.id,
                name: non_empty(term.name).map(|n| to_plain_text(&n)),
                slug: non_empty(term.slug),
                logo: term.acf.brand_logo.map(normalize_logo),
            }
        }));
    }
    terms
}

/// Normalizes a raw [`WpBrand`] into a [`Brand`].
#[must_use]
pub fn normalize_brand(raw: WpBrand) -> Brand {
    Brand {
        id: raw.id,
        slug: raw.slug,
        name: to_plain_text(&raw.name),
        count: raw.count,
        description: non_empty(raw.description),
        link: non_empty(raw.link),
        logo: raw.acf.brand_logo.map(normalize_logo),
        website: non_empty(raw.acf.brand_website),
        color: non_empty(raw.acf.brand_color),
    }
}

/// Normalizes a raw [`WpCategory`] into a [`Category`].
#[must_use]
pub fn normalize_category(raw: WpCategory) -> Category {
    let description = non_empty(raw.description);
    let plain_description = description
        .as_deref()
        .map(to_plain_text)
        .filter(|d| !d.is_empty());
    Category {
        id: raw.id,
        slug: raw.slug,
        name: to_plain_text(&raw.name),
        count: raw.count,
        description,
        plain_description,
        icon: non_empty(raw.acf.category_icon),
        image_url: raw.acf.category_image.and_then(|img| non_empty(Some(img.url))),
    }
}

/// Normalizes a raw [`WpPost`] into a [`Post`].
#[must_use]
pub fn normalize_post(raw: WpPost) -> Post {
    let image_url = raw.embedded.as_ref().and_then(featured_image);
    Post {
        id: raw.id,
        slug: raw.slug,
        title: to_plain_text(&raw.title.rendered),
        excerpt: raw
            .excerpt
            .map(|e| to_plain_text(&e.rendered))
            .filter(|e| !e.is_empty()),
        image_url,
        published_at: raw.date.as_deref().and_then(parse_wp_datetime),
    }
}

fn normalize_logo(img: WpImage) -> Logo {
    Logo {
        url: img.url.trim().to_string(),
        alt: non_empty(img.alt),
        width: img.width,
        height: img.height,
    }
}

fn featured_image(embedded: &WpEmbedded) -> Option<String> {
    embedded
        .featured_media
        .iter()
        .find_map(|m| non_empty(m.source_url.clone()))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
