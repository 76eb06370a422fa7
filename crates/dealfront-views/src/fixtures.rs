//! Entity builders shared by unit tests.

use dealfront_core::{
    Brand, BrandWithCount, Category, Coupon, CouponAttributes, EmbeddedTerm, TaxonomyKind,
};

pub(crate) fn brand(id: i64, name: &str, count: Option<u32>) -> Brand {
    Brand {
        id,
        slug: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        count,
        description: None,
        link: None,
        logo: None,
        website: None,
        color: None,
    }
}

pub(crate) fn counted(id: i64, name: &str, coupon_count: u32) -> BrandWithCount {
    BrandWithCount {
        brand: brand(id, name, None),
        coupon_count,
    }
}

pub(crate) fn brand_term(id: Option<i64>, name: Option<&str>) -> EmbeddedTerm {
    EmbeddedTerm {
        kind: TaxonomyKind::Brand,
        id,
        name: name.map(str::to_string),
        slug: name.map(str::to_lowercase),
        logo: None,
    }
}

pub(crate) fn category_term(id: i64, name: &str) -> EmbeddedTerm {
    EmbeddedTerm {
        kind: TaxonomyKind::Category,
        id: Some(id),
        name: Some(name.to_string()),
        slug: Some(name.to_lowercase()),
        logo: None,
    }
}

pub(crate) fn coupon(id: i64, title: &str, terms: Vec<EmbeddedTerm>) -> Coupon {
    Coupon {
        id,
        slug: format!("coupon-{id}"),
        title_html: title.to_string(),
        title: title.to_string(),
        excerpt_html: None,
        excerpt: None,
        attributes: CouponAttributes::default(),
        image_url: None,
        terms,
    }
}

pub(crate) fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        slug: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        count: None,
        description: None,
        plain_description: None,
        icon: None,
        image_url: None,
    }
}
