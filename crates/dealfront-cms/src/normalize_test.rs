use chrono::NaiveDate;
use serde_json::json;

use super::*;

fn raw_coupon(value: serde_json::Value) -> WpCoupon {
    serde_json::from_value(value).expect("valid coupon fixture")
}

// -----------------------------------------------------------------------
// normalize_coupon
// -----------------------------------------------------------------------

#[test]
fn normalize_coupon_decodes_title_and_keeps_rendered() {
    let coupon = normalize_coupon(raw_coupon(json!({
        "id": 10,
        "slug": "levis-20",
        "title": {"rendered": "Levi&#8217;s 20% Off"},
        "excerpt": {"rendered": "<p>Jeans &amp; jackets</p>\n"}
    })));
    assert_eq!(coupon.title, "Levi\u{2019}s 20% Off");
    assert_eq!(coupon.title_html, "Levi&#8217;s 20% Off");
    assert_eq!(coupon.excerpt.as_deref(), Some("Jeans & jackets"));
}

#[test]
fn normalize_coupon_reads_acf_attributes() {
    let coupon = normalize_coupon(raw_coupon(json!({
        "id": 1,
        "acf": {
            "coupon_code": " SAVE20 ",
            "discount_amount": "20%",
            "affiliate_link": "https://shop.example.com/?ref=1",
            "expiry_date": "20261231",
            "is_verified": true,
            "is_featured": false,
            "short_desc": "",
            "store_name": "Example Shop"
        }
    })));
    let attrs = coupon.attributes;
    assert_eq!(attrs.code.as_deref(), Some("SAVE20"));
    assert_eq!(attrs.discount.as_deref(), Some("20%"));
    assert_eq!(attrs.expires_on, NaiveDate::from_ymd_opt(2026, 12, 31));
    assert!(attrs.verified);
    assert!(!attrs.featured);
    assert!(attrs.short_description.is_none());
    assert_eq!(attrs.store_name.as_deref(), Some("Example Shop"));
}

#[test]
fn normalize_coupon_with_unparseable_expiry_has_none() {
    let coupon = normalize_coupon(raw_coupon(json!({
        "id": 1,
        "acf": {"expiry_date": "next week"}
    })));
    assert!(coupon.attributes.expires_on.is_none());
}

#[test]
fn normalize_coupon_without_embed_has_no_terms() {
    let coupon = normalize_coupon(raw_coupon(json!({"id": 1})));
    assert!(coupon.terms.is_empty());
    assert!(coupon.image_url.is_none());
}

#[test]
fn normalize_coupon_skips_forbidden_featured_media() {
    let coupon = normalize_coupon(raw_coupon(json!({
        "id": 1,
        "_embedded": {
            "wp:featuredmedia": [
                {"code": "rest_forbidden"},
                {"source_url": "https://cdn.example.com/deal.jpg"}
            ]
        }
    })));
    assert_eq!(
        coupon.image_url.as_deref(),
        Some("https://cdn.example.com/deal.jpg")
    );
}

// -----------------------------------------------------------------------
// tag_term_groups
// -----------------------------------------------------------------------

#[test]
fn untagged_groups_are_brand_then_category() {
    let terms = tag_term_groups(vec![
        vec![json!({"id": 1, "name": "Nike", "slug": "nike"})],
        vec![json!({"id": 9, "name": "Shoes", "slug": "shoes"})],
    ]);
    assert_eq!(terms.len(), 2);
    assert_eq!(terms[0].kind, TaxonomyKind::Brand);
    assert_eq!(terms[1].kind, TaxonomyKind::Category);
}

#[test]
fn taxonomy_field_overrides_position() {
    let terms = tag_term_groups(vec![
        vec![json!({"id": 9, "name": "Shoes", "taxonomy": "coupon_category"})],
        vec![json!({"id": 1, "name": "Nike", "taxonomy": "brand"})],
    ]);
    assert_eq!(terms[0].kind, TaxonomyKind::Category);
    assert_eq!(terms[1].kind, TaxonomyKind::Brand);
}

#[test]
fn leading_empty_group_does_not_shift_brand_position() {
    let terms = tag_term_groups(vec![
        vec![],
        vec![json!({"id": 1, "name": "Nike"})],
        vec![json!({"id": 9, "name": "Shoes"})],
    ]);
    assert_eq!(terms[0].kind, TaxonomyKind::Brand);
    assert_eq!(terms[1].kind, TaxonomyKind::Category);
}

#[test]
fn non_object_entries_are_skipped() {
    let terms = tag_term_groups(vec![vec![
        json!(null),
        json!("nike"),
        json!({"id": 1, "name": "Nike"}),
    ]]);
    assert_eq!(terms.len(), 1);
    assert_eq!(terms[0].id, Some(1));
}

#[test]
fn term_names_are_decoded_and_logo_kept() {
    let terms = tag_term_groups(vec![vec![json!({
        "id": 4,
        "name": "H&amp;M",
        "taxonomy": "brand",
        "acf": {"brand_logo": {"url": "https://cdn.example.com/hm.png", "alt": "H&M"}}
    })]]);
    assert_eq!(terms[0].name.as_deref(), Some("H&M"));
    let logo = terms[0].logo.as_ref().expect("logo");
    assert_eq!(logo.valid_url(), Some("https://cdn.example.com/hm.png"));
}

// -----------------------------------------------------------------------
// normalize_brand / normalize_category / normalize_post
// -----------------------------------------------------------------------

#[test]
fn normalize_brand_maps_acf_fields() {
    let raw: WpBrand = serde_json::from_value(json!({
        "id": 3,
        "name": "Nike",
        "slug": "nike",
        "count": 12,
        "description": "",
        "acf": {
            "brand_logo": {"url": "https://cdn.example.com/nike.png", "width": 200, "height": 80},
            "brand_website": "https://nike.example.com",
            "brand_color": "#111111"
        }
    }))
    .unwrap();
    let brand = normalize_brand(raw);
    assert_eq!(brand.count, Some(12));
    assert!(brand.description.is_none());
    assert_eq!(brand.logo_url(), Some("https://cdn.example.com/nike.png"));
    assert_eq!(brand.logo.as_ref().and_then(|l| l.width), Some(200));
    assert_eq!(brand.website.as_deref(), Some("https://nike.example.com"));
    assert_eq!(brand.color.as_deref(), Some("#111111"));
}

#[test]
fn normalize_category_strips_description_markup() {
    let raw: WpCategory = serde_json::from_value(json!({
        "id": 5,
        "name": "Fashion",
        "slug": "fashion",
        "description": "<p>Clothes &amp; shoes</p>",
        "acf": []
    }))
    .unwrap();
    let category = normalize_category(raw);
    assert_eq!(
        category.description.as_deref(),
        Some("<p>Clothes &amp; shoes</p>")
    );
    assert_eq!(category.plain_description.as_deref(), Some("Clothes & shoes"));
    assert!(category.icon.is_none());
}

#[test]
fn normalize_post_parses_date_and_media() {
    let raw: WpPost = serde_json::from_value(json!({
        "id": 77,
        "slug": "spring-sales",
        "title": {"rendered": "Spring &#8211; Sales"},
        "excerpt": {"rendered": "<p></p>"},
        "date": "2026-03-01T09:30:00",
        "_embedded": {"wp:featuredmedia": [{"source_url": "https://cdn.example.com/spring.jpg"}]}
    }))
    .unwrap();
    let post = normalize_post(raw);
    assert_eq!(post.title, "Spring \u{2013} Sales");
    assert!(post.excerpt.is_none());
    assert!(post.published_at.is_some());
    assert_eq!(
        post.image_url.as_deref(),
        Some("https://cdn.example.com/spring.jpg")
    );
}
