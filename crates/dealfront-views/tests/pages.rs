//! Page assembly against a mocked content API.

use std::time::Duration;

use dealfront_cms::{CmsClient, CmsError, CmsSettings};
use dealfront_views::cards::BrandMark;
use dealfront_views::directory::DirectoryQuery;
use dealfront_views::pages::{
    BlogPage, BrandPage, BrandsPage, CategoriesPage, CategoryPage, CouponPage, HomePage,
    PageLimits, PostPage, SearchPage,
};
use dealfront_views::search::BrandSort;
use dealfront_views::{PageContext, PageError};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/wp-json/wp/v2";

fn context(server: &MockServer, deadline: Duration) -> PageContext {
    let client = CmsClient::with_settings(&CmsSettings::for_base_url(&format!(
        "{}{API}",
        server.uri()
    )))
    .expect("client construction should not fail");
    PageContext::new(
        client,
        deadline,
        PageLimits {
            coupon_page_size: 100,
            home_coupon_limit: 2,
            popular_brand_limit: 2,
            blog_post_limit: 5,
        },
    )
}

fn ctx(server: &MockServer) -> PageContext {
    context(server, Duration::from_secs(5))
}

fn coupon(id: i64, title: &str, brand: (i64, &str), category: (i64, &str)) -> Value {
    let code = if id % 2 == 0 { json!("CODE") } else { json!(false) };
    json!({
        "id": id,
        "slug": format!("coupon-{id}"),
        "title": {"rendered": title},
        "acf": {"coupon_code": code},
        "_embedded": {
            "wp:term": [
                [{"id": brand.0, "name": brand.1, "slug": brand.1.to_lowercase()}],
                [{"id": category.0, "name": category.1, "slug": category.1.to_lowercase()}]
            ]
        }
    })
}

fn all_coupons() -> Value {
    json!([
        coupon(1, "Nike 10% off", (7, "Nike"), (90, "Shoes")),
        coupon(2, "Nike free shipping", (7, "Nike"), (90, "Shoes")),
        coupon(3, "Zara sale", (8, "Zara"), (91, "Fashion")),
    ])
}

fn brands() -> Value {
    json!([
        {"id": 7, "name": "Nike", "slug": "nike", "count": 5},
        {"id": 8, "name": "Zara", "slug": "zara", "count": 1},
        {"id": 9, "name": "Amazon", "slug": "amazon", "count": 5,
         "acf": {"brand_logo": {"url": "https://cdn.example.com/amazon.png"}}}
    ])
}

fn categories() -> Value {
    json!([
        {"id": 90, "name": "Shoes", "slug": "shoes", "count": 2},
        {"id": 91, "name": "Fashion", "slug": "fashion", "description": "<p>Clothes</p>"}
    ])
}

async fn mount_json(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{API}/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("{API}/{endpoint}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

// -----------------------------------------------------------------------
// Home
// -----------------------------------------------------------------------

#[tokio::test]
async fn home_page_combines_three_queries() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", all_coupons()).await;
    mount_json(&server, "brand", brands()).await;
    mount_json(&server, "coupon_category", categories()).await;

    let page = HomePage::load(&ctx(&server)).await;

    assert_eq!(page.stats.total_coupons, 3);
    assert_eq!(page.stats.total_brands, 3);
    assert_eq!(page.stats.total_categories, 2);
    assert_eq!(page.latest_coupons.len(), 2);
    let popular: Vec<_> = page.popular_brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(popular, vec!["Nike", "Amazon"]);
    // Nike's count comes from the fetched coupons, Amazon falls back to the API count.
    assert_eq!(page.popular_brands[0].coupon_count, 2);
    assert_eq!(page.popular_brands[1].coupon_count, 5);
    assert!(matches!(page.popular_brands[1].mark, BrandMark::Logo { .. }));
    assert!(page.unavailable.is_empty());
}

#[tokio::test]
async fn home_page_degrades_failed_section() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", all_coupons()).await;
    mount_status(&server, "brand", 500).await;
    mount_json(&server, "coupon_category", categories()).await;

    let page = HomePage::load(&ctx(&server)).await;

    assert_eq!(page.unavailable, vec!["brands"]);
    assert!(page.popular_brands.is_empty());
    assert_eq!(page.stats.total_brands, 0);
    assert_eq!(page.stats.total_coupons, 3);
}

#[tokio::test]
async fn slow_query_misses_deadline_without_blocking_page() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", all_coupons()).await;
    mount_json(&server, "brand", brands()).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon_category")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(categories())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let page = HomePage::load(&context(&server, Duration::from_millis(200))).await;

    assert_eq!(page.unavailable, vec!["categories"]);
    assert!(page.categories.is_empty());
    assert_eq!(page.stats.total_coupons, 3);
}

// -----------------------------------------------------------------------
// Brands directory / brand page
// -----------------------------------------------------------------------

#[tokio::test]
async fn brand_directory_filters_and_groups() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", all_coupons()).await;
    mount_json(&server, "brand", brands()).await;

    let page = BrandsPage::load(
        &ctx(&server),
        &DirectoryQuery {
            text: "a".to_string(),
            sort: BrandSort::Name,
        },
    )
    .await;

    let names: Vec<_> = page.directory.brands.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Amazon", "Zara"]);
    assert_eq!(page.directory.available_letters, vec!["A", "N", "Z"]);
    assert_eq!(page.directory.groups.len(), 2);
}

#[tokio::test]
async fn brand_directory_popular_sort_uses_derived_counts() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", all_coupons()).await;
    mount_json(&server, "brand", brands()).await;

    let page = BrandsPage::load(
        &ctx(&server),
        &DirectoryQuery {
            text: String::new(),
            sort: BrandSort::Popular,
        },
    )
    .await;

    let counts: Vec<_> = page
        .directory
        .brands
        .iter()
        .map(|b| (b.name.as_str(), b.coupon_count))
        .collect();
    assert_eq!(counts, vec![("Amazon", 5), ("Nike", 2), ("Zara", 1)]);
}

#[tokio::test]
async fn unknown_brand_renders_empty_state() {
    let server = MockServer::start().await;
    mount_json(&server, "brand", json!([])).await;

    let page = BrandPage::load(&ctx(&server), "levis-jeans").await;

    assert_eq!(page.title, "Levis Jeans");
    assert!(page.brand.is_none());
    assert!(page.is_empty);
    assert!(page.unavailable.is_empty());
}

#[tokio::test]
async fn brand_page_lists_brand_coupons() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/brand")))
        .and(query_param("slug", "nike"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "name": "Nike", "slug": "nike", "description": "Just do it"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon")))
        .and(query_param("brand", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            coupon(1, "Nike 10% off", (7, "Nike"), (90, "Shoes")),
            coupon(2, "Nike free shipping", (7, "Nike"), (90, "Shoes")),
        ])))
        .mount(&server)
        .await;

    let page = BrandPage::load(&ctx(&server), "nike").await;

    assert_eq!(page.title, "Nike");
    assert_eq!(page.coupons.len(), 2);
    assert_eq!(page.brand.expect("brand card").count_label, "2 coupons");
    assert_eq!(page.description.as_deref(), Some("Just do it"));
}

// -----------------------------------------------------------------------
// Category pages
// -----------------------------------------------------------------------

#[tokio::test]
async fn unknown_category_is_not_found_even_with_coupons() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", all_coupons()).await;
    mount_json(&server, "coupon_category", categories()).await;

    let result = CategoryPage::load(&ctx(&server), "gadgets").await;
    assert!(matches!(
        result,
        Err(PageError::NotFound { kind: "category", ref slug }) if slug == "gadgets"
    ));
}

#[tokio::test]
async fn category_list_failure_is_unavailable() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", all_coupons()).await;
    mount_status(&server, "coupon_category", 503).await;

    let result = CategoryPage::load(&ctx(&server), "shoes").await;
    assert!(matches!(
        result,
        Err(PageError::Unavailable {
            what: "categories",
            source: CmsError::UnexpectedStatus { status: 503, .. }
        })
    ));
}

#[tokio::test]
async fn category_page_collects_brands_with_site_wide_counts() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon_category", categories()).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon")))
        .and(query_param_is_missing("coupon_category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(all_coupons()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon")))
        .and(query_param("coupon_category", "90"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([coupon(
            1,
            "Nike 10% off",
            (7, "Nike"),
            (90, "Shoes")
        )])))
        .mount(&server)
        .await;

    let page = CategoryPage::load(&ctx(&server), "shoes")
        .await
        .expect("category exists");

    assert_eq!(page.category.name, "Shoes");
    assert_eq!(page.coupons.len(), 1);
    assert_eq!(page.brands.len(), 1);
    assert_eq!(page.brands[0].name, "Nike");
    assert_eq!(page.brands[0].coupon_count, 2);
}

#[tokio::test]
async fn category_page_fills_in_brand_logos() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon_category", categories()).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon")))
        .and(query_param_is_missing("coupon_category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(all_coupons()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon")))
        .and(query_param("coupon_category", "90"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            coupon(1, "Nike 10% off", (7, "Nike"), (90, "Shoes")),
            coupon(2, "Nike free shipping", (7, "Nike"), (90, "Shoes")),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/brand")))
        .and(query_param("include", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "name": "Nike", "slug": "nike", "count": 5,
             "acf": {"brand_logo": {"url": "https://cdn.example.com/nike.png"}}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let page = CategoryPage::load(&ctx(&server), "shoes")
        .await
        .expect("category exists");

    assert_eq!(page.brands.len(), 1);
    assert!(matches!(
        &page.brands[0].mark,
        BrandMark::Logo { url, .. } if url == "https://cdn.example.com/nike.png"
    ));
    assert_eq!(page.brands[0].coupon_count, 2);
    assert!(page.unavailable.is_empty());
}

#[tokio::test]
async fn categories_page_strips_description_markup() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon_category", categories()).await;

    let page = CategoriesPage::load(&ctx(&server)).await;
    assert_eq!(page.categories.len(), 2);
    assert_eq!(page.categories[1].description.as_deref(), Some("Clothes"));
    assert!(!page.is_empty);
}

// -----------------------------------------------------------------------
// Search / coupon detail
// -----------------------------------------------------------------------

#[tokio::test]
async fn blank_search_is_prompt_without_requests() {
    let server = MockServer::start().await;

    let page = SearchPage::load(&ctx(&server), "   ").await;

    assert!(matches!(page, SearchPage::Prompt));
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn search_matches_all_three_kinds() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", all_coupons()).await;
    mount_json(&server, "coupon_category", categories()).await;
    mount_json(&server, "brand", brands()).await;

    let page = SearchPage::load(&ctx(&server), " Nike ").await;

    let SearchPage::Results {
        query,
        coupons,
        categories,
        brands,
        total,
        unavailable,
    } = page
    else {
        panic!("expected results");
    };
    assert_eq!(query, "Nike");
    assert_eq!(coupons.len(), 2);
    assert!(categories.is_empty());
    assert_eq!(brands.len(), 1);
    assert_eq!(total, 3);
    assert!(unavailable.is_empty());
}

#[tokio::test]
async fn search_filters_the_coupon_list_on_decoded_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon")))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            coupon(1, "H&amp;M 20% off", (12, "H&amp;M"), (91, "Fashion")),
            coupon(2, "Zara sale", (8, "Zara"), (91, "Fashion")),
        ])))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(&server, "coupon_category", categories()).await;
    mount_json(&server, "brand", brands()).await;

    let page = SearchPage::load(&ctx(&server), "h&m").await;

    let SearchPage::Results { coupons, total, .. } = page else {
        panic!("expected results");
    };
    let titles: Vec<_> = coupons.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["H&M 20% off"]);
    assert_eq!(total, 1);
}

#[tokio::test]
async fn unknown_coupon_is_not_found() {
    let server = MockServer::start().await;
    mount_json(&server, "coupon", json!([])).await;

    let result = CouponPage::load(&ctx(&server), "missing").await;
    assert!(matches!(result, Err(PageError::NotFound { kind: "coupon", .. })));
}

#[tokio::test]
async fn coupon_lookup_failure_is_unavailable() {
    let server = MockServer::start().await;
    mount_status(&server, "coupon", 500).await;

    let result = CouponPage::load(&ctx(&server), "coupon-1").await;
    assert!(matches!(
        result,
        Err(PageError::Unavailable {
            what: "coupon",
            source: CmsError::UnexpectedStatus { status: 500, .. }
        })
    ));
}

#[tokio::test]
async fn coupon_page_lists_related_coupons_from_same_brand() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon")))
        .and(query_param("slug", "coupon-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            coupon(1, "Nike 10% off", (7, "Nike"), (90, "Shoes"))
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/coupon")))
        .and(query_param("brand", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            coupon(1, "Nike 10% off", (7, "Nike"), (90, "Shoes")),
            coupon(2, "Nike free shipping", (7, "Nike"), (90, "Shoes")),
        ])))
        .mount(&server)
        .await;

    let page = CouponPage::load(&ctx(&server), "coupon-1")
        .await
        .expect("coupon exists");

    assert_eq!(page.coupon.id, 1);
    let related: Vec<_> = page.related.iter().map(|c| c.id).collect();
    assert_eq!(related, vec![2]);
}

// -----------------------------------------------------------------------
// Blog
// -----------------------------------------------------------------------

fn posts() -> Value {
    json!([
        {"id": 31, "slug": "spring-sales", "title": {"rendered": "Spring &amp; Easter sales"},
         "excerpt": {"rendered": "<p>Best deals</p>"}, "date": "2026-03-01T09:30:00"},
        {"id": 32, "slug": "gift-guide", "title": {"rendered": "Gift guide"}}
    ])
}

#[tokio::test]
async fn blog_page_lists_posts_with_plain_titles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/posts")))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(posts()))
        .mount(&server)
        .await;

    let page = BlogPage::load(&ctx(&server)).await;

    assert!(!page.is_empty);
    assert_eq!(page.posts.len(), 2);
    assert_eq!(page.posts[0].title, "Spring & Easter sales");
    assert_eq!(page.posts[0].excerpt.as_deref(), Some("Best deals"));
    assert!(page.unavailable.is_empty());
}

#[tokio::test]
async fn blog_page_failure_is_an_empty_unavailable_section() {
    let server = MockServer::start().await;
    mount_status(&server, "posts", 502).await;

    let page = BlogPage::load(&ctx(&server)).await;

    assert!(page.is_empty);
    assert_eq!(page.unavailable, vec!["posts"]);
}

#[tokio::test]
async fn post_page_resolves_slug() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/posts")))
        .and(query_param("slug", "gift-guide"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 32, "slug": "gift-guide", "title": {"rendered": "Gift guide"}}
        ])))
        .mount(&server)
        .await;

    let page = PostPage::load(&ctx(&server), "gift-guide")
        .await
        .expect("post exists");
    assert_eq!(page.post.id, 32);
}

#[tokio::test]
async fn unknown_post_is_not_found() {
    let server = MockServer::start().await;
    mount_json(&server, "posts", json!([])).await;

    let result = PostPage::load(&ctx(&server), "missing").await;
    assert!(matches!(
        result,
        Err(PageError::NotFound { kind: "post", ref slug }) if slug == "missing"
    ));
}

#[tokio::test]
async fn post_lookup_failure_is_unavailable() {
    let server = MockServer::start().await;
    mount_status(&server, "posts", 503).await;

    let result = PostPage::load(&ctx(&server), "gift-guide").await;
    assert!(matches!(
        result,
        Err(PageError::Unavailable {
            what: "post",
            source: CmsError::UnexpectedStatus { status: 503, .. }
        })
    ));
}
