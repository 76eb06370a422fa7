//! Command handlers: load a page, then print it as a table or as JSON.

use chrono::NaiveDate;
use dealfront_views::cards::{BrandCard, CategoryCard, CouponAction, CouponCard};
use dealfront_views::directory::DirectoryQuery;
use dealfront_views::pages::{
    BlogPage, BrandPage, BrandsPage, CategoriesPage, CategoryPage, CouponPage, HomePage,
    PostPage, SearchPage,
};
use dealfront_views::search::BrandSort;
use dealfront_views::PageContext;
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn warn_unavailable(unavailable: &[&str]) {
    if !unavailable.is_empty() {
        eprintln!(
            "warning: some sections could not be loaded: {}",
            unavailable.join(", ")
        );
    }
}

fn print_coupons(coupons: &[CouponCard]) {
    if coupons.is_empty() {
        println!("  (no coupons)");
        return;
    }
    println!("{:<40}{:<18}{:<10}{:<12}ACTION", "TITLE", "BRAND", "DISCOUNT", "EXPIRES");
    for card in coupons {
        let brand = card.brand.as_ref().map_or("-", |b| b.name.as_str());
        let discount = card.discount.as_deref().unwrap_or("-");
        let expires = if card.is_expired {
            "expired".to_string()
        } else {
            fmt_date(card.expires_on)
        };
        let action = match &card.action {
            CouponAction::CopyCode { code, .. } => format!("code {code}"),
            CouponAction::OpenDeal { .. } => "get deal".to_string(),
        };
        println!(
            "{:<40}{:<18}{:<10}{:<12}{}",
            card.title, brand, discount, expires, action
        );
    }
}

fn print_brands(brands: &[BrandCard]) {
    if brands.is_empty() {
        println!("  (no brands)");
        return;
    }
    println!("{:<30}{:<25}COUPONS", "BRAND", "SLUG");
    for card in brands {
        println!("{:<30}{:<25}{}", card.name, card.slug, card.count_label);
    }
}

fn print_categories(categories: &[CategoryCard]) {
    if categories.is_empty() {
        println!("  (no categories)");
        return;
    }
    println!("{:<30}{:<25}DESCRIPTION", "CATEGORY", "SLUG");
    for card in categories {
        println!(
            "{:<30}{:<25}{}",
            card.name,
            card.slug,
            card.description.as_deref().unwrap_or("")
        );
    }
}

pub(crate) async fn run_ping(ctx: &PageContext) -> anyhow::Result<()> {
    ctx.client().ping().await?;
    println!("content API reachable at {}", ctx.client().base_url());
    Ok(())
}

pub(crate) async fn run_home(ctx: &PageContext, json: bool) -> anyhow::Result<()> {
    let page = HomePage::load(ctx).await;
    if json {
        return print_json(&page);
    }
    warn_unavailable(&page.unavailable);
    println!(
        "{} coupons, {} brands, {} categories\n",
        page.stats.total_coupons, page.stats.total_brands, page.stats.total_categories
    );
    println!("Latest coupons");
    print_coupons(&page.latest_coupons);
    println!("\nPopular brands");
    print_brands(&page.popular_brands);
    Ok(())
}

pub(crate) async fn run_brands(
    ctx: &PageContext,
    text: String,
    sort: BrandSort,
    json: bool,
) -> anyhow::Result<()> {
    let page = BrandsPage::load(ctx, &DirectoryQuery { text, sort }).await;
    if json {
        return print_json(&page);
    }
    warn_unavailable(&page.unavailable);
    let dir = &page.directory;
    println!(
        "{} of {} brands (letters: {})",
        dir.brands.len(),
        dir.total_brands,
        dir.available_letters.join(" ")
    );
    if dir.groups.is_empty() {
        print_brands(&dir.brands);
    } else {
        for group in &dir.groups {
            println!("\n[{}]", group.letter);
            print_brands(&group.brands);
        }
    }
    Ok(())
}

pub(crate) async fn run_brand(ctx: &PageContext, slug: &str, json: bool) -> anyhow::Result<()> {
    let page = BrandPage::load(ctx, slug).await;
    if json {
        return print_json(&page);
    }
    warn_unavailable(&page.unavailable);
    println!("{}", page.title);
    if let Some(description) = &page.description {
        println!("{description}");
    }
    if page.is_empty {
        println!("no coupons for this brand right now");
        return Ok(());
    }
    print_coupons(&page.coupons);
    Ok(())
}

pub(crate) async fn run_categories(ctx: &PageContext, json: bool) -> anyhow::Result<()> {
    let page = CategoriesPage::load(ctx).await;
    if json {
        return print_json(&page);
    }
    warn_unavailable(&page.unavailable);
    print_categories(&page.categories);
    Ok(())
}

pub(crate) async fn run_category(
    ctx: &PageContext,
    slug: &str,
    json: bool,
) -> anyhow::Result<()> {
    let page = CategoryPage::load(ctx, slug).await?;
    if json {
        return print_json(&page);
    }
    warn_unavailable(&page.unavailable);
    println!("{}", page.category.name);
    if let Some(description) = &page.category.description {
        println!("{description}");
    }
    println!();
    print_coupons(&page.coupons);
    println!("\nBrands in this category");
    print_brands(&page.brands);
    Ok(())
}

pub(crate) async fn run_search(ctx: &PageContext, query: &str, json: bool) -> anyhow::Result<()> {
    let page = SearchPage::load(ctx, query).await;
    if json {
        return print_json(&page);
    }
    match page {
        SearchPage::Prompt => println!("enter a search term"),
        SearchPage::Results {
            query,
            coupons,
            categories,
            brands,
            total,
            unavailable,
        } => {
            warn_unavailable(&unavailable);
            println!("{total} results for '{query}'\n");
            println!("Coupons");
            print_coupons(&coupons);
            println!("\nCategories");
            print_categories(&categories);
            println!("\nBrands");
            print_brands(&brands);
        }
    }
    Ok(())
}

pub(crate) async fn run_coupon(ctx: &PageContext, slug: &str, json: bool) -> anyhow::Result<()> {
    let page = CouponPage::load(ctx, slug).await?;
    if json {
        return print_json(&page);
    }
    warn_unavailable(&page.unavailable);
    print_coupons(std::slice::from_ref(&page.coupon));
    if let Some(description) = &page.coupon.description {
        println!("\n{description}");
    }
    if !page.related.is_empty() {
        println!("\nMore from this brand");
        print_coupons(&page.related);
    }
    Ok(())
}

pub(crate) async fn run_posts(ctx: &PageContext, json: bool) -> anyhow::Result<()> {
    let page = BlogPage::load(ctx).await;
    if json {
        return print_json(&page);
    }
    warn_unavailable(&page.unavailable);
    if page.is_empty {
        println!("no posts published yet");
        return Ok(());
    }
    println!("{:<12}{:<40}SLUG", "PUBLISHED", "TITLE");
    for post in &page.posts {
        println!(
            "{:<12}{:<40}{}",
            fmt_date(post.published_at.map(|d| d.date())),
            post.title,
            post.slug
        );
    }
    Ok(())
}

pub(crate) async fn run_post(ctx: &PageContext, slug: &str, json: bool) -> anyhow::Result<()> {
    let page = PostPage::load(ctx, slug).await?;
    if json {
        return print_json(&page);
    }
    let post = &page.post;
    println!("{}", post.title);
    println!("published {}", fmt_date(post.published_at.map(|d| d.date())));
    if let Some(excerpt) = &post.excerpt {
        println!("\n{excerpt}");
    }
    Ok(())
}
