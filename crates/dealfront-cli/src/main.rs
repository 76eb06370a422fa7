mod show;

use clap::{Parser, Subcommand};
use dealfront_cms::CmsClient;
use dealfront_views::search::BrandSort;
use dealfront_views::PageContext;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dealfront-cli")]
#[command(about = "Inspect coupon site pages assembled from the content API")]
struct Cli {
    /// Print the full view model as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the content API answers
    Ping,
    /// Latest coupons, popular brands and site totals
    Home,
    /// Brand directory
    Brands {
        /// Case-insensitive name filter
        #[arg(long, short)]
        query: Option<String>,
        /// Sort order: name or popular
        #[arg(long, default_value = "name")]
        sort: BrandSort,
    },
    /// Coupons for one brand
    Brand { slug: String },
    /// All coupon categories
    Categories,
    /// Coupons and brands in one category
    Category { slug: String },
    /// Search coupons, categories and brands
    Search { query: String },
    /// One coupon with related offers
    Coupon { slug: String },
    /// Latest blog posts, or one post by slug
    Posts { slug: Option<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dealfront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = CmsClient::new(&config)?;
    let ctx = PageContext::from_app_config(client, &config);
    let json = cli.json;

    match cli.command {
        Some(Commands::Ping) => show::run_ping(&ctx).await,
        Some(Commands::Home) => show::run_home(&ctx, json).await,
        Some(Commands::Brands { query, sort }) => {
            show::run_brands(&ctx, query.unwrap_or_default(), sort, json).await
        }
        Some(Commands::Brand { slug }) => show::run_brand(&ctx, &slug, json).await,
        Some(Commands::Categories) => show::run_categories(&ctx, json).await,
        Some(Commands::Category { slug }) => show::run_category(&ctx, &slug, json).await,
        Some(Commands::Search { query }) => show::run_search(&ctx, &query, json).await,
        Some(Commands::Coupon { slug }) => show::run_coupon(&ctx, &slug, json).await,
        Some(Commands::Posts { slug: None }) => show::run_posts(&ctx, json).await,
        Some(Commands::Posts { slug: Some(slug) }) => show::run_post(&ctx, &slug, json).await,
        None => {
            println!("no command given; try `dealfront-cli --help`");
            Ok(())
        }
    }
}
