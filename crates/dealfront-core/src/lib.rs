mod app_config;
mod config;
pub mod entities;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use entities::{
    initial, Brand, BrandWithCount, Category, Coupon, CouponAttributes, EmbeddedTerm, Logo, Post,
    SiteStats, TaxonomyKind,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
