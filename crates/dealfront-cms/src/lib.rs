pub mod client;
pub mod error;
pub mod normalize;
pub mod outcome;
pub mod query;
mod retry;
pub mod text;
pub mod types;

pub use client::{CmsClient, CmsSettings};
pub use error::CmsError;
pub use normalize::{normalize_brand, normalize_category, normalize_coupon, normalize_post};
pub use outcome::QueryOutcome;
pub use query::{ContentKind, ContentQuery};
