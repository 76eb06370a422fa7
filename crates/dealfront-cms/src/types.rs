//! WordPress REST API response types for the coupon site's content.
//!
//! ## Observed shape
//!
//! ### ACF fields
//! Advanced Custom Fields are exposed under `acf`. When a record has no field
//! values WordPress serializes `acf` as an empty **array** (`[]`), not an
//! object, and individual empty fields come back as `false` or `""`. Every
//! ACF struct is therefore read through [`lenient_object`] and every ACF
//! scalar through the `lenient_*` helpers below.
//!
//! ### Embedded terms
//! With `_embed`, coupons carry `_embedded["wp:term"]`: an array of arrays,
//! one inner array per taxonomy registered on the post type. Terms include a
//! `taxonomy` field on current WordPress versions, but caches and proxies in
//! front of the CMS have been seen stripping it, so it is optional. Entries
//! are kept as raw JSON and parsed one by one during normalization.
//!
//! ### Featured media
//! `_embedded["wp:featuredmedia"]` may contain an error object
//! (`{"code": "rest_forbidden", ...}`) instead of a media record when the
//! attachment is private; `source_url` is optional for that reason.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A `{ "rendered": "..." }` wrapper used for titles, excerpts and content.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WpRendered {
    #[serde(default)]
    pub rendered: String,
}

/// A coupon post from `GET /coupon`.
#[derive(Debug, Deserialize)]
pub struct WpCoupon {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: WpRendered,
    #[serde(default)]
    pub excerpt: Option<WpRendered>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub acf: WpCouponAcf,
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<WpEmbedded>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WpCouponAcf {
    #[serde(default, deserialize_with = "lenient_string")]
    pub coupon_code: Option<String>,
    /// Free-form label; editors enter `"20%"`, `"$10"` or a bare number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub discount_amount: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub affiliate_link: Option<String>,
    /// ACF date picker value; format depends on the field's return format.
    #[serde(default, deserialize_with = "lenient_string")]
    pub expiry_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_featured: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub short_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub store_name: Option<String>,
}

/// The `_embedded` block of a coupon or post.
#[derive(Debug, Default, Deserialize)]
pub struct WpEmbedded {
    /// Term groups, one per taxonomy; entries parsed lazily as [`WpTerm`].
    #[serde(default, rename = "wp:term")]
    pub terms: Vec<Vec<Value>>,
    #[serde(default, rename = "wp:featuredmedia")]
    pub featured_media: Vec<WpMedia>,
}

/// A taxonomy term as embedded in a coupon. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct WpTerm {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub taxonomy: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub acf: WpBrandAcf,
}

#[derive(Debug, Default, Deserialize)]
pub struct WpMedia {
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// A term from `GET /brand`.
#[derive(Debug, Deserialize)]
pub struct WpBrand {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub acf: WpBrandAcf,
}

#[derive(Debug, Default, Deserialize)]
pub struct WpBrandAcf {
    #[serde(default, deserialize_with = "lenient_image")]
    pub brand_logo: Option<WpImage>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_website: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand_color: Option<String>,
}

/// ACF image field in "array" return format. A bare URL string is accepted too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WpImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// A term from `GET /coupon_category`.
#[derive(Debug, Deserialize)]
pub struct WpCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub acf: WpCategoryAcf,
}

#[derive(Debug, Default, Deserialize)]
pub struct WpCategoryAcf {
    #[serde(default, deserialize_with = "lenient_string")]
    pub category_icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_image")]
    pub category_image: Option<WpImage>,
}

/// A blog post from `GET /posts`.
#[derive(Debug, Deserialize)]
pub struct WpPost {
    pub id: i64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: WpRendered,
    #[serde(default)]
    pub excerpt: Option<WpRendered>,
    /// Site-local publish time, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<WpEmbedded>,
}

/// Deserializes an object into `T`, falling back to `T::default()` for `[]`,
/// `false`, `null` or an object that does not match.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    })
}

/// Strings pass through, numbers are stringified, anything else is `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// ACF true/false fields arrive as `true`, `1`, `"1"` or `"true"`.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => matches!(s.trim(), "1" | "true" | "yes"),
        _ => false,
    })
}

/// Image fields come back as an object, a URL string, an attachment id or `false`.
/// Only the first two carry a usable URL.
fn lenient_image<'de, D>(deserializer: D) -> Result<Option<WpImage>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value::<WpImage>(value)
            .ok()
            .filter(|img| !img.url.trim().is_empty()),
        Value::String(url) if !url.trim().is_empty() => Some(WpImage {
            url,
            ..WpImage::default()
        }),
        _ => None,
    })
}
