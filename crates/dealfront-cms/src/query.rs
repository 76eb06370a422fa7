use dealfront_core::TaxonomyKind;

/// The WordPress API caps `per_page` at 100.
pub const MAX_PER_PAGE: u32 = 100;

/// Collection endpoints under the `wp/v2` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Coupon,
    Brand,
    CouponCategory,
    Post,
}

impl ContentKind {
    /// Path segment appended to the API base URL.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            ContentKind::Coupon => "coupon",
            ContentKind::Brand => "brand",
            ContentKind::CouponCategory => "coupon_category",
            ContentKind::Post => "posts",
        }
    }
}

/// Query parameters for one collection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub kind: ContentKind,
    pub per_page: Option<u32>,
    pub slug: Option<String>,
    pub include: Vec<i64>,
    pub term_filter: Option<(TaxonomyKind, i64)>,
    pub embed: bool,
}

impl ContentQuery {
    #[must_use]
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            per_page: None,
            slug: None,
            include: Vec::new(),
            term_filter: None,
            embed: false,
        }
    }

    /// Clamped to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page.clamp(1, MAX_PER_PAGE));
        self
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub fn include(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.include.extend(ids);
        self
    }

    /// Restricts to posts tagged with term `id` of `taxonomy`.
    #[must_use]
    pub fn in_term(mut self, taxonomy: TaxonomyKind, id: i64) -> Self {
        self.term_filter = Some((taxonomy, id));
        self
    }


    /// Asks the API to inline linked terms and featured media (`_embed`).
    #[must_use]
    pub fn embed(mut self) -> Self {
        self.embed = true;
        self
    }

    /// Query-string pairs in a stable order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(slug) = &self.slug {
            params.push(("slug", slug.clone()));
        }
        if !self.include.is_empty() {
            let ids: Vec<String> = self.include.iter().map(ToString::to_string).collect();
            params.push(("include", ids.join(",")));
        }
        if let Some((taxonomy, id)) = self.term_filter {
            if let Some(base) = taxonomy.rest_base() {
                params.push((base, id.to_string()));
            }
        }
        if self.embed {
            params.push(("_embed", "1".to_string()));
        }
        params
    }

    /// Short description for log lines and error context.
    #[must_use]
    pub fn describe(&self) -> String {
        let params: Vec<String> = self
            .params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        format!("{}({})", self.kind.path(), params.join(","))
    }
}
