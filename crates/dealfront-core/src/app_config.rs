use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// REST root of the content API, without a trailing slash,
    /// e.g. `https://cms.example.com/wp-json/wp/v2`.
    pub cms_base_url: String,
    pub cms_auth_token: Option<String>,
    pub cms_request_timeout_secs: u64,
    pub cms_user_agent: String,
    pub cms_max_retries: u32,
    pub cms_retry_backoff_base_ms: u64,
    /// `0` disables the response cache.
    pub cms_cache_ttl_secs: u64,
    /// Upper bound on each query issued while assembling a page.
    pub page_deadline_secs: u64,
    pub coupon_page_size: u32,
    pub home_coupon_limit: usize,
    pub popular_brand_limit: usize,
    pub rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cms_base_url", &self.cms_base_url)
            .field(
                "cms_auth_token",
                &self.cms_auth_token.as_ref().map(|_| "[redacted]"),
            )
            .field("cms_request_timeout_secs", &self.cms_request_timeout_secs)
            .field("cms_user_agent", &self.cms_user_agent)
            .field("cms_max_retries", &self.cms_max_retries)
            .field("cms_retry_backoff_base_ms", &self.cms_retry_backoff_base_ms)
            .field("cms_cache_ttl_secs", &self.cms_cache_ttl_secs)
            .field("page_deadline_secs", &self.page_deadline_secs)
            .field("coupon_page_size", &self.coupon_page_size)
            .field("home_coupon_limit", &self.home_coupon_limit)
            .field("popular_brand_limit", &self.popular_brand_limit)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
