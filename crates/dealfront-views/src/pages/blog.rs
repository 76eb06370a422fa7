use dealfront_cms::QueryOutcome;
use dealfront_core::Post;
use serde::Serialize;

use super::{PageContext, PageError, Unavailable};

#[derive(Debug, Clone, Serialize)]
pub struct BlogPage {
    pub posts: Vec<Post>,
    pub is_empty: bool,
    pub unavailable: Vec<&'static str>,
}

impl BlogPage {
    pub async fn load(ctx: &PageContext) -> Self {
        let mut unavailable = Unavailable::default();
        let posts = unavailable.take(
            "posts",
            ctx.settle("posts", ctx.client().posts(ctx.limits().blog_post_limit))
                .await,
        );
        Self {
            is_empty: posts.is_empty(),
            posts,
            unavailable: unavailable.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub post: Post,
}

impl PostPage {
    /// # Errors
    ///
    /// [`PageError::NotFound`] for an unknown slug, [`PageError::Unavailable`]
    /// when the lookup itself failed.
    pub async fn load(ctx: &PageContext, slug: &str) -> Result<Self, PageError> {
        match ctx.settle("post", ctx.client().post_by_slug(slug)).await {
            QueryOutcome::Loaded(Some(post)) => Ok(Self { post }),
            QueryOutcome::Loaded(None) => Err(PageError::NotFound {
                kind: "post",
                slug: slug.to_string(),
            }),
            QueryOutcome::Failed(source) => Err(PageError::Unavailable {
                what: "post",
                source,
            }),
        }
    }
}
