use serde::Serialize;

use super::{PageContext, Unavailable};
use crate::cards::CategoryCard;

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesPage {
    pub categories: Vec<CategoryCard>,
    pub is_empty: bool,
    pub unavailable: Vec<&'static str>,
}

impl CategoriesPage {
    pub async fn load(ctx: &PageContext) -> Self {
        let mut unavailable = Unavailable::default();
        let categories = unavailable.take(
            "categories",
            ctx.settle("categories", ctx.client().categories()).await,
        );
        let categories = CategoryCard::many(&categories);
        Self {
            is_empty: categories.is_empty(),
            categories,
            unavailable: unavailable.into_inner(),
        }
    }
}
