use serde::Serialize;

use super::{PageContext, Unavailable};
use crate::aggregate::{brand_coupon_counts, merge_brand_counts};
use crate::directory::{build_directory, BrandDirectory, DirectoryQuery};

#[derive(Debug, Clone, Serialize)]
pub struct BrandsPage {
    #[serde(flatten)]
    pub directory: BrandDirectory,
    pub unavailable: Vec<&'static str>,
}

impl BrandsPage {
    pub async fn load(ctx: &PageContext, query: &DirectoryQuery) -> Self {
        let client = ctx.client();
        let (brands, coupons) = tokio::join!(
            ctx.settle("brands", client.brands()),
            ctx.settle("coupons", client.coupons(ctx.limits().coupon_page_size)),
        );

        let mut unavailable = Unavailable::default();
        let brands = unavailable.take("brands", brands);
        let coupons = unavailable.take("coupons", coupons);

        let counted = merge_brand_counts(brands, &brand_coupon_counts(&coupons));
        Self {
            directory: build_directory(counted, query),
            unavailable: unavailable.into_inner(),
        }
    }
}
