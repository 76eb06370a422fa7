use dealfront_cms::QueryOutcome;
use dealfront_core::TaxonomyKind;
use serde::Serialize;

use super::{PageContext, PageError, Unavailable};
use crate::cards::CouponCard;

/// Other coupons from the same brand shown under a coupon.
const RELATED_LIMIT: u32 = 4;

#[derive(Debug, Clone, Serialize)]
pub struct CouponPage {
    pub coupon: CouponCard,
    pub related: Vec<CouponCard>,
    pub unavailable: Vec<&'static str>,
}

impl CouponPage {
    /// # Errors
    ///
    /// [`PageError::NotFound`] for an unknown slug, [`PageError::Unavailable`]
    /// when the lookup itself failed.
    pub async fn load(ctx: &PageContext, slug: &str) -> Result<Self, PageError> {
        let client = ctx.client();
        let coupon = match ctx.settle("coupon", client.coupon_by_slug(slug)).await {
            QueryOutcome::Loaded(Some(coupon)) => coupon,
            QueryOutcome::Loaded(None) => {
                return Err(PageError::NotFound {
                    kind: "coupon",
                    slug: slug.to_string(),
                })
            }
            QueryOutcome::Failed(source) => {
                return Err(PageError::Unavailable {
                    what: "coupon",
                    source,
                })
            }
        };

        let mut unavailable = Unavailable::default();
        let related = match coupon.primary_brand().and_then(|t| t.id) {
            Some(brand_id) => unavailable.take(
                "related",
                ctx.settle(
                    "related",
                    client.coupons_in_term(TaxonomyKind::Brand, brand_id, RELATED_LIMIT + 1),
                )
                .await,
            ),
            None => Vec::new(),
        };

        let today = ctx.today();
        let related: Vec<_> = related
            .iter()
            .filter(|c| c.id != coupon.id)
            .take(RELATED_LIMIT as usize)
            .map(|c| CouponCard::new(c, today))
            .collect();

        Ok(Self {
            coupon: CouponCard::new(&coupon, today),
            related,
            unavailable: unavailable.into_inner(),
        })
    }
}
