//! Page endpoints. Each one loads a view model and wraps it in the envelope.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use dealfront_views::directory::DirectoryQuery;
use dealfront_views::pages::{
    BlogPage, BrandPage, BrandsPage, CategoriesPage, CategoryPage, CouponPage, HomePage,
    PostPage, SearchPage,
};
use dealfront_views::search::BrandSort;
use serde::Deserialize;

use super::{ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

type PageResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub(super) struct BrandsParams {
    q: Option<String>,
    sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchParams {
    q: Option<String>,
}

pub(super) async fn home(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<HomePage>> {
    ApiResponse::new(&req_id, HomePage::load(&state.pages).await)
}

pub(super) async fn list_brands(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<BrandsParams>,
) -> PageResult<BrandsPage> {
    let sort = params
        .sort
        .as_deref()
        .unwrap_or_default()
        .parse::<BrandSort>()
        .map_err(|msg| ApiError::new(&req_id, "validation_error", msg))?;
    let query = DirectoryQuery {
        text: params.q.unwrap_or_default(),
        sort,
    };
    Ok(ApiResponse::new(
        &req_id,
        BrandsPage::load(&state.pages, &query).await,
    ))
}

pub(super) async fn get_brand(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Json<ApiResponse<BrandPage>> {
    ApiResponse::new(&req_id, BrandPage::load(&state.pages, &slug).await)
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<CategoriesPage>> {
    ApiResponse::new(&req_id, CategoriesPage::load(&state.pages).await)
}

pub(super) async fn get_category(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> PageResult<CategoryPage> {
    let page = CategoryPage::load(&state.pages, &slug)
        .await
        .map_err(|e| ApiError::from_page(&req_id, &e))?;
    Ok(ApiResponse::new(&req_id, page))
}

pub(super) async fn get_coupon(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> PageResult<CouponPage> {
    let page = CouponPage::load(&state.pages, &slug)
        .await
        .map_err(|e| ApiError::from_page(&req_id, &e))?;
    Ok(ApiResponse::new(&req_id, page))
}

pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<SearchPage>> {
    let raw = params.q.unwrap_or_default();
    ApiResponse::new(&req_id, SearchPage::load(&state.pages, &raw).await)
}

pub(super) async fn list_posts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<BlogPage>> {
    ApiResponse::new(&req_id, BlogPage::load(&state.pages).await)
}

pub(super) async fn get_post(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> PageResult<PostPage> {
    let page = PostPage::load(&state.pages, &slug)
        .await
        .map_err(|e| ApiError::from_page(&req_id, &e))?;
    Ok(ApiResponse::new(&req_id, page))
}
