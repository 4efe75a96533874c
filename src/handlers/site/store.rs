use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::product::PRODUCT_CATEGORIES;
use crate::models::{Product, ProductCategory};
use crate::repositories::ProductRepository;

#[derive(Clone)]
pub struct StoreState {
    pub product_repo: ProductRepository,
}

#[derive(Debug, Deserialize)]
pub struct StoreQuery {
    pub category: Option<String>,
}

#[derive(Template)]
#[template(path = "site/store.html")]
struct StoreTemplate {
    products: Vec<Product>,
    featured: Vec<Product>,
    categories: &'static [ProductCategory],
}

pub async fn index(
    State(state): State<StoreState>,
    Query(query): Query<StoreQuery>,
) -> Result<Response> {
    let selected_category = query.category.unwrap_or_else(|| "all".to_string());
    let category_filter = if selected_category == "all" {
        None
    } else {
        Some(ProductCategory::parse(&selected_category))
    };

    let products = state.product_repo.find_active(category_filter).await?;

    // Featured shelf: first three of the full storefront
    let mut featured = state.product_repo.find_active(None).await?;
    featured.truncate(3);

    let template = StoreTemplate {
        products,
        featured,
        categories: PRODUCT_CATEGORIES,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}
