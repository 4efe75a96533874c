use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::product::PRODUCT_CATEGORIES;
use crate::models::{Product, ProductCategory, ProductForm};
use crate::repositories::ProductRepository;

#[derive(Clone)]
pub struct ProductsState {
    pub product_repo: ProductRepository,
}

#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard/products/list.html")]
struct ProductsListTemplate {
    user: AuthUser,
    products: Vec<Product>,
    categories: &'static [ProductCategory],
    q: String,
    category: String,
}

#[derive(Template)]
#[template(path = "dashboard/products/new.html")]
struct NewProductTemplate {
    user: AuthUser,
    categories: &'static [ProductCategory],
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard/products/edit.html")]
struct EditProductTemplate {
    user: AuthUser,
    product: Product,
    categories: &'static [ProductCategory],
    error: Option<String>,
}

fn validate(form: &ProductForm) -> Option<&'static str> {
    if form.name.trim().is_empty() {
        return Some("Product name is required");
    }
    if form.price_cents < 0 {
        return Some("Price cannot be negative");
    }
    if form.stock < 0 {
        return Some("Stock cannot be negative");
    }
    None
}

pub async fn list(
    State(state): State<ProductsState>,
    auth_user: AuthUser,
    Query(query): Query<ProductsQuery>,
) -> Result<Response> {
    let q = query.q.unwrap_or_default();
    let category = query.category.unwrap_or_else(|| "all".to_string());
    let category_filter = match category.as_str() {
        "all" | "" => None,
        c => Some(ProductCategory::parse(c)),
    };

    let products = state.product_repo.search(&q, category_filter).await?;

    let template = ProductsListTemplate {
        user: auth_user,
        products,
        categories: PRODUCT_CATEGORIES,
        q,
        category,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn new_page(auth_user: AuthUser) -> Result<Response> {
    let template = NewProductTemplate {
        user: auth_user,
        categories: PRODUCT_CATEGORIES,
        error: None,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn create(
    State(state): State<ProductsState>,
    auth_user: AuthUser,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    if let Some(error) = validate(&form) {
        let template = NewProductTemplate {
            user: auth_user,
            categories: PRODUCT_CATEGORIES,
            error: Some(error.to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    state.product_repo.create(&form).await?;

    Ok(Redirect::to("/dashboard/products").into_response())
}

pub async fn edit_page(
    State(state): State<ProductsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let product = state
        .product_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let template = EditProductTemplate {
        user: auth_user,
        product,
        categories: PRODUCT_CATEGORIES,
        error: None,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn update(
    State(state): State<ProductsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let product = state
        .product_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    if let Some(error) = validate(&form) {
        let template = EditProductTemplate {
            user: auth_user,
            product,
            categories: PRODUCT_CATEGORIES,
            error: Some(error.to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    state.product_repo.update(&id, &form).await?;

    Ok(Redirect::to("/dashboard/products").into_response())
}

pub async fn delete(
    State(state): State<ProductsState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let deleted = state.product_repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    Ok(Redirect::to("/dashboard/products").into_response())
}
