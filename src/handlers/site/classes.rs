use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::gym_class::{ClassCategory, CLASS_CATEGORIES, DAYS_OF_WEEK};
use crate::models::GymClass;
use crate::repositories::ClassRepository;

#[derive(Clone)]
pub struct ScheduleState {
    pub class_repo: ClassRepository,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub day: Option<String>,
    pub category: Option<String>,
    pub booked: Option<String>,
    pub full: Option<String>,
}

#[derive(Template)]
#[template(path = "site/classes.html")]
struct ScheduleTemplate {
    classes: Vec<GymClass>,
    categories: &'static [ClassCategory],
    days: &'static [&'static str],
    selected_day: String,
    selected_category: String,
    booked: bool,
    full: bool,
}

pub async fn index(
    State(state): State<ScheduleState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response> {
    let selected_day = query.day.unwrap_or_else(|| "All".to_string());
    let selected_category = query.category.unwrap_or_else(|| "all".to_string());

    let day_filter = if selected_day == "All" {
        None
    } else {
        Some(selected_day.as_str())
    };
    let classes = state.class_repo.search("", day_filter).await?;

    // Category keyword filtering happens in memory: it matches names OR
    // descriptions, which a LIKE on one column cannot express cleanly.
    let classes = if selected_category == "all" {
        classes
    } else {
        classes
            .into_iter()
            .filter(|c| c.matches_category(&selected_category))
            .collect()
    };

    let template = ScheduleTemplate {
        classes,
        categories: CLASS_CATEGORIES,
        days: DAYS_OF_WEEK,
        selected_day,
        selected_category,
        booked: query.booked.is_some(),
        full: query.full.is_some(),
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn book(
    State(state): State<ScheduleState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state
        .class_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

    if state.class_repo.book(&id).await? {
        Ok(Redirect::to("/classes?booked=1").into_response())
    } else {
        // Capacity guard bounced the booking
        Ok(Redirect::to("/classes?full=1").into_response())
    }
}
