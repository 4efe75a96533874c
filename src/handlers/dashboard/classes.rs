use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::gym_class::{ClassLevel, CLASS_LEVELS, DAYS_OF_WEEK};
use crate::models::{ClassForm, Coach, GymClass};
use crate::repositories::{ClassRepository, CoachRepository};

#[derive(Clone)]
pub struct ClassesAdminState {
    pub class_repo: ClassRepository,
    pub coach_repo: CoachRepository,
}

#[derive(Debug, Deserialize)]
pub struct ClassesQuery {
    pub q: Option<String>,
    pub day: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard/classes/list.html")]
struct ClassesListTemplate {
    user: AuthUser,
    classes: Vec<GymClass>,
    days: &'static [&'static str],
    q: String,
    day: String,
}

#[derive(Template)]
#[template(path = "dashboard/classes/new.html")]
struct NewClassTemplate {
    user: AuthUser,
    coaches: Vec<Coach>,
    days: &'static [&'static str],
    levels: &'static [ClassLevel],
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard/classes/edit.html")]
struct EditClassTemplate {
    user: AuthUser,
    gym_class: GymClass,
    coaches: Vec<Coach>,
    days: &'static [&'static str],
    levels: &'static [ClassLevel],
    error: Option<String>,
}

fn validate(form: &ClassForm) -> Option<&'static str> {
    if form.name.trim().is_empty() {
        return Some("Class name is required");
    }
    if form.max_capacity <= 0 {
        return Some("Capacity must be positive");
    }
    None
}

/// The class keeps a snapshot of the coach's name; an unknown or missing
/// coach id falls back to "TBA", as the schedule board does.
async fn coach_name_for(state: &ClassesAdminState, coach_id: &str) -> Result<String> {
    Ok(state
        .coach_repo
        .find_by_id(coach_id)
        .await?
        .map(|c| c.full_name)
        .unwrap_or_else(|| "TBA".to_string()))
}

pub async fn list(
    State(state): State<ClassesAdminState>,
    auth_user: AuthUser,
    Query(query): Query<ClassesQuery>,
) -> Result<Response> {
    let q = query.q.unwrap_or_default();
    let day = query.day.unwrap_or_else(|| "all".to_string());
    let day_filter = match day.as_str() {
        "all" | "" => None,
        d => Some(d),
    };

    let classes = state.class_repo.search(&q, day_filter).await?;

    let template = ClassesListTemplate {
        user: auth_user,
        classes,
        days: DAYS_OF_WEEK,
        q,
        day,
    };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

pub async fn new_page(
    State(state): State<ClassesAdminState>,
    auth_user: AuthUser,
) -> Result<Response> {
    let coaches = state.coach_repo.find_all().await?;

    let template = NewClassTemplate {
        user: auth_user,
        coaches,
        days: DAYS_OF_WEEK,
        levels: CLASS_LEVELS,
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
    State(state): State<ClassesAdminState>,
    auth_user: AuthUser,
    Form(form): Form<ClassForm>,
) -> Result<Response> {
    if let Some(error) = validate(&form) {
        let coaches = state.coach_repo.find_all().await?;
        let template = NewClassTemplate {
            user: auth_user,
            coaches,
            days: DAYS_OF_WEEK,
            levels: CLASS_LEVELS,
            error: Some(error.to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    let coach_name = coach_name_for(&state, &form.coach_id).await?;
    state.class_repo.create(&form, &coach_name).await?;

    Ok(Redirect::to("/dashboard/classes").into_response())
}

pub async fn edit_page(
    State(state): State<ClassesAdminState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let gym_class = state
        .class_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

    let coaches = state.coach_repo.find_all().await?;

    let template = EditClassTemplate {
        user: auth_user,
        gym_class,
        coaches,
        days: DAYS_OF_WEEK,
        levels: CLASS_LEVELS,
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
    State(state): State<ClassesAdminState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    Form(form): Form<ClassForm>,
) -> Result<Response> {
    let gym_class = state
        .class_repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

    if let Some(error) = validate(&form) {
        let coaches = state.coach_repo.find_all().await?;
        let template = EditClassTemplate {
            user: auth_user,
            gym_class,
            coaches,
            days: DAYS_OF_WEEK,
            levels: CLASS_LEVELS,
            error: Some(error.to_string()),
        };
        return Ok(Html(
            template
                .render()
                .map_err(|e| AppError::Internal(e.to_string()))?,
        )
        .into_response());
    }

    // Reassigning the coach refreshes the name snapshot; otherwise keep it
    let coach_name = if form.coach_id == gym_class.coach_id {
        gym_class.coach_name.clone()
    } else {
        coach_name_for(&state, &form.coach_id).await?
    };
    state.class_repo.update(&id, &form, &coach_name).await?;

    Ok(Redirect::to("/dashboard/classes").into_response())
}

pub async fn delete(
    State(state): State<ClassesAdminState>,
    _auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let deleted = state.class_repo.delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound("Class not found".to_string()));
    }

    Ok(Redirect::to("/dashboard/classes").into_response())
}
