use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::models::{Coach, GymClass};
use crate::repositories::{ClassRepository, CoachRepository};

#[derive(Clone)]
pub struct HomeState {
    pub coach_repo: CoachRepository,
    pub class_repo: ClassRepository,
}

#[derive(Template)]
#[template(path = "site/index.html")]
struct HomeTemplate {
    coaches: Vec<Coach>,
    classes: Vec<GymClass>,
}

pub async fn index(State(state): State<HomeState>) -> Result<Response> {
    // Landing page previews: a few coaches and the next classes on the schedule
    let mut coaches = state.coach_repo.find_all().await?;
    coaches.truncate(4);
    let mut classes = state.class_repo.find_all().await?;
    classes.truncate(3);

    let template = HomeTemplate { coaches, classes };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}
