use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::models::Coach;
use crate::repositories::CoachRepository;

#[derive(Clone)]
pub struct CoachesState {
    pub coach_repo: CoachRepository,
}

#[derive(Template)]
#[template(path = "site/coaches.html")]
struct CoachesTemplate {
    featured: Option<Coach>,
    coaches: Vec<Coach>,
}

pub async fn index(State(state): State<CoachesState>) -> Result<Response> {
    // Best-rated coach gets the spotlight, the rest fill the grid
    let mut coaches = state.coach_repo.find_all().await?;
    let featured = if coaches.is_empty() {
        None
    } else {
        Some(coaches.remove(0))
    };

    let template = CoachesTemplate { featured, coaches };

    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}
