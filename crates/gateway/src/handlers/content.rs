//! Public content handlers

use axum::{extract::State, Json};

use crate::AppState;
use portfolio_common::{
    db::Repository,
    errors::Result,
    schema::{Project, Record, Skill},
};

async fn list_all<T: Record>(state: &AppState) -> Result<Json<Vec<T>>> {
    let repo = Repository::<T>::from_state(state.db.as_ref())?;
    Ok(Json(repo.fetch_all().await?))
}

/// All portfolio projects
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    list_all(&state).await
}

/// All skills
pub async fn list_skills(State(state): State<AppState>) -> Result<Json<Vec<Skill>>> {
    list_all(&state).await
}
