use crate::actions;
use crate::auth::CurrentUser;
use crate::checkins;
use crate::board::ensure_defaults_and_fetch;
use crate::errors::AppError;
use crate::models::{
    HabitBoard, HabitId, MoodRow, NewHabitRequest, NewMoodRequest, NewReflectionRequest,
    ReflectionRow, ReflectionWeek, StatsResponse, UserId,
};
use crate::reflections;
use crate::state::AppState;
use crate::stats::build_stats;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use chrono::{Local, NaiveDate};

pub async fn index(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Html<String>, AppError> {
    let board = fetch_board(&state, user_id).await?;
    Ok(Html(render_index(&board)))
}

pub async fn get_habits(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<HabitBoard>, AppError> {
    Ok(Json(fetch_board(&state, user_id).await?))
}

pub async fn create_habit(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<HabitBoard>), AppError> {
    actions::add_habit(state.store.as_ref(), user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(fetch_board(&state, user_id).await?)))
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(habit_id): Path<HabitId>,
) -> Result<Json<HabitBoard>, AppError> {
    apply_toggle(&state, user_id, habit_id).await?;
    Ok(Json(fetch_board(&state, user_id).await?))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(habit_id): Path<HabitId>,
) -> Result<Json<HabitBoard>, AppError> {
    apply_delete(&state, user_id, habit_id).await?;
    Ok(Json(fetch_board(&state, user_id).await?))
}

pub async fn get_stats(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = build_stats(state.store.as_ref(), user_id, today()).await?;
    Ok(Json(stats))
}

pub async fn create_mood(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<NewMoodRequest>,
) -> Result<(StatusCode, Json<MoodRow>), AppError> {
    let mood = checkins::check_in(state.store.as_ref(), user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(mood)))
}

pub async fn get_moods(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<MoodRow>>, AppError> {
    Ok(Json(checkins::recent(state.store.as_ref(), user_id).await?))
}

pub async fn create_reflection(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<NewReflectionRequest>,
) -> Result<(StatusCode, Json<ReflectionRow>), AppError> {
    let reflection =
        reflections::reflect(state.store.as_ref(), user_id, payload, today()).await?;
    Ok((StatusCode::CREATED, Json(reflection)))
}

pub async fn get_reflections(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<Vec<ReflectionWeek>>, AppError> {
    let weeks = reflections::reflections_by_week(state.store.as_ref(), user_id, today()).await?;
    Ok(Json(weeks))
}

pub async fn form_add(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Form(payload): Form<NewHabitRequest>,
) -> Result<Redirect, AppError> {
    actions::add_habit(state.store.as_ref(), user_id, payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_toggle(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(habit_id): Path<HabitId>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state, user_id, habit_id).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_delete(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(habit_id): Path<HabitId>,
) -> Result<Redirect, AppError> {
    apply_delete(&state, user_id, habit_id).await?;
    Ok(Redirect::to("/"))
}

async fn fetch_board(state: &AppState, user_id: UserId) -> Result<HabitBoard, AppError> {
    Ok(ensure_defaults_and_fetch(state.store.as_ref(), user_id, today()).await?)
}

async fn apply_toggle(state: &AppState, user_id: UserId, habit_id: HabitId) -> Result<(), AppError> {
    let _saving = state
        .begin_saving(habit_id)
        .ok_or_else(|| AppError::conflict("habit is already being saved"))?;
    actions::toggle(state.store.as_ref(), user_id, habit_id, today()).await?;
    Ok(())
}

async fn apply_delete(state: &AppState, user_id: UserId, habit_id: HabitId) -> Result<(), AppError> {
    let _saving = state
        .begin_saving(habit_id)
        .ok_or_else(|| AppError::conflict("habit is already being saved"))?;
    actions::delete_habit(state.store.as_ref(), user_id, habit_id).await?;
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
