use axum::{
    extract::{
        Form, Path, Query, State,
        rejection::{FormRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    AppState, csrf,
    error::{AppError, AppResult},
    forms::{AddForm, EditForm, FieldErrors},
    models::{NewMovie, SENTINEL_REVIEW},
    templates,
};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: i32,
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let movies = state.store.list_ordered_by_rating().await?;
    Ok(Html(templates::index_page(&movies)))
}

pub async fn edit_form(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    jar: SignedCookieJar,
) -> AppResult<Response> {
    let Query(q) = query?;
    let movie = state.store.get(q.id).await?;

    let rating = movie.rating.map(|r| r.to_string()).unwrap_or_default();
    let review = movie.review.clone().filter(|r| r != SENTINEL_REVIEW).unwrap_or_default();

    let (jar, token) = csrf::issue(jar);
    let body = templates::edit_page(&movie, &rating, &review, &FieldErrors::default(), &token);
    Ok((jar, Html(body)).into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
    jar: SignedCookieJar,
    form: Result<Form<EditForm>, FormRejection>,
) -> AppResult<Response> {
    let Query(q) = query?;
    let Form(form) = form?;
    csrf::verify(&jar, &form.csrf_token)?;

    let movie = state.store.get(q.id).await?;
    match form.validate() {
        Ok(valid) => {
            state.store.update_rating_review(movie.id, valid.rating, valid.review).await?;
            Ok(Redirect::to("/").into_response())
        },
        Err(errors) => {
            debug!(movie_id = movie.id, errors = ?errors, "edit form rejected");
            let (jar, token) = csrf::issue(jar);
            let body = templates::edit_page(&movie, &form.rating, &form.review, &errors, &token);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response())
        },
    }
}

pub async fn delete(
    State(state): State<AppState>,
    query: Result<Query<IdQuery>, QueryRejection>,
) -> AppResult<Redirect> {
    let Query(q) = query?;
    state.store.delete(q.id).await?;
    info!(movie_id = q.id, "movie deleted");
    Ok(Redirect::to("/"))
}

pub async fn add_form(jar: SignedCookieJar) -> Response {
    let (jar, token) = csrf::issue(jar);
    (jar, Html(templates::add_page("", &FieldErrors::default(), &token))).into_response()
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<AddForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;
    csrf::verify(&jar, &form.csrf_token)?;

    let title = match form.validate() {
        Ok(title) => title,
        Err(errors) => {
            let (jar, token) = csrf::issue(jar);
            let body = templates::add_page(&form.title, &errors, &token);
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(body)).into_response());
        },
    };

    let results = state.tmdb.search_by_title(&title).await?;
    Ok(Html(templates::select_page(&title, &results)).into_response())
}

pub async fn entry(
    State(state): State<AppState>,
    path: Result<Path<(i64, String, String)>, PathRejection>,
) -> AppResult<Redirect> {
    let Path((external_id, release_date, title)) = path?;
    let year = parse_release_year(&release_date)?;

    let details = state.tmdb.fetch_details(external_id).await?;
    let movie = state
        .store
        .create(NewMovie {
            title,
            year,
            description: details.overview,
            rating: Some(0.0),
            ranking: Some(0),
            review: Some(SENTINEL_REVIEW.to_string()),
            image_url: state.tmdb.image_url(&details.backdrop_path),
        })
        .await?;

    info!(movie_id = movie.id, external_id = external_id, title = %movie.title, "movie imported");
    Ok(Redirect::to("/"))
}

/// Year from a provider release date such as `2010-07-15` or a bare `2010`.
fn parse_release_year(release_date: &str) -> AppResult<i32> {
    release_date
        .get(..4)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|prefix| prefix.parse().ok())
        .ok_or_else(|| {
            AppError::BadRequest(format!("\"{release_date}\" does not start with a release year"))
        })
}
