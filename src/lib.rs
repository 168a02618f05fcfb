pub mod config;
pub mod csrf;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::{sync::Arc, time::Duration};

use axum::{Router, extract::FromRef, routing::get};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub tmdb: Arc<TmdbClient>,
    pub cookie_key: Key,
}

impl AppState {
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("topmovies/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        let db = db::connect_and_migrate(&config.database_url).await?;

        let tmdb = TmdbClient::new(
            http,
            config.tmdb_api_key.clone(),
            config.tmdb_base_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.tmdb_rps,
        );

        let cookie_key = Key::derive_from(config.secret_key.as_bytes());

        Ok(Self {
            config: Arc::new(config),
            store: MovieStore::new(db),
            tmdb: Arc::new(tmdb),
            cookie_key,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/edit", get(routes::edit_form).post(routes::edit_submit))
        .route("/delete", get(routes::delete).post(routes::delete))
        .route("/add", get(routes::add_form).post(routes::add_submit))
        .route("/entry/{external_id}/{year}/{title}", get(routes::entry))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
