#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query},
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use http_body_util::BodyExt;
use serde_json::json;
use topmovies::{AppState, config::Config, models::NewMovie, router};
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-key-that-is-long-enough-for-signing";
pub const API_KEY: &str = "test-api-key";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    /// `name=value` part of the CSRF cookie, ready for a `Cookie` header.
    pub fn csrf_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(topmovies::csrf::COOKIE_NAME))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn csrf_token(&self) -> Option<String> {
        let marker = r#"name="csrf_token" value=""#;
        let start = self.body.find(marker)? + marker.len();
        let end = self.body[start..].find('"')?;
        Some(self.body[start..start + end].to_string())
    }
}

pub async fn spawn_app() -> TestApp {
    let tmdb_url = spawn_tmdb().await;
    let config = Config::from_vars(|key| match key {
        "SECRET_KEY" => Some(SECRET.to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "TMDB_API_KEY" => Some(API_KEY.to_string()),
        "TMDB_BASE_URL" => Some(tmdb_url.clone()),
        "TMDB_RPS" => Some("100".to_string()),
        _ => None,
    })
    .expect("test config");

    let state = AppState::from_config(config).await.expect("Failed to create app state");
    TestApp { router: router(state.clone()), state }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Loads a form page and returns the cookie and token needed to submit it.
    pub async fn form_session(&self, uri: &str) -> (String, String) {
        let page = self.get(uri).await;
        assert_eq!(page.status, StatusCode::OK, "GET {uri}: {}", page.body);
        (page.csrf_cookie().expect("csrf cookie"), page.csrf_token().expect("csrf token"))
    }

    pub async fn insert_movie(&self, title: &str, rating: Option<f64>) -> i32 {
        self.state
            .store
            .create(NewMovie {
                title: title.to_string(),
                year: 2002,
                description: format!("About {title}"),
                rating,
                ranking: None,
                review: None,
                image_url: format!("https://image.tmdb.org/t/p/w500/{title}.jpg"),
            })
            .await
            .unwrap()
            .id
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse { status, headers, body: String::from_utf8(bytes.to_vec()).unwrap() }
    }
}

/// Stub of the two TMDB endpoints the app calls, on an ephemeral local port.
async fn spawn_tmdb() -> String {
    let app = Router::new()
        .route("/search/movie", get(stub_search))
        .route("/movie/{id}", get(stub_details));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn authorized(params: &HashMap<String, String>) -> bool {
    params.get("api_key").map(String::as_str) == Some(API_KEY)
}

async fn stub_search(Query(params): Query<HashMap<String, String>>) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match params.get("query").map(String::as_str) {
        Some("Inception") => Json(json!({
            "page": 1,
            "results": [
                { "id": 27205, "title": "Inception", "release_date": "2010-07-15", "popularity": 83.9 },
                { "id": 64956, "title": "Inception: The Cobol Job", "release_date": "2010-12-07" }
            ],
            "total_results": 2
        }))
        .into_response(),
        Some("Outage") => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => Json(json!({ "page": 1, "results": [], "total_results": 0 })).into_response(),
    }
}

async fn stub_details(
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match id {
        27205 => Json(json!({ "id": 27205, "title": "Inception", "overview": "O", "backdrop_path": "/b.jpg" }))
            .into_response(),
        64956 => Json(json!({ "id": 64956, "overview": "Heist prequel", "backdrop_path": null }))
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
