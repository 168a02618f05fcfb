use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("movie {0} not found")]
    NotFound(i32),

    #[error("a movie titled \"{0}\" already exists")]
    Conflict(String),

    #[error("movie search unavailable, try again")]
    Upstream(#[source] reqwest::Error),

    #[error("unexpected response from the movie database: {0}")]
    Data(String),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream(_) | Self::Data(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Internal(_) => "something went wrong".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() { Self::Data(err.to_string()) } else { Self::Upstream(err) }
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(err: axum::extract::rejection::QueryRejection) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(err: axum::extract::rejection::PathRejection) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl From<axum::extract::rejection::FormRejection> for AppError {
    fn from(err: axum::extract::rejection::FormRejection) -> Self {
        Self::BadRequest(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Upstream(source) => tracing::warn!(error = %source, "upstream request failed"),
            Self::Database(err) => tracing::error!(error = %err, "database error"),
            Self::Internal(err) => tracing::error!(error = ?err, "internal error"),
            other => tracing::warn!(status = status.as_u16(), error = %other, "request failed"),
        }

        let body = crate::templates::error_page(status, &self.public_message());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
