pub use crate::entities::movie::Model as Movie;

/// Review text stored on freshly imported movies until the user rates them.
pub const SENTINEL_REVIEW: &str = "NULL";

#[derive(Clone, Debug)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub description: String,
    pub rating: Option<f64>,
    pub ranking: Option<i32>,
    pub review: Option<String>,
    pub image_url: String,
}

/// One candidate from a title search, kept verbatim from the provider.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    pub release_date: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieDetails {
    pub overview: String,
    pub backdrop_path: String,
}
