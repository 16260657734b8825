pub mod home;
pub mod movie;
pub mod search;
pub mod today;

use actix_web::HttpResponse;
use askama::Template;

use crate::http_error::Result;
use crate::session::Visitor;
use crate::tmdb::client::{TmdbClient, POSTER_SIZE};
use crate::tmdb::models::{MovieDetail, MovieSummary};

/// Render a page to HTML, attaching the session cookie when the token was
/// minted for this request.
pub(crate) fn render<T: Template>(page: &T, visitor: &Visitor) -> Result<HttpResponse> {
    let body = page
        .render()
        .map_err(|e| anyhow::anyhow!("Failed to render page: {}", e))?;
    let mut resp = HttpResponse::Ok();
    resp.content_type("text/html; charset=utf-8");
    visitor.apply(&mut resp);
    Ok(resp.body(body))
}

/// What the grid templates need for one movie tile.
pub(crate) struct MovieCard {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
    pub release_year: String,
    pub vote_average: f64,
    pub is_favorite: bool,
}

impl MovieCard {
    pub(crate) fn from_summary(movie: &MovieSummary, tmdb: &TmdbClient, is_favorite: bool) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: tmdb.poster_url(movie.poster_path.as_deref(), POSTER_SIZE),
            release_year: year_of(movie.release_date.as_deref()),
            vote_average: movie.vote_average,
            is_favorite,
        }
    }

    pub(crate) fn from_detail(movie: &MovieDetail, tmdb: &TmdbClient, is_favorite: bool) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: tmdb.poster_url(movie.poster_path.as_deref(), POSTER_SIZE),
            release_year: year_of(movie.release_date.as_deref()),
            vote_average: movie.vote_average,
            is_favorite,
        }
    }
}

/// First four characters of a release date, i.e. the year. Empty when the
/// date is unknown.
fn year_of(date: Option<&str>) -> String {
    date.and_then(|d| d.get(..4)).unwrap_or_default().to_string()
}
