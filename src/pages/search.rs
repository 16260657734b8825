use actix_web::http::header;
use actix_web::{get, web, HttpRequest, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::favorites::store::FavoritesStore;
use crate::http_error::Result;
use crate::session::Visitor;
use crate::tmdb::client::TmdbClient;

use super::{render, MovieCard};

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Template)]
#[template(path = "search_results.html")]
struct SearchPage {
    query: String,
    movies: Vec<MovieCard>,
}

#[get("/search")]
async fn search(
    req: HttpRequest,
    tmdb: web::Data<TmdbClient>,
    favorites: web::Data<FavoritesStore>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let visitor = Visitor::from_request(&req);
    let term = query.q.trim();

    // Blank searches go back where the visitor came from. The API is never
    // called for them.
    if term.is_empty() {
        let target = req
            .headers()
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("/")
            .to_string();
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, target))
            .finish());
    }

    let page = tmdb.search(term).await?;
    let mut results = page.results.unwrap_or_default();
    results.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

    // A lone hit needs no results page.
    if results.len() == 1 {
        return Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, format!("/movie/{}", results[0].id)))
            .finish());
    }

    let cards = results
        .iter()
        .map(|m| MovieCard::from_summary(m, &tmdb, favorites.contains(&visitor.token, m.id)))
        .collect();

    render(
        &SearchPage {
            query: term.to_string(),
            movies: cards,
        },
        &visitor,
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search);
}
