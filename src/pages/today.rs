use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;

use crate::favorites::store::FavoritesStore;
use crate::http_error::Result;
use crate::session::Visitor;
use crate::tmdb::client::TmdbClient;
use crate::tmdb::models::ListKind;

use super::{render, MovieCard};

#[derive(Template)]
#[template(path = "today.html")]
struct TodayPage {
    date: String,
    movies: Vec<MovieCard>,
}

/// What is in theaters right now: the first page of the now-playing list,
/// dated with the server's local day.
#[get("/today")]
async fn today(
    req: HttpRequest,
    tmdb: web::Data<TmdbClient>,
    favorites: web::Data<FavoritesStore>,
) -> Result<impl Responder> {
    let visitor = Visitor::from_request(&req);

    let page = tmdb.category_page(ListKind::NowPlaying, 1).await?;
    let movies = page.results.unwrap_or_default();
    let cards = movies
        .iter()
        .map(|m| MovieCard::from_summary(m, &tmdb, favorites.contains(&visitor.token, m.id)))
        .collect();

    let date = chrono::Local::now().format("%A, %B %d, %Y").to_string();
    render(
        &TodayPage {
            date,
            movies: cards,
        },
        &visitor,
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(today);
}
