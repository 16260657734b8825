use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;
use serde::Deserialize;

use crate::favorites::store::FavoritesStore;
use crate::http_error::Result;
use crate::session::Visitor;
use crate::tmdb::client::TmdbClient;
use crate::tmdb::models::ListKind;

use super::{render, MovieCard};

/// How many tiles the homepage grid shows.
const HOME_GRID_SIZE: usize = 8;

#[derive(Deserialize)]
struct HomeQuery {
    list_type: Option<String>,
}

struct Tab {
    value: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Template)]
#[template(path = "homepage.html")]
struct HomePage {
    tabs: Vec<Tab>,
    movies: Vec<MovieCard>,
}

#[get("/")]
async fn homepage(
    req: HttpRequest,
    tmdb: web::Data<TmdbClient>,
    favorites: web::Data<FavoritesStore>,
    query: web::Query<HomeQuery>,
) -> Result<impl Responder> {
    let visitor = Visitor::from_request(&req);
    let list = ListKind::from_param(query.list_type.as_deref());

    let movies = tmdb.movies(HOME_GRID_SIZE, list).await?;
    let cards = movies
        .iter()
        .map(|m| MovieCard::from_summary(m, &tmdb, favorites.contains(&visitor.token, m.id)))
        .collect();

    let tabs = ListKind::ALL
        .iter()
        .map(|kind| Tab {
            value: kind.as_str(),
            label: kind.label(),
            active: *kind == list,
        })
        .collect();

    render(
        &HomePage {
            tabs,
            movies: cards,
        },
        &visitor,
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(homepage);
}
