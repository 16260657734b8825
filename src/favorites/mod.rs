pub mod store;

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use askama::Template;
use serde::Deserialize;

use crate::http_error::Result;
use crate::pages::{render, MovieCard};
use crate::session::Visitor;
use crate::tmdb::client::TmdbClient;
use store::FavoritesStore;

#[derive(Deserialize)]
struct ToggleRequest {
    movie_id: u64,
    movie_title: String,
}

#[post("/favorites/toggle")]
async fn toggle(
    req: HttpRequest,
    favorites: web::Data<FavoritesStore>,
    body: web::Json<ToggleRequest>,
) -> Result<impl Responder> {
    let visitor = Visitor::from_request(&req);
    let body = body.into_inner();
    let added = favorites.toggle(&visitor.token, body.movie_id);

    let (status, message) = if added {
        ("added", format!("Added \"{}\" to favorites!", body.movie_title))
    } else {
        (
            "removed",
            format!("Removed \"{}\" from favorites.", body.movie_title),
        )
    };

    let mut resp = HttpResponse::Ok();
    visitor.apply(&mut resp);
    Ok(resp.json(serde_json::json!({ "status": status, "message": message })))
}

#[derive(Template)]
#[template(path = "favorites.html")]
struct FavoritesPage {
    movies: Vec<MovieCard>,
}

#[get("/favorites")]
async fn favorites_page(
    req: HttpRequest,
    tmdb: web::Data<TmdbClient>,
    favorites: web::Data<FavoritesStore>,
) -> Result<impl Responder> {
    let visitor = Visitor::from_request(&req);

    // Detail lookups here ride the same memoization as the detail page.
    let mut movies = Vec::new();
    for id in favorites.ids(&visitor.token) {
        let detail = tmdb.movie_details(id).await?;
        movies.push(MovieCard::from_detail(&detail, &tmdb, true));
    }

    render(&FavoritesPage { movies }, &visitor)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(toggle).service(favorites_page);
}
