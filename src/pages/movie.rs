use actix_web::{get, web, HttpRequest, Responder};
use askama::Template;
use rand::seq::IndexedRandom;

use crate::favorites::store::FavoritesStore;
use crate::http_error::{Error, Result};
use crate::session::Visitor;
use crate::tmdb::client::{TmdbClient, POSTER_SIZE};

use super::{render, year_of};

/// Image sizes for the detail page. Backdrops are wide, cast photos small.
const BACKDROP_SIZE: &str = "w1280";
const PROFILE_SIZE: &str = "w185";

/// How many cast members the page bills.
const CAST_LIMIT: usize = 12;

struct DetailView {
    id: u64,
    title: String,
    original_title: String,
    tagline: String,
    overview: String,
    poster_url: String,
    release_date: String,
    release_year: String,
    runtime: String,
    genres: String,
    vote_average: f64,
    vote_count: u64,
    budget: String,
    revenue: String,
}

struct CastView {
    name: String,
    character: String,
    profile_url: String,
}

#[derive(Template)]
#[template(path = "movie_details.html")]
struct MovieDetailsPage {
    movie: DetailView,
    cast: Vec<CastView>,
    backdrop_url: String,
    is_favorite: bool,
}

#[get("/movie/{id}")]
async fn movie_details(
    req: HttpRequest,
    tmdb: web::Data<TmdbClient>,
    favorites: web::Data<FavoritesStore>,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let visitor = Visitor::from_request(&req);
    let raw = path.into_inner();
    let id: u64 = raw
        .parse()
        .map_err(|_| Error::NotFound(format!("no movie with id {}", raw)))?;

    let detail = tmdb.movie_details(id).await?;
    let cast = tmdb.movie_cast(id).await?;
    let backdrops = tmdb.movie_backdrops(id).await?;

    // Random pick from the image gallery, falling back to the record's own
    // backdrop when the gallery is empty.
    let backdrop_url = backdrops
        .choose(&mut rand::rng())
        .map(|image| tmdb.poster_url(Some(&image.file_path), BACKDROP_SIZE))
        .unwrap_or_else(|| tmdb.poster_url(detail.backdrop_path.as_deref(), BACKDROP_SIZE));

    let cast_views = cast
        .iter()
        .take(CAST_LIMIT)
        .map(|member| CastView {
            name: member.name.clone(),
            character: member.character.clone(),
            profile_url: tmdb.poster_url(member.profile_path.as_deref(), PROFILE_SIZE),
        })
        .collect();

    let genres = detail
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let movie = DetailView {
        id: detail.id,
        title: detail.title.clone(),
        original_title: detail.original_title.clone(),
        tagline: detail.tagline.clone().unwrap_or_default(),
        overview: detail.overview.clone(),
        poster_url: tmdb.poster_url(detail.poster_path.as_deref(), POSTER_SIZE),
        release_date: detail.release_date.clone().unwrap_or_default(),
        release_year: year_of(detail.release_date.as_deref()),
        runtime: detail
            .runtime
            .map(|minutes| format!("{} min", minutes))
            .unwrap_or_default(),
        genres,
        vote_average: detail.vote_average,
        vote_count: detail.vote_count,
        budget: dollars(detail.budget),
        revenue: dollars(detail.revenue),
    };

    render(
        &MovieDetailsPage {
            movie,
            cast: cast_views,
            backdrop_url,
            is_favorite: favorites.contains(&visitor.token, id),
        },
        &visitor,
    )
}

/// Dollar figure with thousands separators; empty for zero, which TMDB uses
/// when the amount is unknown.
fn dollars(amount: u64) -> String {
    if amount == 0 {
        return String::new();
    }
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${}", out)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(movie_details);
}
