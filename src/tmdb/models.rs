use serde::Deserialize;

/// The curated movie lists TMDB exposes under `/movie/{list}`, in the order
/// the homepage tabs show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    TopRated,
    Upcoming,
    Popular,
    NowPlaying,
}

impl ListKind {
    pub const ALL: [ListKind; 4] = [
        ListKind::TopRated,
        ListKind::Upcoming,
        ListKind::Popular,
        ListKind::NowPlaying,
    ];

    /// The TMDB path segment for this list.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::TopRated => "top_rated",
            ListKind::Upcoming => "upcoming",
            ListKind::Popular => "popular",
            ListKind::NowPlaying => "now_playing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ListKind::TopRated => "Top Rated",
            ListKind::Upcoming => "Upcoming",
            ListKind::Popular => "Popular",
            ListKind::NowPlaying => "Now Playing",
        }
    }

    /// Resolve a query-string value against the allow-list. Unrecognized or
    /// missing values fall back to the popular list.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("top_rated") => ListKind::TopRated,
            Some("upcoming") => ListKind::Upcoming,
            Some("popular") => ListKind::Popular,
            Some("now_playing") => ListKind::NowPlaying,
            _ => ListKind::Popular,
        }
    }
}

/// One row of a list or search response. Everything except `id` is optional
/// upstream, so everything except `id` defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
}

fn default_total_pages() -> u32 {
    1
}

/// One page of `/movie/{list}` or `/search/movie`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    /// Stays `None` when the field is structurally absent (TMDB error
    /// bodies); pagination stops on that instead of treating it as empty.
    pub results: Option<Vec<MovieSummary>>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

/// Full record from `/movie/{id}`. Cached per process, keyed by `id`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub file_path: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub aspect_ratio: f64,
    #[serde(default)]
    pub vote_average: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub backdrops: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_list_param_falls_back_to_popular() {
        assert_eq!(ListKind::from_param(Some("top_rated")), ListKind::TopRated);
        assert_eq!(ListKind::from_param(Some("bogus")), ListKind::Popular);
        assert_eq!(ListKind::from_param(Some("")), ListKind::Popular);
        assert_eq!(ListKind::from_param(None), ListKind::Popular);
    }

    #[test]
    fn page_without_results_parses_with_none() {
        let page: MoviePage = serde_json::from_str(
            r#"{"success": false, "status_code": 7, "status_message": "Invalid API key"}"#,
        )
        .unwrap();
        assert!(page.results.is_none());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn summary_tolerates_null_and_missing_fields() {
        let movie: MovieSummary = serde_json::from_str(
            r#"{"id": 9, "title": "Nine", "poster_path": null, "release_date": null}"#,
        )
        .unwrap();
        assert_eq!(movie.id, 9);
        assert!(movie.poster_path.is_none());
        assert!(movie.release_date.is_none());
        assert_eq!(movie.popularity, 0.0);
    }
}
