use rand::seq::SliceRandom;
use reqwest::Client;

use crate::config::SharedConfig;
use crate::http_error::{Error, Result};

use super::cache::DetailsCache;
use super::models::{
    CastMember, CreditsResponse, Image, ImagesResponse, ListKind, MovieDetail, MoviePage,
    MovieSummary,
};

/// Poster size the page grids request from the image CDN.
pub const POSTER_SIZE: &str = "w342";

/// TMDB API client. One reqwest client for connection reuse, plus the
/// process-wide detail-lookup cache.
pub struct TmdbClient {
    pub http: Client,
    pub config: SharedConfig,
    cache: DetailsCache,
}

impl TmdbClient {
    pub fn new(config: SharedConfig) -> Self {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");
        Self {
            http,
            config,
            cache: DetailsCache::default(),
        }
    }

    fn api_base(&self) -> String {
        let cfg = self.config.read().unwrap();
        cfg.tmdb.api_base.trim_end_matches('/').to_string()
    }

    fn image_base(&self) -> String {
        let cfg = self.config.read().unwrap();
        cfg.tmdb.image_base.trim_end_matches('/').to_string()
    }

    fn token(&self) -> String {
        let cfg = self.config.read().unwrap();
        cfg.tmdb.token.clone()
    }

    /// Build a GET request with the bearer credential attached.
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_base(), path);
        log::debug!("GET {}", url);
        self.http
            .get(&url)
            .bearer_auth(self.token())
            .header("Accept", "application/json")
    }

    /// Send a TMDB request and parse the JSON response.
    /// Any non-2xx status surfaces as an upstream error.
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T> {
        let resp = req
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("TMDB request failed: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            // Truncate by characters; a byte slice could land inside a
            // multibyte sequence and panic.
            let snippet: String = body.chars().take(200).collect();
            return Err(Error::UpstreamError(format!(
                "TMDB returned HTTP {}: {}",
                status.as_u16(),
                snippet
            )));
        }

        let body: T = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse TMDB response: {}", e))?;
        Ok(body)
    }

    /// One page of a curated list: `GET /movie/{list}?page={n}`.
    /// Page numbers below 1 are clamped to 1.
    pub async fn category_page(&self, list: ListKind, page: u32) -> Result<MoviePage> {
        let page = page.max(1);
        let req = self
            .get(&format!("/movie/{}", list.as_str()))
            .query(&[("page", page.to_string())]);
        self.send_json(req).await
    }

    /// Up to `how_many` movies from a curated list, in randomized order.
    ///
    /// Pages are fetched from 1 upward until enough rows have accumulated or
    /// the page count reported by the first response runs out. A response
    /// without a `results` field ends accumulation with whatever was
    /// collected so far.
    pub async fn movies(&self, how_many: usize, list: ListKind) -> Result<Vec<MovieSummary>> {
        let mut collected: Vec<MovieSummary> = Vec::new();
        let mut page: u32 = 1;
        let mut total_pages: Option<u32> = None;

        while collected.len() < how_many {
            let response = self.category_page(list, page).await?;
            let Some(results) = response.results else {
                break;
            };
            if total_pages.is_none() {
                total_pages = Some(response.total_pages);
            }
            collected.extend(results);
            page += 1;
            if page > total_pages.unwrap_or(1) {
                break;
            }
        }

        collected.shuffle(&mut rand::rng());
        collected.truncate(how_many);
        Ok(collected)
    }

    /// Movie detail by ID. Memoized per process in a bounded LRU cache;
    /// only successful lookups are cached.
    pub async fn movie_details(&self, id: u64) -> Result<MovieDetail> {
        if let Some(detail) = self.cache.get(id) {
            return Ok(detail);
        }
        let detail: MovieDetail = self.send_json(self.get(&format!("/movie/{}", id))).await?;
        self.cache.insert(id, detail.clone());
        Ok(detail)
    }

    /// Backdrop images for a movie; empty when TMDB reports none.
    pub async fn movie_backdrops(&self, id: u64) -> Result<Vec<Image>> {
        let response: ImagesResponse = self
            .send_json(self.get(&format!("/movie/{}/images", id)))
            .await?;
        Ok(response.backdrops)
    }

    /// Billed cast for a movie; empty when TMDB reports none.
    pub async fn movie_cast(&self, id: u64) -> Result<Vec<CastMember>> {
        let response: CreditsResponse = self
            .send_json(self.get(&format!("/movie/{}/credits", id)))
            .await?;
        Ok(response.cast)
    }

    /// Title search: `GET /search/movie?query={q}`. The query string goes
    /// out as-is; callers trim before deciding to search at all.
    pub async fn search(&self, query: &str) -> Result<MoviePage> {
        let req = self.get("/search/movie").query(&[("query", query)]);
        self.send_json(req).await
    }

    /// Build an image CDN URL for a poster/profile path. Empty or missing
    /// paths produce an empty string so templates can show a placeholder.
    pub fn poster_url(&self, path: Option<&str>, size: &str) -> String {
        match path {
            Some(p) if !p.is_empty() => format!("{}/{}{}", self.image_base(), size, p),
            _ => String::new(),
        }
    }

    /// The detail-lookup cache, exposed so tests can reset memoization.
    pub fn cache(&self) -> &DetailsCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::models::{AppConfig, TmdbConfig};

    fn client_for(server: &MockServer) -> TmdbClient {
        let config = AppConfig {
            tmdb: TmdbConfig {
                api_base: server.uri(),
                image_base: "https://image.tmdb.org/t/p".to_string(),
                token: "test-token".to_string(),
            },
        };
        TmdbClient::new(Arc::new(RwLock::new(config)))
    }

    fn offline_client() -> TmdbClient {
        TmdbClient::new(Arc::new(RwLock::new(AppConfig::default())))
    }

    fn movie(id: u64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "overview": "",
            "poster_path": format!("/p{id}.jpg"),
            "release_date": "2024-01-01",
            "popularity": id as f64,
            "vote_average": 7.1
        })
    }

    fn page_body(page: u32, ids: std::ops::RangeInclusive<u64>, total_pages: u32) -> serde_json::Value {
        let results: Vec<_> = ids.map(|i| movie(i, &format!("Movie {i}"))).collect();
        json!({
            "page": page,
            "results": results,
            "total_pages": total_pages,
            "total_results": 20 * total_pages
        })
    }

    #[actix_rt::test]
    async fn movies_returns_at_most_the_requested_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 1..=20, 3)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let movies = client.movies(8, ListKind::Popular).await.unwrap();

        assert_eq!(movies.len(), 8);
        assert!(movies.iter().all(|m| (1..=20).contains(&m.id)));
    }

    #[actix_rt::test]
    async fn movies_accumulates_across_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/top_rated"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 1..=3, 2)))
            .mount(&server)
            .await;
        // The second page reports a bogus total_pages; the count captured
        // from the first response is the one that stops the loop.
        Mock::given(method("GET"))
            .and(path("/movie/top_rated"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2,
                "results": [movie(4, "Four"), movie(5, "Five"), movie(6, "Six")],
                "total_pages": 99,
                "total_results": 6
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let movies = client.movies(10, ListKind::TopRated).await.unwrap();

        assert_eq!(movies.len(), 6);
        let mut ids: Vec<u64> = movies.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[actix_rt::test]
    async fn movies_stops_when_results_field_is_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/upcoming"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "status_code": 7,
                "status_message": "Invalid API key"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let movies = client.movies(8, ListKind::Upcoming).await.unwrap();
        assert!(movies.is_empty());
    }

    #[actix_rt::test]
    async fn category_page_clamps_page_below_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/top_rated"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, 1..=2, 1)))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client.category_page(ListKind::TopRated, 0).await.unwrap();
        assert_eq!(page.page, 1);
    }

    #[actix_rt::test]
    async fn movie_details_hits_upstream_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "title": "The Answer",
                "overview": "Everything.",
                "runtime": 101
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.movie_details(42).await.unwrap();
        let second = client.movie_details(42).await.unwrap();

        assert_eq!(first.title, "The Answer");
        assert_eq!(second.title, "The Answer");
        assert_eq!(client.cache().len(), 1);
    }

    #[actix_rt::test]
    async fn cleared_cache_fetches_again() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 42,
                "title": "The Answer"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.movie_details(42).await.unwrap();
        client.cache().clear();
        client.movie_details(42).await.unwrap();
    }

    #[actix_rt::test]
    async fn failed_detail_lookups_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/7"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/movie/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "title": "Seven"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.movie_details(7).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamError(_)));
        assert!(client.cache().is_empty());

        let detail = client.movie_details(7).await.unwrap();
        assert_eq!(detail.title, "Seven");
        assert_eq!(client.cache().len(), 1);
    }

    #[actix_rt::test]
    async fn backdrops_and_cast_default_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/5/images"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "posters": []
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/movie/5/credits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 5 })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.movie_backdrops(5).await.unwrap().is_empty());
        assert!(client.movie_cast(5).await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn search_sends_the_query_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("query", "blade runner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "results": [movie(78, "Blade Runner")],
                "total_pages": 1,
                "total_results": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client.search("blade runner").await.unwrap();
        let results = page.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 78);
    }

    #[actix_rt::test]
    async fn non_success_status_is_an_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.movies(8, ListKind::Popular).await.unwrap_err();
        assert!(matches!(err, Error::UpstreamError(_)));
    }

    // The truncation point falls inside the two-byte 'é' here; the error
    // must still come back instead of a panic.
    #[actix_rt::test]
    async fn multibyte_error_bodies_survive_truncation() {
        let server = MockServer::start().await;
        let body = format!("{}é and more text past the cutoff", "a".repeat(199));
        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .respond_with(ResponseTemplate::new(503).set_body_string(body))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.movies(8, ListKind::Popular).await.unwrap_err();
        match err {
            Error::UpstreamError(message) => {
                assert!(message.contains("503"));
                assert!(message.contains('é'));
            }
            other => panic!("expected an upstream error, got {:?}", other),
        }
    }

    #[test]
    fn poster_url_joins_base_size_and_path() {
        let client = offline_client();
        assert_eq!(
            client.poster_url(Some("/abc123.jpg"), "w500"),
            "https://image.tmdb.org/t/p/w500/abc123.jpg"
        );
        assert_eq!(
            client.poster_url(Some("/abc123.jpg"), POSTER_SIZE),
            "https://image.tmdb.org/t/p/w342/abc123.jpg"
        );
    }

    #[test]
    fn poster_url_is_empty_for_missing_paths() {
        let client = offline_client();
        assert_eq!(client.poster_url(None, "w500"), "");
        assert_eq!(client.poster_url(Some(""), "w500"), "");
    }
}
