//! Game catalog API client.
//!
//! Async HTTP client using `reqwest`. Every request carries the API key as
//! a `key` query parameter; responses decode from bytes so schema
//! mismatches surface as a distinct error kind.

use serde::de::DeserializeOwned;

use crate::models::{Game, Genre, Page, Screenshot, Store, Tag};

pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Errors from the catalog client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Catalog API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    /// Creates a new client for the given base URL and API key.
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Performs a GET request and decodes the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Returns one page of the unfiltered game list.
    pub async fn list_games(&self, page: u32, page_size: u32) -> Result<Page<Game>, Error> {
        self.get(
            "/games",
            &[
                ("page_size", page_size.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Returns one page of games matching a free-text search.
    pub async fn search_games(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Game>, Error> {
        self.get(
            "/games",
            &[
                ("search", query.to_string()),
                ("page_size", page_size.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Returns one page of games carrying the given genre.
    pub async fn games_by_genre(
        &self,
        genre_id: u64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Game>, Error> {
        self.games_by_filter("genres", genre_id, page, page_size).await
    }

    /// Returns one page of games carrying the given tag.
    pub async fn games_by_tag(
        &self,
        tag_id: u64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Game>, Error> {
        self.games_by_filter("tags", tag_id, page, page_size).await
    }

    /// Returns one page of games sold on the given storefront.
    pub async fn games_by_store(
        &self,
        store_id: u64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Game>, Error> {
        self.games_by_filter("stores", store_id, page, page_size).await
    }

    async fn games_by_filter(
        &self,
        param: &'static str,
        id: u64,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Game>, Error> {
        self.get(
            "/games",
            &[
                (param, id.to_string()),
                ("page_size", page_size.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Returns a single game by id.
    pub async fn game(&self, id: u64) -> Result<Game, Error> {
        self.get(&format!("/games/{id}"), &[]).await
    }

    /// Returns the screenshots of a game.
    pub async fn screenshots(&self, id: u64) -> Result<Page<Screenshot>, Error> {
        self.get(&format!("/games/{id}/screenshots"), &[]).await
    }

    /// Returns the genre reference collection.
    pub async fn genres(&self) -> Result<Page<Genre>, Error> {
        self.get("/genres", &[]).await
    }

    /// Returns the tag reference collection.
    pub async fn tags(&self) -> Result<Page<Tag>, Error> {
        self.get("/tags", &[]).await
    }

    /// Returns the storefront reference collection.
    pub async fn stores(&self) -> Result<Page<Store>, Error> {
        self.get("/stores", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockApi;

    fn games_page(ids: &[u64], count: u64) -> String {
        let results: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"id":{id},"name":"Game {id}"}}"#))
            .collect();
        format!(r#"{{"count":{count},"results":[{}]}}"#, results.join(","))
    }

    #[tokio::test]
    async fn list_games_decodes_results_and_count() {
        let server = MockApi::serve(vec![("/games", 200, games_page(&[1, 2, 3], 900))]).await;
        let client = Client::new("test-key", &server.url);

        let page = client.list_games(1, 12).await.unwrap();
        assert_eq!(page.count, 900);
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.results[0].name, "Game 1");
    }

    #[tokio::test]
    async fn list_games_sends_key_page_size_and_page() {
        let server = MockApi::serve(vec![("/games", 200, games_page(&[], 0))]).await;
        let client = Client::new("test-key", &server.url);

        client.list_games(3, 12).await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("/games?"));
        assert!(requests[0].contains("key=test-key"));
        assert!(requests[0].contains("page_size=12"));
        assert!(requests[0].contains("page=3"));
    }

    #[tokio::test]
    async fn search_games_sends_encoded_query() {
        let server = MockApi::serve(vec![("/games", 200, games_page(&[5], 1))]).await;
        let client = Client::new("test-key", &server.url);

        client.search_games("half life", 1, 12).await.unwrap();

        let requests = server.requests();
        assert!(requests[0].contains("search=half+life"));
        assert!(requests[0].contains("page_size=12"));
        assert!(requests[0].contains("page=1"));
    }

    #[tokio::test]
    async fn filtered_queries_use_their_filter_param() {
        let server = MockApi::serve(vec![("/games", 200, games_page(&[], 0))]).await;
        let client = Client::new("test-key", &server.url);

        client.games_by_genre(4, 2, 24).await.unwrap();
        client.games_by_tag(31, 1, 24).await.unwrap();
        client.games_by_store(1, 1, 24).await.unwrap();

        let requests = server.requests();
        assert!(requests[0].contains("genres=4"));
        assert!(requests[0].contains("page_size=24"));
        assert!(requests[0].contains("page=2"));
        assert!(requests[1].contains("tags=31"));
        assert!(requests[2].contains("stores=1"));
    }

    #[tokio::test]
    async fn game_and_screenshots_hit_subresource_paths() {
        let server = MockApi::serve(vec![
            (
                "/games/42/screenshots",
                200,
                r#"{"count":1,"results":[{"id":9,"image":"https://media.example/s.jpg"}]}"#.into(),
            ),
            ("/games/42", 200, r#"{"id":42,"name":"The Answer"}"#.into()),
        ])
        .await;
        let client = Client::new("test-key", &server.url);

        let game = client.game(42).await.unwrap();
        assert_eq!(game.name, "The Answer");

        let shots = client.screenshots(42).await.unwrap();
        assert_eq!(shots.results[0].id, 9);

        let requests = server.requests();
        assert!(requests[0].starts_with("/games/42?"));
        assert!(requests[1].starts_with("/games/42/screenshots?"));
    }

    #[tokio::test]
    async fn reference_endpoints_decode() {
        let server = MockApi::serve(vec![
            (
                "/genres",
                200,
                r#"{"count":1,"results":[{"id":4,"name":"Action","slug":"action","games_count":100}]}"#.into(),
            ),
            (
                "/tags",
                200,
                r#"{"count":1,"results":[{"id":31,"name":"Singleplayer","slug":"singleplayer"}]}"#.into(),
            ),
            (
                "/stores",
                200,
                r#"{"count":1,"results":[{"id":1,"name":"Steam","slug":"steam","domain":"store.steampowered.com"}]}"#.into(),
            ),
        ])
        .await;
        let client = Client::new("test-key", &server.url);

        assert_eq!(client.genres().await.unwrap().results[0].name, "Action");
        assert_eq!(client.tags().await.unwrap().results[0].name, "Singleplayer");
        assert_eq!(
            client.stores().await.unwrap().results[0].domain.as_deref(),
            Some("store.steampowered.com")
        );
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let server =
            MockApi::serve(vec![("", 401, r#"{"error":"The key parameter is invalid"}"#.into())])
                .await;
        let client = Client::new("bad-key", &server.url);

        let err = client.list_games(1, 12).await.unwrap_err();
        match err {
            Error::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("invalid"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockApi::serve(vec![("", 200, "not json at all".into())]).await;
        let client = Client::new("test-key", &server.url);

        let err = client.genres().await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn connection_failure_is_an_http_error() {
        // Bind then immediately drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());
        drop(listener);

        let client = Client::new("test-key", &url);
        let err = client.list_games(1, 12).await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
