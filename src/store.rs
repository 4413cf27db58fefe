//! Catalog store: the single owner of all catalog state.
//!
//! Every mutation goes through a named operation. Operations are
//! fire-and-forget: a failed fetch is logged and leaves its state slice
//! untouched, it never propagates to the calling view. The log file is the
//! only place failures are observable.

use indexmap::IndexMap;
use tracing::warn;

use crate::api::Client;
use crate::models::{Game, Genre, Page, Screenshot, Store, Tag};

/// Page size for the unfiltered list and search views.
pub const LIST_PAGE_SIZE: u32 = 12;
/// Page size for the genre/tag/store filtered views.
pub const FILTER_PAGE_SIZE: u32 = 24;

/// In-memory catalog state plus the operations that mutate it.
///
/// Games are keyed by id with insertion order preserved, so the list view
/// renders in API order while detail lookups stay O(1). List, search, and
/// filtered fetches replace the collection wholesale; a detail fetch
/// inserts a single missing entry.
pub struct CatalogStore {
    client: Client,
    games: IndexMap<u64, Game>,
    total_games: u64,
    genres: Vec<Genre>,
    tags: Vec<Tag>,
    stores: Vec<Store>,
    screenshots: Vec<Screenshot>,
}

impl CatalogStore {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            games: IndexMap::new(),
            total_games: 0,
            genres: Vec::new(),
            tags: Vec::new(),
            stores: Vec::new(),
            screenshots: Vec::new(),
        }
    }

    // ── Fetch operations ──

    /// Load one page of the unfiltered game list. `page` is 1-based.
    pub async fn fetch_games(&mut self, page: u32) {
        match self.client.list_games(page, LIST_PAGE_SIZE).await {
            Ok(batch) => self.replace_games(batch),
            Err(err) => warn!("failed to fetch games: {err}"),
        }
    }

    /// Load one page of games matching a search query.
    pub async fn search_games(&mut self, query: &str, page: u32) {
        match self.client.search_games(query, page, LIST_PAGE_SIZE).await {
            Ok(batch) => self.replace_games(batch),
            Err(err) => warn!("failed to search games: {err}"),
        }
    }

    /// Load a single game unless it is already cached.
    ///
    /// Two racing calls for the same missing id both pass this check; the
    /// second completion overwrites the same key, so the no-duplicates
    /// invariant holds either way.
    pub async fn fetch_game(&mut self, id: u64) {
        if self.games.contains_key(&id) {
            return;
        }
        match self.client.game(id).await {
            Ok(game) => {
                self.games.insert(game.id, game);
            }
            Err(err) => warn!("failed to fetch game {id}: {err}"),
        }
    }

    /// Replace the genre reference collection.
    pub async fn fetch_genres(&mut self) {
        match self.client.genres().await {
            Ok(batch) => self.genres = batch.results,
            Err(err) => warn!("failed to fetch genres: {err}"),
        }
    }

    /// Replace the tag reference collection.
    pub async fn fetch_tags(&mut self) {
        match self.client.tags().await {
            Ok(batch) => self.tags = batch.results,
            Err(err) => warn!("failed to fetch tags: {err}"),
        }
    }

    /// Replace the storefront reference collection.
    pub async fn fetch_stores(&mut self) {
        match self.client.stores().await {
            Ok(batch) => self.stores = batch.results,
            Err(err) => warn!("failed to fetch stores: {err}"),
        }
    }

    /// Replace the screenshot collection with the given game's screenshots.
    /// Always re-fetched; screenshots are not kept per game.
    pub async fn fetch_screenshots(&mut self, id: u64) {
        match self.client.screenshots(id).await {
            Ok(batch) => self.screenshots = batch.results,
            Err(err) => warn!("failed to fetch screenshots for game {id}: {err}"),
        }
    }

    /// Load one page of games carrying a genre.
    pub async fn fetch_games_by_genre(&mut self, genre_id: u64, page: u32) {
        match self
            .client
            .games_by_genre(genre_id, page, FILTER_PAGE_SIZE)
            .await
        {
            Ok(batch) => self.replace_games(batch),
            Err(err) => warn!("failed to fetch games by genre {genre_id}: {err}"),
        }
    }

    /// Load one page of games carrying a tag.
    pub async fn fetch_games_by_tag(&mut self, tag_id: u64, page: u32) {
        match self.client.games_by_tag(tag_id, page, FILTER_PAGE_SIZE).await {
            Ok(batch) => self.replace_games(batch),
            Err(err) => warn!("failed to fetch games by tag {tag_id}: {err}"),
        }
    }

    /// Load one page of games sold on a storefront.
    pub async fn fetch_games_by_store(&mut self, store_id: u64, page: u32) {
        match self
            .client
            .games_by_store(store_id, page, FILTER_PAGE_SIZE)
            .await
        {
            Ok(batch) => self.replace_games(batch),
            Err(err) => warn!("failed to fetch games by store {store_id}: {err}"),
        }
    }

    fn replace_games(&mut self, batch: Page<Game>) {
        self.games = batch.results.into_iter().map(|g| (g.id, g)).collect();
        self.total_games = batch.count;
    }

    // ── Pure lookups ──

    /// Cached game by id, if present.
    pub fn game_by_id(&self, id: u64) -> Option<&Game> {
        self.games.get(&id)
    }

    /// Screenshot at a positional index into the current collection.
    pub fn screenshot_at(&self, index: usize) -> Option<&Screenshot> {
        self.screenshots.get(index)
    }

    // ── Accessors ──

    /// Currently loaded games, in API order.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    /// Number of games currently loaded (one page at most, plus any
    /// detail-fetched entries).
    pub fn loaded_games(&self) -> usize {
        self.games.len()
    }

    /// Total matches for the most recently completed list/search/filter
    /// fetch; drives pagination.
    pub fn total_games(&self) -> u64 {
        self.total_games
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn screenshots(&self) -> &[Screenshot] {
        &self.screenshots
    }
}
