use indexmap::IndexSet;
use tracing::debug;

use crate::models::{Game, Screenshot};
use crate::router::{Route, Router};
use crate::store::{CatalogStore, FILTER_PAGE_SIZE, LIST_PAGE_SIZE};

/// Which tab is selected in the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    About,
    Platforms,
    Screenshots,
}

impl DetailTab {
    pub fn next(self) -> Self {
        match self {
            Self::About => Self::Platforms,
            Self::Platforms => Self::Screenshots,
            Self::Screenshots => Self::About,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::About => Self::Screenshots,
            Self::Platforms => Self::About,
            Self::Screenshots => Self::Platforms,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Platforms => "Platforms",
            Self::Screenshots => "Screenshots",
        }
    }

    pub const ALL: [DetailTab; 3] = [Self::About, Self::Platforms, Self::Screenshots];
}

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which filter-chip row has keyboard focus in the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipRow {
    Genres,
    Tags,
    Stores,
}

impl ChipRow {
    pub fn label(self) -> &'static str {
        match self {
            Self::Genres => "Genres",
            Self::Tags => "Tags",
            Self::Stores => "Stores",
        }
    }
}

/// Pages needed to cover `total` entries at `page_size` per page.
/// Always at least one page.
pub fn page_count(total: u64, page_size: u32) -> u32 {
    total.div_ceil(u64::from(page_size)).max(1) as u32
}

/// Main application state.
///
/// Owns the catalog store (injected at construction) and the router.
/// Navigation marks a pending mount; the event loop runs the mount, which
/// is the only place fetches are triggered.
pub struct App {
    pub store: CatalogStore,
    router: Router,
    pub should_quit: bool,
    pub show_help: bool,

    // List view state
    pub page: u32,
    pub list_selected: usize,
    pub chip_focus: Option<ChipRow>,
    pub chip_selected: usize,

    // Search bar
    pub input_mode: InputMode,
    pub search_input: String,

    // Detail view state
    pub detail_tab: DetailTab,
    pub detail_scroll: u16,
    pub screenshot_selected: usize,

    // Favorites (session-scoped, insertion-ordered)
    pub favorites: IndexSet<u64>,
    pub favorites_selected: usize,

    pending_mount: bool,
    pub status_msg: String,
}

impl App {
    pub fn new(store: CatalogStore, initial: Route) -> Self {
        Self {
            store,
            router: Router::new(initial),
            should_quit: false,
            show_help: false,

            page: 1,
            list_selected: 0,
            chip_focus: None,
            chip_selected: 0,

            input_mode: InputMode::Normal,
            search_input: String::new(),

            detail_tab: DetailTab::About,
            detail_scroll: 0,
            screenshot_selected: 0,

            favorites: IndexSet::new(),
            favorites_selected: 0,

            pending_mount: true,
            status_msg: String::new(),
        }
    }

    pub fn route(&self) -> &Route {
        self.router.current()
    }

    // ── Navigation ──

    /// Switch routes and schedule the new route's mount. Never fetches.
    pub fn navigate(&mut self, route: Route) {
        debug!("navigating to {}", route.name());
        self.router.navigate(route);
        self.reset_view_state();
    }

    pub fn back(&mut self) {
        if self.router.back() {
            self.reset_view_state();
        }
    }

    fn reset_view_state(&mut self) {
        self.page = 1;
        self.list_selected = 0;
        self.chip_focus = None;
        self.chip_selected = 0;
        self.detail_tab = DetailTab::About;
        self.detail_scroll = 0;
        self.screenshot_selected = 0;
        self.favorites_selected = 0;
        self.pending_mount = true;
    }

    pub fn needs_mount(&self) -> bool {
        self.pending_mount
    }

    /// Run the pending mount for the current route, if any.
    pub async fn process_mount(&mut self) {
        if !self.pending_mount {
            return;
        }
        self.pending_mount = false;

        match self.router.current().clone() {
            Route::Home => {
                self.store.fetch_games(self.page).await;
                self.load_reference_data().await;
                self.set_list_status();
            }
            Route::Search { query } => {
                self.store.search_games(&query, self.page).await;
                self.load_reference_data().await;
                self.set_list_status();
            }
            Route::Genre { id } => {
                self.store.fetch_games_by_genre(id, self.page).await;
                self.set_list_status();
            }
            Route::Tag { id } => {
                self.store.fetch_games_by_tag(id, self.page).await;
                self.set_list_status();
            }
            Route::Store { id } => {
                self.store.fetch_games_by_store(id, self.page).await;
                self.set_list_status();
            }
            Route::GameDetail { id } => {
                self.store.fetch_game(id).await;
                self.store.fetch_screenshots(id).await;
            }
            Route::Favorites => {
                // Wholesale list replacement may have evicted favorited
                // games from the cache; re-fetch the missing ones lazily.
                let ids: Vec<u64> = self.favorites.iter().copied().collect();
                for id in ids {
                    self.store.fetch_game(id).await;
                }
            }
        }
    }

    /// Chips are loaded on every list/search mount so the rows stay
    /// current.
    async fn load_reference_data(&mut self) {
        self.store.fetch_genres().await;
        self.store.fetch_tags().await;
        self.store.fetch_stores().await;
    }

    fn set_list_status(&mut self) {
        self.status_msg = format!(
            "{} games, page {}/{}",
            self.store.total_games(),
            self.page,
            self.page_count()
        );
    }

    /// View heading for the current route.
    pub fn heading(&self) -> String {
        match self.router.current() {
            Route::Home => "Popular Games".to_string(),
            Route::Search { query } => format!("Search results for: \"{query}\""),
            Route::Genre { id } => match self.store.genres().iter().find(|g| g.id == *id) {
                Some(genre) => format!("Genre: {}", genre.name),
                None => format!("Genre #{id}"),
            },
            Route::Tag { id } => match self.store.tags().iter().find(|t| t.id == *id) {
                Some(tag) => format!("Tag: {}", tag.name),
                None => format!("Tag #{id}"),
            },
            Route::Store { id } => match self.store.stores().iter().find(|s| s.id == *id) {
                Some(store) => format!("Store: {}", store.name),
                None => format!("Store #{id}"),
            },
            Route::Favorites => "Favorites".to_string(),
            Route::GameDetail { id } => match self.store.game_by_id(*id) {
                Some(game) => game.name.clone(),
                None => "Game Detail".to_string(),
            },
        }
    }

    // ── Pagination ──

    pub fn active_page_size(&self) -> u32 {
        match self.router.current() {
            Route::Genre { .. } | Route::Tag { .. } | Route::Store { .. } => FILTER_PAGE_SIZE,
            _ => LIST_PAGE_SIZE,
        }
    }

    pub fn page_count(&self) -> u32 {
        page_count(self.store.total_games(), self.active_page_size())
    }

    pub fn has_prev_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.page += 1;
            self.list_selected = 0;
            self.pending_mount = true;
        }
    }

    pub fn prev_page(&mut self) {
        if self.has_prev_page() {
            self.page -= 1;
            self.list_selected = 0;
            self.pending_mount = true;
        }
    }

    // ── List selection ──

    pub fn list_next(&mut self) {
        let len = self.store.loaded_games();
        if len > 0 && self.list_selected + 1 < len {
            self.list_selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn selected_game(&self) -> Option<&Game> {
        self.store.games().nth(self.list_selected)
    }

    /// Open the detail view for the currently selected game.
    pub fn open_selected(&mut self) {
        let id = self.selected_game().map(|game| game.id);
        if let Some(id) = id {
            self.navigate(Route::GameDetail { id });
        }
    }

    // ── Filter chips ──

    pub fn chips_available(&self) -> bool {
        matches!(self.router.current(), Route::Home | Route::Search { .. })
    }

    pub fn focus_chips(&mut self, row: ChipRow) {
        if self.chips_available() {
            self.chip_focus = Some(row);
            self.chip_selected = 0;
        }
    }

    pub fn unfocus_chips(&mut self) {
        self.chip_focus = None;
    }

    fn chip_row_len(&self, row: ChipRow) -> usize {
        match row {
            ChipRow::Genres => self.store.genres().len(),
            ChipRow::Tags => self.store.tags().len(),
            ChipRow::Stores => self.store.stores().len(),
        }
    }

    pub fn chip_next(&mut self) {
        if let Some(row) = self.chip_focus {
            let len = self.chip_row_len(row);
            if len > 0 && self.chip_selected + 1 < len {
                self.chip_selected += 1;
            }
        }
    }

    pub fn chip_prev(&mut self) {
        if self.chip_focus.is_some() {
            self.chip_selected = self.chip_selected.saturating_sub(1);
        }
    }

    /// Navigate to the filtered view for the focused chip. The scoped
    /// fetch happens in that route's mount, never here.
    pub fn activate_chip(&mut self) {
        let Some(row) = self.chip_focus else {
            return;
        };
        let route = match row {
            ChipRow::Genres => self
                .store
                .genres()
                .get(self.chip_selected)
                .map(|g| Route::Genre { id: g.id }),
            ChipRow::Tags => self
                .store
                .tags()
                .get(self.chip_selected)
                .map(|t| Route::Tag { id: t.id }),
            ChipRow::Stores => self
                .store
                .stores()
                .get(self.chip_selected)
                .map(|s| Route::Store { id: s.id }),
        };
        if let Some(route) = route {
            self.navigate(route);
        }
    }

    // ── Search bar ──

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Editing;
        if let Route::Search { query } = self.router.current() {
            self.search_input = query.clone();
        }
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_search(&mut self) {
        self.input_mode = InputMode::Normal;
        let query = self.search_input.trim().to_string();
        if !query.is_empty() {
            self.navigate(Route::Search { query });
        }
    }

    // ── Favorites ──

    pub fn toggle_favorite(&mut self, id: u64) {
        if !self.favorites.shift_remove(&id) {
            self.favorites.insert(id);
        }
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.contains(&id)
    }

    pub fn favorites_next(&mut self) {
        if !self.favorites.is_empty() && self.favorites_selected + 1 < self.favorites.len() {
            self.favorites_selected += 1;
        }
    }

    pub fn favorites_prev(&mut self) {
        self.favorites_selected = self.favorites_selected.saturating_sub(1);
    }

    pub fn open_selected_favorite(&mut self) {
        let id = self.favorites.get_index(self.favorites_selected).copied();
        if let Some(id) = id {
            self.navigate(Route::GameDetail { id });
        }
    }

    // ── Detail view ──

    /// The game shown by the detail route, once its fetch has landed.
    pub fn detail_game(&self) -> Option<&Game> {
        match self.router.current() {
            Route::GameDetail { id } => self.store.game_by_id(*id),
            _ => None,
        }
    }

    /// The screenshot highlighted in the screenshots tab. Positional into
    /// the current collection.
    pub fn selected_screenshot(&self) -> Option<&Screenshot> {
        self.store.screenshot_at(self.screenshot_selected)
    }

    pub fn screenshot_next(&mut self) {
        let len = self.store.screenshots().len();
        if len > 0 && self.screenshot_selected + 1 < len {
            self.screenshot_selected += 1;
        }
    }

    pub fn screenshot_prev(&mut self) {
        self.screenshot_selected = self.screenshot_selected.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(20);
    }

    pub fn scroll_page_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(20);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Client;
    use crate::testutil::MockApi;
    use proptest::prelude::*;

    fn games_page(ids: &[u64], count: u64) -> String {
        let results: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"id":{id},"name":"Game {id}"}}"#))
            .collect();
        format!(r#"{{"count":{count},"results":[{}]}}"#, results.join(","))
    }

    fn reference_routes() -> Vec<(&'static str, u16, String)> {
        vec![
            (
                "/genres",
                200,
                r#"{"count":2,"results":[{"id":1,"name":"Action"},{"id":5,"name":"RPG"}]}"#.into(),
            ),
            (
                "/tags",
                200,
                r#"{"count":1,"results":[{"id":1,"name":"Singleplayer"}]}"#.into(),
            ),
            (
                "/stores",
                200,
                r#"{"count":1,"results":[{"id":1,"name":"Steam"}]}"#.into(),
            ),
        ]
    }

    async fn app_with(
        mut routes: Vec<(&'static str, u16, String)>,
        initial: Route,
    ) -> (App, MockApi) {
        routes.extend(reference_routes());
        let server = MockApi::serve(routes).await;
        let store = CatalogStore::new(Client::new("test-key", &server.url));
        (App::new(store, initial), server)
    }

    #[tokio::test]
    async fn home_mount_loads_games_and_reference_data() {
        let (mut app, server) =
            app_with(vec![("/games", 200, games_page(&[1, 2], 13))], Route::Home).await;

        app.process_mount().await;

        let requests = server.requests();
        let game_requests: Vec<&String> = requests
            .iter()
            .filter(|r| r.starts_with("/games?"))
            .collect();
        assert_eq!(game_requests.len(), 1);
        assert!(game_requests[0].contains("page_size=12"));
        assert!(game_requests[0].contains("page=1"));
        assert!(!game_requests[0].contains("search="));
        assert_eq!(requests.iter().filter(|r| r.starts_with("/genres")).count(), 1);
        assert_eq!(requests.iter().filter(|r| r.starts_with("/tags")).count(), 1);
        assert_eq!(requests.iter().filter(|r| r.starts_with("/stores")).count(), 1);

        assert_eq!(app.heading(), "Popular Games");
        assert_eq!(app.store.loaded_games(), 2);
        assert!(!app.needs_mount(), "mount must not re-run until scheduled");
    }

    #[tokio::test]
    async fn search_mount_searches_instead_of_listing() {
        let (mut app, server) = app_with(
            vec![("/games", 200, games_page(&[7], 1))],
            Route::Search {
                query: "zelda".into(),
            },
        )
        .await;

        app.process_mount().await;

        let requests = server.requests();
        let game_requests: Vec<&String> = requests
            .iter()
            .filter(|r| r.starts_with("/games?"))
            .collect();
        assert_eq!(game_requests.len(), 1);
        assert!(
            game_requests[0].contains("search=zelda"),
            "plain list fetch issued instead of search: {}",
            game_requests[0]
        );
        assert!(game_requests[0].contains("page=1"));
        assert_eq!(app.heading(), "Search results for: \"zelda\"");
    }

    #[tokio::test]
    async fn thirteen_games_paginate_to_two_pages() {
        let (mut app, server) =
            app_with(vec![("/games", 200, games_page(&[1], 13))], Route::Home).await;

        app.process_mount().await;
        assert_eq!(app.page_count(), 2);
        assert!(!app.has_prev_page(), "previous must be disabled on page 1");
        assert!(app.has_next_page(), "next must be enabled on page 1");

        app.next_page();
        assert!(app.needs_mount());
        app.process_mount().await;

        let last = server
            .requests()
            .into_iter()
            .rev()
            .find(|r| r.starts_with("/games?"));
        assert!(last.unwrap().contains("page=2"));
        assert!(app.has_prev_page());
        assert!(!app.has_next_page(), "next must be disabled on the last page");

        // Boundary: paging past the end is a no-op.
        app.next_page();
        assert!(!app.needs_mount());
        assert_eq!(app.page, 2);
    }

    #[tokio::test]
    async fn chip_activation_navigates_without_fetching() {
        let (mut app, server) =
            app_with(vec![("/games", 200, games_page(&[1], 1))], Route::Home).await;
        app.process_mount().await;
        let hits_after_mount = server.hits();

        app.focus_chips(ChipRow::Genres);
        app.activate_chip();

        assert_eq!(*app.route(), Route::Genre { id: 1 });
        assert_eq!(app.route().name(), "GenreView");
        assert_eq!(server.hits(), hits_after_mount, "chip click must not fetch");
        assert!(app.needs_mount());

        app.process_mount().await;
        let last = server.requests().pop().unwrap();
        assert!(last.contains("genres=1"));
        assert!(last.contains("page_size=24"));
    }

    #[tokio::test]
    async fn tag_and_store_chips_navigate_to_their_views() {
        let (mut app, _server) =
            app_with(vec![("/games", 200, games_page(&[1], 1))], Route::Home).await;
        app.process_mount().await;

        app.focus_chips(ChipRow::Tags);
        app.activate_chip();
        assert_eq!(app.route().name(), "TagView");
        assert_eq!(*app.route(), Route::Tag { id: 1 });

        app.back();
        app.process_mount().await;
        app.focus_chips(ChipRow::Stores);
        app.activate_chip();
        assert_eq!(app.route().name(), "StoreView");
        assert_eq!(*app.route(), Route::Store { id: 1 });
    }

    #[tokio::test]
    async fn detail_mount_fetches_game_then_screenshots() {
        let (mut app, server) = app_with(
            vec![
                (
                    "/games/42/screenshots",
                    200,
                    r#"{"count":1,"results":[{"id":9,"image":"s.jpg"}]}"#.into(),
                ),
                ("/games/42", 200, r#"{"id":42,"name":"The Answer"}"#.into()),
            ],
            Route::GameDetail { id: 42 },
        )
        .await;

        app.process_mount().await;

        let requests = server.requests();
        assert!(requests[0].starts_with("/games/42?"));
        assert!(requests[1].starts_with("/games/42/screenshots?"));
        assert_eq!(app.detail_game().unwrap().name, "The Answer");
        assert_eq!(app.store.screenshots().len(), 1);
        assert_eq!(app.heading(), "The Answer");
    }

    #[tokio::test]
    async fn detail_mount_skips_game_fetch_when_cached() {
        let (mut app, server) = app_with(
            vec![
                (
                    "/games/1/screenshots",
                    200,
                    r#"{"count":0,"results":[]}"#.into(),
                ),
                ("/games", 200, games_page(&[1, 2], 2)),
            ],
            Route::Home,
        )
        .await;
        app.process_mount().await;

        app.open_selected();
        assert_eq!(*app.route(), Route::GameDetail { id: 1 });
        app.process_mount().await;

        let detail_fetches = server
            .requests()
            .iter()
            .filter(|r| r.starts_with("/games/1?"))
            .count();
        assert_eq!(detail_fetches, 0, "cached game must not refetch on detail mount");
    }

    #[tokio::test]
    async fn favorites_toggle_is_idempotent_and_ordered() {
        let (mut app, _server) = app_with(vec![], Route::Home).await;

        app.toggle_favorite(3);
        app.toggle_favorite(1);
        app.toggle_favorite(2);
        assert!(app.is_favorite(3));
        let order: Vec<u64> = app.favorites.iter().copied().collect();
        assert_eq!(order, vec![3, 1, 2]);

        app.toggle_favorite(1);
        assert!(!app.is_favorite(1));
        app.toggle_favorite(1);
        app.toggle_favorite(1);
        assert!(!app.is_favorite(1), "double toggle must cancel out");
    }

    #[tokio::test]
    async fn favorites_mount_refetches_evicted_games() {
        let (mut app, server) = app_with(
            vec![
                ("/games/5", 200, r#"{"id":5,"name":"Evicted"}"#.into()),
                ("/games", 200, games_page(&[1], 1)),
            ],
            Route::Home,
        )
        .await;
        app.process_mount().await;

        app.toggle_favorite(5);
        app.toggle_favorite(1);
        app.navigate(Route::Favorites);
        app.process_mount().await;

        // Game 1 is cached from the list page, only game 5 needs a fetch.
        let detail_fetches: Vec<String> = server
            .requests()
            .into_iter()
            .filter(|r| r.starts_with("/games/5?") || r.starts_with("/games/1?"))
            .collect();
        assert_eq!(detail_fetches.len(), 1);
        assert!(detail_fetches[0].starts_with("/games/5?"));
        assert_eq!(app.heading(), "Favorites");
    }

    #[test]
    fn page_count_boundaries() {
        assert_eq!(page_count(0, 12), 1);
        assert_eq!(page_count(12, 12), 1);
        assert_eq!(page_count(13, 12), 2);
        assert_eq!(page_count(24, 24), 1);
        assert_eq!(page_count(25, 24), 2);
    }

    proptest! {
        #[test]
        fn page_count_covers_exactly(total in 0u64..100_000, wide in proptest::bool::ANY) {
            let page_size = if wide { FILTER_PAGE_SIZE } else { LIST_PAGE_SIZE };
            let pages = page_count(total, page_size);
            prop_assert!(pages >= 1);
            prop_assert!(u64::from(pages) * u64::from(page_size) >= total);
            prop_assert!((u64::from(pages) - 1) * u64::from(page_size) < total.max(1));
        }
    }
}
