//! Route table and navigation state.
//!
//! Mirrors the web-style route table: home, search, per-game detail,
//! favorites, one filtered view per reference kind, and a catch-all that
//! redirects to home. Navigation only records where we are; fetching is
//! the job of the mount that follows.

/// Views addressable by the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search { query: String },
    GameDetail { id: u64 },
    Favorites,
    Genre { id: u64 },
    Tag { id: u64 },
    Store { id: u64 },
}

impl Route {
    /// Route name. Filtered views keep the original app's view names.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Search { .. } => "Search",
            Route::GameDetail { .. } => "GameDetail",
            Route::Favorites => "Favorites",
            Route::Genre { .. } => "GenreView",
            Route::Tag { .. } => "TagView",
            Route::Store { .. } => "StoreView",
        }
    }

    /// Resolve a path string to a route. Anything unrecognized, including
    /// malformed ids, redirects to home.
    pub fn parse(path: &str) -> Route {
        let segments: Vec<&str> = path.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["favorites"] => Route::Favorites,
            ["game", id] => id
                .parse()
                .map(|id| Route::GameDetail { id })
                .unwrap_or(Route::Home),
            ["genre", id] => id.parse().map(|id| Route::Genre { id }).unwrap_or(Route::Home),
            ["tag", id] => id.parse().map(|id| Route::Tag { id }).unwrap_or(Route::Home),
            ["store", id] => id.parse().map(|id| Route::Store { id }).unwrap_or(Route::Home),
            _ => Route::Home,
        }
    }
}

/// Current route plus a back stack.
pub struct Router {
    current: Route,
    back_stack: Vec<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            back_stack: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Switch to a route, remembering the previous one. Navigating to the
    /// current route is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, route);
        self.back_stack.push(previous);
    }

    /// Pop back to the previous route. Returns false at the stack bottom.
    pub fn back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(route) => {
                self.current = route;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/favorites"), Route::Favorites);
        assert_eq!(Route::parse("/game/42"), Route::GameDetail { id: 42 });
        assert_eq!(Route::parse("/genre/4"), Route::Genre { id: 4 });
        assert_eq!(Route::parse("/tag/31"), Route::Tag { id: 31 });
        assert_eq!(Route::parse("/store/1"), Route::Store { id: 1 });
    }

    #[test]
    fn unknown_paths_redirect_home() {
        assert_eq!(Route::parse("/nope"), Route::Home);
        assert_eq!(Route::parse("/game/not-a-number"), Route::Home);
        assert_eq!(Route::parse("/genre/4/extra"), Route::Home);
        assert_eq!(Route::parse("/game"), Route::Home);
    }

    #[test]
    fn filtered_views_keep_their_names() {
        assert_eq!(Route::Genre { id: 1 }.name(), "GenreView");
        assert_eq!(Route::Tag { id: 1 }.name(), "TagView");
        assert_eq!(Route::Store { id: 1 }.name(), "StoreView");
        assert_eq!(Route::Home.name(), "Home");
    }

    #[test]
    fn navigate_and_back() {
        let mut router = Router::new(Route::Home);
        router.navigate(Route::Genre { id: 4 });
        router.navigate(Route::GameDetail { id: 42 });
        assert_eq!(router.current().name(), "GameDetail");

        assert!(router.back());
        assert_eq!(*router.current(), Route::Genre { id: 4 });
        assert!(router.back());
        assert_eq!(*router.current(), Route::Home);
        assert!(!router.back());
        assert_eq!(*router.current(), Route::Home);
    }

    #[test]
    fn navigating_to_current_route_is_a_noop() {
        let mut router = Router::new(Route::Home);
        router.navigate(Route::Home);
        assert!(!router.back(), "no-op navigation must not grow the stack");
    }
}
