//! API response types for the game catalog.

use chrono::NaiveDate;
use serde::Deserialize;

/// A platform a game is available on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Platform {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub year_start: Option<i32>,
    #[serde(default)]
    pub year_end: Option<i32>,
    #[serde(default)]
    pub games_count: u64,
    #[serde(default)]
    pub image_background: Option<String>,
}

/// System requirement text attached to a platform association.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub minimum: Option<String>,
    #[serde(default)]
    pub recommended: Option<String>,
}

/// Association between a game and a platform.
///
/// The list endpoint names the requirements field `requirements_en`,
/// the detail endpoint plain `requirements`; both decode here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GamePlatform {
    pub platform: Platform,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default, alias = "requirements_en")]
    pub requirements: Option<Requirements>,
}

/// A genre reference entity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub games_count: u64,
    #[serde(default)]
    pub image_background: Option<String>,
}

/// A tag reference entity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub games_count: u64,
    #[serde(default)]
    pub image_background: Option<String>,
}

/// A storefront reference entity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Store {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub games_count: u64,
    #[serde(default)]
    pub image_background: Option<String>,
}

/// Association between a game and a storefront.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoreLink {
    #[serde(default)]
    pub id: u64,
    pub store: Store,
}

/// A single screenshot belonging to the most recently viewed game.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Screenshot {
    pub id: u64,
    pub image: String,
}

/// A game entry as returned by both the list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Game {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub metacritic: Option<i32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub released: Option<NaiveDate>,
    #[serde(default)]
    pub platforms: Vec<GamePlatform>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub stores: Vec<StoreLink>,
}

impl Game {
    /// Release year of the earliest known release, for compact list display.
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.released.map(|d| d.year())
    }

    /// Metacritic score formatted for display, `"--"` when unscored.
    pub fn score_label(&self) -> String {
        match self.metacritic {
            Some(score) => score.to_string(),
            None => "--".to_string(),
        }
    }
}

/// Collection response wrapper: `{ results: [...], count: n }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub count: u64,
}
