//! Owned and recently played game lists

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A title from the owned or recently played games list.
///
/// Identity is `appid`. Fields the API returns beyond the ones named here are
/// kept in `extra` so snapshot files carry them through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub appid: u32,

    #[serde(default)]
    pub name: String,

    /// Total playtime in minutes
    #[serde(default)]
    pub playtime_forever: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Game {
    /// Create a game with only identity fields set
    pub fn new(appid: u32, name: impl Into<String>) -> Self {
        Self {
            appid,
            name: name.into(),
            playtime_forever: 0,
            extra: Map::new(),
        }
    }
}

/// Persisted owned games list (`history/games/latest.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamesSnapshot {
    pub game_count: u32,
    pub games: Vec<Game>,
    #[serde(rename = "fetchedAt", with = "super::iso_millis")]
    pub fetched_at: DateTime<Utc>,
}

impl GamesSnapshot {
    /// Total playtime across the library, rounded to whole hours
    pub fn total_playtime_hours(&self) -> u64 {
        let minutes: u64 = self.games.iter().map(|g| g.playtime_forever).sum();
        (minutes as f64 / 60.0).round() as u64
    }

    /// Games present in `self` but not in `previous`, keyed by appid, in list order
    pub fn added_since<'a>(&'a self, previous: &GamesSnapshot) -> Vec<&'a Game> {
        let known: HashSet<u32> = previous.games.iter().map(|g| g.appid).collect();
        self.games
            .iter()
            .filter(|g| !known.contains(&g.appid))
            .collect()
    }
}

/// Persisted recently played list (`history/stats/recent-latest.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentGamesSnapshot {
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(rename = "fetchedAt", with = "super::iso_millis")]
    pub fetched_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(games: Vec<Game>) -> GamesSnapshot {
        GamesSnapshot {
            game_count: games.len() as u32,
            games,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_game_keeps_unknown_fields() {
        let raw = json!({
            "appid": 620,
            "name": "Portal 2",
            "playtime_forever": 1234,
            "img_icon_url": "abc",
            "has_community_visible_stats": true
        });
        let game: Game = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(game.appid, 620);
        assert_eq!(game.extra["img_icon_url"], "abc");
        assert_eq!(serde_json::to_value(&game).unwrap(), raw);
    }

    #[test]
    fn test_total_playtime_hours_rounds() {
        let mut a = Game::new(1, "A");
        a.playtime_forever = 90;
        let mut b = Game::new(2, "B");
        b.playtime_forever = 0;
        assert_eq!(snapshot(vec![a, b]).total_playtime_hours(), 2);
    }

    #[test]
    fn test_added_since() {
        let previous = snapshot(vec![Game::new(10, "A"), Game::new(20, "B")]);
        let current = snapshot(vec![
            Game::new(10, "A"),
            Game::new(30, "C"),
            Game::new(20, "B"),
            Game::new(40, "D"),
        ]);

        let added: Vec<u32> = current.added_since(&previous).iter().map(|g| g.appid).collect();
        assert_eq!(added, vec![30, 40]);
    }

    #[test]
    fn test_snapshot_timestamp_format() {
        let snap = GamesSnapshot {
            game_count: 0,
            games: vec![],
            fetched_at: DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let value = serde_json::to_value(&snap).unwrap();
        assert_eq!(value["fetchedAt"], "2024-05-01T12:00:00.000Z");
    }
}
