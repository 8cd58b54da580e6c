//! Implements Directory with hard-coded fixture data.
//!
//! Stands in for the real people/places service: case-insensitive substring
//! search over static arrays, with a short simulated lookup delay.

use crate::domain::{GatewayError, LocationRef, UserRef};
use crate::ports::Directory;
use std::time::Duration;
use tracing::debug;

const HASHTAG_SUGGESTIONS: [&str; 18] = [
    "#photography",
    "#instagood",
    "#photooftheday",
    "#beautiful",
    "#happy",
    "#love",
    "#nature",
    "#art",
    "#style",
    "#life",
    "#travel",
    "#food",
    "#fitness",
    "#motivation",
    "#inspiration",
    "#sunset",
    "#friends",
    "#family",
];

fn fixture_users() -> Vec<UserRef> {
    let rows: [(u64, &str, &str, bool); 7] = [
        (1, "sarah_johnson", "Sarah Johnson", true),
        (2, "mike_chen", "Mike Chen", true),
        (3, "emma_davis", "Emma Davis", false),
        (4, "alex_rodriguez", "Alex Rodriguez", true),
        (5, "lisa_kim", "Lisa Kim", false),
        (6, "david_wilson", "David Wilson", true),
        (7, "jessica_brown", "Jessica Brown", false),
    ];
    rows.into_iter()
        .map(|(id, username, display_name, following)| UserRef {
            id,
            username: username.to_string(),
            display_name: display_name.to_string(),
            following,
        })
        .collect()
}

fn fixture_locations() -> Vec<LocationRef> {
    let rows: [(u64, &str, &str); 7] = [
        (1, "Central Park", "New York, NY, USA"),
        (2, "Times Square", "Manhattan, NY, USA"),
        (3, "Brooklyn Bridge", "Brooklyn, NY, USA"),
        (4, "Statue of Liberty", "Liberty Island, NY, USA"),
        (5, "Empire State Building", "Manhattan, NY, USA"),
        (6, "High Line", "Manhattan, NY, USA"),
        (7, "One World Trade Center", "Manhattan, NY, USA"),
    ];
    rows.into_iter()
        .map(|(id, name, address)| LocationRef {
            id,
            name: name.to_string(),
            address: address.to_string(),
        })
        .collect()
}

/// Fixture-backed directory. No I/O.
pub struct FixtureDirectory {
    /// Simulated lookup delay in milliseconds.
    delay_ms: u64,
}

impl FixtureDirectory {
    pub fn new() -> Self {
        Self { delay_ms: 150 }
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    async fn simulate_lookup(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

impl Default for FixtureDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Directory for FixtureDirectory {
    async fn search_users(&self, query: &str) -> Result<Vec<UserRef>, GatewayError> {
        self.simulate_lookup().await;
        let q = query.to_lowercase();
        let results: Vec<UserRef> = fixture_users()
            .into_iter()
            .filter(|u| {
                q.is_empty()
                    || u.username.to_lowercase().contains(&q)
                    || u.display_name.to_lowercase().contains(&q)
            })
            .collect();
        debug!(query, hits = results.len(), "user search");
        Ok(results)
    }

    async fn search_locations(&self, query: &str) -> Result<Vec<LocationRef>, GatewayError> {
        self.simulate_lookup().await;
        let q = query.to_lowercase();
        let results: Vec<LocationRef> = fixture_locations()
            .into_iter()
            .filter(|l| q.is_empty() || l.name.to_lowercase().contains(&q))
            .collect();
        debug!(query, hits = results.len(), "location search");
        Ok(results)
    }

    async fn suggest_hashtags(&self, prefix: &str) -> Result<Vec<String>, GatewayError> {
        self.simulate_lookup().await;
        let p = prefix.to_lowercase();
        Ok(HASHTAG_SUGGESTIONS
            .iter()
            .filter(|h| h.starts_with(&p) || p == "#" || p.is_empty())
            .map(|h| h.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn user_search_matches_username_and_name() {
        let dir = FixtureDirectory::with_delay(0);
        let by_username = dir.search_users("mike").await.expect("search");
        assert_eq!(by_username.len(), 1);
        assert_eq!(by_username[0].username, "mike_chen");

        let by_name = dir.search_users("Davis").await.expect("search");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, 3);

        let all = dir.search_users("").await.expect("search");
        assert_eq!(all.len(), 7);
    }

    #[tokio::test]
    async fn location_search_is_case_insensitive() {
        let dir = FixtureDirectory::with_delay(0);
        let hits = dir.search_locations("bridge").await.expect("search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Brooklyn Bridge");
    }

    #[tokio::test]
    async fn hashtag_prefix_filtering() {
        let dir = FixtureDirectory::with_delay(0);
        let sun = dir.suggest_hashtags("#sun").await.expect("suggest");
        assert_eq!(sun, vec!["#sunset".to_string()]);

        let bare = dir.suggest_hashtags("#").await.expect("suggest");
        assert_eq!(bare.len(), 18);
    }
}
