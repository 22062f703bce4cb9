use anyhow::Result;
use log::{info, warn};

use crate::config::get_players;
use crate::config::settings::AppConfig;
use crate::services::{today, RatingService};

/// Daily job: store today's ratings of every tracked player
pub struct SnapshotService {
    ratings: RatingService,
}

impl SnapshotService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            ratings: RatingService::new(config)?,
        })
    }

    pub async fn run(&mut self) -> Result<usize> {
        info!("=== Starting Rating Snapshot ===");

        let date = today();
        let stored = self.ratings.record_snapshots(date).await?;

        let expected = get_players().len();
        if stored.len() < expected {
            warn!("  → Only {}/{} players could be fetched", stored.len(), expected);
        }

        info!("=== Snapshot Complete: {} rows for {} ===", stored.len(), date);
        Ok(stored.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ratings::tests::{profile_server, test_config};

    #[tokio::test]
    async fn test_run_stores_only_fetched_players() {
        let server = profile_server().await;
        let mut config = test_config("snapshot_run");
        config.lichess.base_url = server.uri();

        let mut job = SnapshotService::new(&config).unwrap();
        assert_eq!(job.run().await.unwrap(), 1);

        let rows = RatingService::new(&config).unwrap().stored_for_date(today()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].nickname, "Evgeniy1989");
        assert_eq!(rows[0].blitz, Some(1650));
    }
}
