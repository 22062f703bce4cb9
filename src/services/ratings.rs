use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{info, warn};

use crate::api::LichessClient;
use crate::config::get_players;
use crate::config::settings::AppConfig;
use crate::database::{self, snapshots, DbPool, HistoryPoint};
use crate::domain::{GameSummary, PlayerRatingSnapshot, RatingCategory};
use crate::fetchers::ProfileScraper;

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Live Lichess lookups plus reads and writes of the snapshot store
pub struct RatingService {
    pool: DbPool,
    lichess: LichessClient,
    scraper: ProfileScraper,
}

impl RatingService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            pool: database::create_pool(&config.storage.database_path)?,
            lichess: LichessClient::new(&config.lichess)?,
            scraper: ProfileScraper::new()?,
        })
    }

    /// Ratings of every tracked player straight from Lichess.
    /// Players whose page cannot be fetched are left out.
    pub async fn live_ratings(&mut self, date: NaiveDate) -> Vec<PlayerRatingSnapshot> {
        let mut fetched = Vec::new();

        for player in get_players() {
            match self.lichess.fetch_profile_page(player.nickname).await {
                Ok(Some(html)) => {
                    fetched.push(self.scraper.extract(&html, player.nickname, date));
                }
                Ok(None) => warn!("Skipping {}: profile unavailable", player.nickname),
                Err(e) => warn!("Skipping {}: {:#}", player.nickname, e),
            }
        }

        fetched
    }

    /// Fetch live ratings and store them as the snapshot for `date`
    pub async fn record_snapshots(&mut self, date: NaiveDate) -> Result<Vec<PlayerRatingSnapshot>> {
        let fetched = self.live_ratings(date).await;
        let mut conn = database::get_connection(&self.pool)?;

        for snapshot in &fetched {
            snapshots::replace_snapshot(&mut conn, snapshot)?;
            info!("  → Stored {} for {}", snapshot.nickname, snapshot.date);
        }

        Ok(fetched)
    }

    pub fn stored_for_date(&self, date: NaiveDate) -> Result<Vec<PlayerRatingSnapshot>> {
        let mut conn = database::get_connection(&self.pool)?;
        snapshots::list_for_date(&mut conn, date)
    }

    pub fn history(&self, player: &str, category: RatingCategory) -> Result<Vec<HistoryPoint>> {
        let mut conn = database::get_connection(&self.pool)?;
        snapshots::list_history(&mut conn, player, category)
    }

    pub async fn last_game_summary(&mut self, player: &str) -> Result<GameSummary> {
        let record = self.lichess.fetch_last_game(player).await?;
        Ok(GameSummary::from_record(&record))
    }

    #[cfg(test)]
    pub(crate) fn store(&self, snapshot: &PlayerRatingSnapshot) -> Result<()> {
        let mut conn = database::get_connection(&self.pool)?;
        snapshots::replace_snapshot(&mut conn, snapshot)
    }
}
