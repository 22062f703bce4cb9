use chrono::NaiveDate;

/// One (Date, rating) row of a player's history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub rating: Option<u32>,
}
