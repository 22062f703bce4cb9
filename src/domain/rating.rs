use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::FlowError;

/// Time-control class a rating belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingCategory {
    Bullet,
    Blitz,
    Rapid,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 3] = [Self::Bullet, Self::Blitz, Self::Rapid];

    /// Heading used on the profile page and in chat output
    pub fn label(self) -> &'static str {
        match self {
            Self::Bullet => "Bullet",
            Self::Blitz => "Blitz",
            Self::Rapid => "Rapid",
        }
    }

    /// Column of the `rating` table holding this category
    pub fn column(self) -> &'static str {
        match self {
            Self::Bullet => "Bullet",
            Self::Blitz => "Blitz",
            Self::Rapid => "Rapid",
        }
    }

    /// Exact match against a profile heading
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RatingCategory {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FlowError::UnknownCategory(trimmed.to_string()))
    }
}

/// Ratings of one player as seen on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRatingSnapshot {
    pub nickname: String,
    pub bullet: Option<u32>,
    pub blitz: Option<u32>,
    pub rapid: Option<u32>,
    pub date: NaiveDate,
}

impl PlayerRatingSnapshot {
    /// Snapshot with every category unknown
    pub fn unknown(nickname: &str, date: NaiveDate) -> Self {
        Self {
            nickname: nickname.to_string(),
            bullet: None,
            blitz: None,
            rapid: None,
            date,
        }
    }

    pub fn get(&self, category: RatingCategory) -> Option<u32> {
        match category {
            RatingCategory::Bullet => self.bullet,
            RatingCategory::Blitz => self.blitz,
            RatingCategory::Rapid => self.rapid,
        }
    }

    pub fn set(&mut self, category: RatingCategory, value: Option<u32>) {
        match category {
            RatingCategory::Bullet => self.bullet = value,
            RatingCategory::Blitz => self.blitz = value,
            RatingCategory::Rapid => self.rapid = value,
        }
    }
}

/// Parse a rating cell, dropping the provisional `?` marker.
/// Anything that is not a plain non-negative integer is unknown.
pub fn parse_rating(text: &str) -> Option<u32> {
    let cleaned = text.replace('?', "");
    cleaned.trim().parse().ok()
}

/// Render a rating for chat output
pub fn format_rating(value: Option<u32>) -> String {
    match value {
        Some(rating) => rating.to_string(),
        None => "N/A".to_string(),
    }
}
