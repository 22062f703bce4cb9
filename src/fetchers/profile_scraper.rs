use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::domain::{parse_rating, PlayerRatingSnapshot, RatingCategory};

/// Reads Bullet/Blitz/Rapid ratings off a Lichess profile page
///
/// Each rating block on the page is a titled link:
///
/// ```html
/// <a title="..." href="/@/nick/perf/blitz">
///   <span><h3>Blitz</h3><rating><strong>1650</strong></rating></span>
/// </a>
/// ```
///
/// Blocks missing any of those pieces are skipped and the category stays unknown.
pub struct ProfileScraper {
    link: Selector,
    span: Selector,
    heading: Selector,
    rating: Selector,
    strong: Selector,
}

impl ProfileScraper {
    pub fn new() -> Result<Self> {
        Ok(Self {
            link: compile_selector("a[title]")?,
            span: compile_selector("span")?,
            heading: compile_selector("h3")?,
            rating: compile_selector("rating")?,
            strong: compile_selector("strong")?,
        })
    }

    /// Extract one snapshot from raw profile markup
    pub fn extract(&self, html: &str, nickname: &str, date: NaiveDate) -> PlayerRatingSnapshot {
        let document = Html::parse_document(html);
        let mut snapshot = PlayerRatingSnapshot::unknown(nickname, date);

        for (category, value) in self.extract_blocks(&document) {
            snapshot.set(category, value);
        }

        snapshot
    }

    // --- Block Extraction ---

    fn extract_blocks(&self, document: &Html) -> Vec<(RatingCategory, Option<u32>)> {
        document
            .select(&self.link)
            .filter_map(|link| self.read_block(link))
            .collect()
    }

    fn read_block(&self, link: ElementRef) -> Option<(RatingCategory, Option<u32>)> {
        let span = first_match(link, &self.span)?;
        let heading = first_match(span, &self.heading)?;
        let category = RatingCategory::from_label(element_text(heading).trim())?;

        let Some(strong) = first_match(span, &self.rating)
            .and_then(|rating| first_match(rating, &self.strong))
        else {
            debug!("{} block has no rating value, skipping", category);
            return None;
        };

        Some((category, parse_rating(&element_text(strong))))
    }
}

// --- Helpers ---

fn compile_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Failed to compile selector {}: {}", css, e))
}

fn first_match<'a>(element: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

fn element_text(element: ElementRef) -> String {
    element.text().collect()
}
