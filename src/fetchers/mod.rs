mod profile_scraper;

pub use profile_scraper::ProfileScraper;
