pub mod base;
pub mod fragments;
pub mod gigs_comedy_html;
pub mod nightlife_html;

use crate::fetch::PageFetcher;
use crate::models::EventRecord;

pub use gigs_comedy_html::extract;

pub const DEFAULT_CATEGORY: &str = "gigs-comedy";

pub trait CategoryScraper: Send + Sync {
    fn slug(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn fetch(&self, fetcher: &dyn PageFetcher, date: &str) -> anyhow::Result<Vec<EventRecord>>;
}

fn active_scrapers() -> Vec<Box<dyn CategoryScraper>> {
    vec![
        Box::new(gigs_comedy_html::GigsComedy),
        Box::new(nightlife_html::Nightlife),
    ]
}

fn find_scraper(slug: &str) -> Option<Box<dyn CategoryScraper>> {
    active_scrapers()
        .into_iter()
        .find(|scraper| scraper.slug() == slug)
}

/// Scrapes one category for `date`. Unknown categories and failed
/// fetches both come back as an empty list.
pub fn run_category(slug: &str, fetcher: &dyn PageFetcher, date: &str) -> Vec<EventRecord> {
    let Some(scraper) = find_scraper(slug) else {
        tracing::info!(category = slug, "no scraper for category");
        return Vec::new();
    };

    tracing::info!(category = scraper.label(), %date, "fetching events");
    match scraper.fetch(fetcher, date) {
        Ok(events) => events,
        Err(err) => {
            tracing::warn!(category = slug, "error during scraping: {err:#}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StaticFetcher;

    const PAGE: &str = r#"
    <section class="eventListing"><h5 class="title"><a href="/events/1">Quiz Night</a></h5></section>"#;

    #[test]
    fn runs_the_gigs_scraper() {
        let fetcher = StaticFetcher::serving(PAGE);
        let events = run_category(DEFAULT_CATEGORY, &fetcher, "2025-12-05");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Quiz Night");
    }

    #[test]
    fn unknown_category_is_empty_without_fetching() {
        let fetcher = StaticFetcher::serving(PAGE);
        assert!(run_category("unknown-category", &fetcher, "2025-12-05").is_empty());
        assert!(fetcher.queries().is_empty());
    }

    #[test]
    fn stubbed_category_is_empty() {
        let fetcher = StaticFetcher::serving(PAGE);
        assert!(run_category("nightlife", &fetcher, "2025-12-05").is_empty());
        assert!(fetcher.queries().is_empty());
    }

    #[test]
    fn fetch_failure_becomes_empty_list() {
        let fetcher = StaticFetcher::failing();
        assert!(run_category(DEFAULT_CATEGORY, &fetcher, "2025-12-05").is_empty());
        assert_eq!(fetcher.queries().len(), 1);
    }
}
