use anyhow::Result;

use super::CategoryScraper;
use crate::fetch::PageFetcher;
use crate::models::EventRecord;

pub struct Nightlife;

impl CategoryScraper for Nightlife {
    fn slug(&self) -> &'static str {
        "nightlife"
    }

    fn label(&self) -> &'static str {
        "Nightlife"
    }

    fn fetch(&self, _fetcher: &dyn PageFetcher, _date: &str) -> Result<Vec<EventRecord>> {
        Ok(Vec::new())
    }
}
