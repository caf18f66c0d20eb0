use anyhow::Result;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use super::base;
use super::fragments::{FragmentSlots, RawFragment};
use super::CategoryScraper;
use crate::fetch::{ListingQuery, PageFetcher};
use crate::models::EventRecord;

const SITE_URL: &str = "https://www.dailyinfo.co.uk";
const CATEGORY_SLUG: &str = "gigs-comedy";
const CATEGORY_ID: &str = "1";
const CATEGORY_LABEL: &str = "Gigs & Comedy";
pub const LISTING_MARKER: &str = "eventListing";

const UNKNOWN_NAME: &str = "Unknown Event";
const DEFAULT_VENUE: &str = "Oxford";
const NO_PRICE: &str = "N/A";
const DESCRIPTION_LIMIT: usize = 200;

static LISTING_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("section.eventListing").expect("dailyinfo listing selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h5.title").expect("dailyinfo title"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("dailyinfo anchor"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("dailyinfo link"));
static DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.description").expect("dailyinfo description"));
static VENUE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.venue").expect("dailyinfo venue"));
static VENUE_BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div.event-listing__date-times-prices-venue--venue")
        .expect("dailyinfo venue block")
});
static ADDRESS_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.aml").expect("dailyinfo address"));
static PRICE_SLOT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.price").expect("dailyinfo price slot"));

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("event link `{0}` cannot be resolved to an absolute url")]
    InvalidLink(String),
}

/// A listing before it is numbered.
#[derive(Debug)]
struct Listing {
    name: String,
    date: String,
    time: String,
    location: String,
    description: String,
    price: String,
    url: String,
}

impl Listing {
    fn into_record(self, id: u32) -> EventRecord {
        EventRecord {
            id,
            name: self.name,
            date: self.date,
            time: self.time,
            location: self.location,
            description: self.description,
            price: self.price,
            category: CATEGORY_LABEL.to_string(),
            url: self.url,
        }
    }
}

pub struct GigsComedy;

impl CategoryScraper for GigsComedy {
    fn slug(&self) -> &'static str {
        CATEGORY_SLUG
    }

    fn label(&self) -> &'static str {
        CATEGORY_LABEL
    }

    fn fetch(&self, fetcher: &dyn PageFetcher, date: &str) -> Result<Vec<EventRecord>> {
        let query = ListingQuery {
            date: date.to_string(),
            category_id: CATEGORY_ID,
            marker: LISTING_MARKER,
        };
        let html = fetcher.fetch_listings(&query)?;
        Ok(extract(&html, date))
    }
}

/// Turns a rendered listings page into event records, in document
/// order and numbered from 1. Listings that fail to parse are logged
/// and left out.
pub fn extract(html: &str, fallback_date: &str) -> Vec<EventRecord> {
    let document = Html::parse_document(html);
    let mut events = Vec::new();

    for (position, card) in document.select(&LISTING_SELECTOR).enumerate() {
        match extract_listing(card, fallback_date) {
            Ok(listing) => {
                let id = events.len() as u32 + 1;
                tracing::debug!(id, name = %listing.name, "parsed event");
                events.push(listing.into_record(id));
            }
            Err(err) => {
                tracing::warn!(listing = position + 1, "skipping listing: {err}");
            }
        }
    }

    tracing::info!(count = events.len(), "parsed listings page");
    events
}

fn extract_listing(card: ElementRef<'_>, fallback_date: &str) -> Result<Listing, ListingError> {
    let title = base::first_element(&card, &TITLE_SELECTOR);
    let name = title
        .as_ref()
        .and_then(|el| base::first_text(el, &ANCHOR_SELECTOR))
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let url = match title
        .as_ref()
        .and_then(|el| base::first_attr(el, &LINK_SELECTOR, "href"))
        .filter(|href| !href.trim().is_empty())
    {
        Some(href) => base::absolute_url(SITE_URL, &href).ok_or(ListingError::InvalidLink(href))?,
        None => String::new(),
    };

    let description = base::first_text(&card, &DESCRIPTION_SELECTOR)
        .map(|text| base::truncate_chars(&text, DESCRIPTION_LIMIT))
        .unwrap_or_default();

    let venue = base::first_element(&card, &VENUE_SELECTOR)
        .and_then(|el| base::first_text(&el, &ANCHOR_SELECTOR))
        .unwrap_or_else(|| DEFAULT_VENUE.to_string());
    let address = base::first_element(&card, &VENUE_BLOCK_SELECTOR)
        .and_then(|el| base::first_text(&el, &ADDRESS_SELECTOR));
    let location = match address {
        Some(address) => format!("{venue}, {address}"),
        None => venue,
    };

    let slots = FragmentSlots::from_fragments(
        card.select(&PRICE_SLOT_SELECTOR).map(RawFragment::from_element),
    );

    Ok(Listing {
        name,
        date: slots.date.unwrap_or_else(|| fallback_date.to_string()),
        time: slots.time.unwrap_or_default(),
        location,
        description,
        price: slots
            .price
            .filter(|price| !price.is_empty())
            .unwrap_or_else(|| NO_PRICE.to_string()),
        url,
    })
}
