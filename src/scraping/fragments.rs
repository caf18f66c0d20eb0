//! Content sniffing for the unlabeled `span.price` fragments on a
//! listing, which carry the date, the time and the price in no fixed
//! order.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use super::base;

static MONTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec").expect("valid month regex")
});
static BOLD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("b").expect("fragment bold selector"));

const SEPARATOR: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Date(String),
    Time(String),
    Price(String),
    Unknown,
}

/// Text of a fragment plus the text of its first `<b>` child, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFragment {
    pub text: String,
    pub bold: Option<String>,
}

impl RawFragment {
    #[cfg(test)]
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_bold(text: impl Into<String>, bold: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: Some(bold.into()),
        }
    }

    pub fn from_element(element: ElementRef<'_>) -> Self {
        Self {
            text: base::inner_text(element),
            bold: base::first_element(&element, &BOLD_SELECTOR).map(base::inner_text),
        }
    }
}

struct Rule {
    name: &'static str,
    apply: fn(&RawFragment) -> Option<Fragment>,
}

/// Evaluated top to bottom; the first rule that matches decides.
static RULES: [Rule; 3] = [
    Rule {
        name: "month-abbreviation",
        apply: month_rule,
    },
    Rule {
        name: "meridiem-or-bold",
        apply: time_rule,
    },
    Rule {
        name: "non-separator",
        apply: price_rule,
    },
];

fn month_rule(raw: &RawFragment) -> Option<Fragment> {
    MONTH_RE
        .is_match(&raw.text)
        .then(|| Fragment::Date(raw.text.clone()))
}

fn time_rule(raw: &RawFragment) -> Option<Fragment> {
    let lower = raw.text.to_lowercase();
    if lower.contains("am") || lower.contains("pm") || raw.bold.is_some() {
        let text = raw.bold.clone().unwrap_or_else(|| raw.text.clone());
        return Some(Fragment::Time(text));
    }
    None
}

fn price_rule(raw: &RawFragment) -> Option<Fragment> {
    let text = raw.text.as_str();
    (!text.is_empty() && text != SEPARATOR).then(|| Fragment::Price(text.to_string()))
}

pub fn classify(raw: &RawFragment) -> Fragment {
    for rule in RULES.iter() {
        if let Some(fragment) = (rule.apply)(raw) {
            tracing::trace!(rule = rule.name, text = %raw.text, "classified fragment");
            return fragment;
        }
    }
    Fragment::Unknown
}

/// The date, time and price recovered from one listing. A later
/// fragment of the same kind replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentSlots {
    pub date: Option<String>,
    pub time: Option<String>,
    pub price: Option<String>,
}

impl FragmentSlots {
    pub fn absorb(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::Date(text) => self.date = Some(text),
            Fragment::Time(text) => self.time = Some(text),
            Fragment::Price(text) => self.price = Some(text),
            Fragment::Unknown => {}
        }
    }

    pub fn from_fragments<I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = RawFragment>,
    {
        let mut slots = Self::default();
        for raw in fragments {
            slots.absorb(classify(&raw));
        }
        slots
    }
}
