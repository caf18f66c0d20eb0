use reqwest::Url;
use scraper::{ElementRef, Selector};

pub fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn inner_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

pub fn first_element<'a>(element: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

pub fn first_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    first_element(element, selector)
        .map(inner_text)
        .filter(|text| !text.is_empty())
}

pub fn first_attr(element: &ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    first_element(element, selector)
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

pub fn absolute_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return Url::parse(href).ok().map(String::from);
    }
    let base_url = Url::parse(base).ok()?;
    base_url.join(href).ok().map(String::from)
}

/// Keeps at most `max` characters, never splitting a code point.
pub fn truncate_chars(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((idx, _)) => input[..idx].to_string(),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_text("  Live \n\t at   the Bullingdon "), "Live at the Bullingdon");
        assert_eq!(clean_text("   "), "");
    }

    #[test]
    fn first_text_skips_blank_matches() {
        let fragment = Html::parse_fragment(r#"<div><p class="x">  </p><p class="x">second</p></div>"#);
        let root = fragment.root_element();
        let selector = Selector::parse("p.x").unwrap();
        assert_eq!(first_text(&root, &selector), None);
    }

    #[test]
    fn resolves_relative_links() {
        assert_eq!(
            absolute_url("https://www.dailyinfo.co.uk", "/events/123-jazz").as_deref(),
            Some("https://www.dailyinfo.co.uk/events/123-jazz")
        );
        assert_eq!(
            absolute_url("https://www.dailyinfo.co.uk", "https://tickets.example.com/a").as_deref(),
            Some("https://tickets.example.com/a")
        );
        assert_eq!(absolute_url("https://www.dailyinfo.co.uk", "https://[broken"), None);
    }

    #[test]
    fn truncates_on_character_boundaries() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("£££££", 2), "££");
        assert_eq!(truncate_chars("", 200), "");
    }
}
