//! On-page SEO checks over the extracted home page signals.

use super::policy::{
    CANONICAL, FAVICON, H1, LANG, META_DESCRIPTION, ON_PAGE_CHECKS, OPEN_GRAPH, STRUCTURED_DATA,
    TITLE, TWITTER_CARD, VIEWPORT,
};
use super::{Check, Section, SectionName};
use crate::config::Thresholds;
use crate::signals::{OnPageSignals, PageSignals};

/// Value shown for every check when the page could not be read.
pub const UNAVAILABLE_VALUE: &str = "\u{2014}";

const UNAVAILABLE_FIX: &str =
    "The home page could not be fetched or parsed; make sure it loads, then re-run the audit.";

pub fn evaluate(signals: &PageSignals, thresholds: &Thresholds) -> Section {
    match signals {
        PageSignals::Extracted(s) => extracted(s, thresholds),
        PageSignals::Unavailable => unavailable(),
    }
}

fn unavailable() -> Section {
    let mut section = Section::new(SectionName::OnPage);
    for rule in &ON_PAGE_CHECKS {
        section.push(rule.key, rule.warn(UNAVAILABLE_VALUE, UNAVAILABLE_FIX));
    }
    section
}

fn extracted(s: &OnPageSignals, t: &Thresholds) -> Section {
    let mut section = Section::new(SectionName::OnPage);
    section.push(TITLE.key, title(s.title.as_deref(), t));
    section.push(
        META_DESCRIPTION.key,
        meta_description(s.meta_description.as_deref(), t),
    );
    section.push(CANONICAL.key, canonical(s.canonical.as_deref()));
    section.push(VIEWPORT.key, viewport(s));
    section.push(H1.key, h1(s.h1_count));
    section.push(OPEN_GRAPH.key, open_graph(s));
    section.push(TWITTER_CARD.key, twitter_card(s.twitter_card.as_deref()));
    section.push(STRUCTURED_DATA.key, structured_data(s.structured_data_count));
    section.push(LANG.key, lang(s.lang.as_deref()));
    section.push(FAVICON.key, favicon(s.favicon));
    section
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn title(title: Option<&str>, t: &Thresholds) -> Check {
    let fix = format!(
        "Write a unique, descriptive <title> of {}-{} characters.",
        t.title_min, t.title_max
    );
    match title {
        None => TITLE.fail("Missing", &fix),
        Some(text) => {
            let len = char_len(text);
            let value = format!("{len} chars: \"{text}\"");
            if (t.title_min..=t.title_max).contains(&len) {
                TITLE.pass(value)
            } else {
                TITLE.warn(value, &fix)
            }
        }
    }
}

fn meta_description(desc: Option<&str>, t: &Thresholds) -> Check {
    let fix = format!(
        "Add a <meta name=\"description\"> summarizing the page in {}-{} characters.",
        t.description_min, t.description_max
    );
    match desc {
        None => META_DESCRIPTION.fail("Missing", &fix),
        Some(text) => {
            let len = char_len(text);
            let value = format!("{len} chars");
            if (t.description_min..=t.description_max).contains(&len) {
                META_DESCRIPTION.pass(value)
            } else {
                META_DESCRIPTION.warn(value, &fix)
            }
        }
    }
}

fn canonical(href: Option<&str>) -> Check {
    match href {
        Some(href) => CANONICAL.pass(href),
        None => CANONICAL.warn(
            "Missing",
            "Add <link rel=\"canonical\"> pointing at the preferred URL of the page.",
        ),
    }
}

fn viewport(s: &OnPageSignals) -> Check {
    const FIX: &str =
        "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">.";
    match s.viewport.as_deref() {
        Some(content) if s.has_viewport_width() => VIEWPORT.pass(content),
        Some(content) => VIEWPORT.fail(format!("No width set ({content})"), FIX),
        None => VIEWPORT.fail("Missing", FIX),
    }
}

fn h1(count: usize) -> Check {
    match count {
        0 => H1.fail("None found", "Add exactly one <h1> describing the page."),
        1 => H1.pass("1 found"),
        n => H1.warn(
            format!("{n} found"),
            "Keep a single <h1> per page and demote the others to <h2>.",
        ),
    }
}

fn open_graph(s: &OnPageSignals) -> Check {
    let og = &s.open_graph;
    if og.is_complete() {
        return OPEN_GRAPH.pass("og:title, og:description, og:image, og:url present");
    }
    OPEN_GRAPH.warn(
        format!("Missing {}", og.missing().join(", ")),
        "Add og:title, og:description, og:image and og:url meta tags for link previews.",
    )
}

fn twitter_card(card: Option<&str>) -> Check {
    match card {
        Some(card) => TWITTER_CARD.pass(card),
        None => TWITTER_CARD.warn(
            "Missing",
            "Add <meta name=\"twitter:card\" content=\"summary_large_image\">.",
        ),
    }
}

fn structured_data(count: usize) -> Check {
    if count > 0 {
        STRUCTURED_DATA.pass(format!("{count} JSON-LD block(s)"))
    } else {
        STRUCTURED_DATA.warn(
            "None found",
            "Describe the organization or page with schema.org JSON-LD.",
        )
    }
}

fn lang(lang: Option<&str>) -> Check {
    match lang {
        Some(lang) => LANG.pass(lang),
        None => LANG.warn("Missing", "Set the page language, e.g. <html lang=\"en\">."),
    }
}

fn favicon(found: bool) -> Check {
    if found {
        FAVICON.pass("Found")
    } else {
        FAVICON.warn(
            "Missing",
            "Add a favicon with <link rel=\"icon\" href=\"/favicon.ico\">.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Status;
    use crate::signals::extract;

    fn section(html: &str) -> Section {
        evaluate(&extract(Some(html)), &Thresholds::default())
    }

    fn status(section: &Section, key: &str) -> Status {
        section.get(key).unwrap().status
    }

    #[test]
    fn test_title_bands() {
        let t = Thresholds::default();
        assert_eq!(title(Some(&"a".repeat(45)), &t).status, Status::Pass);
        assert_eq!(title(Some(&"a".repeat(30)), &t).status, Status::Pass);
        assert_eq!(title(Some(&"a".repeat(60)), &t).status, Status::Pass);
        assert_eq!(title(Some(&"a".repeat(10)), &t).status, Status::Warn);
        assert_eq!(title(Some(&"a".repeat(61)), &t).status, Status::Warn);
        assert_eq!(title(None, &t).status, Status::Fail);
    }

    #[test]
    fn test_title_from_markup() {
        let s = section(&format!("<title>{}</title>", "x".repeat(45)));
        assert_eq!(status(&s, "title"), Status::Pass);
        let s = section("<title>Short page</title>");
        assert_eq!(status(&s, "title"), Status::Warn);
        let s = section("<p>no title here</p>");
        assert_eq!(status(&s, "title"), Status::Fail);
    }

    #[test]
    fn test_description_bands() {
        let t = Thresholds::default();
        assert_eq!(meta_description(Some(&"d".repeat(120)), &t).status, Status::Pass);
        assert_eq!(meta_description(Some(&"d".repeat(160)), &t).status, Status::Pass);
        assert_eq!(meta_description(Some(&"d".repeat(50)), &t).status, Status::Warn);
        assert_eq!(meta_description(None, &t).status, Status::Fail);
    }

    #[test]
    fn test_h1_counts() {
        assert_eq!(h1(0).status, Status::Fail);
        assert_eq!(h1(1).status, Status::Pass);
        assert_eq!(h1(3).status, Status::Warn);
    }

    #[test]
    fn test_viewport_without_width_fails() {
        let s = section(r#"<meta name="viewport" content="initial-scale=1">"#);
        assert_eq!(status(&s, "viewport"), Status::Fail);
    }

    #[test]
    fn test_bare_page_advisories_only_warn() {
        let s = section("<html><body><p>hello</p></body></html>");
        for key in ["canonical", "open_graph", "twitter_card", "structured_data", "lang", "favicon"] {
            assert_eq!(status(&s, key), Status::Warn, "{key}");
        }
        for key in ["title", "meta_description", "viewport", "h1"] {
            assert_eq!(status(&s, key), Status::Fail, "{key}");
        }
    }

    #[test]
    fn test_unavailable_page_is_all_warn() {
        let s = evaluate(&PageSignals::Unavailable, &Thresholds::default());
        assert_eq!(s.len(), 10);
        for (key, check) in s.iter() {
            assert_eq!(check.status, Status::Warn, "{key}");
            assert_eq!(check.value, "\u{2014}");
            assert!(check.fix.is_some());
        }
    }

    #[test]
    fn test_open_graph_lists_missing_keys() {
        let s = section(r#"<meta property="og:title" content="x">"#);
        let check = s.get("open_graph").unwrap();
        assert_eq!(check.status, Status::Warn);
        assert_eq!(check.value, "Missing og:description, og:image, og:url");
    }
}
