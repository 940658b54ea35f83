//! Crawlability: HTTPS, robots.txt, sitemap and response time.

use super::policy::{HTTPS, RESPONSE_TIME, ROBOTS_TXT, SITEMAP};
use super::{Check, Section, SectionName};
use crate::acquisition::{FetchBundle, FetchedResource};
use crate::config::Thresholds;
use crate::signals::robots;

const SITEMAP_MARKERS: [&str; 3] = ["<url>", "<sitemap>", "<sitemapindex"];

pub fn evaluate(bundle: &FetchBundle, thresholds: &Thresholds) -> Section {
    let mut section = Section::new(SectionName::Crawlability);
    section.push(HTTPS.key, https(&bundle.home));
    section.push(ROBOTS_TXT.key, robots_txt(&bundle.robots));
    section.push(SITEMAP.key, sitemap(&bundle.sitemap, &bundle.robots));
    section.push(
        RESPONSE_TIME.key,
        response_time(bundle.home.ttfb_millis, thresholds),
    );
    section
}

fn https(home: &FetchedResource) -> Check {
    const FIX: &str = "Serve the site over HTTPS and redirect all HTTP traffic to it.";

    match home.effective_url.as_deref() {
        Some(url) if url.to_ascii_lowercase().starts_with("https://") => {
            HTTPS.pass(format!("Served over HTTPS ({url})"))
        }
        Some(url) => HTTPS.fail(format!("Final URL is not HTTPS ({url})"), FIX),
        None => HTTPS.fail("Site could not be reached over HTTPS", FIX),
    }
}

fn robots_txt(robots_res: &FetchedResource) -> Check {
    match robots_res.text() {
        None => ROBOTS_TXT.warn(
            "Not found",
            "Add a robots.txt at the site root that allows crawling and points to your sitemap.",
        ),
        Some(txt) if robots::wildcard_blocks_root(txt) => ROBOTS_TXT.fail(
            "Blocks all crawlers (User-agent: * / Disallow: /)",
            "Remove the site-wide \"Disallow: /\" rule for User-agent: * unless the site should be hidden.",
        ),
        Some(_) => ROBOTS_TXT.pass("Found; crawling allowed"),
    }
}

fn sitemap(sitemap_res: &FetchedResource, robots_res: &FetchedResource) -> Check {
    if let Some(xml) = sitemap_res.text() {
        if SITEMAP_MARKERS.iter().any(|m| xml.contains(m)) {
            return SITEMAP.pass("Found at /sitemap.xml");
        }
    }

    let declared = robots_res
        .text()
        .map(robots::sitemap_directives)
        .unwrap_or_default();
    if let Some(first) = declared.first() {
        return SITEMAP.pass(format!("Declared in robots.txt ({first})"));
    }

    let value = if sitemap_res.text().is_some() {
        "/sitemap.xml has no <url> or <sitemap> entries"
    } else {
        "No sitemap found"
    };
    SITEMAP.fail(
        value,
        "Publish an XML sitemap at /sitemap.xml and reference it with a Sitemap: line in robots.txt.",
    )
}

fn response_time(ttfb: Option<u64>, thresholds: &Thresholds) -> Check {
    let fix = format!(
        "Cut time to first byte below {} ms with caching, a CDN or lighter server-side work.",
        thresholds.ttfb_pass_below_ms
    );

    match ttfb {
        None => RESPONSE_TIME.warn("Could not be measured", &fix),
        Some(ms) if ms < thresholds.ttfb_pass_below_ms => RESPONSE_TIME.pass(format!("{ms} ms")),
        Some(ms) if ms < thresholds.ttfb_fail_at_ms => {
            RESPONSE_TIME.warn(format!("{ms} ms"), &fix)
        }
        Some(ms) => RESPONSE_TIME.fail(format!("{ms} ms"), &fix),
    }
}
