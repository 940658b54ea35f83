//! AI/LLM readiness: llms.txt, llms-full.txt, AI crawler access, security.txt.

use super::policy::{AI_CRAWLER_ACCESS, LLMS_FULL_TXT, LLMS_TXT, SECURITY_TXT};
use super::{Check, Section, SectionName};
use crate::acquisition::{FetchBundle, FetchedResource};
use crate::signals::robots;
use regex::Regex;
use std::sync::OnceLock;

fn h1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#\s+.+").expect("valid regex"))
}

fn blockquote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^>").expect("valid regex"))
}

pub fn evaluate(bundle: &FetchBundle, ai_crawlers: &[String]) -> Section {
    let mut section = Section::new(SectionName::AiLlm);
    section.push(LLMS_TXT.key, llms_txt(&bundle.llms_txt));
    section.push(LLMS_FULL_TXT.key, llms_full_txt(&bundle.llms_full_txt));
    section.push(
        AI_CRAWLER_ACCESS.key,
        ai_crawler_access(&bundle.robots, ai_crawlers),
    );
    section.push(SECURITY_TXT.key, security_txt(&bundle.security_txt));
    section
}

fn llms_txt(res: &FetchedResource) -> Check {
    let Some(txt) = res.text() else {
        return LLMS_TXT.fail(
            "Not found",
            "Publish /llms.txt: a markdown summary with an H1 title and a > blockquote description.",
        );
    };

    let has_h1 = h1_re().is_match(txt);
    let has_quote = blockquote_re().is_match(txt);
    match (has_h1, has_quote) {
        (true, true) => LLMS_TXT.pass("Found with H1 title and summary blockquote"),
        _ => {
            let mut missing = Vec::new();
            if !has_h1 {
                missing.push("H1 title");
            }
            if !has_quote {
                missing.push("blockquote summary");
            }
            LLMS_TXT.warn(
                format!("Found, but missing {}", missing.join(" and ")),
                "Start llms.txt with \"# Site name\" followed by a \"> one-line summary\".",
            )
        }
    }
}

fn llms_full_txt(res: &FetchedResource) -> Check {
    match res.text() {
        Some(txt) => LLMS_FULL_TXT.pass(format!("Found ({} chars)", txt.chars().count())),
        None => LLMS_FULL_TXT.warn(
            "Not found",
            "Optionally publish /llms-full.txt with the full site content in markdown.",
        ),
    }
}

fn ai_crawler_access(robots_res: &FetchedResource, ai_crawlers: &[String]) -> Check {
    let Some(txt) = robots_res.text() else {
        return AI_CRAWLER_ACCESS.pass("No robots.txt; all AI crawlers allowed");
    };

    let blocked = robots::blocked_crawlers(txt, ai_crawlers);
    if blocked.is_empty() {
        AI_CRAWLER_ACCESS.pass(format!("All {} AI crawlers allowed", ai_crawlers.len()))
    } else {
        AI_CRAWLER_ACCESS.warn(
            format!("Blocked: {}", blocked.join(", ")),
            "Allow AI crawlers in robots.txt if you want the site cited in AI answers.",
        )
    }
}

fn security_txt(res: &FetchedResource) -> Check {
    match res.text() {
        Some(_) => SECURITY_TXT.pass("Found at /.well-known/security.txt"),
        None => SECURITY_TXT.warn(
            "Not found",
            "Publish /.well-known/security.txt with a Contact: line (RFC 9116).",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Status;
    use crate::config::DEFAULT_AI_CRAWLERS;

    fn crawlers() -> Vec<String> {
        DEFAULT_AI_CRAWLERS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_llms_txt_states() {
        assert_eq!(llms_txt(&FetchedResource::absent()).status, Status::Fail);
        assert_eq!(llms_txt(&FetchedResource::with_body("  ")).status, Status::Fail);

        let good = FetchedResource::with_body("# Acme\n\n> Widgets for everyone.\n\n## Docs\n");
        assert_eq!(llms_txt(&good).status, Status::Pass);

        let no_quote = FetchedResource::with_body("# Acme\nSome text");
        let check = llms_txt(&no_quote);
        assert_eq!(check.status, Status::Warn);
        assert!(check.value.contains("blockquote"));

        let h2_only = FetchedResource::with_body("## Acme\n> summary");
        assert_eq!(llms_txt(&h2_only).status, Status::Warn);
    }

    #[test]
    fn test_llms_full_txt_never_fails() {
        assert_eq!(llms_full_txt(&FetchedResource::absent()).status, Status::Warn);
        assert_eq!(
            llms_full_txt(&FetchedResource::with_body("everything")).status,
            Status::Pass
        );
    }

    #[test]
    fn test_ai_crawler_blocked() {
        let robots = FetchedResource::with_body("User-agent: GPTBot\nDisallow: /");
        let check = ai_crawler_access(&robots, &crawlers());
        assert_eq!(check.status, Status::Warn);
        assert!(check.value.contains("GPTBot"));
        assert!(!check.value.contains("ClaudeBot"));
    }

    #[test]
    fn test_wildcard_block_hits_every_crawler() {
        let robots = FetchedResource::with_body("User-agent: *\nDisallow: /");
        let check = ai_crawler_access(&robots, &crawlers());
        assert_eq!(
            check.value,
            "Blocked: GPTBot, ClaudeBot, Google-Extended, PerplexityBot, Applebot-Extended"
        );
    }

    #[test]
    fn test_ai_crawlers_allowed() {
        assert_eq!(
            ai_crawler_access(&FetchedResource::absent(), &crawlers()).status,
            Status::Pass
        );
        let robots = FetchedResource::with_body("User-agent: *\nDisallow: /admin");
        assert_eq!(ai_crawler_access(&robots, &crawlers()).status, Status::Pass);
    }

    #[test]
    fn test_security_txt() {
        assert_eq!(security_txt(&FetchedResource::absent()).status, Status::Warn);
        assert_eq!(
            security_txt(&FetchedResource::with_body("Contact: mailto:sec@x")).status,
            Status::Pass
        );
    }
}
