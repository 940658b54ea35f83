//! robots.txt directive checks.
//!
//! Two readings of the same file are offered:
//!
//! - [`blocked_at_root`] answers "is `/` disallowed for this agent" with a
//!   flat active-block flag. It is used once per AI crawler.
//! - [`wildcard_blocks_root`] answers "does the `*` group disallow `/`" with
//!   conventional group semantics. It drives the crawlability verdict.

use regex::Regex;
use std::sync::OnceLock;

fn user_agent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^user-agent\s*:\s*(.*)$").expect("valid regex"))
}

fn root_disallow_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^disallow\s*:\s*/\s*$").expect("valid regex"))
}

fn sitemap_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?im)^[ \t]*sitemap[ \t]*:[ \t]*(\S+)").expect("valid regex"))
}

/// Map `\r\n` and bare `\r` line endings to `\n`.
fn normalize_newlines(txt: &str) -> String {
    txt.replace("\r\n", "\n").replace('\r', "\n")
}

/// Whether the root path is disallowed for `user_agent`.
///
/// A `User-agent` line naming `user_agent` (case-insensitive) or `*` opens a
/// block; a blank or comment line closes it. A `User-agent` line naming some
/// other agent does not close a block that is already open, so
///
/// ```text
/// User-agent: *
/// User-agent: Googlebot
/// Disallow: /
/// ```
///
/// blocks every agent. While a block is open, `Disallow: /` (nothing after
/// the slash) answers `true`.
pub fn blocked_at_root(txt: &str, user_agent: &str) -> bool {
    let mut active = false;

    for line in normalize_newlines(txt).lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            active = false;
            continue;
        }

        if let Some(caps) = user_agent_re().captures(line) {
            let agent = caps.get(1).map_or("", |m| m.as_str()).trim();
            if agent == "*" || agent.eq_ignore_ascii_case(user_agent) {
                active = true;
            }
            continue;
        }

        if active && root_disallow_re().is_match(line) {
            return true;
        }
    }

    false
}

/// Whether the wildcard group disallows `/`.
///
/// Consecutive `User-agent` lines form one group; the first directive after
/// them ends the agent list, and a blank or comment line ends the group. The
/// group is the wildcard group if any of its agents is `*`.
///
/// Never `true` unless [`blocked_at_root`] with agent `*` is too.
pub fn wildcard_blocks_root(txt: &str) -> bool {
    let mut in_wildcard = false;
    let mut reading_agents = false;

    for line in normalize_newlines(txt).lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            in_wildcard = false;
            reading_agents = false;
            continue;
        }

        if let Some(caps) = user_agent_re().captures(line) {
            if !reading_agents {
                in_wildcard = false;
                reading_agents = true;
            }
            if caps.get(1).map_or("", |m| m.as_str()).trim() == "*" {
                in_wildcard = true;
            }
            continue;
        }

        reading_agents = false;
        if in_wildcard && root_disallow_re().is_match(line) {
            return true;
        }
    }

    false
}

/// URLs declared by `Sitemap:` directives, in file order.
pub fn sitemap_directives(txt: &str) -> Vec<String> {
    sitemap_re()
        .captures_iter(txt)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// The subset of `crawlers` that are blocked at root, in input order.
pub fn blocked_crawlers<'a>(txt: &str, crawlers: &'a [String]) -> Vec<&'a str> {
    crawlers
        .iter()
        .filter(|name| blocked_at_root(txt, name))
        .map(String::as_str)
        .collect()
}
