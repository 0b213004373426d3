//! Inline `[label](url)` links in pin intros.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSegment {
    Text(String),
    Link { label: String, url: String },
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"))
}

/// Split text into plain runs and links, in order. Unmatched brackets stay text.
pub fn parse_links(text: &str) -> Vec<LinkSegment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in link_pattern().captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(LinkSegment::Text(text[last..whole.start()].to_string()));
        }
        segments.push(LinkSegment::Link {
            label: label.as_str().to_string(),
            url: url.as_str().to_string(),
        });
        last = whole.end();
    }
    if last < text.len() {
        segments.push(LinkSegment::Text(text[last..].to_string()));
    }
    segments
}
