//! Identifier extraction from Semantic Scholar citation URLs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numeric corpus ID embedded as "CorpusID:<digits>".
    static ref CORPUS_ID: Regex = Regex::new(r"CorpusID:(\d+)").unwrap();

    // 40-char lowercase hex paper SHA as a URL path component, terminated
    // by a query string or the end of the URL.
    static ref PAPER_SHA: Regex = Regex::new(r"/([a-f0-9]{40})(?:\?|$)").unwrap();

    // Literal citation-URL form recognized when scanning file content.
    static ref CITATION_URL: Regex =
        Regex::new(r"https://api\.semanticscholar\.org/CorpusID:\d+").unwrap();
}

/// Extract a paper identifier from a Semantic Scholar URL.
///
/// Tries the `CorpusID:<digits>` form first, then a 40-character hex paper
/// SHA appearing as a path component. A URL containing both yields the
/// CorpusID match. Returns `None` when neither pattern is present.
pub fn extract_paper_id(url: &str) -> Option<&str> {
    if let Some(caps) = CORPUS_ID.captures(url) {
        return caps.get(1).map(|m| m.as_str());
    }

    PAPER_SHA
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Find all Semantic Scholar citation URLs in a block of text, in order of
/// first appearance. Duplicates are kept: each occurrence is one lookup.
///
/// This pattern is intentionally narrower than [`extract_paper_id`] — only
/// the exact `https://api.semanticscholar.org/CorpusID:<digits>` form counts
/// as a discoverable URL in file-scanning mode.
pub fn find_citation_urls(text: &str) -> Vec<&str> {
    CITATION_URL.find_iter(text).map(|m| m.as_str()).collect()
}
