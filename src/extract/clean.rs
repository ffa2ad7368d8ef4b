use std::sync::LazyLock;

use regex::Regex;

static PAGE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Page \d+").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:Chapter \d+|Section \d+)").unwrap());

/// Strip `Page N` markers and collapse all whitespace to single spaces.
pub fn clean_text(text: &str) -> String {
    let without_pages = PAGE_MARKER_RE.replace_all(text, "");
    WHITESPACE_RE.replace_all(&without_pages, " ").trim().to_string()
}

/// Split raw text before each line that starts with `Chapter N` or `Section N`.
/// Works on text that still has its line breaks, so run it before
/// [`clean_text`].
pub fn segment_by_headings(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut start = 0;
    for m in HEADING_RE.find_iter(text) {
        sections.push(&text[start..m.start()]);
        start = m.start();
    }
    sections.push(&text[start..]);

    sections
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
