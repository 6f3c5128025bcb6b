//! Slicing converted Markdown by headings, section, paragraphs, or characters.
//!
//! Stages run in a fixed order, each on the output of the one before:
//!
//! 1. `read_headings` returns only heading lines and ignores every other option
//! 2. `section` keeps one heading-delimited span
//! 3. `paragraph_range` keeps a 1-based, inclusive range of paragraphs
//! 4. `start_char`/`max_length` keep a character window
//!
//! An empty result is a valid outcome (section not found, range out of
//! bounds), not an error.

use regex::Regex;
use std::sync::LazyLock;

static PARAGRAPH_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:-(\d*))?$").expect("paragraph range pattern must compile"));

/// Caller options for slicing a converted page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Character offset of the window (0 = from the start).
    pub start_char: usize,
    /// Window length in characters (0 = to the end).
    pub max_length: usize,
    /// Case-insensitive substring of the heading to extract.
    pub section: Option<String>,
    /// `N`, `N-M`, or `N-` (1-based, inclusive).
    pub paragraph_range: Option<String>,
    /// Return only heading lines.
    pub read_headings: bool,
}

impl SelectionRequest {
    /// Whether any option would change the text.
    pub fn is_noop(&self) -> bool {
        !self.read_headings
            && self.section.is_none()
            && self.paragraph_range.is_none()
            && self.start_char == 0
            && self.max_length == 0
    }
}

/// Apply `request` to converted text.
pub fn select(text: &str, request: &SelectionRequest) -> String {
    if request.read_headings {
        return headings(text);
    }

    let mut content = text.to_string();

    if let Some(section) = request.section.as_deref() {
        content = section_span(&content, section);
    }

    if let Some(range) = request.paragraph_range.as_deref() {
        content = paragraph_range(&content, range);
    }

    if request.start_char > 0 || request.max_length > 0 {
        content = char_window(&content, request.start_char, request.max_length);
    }

    content
}

/// Number of leading `#` characters, or `None` if the line is not a heading.
fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|&c| c == '#').count();
    (level > 0).then_some(level)
}

/// Every line starting with `#`, in order.
pub fn headings(text: &str) -> String {
    text.lines()
        .filter(|line| line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The first heading whose text contains `query`, up to the next heading at
/// the same or a higher level.
pub fn section_span(text: &str, query: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let needle = query.to_lowercase();

    let found = lines.iter().enumerate().find_map(|(idx, line)| {
        let level = heading_level(line).filter(|&l| l <= 6)?;
        line[level..].to_lowercase().contains(&needle).then_some((idx, level))
    });

    let Some((start, level)) = found else {
        return String::new();
    };

    let end = lines[start + 1..]
        .iter()
        .position(|line| heading_level(line).is_some_and(|l| l <= level))
        .map_or(lines.len(), |offset| start + 1 + offset);

    lines[start..end].join("\n").trim_end().to_string()
}

/// Paragraphs selected by `range`; malformed or out-of-bounds ranges yield "".
pub fn paragraph_range(text: &str, range: &str) -> String {
    let paragraphs: Vec<&str> = text.split("\n\n").filter(|p| !p.trim().is_empty()).collect();

    let Some(caps) = PARAGRAPH_RANGE.captures(range.trim()) else {
        return String::new();
    };

    let Ok(first) = caps[1].parse::<usize>() else {
        return String::new();
    };
    if first == 0 || first > paragraphs.len() {
        return String::new();
    }

    let last = match caps.get(2).map(|m| m.as_str()) {
        None => first,
        Some("") => paragraphs.len(),
        Some(end) => end.parse::<usize>().unwrap_or(usize::MAX).min(paragraphs.len()),
    };
    if last < first {
        return String::new();
    }

    paragraphs[first - 1..last].join("\n\n")
}

/// Up to `max_length` characters starting at `start_char` (0 length = to the end).
///
/// Offsets count `char`s, so a window never splits a code point.
pub fn char_window(text: &str, start_char: usize, max_length: usize) -> String {
    let Some((begin, _)) = text.char_indices().nth(start_char) else {
        return String::new();
    };
    let rest = &text[begin..];

    if max_length == 0 {
        return rest.to_string();
    }

    match rest.char_indices().nth(max_length) {
        Some((end, _)) => rest[..end].to_string(),
        None => rest.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# A\n\nx\n\n## B\n\ny\n\n## C\n\nz";

    fn request() -> SelectionRequest {
        SelectionRequest::default()
    }

    #[test]
    fn test_noop_returns_input() {
        assert!(request().is_noop());
        assert_eq!(select(DOC, &request()), DOC);
    }

    #[test]
    fn test_read_headings() {
        let req = SelectionRequest { read_headings: true, ..request() };
        assert_eq!(select("# A\n\ntext\n\n## B\n\nmore", &req), "# A\n## B");
    }

    #[test]
    fn test_read_headings_without_headings() {
        let req = SelectionRequest { read_headings: true, ..request() };
        assert_eq!(select("plain\n\ntext", &req), "");
    }

    #[test]
    fn test_read_headings_ignores_other_options() {
        let req = SelectionRequest {
            read_headings: true,
            section: Some("B".into()),
            paragraph_range: Some("2".into()),
            start_char: 3,
            max_length: 1,
        };
        assert_eq!(select(DOC, &req), "# A\n## B\n## C");
    }

    #[test]
    fn test_section_stops_at_same_level() {
        let req = SelectionRequest { section: Some("B".into()), ..request() };
        assert_eq!(select(DOC, &req), "## B\n\ny");
    }

    #[test]
    fn test_section_includes_deeper_headings() {
        let text = "# Guide\n\nintro\n\n## Install\n\nsteps\n\n### Linux\n\napt\n\n## Usage\n\nrun";
        let req = SelectionRequest { section: Some("install".into()), ..request() };
        assert_eq!(select(text, &req), "## Install\n\nsteps\n\n### Linux\n\napt");
    }

    #[test]
    fn test_section_runs_to_end() {
        let req = SelectionRequest { section: Some("c".into()), ..request() };
        assert_eq!(select(DOC, &req), "## C\n\nz");
    }

    #[test]
    fn test_section_top_level_spans_subsections() {
        let req = SelectionRequest { section: Some("a".into()), ..request() };
        assert_eq!(select(DOC, &req), DOC);
    }

    #[test]
    fn test_section_not_found() {
        let req = SelectionRequest { section: Some("missing".into()), ..request() };
        assert_eq!(select(DOC, &req), "");
    }

    #[test]
    fn test_section_matches_heading_text_only() {
        let req = SelectionRequest { section: Some("y".into()), ..request() };
        assert_eq!(select(DOC, &req), "");
    }

    #[test]
    fn test_paragraph_range_open_end() {
        let req = SelectionRequest { paragraph_range: Some("2-".into()), ..request() };
        assert_eq!(select("p1\n\np2\n\np3", &req), "p2\n\np3");
    }

    #[test]
    fn test_paragraph_range_single() {
        assert_eq!(paragraph_range("p1\n\np2\n\np3", "2"), "p2");
    }

    #[test]
    fn test_paragraph_range_inclusive_and_clamped() {
        assert_eq!(paragraph_range("p1\n\np2\n\np3", "1-2"), "p1\n\np2");
        assert_eq!(paragraph_range("p1\n\np2\n\np3", "2-99"), "p2\n\np3");
        assert_eq!(paragraph_range("p1\n\np2\n\np3", "2-99999999999999999999999"), "p2\n\np3");
    }

    #[test]
    fn test_paragraph_range_skips_blank_paragraphs() {
        assert_eq!(paragraph_range("p1\n\n\n\n  \n\np2", "2"), "p2");
    }

    #[test]
    fn test_paragraph_range_out_of_bounds() {
        assert_eq!(paragraph_range("p1\n\np2", "3"), "");
        assert_eq!(paragraph_range("p1\n\np2", "0"), "");
        assert_eq!(paragraph_range("p1\n\np2", "2-1"), "");
        assert_eq!(paragraph_range("", "1"), "");
    }

    #[test]
    fn test_paragraph_range_malformed() {
        for range in ["", "abc", "-2", "1-2-3", "1,2", "one"] {
            assert_eq!(paragraph_range("p1\n\np2", range), "", "range {range:?} should be rejected");
        }
    }

    #[test]
    fn test_char_window() {
        let req = SelectionRequest { start_char: 6, max_length: 5, ..request() };
        assert_eq!(select("hello world", &req), "world");
    }

    #[test]
    fn test_char_window_start_beyond_end() {
        let req = SelectionRequest { start_char: 10, ..request() };
        assert_eq!(select("hi", &req), "");
        assert_eq!(char_window("hi", 2, 0), "");
    }

    #[test]
    fn test_char_window_length_only_and_clamped() {
        assert_eq!(char_window("hello world", 0, 5), "hello");
        assert_eq!(char_window("hello", 2, 100), "llo");
        assert_eq!(char_window("hello", 1, 0), "ello");
    }

    #[test]
    fn test_char_window_counts_chars() {
        assert_eq!(char_window("héllo wörld", 6, 5), "wörld");
        assert_eq!(char_window("日本語テキスト", 2, 2), "語テ");
    }

    #[test]
    fn test_stages_compose_in_order() {
        let req = SelectionRequest {
            section: Some("B".into()),
            paragraph_range: Some("2".into()),
            start_char: 0,
            max_length: 1,
            ..request()
        };
        // section -> "## B\n\ny", paragraph 2 -> "y", window -> "y"
        assert_eq!(select(DOC, &req), "y");

        let req = SelectionRequest { section: Some("missing".into()), paragraph_range: Some("1".into()), ..request() };
        assert_eq!(select(DOC, &req), "");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("### x"), Some(3));
        assert_eq!(heading_level("text"), None);
        assert_eq!(heading_level(""), None);
    }
}
