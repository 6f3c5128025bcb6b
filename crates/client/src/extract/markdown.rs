//! Regex-based HTML to Markdown flattening.
//!
//! This is not an HTML parser. Each stage is one non-recursive substitution
//! over the output of the previous stage, applied in this order:
//!
//! 1. Drop `<script>` and `<style>` blocks with their contents
//! 2. `<h6>`..`<h1>` become `#`-prefixed lines followed by a blank line
//! 3. `<p>` becomes its text followed by a blank line
//! 4. `<a href="..">` becomes `[text](href)`
//! 5. `<b>`/`<strong>` become `**text**`, `<i>`/`<em>` become `*text*`
//! 6. `<li>` becomes a `- ` bullet line
//! 7. Every remaining tag is stripped
//! 8. Runs of three or more newlines collapse to two
//! 9. Leading and trailing whitespace is trimmed
//!
//! Nested constructs are flattened once and never re-examined, and HTML
//! entities are left as they are. Malformed markup degrades to plain text.

use regex::Regex;
use std::sync::LazyLock;

/// A single substitution in the pipeline.
struct Stage {
    pattern: Regex,
    replacement: String,
}

static STAGES: LazyLock<Vec<Stage>> = LazyLock::new(build_stages);

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| compile(r"\n{3,}"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("converter pattern must compile")
}

/// Match `<tag ...>inner</tag>`, where the tag name must end at `>` or whitespace.
fn element(tag: &str) -> String {
    format!(r"(?s)<{tag}(?:\s[^>]*)?>(.*?)</{tag}>")
}

fn stage(pattern: &str, replacement: impl Into<String>) -> Stage {
    Stage { pattern: compile(pattern), replacement: replacement.into() }
}

fn build_stages() -> Vec<Stage> {
    let mut stages = vec![
        stage(r"(?s)<script(?:\s[^>]*)?>.*?</script>", ""),
        stage(r"(?s)<style(?:\s[^>]*)?>.*?</style>", ""),
    ];

    for level in (1..=6).rev() {
        let hashes = "#".repeat(level);
        stages.push(stage(&element(&format!("h{level}")), format!("{hashes} ${{1}}\n\n")));
    }

    stages.extend([
        stage(&element("p"), "${1}\n\n"),
        stage(r#"(?s)<a\s[^>]*?href="([^"]*)"[^>]*>(.*?)</a>"#, "[${2}](${1})"),
        stage(&element("b"), "**${1}**"),
        stage(&element("strong"), "**${1}**"),
        stage(&element("i"), "*${1}*"),
        stage(&element("em"), "*${1}*"),
        stage(&element("li"), "- ${1}\n"),
        stage(r"<[^>]+>", ""),
    ]);

    stages
}

/// Flatten HTML into the simplified Markdown used by the content selector.
///
/// Total over its input: any string, however malformed, yields a string.
pub fn convert(html: &str) -> String {
    let mut content = html.to_string();

    for stage in STAGES.iter() {
        content = stage
            .pattern
            .replace_all(&content, stage.replacement.as_str())
            .into_owned();
    }

    let content = EXCESS_NEWLINES.replace_all(&content, "\n\n");
    content.trim().to_string()
}
