//! Front-matter splitting and the restricted metadata dialect.
//!
//! Content files open with a block delimited by `---` lines. The block is a
//! narrow, line-oriented `key: value` syntax, not general YAML:
//! - scalars: quoted strings, `true`/`false`, numbers, bare strings
//! - inline arrays: `tags: ["a", "b"]` (JSON, falling back to comma splitting)
//! - one level of nested object under a `key:` line
//! - one level of list under a `key:` line, entries prefixed with `- `; an entry
//!   is either a scalar or an object whose first field sits on the `- ` line
//!
//! Anything deeper is rejected with a line number rather than guessed at.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Number, Value};
use tracing::debug;

use gridshift_shared::{Result, SiteError};

/// A content file split into parsed front-matter and its Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub data: Map<String, Value>,
    /// Everything after the closing delimiter, trimmed.
    pub body: String,
}

/// Opening delimiter, the block, and a closing delimiter on its own line.
/// The lazy optional group lets `---\n---` match as an empty block.
static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^---[ \t]*\r?\n(?:([\s\S]*?)\r?\n)??---[ \t]*(?:\r?\n|$)")
        .expect("front-matter block regex")
});

/// `key: value`, `key:value` or `key:`. The key ends at the first colon.
static KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_][A-Za-z0-9_.-]*)[ \t]*:(.*)$").expect("front-matter key regex")
});

/// The first field of an object list entry (`- type: image`). A space after
/// the colon is required here so `- https://…` stays a scalar entry.
static ENTRY_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*[ \t]*:(?:[ \t]|$)")
        .expect("front-matter list entry key regex")
});

/// Split a raw file into `(block, body)`. Returns `None` without a block.
pub fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let caps = BLOCK_RE.captures(raw)?;
    let block = caps.get(1).map_or("", |m| m.as_str());
    let end = caps.get(0)?.end();
    Some((block, raw[end..].trim()))
}

/// Split and parse a content file. A file without a block is an error.
pub fn parse_document(raw: &str) -> Result<Document> {
    let (block, body) = split_front_matter(raw)
        .ok_or_else(|| SiteError::parse("no front-matter block found"))?;

    Ok(Document {
        data: parse_front_matter(block)?,
        body: body.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Block parser
// ---------------------------------------------------------------------------

/// A `key:` line whose contents are still being collected.
enum Open {
    /// No indented content seen yet; could become an object or a list.
    Pending,
    Object(Map<String, Value>),
    List {
        items: Vec<Value>,
        /// Object entry that continuation lines are added to.
        current: Option<Map<String, Value>>,
    },
}

impl Open {
    fn finish(self) -> Value {
        match self {
            Self::Pending => Value::Null,
            Self::Object(map) => Value::Object(map),
            Self::List { mut items, current } => {
                if let Some(obj) = current {
                    items.push(Value::Object(obj));
                }
                Value::Array(items)
            }
        }
    }
}

/// Parse the text between the delimiters into a JSON object.
pub fn parse_front_matter(block: &str) -> Result<Map<String, Value>> {
    let mut result = Map::new();
    let mut open: Option<(String, Open)> = None;

    for (idx, line) in block.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indented = line.starts_with([' ', '\t']);
        let entry = list_entry(trimmed);

        // `key:` followed by unindented `- item` lines is still a list.
        let continues_list = entry.is_some()
            && matches!(open, Some((_, Open::Pending | Open::List { .. })));

        if !indented && !continues_list {
            if let Some((key, block)) = open.take() {
                result.insert(key, block.finish());
            }

            if entry.is_some() {
                return Err(SiteError::front_matter(
                    line_no,
                    "list entry without a preceding `key:` line",
                ));
            }

            match key_value(trimmed) {
                Some((key, None)) => open = Some((key.to_string(), Open::Pending)),
                Some((key, Some(value))) => {
                    result.insert(key.to_string(), parse_scalar(value));
                }
                None => debug!(line = line_no, "ignoring front-matter line without a key"),
            }
            continue;
        }

        let Some((_, block)) = open.as_mut() else {
            return Err(SiteError::front_matter(
                line_no,
                "indented line outside of a nested block",
            ));
        };

        if matches!(block, Open::Pending) {
            *block = if entry.is_some() {
                Open::List {
                    items: Vec::new(),
                    current: None,
                }
            } else {
                Open::Object(Map::new())
            };
        }

        match block {
            // resolved above
            Open::Pending => {}
            Open::Object(map) => {
                if entry.is_some() {
                    return Err(too_deep(line_no));
                }
                let (key, value) = nested_pair(trimmed, line_no)?;
                map.insert(key.to_string(), parse_scalar(value));
            }
            Open::List { items, current } => match entry {
                Some(rest) => {
                    if let Some(obj) = current.take() {
                        items.push(Value::Object(obj));
                    }
                    if rest.is_empty() {
                        // `-` alone: the object's fields follow on the next lines.
                        *current = Some(Map::new());
                    } else if ENTRY_KEY_RE.is_match(rest) {
                        let (key, value) = nested_pair(rest, line_no)?;
                        let mut obj = Map::new();
                        obj.insert(key.to_string(), parse_scalar(value));
                        *current = Some(obj);
                    } else {
                        items.push(parse_scalar(rest));
                    }
                }
                None => {
                    let Some(obj) = current.as_mut() else {
                        return Err(SiteError::front_matter(
                            line_no,
                            "expected a `- ` list entry",
                        ));
                    };
                    let (key, value) = nested_pair(trimmed, line_no)?;
                    obj.insert(key.to_string(), parse_scalar(value));
                }
            },
        }
    }

    if let Some((key, block)) = open.take() {
        result.insert(key, block.finish());
    }

    Ok(result)
}

/// `- rest` or a bare `-`, returning the trimmed rest.
fn list_entry(trimmed: &str) -> Option<&str> {
    if trimmed == "-" {
        return Some("");
    }
    trimmed.strip_prefix("- ").map(str::trim)
}

/// Split `key: value`; an empty value means the key opens a block.
fn key_value(trimmed: &str) -> Option<(&str, Option<&str>)> {
    let caps = KEY_RE.captures(trimmed)?;
    let key = caps.get(1)?.as_str();
    let value = caps
        .get(2)
        .map(|m| m.as_str().trim())
        .filter(|v| !v.is_empty());
    Some((key, value))
}

/// A `key: value` pair inside a block, where opening another block is not allowed.
fn nested_pair(trimmed: &str, line_no: usize) -> Result<(&str, &str)> {
    match key_value(trimmed) {
        Some((key, Some(value))) => Ok((key, value)),
        Some((_, None)) => Err(too_deep(line_no)),
        None => Err(SiteError::front_matter(line_no, "expected `key: value`")),
    }
}

fn too_deep(line_no: usize) -> SiteError {
    SiteError::front_matter(line_no, "nesting deeper than one level is not supported")
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// Decode a single inline value.
///
/// Quoted values are always strings; only bare values are coerced.
pub fn parse_scalar(value: &str) -> Value {
    let value = value.trim();

    if let Some(s) = unquote(value) {
        return Value::String(s);
    }

    match value {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(n) = parse_number(value) {
        return Value::Number(n);
    }

    if value.starts_with('[') && value.ends_with(']') {
        return parse_inline_array(value);
    }

    Value::String(value.to_string())
}

fn unquote(value: &str) -> Option<String> {
    if value.len() < 2 {
        return None;
    }
    if value.starts_with('"') && value.ends_with('"') {
        // JSON string rules cover escapes like `\"`; fall back to a plain strip.
        return Some(
            serde_json::from_str::<String>(value)
                .unwrap_or_else(|_| value[1..value.len() - 1].to_string()),
        );
    }
    if value.starts_with('\'') && value.ends_with('\'') {
        return Some(value[1..value.len() - 1].to_string());
    }
    None
}

fn parse_number(value: &str) -> Option<Number> {
    if let Ok(i) = value.parse::<i64>() {
        return Some(Number::from(i));
    }
    // Reject `inf`, `NaN` and friends, which `f64::from_str` accepts.
    if !value.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '-' | '+' | '.')) {
        return None;
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
}

fn parse_inline_array(value: &str) -> Value {
    if let Ok(parsed @ Value::Array(_)) = serde_json::from_str::<Value>(value) {
        return parsed;
    }

    let inner = &value[1..value.len() - 1];
    Value::Array(
        inner
            .split(',')
            .map(|item| item.trim().replace(['"', '\''], ""))
            .filter(|item| !item.is_empty())
            .map(Value::String)
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(block: &str) -> Map<String, Value> {
        parse_front_matter(block).expect("parse front-matter")
    }

    #[test]
    fn scalars_and_inline_array() {
        let data = parse("id: \"p1\"\norder: 20\ndraft: false\ntags: [\"a\",\"b\"]");
        assert_eq!(data["id"], json!("p1"));
        assert_eq!(data["order"], json!(20));
        assert_eq!(data["draft"], json!(false));
        assert_eq!(data["tags"], json!(["a", "b"]));
    }

    #[test]
    fn quoted_values_are_not_coerced() {
        let data = parse("year: \"2024\"\nflag: 'true'\nweight: 8.5\nname: Plain text");
        assert_eq!(data["year"], json!("2024"));
        assert_eq!(data["flag"], json!("true"));
        assert_eq!(data["weight"], json!(8.5));
        assert_eq!(data["name"], json!("Plain text"));
    }

    #[test]
    fn dates_and_urls_stay_strings() {
        let data = parse("date: 2025-09-15\nsite: https://gridshift.example/work\nnan: NaN");
        assert_eq!(data["date"], json!("2025-09-15"));
        assert_eq!(data["site"], json!("https://gridshift.example/work"));
        assert_eq!(data["nan"], json!("NaN"));
    }

    #[test]
    fn inline_array_falls_back_to_comma_split() {
        let data = parse("technologies: [React, 'Node.js', \"Rust\"]");
        assert_eq!(data["technologies"], json!(["React", "Node.js", "Rust"]));
    }

    #[test]
    fn nested_object() {
        let data = parse(
            "title: X\nseo:\n  title: \"SEO title\"\n  ogImage: /content/og.jpg\nlinks:\n  site: https://a.example\norder: 3",
        );
        assert_eq!(
            data["seo"],
            json!({ "title": "SEO title", "ogImage": "/content/og.jpg" })
        );
        assert_eq!(data["links"], json!({ "site": "https://a.example" }));
        assert_eq!(data["order"], json!(3));
    }

    #[test]
    fn list_of_objects() {
        let block = r#"media:
  - type: image
    src: /content/portfolio/a.jpg
    caption: "Front page"
  - type: video
    src: /content/portfolio/reel.mp4
    sources: [{"src": "/content/portfolio/reel.webm", "type": "video/webm"}]
  -
    type: pdf
    src: /content/portfolio/deck.pdf
title: After"#;
        let data = parse(block);
        let media = data["media"].as_array().expect("media array");
        assert_eq!(media.len(), 3);
        assert_eq!(media[0]["caption"], json!("Front page"));
        assert_eq!(media[1]["sources"][0]["type"], json!("video/webm"));
        assert_eq!(media[2]["type"], json!("pdf"));
        assert_eq!(data["title"], json!("After"));
    }

    #[test]
    fn scalar_list_entries() {
        let data = parse("gallery:\n- /content/a.jpg\n- \"/content/b.jpg\"\ndraft: true");
        assert_eq!(data["gallery"], json!(["/content/a.jpg", "/content/b.jpg"]));
        assert_eq!(data["draft"], json!(true));
    }

    #[test]
    fn key_without_space_after_colon() {
        let data = parse("title:Foo\norder:7\nseo:\n  ogImage:/content/og.jpg\nimage:https://cdn.example/a.jpg");
        assert_eq!(data["title"], json!("Foo"));
        assert_eq!(data["order"], json!(7));
        assert_eq!(data["seo"], json!({ "ogImage": "/content/og.jpg" }));
        assert_eq!(data["image"], json!("https://cdn.example/a.jpg"));
    }

    #[test]
    fn url_list_entries_stay_scalars() {
        let data = parse("gallery:\n  - https://cdn.example/a.jpg\n  - /content/b.jpg");
        assert_eq!(
            data["gallery"],
            json!(["https://cdn.example/a.jpg", "/content/b.jpg"])
        );
    }

    #[test]
    fn empty_block_key_is_null() {
        let data = parse("tags:\ntitle: X");
        assert_eq!(data["tags"], Value::Null);
        assert_eq!(data["title"], json!("X"));
    }

    #[test]
    fn comments_and_keyless_lines_are_skipped() {
        let data = parse("# editorial note\ntitle: X\nstray words\n\nclient: Y");
        assert_eq!(data.len(), 2);
        assert_eq!(data["client"], json!("Y"));
    }

    #[test]
    fn deeper_nesting_is_rejected() {
        let err = parse_front_matter("seo:\n  images:\n    og: /a.jpg").unwrap_err();
        assert!(matches!(err, SiteError::FrontMatter { line: 2, .. }));

        let err = parse_front_matter("media:\n  - type: video\n    sources:\n      - src: /a").unwrap_err();
        assert!(matches!(err, SiteError::FrontMatter { line: 3, .. }));
    }

    #[test]
    fn orphan_indentation_is_rejected() {
        let err = parse_front_matter("title: X\n  extra: y").unwrap_err();
        assert!(matches!(err, SiteError::FrontMatter { line: 2, .. }));
    }

    #[test]
    fn last_duplicate_wins() {
        let data = parse("title: First\ntitle: Second");
        assert_eq!(data["title"], json!("Second"));
    }

    #[test]
    fn split_document() {
        let doc = parse_document("---\ntitle: Hi\n---\n\n# Body\n\nText.\n").expect("parse");
        assert_eq!(doc.data["title"], json!("Hi"));
        assert_eq!(doc.body, "# Body\n\nText.");
    }

    #[test]
    fn split_accepts_crlf_and_empty_block() {
        let (block, body) = split_front_matter("---\r\ntitle: Hi\r\n---\r\nBody").expect("split");
        assert_eq!(block, "title: Hi");
        assert_eq!(body, "Body");

        let (block, body) = split_front_matter("---\n---\nBody\n---\nmore").expect("split");
        assert_eq!(block, "");
        assert_eq!(body, "Body\n---\nmore");
    }

    #[test]
    fn missing_block_is_an_error() {
        assert!(split_front_matter("# Just markdown").is_none());
        assert!(parse_document("# Just markdown").is_err());
        assert!(split_front_matter("---\ntitle: never closed\n").is_none());
    }
}
