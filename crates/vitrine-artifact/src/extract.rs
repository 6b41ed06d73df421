//! Field extraction from raw model text
//!
//! Model replies are supposed to be a single JSON object with keys
//! `html`, `css`, `js`, `external_scripts`, `external_styles`, and
//! regularly are not: surrounding prose, literal newlines inside string
//! values, unescaped inner quotes, or braces inside script content all
//! defeat a naive parse. Recovery runs a chain of strategies, each a pure
//! function of the text; the first one that yields non-empty markup wins.
//!
//! Order: strict object scan, per-field capture, anchored object scan.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use tracing::{debug, info, warn};

use crate::artifact::UiArtifact;

/// The phrase the generation prompt uses to introduce the reply object;
/// the last-resort strategy scans after it.
pub const REPLY_ANCHOR: &str = "JSON RESPONSE";

/// Which recovery strategy produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// First `{` to last `}`, parsed as JSON.
    StrictObject,
    /// Per-field regex capture with escape resolution.
    FieldCapture,
    /// Object scan anchored after the reply phrase.
    AnchoredObject,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Strategy::StrictObject => "strict-object",
            Strategy::FieldCapture => "field-capture",
            Strategy::AnchoredObject => "anchored-object",
        };
        f.write_str(tag)
    }
}

/// A successful extraction and the strategy that produced it.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The recovered artifact (not yet validated).
    pub artifact: UiArtifact,
    /// The strategy that recovered it.
    pub strategy: Strategy,
}

/// Errors from extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// No strategy recovered non-empty markup.
    #[error("no extraction strategy recovered markup (reply began: {preview:?})")]
    NoMarkup {
        /// Bounded prefix of the offending reply, for diagnostics.
        preview: String,
    },
}

/// Recover an artifact from raw model text.
///
/// # Errors
/// Returns [`ExtractError::NoMarkup`] when no strategy yields a non-empty
/// `html` field. Empty `css`/`js` are success: absence of styling or
/// scripting is valid content.
pub fn extract(raw: &str) -> Result<UiArtifact, ExtractError> {
    extract_with_report(raw).map(|extraction| extraction.artifact)
}

/// Like [`extract`], additionally reporting which strategy succeeded.
///
/// # Errors
/// Same conditions as [`extract`].
pub fn extract_with_report(raw: &str) -> Result<Extraction, ExtractError> {
    const CHAIN: &[(Strategy, fn(&str) -> Option<UiArtifact>)] = &[
        (Strategy::StrictObject, strict_object),
        (Strategy::FieldCapture, field_capture),
        (Strategy::AnchoredObject, anchored_object),
    ];

    for (strategy, attempt) in CHAIN {
        debug!(%strategy, "attempting extraction");
        if let Some(artifact) = attempt(raw) {
            if artifact.is_renderable() {
                info!(
                    %strategy,
                    markup_bytes = artifact.markup.len(),
                    external_scripts = artifact.external_scripts.len(),
                    "extraction succeeded"
                );
                return Ok(Extraction {
                    artifact,
                    strategy: *strategy,
                });
            }
            debug!(%strategy, "strategy produced no markup, continuing");
        }
    }

    let preview = preview(raw);
    warn!(%preview, "extraction failed: no strategy recovered markup");
    Err(ExtractError::NoMarkup { preview })
}

/// Strategy 1: parse the substring from the first `{` to the last `}`.
/// Succeeds only when the reply was exactly well-formed.
fn strict_object(raw: &str) -> Option<UiArtifact> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

static HTML_RE: Lazy<Regex> = Lazy::new(|| scalar_regex("html"));
static CSS_RE: Lazy<Regex> = Lazy::new(|| scalar_regex("css"));
static JS_RE: Lazy<Regex> = Lazy::new(|| scalar_regex("js"));
static EXTERNAL_SCRIPTS_RE: Lazy<Regex> = Lazy::new(|| array_regex("external_scripts"));
static EXTERNAL_STYLES_RE: Lazy<Regex> = Lazy::new(|| array_regex("external_styles"));

fn scalar_regex(key: &str) -> Regex {
    // value body: escaped pairs or anything that is not a quote/backslash;
    // the class crosses literal newlines, which is the point
    Regex::new(&format!(r#"(?s)"{key}"\s*:\s*"((?:\\.|[^"\\])*)""#)).expect("valid field pattern")
}

fn array_regex(key: &str) -> Regex {
    Regex::new(&format!(r#""{key}"\s*:\s*\[([^\]]*)\]"#)).expect("valid array pattern")
}

/// Strategy 2: recover each field independently. Missing keys default to
/// empty rather than failing; the chain's non-empty-markup gate decides
/// whether the result counts.
fn field_capture(raw: &str) -> Option<UiArtifact> {
    Some(UiArtifact {
        markup: capture_scalar(&HTML_RE, raw).unwrap_or_default(),
        styles: capture_scalar(&CSS_RE, raw).unwrap_or_default(),
        script: capture_scalar(&JS_RE, raw).unwrap_or_default(),
        external_scripts: capture_array(&EXTERNAL_SCRIPTS_RE, raw),
        external_styles: capture_array(&EXTERNAL_STYLES_RE, raw),
    })
}

/// Strategy 3: last resort. Parse from the first `{` after the reply
/// anchor phrase to the last `}` anywhere.
fn anchored_object(raw: &str) -> Option<UiArtifact> {
    let anchor = raw.find(REPLY_ANCHOR)?;
    let start = anchor + raw[anchor..].find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

fn capture_scalar(re: &Regex, raw: &str) -> Option<String> {
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
}

fn capture_array(re: &Regex, raw: &str) -> Vec<String> {
    let Some(inner) = re.captures(raw).and_then(|caps| caps.get(1)) else {
        return Vec::new();
    };
    inner
        .as_str()
        .split(',')
        .map(|item| {
            item.trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .trim()
                .to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// Resolve `\"`, `\n`, and `\r` escapes in captured text. Any other
/// backslash pair is kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn preview(raw: &str) -> String {
    const MAX: usize = 80;
    let trimmed = raw.trim();
    if trimmed.len() <= MAX {
        return trimmed.to_string();
    }
    let mut end = MAX;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &trimmed[..end])
}
