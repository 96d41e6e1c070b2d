// src/narrative/sections.rs
//! Stages 2 and 3: section headers and bullets, then plain paragraphs.

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::ParseFailure;
use crate::narrative::{Draft, NarrativeShape, ITEM_MAX_CHARS, ITEM_MIN_CHARS};

/// Paragraphs after the first must exceed this to become takeaways.
const PARAGRAPH_MIN_CHARS: usize = 20;
/// Longer labels are prose, not headers.
const HEADER_MAX_WORDS: usize = 4;
const HEADER_SUFFIXES: &[&str] = &["factors", "analysis", "section", "overview"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    Idle,
    InSummary,
    InSection(&'static str),
}

/// Header keywords per shape, mapped to the state they switch to.
fn keywords(shape: NarrativeShape) -> &'static [(&'static str, LineState)] {
    use LineState::{InSection, InSummary};
    match shape {
        NarrativeShape::Insight => &[
            ("executive summary", InSummary),
            ("summary", InSummary),
            ("overview", InSummary),
            ("market analysis", InSummary),
            ("analysis", InSummary),
            ("key takeaways", InSection("key_takeaways")),
            ("takeaways", InSection("key_takeaways")),
            ("key points", InSection("key_takeaways")),
            ("key findings", InSection("key_takeaways")),
            ("key insights", InSection("key_takeaways")),
            ("highlights", InSection("key_takeaways")),
        ],
        NarrativeShape::Swot => &[
            ("strengths", InSection("strengths")),
            ("weaknesses", InSection("weaknesses")),
            ("opportunities", InSection("opportunities")),
            ("threats", InSection("threats")),
            ("recommendations", InSection("recommendations")),
            ("strategic recommendations", InSection("recommendations")),
        ],
        NarrativeShape::Pestel => &[
            ("political", InSection("political")),
            ("economic", InSection("economic")),
            ("social", InSection("social")),
            ("sociocultural", InSection("social")),
            ("technological", InSection("technological")),
            ("environmental", InSection("environmental")),
            ("legal", InSection("legal")),
            ("recommendations", InSection("recommendations")),
            ("strategic recommendations", InSection("recommendations")),
        ],
        NarrativeShape::Growth => &[
            ("opportunities", InSection("opportunities")),
            ("market opportunities", InSection("opportunities")),
            ("growth opportunities", InSection("opportunities")),
            ("strategies", InSection("strategies")),
            ("growth strategies", InSection("strategies")),
            ("risks", InSection("risks")),
            ("risk mitigation", InSection("risks")),
            ("risks and mitigation", InSection("risks")),
            ("recommendations", InSection("recommendations")),
            ("implementation priorities", InSection("recommendations")),
        ],
    }
}

/// Line-by-line scan. Header detection runs before bullet detection, so a
/// numbered header such as `1. Strengths:` switches section.
pub fn scan(text: &str, shape: NarrativeShape) -> Result<Draft, ParseFailure> {
    let mut draft = Draft::default();
    let mut state = LineState::Idle;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || is_rule(line) {
            continue;
        }

        if let Some((next, inline)) = header(line, shape) {
            state = next;
            if !inline.is_empty() {
                route(&mut draft, shape, state, &inline, false);
            }
            continue;
        }

        match strip_bullet(line) {
            Some(item) => {
                route(&mut draft, shape, state, item, true);
                // A bullet ends the summary.
                if state == LineState::InSummary {
                    state = LineState::Idle;
                }
            }
            None => route(&mut draft, shape, state, line, false),
        }
    }

    if draft.is_empty() {
        Err(ParseFailure::new("sections", "no recognizable headers or bullets"))
    } else {
        Ok(draft)
    }
}

fn route(draft: &mut Draft, shape: NarrativeShape, state: LineState, text: &str, bullet: bool) {
    let text = clean(text);
    match state {
        LineState::InSummary if !bullet => {
            if !draft.summary.is_empty() {
                draft.summary.push(' ');
            }
            draft.summary.push_str(&text);
        }
        LineState::InSection(field) => push_item(draft, field, text),
        LineState::InSummary | LineState::Idle if bullet => {
            if let Some(field) = shape.default_bucket() {
                push_item(draft, field, text);
            }
        }
        // Prose outside any section.
        _ => {}
    }
}

fn push_item(draft: &mut Draft, field: &'static str, item: String) {
    if item.chars().count() >= ITEM_MIN_CHARS {
        draft.push(field, item);
    }
}

/// `Some((state, text after the colon))` when the line is a recognized header.
fn header(line: &str, shape: NarrativeShape) -> Option<(LineState, String)> {
    static RE_PREFIX: OnceCell<Regex> = OnceCell::new();
    let re_prefix = RE_PREFIX.get_or_init(|| {
        // Markdown heading/emphasis marks, then optional `1.` / `2)` numbering.
        Regex::new(r"^[#*\s]*(?:\d{1,3}[.)](?:\s+|$))?").expect("header prefix regex")
    });
    let body = re_prefix.replace(line, "");

    let (label, inline) = match body.split_once(':') {
        Some((l, rest)) => (l, clean(rest)),
        None => (&*body, String::new()),
    };
    let label = normalize_label(label);
    if label.is_empty() || label.split(' ').count() > HEADER_MAX_WORDS {
        return None;
    }

    let candidates = std::iter::once(label.as_str()).chain(
        HEADER_SUFFIXES
            .iter()
            .filter_map(|suffix| label.strip_suffix(*suffix).map(str::trim_end)),
    );
    for candidate in candidates {
        if let Some((_, state)) = keywords(shape).iter().find(|(kw, _)| *kw == candidate) {
            return Some((*state, inline));
        }
    }
    None
}

/// Lowercase letters and single spaces only.
fn normalize_label(label: &str) -> String {
    static RE_NON_ALPHA: OnceCell<Regex> = OnceCell::new();
    let re = RE_NON_ALPHA.get_or_init(|| Regex::new(r"[^\p{Alphabetic}]+").expect("label regex"));
    re.replace_all(label, " ").trim().to_lowercase()
}

/// Item text of a `-`, `•`, `*`, `+` or `12.` / `3)` bullet line.
fn strip_bullet(line: &str) -> Option<&str> {
    static RE_BULLET: OnceCell<Regex> = OnceCell::new();
    let re = RE_BULLET.get_or_init(|| {
        // `*` and `+` need a space so `**bold**` and `+5%` stay prose;
        // numbers need one so `12.5%` does too.
        Regex::new(r"^(?:[-•]\s*|[*+]\s+|\d{1,3}[.)](?:\s+|$))(?P<item>.*)$")
            .expect("bullet regex")
    });
    re.captures(line)
        .and_then(|c| c.name("item"))
        .map(|m| m.as_str().trim_start())
}

fn is_rule(line: &str) -> bool {
    static RE_RULE: OnceCell<Regex> = OnceCell::new();
    let re = RE_RULE.get_or_init(|| Regex::new(r"^[-*_=]{3,}$").expect("rule regex"));
    re.is_match(line)
}

/// Markdown emphasis and code marks removed, whitespace collapsed.
fn clean(s: &str) -> String {
    static RE_MARKS: OnceCell<Regex> = OnceCell::new();
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_marks = RE_MARKS.get_or_init(|| Regex::new(r"\*\*|`").expect("emphasis regex"));
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));

    let out = re_marks.replace_all(s, "");
    let out = re_ws.replace_all(&out, " ");
    out.trim().trim_matches('*').trim().to_string()
}

/// Stage 3: first paragraph is the summary, later paragraphs longer than
/// 20 chars become takeaways (cut to 100 chars).
pub fn paragraphs(text: &str) -> Result<(String, Vec<String>), ParseFailure> {
    let mut paras: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim).chain(std::iter::once("")) {
        if line.is_empty() {
            if !current.is_empty() {
                paras.push(clean(&current.join(" ")));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }

    let mut iter = paras.into_iter().filter(|p| !p.is_empty());
    let summary = iter
        .next()
        .ok_or_else(|| ParseFailure::new("paragraphs", "no paragraphs"))?;
    let rest = iter
        .filter(|p| p.chars().count() > PARAGRAPH_MIN_CHARS)
        .map(|p| crate::narrative::truncate_chars(&p, ITEM_MAX_CHARS))
        .collect();
    Ok((summary, rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_swot_is_sectioned() {
        let text = "\
## SWOT Analysis

**Strengths:**
- Strong brand loyalty among urban buyers
- Short
1. Vertical integration lowers unit costs

### Weaknesses
* Limited presence outside Europe

Opportunities: Expansion into Southeast Asian markets
Threats:
- Price competition from discount entrants

Recommendations
- Prioritize direct-to-consumer channels
";
        let d = scan(text, NarrativeShape::Swot).unwrap();
        assert_eq!(
            d.list("strengths"),
            ["Strong brand loyalty among urban buyers", "Vertical integration lowers unit costs"]
        );
        assert_eq!(d.list("weaknesses"), ["Limited presence outside Europe"]);
        assert_eq!(d.list("opportunities"), ["Expansion into Southeast Asian markets"]);
        assert_eq!(d.list("threats"), ["Price competition from discount entrants"]);
        assert_eq!(d.list("recommendations"), ["Prioritize direct-to-consumer channels"]);
    }

    #[test]
    fn pestel_suffixed_headers() {
        let text = "Political Factors:\n- Export controls tighten on chips\nLegal factors\n- GDPR enforcement keeps rising\n";
        let d = scan(text, NarrativeShape::Pestel).unwrap();
        assert_eq!(d.list("political"), ["Export controls tighten on chips"]);
        assert_eq!(d.list("legal"), ["GDPR enforcement keeps rising"]);
    }

    #[test]
    fn insight_summary_and_loose_bullets() {
        let text = "Executive Summary\nDemand for battery storage is climbing.\nMargins remain thin.\n\n- Utilities are signing longer contracts\n";
        let d = scan(text, NarrativeShape::Insight).unwrap();
        assert_eq!(d.summary, "Demand for battery storage is climbing. Margins remain thin.");
        assert_eq!(d.list("key_takeaways"), ["Utilities are signing longer contracts"]);
    }

    #[test]
    fn growth_loose_bullets_become_recommendations() {
        let d = scan("- Launch a mid-market pricing tier", NarrativeShape::Growth).unwrap();
        assert_eq!(d.list("recommendations"), ["Launch a mid-market pricing tier"]);
    }

    #[test]
    fn prose_only_fails() {
        assert!(scan("Just some prose without structure.", NarrativeShape::Swot).is_err());
    }

    #[test]
    fn numbers_are_not_bullets() {
        assert_eq!(strip_bullet("12.5% growth expected"), None);
        assert_eq!(strip_bullet("2) Second item"), Some("Second item"));
        assert_eq!(strip_bullet("**Bold** lead-in"), None);
        assert_eq!(strip_bullet("•Tight bullet"), Some("Tight bullet"));
        assert!(is_rule("---"));
        assert!(!is_rule("--"));
    }

    #[test]
    fn paragraph_split() {
        let text = "First paragraph is the summary\nspanning two lines.\n\nTiny.\n\nA second paragraph that is long enough to keep.";
        let (summary, rest) = paragraphs(text).unwrap();
        assert_eq!(summary, "First paragraph is the summary spanning two lines.");
        assert_eq!(rest, vec!["A second paragraph that is long enough to keep."]);
        assert!(paragraphs("  \n\n").is_err());
    }
}
