// src/narrative/json.rs
//! Stage 1: a JSON object embedded anywhere in the text.

use serde_json::{Map, Value};

use crate::error::ParseFailure;
use crate::narrative::{Draft, NarrativeShape};

const STAGE: &str = "json";

/// First balanced `{...}` candidate that mentions the shape's marker key and
/// decodes into the expected structure.
pub fn extract(raw: &str, shape: NarrativeShape) -> Result<Draft, ParseFailure> {
    let marker = format!("\"{}\"", shape.marker());
    let mut seen_candidate = false;

    for start in raw.match_indices('{').map(|(i, _)| i) {
        let Some(end) = balanced_end(raw, start) else {
            continue;
        };
        let candidate = &raw[start..=end];
        if !candidate.contains(&marker) {
            continue;
        }
        seen_candidate = true;
        let Ok(Value::Object(root)) = serde_json::from_str::<Value>(candidate) else {
            continue;
        };
        if let Some(draft) = draft_from_object(&root, shape) {
            return Ok(draft);
        }
    }

    Err(ParseFailure::new(
        STAGE,
        if seen_candidate {
            format!("no candidate with {marker} decoded to the expected structure")
        } else {
            format!("no balanced object containing {marker}")
        },
    ))
}

/// Index of the `}` closing the object opened at `start`. Braces inside
/// string literals do not count.
fn balanced_end(s: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, b) in s.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match (escaped, b) {
                (true, _) => escaped = false,
                (false, b'\\') => escaped = true,
                (false, b'"') => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

fn draft_from_object(root: &Map<String, Value>, shape: NarrativeShape) -> Option<Draft> {
    let mut draft = Draft::default();

    match shape {
        NarrativeShape::Insight => {
            let summary = get(root, &["summary"])?.as_str()?.trim();
            if summary.is_empty() {
                return None;
            }
            draft.summary = summary.to_string();
            if let Some(v) = get(root, &["key_takeaways", "takeaways", "keytakeaways"]) {
                draft.lists.insert("key_takeaways", string_list(v));
            }
            return Some(draft);
        }
        NarrativeShape::Swot | NarrativeShape::Pestel => {
            let inner = get(root, &[shape.marker()])?.as_object()?;
            for &field in shape.list_fields() {
                if let Some(v) = get(inner, &[field]) {
                    draft.lists.insert(field, string_list(v));
                }
            }
        }
        NarrativeShape::Growth => match get(root, &["growth"])? {
            Value::Object(inner) => {
                for &field in shape.list_fields() {
                    if let Some(v) = get(inner, &[field]) {
                        draft.lists.insert(field, string_list(v));
                    }
                }
            }
            other => {
                draft.lists.insert("strategies", string_list(other));
            }
        },
    }

    if let Some(v) = get(root, &["recommendations"]) {
        draft.lists.insert("recommendations", string_list(v));
    }

    let has_body = shape
        .list_fields()
        .iter()
        .filter(|f| **f != "recommendations")
        .any(|f| !draft.list(f).is_empty());
    has_body.then_some(draft)
}

/// Case-insensitive key lookup, first name that matches wins.
fn get<'v>(obj: &'v Map<String, Value>, names: &[&str]) -> Option<&'v Value> {
    names.iter().find_map(|name| {
        obj.get(*name).or_else(|| {
            obj.iter()
                .find(|(k, _)| k.replace(['_', ' '], "").eq_ignore_ascii_case(&name.replace('_', "")))
                .map(|(_, v)| v)
        })
    })
}

/// Lists stay lists; a lone string becomes a one-item list.
fn string_list(v: &Value) -> Vec<String> {
    let one = |v: &Value| -> Option<String> {
        match v {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Object(o) => o.values().find_map(|x| x.as_str()).map(|s| s.trim().to_string()),
            _ => None,
        }
    };
    match v {
        Value::Array(items) => items.iter().filter_map(one).filter(|s| !s.is_empty()).collect(),
        other => one(other).into_iter().filter(|s| !s.is_empty()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_object_inside_prose_and_fences() {
        let raw = r#"Here is the analysis you asked for:
```json
{"swot": {"strengths": ["Loyal customers", "Strong margins"], "weaknesses": "Thin product line",
 "opportunities": [], "threats": ["New entrants {cheap}"]},
 "recommendations": ["Expand into adjacent segments"]}
```
Let me know if you need more."#;
        let d = extract(raw, NarrativeShape::Swot).unwrap();
        assert_eq!(d.list("strengths"), ["Loyal customers", "Strong margins"]);
        assert_eq!(d.list("weaknesses"), ["Thin product line"]);
        assert!(d.list("opportunities").is_empty());
        assert_eq!(d.list("threats"), ["New entrants {cheap}"]);
        assert_eq!(d.list("recommendations"), ["Expand into adjacent segments"]);
    }

    #[test]
    fn skips_objects_without_the_marker() {
        let raw = r#"{"note": "ignore me"} then {"summary": "Demand is steady.", "takeaways": ["a point worth making"]}"#;
        let d = extract(raw, NarrativeShape::Insight).unwrap();
        assert_eq!(d.summary, "Demand is steady.");
        assert_eq!(d.list("key_takeaways"), ["a point worth making"]);
    }

    #[test]
    fn nested_marker_object_is_found() {
        let raw = r#"{"analysis": {"pestel": {"Political": ["Tariff exposure on imports"]}}}"#;
        let d = extract(raw, NarrativeShape::Pestel).unwrap();
        assert_eq!(d.list("political"), ["Tariff exposure on imports"]);
    }

    #[test]
    fn wrong_structure_fails() {
        let e = extract(r#"{"swot": "not an object"}"#, NarrativeShape::Swot).unwrap_err();
        assert_eq!(e.stage, "json");
        assert!(extract("{unclosed \"swot\"", NarrativeShape::Swot).is_err());
        assert!(extract(r#"{"summary": ""}"#, NarrativeShape::Insight).is_err());
    }

    #[test]
    fn braces_in_strings_do_not_close() {
        let s = r#"{"a": "}}", "b": {"c": 1}} tail"#;
        assert_eq!(balanced_end(s, 0), Some(s.len() - 6));
    }
}
