// tests/narrative_parse.rs
//
// Lenient parsing of generated text: JSON, sectioned markdown, plain prose,
// and the template fill that guarantees every field is populated.

use stratiq::narrative::{
    parse, parse_insight, parse_strategy, Narrative, NarrativeOrigin, NarrativeShape,
    StrategyContent, StrategyKind, ITEM_MAX_CHARS, SUMMARY_MAX_CHARS,
};

fn swot(content: StrategyContent) -> stratiq::narrative::SwotMatrix {
    match content {
        StrategyContent::Swot(m) => m,
        other => panic!("expected swot, got {other:?}"),
    }
}

#[test]
fn empty_text_is_all_template() {
    let (content, recs, origin) = parse_strategy("", StrategyKind::Swot, Some("Technology"));
    assert_eq!(origin, NarrativeOrigin::Template);
    let m = swot(content);
    for (name, quadrant) in [
        ("strengths", &m.strengths),
        ("weaknesses", &m.weaknesses),
        ("opportunities", &m.opportunities),
        ("threats", &m.threats),
    ] {
        assert_eq!(quadrant.len(), 4, "{name}");
    }
    assert!(!recs.is_empty() && recs.len() <= 4);
}

#[test]
fn every_shape_is_fully_populated_from_garbage() {
    for shape in NarrativeShape::ALL {
        for industry in [None, Some("Healthcare"), Some("Aerospace")] {
            let parsed = parse("}{ not really anything", shape, industry);
            assert_eq!(parsed.origin, NarrativeOrigin::Template, "{shape:?}");
            match parsed.narrative {
                Narrative::Insight(t) => {
                    assert!(!t.summary.is_empty());
                    assert!(!t.key_takeaways.is_empty());
                }
                Narrative::Strategy {
                    content,
                    recommendations,
                } => {
                    assert!(!recommendations.is_empty());
                    let lists: Vec<Vec<String>> = match content {
                        StrategyContent::Swot(m) => {
                            vec![m.strengths, m.weaknesses, m.opportunities, m.threats]
                        }
                        StrategyContent::Pestel(p) => vec![
                            p.political,
                            p.economic,
                            p.social,
                            p.technological,
                            p.environmental,
                            p.legal,
                        ],
                        StrategyContent::Growth(g) => vec![g.opportunities, g.strategies, g.risks],
                    };
                    assert!(lists.iter().all(|l| !l.is_empty()), "{shape:?}/{industry:?}");
                }
            }
        }
    }
}

#[test]
fn oversized_json_fields_are_truncated() {
    let long = "x".repeat(500);
    let takeaways: Vec<String> = (0..10).map(|i| format!("takeaway number {i} {long}")).collect();
    let raw = serde_json::json!({
        "summary": long,
        "key_takeaways": takeaways,
    })
    .to_string();

    let (text, origin) = parse_insight(&raw, Some("Retail"));
    assert_eq!(origin, NarrativeOrigin::Model);
    assert_eq!(text.summary.chars().count(), SUMMARY_MAX_CHARS);
    assert_eq!(text.key_takeaways.len(), 7);
    assert!(text
        .key_takeaways
        .iter()
        .all(|t| t.chars().count() <= ITEM_MAX_CHARS));
}

#[test]
fn json_wrapped_in_prose_is_found() {
    let raw = r#"Sure! Here is the analysis you asked for:
```json
{"swot": {"strengths": ["Deep engineering bench"], "weaknesses": ["Thin margins in hardware"],
 "opportunities": ["Edge AI deployments"], "threats": ["Export controls"]},
 "recommendations": ["Double down on inference silicon"]}
```
Let me know if you need more."#;

    let (content, recs, origin) = parse_strategy(raw, StrategyKind::Swot, Some("Technology"));
    assert_eq!(origin, NarrativeOrigin::Model);
    let m = swot(content);
    assert_eq!(m.strengths, vec!["Deep engineering bench"]);
    assert_eq!(m.threats, vec!["Export controls"]);
    assert_eq!(recs, vec!["Double down on inference silicon"]);
}

#[test]
fn markdown_sections_fill_what_they_name() {
    let raw = "\
Overall the position is solid but exposed to pricing pressure in the mid-market.

## Strengths
- Strong recurring revenue from subscriptions
- Loyal enterprise customer base

## Threats
1. Aggressive pricing from new entrants
2. Tightening data residency rules";

    let (content, recs, origin) = parse_strategy(raw, StrategyKind::Swot, Some("Technology"));
    assert_eq!(origin, NarrativeOrigin::Mixed);
    let m = swot(content);
    assert_eq!(
        m.strengths,
        vec![
            "Strong recurring revenue from subscriptions",
            "Loyal enterprise customer base"
        ]
    );
    assert_eq!(m.threats.len(), 2);
    // Missing quadrants come from the industry templates.
    assert_eq!(m.weaknesses.len(), 4);
    assert_eq!(m.opportunities.len(), 4);
    assert!(!recs.is_empty());
}

#[test]
fn short_text_goes_straight_to_templates() {
    let (text, origin) = parse_insight("Markets are up.", Some("Finance"));
    assert_eq!(origin, NarrativeOrigin::Template);
    assert_ne!(text.summary, "Markets are up.");
}

#[test]
fn single_long_paragraph_is_bounded() {
    let raw: String = "Demand for cloud infrastructure keeps rising across every region "
        .repeat(10)
        .chars()
        .take(500)
        .collect();
    assert_eq!(raw.chars().count(), 500);

    let (text, origin) = parse_insight(&raw, Some("Technology"));
    assert_ne!(origin, NarrativeOrigin::Model);
    assert!(!text.summary.is_empty());
    assert!(text.summary.chars().count() <= SUMMARY_MAX_CHARS);
    assert!(!text.key_takeaways.is_empty() && text.key_takeaways.len() <= 7);
    assert!(text
        .key_takeaways
        .iter()
        .all(|t| !t.is_empty() && t.chars().count() <= ITEM_MAX_CHARS));
}

#[test]
fn unicode_is_cut_on_char_boundaries() {
    let summary = "é".repeat(400);
    let raw = format!(r#"{{"summary": "{summary}", "key_takeaways": ["ü is fine here too"]}}"#);
    let (text, _) = parse_insight(&raw, None);
    assert_eq!(text.summary.chars().count(), SUMMARY_MAX_CHARS);
    assert!(text.summary.chars().all(|c| c == 'é'));
}
