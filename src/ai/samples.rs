// src/ai/samples.rs
//! Canned responses returned when no model provider answers. They are written
//! in the loose markdown style models produce, so they exercise the same
//! parser path as real output.

const SAMPLE_SWOT: &str = "\
SWOT Analysis:

Strengths:
- Strong market position
- Innovative technology stack
- Experienced leadership team

Weaknesses:
- Limited market share
- High competition
- Resource constraints

Opportunities:
- Market expansion potential
- Emerging technologies
- Strategic partnerships

Threats:
- Economic uncertainty
- Regulatory changes
- Intense competition

Recommendations:
1. Focus on core strengths
2. Explore new market segments
3. Invest in innovation
";

const SAMPLE_PESTEL: &str = "\
PESTEL Analysis:

Political: Stable regulatory environment
Economic: Growing market conditions
Social: Changing consumer preferences
Technological: Rapid AI adoption
Environmental: Sustainability focus
Legal: Data privacy regulations

Recommendations:
1. Monitor regulatory changes
2. Invest in sustainable practices
3. Leverage technological advances
";

const SAMPLE_GROWTH: &str = "\
Growth Strategy:

Market Opportunities:
- Underserved mid-market customers
- Adjacent geographic markets

Growth Strategies:
- Product line diversification
- Channel partnerships with resellers

Risks:
- Execution risk during rapid hiring
- Pricing pressure from incumbents

Implementation Priorities:
1. Validate demand in one pilot region
2. Build a partner enablement program
";

const SAMPLE_INSIGHT: &str = "\
Executive Summary:
The market analysis reveals significant growth opportunities in the technology sector.
Key trends include increased adoption of AI and cloud technologies, along with
growing demand for digital transformation solutions.

Key Takeaways:
- Market growth rate of 15.5% annually
- Strong funding activity in AI and SaaS sectors
- Increasing competition requires differentiation
- Opportunities in emerging markets
- Focus on innovation and partnerships
";

/// Picked by keywords in the prompt.
pub fn sample_response(prompt: &str) -> &'static str {
    let p = prompt.to_lowercase();
    if p.contains("swot") {
        SAMPLE_SWOT
    } else if p.contains("pestel") {
        SAMPLE_PESTEL
    } else if p.contains("growth strategy") {
        SAMPLE_GROWTH
    } else {
        SAMPLE_INSIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_by_keyword() {
        assert!(sample_response("Perform a SWOT analysis").starts_with("SWOT"));
        assert!(sample_response("a pestel view").starts_with("PESTEL"));
        assert!(sample_response("Create a growth strategy").starts_with("Growth"));
        assert!(sample_response("anything else").starts_with("Executive Summary"));
    }
}
