// src/services/prompts.rs
//! Prompt text. Every prompt carries the resolved metrics so the model
//! reasons over the same numbers the response reports.

use crate::market::{MarketMetrics, Subject};
use crate::narrative::StrategyKind;

/// `1234567` -> `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn metrics_block(m: &MarketMetrics) -> String {
    let mut block = format!(
        "Market Metrics:\n\
         - Growth Rate: {:.1}%\n\
         - Funding Volume: ${}\n\
         - Market Size: ${}\n\
         - Competition Level: {}\n",
        m.growth_rate,
        thousands(m.funding_volume),
        thousands(m.market_size),
        m.competition_level,
    );
    if !m.top_sectors.is_empty() {
        block.push_str(&format!("- Top Sectors: {}\n", m.top_sectors.join(", ")));
    }
    block
}

fn context(subject: &Subject) -> String {
    format!(
        "Industry: {}, Company: {}",
        subject.industry.as_deref().unwrap_or("General"),
        subject.company.as_deref().unwrap_or("N/A"),
    )
}

pub fn insight(subject: &Subject, metrics: &MarketMetrics) -> String {
    format!(
        "Analyze the following business data and provide a concise summary with key takeaways.\n\n\
         {}\n\n{}\n\
         Analyze these specific numbers and provide insights based on the actual data.\n\n\
         Provide:\n\
         1. A brief executive summary (2-3 sentences) that references the specific metrics above\n\
         2. Exactly 5-7 key takeaways, one sentence each, at most 20 words\n\n\
         Format as JSON with 'summary' and 'key_takeaways' fields.",
        context(subject),
        metrics_block(metrics),
    )
}

pub fn strategy(kind: StrategyKind, subject: &Subject, metrics: &MarketMetrics) -> String {
    let ask = match kind {
        StrategyKind::Swot => {
            "Generate a concise SWOT analysis.\n\
             Provide a SWOT matrix with exactly 4 strengths, 4 weaknesses, 4 opportunities \
             and 4 threats, each one sentence of at most 15 words that references the metrics.\n\
             Also provide exactly 4 strategic recommendations of at most 20 words.\n\
             Format as JSON with a 'swot' object and a 'recommendations' array."
        }
        StrategyKind::Pestel => {
            "Generate a comprehensive PESTEL analysis.\n\
             Cover political, economic, social, technological, environmental and legal \
             factors, 2-4 short items each.\n\
             Provide 3-4 strategic recommendations.\n\
             Format as JSON with a 'pestel' object and a 'recommendations' array."
        }
        StrategyKind::Growth => {
            "Create a growth strategy plan.\n\
             List market opportunities, growth strategies and risks with mitigation, \
             up to 4 short items each, then up to 4 implementation priorities as recommendations.\n\
             Format as JSON with a 'growth' object (opportunities, strategies, risks) and a \
             'recommendations' array."
        }
    };
    format!("{ask}\n\n{}\n\n{}", context(subject), metrics_block(metrics))
}
