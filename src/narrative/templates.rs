// src/narrative/templates.rs
//! Canned per-industry content used for fields the generated text left empty.

use crate::narrative::NarrativeShape;

struct IndustryTemplate {
    name: &'static str,
    summary: &'static str,
    takeaways: &'static [&'static str],
    strengths: &'static [&'static str],
    weaknesses: &'static [&'static str],
    opportunities: &'static [&'static str],
    threats: &'static [&'static str],
    recommendations: &'static [&'static str],
}

const GENERIC_SUMMARY: &str = "Industry analysis reveals key trends and opportunities.";
const GENERIC_TAKEAWAYS: &[&str] = &[
    "Market trends are evolving",
    "Innovation is key",
    "Customer focus is essential",
    "Digital transformation is critical",
    "Strategic partnerships matter",
];
const GENERIC_STRENGTHS: &[&str] = &[
    "Market position",
    "Innovation",
    "Team expertise",
    "Customer relationships",
];
const GENERIC_WEAKNESSES: &[&str] = &["Market share", "Competition", "Resources", "Brand awareness"];
const GENERIC_OPPORTUNITIES: &[&str] = &[
    "Market expansion",
    "New technologies",
    "Partnerships",
    "Digital channels",
];
const GENERIC_THREATS: &[&str] = &[
    "Economic conditions",
    "Regulatory changes",
    "Competition",
    "Supply chain risks",
];
const GENERIC_RECOMMENDATIONS: &[&str] = &[
    "Focus on core strengths",
    "Explore new market segments",
    "Invest in innovation",
    "Build strategic partnerships",
];

const PESTEL_POLITICAL: &[&str] = &["Regulatory environment", "Government policies"];
const PESTEL_ECONOMIC: &[&str] = &["Market conditions", "Economic growth"];
const PESTEL_SOCIAL: &[&str] = &["Consumer trends", "Demographic changes"];
const PESTEL_TECHNOLOGICAL: &[&str] = &["Digital transformation", "Innovation"];
const PESTEL_ENVIRONMENTAL: &[&str] = &["Sustainability", "Climate regulations"];
const PESTEL_LEGAL: &[&str] = &["Compliance requirements", "Data privacy"];

const GROWTH_OPPORTUNITIES: &[&str] = &["Market expansion", "New segments"];
const GROWTH_STRATEGIES: &[&str] = &["Product diversification", "Innovation"];
const GROWTH_RISKS: &[&str] = &["Market volatility", "Competition"];

const INDUSTRIES: &[IndustryTemplate] = &[
    IndustryTemplate {
        name: "Technology",
        summary: "The technology sector is experiencing rapid growth driven by AI, cloud computing, and digital transformation. Companies are investing heavily in innovation to stay competitive in an increasingly digital world.",
        takeaways: &[
            "AI and machine learning are transforming business operations",
            "Cloud adoption continues to accelerate",
            "Cybersecurity is a critical priority",
            "Remote work technologies are in high demand",
            "Developer tools and platforms are key differentiators",
        ],
        strengths: &["Rapid innovation cycles", "Strong talent pool", "High scalability", "Recurring revenue models"],
        weaknesses: &["Intense competition", "Rapid obsolescence", "High R&D costs", "Dependence on key platforms"],
        opportunities: &["AI/ML adoption", "Cloud migration", "Cybersecurity demand", "Edge computing growth"],
        threats: &["Regulatory scrutiny", "Talent shortage", "Market saturation", "Cyberattacks and data breaches"],
        recommendations: &[
            "Invest in AI and machine learning capabilities",
            "Focus on cloud-native solutions",
            "Build strong developer ecosystems",
            "Prioritize cybersecurity",
        ],
    },
    IndustryTemplate {
        name: "Healthcare",
        summary: "The healthcare industry is undergoing digital transformation with telemedicine, personalized medicine, and digital health solutions gaining traction. Regulatory compliance and patient data security remain critical concerns.",
        takeaways: &[
            "Telemedicine adoption is accelerating",
            "Personalized medicine is the future",
            "Regulatory compliance is essential",
            "Data privacy and security are paramount",
            "Partnerships with providers are crucial",
        ],
        strengths: &["Growing demand", "Regulatory protection", "High barriers to entry", "Strong pricing power"],
        weaknesses: &["Long development cycles", "High compliance costs", "Complex regulations", "Fragmented data systems"],
        opportunities: &["Aging population", "Telemedicine growth", "Personalized medicine", "AI-assisted diagnostics"],
        threats: &["Price pressure", "Regulatory changes", "Data privacy concerns", "Patent expirations"],
        recommendations: &[
            "Leverage telemedicine and digital health",
            "Invest in personalized medicine",
            "Focus on regulatory compliance",
            "Build partnerships with providers",
        ],
    },
    IndustryTemplate {
        name: "Finance",
        summary: "The financial services sector is embracing digital transformation with FinTech innovations, digital banking, and blockchain technologies reshaping traditional banking models.",
        takeaways: &[
            "Digital banking is becoming the norm",
            "FinTech partnerships are essential",
            "Cybersecurity is a top priority",
            "Regulatory technology (RegTech) is growing",
            "Customer experience is key differentiator",
        ],
        strengths: &["Digital transformation", "Regulatory framework", "Customer trust", "Large customer data assets"],
        weaknesses: &["Legacy systems", "Regulatory compliance", "Cybersecurity risks", "Slow product cycles"],
        opportunities: &["FinTech innovation", "Digital banking", "Cryptocurrency adoption", "Embedded finance"],
        threats: &["Regulatory changes", "Cybersecurity threats", "Economic volatility", "Big Tech entry into payments"],
        recommendations: &[
            "Embrace digital transformation",
            "Invest in cybersecurity",
            "Develop mobile-first solutions",
            "Explore blockchain applications",
        ],
    },
    IndustryTemplate {
        name: "Retail",
        summary: "Retail is evolving with omnichannel strategies, e-commerce growth, and supply chain optimization becoming critical for success in a competitive market.",
        takeaways: &[
            "Omnichannel experience is essential",
            "E-commerce continues to grow",
            "Supply chain optimization is key",
            "Personalization drives customer loyalty",
            "Sustainability is increasingly important",
        ],
        strengths: &["Omnichannel presence", "Customer data", "Brand recognition", "Established supplier networks"],
        weaknesses: &["Thin margins", "Inventory management", "Competition from e-commerce", "High store operating costs"],
        opportunities: &["E-commerce growth", "Personalization", "Supply chain optimization", "Retail media networks"],
        threats: &["Amazon competition", "Changing consumer behavior", "Economic downturns", "Rising labor costs"],
        recommendations: &[
            "Enhance omnichannel experience",
            "Invest in supply chain optimization",
            "Leverage data for personalization",
            "Focus on sustainability",
        ],
    },
    IndustryTemplate {
        name: "Manufacturing",
        summary: "Manufacturing is adopting Industry 4.0 technologies including automation, IoT, and smart manufacturing to improve efficiency and competitiveness.",
        takeaways: &[
            "Automation is transforming operations",
            "IoT integration is accelerating",
            "Supply chain resilience is critical",
            "Sustainability is a key focus",
            "Skills training is essential",
        ],
        strengths: &["Operational efficiency", "Supply chain", "Quality control", "Established customer contracts"],
        weaknesses: &["High capital requirements", "Labor costs", "Environmental regulations", "Aging equipment"],
        opportunities: &["Automation", "IoT integration", "Sustainable manufacturing", "Nearshoring demand"],
        threats: &["Supply chain disruptions", "Trade tensions", "Labor shortages", "Raw material price swings"],
        recommendations: &[
            "Adopt Industry 4.0 technologies",
            "Invest in automation",
            "Optimize supply chains",
            "Focus on sustainability",
        ],
    },
    IndustryTemplate {
        name: "Energy",
        summary: "The energy sector is transitioning to renewable sources with solar, wind, and battery technologies driving innovation and sustainability initiatives.",
        takeaways: &[
            "Renewable energy adoption is accelerating",
            "Battery technology is critical",
            "Smart grid solutions are emerging",
            "Energy efficiency is a priority",
            "Government support is strong",
        ],
        strengths: &["Renewable technology", "Government support", "Growing demand", "Long-term supply contracts"],
        weaknesses: &["High initial costs", "Intermittency issues", "Infrastructure needs", "Long project timelines"],
        opportunities: &["Energy transition", "Battery technology", "Smart grid", "Green hydrogen"],
        threats: &["Policy changes", "Fossil fuel competition", "Technology disruption", "Commodity price volatility"],
        recommendations: &[
            "Accelerate renewable energy adoption",
            "Invest in battery technology",
            "Develop smart grid solutions",
            "Focus on energy efficiency",
        ],
    },
    IndustryTemplate {
        name: "Education",
        summary: "Education is embracing online learning, skills-based training, and personalized learning experiences to meet evolving student needs and market demands.",
        takeaways: &[
            "Online learning is here to stay",
            "Skills-based training is in demand",
            "Personalization improves outcomes",
            "Partnerships with employers are valuable",
            "Technology integration is essential",
        ],
        strengths: &["Growing demand", "Technology integration", "Flexible delivery", "Strong brand credentials"],
        weaknesses: &["Quality concerns", "Competition", "Student acquisition costs", "Low completion rates"],
        opportunities: &["Online learning", "Skills training", "Lifelong learning", "Corporate upskilling"],
        threats: &["Regulatory changes", "Competition", "Economic downturns", "Free content alternatives"],
        recommendations: &[
            "Expand online learning offerings",
            "Focus on skills-based training",
            "Leverage AI for personalization",
            "Build partnerships with employers",
        ],
    },
    IndustryTemplate {
        name: "Real Estate",
        summary: "Real estate is adopting PropTech solutions, smart buildings, and data analytics to improve efficiency, sustainability, and tenant experiences.",
        takeaways: &[
            "PropTech is transforming the industry",
            "Smart buildings are the future",
            "Data analytics drive decisions",
            "Sustainability is a key focus",
            "Tenant experience matters",
        ],
        strengths: &["Asset value", "Location advantages", "Market knowledge", "Stable rental income"],
        weaknesses: &["High capital requirements", "Market cycles", "Maintenance costs", "Low liquidity"],
        opportunities: &["PropTech", "Smart buildings", "Sustainable development", "Mixed-use redevelopment"],
        threats: &["Interest rate changes", "Economic downturns", "Regulatory changes", "Remote work reducing office demand"],
        recommendations: &[
            "Adopt PropTech solutions",
            "Focus on smart buildings",
            "Invest in sustainability",
            "Leverage data analytics",
        ],
    },
    IndustryTemplate {
        name: "Fashion",
        summary: "The fashion industry is experiencing digital transformation with e-commerce growth, sustainable fashion initiatives, and personalized shopping experiences reshaping consumer behavior and brand strategies.",
        takeaways: &[
            "Sustainable fashion is gaining momentum",
            "E-commerce and omnichannel are essential",
            "Social media and influencer marketing drive sales",
            "Personalization enhances customer experience",
            "Fast fashion faces sustainability challenges",
            "Supply chain transparency is increasingly important",
        ],
        strengths: &["Brand recognition", "Creative talent", "Global reach", "Loyal customer communities"],
        weaknesses: &["Fast-changing trends", "Inventory management", "Sustainability challenges", "Heavy markdown dependence"],
        opportunities: &["Sustainable fashion", "E-commerce growth", "Personalization", "Influencer marketing"],
        threats: &["Economic downturns", "Changing consumer values", "Counterfeit products", "Supply chain disruptions"],
        recommendations: &[
            "Embrace sustainable and ethical fashion",
            "Invest in e-commerce and digital presence",
            "Leverage influencer and social media marketing",
            "Focus on personalization and customization",
        ],
    },
];

fn find(industry: Option<&str>) -> Option<&'static IndustryTemplate> {
    let key = industry?.trim();
    INDUSTRIES.iter().find(|t| t.name.eq_ignore_ascii_case(key))
}

pub fn summary(industry: Option<&str>) -> &'static str {
    find(industry).map_or(GENERIC_SUMMARY, |t| t.summary)
}

/// Canned items for one list field of `shape`. Unknown fields yield nothing.
pub fn items(shape: NarrativeShape, field: &str, industry: Option<&str>) -> &'static [&'static str] {
    let t = find(industry);
    let pick = |f: fn(&IndustryTemplate) -> &'static [&'static str], generic| t.map_or(generic, f);
    match (shape, field) {
        (NarrativeShape::Insight, "key_takeaways") => pick(|t| t.takeaways, GENERIC_TAKEAWAYS),
        (NarrativeShape::Swot, "strengths") => pick(|t| t.strengths, GENERIC_STRENGTHS),
        (NarrativeShape::Swot, "weaknesses") => pick(|t| t.weaknesses, GENERIC_WEAKNESSES),
        (NarrativeShape::Swot, "opportunities") => pick(|t| t.opportunities, GENERIC_OPPORTUNITIES),
        (NarrativeShape::Swot, "threats") => pick(|t| t.threats, GENERIC_THREATS),
        (NarrativeShape::Pestel, "political") => PESTEL_POLITICAL,
        (NarrativeShape::Pestel, "economic") => PESTEL_ECONOMIC,
        (NarrativeShape::Pestel, "social") => PESTEL_SOCIAL,
        (NarrativeShape::Pestel, "technological") => PESTEL_TECHNOLOGICAL,
        (NarrativeShape::Pestel, "environmental") => PESTEL_ENVIRONMENTAL,
        (NarrativeShape::Pestel, "legal") => PESTEL_LEGAL,
        (NarrativeShape::Growth, "opportunities") => GROWTH_OPPORTUNITIES,
        (NarrativeShape::Growth, "strategies") => GROWTH_STRATEGIES,
        (NarrativeShape::Growth, "risks") => GROWTH_RISKS,
        (_, "recommendations") => pick(|t| t.recommendations, GENERIC_RECOMMENDATIONS),
        _ => &[],
    }
}
