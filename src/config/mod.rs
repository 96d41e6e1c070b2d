// src/config/mod.rs
pub mod ai;
pub mod heuristics;
pub mod settings;

pub use ai::AiConfig;
pub use heuristics::Heuristics;
pub use settings::Settings;
