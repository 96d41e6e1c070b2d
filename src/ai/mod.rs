// src/ai/mod.rs
pub mod samples;
pub mod text_client;

pub use text_client::{build_text_client, DynTextClient, Generated, TextClient};
