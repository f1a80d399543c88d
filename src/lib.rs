//! `agentvibes` listings - beautiful multi-column voice and personality panels
//!
//! This library discovers TTS voices and personalities and renders them as
//! bordered, multi-column terminal panels with ANSI-aware alignment.

pub mod config;
pub mod discovery;
pub mod render;
pub mod telemetry;
