pub mod common;
pub mod completions;
pub mod config;
pub mod edit;
pub mod export;
pub mod show;
pub mod waveform;
