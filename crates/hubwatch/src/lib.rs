//! Hubwatch - Community Monitoring and AI Engagement
//!
//! Watches a Q&A community for unanswered human-authored questions,
//! answers a rate-limited number of them per hour through configurable
//! AI personas, and recomputes trending topics from recent question tags.

pub mod cli;
pub mod config;
pub mod error;
pub mod server;

pub use config::MonitorConfig;
pub use error::{MonitorError, Result};
