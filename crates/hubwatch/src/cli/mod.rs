//! CLI module - thin HTTP client over the hubwatch REST API

pub mod client;
pub mod commands;
pub mod server_manager;
