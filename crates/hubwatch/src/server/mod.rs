//! REST API module for the hubwatch monitoring service
//!
//! Provides the HTTP endpoints for community monitoring, AI engagement,
//! and trend analysis. Uses axum for routing and schemars for OpenAPI
//! documentation generation.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routing;
pub mod services;
pub mod startup;
pub mod types;
