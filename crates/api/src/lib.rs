//! HTTP API: server, routing, and request/response mapping for the
//! price-gated product catalog.

pub mod app;
pub mod config;
pub mod middleware;
