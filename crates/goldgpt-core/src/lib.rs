//! Core GoldGPT client library (backend client, session state, config).

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
