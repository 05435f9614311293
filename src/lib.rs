//! StatusBoard - status dashboard for an uptime-monitoring account.
//!
//! Polls the upstream API once per request, normalizes the loosely-typed
//! payload into display records, and serves them as HTML and JSON.

pub mod config;
pub mod monitor;
pub mod service;
pub mod upstream;
pub mod web;
