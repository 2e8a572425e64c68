//! # Marquee
//!
//! HTTP server and CLI around the `marquee-core` film catalog.

pub mod api;
pub mod cli;
pub mod config;
