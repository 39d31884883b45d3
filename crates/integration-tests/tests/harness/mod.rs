//! Shared test harness
//!
//! Each test binary pulls in only the pieces it needs.
#![allow(dead_code)]

pub mod config;
pub mod mock_providers;
pub mod server;
