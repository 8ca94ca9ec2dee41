// ABOUTME: Library root for wadm-deploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod render;
pub mod sign;
pub mod types;
