//! Shared plumbing for MagicBank services: configuration, tracing, health
//! endpoints and the common HTTP middleware stack.

pub mod config;
pub mod health;
pub mod middleware;
pub mod tracing;
