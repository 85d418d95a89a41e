//! Test utilities for MagicBank services.
//!
//! Provides `MockMailRelay`, an in-process stand-in for the transactional mail API.
//! Import from dev-dependencies only — never in production code.

pub mod mail;
