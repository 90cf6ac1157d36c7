//! Floodgate - Token Bucket Rate Limiter
//!
//! This crate implements a token-bucket rate limiter: a bounded token store
//! is consumed per admitted action and replenished by a background task at a
//! fixed rate, capping sustained throughput while allowing bursts up to the
//! store's capacity. Admission is strictly non-blocking.

pub mod config;
pub mod error;
pub mod ratelimit;
