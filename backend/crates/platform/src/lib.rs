//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Signed compact tokens (JWT, HS256)
//! - Environment-driven configuration helpers
//! - Request header helpers (client IP, bearer credentials)
//! - Secure randomness

pub mod client;
pub mod config;
pub mod crypto;
pub mod password;
pub mod token;
