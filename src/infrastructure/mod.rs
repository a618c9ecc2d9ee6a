//! Infrastructure layer
//!
//! Concrete adapters for the domain ports: persistence, password hashing,
//! email delivery and configuration loading.

pub mod config;
pub mod notification;
pub mod persistence;
pub mod security;
