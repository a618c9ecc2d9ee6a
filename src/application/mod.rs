//! Application layer
//!
//! Use cases that turn raw form input into domain calls. Validation of
//! user-supplied strings happens here; the domain services only see
//! value objects.

pub mod admin;
pub mod auth;

#[cfg(test)]
pub(crate) mod testing;
