//! Member portal with admin-approved registration
//!
//! Layers follow a ports-and-adapters split: `domain` holds entities,
//! services and port traits, `application` the use cases, `infrastructure`
//! the Postgres, hashing, mail and config adapters, and `adapters::http`
//! the actix-web front end.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
