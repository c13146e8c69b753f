//! Raw configuration models deserialized from external sources.

pub mod config;
