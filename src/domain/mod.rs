//! Environment record and the value objects it is made of.

pub mod environment;
pub mod login;
pub mod types;
