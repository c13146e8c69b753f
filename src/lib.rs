//! Environment configuration record of the coffee shop application.
//!
//! The record carries the backend API base URL and the Auth0 settings the
//! front end bootstraps from. One instance exists per process: install it
//! with [`install`] (or [`settings::init`]) and read it with [`environment`].

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "loader")]
pub mod settings;

#[cfg(feature = "data")]
pub use domain::environment::{
    AlreadyInstalled, Auth0Settings, Environment, environment, install,
};
