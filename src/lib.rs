//! Library exports for the add-on provider services, shared between the
//! binaries and tests.

pub mod auth;
pub mod clever;
pub mod config;
pub mod models;
pub mod routes;
pub mod startup;
pub mod state;
pub mod utils;
