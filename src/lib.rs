//! # Choir API Library
//!
//! This library provides the core functionality for the choir CMS backend,
//! including handlers, models, repositories and server configuration.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod media;
pub mod models;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub mod validation;
pub use migration;
