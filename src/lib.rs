//! # Venue Booking Library
//!
//! This library provides the core functionality for the venue booking
//! service: schema entities, forms, repositories, handlers and server setup.

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
