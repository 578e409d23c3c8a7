//! TrackPro attendance server library.
//!
//! Derives daily presence records from tracked activity and leave, records
//! auto-detected leave, and serves both over HTTP.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
