//! Business logic services.

pub mod attendance;
