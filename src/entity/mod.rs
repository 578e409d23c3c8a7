//! SeaORM entity definitions for PostgreSQL database.

pub mod activity_log;
pub mod employee;
pub mod leave_request;
pub mod leave_type;
pub mod presence_record;
