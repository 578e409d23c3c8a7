//! Attendance derivation test suite.
//!
//! Runs the deriver and the HTTP handlers against an in-memory store; no
//! database is needed.
//!
//! Run with: cargo test --test attendance


mod test_auto_leave;
mod test_http;
mod test_thresholds;
