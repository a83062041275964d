//! Visa screening and candidate matching for an international teacher
//! placement board.
//!
//! The library exposes two cooperating rule-evaluation components under
//! [`workflows::placement`]: a per-country visa eligibility engine and a
//! staged candidate filter pipeline. The binary in `main.rs` serves both
//! over HTTP and from the command line.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
